//! Data passed between pipeline stages.

use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::value::Value;
use ndarray::{concatenate, Array1, Array2, ArrayView2, Axis};
use polars::prelude::DataFrame;

/// Input or output of a [`Transformer`](crate::preprocessing::Transformer).
///
/// A pipeline usually starts from a [`Data::Frame`], an adapter turns it into
/// [`Data::Values`], and an encoder produces [`Data::Numeric`].
#[derive(Clone, Debug)]
pub enum Data {
    /// A polars table.
    Frame(DataFrame),
    /// A raw 2D array of cell values.
    Values(Array2<Value>),
    /// A single column of cell values.
    Column(Array1<Value>),
    /// A dense numeric matrix.
    Numeric(Array2<f64>),
}

impl Data {
    /// `(rows, columns)`; a single column counts as `n x 1`.
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Data::Frame(df) => df.shape(),
            Data::Values(a) => a.dim(),
            Data::Column(a) => (a.len(), 1),
            Data::Numeric(a) => a.dim(),
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Data::Frame(_) => "frame",
            Data::Values(_) => "values",
            Data::Column(_) => "column",
            Data::Numeric(_) => "numeric",
        }
    }

    /// Convert to a dense `f64` matrix.
    ///
    /// Integers, floats and booleans convert; a single column becomes `n x 1`.
    ///
    /// # Errors
    /// - [`PreprocessingError::NonNumeric`] on the first string cell.
    /// - [`PreprocessingError::InvalidInput`] for a table.
    pub fn into_numeric(self) -> Result<Array2<f64>, PreprocessingError> {
        match self {
            Data::Numeric(a) => Ok(a),
            Data::Values(a) => values_to_f64(a.view()),
            Data::Column(a) => values_to_f64(a.view().insert_axis(Axis(1))),
            Data::Frame(_) => Err(PreprocessingError::InvalidInput(
                "a table must be turned into an array before numeric conversion".to_string(),
            )),
        }
    }
}

impl From<DataFrame> for Data {
    fn from(df: DataFrame) -> Self {
        Data::Frame(df)
    }
}

impl From<Array2<Value>> for Data {
    fn from(a: Array2<Value>) -> Self {
        Data::Values(a)
    }
}

impl From<Array1<Value>> for Data {
    fn from(a: Array1<Value>) -> Self {
        Data::Column(a)
    }
}

impl From<Array2<f64>> for Data {
    fn from(a: Array2<f64>) -> Self {
        Data::Numeric(a)
    }
}

fn values_to_f64(values: ArrayView2<'_, Value>) -> Result<Array2<f64>, PreprocessingError> {
    let mut out = Array2::zeros(values.dim());
    for ((row, col), value) in values.indexed_iter() {
        out[[row, col]] = value.as_f64().ok_or_else(|| {
            PreprocessingError::NonNumeric(format!(
                "'{}' ({}) at ({}, {})",
                value,
                value.type_name(),
                row,
                col
            ))
        })?;
    }
    Ok(out)
}

/// Concatenate matrices horizontally, keeping their order.
///
/// # Errors
/// - [`PreprocessingError::EmptyData`] if `blocks` is empty.
/// - [`PreprocessingError::InvalidShape`] if the row counts differ.
pub fn hcat(blocks: &[Array2<f64>]) -> Result<Array2<f64>, PreprocessingError> {
    if blocks.is_empty() {
        return Err(PreprocessingError::EmptyData(
            "nothing to concatenate".to_string(),
        ));
    }
    let rows = blocks[0].nrows();
    if let Some(bad) = blocks.iter().find(|b| b.nrows() != rows) {
        return Err(PreprocessingError::InvalidShape {
            expected: format!("{} rows", rows),
            got: format!("{} rows", bad.nrows()),
        });
    }
    let views: Vec<_> = blocks.iter().map(|b| b.view()).collect();
    Ok(concatenate(Axis(1), &views)?)
}
