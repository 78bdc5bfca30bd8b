//! Column-subset adapter from polars tables to raw arrays.

use crate::preprocessing::data::Data;
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::Transformer;
use crate::preprocessing::value::Value;
use ndarray::Array2;
use polars::prelude::{Column, DataFrame};
use tracing::debug;

/// Selects an ordered subset of named columns from a polars [`DataFrame`].
///
/// The adapter is stateless with respect to training data: `fit` does nothing,
/// and `transform` returns the selected columns, in the configured order, as a
/// raw `rows x columns` array of [`Value`]s without any type coercion. The
/// configured names double as the output feature names.
///
/// # Example
/// ```rust
/// use featureprep::preprocessing::{DataFrameAdapter, Value};
/// use polars::df;
///
/// let df = df!(
///     "sex" => ["male", "female"],
///     "pclass" => [3i64, 1]
/// )
/// .unwrap();
///
/// let adapter = DataFrameAdapter::new(["pclass", "sex"]);
/// let values = adapter.select(&df).unwrap();
///
/// assert_eq!(values.dim(), (2, 2));
/// assert_eq!(values[[1, 0]], Value::Int(1));
/// assert_eq!(values[[1, 1]], Value::from("female"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DataFrameAdapter {
    col_names: Vec<String>,
}

impl DataFrameAdapter {
    /// Create an adapter selecting `col_names`, in that order.
    pub fn new<I, S>(col_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            col_names: col_names.into_iter().map(Into::into).collect(),
        }
    }

    /// The configured column names.
    pub fn col_names(&self) -> &[String] {
        &self.col_names
    }

    /// Select the configured columns from `frame`.
    ///
    /// # Errors
    /// - [`PreprocessingError::ColumnNotFound`] for the first configured name the
    ///   table does not have.
    /// - [`PreprocessingError::InvalidInput`] for a null cell or a cell type with
    ///   no [`Value`] counterpart.
    pub fn select(&self, frame: &DataFrame) -> Result<Array2<Value>, PreprocessingError> {
        let columns: Vec<&Column> = self
            .col_names
            .iter()
            .map(|name| {
                frame
                    .column(name)
                    .map_err(|_| PreprocessingError::ColumnNotFound(name.clone()))
            })
            .collect::<Result<_, _>>()?;

        let rows = frame.height();
        let mut cells = Vec::with_capacity(rows * columns.len());
        for row in 0..rows {
            for column in &columns {
                let cell = Value::try_from(column.get(row)?).map_err(|err| {
                    PreprocessingError::InvalidInput(format!(
                        "column '{}', row {}: {}",
                        column.name(),
                        row,
                        err
                    ))
                })?;
                cells.push(cell);
            }
        }

        Ok(Array2::from_shape_vec((rows, columns.len()), cells)?)
    }
}

impl Transformer for DataFrameAdapter {
    fn fit(&mut self, _data: &Data) -> Result<(), PreprocessingError> {
        Ok(())
    }

    fn transform(&mut self, data: &Data) -> Result<Data, PreprocessingError> {
        match data {
            Data::Frame(frame) => {
                debug!(
                    columns = ?self.col_names,
                    rows = frame.height(),
                    "selecting column subset"
                );
                self.select(frame).map(Data::Values)
            }
            other => Err(PreprocessingError::InvalidInput(format!(
                "DataFrameAdapter expects a frame, got {}",
                other.kind()
            ))),
        }
    }

    fn feature_names(&self) -> Result<Vec<String>, PreprocessingError> {
        Ok(self.col_names.clone())
    }
}
