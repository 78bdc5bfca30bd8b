//! One-hot encoding of every column of a categorical array.
//!
//! Each column is encoded on its own: its distinct values are sorted, every row
//! gets the index of its value in that sorted list, and the indices become a
//! dense binary matrix. Column blocks and their category lists are then
//! concatenated in input column order.

use crate::preprocessing::data::Data;
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::Transformer;
use crate::preprocessing::value::Value;
use ndarray::{concatenate, Array2, ArrayView1, ArrayView2, Axis};
use tracing::{debug, trace};

/// One-hot encoder for arrays made only of categorical columns.
///
/// Unlike a fit-once encoder, categories are recomputed from the data on every
/// call to [`encode`](Self::encode), and `fit` is a no-op. The categories of the
/// most recent call are kept so that [`feature_names`](Transformer::feature_names)
/// can report them.
///
/// # Example
/// ```rust
/// use featureprep::preprocessing::{CategoricalEncoder, Value};
/// use ndarray::array;
///
/// let data = array![
///     [Value::from("S"), Value::Int(3)],
///     [Value::from("C"), Value::Int(1)],
///     [Value::from("S"), Value::Int(1)],
/// ];
///
/// let mut encoder = CategoricalEncoder::new();
/// let encoded = encoder.encode(data.view()).unwrap();
///
/// // [C, S] + [1, 3]
/// assert_eq!(encoded, array![
///     [0.0, 1.0, 0.0, 1.0],
///     [1.0, 0.0, 1.0, 0.0],
///     [0.0, 1.0, 1.0, 0.0],
/// ]);
/// assert_eq!(encoder.categories().unwrap(), &[
///     Value::from("C"), Value::from("S"), Value::Int(1), Value::Int(3),
/// ]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CategoricalEncoder {
    /// Sorted categories of every column, concatenated in column order.
    categories_: Option<Vec<Value>>,
    /// Number of categories per input column.
    n_values_: Vec<usize>,
}

impl CategoricalEncoder {
    /// Create an encoder with no retained categories.
    pub fn new() -> Self {
        Self::default()
    }

    /// One-hot encode every column of `data`.
    ///
    /// Returns a `rows x sum(distinct values per column)` matrix and retains the
    /// concatenated categories.
    ///
    /// # Errors
    /// [`PreprocessingError::EmptyData`] if `data` has no columns.
    pub fn encode(&mut self, data: ArrayView2<'_, Value>) -> Result<Array2<f64>, PreprocessingError> {
        let (rows, cols) = data.dim();
        if cols == 0 {
            return Err(PreprocessingError::EmptyData(
                "CategoricalEncoder needs at least one column".to_string(),
            ));
        }
        debug!(rows, cols, "one-hot encoding categorical columns");

        let mut categories = Vec::new();
        let mut n_values = Vec::with_capacity(cols);
        let mut blocks = Vec::with_capacity(cols);

        for (col, column) in data.axis_iter(Axis(1)).enumerate() {
            let (col_categories, block) = encode_column(column)?;
            trace!(col, n_categories = col_categories.len(), "encoded column");
            n_values.push(col_categories.len());
            categories.extend(col_categories);
            blocks.push(block);
        }

        let views: Vec<_> = blocks.iter().map(|b| b.view()).collect();
        let encoded = concatenate(Axis(1), &views)?;

        self.categories_ = Some(categories);
        self.n_values_ = n_values;
        Ok(encoded)
    }

    /// One-hot encode a single column, treated as an `n x 1` array.
    pub fn encode_1d(&mut self, data: ArrayView1<'_, Value>) -> Result<Array2<f64>, PreprocessingError> {
        self.encode(data.insert_axis(Axis(1)))
    }

    /// Categories retained by the last encode, or `None` before the first one.
    pub fn categories(&self) -> Option<&[Value]> {
        self.categories_.as_deref()
    }

    /// Number of categories per column of the last encoded array.
    pub fn n_values(&self) -> &[usize] {
        &self.n_values_
    }

    /// Total number of output columns of the last encode.
    pub fn n_features_out(&self) -> usize {
        self.n_values_.iter().sum()
    }
}

/// Sorted distinct values of `column` and its one-hot matrix.
fn encode_column(
    column: ArrayView1<'_, Value>,
) -> Result<(Vec<Value>, Array2<f64>), PreprocessingError> {
    let mut categories: Vec<Value> = column.to_vec();
    categories.sort();
    categories.dedup();

    let mut encoded = Array2::zeros((column.len(), categories.len()));
    for (row, value) in column.iter().enumerate() {
        let code = categories.binary_search(value).map_err(|_| {
            PreprocessingError::InvalidInput(format!(
                "value '{}' at row {} is missing from its column's categories",
                value, row
            ))
        })?;
        encoded[[row, code]] = 1.0;
    }
    Ok((categories, encoded))
}

impl Transformer for CategoricalEncoder {
    fn fit(&mut self, _data: &Data) -> Result<(), PreprocessingError> {
        Ok(())
    }

    fn transform(&mut self, data: &Data) -> Result<Data, PreprocessingError> {
        let encoded = match data {
            Data::Values(values) => self.encode(values.view())?,
            Data::Column(column) => self.encode_1d(column.view())?,
            Data::Numeric(numeric) => self.encode(numeric.mapv(Value::Float).view())?,
            Data::Frame(_) => {
                return Err(PreprocessingError::InvalidInput(
                    "CategoricalEncoder expects an array, got a frame".to_string(),
                ))
            }
        };
        Ok(Data::Numeric(encoded))
    }

    fn feature_names(&self) -> Result<Vec<String>, PreprocessingError> {
        self.categories_
            .as_ref()
            .map(|cats| cats.iter().map(ToString::to_string).collect())
            .ok_or_else(|| {
                PreprocessingError::NotFitted(
                    "CategoricalEncoder has no feature names before its first transform"
                        .to_string(),
                )
            })
    }
}
