//! Core trait for pipeline stages.
//!
//! [`Transformer`] is the contract every stage of a [`Pipeline`](crate::preprocessing::Pipeline)
//! conforms to: `fit`, `transform` and a feature-name accessor. It is object safe, so
//! heterogeneous stages are stored as `Box<dyn Transformer>` and can be recovered by
//! concrete type with [`downcast_ref`](trait.Transformer.html#method.downcast_ref).

use crate::preprocessing::data::Data;
use crate::preprocessing::error::PreprocessingError;
use std::any::{type_name, Any};

/// Access to a stage as [`Any`] for downcasting.
///
/// Implemented for every sized `'static` type.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A pipeline stage.
///
/// # Example
/// ```rust
/// use featureprep::preprocessing::{Data, DataFrameAdapter, Transformer};
/// use polars::df;
///
/// let df = df!("fare" => [7.25, 71.28]).unwrap();
/// let mut adapter = DataFrameAdapter::new(["fare"]);
///
/// let out = adapter.fit_transform(&Data::Frame(df)).unwrap();
/// assert_eq!(out.shape(), (2, 1));
/// assert_eq!(adapter.feature_names().unwrap(), vec!["fare"]);
/// ```
pub trait Transformer: AsAny {
    /// Learn whatever the stage needs from `data`.
    fn fit(&mut self, data: &Data) -> Result<(), PreprocessingError>;

    /// Transform `data`.
    ///
    /// Takes `&mut self` because some stages record state (such as their output
    /// feature names) while transforming.
    fn transform(&mut self, data: &Data) -> Result<Data, PreprocessingError>;

    /// Fit on `data`, then transform it.
    fn fit_transform(&mut self, data: &Data) -> Result<Data, PreprocessingError> {
        self.fit(data)?;
        self.transform(data)
    }

    /// Names of the output features.
    ///
    /// # Errors
    /// [`PreprocessingError::FeatureNamesUnsupported`] unless the stage overrides it;
    /// stages that learn their names while transforming return
    /// [`PreprocessingError::NotFitted`] before the first transform.
    fn feature_names(&self) -> Result<Vec<String>, PreprocessingError> {
        Err(PreprocessingError::FeatureNamesUnsupported(
            self.step_name().to_string(),
        ))
    }

    /// Short type name of the stage, for logging and error messages.
    fn step_name(&self) -> &'static str {
        short_type_name(type_name::<Self>())
    }
}

impl dyn Transformer {
    /// Downcast to a concrete stage type.
    pub fn downcast_ref<T: Transformer + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Mutable downcast to a concrete stage type.
    pub fn downcast_mut<T: Transformer + 'static>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

// "featureprep::preprocessing::adapter::DataFrameAdapter" -> "DataFrameAdapter"
fn short_type_name(full_name: &'static str) -> &'static str {
    let before_generic = match full_name.find('<') {
        Some(pos) => &full_name[..pos],
        None => full_name,
    };
    match before_generic.rfind("::") {
        Some(pos) => &before_generic[pos + 2..],
        None => before_generic,
    }
}
