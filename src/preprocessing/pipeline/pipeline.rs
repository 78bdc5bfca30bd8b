//! Pipeline for chaining named transformers.
//!
//! A Pipeline chains stages so that the output of one becomes the input of the
//! next. Every stage has a name, and stages can be looked up by it.
//!
//! # Example
//! ```rust
//! use featureprep::preprocessing::{
//!     CategoricalEncoder, Data, DataFrameAdapter, Pipeline, Transformer,
//! };
//! use polars::df;
//!
//! let df = df!("sex" => ["male", "female"]).unwrap();
//!
//! let mut pipeline = Pipeline::new()
//!     .add("selector", DataFrameAdapter::new(["sex"]))
//!     .add("encoder", CategoricalEncoder::new());
//!
//! let out = pipeline.fit_transform(&Data::Frame(df)).unwrap();
//! assert_eq!(out.shape(), (2, 2));
//! assert_eq!(pipeline.feature_names().unwrap(), vec!["female", "male"]);
//! ```

use crate::preprocessing::data::Data;
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::Transformer;
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// A sequence of named stages.
#[derive(Default)]
pub struct Pipeline {
    steps: Vec<(String, Box<dyn Transformer>)>,
}

impl Pipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a stage under `name`.
    pub fn add<S, T>(self, name: S, step: T) -> Self
    where
        S: Into<String>,
        T: Transformer + 'static,
    {
        self.add_boxed(name, Box::new(step))
    }

    /// Append an already boxed stage under `name`.
    pub fn add_boxed<S: Into<String>>(mut self, name: S, step: Box<dyn Transformer>) -> Self {
        self.steps.push((name.into(), step));
        self
    }

    /// Get the number of stages.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the pipeline has no stages.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Stage names in order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Iterate over `(name, stage)` pairs in order.
    pub fn steps(&self) -> impl Iterator<Item = (&str, &(dyn Transformer + 'static))> {
        self.steps
            .iter()
            .map(|(name, step)| (name.as_str(), step.as_ref()))
    }

    /// The first stage called `name`.
    ///
    /// # Errors
    /// [`PreprocessingError::StepNotFound`] if there is none.
    pub fn named_step(&self, name: &str) -> Result<&(dyn Transformer + 'static), PreprocessingError> {
        self.steps
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, step)| step.as_ref())
            .ok_or_else(|| PreprocessingError::StepNotFound(name.to_string()))
    }

    /// Mutable access to the first stage called `name`.
    pub fn named_step_mut(
        &mut self,
        name: &str,
    ) -> Result<&mut (dyn Transformer + 'static), PreprocessingError> {
        self.steps
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, step)| step.as_mut())
            .ok_or_else(|| PreprocessingError::StepNotFound(name.to_string()))
    }

    fn validate(&self) -> Result<(), PreprocessingError> {
        if self.steps.is_empty() {
            return Err(PreprocessingError::InvalidParameter(
                "Cannot use an empty pipeline".to_string(),
            ));
        }
        check_unique_names("step", self.steps.iter().map(|(n, _)| n.as_str()))
    }
}

/// Reject a list of names containing duplicates.
pub(crate) fn check_unique_names<'a>(
    kind: &str,
    names: impl Iterator<Item = &'a str>,
) -> Result<(), PreprocessingError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(PreprocessingError::InvalidParameter(format!(
                "Duplicate {} name '{}'",
                kind, name
            )));
        }
    }
    Ok(())
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.steps
                    .iter()
                    .map(|(name, step)| (name.as_str(), step.step_name())),
            )
            .finish()
    }
}

impl Transformer for Pipeline {
    /// Fit-transform every stage but the last, then fit the last one on the
    /// output of the stages before it.
    fn fit(&mut self, data: &Data) -> Result<(), PreprocessingError> {
        self.validate()?;
        debug!(steps = ?self.step_names(), "fitting pipeline");

        let ((last_name, last), init) = self
            .steps
            .split_last_mut()
            .ok_or_else(|| PreprocessingError::InvalidParameter("empty pipeline".to_string()))?;

        let mut current: Option<Data> = None;
        for (name, step) in init.iter_mut() {
            debug!(step = %name, kind = step.step_name(), "fit_transform");
            let out = step.fit_transform(current.as_ref().unwrap_or(data))?;
            current = Some(out);
        }
        debug!(step = %last_name, kind = last.step_name(), "fit");
        last.fit(current.as_ref().unwrap_or(data))
    }

    fn transform(&mut self, data: &Data) -> Result<Data, PreprocessingError> {
        self.validate()?;

        let mut steps = self.steps.iter_mut();
        let (_, first) = steps
            .next()
            .ok_or_else(|| PreprocessingError::InvalidParameter("empty pipeline".to_string()))?;
        let mut current = first.transform(data)?;
        for (_, step) in steps {
            current = step.transform(&current)?;
        }
        Ok(current)
    }

    /// Feature names of the last stage.
    fn feature_names(&self) -> Result<Vec<String>, PreprocessingError> {
        match self.steps.last() {
            Some((_, step)) => step.feature_names(),
            None => Err(PreprocessingError::InvalidParameter(
                "empty pipeline has no feature names".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::adapter::DataFrameAdapter;
    use crate::preprocessing::encoding::CategoricalEncoder;
    use polars::df;
    use std::cell::Cell;
    use std::rc::Rc;

    fn passengers() -> Data {
        Data::Frame(
            df!(
                "sex" => ["male", "female", "female"],
                "embarked" => ["S", "C", "S"],
                "fare" => [7.25, 71.28, 7.92]
            )
            .unwrap(),
        )
    }

    fn categorical() -> Pipeline {
        Pipeline::new()
            .add("selector", DataFrameAdapter::new(["sex", "embarked"]))
            .add("encoder", CategoricalEncoder::new())
    }

    // Counts calls so tests can check which methods a pipeline invokes.
    struct Recorder {
        fits: Rc<Cell<usize>>,
        transforms: Rc<Cell<usize>>,
    }

    impl Transformer for Recorder {
        fn fit(&mut self, _data: &Data) -> Result<(), PreprocessingError> {
            self.fits.set(self.fits.get() + 1);
            Ok(())
        }

        fn transform(&mut self, data: &Data) -> Result<Data, PreprocessingError> {
            self.transforms.set(self.transforms.get() + 1);
            Ok(data.clone())
        }
    }

    #[test]
    fn test_pipeline_step_names() {
        let pipeline = categorical();
        assert_eq!(pipeline.len(), 2);
        assert_eq!(pipeline.step_names(), vec!["selector", "encoder"]);
    }

    #[test]
    fn test_pipeline_fit_transform() {
        let mut pipeline = categorical();
        let out = pipeline.fit_transform(&passengers()).unwrap();

        assert_eq!(out.shape(), (3, 4));
        assert_eq!(
            pipeline.feature_names().unwrap(),
            vec!["female", "male", "C", "S"]
        );
    }

    #[test]
    fn test_pipeline_fit_skips_last_transform() {
        let fits = Rc::new(Cell::new(0));
        let transforms = Rc::new(Cell::new(0));
        let recorder = || Recorder {
            fits: fits.clone(),
            transforms: transforms.clone(),
        };

        let mut pipeline = Pipeline::new().add("a", recorder()).add("b", recorder());
        pipeline.fit(&passengers()).unwrap();

        assert_eq!(fits.get(), 2);
        assert_eq!(transforms.get(), 1);
    }

    #[test]
    fn test_pipeline_named_step() {
        let pipeline = categorical();
        let step = pipeline.named_step("encoder").unwrap();
        assert_eq!(step.step_name(), "CategoricalEncoder");
        assert!(step.downcast_ref::<CategoricalEncoder>().is_some());
    }

    #[test]
    fn test_pipeline_named_step_missing() {
        let pipeline = categorical();
        assert!(matches!(
            pipeline.named_step("scaler"),
            Err(PreprocessingError::StepNotFound(name)) if name == "scaler"
        ));
    }

    #[test]
    fn test_pipeline_named_step_mut() {
        let mut pipeline = categorical();
        let step = pipeline.named_step_mut("selector").unwrap();
        let adapter = step.downcast_mut::<DataFrameAdapter>().unwrap();
        *adapter = DataFrameAdapter::new(["sex"]);

        let out = pipeline.fit_transform(&passengers()).unwrap();
        assert_eq!(out.shape(), (3, 2));
    }

    #[test]
    fn test_pipeline_propagates_stage_errors() {
        let mut pipeline = Pipeline::new().add("selector", DataFrameAdapter::new(["cabin"]));
        assert!(matches!(
            pipeline.fit_transform(&passengers()),
            Err(PreprocessingError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn test_pipeline_empty() {
        let mut pipeline = Pipeline::new();
        assert!(pipeline.is_empty());
        assert!(matches!(
            pipeline.fit(&passengers()),
            Err(PreprocessingError::InvalidParameter(_))
        ));
        assert!(pipeline.feature_names().is_err());
    }

    #[test]
    fn test_pipeline_duplicate_step_names() {
        let mut pipeline = Pipeline::new()
            .add("step", DataFrameAdapter::new(["sex"]))
            .add("step", CategoricalEncoder::new());
        assert!(matches!(
            pipeline.fit(&passengers()),
            Err(PreprocessingError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_pipeline_debug_lists_steps() {
        let pipeline = categorical();
        let debug = format!("{:?}", pipeline);
        assert!(debug.contains("selector"));
        assert!(debug.contains("CategoricalEncoder"));
    }
}
