//! Feature union: named pipelines applied side by side.
//!
//! Every branch receives the same input. Branch outputs are converted to `f64`
//! matrices and concatenated horizontally, in branch order.

use crate::preprocessing::data::{hcat, Data};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::pipeline::pipeline::{check_unique_names, Pipeline};
use crate::preprocessing::traits::Transformer;
use std::fmt;
use tracing::debug;

/// Named branches, each a [`Pipeline`], whose outputs are joined column-wise.
///
/// Feature names are the branch feature names prefixed with `"{branch}__"`.
///
/// # Example
/// ```rust
/// use featureprep::preprocessing::{
///     CategoricalEncoder, Data, DataFrameAdapter, FeatureUnion, Pipeline, Transformer,
/// };
/// use polars::df;
///
/// let df = df!("fare" => [7.25, 71.28], "sex" => ["male", "female"]).unwrap();
///
/// let mut union = FeatureUnion::new()
///     .add("numeric", Pipeline::new().add("selector", DataFrameAdapter::new(["fare"])))
///     .add(
///         "categorical",
///         Pipeline::new()
///             .add("selector", DataFrameAdapter::new(["sex"]))
///             .add("encoder", CategoricalEncoder::new()),
///     );
///
/// let out = union.fit_transform(&Data::Frame(df)).unwrap();
/// assert_eq!(out.shape(), (2, 3));
/// assert_eq!(
///     union.feature_names().unwrap(),
///     vec!["numeric__fare", "categorical__female", "categorical__male"]
/// );
/// ```
#[derive(Default)]
pub struct FeatureUnion {
    transformer_list: Vec<(String, Pipeline)>,
}

impl FeatureUnion {
    /// Create a union with no branches.
    pub fn new() -> Self {
        Self {
            transformer_list: Vec::new(),
        }
    }

    /// Append a branch under `name`.
    pub fn add<S: Into<String>>(mut self, name: S, pipeline: Pipeline) -> Self {
        self.transformer_list.push((name.into(), pipeline));
        self
    }

    /// Get the number of branches.
    pub fn len(&self) -> usize {
        self.transformer_list.len()
    }

    /// Check if the union has no branches.
    pub fn is_empty(&self) -> bool {
        self.transformer_list.is_empty()
    }

    /// Branch names in order.
    pub fn branch_names(&self) -> Vec<&str> {
        self.transformer_list
            .iter()
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Iterate over `(name, pipeline)` pairs in order.
    pub fn branches(&self) -> impl Iterator<Item = (&str, &Pipeline)> {
        self.transformer_list
            .iter()
            .map(|(name, pipeline)| (name.as_str(), pipeline))
    }

    /// The first branch called `name`.
    ///
    /// # Errors
    /// [`PreprocessingError::BranchNotFound`] if there is none.
    pub fn branch(&self, name: &str) -> Result<&Pipeline, PreprocessingError> {
        self.transformer_list
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, pipeline)| pipeline)
            .ok_or_else(|| PreprocessingError::BranchNotFound(name.to_string()))
    }

    /// Mutable access to the first branch called `name`.
    pub fn branch_mut(&mut self, name: &str) -> Result<&mut Pipeline, PreprocessingError> {
        self.transformer_list
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, pipeline)| pipeline)
            .ok_or_else(|| PreprocessingError::BranchNotFound(name.to_string()))
    }

    fn validate(&self) -> Result<(), PreprocessingError> {
        if self.transformer_list.is_empty() {
            return Err(PreprocessingError::InvalidParameter(
                "Cannot use a feature union without branches".to_string(),
            ));
        }
        check_unique_names(
            "branch",
            self.transformer_list.iter().map(|(n, _)| n.as_str()),
        )
    }
}

impl fmt::Debug for FeatureUnion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.transformer_list.iter().map(|(n, p)| (n, p)))
            .finish()
    }
}

impl Transformer for FeatureUnion {
    fn fit(&mut self, data: &Data) -> Result<(), PreprocessingError> {
        self.validate()?;
        for (name, pipeline) in &mut self.transformer_list {
            debug!(branch = %name, "fitting branch");
            pipeline.fit(data)?;
        }
        Ok(())
    }

    /// Transform `data` with every branch, in order, and join the outputs.
    ///
    /// The call is not all-or-nothing: branches run one after another, so if a
    /// branch fails, the stages of the branches before it keep the state this
    /// call gave them (an encoder's feature names, for instance).
    fn transform(&mut self, data: &Data) -> Result<Data, PreprocessingError> {
        self.validate()?;
        let mut blocks = Vec::with_capacity(self.transformer_list.len());
        for (name, pipeline) in &mut self.transformer_list {
            let block = pipeline.transform(data)?.into_numeric()?;
            debug!(branch = %name, shape = ?block.dim(), "branch transformed");
            blocks.push(block);
        }
        hcat(&blocks).map(Data::Numeric)
    }

    fn feature_names(&self) -> Result<Vec<String>, PreprocessingError> {
        let mut names = Vec::new();
        for (branch, pipeline) in &self.transformer_list {
            names.extend(
                pipeline
                    .feature_names()?
                    .into_iter()
                    .map(|name| format!("{}__{}", branch, name)),
            );
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::adapter::DataFrameAdapter;
    use crate::preprocessing::encoding::CategoricalEncoder;
    use ndarray::array;
    use polars::df;

    fn passengers() -> Data {
        Data::Frame(
            df!(
                "age" => [22.0, 38.0, 26.0],
                "fare" => [7.25, 71.28, 7.92],
                "sex" => ["male", "female", "female"],
                "pclass" => [3i64, 1, 3]
            )
            .unwrap(),
        )
    }

    fn union() -> FeatureUnion {
        FeatureUnion::new()
            .add(
                "numeric",
                Pipeline::new().add("selector", DataFrameAdapter::new(["age", "fare"])),
            )
            .add(
                "categorical",
                Pipeline::new()
                    .add("selector", DataFrameAdapter::new(["sex", "pclass"]))
                    .add("encoder", CategoricalEncoder::new()),
            )
    }

    #[test]
    fn test_union_concatenates_branches_in_order() {
        let mut union = union();
        let out = union.fit_transform(&passengers()).unwrap();

        let expected = array![
            [22.0, 7.25, 0.0, 1.0, 0.0, 1.0],
            [38.0, 71.28, 1.0, 0.0, 1.0, 0.0],
            [26.0, 7.92, 1.0, 0.0, 0.0, 1.0],
        ];
        assert_eq!(out.into_numeric().unwrap(), expected);
    }

    #[test]
    fn test_union_feature_names_prefixed() {
        let mut union = union();
        union.fit_transform(&passengers()).unwrap();

        assert_eq!(
            union.feature_names().unwrap(),
            vec![
                "numeric__age",
                "numeric__fare",
                "categorical__female",
                "categorical__male",
                "categorical__1",
                "categorical__3",
            ]
        );
    }

    #[test]
    fn test_union_feature_names_before_transform() {
        let union = union();
        assert!(matches!(
            union.feature_names(),
            Err(PreprocessingError::NotFitted(_))
        ));
    }

    #[test]
    fn test_union_branch_lookup() {
        let union = union();
        assert_eq!(union.branch_names(), vec!["numeric", "categorical"]);
        assert_eq!(union.branch("categorical").unwrap().len(), 2);
        assert!(matches!(
            union.branch("text"),
            Err(PreprocessingError::BranchNotFound(_))
        ));
    }

    #[test]
    fn test_union_non_numeric_branch() {
        let mut union = FeatureUnion::new().add(
            "raw",
            Pipeline::new().add("selector", DataFrameAdapter::new(["sex"])),
        );
        assert!(matches!(
            union.fit_transform(&passengers()),
            Err(PreprocessingError::NonNumeric(_))
        ));
    }

    #[test]
    fn test_union_failed_transform_keeps_earlier_branch_state() {
        let mut union = FeatureUnion::new()
            .add(
                "encoded",
                Pipeline::new()
                    .add("selector", DataFrameAdapter::new(["sex"]))
                    .add("encoder", CategoricalEncoder::new()),
            )
            .add(
                "raw",
                Pipeline::new().add("selector", DataFrameAdapter::new(["sex"])),
            );

        assert!(union.transform(&passengers()).is_err());

        let encoder = union
            .branch("encoded")
            .unwrap()
            .named_step("encoder")
            .unwrap();
        assert_eq!(encoder.feature_names().unwrap(), vec!["female", "male"]);
    }

    #[test]
    fn test_union_empty() {
        let mut union = FeatureUnion::new();
        assert!(union.is_empty());
        assert!(matches!(
            union.fit(&passengers()),
            Err(PreprocessingError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_union_duplicate_branch_names() {
        let mut union = FeatureUnion::new()
            .add("a", Pipeline::new().add("s", DataFrameAdapter::new(["age"])))
            .add("a", Pipeline::new().add("s", DataFrameAdapter::new(["fare"])));
        assert!(matches!(
            union.fit(&passengers()),
            Err(PreprocessingError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_union_branch_mut() {
        let mut union = union();
        let step = union
            .branch_mut("numeric")
            .unwrap()
            .named_step_mut("selector")
            .unwrap();
        *step.downcast_mut::<DataFrameAdapter>().unwrap() = DataFrameAdapter::new(["age"]);

        let out = union.fit_transform(&passengers()).unwrap();
        assert_eq!(out.shape(), (3, 5));
    }
}
