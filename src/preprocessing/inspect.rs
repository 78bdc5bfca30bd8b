//! Read-only lookups over a [`FeatureUnion`].
//!
//! A union maps branch names to pipelines, and a pipeline maps stage names to
//! stages. These helpers walk that structure by name: list it, fetch a stage,
//! or fetch a stage's feature names.
//!
//! ```rust
//! use featureprep::preprocessing::inspect;
//! use featureprep::preprocessing::{
//!     CategoricalEncoder, Data, DataFrameAdapter, FeatureUnion, Pipeline, Transformer,
//! };
//! use polars::df;
//!
//! let df = df!("embarked" => ["S", "C", "Q"]).unwrap();
//! let mut union = FeatureUnion::new().add(
//!     "categorical",
//!     Pipeline::new()
//!         .add("selector", DataFrameAdapter::new(["embarked"]))
//!         .add("encoder", CategoricalEncoder::new()),
//! );
//! union.fit_transform(&Data::Frame(df)).unwrap();
//!
//! inspect::print_union_contents(&union);
//! let names = inspect::get_feature_names(&union, "categorical", "encoder").unwrap();
//! assert_eq!(names, vec!["C", "Q", "S"]);
//! ```

use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::pipeline::FeatureUnion;
use crate::preprocessing::traits::Transformer;

/// `(branch, stage)` name pairs, in branch order then stage order.
pub fn union_contents(union: &FeatureUnion) -> Vec<(&str, &str)> {
    union
        .branches()
        .flat_map(|(branch, pipeline)| {
            pipeline
                .step_names()
                .into_iter()
                .map(move |step| (branch, step))
        })
        .collect()
}

/// Print every `(branch, stage)` pair as `branch : stage`, one per line.
pub fn print_union_contents(union: &FeatureUnion) {
    for (branch, step) in union_contents(union) {
        println!("{} : {}", branch, step);
    }
}

/// The stage named `step` in the first branch named `branch`.
///
/// # Errors
/// - [`PreprocessingError::BranchNotFound`] if no branch is called `branch`.
/// - [`PreprocessingError::StepNotFound`] if that branch has no stage called `step`.
pub fn get_transformer<'a>(
    union: &'a FeatureUnion,
    branch: &str,
    step: &str,
) -> Result<&'a (dyn Transformer + 'static), PreprocessingError> {
    union.branch(branch)?.named_step(step)
}

/// As [`get_transformer`], downcast to the concrete stage type `T`.
///
/// # Errors
/// [`PreprocessingError::InvalidInput`] if the stage is not a `T`, on top of the
/// lookup errors of [`get_transformer`].
pub fn get_transformer_as<'a, T: Transformer + 'static>(
    union: &'a FeatureUnion,
    branch: &str,
    step: &str,
) -> Result<&'a T, PreprocessingError> {
    let transformer = get_transformer(union, branch, step)?;
    transformer.downcast_ref::<T>().ok_or_else(|| {
        PreprocessingError::InvalidInput(format!(
            "stage '{}' of branch '{}' is a {}",
            step,
            branch,
            transformer.step_name()
        ))
    })
}

/// Feature names of the stage named `step` in branch `branch`.
///
/// Errors from the lookup or from the stage's own accessor are returned unchanged.
pub fn get_feature_names(
    union: &FeatureUnion,
    branch: &str,
    step: &str,
) -> Result<Vec<String>, PreprocessingError> {
    get_transformer(union, branch, step)?.feature_names()
}
