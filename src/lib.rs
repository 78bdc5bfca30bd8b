//! # featureprep
//!
//! Small building blocks for preparing tabular data for a model: pick a subset
//! of named columns out of a table, one-hot encode categorical columns while
//! keeping the generated feature names, and look stages up by name inside a
//! composed pipeline.
//!
//! ## Core Design Principles
//!
//! - **Named everything**: columns, pipeline stages and union branches are all
//!   addressed by name, so generated feature names can be traced back to the
//!   stage that produced them.
//! - **One stage contract**: every stage implements [`Transformer`]
//!   (`fit`, `transform`, `feature_names`), so stages can be boxed, chained and
//!   downcast back to their concrete type.
//! - **Errors, not panics**: every failure is a [`PreprocessingError`] returned
//!   to the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use featureprep::preprocessing::{CategoricalEncoder, DataFrameAdapter};
//! use polars::df;
//!
//! let df = df!(
//!     "embarked" => ["S", "C", "S"],
//!     "pclass" => [3i64, 1, 2]
//! )
//! .unwrap();
//!
//! let values = DataFrameAdapter::new(["embarked", "pclass"]).select(&df).unwrap();
//!
//! let mut encoder = CategoricalEncoder::new();
//! let encoded = encoder.encode(values.view()).unwrap();
//!
//! assert_eq!(encoded.dim(), (3, 2 + 3));
//! ```
//!
//! ## Module Structure
//!
//! - `preprocessing` - Stages, cell values, composition and name-based introspection
//!
//! Input tables are [`polars`] `DataFrame`s.

/// Data preparation stages and their composition.
pub mod preprocessing;

pub use preprocessing::{
    CategoricalEncoder, Data, DataFrameAdapter, FeatureUnion, Pipeline, PreprocessingError,
    Transformer, Value,
};
