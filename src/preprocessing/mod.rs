//! Data preparation stages for tabular pipelines.
//!
//! # Core Trait
//!
//! - [`Transformer`]: `fit`, `transform` and a feature-name accessor, shared by
//!   every stage so that stages can be chained and looked up by name.
//!
//! # Available Stages
//!
//! - [`DataFrameAdapter`]: select named columns of a polars `DataFrame` into a
//!   raw array of [`Value`]s
//! - [`CategoricalEncoder`]: one-hot encode every column of a categorical array
//!
//! # Composition
//!
//! - [`Pipeline`]: named stages applied in sequence
//! - [`FeatureUnion`]: named pipelines applied side by side
//! - [`inspect`]: list a union's contents, fetch a stage or its feature names
//!
//! # Example
//!
//! ```rust
//! use featureprep::preprocessing::{
//!     inspect, CategoricalEncoder, Data, DataFrameAdapter, FeatureUnion, Pipeline, Transformer,
//! };
//! use polars::df;
//!
//! let df = df!(
//!     "age" => [22.0, 38.0, 26.0],
//!     "sex" => ["male", "female", "female"]
//! )
//! .unwrap();
//!
//! let mut union = FeatureUnion::new()
//!     .add("numeric", Pipeline::new().add("selector", DataFrameAdapter::new(["age"])))
//!     .add(
//!         "categorical",
//!         Pipeline::new()
//!             .add("selector", DataFrameAdapter::new(["sex"]))
//!             .add("encoder", CategoricalEncoder::new()),
//!     );
//!
//! let features = union.fit_transform(&Data::Frame(df)).unwrap();
//! assert_eq!(features.shape(), (3, 3));
//!
//! let names = inspect::get_feature_names(&union, "categorical", "encoder").unwrap();
//! assert_eq!(names, vec!["female", "male"]);
//! ```

pub mod adapter;
pub mod data;
pub mod encoding;
pub mod error;
pub mod inspect;
pub mod pipeline;
pub mod traits;
pub mod value;

// Re-export main types
pub use adapter::DataFrameAdapter;
pub use data::Data;
pub use encoding::CategoricalEncoder;
pub use error::PreprocessingError;
pub use pipeline::{FeatureUnion, Pipeline};
pub use traits::Transformer;
pub use value::Value;
