//! Categorical feature encoding.
//!
//! # CategoricalEncoder
//! One-hot encodes every column of an array of discrete values, keeping the
//! generated feature names.
//!
//! ```ignore
//! // Input:  [["S", 3], ["C", 1]]          (2 samples, 2 categorical features)
//! // Output: [[0, 1, 0, 1], [1, 0, 1, 0]]  (categories C, S | 1, 3)
//! ```
//!
//! # Design Notes
//!
//! Categories are whatever [`Value`](crate::preprocessing::Value)s appear in a column,
//! strings included, so no prior mapping to integers is required. They are
//! recomputed on every transform.

mod categorical;

pub use categorical::CategoricalEncoder;
