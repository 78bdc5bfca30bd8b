//! Composition of named stages.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`Pipeline`] | Chain named stages sequentially |
//! | [`FeatureUnion`] | Run named pipelines side by side and join their outputs |
//!
//! Both are [`Transformer`](crate::preprocessing::Transformer)s themselves, and
//! both keep their parts addressable by name, which is what the lookups in
//! [`inspect`](crate::preprocessing::inspect) rely on.

#[allow(clippy::module_inception)]
mod pipeline;
mod union;

pub use pipeline::Pipeline;
pub use union::FeatureUnion;
