//! Passenger Feature Preparation
//!
//! This example builds the feature matrix for a small passenger table with a
//! two-branch feature union:
//! - a numeric branch that selects the numeric columns as they are
//! - a categorical branch that selects the categorical columns and one-hot encodes them
//!
//! It then walks the union by name to list its stages and recover the generated
//! feature names.
//!
//! Run with: RUST_LOG=debug cargo run --example case_study

use featureprep::preprocessing::{
    inspect, CategoricalEncoder, Data, DataFrameAdapter, FeatureUnion, Pipeline, Transformer,
};
use polars::df;
use polars::prelude::DataFrame;
use std::error::Error;
use tracing_subscriber::EnvFilter;

const NUMERIC_COLS: [&str; 3] = ["age", "sib_sp", "fare"];
const CATEGORICAL_COLS: [&str; 3] = ["pclass", "sex", "embarked"];

/// Passenger data (subset of the classic Titanic dataset).
fn get_passengers() -> Result<DataFrame, Box<dyn Error>> {
    let df = df!(
        "pclass" => [3i64, 1, 3, 1, 3, 2, 3, 2],
        "sex" => ["male", "female", "female", "female", "male", "male", "female", "female"],
        "age" => [22.0, 38.0, 26.0, 35.0, 35.0, 54.0, 27.0, 14.0],
        "sib_sp" => [1i64, 1, 0, 1, 0, 0, 0, 1],
        "fare" => [7.25, 71.2833, 7.925, 53.1, 8.05, 51.8625, 11.1333, 30.0708],
        "embarked" => ["S", "C", "S", "S", "S", "S", "S", "C"]
    )?;
    Ok(df)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Passenger Feature Preparation ===\n");

    let df = get_passengers()?;
    println!("{}", df);

    let mut union = FeatureUnion::new()
        .add(
            "numeric",
            Pipeline::new().add("selector", DataFrameAdapter::new(NUMERIC_COLS)),
        )
        .add(
            "categorical",
            Pipeline::new()
                .add("selector", DataFrameAdapter::new(CATEGORICAL_COLS))
                .add("encoder", CategoricalEncoder::new()),
        );

    println!("\nUnion contents:");
    inspect::print_union_contents(&union);

    let features = union.fit_transform(&Data::Frame(df))?.into_numeric()?;
    println!("\nFeature matrix: {:?}", features.dim());

    let encoded = inspect::get_feature_names(&union, "categorical", "encoder")?;
    println!("\nOne-hot feature names: {:?}", encoded);

    let encoder = inspect::get_transformer_as::<CategoricalEncoder>(&union, "categorical", "encoder")?;
    for (col, n) in CATEGORICAL_COLS.iter().zip(encoder.n_values()) {
        println!("  {} -> {} categories", col, n);
    }

    println!("\nAll feature names:");
    for (i, name) in union.feature_names()?.iter().enumerate() {
        println!("  [{:2}] {}", i, name);
    }

    match inspect::get_transformer(&union, "text", "vectorizer") {
        Ok(_) => println!("\nUnexpected stage found"),
        Err(e) => println!("\nLookup of a missing branch fails: {}", e),
    }

    Ok(())
}
