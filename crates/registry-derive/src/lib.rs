//! # model-registry-derive
//!
//! Derive macro for the model-registry `Model` trait.
//!
//! - `#[derive(Model)]`: generate `model_name()` and the field declaration
//!   list from `#[model(...)]` field attributes

use proc_macro::TokenStream;

mod model;

/// Derive the `Model` trait for a struct with named fields.
///
/// Recognized field attributes:
///
/// - `#[model(table = "name")]` overrides the table name (first one wins)
/// - `#[model(primary_key)]` or `#[model(primary_key = "true")]` marks the primary key
/// - `#[model(column = "name")]` overrides the column name, `"-"` drops the field
/// - `#[model(soft_delete)]` marks the logical-delete timestamp column
#[proc_macro_derive(Model, attributes(model))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    model::derive_model_impl(input)
}
