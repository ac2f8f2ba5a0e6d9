//! # model-registry: model metadata and SQL template cache
//!
//! Derives, once per model type, the table name, primary key, soft-delete
//! configuration and column list from per-field annotations, then renders the
//! canonical insert/select/update/delete/logical-delete statements for it.
//!
//! ```rust,ignore
//! use model_registry::{Model, ModelRegistry, StatementKind};
//!
//! #[derive(Default, Model)]
//! struct SampleModel {
//!     #[model(primary_key, column = "id")]
//!     id: i64,
//!     name: String,
//!     description: String,
//! }
//!
//! let registry = ModelRegistry::new();
//! registry.register(SampleModel::default)?;
//!
//! let descriptor = registry.lookup("SampleModel").expect("registered");
//! assert_eq!(
//!     descriptor.sql().get(StatementKind::Delete),
//!     "DELETE FROM `sample_model` WHERE `id` = ?"
//! );
//! ```

// Lets the derive output (`::model_registry::...`) resolve inside this crate's own tests.
extern crate self as model_registry;

pub mod annotations;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod model;
pub mod naming;
pub mod registry;
pub mod sql;
pub mod table;

pub use annotations::{FieldDeclaration, SUPPRESS_SENTINEL};
pub use config::{ConfigError, RegistryConfig};
pub use descriptor::{BoundStatement, ModelDescriptor};
pub use error::{RegistryError, RegistryResult};
pub use model::{Model, PrimaryKeyed, SqlValues};
pub use naming::to_snake_case;
pub use registry::ModelRegistry;
pub use sql::{SqlTemplateSet, StatementKind};
pub use table::TableDescriptor;

pub use model_registry_derive::Model;
