//! Model traits
//!
//! [`Model`] is the declarative contract a record type provides to the
//! registry, normally through `#[derive(Model)]`. [`PrimaryKeyed`] and
//! [`SqlValues`] are optional contracts used by the data-access layer when it
//! binds values to the cached statements.

use serde_json::Value;

use crate::annotations::FieldDeclaration;
use crate::sql::StatementKind;

/// A record type whose shape maps to a table
pub trait Model: Send + Sync + 'static {
    /// Declared type name; the registry key
    fn model_name() -> &'static str;

    /// Field declarations in declaration order
    fn field_declarations() -> Vec<FieldDeclaration>;
}

/// Models with an integer primary key
pub trait PrimaryKeyed {
    fn id(&self) -> i64;

    fn set_id(&mut self, id: i64);
}

/// Positional parameter values for the cached statements.
///
/// Values must follow the column order of the matching template: the writable
/// fields for insert, the writable fields followed by the primary key for
/// update, the primary key for delete, and every field followed by the
/// deletion timestamp for logical delete.
pub trait SqlValues {
    fn sql_values(&self, kind: StatementKind) -> Vec<Value>;
}
