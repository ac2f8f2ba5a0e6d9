//! Table descriptor resolution
//!
//! Combines field annotations with the naming defaults into one resolved
//! [`TableDescriptor`] per model. Every singleton (table name, primary key,
//! soft-delete column) is taken from the first matching field in declaration
//! order.

use serde::{Deserialize, Serialize};

use crate::annotations::FieldDeclaration;
use crate::config::RegistryConfig;
use crate::naming::to_snake_case;

/// Resolved table layout of a model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    table_name: String,
    primary_key: String,
    fields: Vec<String>,
    soft_delete_enabled: bool,
    soft_delete_column: String,
}

impl TableDescriptor {
    /// Resolve the descriptor for `model_name` from its field declarations
    pub fn resolve(model_name: &str, fields: &[FieldDeclaration], config: &RegistryConfig) -> Self {
        let table_name = fields
            .iter()
            .find_map(FieldDeclaration::table_name_override)
            .map(str::to_string)
            .unwrap_or_else(|| to_snake_case(model_name));

        let primary_key = fields
            .iter()
            .find(|field| field.is_primary_key())
            .map(resolve_column)
            .unwrap_or_else(|| config.default_primary_key.clone());

        let soft_delete_column = fields
            .iter()
            .find(|field| field.is_soft_delete_column())
            .map(|field| {
                if config.soft_delete_column_override {
                    resolve_column(field)
                } else {
                    to_snake_case(field.name())
                }
            });

        let columns = fields
            .iter()
            .filter(|field| !field.is_soft_delete_column() && !field.is_suppressed())
            .map(resolve_column)
            .filter(|column| soft_delete_column.as_deref() != Some(column.as_str()))
            .collect();

        Self {
            table_name,
            primary_key,
            fields: columns,
            soft_delete_enabled: soft_delete_column.is_some(),
            soft_delete_column: soft_delete_column.unwrap_or_default(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    /// Column names in declaration order
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Columns written by insert and update, i.e. every field but the primary key
    pub fn writable_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .map(String::as_str)
            .filter(move |column| *column != self.primary_key)
    }

    pub fn soft_delete_enabled(&self) -> bool {
        self.soft_delete_enabled
    }

    /// Soft-delete timestamp column, empty when soft delete is disabled
    pub fn soft_delete_column(&self) -> &str {
        &self.soft_delete_column
    }
}

/// Column name of a field: its override unless absent or the sentinel,
/// otherwise the snake-cased field name
fn resolve_column(field: &FieldDeclaration) -> String {
    match field.column_override() {
        Some(column) if !field.is_suppressed() => to_snake_case(column),
        _ => to_snake_case(field.name()),
    }
}
