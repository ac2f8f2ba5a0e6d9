//! SQL statement templates
//!
//! Renders the five fixed statement shapes for a resolved table once. The
//! templates contain quoted identifiers and `?` placeholders only; values are
//! bound positionally by the caller in column order.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::RegistryConfig;
use crate::table::TableDescriptor;

const PLACEHOLDER: &str = "?";

/// The statement shapes cached per model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    Insert,
    Select,
    Update,
    Delete,
    LogicalDelete,
}

impl StatementKind {
    pub const ALL: [StatementKind; 5] = [
        StatementKind::Insert,
        StatementKind::Select,
        StatementKind::Update,
        StatementKind::Delete,
        StatementKind::LogicalDelete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatementKind::Insert => "insert",
            StatementKind::Select => "select",
            StatementKind::Update => "update",
            StatementKind::Delete => "delete",
            StatementKind::LogicalDelete => "logical_delete",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pre-rendered statements for one model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlTemplateSet {
    insert: String,
    select: String,
    update: String,
    delete: String,
    logical_delete: String,
    placeholders: PlaceholderCounts,
}

/// Placeholder counts recorded while rendering, independent of identifier text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct PlaceholderCounts {
    insert: usize,
    update: usize,
    delete: usize,
    logical_delete: usize,
}

impl PlaceholderCounts {
    fn for_table(table: &TableDescriptor) -> Self {
        let writable = table.writable_fields().count();

        Self {
            insert: writable,
            update: writable + 1,
            delete: 1,
            logical_delete: if table.soft_delete_enabled() {
                table.fields().len() + 1
            } else {
                0
            },
        }
    }
}

impl SqlTemplateSet {
    /// Render all statements for `table`
    pub fn render(table: &TableDescriptor, config: &RegistryConfig) -> Self {
        Self {
            insert: render_insert(table),
            select: render_select(table),
            update: render_update(table),
            delete: render_delete(table),
            logical_delete: render_logical_delete(table, &config.soft_delete_table_suffix),
            placeholders: PlaceholderCounts::for_table(table),
        }
    }

    pub fn insert(&self) -> &str {
        &self.insert
    }

    /// Select with a trailing `WHERE 1 = 1` so callers can append `AND ...`
    pub fn select(&self) -> &str {
        &self.select
    }

    pub fn update(&self) -> &str {
        &self.update
    }

    pub fn delete(&self) -> &str {
        &self.delete
    }

    /// Archival insert into the shadow table; empty without soft delete
    pub fn logical_delete(&self) -> &str {
        &self.logical_delete
    }

    pub fn get(&self, kind: StatementKind) -> &str {
        match kind {
            StatementKind::Insert => &self.insert,
            StatementKind::Select => &self.select,
            StatementKind::Update => &self.update,
            StatementKind::Delete => &self.delete,
            StatementKind::LogicalDelete => &self.logical_delete,
        }
    }

    /// Number of positional placeholders in the statement
    pub fn placeholder_count(&self, kind: StatementKind) -> usize {
        match kind {
            StatementKind::Insert => self.placeholders.insert,
            StatementKind::Select => 0,
            StatementKind::Update => self.placeholders.update,
            StatementKind::Delete => self.placeholders.delete,
            StatementKind::LogicalDelete => self.placeholders.logical_delete,
        }
    }
}

fn quote(identifier: &str) -> String {
    format!("`{}`", identifier)
}

fn column_list<'a>(columns: impl Iterator<Item = &'a str>) -> String {
    columns.map(quote).collect::<Vec<_>>().join(", ")
}

fn placeholders(count: usize) -> String {
    vec![PLACEHOLDER; count].join(", ")
}

fn render_insert(table: &TableDescriptor) -> String {
    let count = table.writable_fields().count();

    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote(table.table_name()),
        column_list(table.writable_fields()),
        placeholders(count)
    )
}

fn render_select(table: &TableDescriptor) -> String {
    format!(
        "SELECT {} FROM {} WHERE 1 = 1",
        column_list(table.fields().iter().map(String::as_str)),
        quote(table.table_name())
    )
}

fn render_update(table: &TableDescriptor) -> String {
    let assignments = table
        .writable_fields()
        .map(|column| format!("{} = {}", quote(column), PLACEHOLDER))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "UPDATE {} SET {} WHERE {} = {}",
        quote(table.table_name()),
        assignments,
        quote(table.primary_key()),
        PLACEHOLDER
    )
}

fn render_delete(table: &TableDescriptor) -> String {
    format!(
        "DELETE FROM {} WHERE {} = {}",
        quote(table.table_name()),
        quote(table.primary_key()),
        PLACEHOLDER
    )
}

fn render_logical_delete(table: &TableDescriptor, suffix: &str) -> String {
    if !table.soft_delete_enabled() {
        return String::new();
    }

    let columns = table
        .fields()
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(table.soft_delete_column()));

    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote(&format!("{}{}", table.table_name(), suffix)),
        column_list(columns),
        placeholders(table.fields().len() + 1)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::FieldDeclaration;

    fn render(model_name: &str, fields: &[FieldDeclaration]) -> SqlTemplateSet {
        let config = RegistryConfig::default();
        SqlTemplateSet::render(&TableDescriptor::resolve(model_name, fields, &config), &config)
    }

    fn sample_model() -> SqlTemplateSet {
        render(
            "SampleModel",
            &[
                FieldDeclaration::new("Id").primary_key("true").column("id"),
                FieldDeclaration::new("Name"),
                FieldDeclaration::new("Description"),
            ],
        )
    }

    #[test]
    fn test_sample_model_statements() {
        let sql = sample_model();

        assert_eq!(sql.insert(), "INSERT INTO `sample_model` (`name`, `description`) VALUES (?, ?)");
        assert_eq!(sql.select(), "SELECT `id`, `name`, `description` FROM `sample_model` WHERE 1 = 1");
        assert_eq!(sql.update(), "UPDATE `sample_model` SET `name` = ?, `description` = ? WHERE `id` = ?");
        assert_eq!(sql.delete(), "DELETE FROM `sample_model` WHERE `id` = ?");
        assert_eq!(sql.logical_delete(), "");
    }

    #[test]
    fn test_logical_delete_statement() {
        let sql = render(
            "Information",
            &[
                FieldDeclaration::new("Id").table("table_information").primary_key("true").column("id"),
                FieldDeclaration::new("Name").column("-"),
                FieldDeclaration::new("Description"),
                FieldDeclaration::new("DeletedAt").soft_delete("true"),
            ],
        );

        assert_eq!(
            sql.logical_delete(),
            "INSERT INTO `table_information_delete` (`id`, `description`, `deleted_at`) VALUES (?, ?, ?)"
        );
        assert_eq!(sql.select(), "SELECT `id`, `description` FROM `table_information` WHERE 1 = 1");
        assert_eq!(sql.insert(), "INSERT INTO `table_information` (`description`) VALUES (?)");
    }

    #[test]
    fn test_logical_delete_lists_soft_delete_column_once() {
        let sql = render(
            "Post",
            &[
                FieldDeclaration::new("Id"),
                FieldDeclaration::new("Legacy").column("deleted_at"),
                FieldDeclaration::new("DeletedAt").soft_delete("true"),
            ],
        );

        assert_eq!(
            sql.logical_delete(),
            "INSERT INTO `post_delete` (`id`, `deleted_at`) VALUES (?, ?)"
        );
        assert_eq!(sql.placeholder_count(StatementKind::LogicalDelete), 2);
    }

    #[test]
    fn test_placeholder_counts_ignore_quoted_identifiers() {
        let sql = render(
            "Question",
            &[
                FieldDeclaration::new("Id").table("what?"),
                FieldDeclaration::new("Answer").column("why?"),
                FieldDeclaration::new("DeletedAt").soft_delete("true"),
            ],
        );

        assert_eq!(sql.delete(), "DELETE FROM `what?` WHERE `id` = ?");
        assert_eq!(sql.placeholder_count(StatementKind::Delete), 1);
        assert_eq!(sql.placeholder_count(StatementKind::Insert), 1);
        assert_eq!(sql.placeholder_count(StatementKind::Update), 2);
        assert_eq!(sql.placeholder_count(StatementKind::Select), 0);
        assert_eq!(sql.placeholder_count(StatementKind::LogicalDelete), 3);
    }

    #[test]
    fn test_custom_shadow_table_suffix() {
        let config = RegistryConfig {
            soft_delete_table_suffix: "_archive".to_string(),
            ..RegistryConfig::default()
        };
        let table = TableDescriptor::resolve(
            "Post",
            &[FieldDeclaration::new("Id"), FieldDeclaration::new("DeletedAt").soft_delete("T")],
            &config,
        );

        assert_eq!(
            SqlTemplateSet::render(&table, &config).logical_delete(),
            "INSERT INTO `post_archive` (`id`, `deleted_at`) VALUES (?, ?)"
        );
    }

    #[test]
    fn test_column_order_follows_declaration() {
        let sql = render(
            "Post",
            &[
                FieldDeclaration::new("Title"),
                FieldDeclaration::new("Id"),
                FieldDeclaration::new("Body"),
            ],
        );

        assert_eq!(sql.select(), "SELECT `title`, `id`, `body` FROM `post` WHERE 1 = 1");
        assert_eq!(sql.insert(), "INSERT INTO `post` (`title`, `body`) VALUES (?, ?)");
        assert_eq!(sql.update(), "UPDATE `post` SET `title` = ?, `body` = ? WHERE `id` = ?");
    }

    #[test]
    fn test_placeholder_counts() {
        let sql = sample_model();

        assert_eq!(sql.placeholder_count(StatementKind::Insert), 2);
        assert_eq!(sql.placeholder_count(StatementKind::Select), 0);
        assert_eq!(sql.placeholder_count(StatementKind::Update), 3);
        assert_eq!(sql.placeholder_count(StatementKind::Delete), 1);
        assert_eq!(sql.placeholder_count(StatementKind::LogicalDelete), 0);
    }

    #[test]
    fn test_get_matches_accessors() {
        let sql = sample_model();

        assert_eq!(sql.get(StatementKind::Insert), sql.insert());
        assert_eq!(sql.get(StatementKind::Select), sql.select());
        assert_eq!(sql.get(StatementKind::Update), sql.update());
        assert_eq!(sql.get(StatementKind::Delete), sql.delete());
        assert_eq!(sql.get(StatementKind::LogicalDelete), sql.logical_delete());
    }

    #[test]
    fn test_statement_kind_names() {
        let names: Vec<String> = StatementKind::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["insert", "select", "update", "delete", "logical_delete"]);
        assert_eq!(
            serde_json::to_string(&StatementKind::LogicalDelete).unwrap(),
            "\"logical_delete\""
        );
    }
}
