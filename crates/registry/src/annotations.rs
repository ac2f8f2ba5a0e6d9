//! Field annotations
//!
//! A [`FieldDeclaration`] carries the raw values of the four recognized
//! annotations for one field, exactly as written on the model. Interpretation
//! is lenient: absent or malformed values mean "use the default" and never
//! produce an error.

use serde::{Deserialize, Serialize};

/// Column annotation value that removes a field from the column list
pub const SUPPRESS_SENTINEL: &str = "-";

/// Declaration of one model field and its annotations, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    name: String,
    table: Option<String>,
    primary_key: Option<String>,
    column: Option<String>,
    soft_delete: Option<String>,
}

impl FieldDeclaration {
    /// Declare a field with no annotations
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Attach a table-name annotation
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Attach a primary-key annotation with a raw boolean value
    pub fn primary_key(mut self, value: impl Into<String>) -> Self {
        self.primary_key = Some(value.into());
        self
    }

    /// Attach a column-name annotation; `"-"` suppresses the field
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Attach a soft-delete annotation with a raw boolean value
    pub fn soft_delete(mut self, value: impl Into<String>) -> Self {
        self.soft_delete = Some(value.into());
        self
    }

    /// Declared field name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table_name_override(&self) -> Option<&str> {
        non_empty(self.table.as_deref())
    }

    pub fn is_primary_key(&self) -> bool {
        read_flag(&self.name, "primary_key", self.primary_key.as_deref())
    }

    /// Column override, including the suppression sentinel
    pub fn column_override(&self) -> Option<&str> {
        non_empty(self.column.as_deref())
    }

    pub fn is_suppressed(&self) -> bool {
        self.column_override() == Some(SUPPRESS_SENTINEL)
    }

    pub fn is_soft_delete_column(&self) -> bool {
        read_flag(&self.name, "soft_delete", self.soft_delete.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

fn read_flag(field: &str, annotation: &str, raw: Option<&str>) -> bool {
    let Some(raw) = raw else {
        return false;
    };

    match parse_flag(raw) {
        Some(flag) => flag,
        None => {
            tracing::trace!(field, annotation, value = raw, "ignoring malformed boolean annotation");
            false
        }
    }
}

/// Parse a boolean annotation value.
///
/// Accepts `1`, `t`, `T`, `true`, `TRUE`, `True` and their false counterparts.
/// Anything else is malformed.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unannotated_field() {
        let field = FieldDeclaration::new("Name");
        assert_eq!(field.name(), "Name");
        assert_eq!(field.table_name_override(), None);
        assert_eq!(field.column_override(), None);
        assert!(!field.is_primary_key());
        assert!(!field.is_soft_delete_column());
        assert!(!field.is_suppressed());
    }

    #[test]
    fn test_flag_spellings() {
        for raw in ["1", "t", "T", "true", "TRUE", "True"] {
            assert!(FieldDeclaration::new("Id").primary_key(raw).is_primary_key(), "{raw}");
        }
        for raw in ["0", "f", "false", "False"] {
            assert!(!FieldDeclaration::new("Id").primary_key(raw).is_primary_key(), "{raw}");
        }
    }

    #[test]
    fn test_malformed_flags_read_as_false() {
        for raw in ["yes", "on", "", " true", "2"] {
            let field = FieldDeclaration::new("DeletedAt").soft_delete(raw).primary_key(raw);
            assert!(!field.is_soft_delete_column(), "{raw:?}");
            assert!(!field.is_primary_key(), "{raw:?}");
        }
    }

    #[test]
    fn test_column_override_and_sentinel() {
        let renamed = FieldDeclaration::new("Id").column("user_id");
        assert_eq!(renamed.column_override(), Some("user_id"));
        assert!(!renamed.is_suppressed());

        let suppressed = FieldDeclaration::new("Name").column(SUPPRESS_SENTINEL);
        assert_eq!(suppressed.column_override(), Some("-"));
        assert!(suppressed.is_suppressed());
    }

    #[test]
    fn test_empty_values_are_absent() {
        let field = FieldDeclaration::new("Id").table("").column("");
        assert_eq!(field.table_name_override(), None);
        assert_eq!(field.column_override(), None);
    }
}
