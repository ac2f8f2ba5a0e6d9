//! Identifier to column/table name conversion

use heck::ToSnakeCase;

/// Convert an identifier such as `UserName` into `user_name`.
///
/// Splits at case transitions, so acronyms stay together (`UserID` becomes
/// `user_id`). Input without uppercase letters is returned as written, which
/// keeps leading underscores and punctuation in names like `_flag` or
/// `user.name`.
pub fn to_snake_case(identifier: &str) -> String {
    if !identifier.chars().any(char::is_uppercase) {
        return identifier.to_string();
    }

    identifier.to_snake_case()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("UserName"), "user_name");
        assert_eq!(to_snake_case("Id"), "id");
        assert_eq!(to_snake_case("SampleModel"), "sample_model");
        assert_eq!(to_snake_case("DeletedAt"), "deleted_at");
        assert_eq!(to_snake_case("UserID"), "user_id");
    }

    #[test]
    fn test_snake_case_input_is_stable() {
        assert_eq!(to_snake_case("user_name"), "user_name");
        assert_eq!(to_snake_case("id"), "id");
        assert_eq!(to_snake_case(""), "");
    }

    #[test]
    fn test_lowercase_input_is_kept_verbatim() {
        assert_eq!(to_snake_case("_flag"), "_flag");
        assert_eq!(to_snake_case("user.name"), "user.name");
        assert_eq!(to_snake_case("a b"), "a b");
        assert_eq!(to_snake_case("__version"), "__version");
    }
}
