use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A portable validation error: where in the instance it happened and
/// which part of the schema rejected it, both as JSON Pointers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize, Error)]
#[error("error at: {instance_path:?} (due to: {schema_path:?})")]
pub struct ValidationError {
    #[serde(rename = "instancePath")]
    pub instance_path: String,
    #[serde(rename = "schemaPath")]
    pub schema_path: String,
}

impl ValidationError {
    pub(crate) fn new(instance_path: impl Into<String>, schema_path: impl Into<String>) -> Self {
        Self {
            instance_path: instance_path.into(),
            schema_path: schema_path.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::Token;

    #[test]
    fn test_fmt_display_impl() {
        let error = ValidationError::new("/karma", "/optionalProperties/karma/type");
        assert_eq!(
            r#"error at: "/karma" (due to: "/optionalProperties/karma/type")"#,
            error.to_string()
        );
    }

    #[test]
    fn test_serde_impl() {
        let error = ValidationError::new("", "/properties/id");
        serde_test::assert_tokens(
            &error,
            &[
                Token::Struct {
                    name: "ValidationError",
                    len: 2,
                },
                Token::Str("instancePath"),
                Token::Str(""),
                Token::Str("schemaPath"),
                Token::Str("/properties/id"),
                Token::StructEnd,
            ],
        );
    }
}
