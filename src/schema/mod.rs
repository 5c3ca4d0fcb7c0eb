//! The JSON Typedef schema of [`User`] and a validator that reports every
//! violation of it as a portable [`ValidationError`].
//!
//! Validation is stricter than deserialization in one place: `id` is a
//! required, non-nullable property here, while [`User::from_json`] leaves
//! it unset when missing or `null`. Anything that validates also
//! deserializes.
//!
//! [`User`]: crate::types::User
//! [`User::from_json`]: crate::types::User::from_json
use once_cell::sync::Lazy;
use serde_json::{Map, Value};
use std::num::NonZeroUsize;

use crate::types::Timestamp;

mod error;

pub use error::ValidationError;

/// JTD primitive types used by the user schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    String,
    Timestamp,
    Boolean,
    Int32,
}

impl Type {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Type::String => "string",
            Type::Timestamp => "timestamp",
            Type::Boolean => "boolean",
            Type::Int32 => "int32",
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match self {
            Type::String => value.is_string(),
            Type::Timestamp => value.as_str().map_or(false, |s| Timestamp::parse(s).is_ok()),
            Type::Boolean => value.is_boolean(),
            Type::Int32 => value.as_i64().map_or(false, |n| i32::try_from(n).is_ok()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Property {
    name: &'static str,
    kind: Type,
    nullable: bool,
    required: bool,
}

impl Property {
    const fn section(&self) -> &'static str {
        if self.required {
            "properties"
        } else {
            "optionalProperties"
        }
    }

    fn schema(&self) -> Value {
        let mut schema = Map::new();
        schema.insert("type".into(), self.kind.name().into());
        if self.nullable {
            schema.insert("nullable".into(), true.into());
        }
        Value::Object(schema)
    }
}

const PROPERTIES: [Property; 4] = [
    Property {
        name: "id",
        kind: Type::String,
        nullable: false,
        required: true,
    },
    Property {
        name: "createdAt",
        kind: Type::Timestamp,
        nullable: true,
        required: false,
    },
    Property {
        name: "isAdmin",
        kind: Type::Boolean,
        nullable: true,
        required: false,
    },
    Property {
        name: "karma",
        kind: Type::Int32,
        nullable: true,
        required: false,
    },
];

static SCHEMA: Lazy<Value> = Lazy::new(|| {
    let mut properties = Map::new();
    let mut optional = Map::new();
    for property in &PROPERTIES {
        let section = if property.required {
            &mut properties
        } else {
            &mut optional
        };
        section.insert(property.name.into(), property.schema());
    }

    let mut schema = Map::new();
    schema.insert("properties".into(), Value::Object(properties));
    schema.insert("optionalProperties".into(), Value::Object(optional));
    schema.insert("additionalProperties".into(), true.into());
    Value::Object(schema)
});

/// The `user.jtd.json` schema.
#[must_use]
pub fn schema() -> &'static Value {
    &SCHEMA
}

/// Validates `instance` reporting every error found.
#[must_use]
pub fn validate(instance: &Value) -> Vec<ValidationError> {
    Validator::new().validate(instance)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    max_errors: Option<NonZeroUsize>,
}

impl Validator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops validating once this many errors have been collected.
    #[must_use]
    pub fn max_errors(mut self, max_errors: Option<NonZeroUsize>) -> Self {
        self.max_errors = max_errors;
        self
    }

    #[must_use]
    pub fn validate(&self, instance: &Value) -> Vec<ValidationError> {
        let mut errors = Errors {
            list: Vec::new(),
            max: self.max_errors,
        };

        let Some(object) = instance.as_object() else {
            errors.push(ValidationError::new("", "/properties"));
            return errors.list;
        };

        for property in &PROPERTIES {
            let section = property.section();
            let value = match object.get(property.name) {
                Some(value) => value,
                None if property.required => {
                    let schema_path = format!("/{section}/{}", property.name);
                    if errors.push(ValidationError::new("", schema_path)) {
                        break;
                    }
                    continue;
                },
                None => continue,
            };

            if value.is_null() && property.nullable {
                continue;
            }

            if !property.kind.accepts(value) {
                let instance_path = format!("/{}", property.name);
                let schema_path = format!("/{section}/{}/type", property.name);
                if errors.push(ValidationError::new(instance_path, schema_path)) {
                    break;
                }
            }
        }

        tracing::debug!(errors = errors.list.len(), "validated user record");
        errors.list
    }
}

struct Errors {
    list: Vec<ValidationError>,
    max: Option<NonZeroUsize>,
}

impl Errors {
    /// Returns `true` once the limit has been reached.
    fn push(&mut self, error: ValidationError) -> bool {
        self.list.push(error);
        self.max.map_or(false, |max| self.list.len() >= max.get())
    }
}
