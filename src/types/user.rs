use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{DeserializationError, Timestamp};

/// A user record as it travels over the wire.
///
/// Every field may be left unset. Unset fields are serialized as `null`
/// rather than omitted so that `is_admin: None` stays distinguishable
/// from `Some(false)`, and an explicit `null` reads back as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct User {
    #[serde(rename = "id")]
    pub id: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: Option<Timestamp>,

    #[serde(rename = "isAdmin")]
    pub is_admin: Option<bool>,

    #[serde(rename = "karma")]
    pub karma: Option<i32>,
}

impl User {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }

    #[must_use]
    pub fn with_is_admin(mut self, is_admin: bool) -> Self {
        self.is_admin = Some(is_admin);
        self
    }

    #[must_use]
    pub fn with_karma(mut self, karma: i32) -> Self {
        self.karma = Some(karma);
        self
    }
}

impl User {
    pub fn from_json(input: &str) -> Result<Self, DeserializationError> {
        serde_json::from_str(input).map_err(rejected)
    }

    pub fn from_slice(input: &[u8]) -> Result<Self, DeserializationError> {
        serde_json::from_slice(input).map_err(rejected)
    }

    pub fn from_value(value: Value) -> Result<Self, DeserializationError> {
        serde_json::from_value(value).map_err(rejected)
    }

    /// Serializes into compact JSON with keys in declaration order.
    ///
    /// This and the other `to_*` methods never fail: every field is a
    /// string, boolean, integer or `null`, and a [`Timestamp`] always
    /// renders as RFC 3339 text.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    #[must_use]
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

fn rejected(error: serde_json::Error) -> DeserializationError {
    tracing::trace!(%error, "rejected user record");
    DeserializationError::from(error)
}
