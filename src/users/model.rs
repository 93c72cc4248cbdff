use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user row, and the JSON object the API sends and receives.
///
/// Every field defaults to the empty string when absent from incoming JSON;
/// presence checks happen in [`User::validate`], not in the decoder.
#[derive(Clone, Debug, Default, Deserialize, Eq, FromRow, PartialEq, Serialize)]
#[serde(default)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// Why a decoded user cannot be created.
#[derive(Debug, Eq, PartialEq)]
pub enum Invalid {
    EmptyEmail,
    EmptyName,
}

impl std::fmt::Display for Invalid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyEmail => f.write_str("email is empty"),
            Self::EmptyName  => f.write_str("name is empty"),
        }
    }
}

impl std::error::Error for Invalid {}

impl User {
    /// Decodes a request body. An empty (or whitespace-only) body is an empty
    /// user rather than an error.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        if body.trim_ascii().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
    }

    /// `email` and `name` must both be non-empty. `id` is not checked.
    pub fn validate(&self) -> Result<(), Invalid> {
        if self.email.is_empty() {
            return Err(Invalid::EmptyEmail);
        }
        if self.name.is_empty() {
            return Err(Invalid::EmptyName);
        }
        Ok(())
    }
}
