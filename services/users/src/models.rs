//! User models for request and response payloads

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::{ApiError, ApiResult};

/// A stored user as returned to callers; the password hash is never read back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// A validated user ready to be inserted
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// New first and last name for an existing user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameChange {
    pub first_name: String,
    pub last_name: String,
}

/// Body of a create request
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password_hash: Option<String>,
}

impl CreateUserRequest {
    pub fn from_body(body: Option<&Value>) -> ApiResult<Self> {
        parse_body(body)
    }

    /// Check that every field is present
    pub fn validate(self) -> ApiResult<NewUser> {
        match (self.email, self.first_name, self.last_name, self.password_hash) {
            (Some(email), Some(first_name), Some(last_name), Some(password_hash)) => Ok(NewUser {
                email,
                first_name,
                last_name,
                password_hash,
            }),
            (email, first_name, last_name, password_hash) => Err(missing_fields(&[
                ("email", email.is_none()),
                ("first_name", first_name.is_none()),
                ("last_name", last_name.is_none()),
                ("password_hash", password_hash.is_none()),
            ])),
        }
    }
}

/// Body of an update request
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UpdateUserRequest {
    pub fn from_body(body: Option<&Value>) -> ApiResult<Self> {
        parse_body(body)
    }

    pub fn validate(self) -> ApiResult<NameChange> {
        match (self.first_name, self.last_name) {
            (Some(first_name), Some(last_name)) => Ok(NameChange {
                first_name,
                last_name,
            }),
            (first_name, last_name) => Err(missing_fields(&[
                ("first_name", first_name.is_none()),
                ("last_name", last_name.is_none()),
            ])),
        }
    }
}

fn parse_body<T>(body: Option<&Value>) -> ApiResult<T>
where
    T: Default + for<'de> Deserialize<'de>,
{
    match body {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => T::deserialize(value)
            .map_err(|_| ApiError::BadRequest("Invalid JSON body.".to_string())),
    }
}

fn missing_fields(fields: &[(&str, bool)]) -> ApiError {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, missing)| *missing)
        .map(|(name, _)| *name)
        .collect();

    ApiError::BadRequest(format!("Missing required fields: {}", missing.join(", ")))
}
