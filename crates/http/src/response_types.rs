//! Wire types (Serialize / Deserialize)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use userbase_core::{CreateUserRequest, User};
use uuid::Uuid;

/// Uniform envelope around every response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub description: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self { success: true, data: Some(data), error: None, timestamp: Utc::now() }
    }

    pub fn failure(description: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody { description: description.into() }),
            timestamp: Utc::now(),
        }
    }
}

/// Body of `POST /save`.
///
/// Missing text fields decode as empty so that validation, not the decoder,
/// reports them.
#[derive(Debug, Deserialize)]
pub struct SaveUserRequest {
    #[serde(alias = "external_id")]
    pub identifier: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub date_of_birth: DateTime<Utc>,
}

impl From<SaveUserRequest> for CreateUserRequest {
    fn from(req: SaveUserRequest) -> Self {
        Self {
            id: req.identifier,
            name: req.name,
            email: req.email,
            date_of_birth: req.date_of_birth,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub identifier: Uuid,
    pub name: String,
    pub email: String,
    pub date_of_birth: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            identifier: user.id,
            name: user.name,
            email: user.email,
            date_of_birth: user.date_of_birth,
        }
    }
}
