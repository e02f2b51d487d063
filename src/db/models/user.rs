//! User Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Role of a registered badge holder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Student,
    Faculty,
    Attendant,
}

impl UserRole {
    /// Front-desk staff role, allowed to act on behalf of other users
    pub fn is_attendant(&self) -> bool {
        matches!(self, UserRole::Attendant)
    }
}

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: UserRole,
    /// Scannable badge code, unique across users
    pub badge_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Create user payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    #[validate(length(min = 1, max = 120, message = "name must be 1-120 characters"))]
    pub name: String,
    pub role: UserRole,
    #[validate(length(min = 1, max = 64, message = "badge code must be 1-64 characters"))]
    pub badge_code: String,
    pub contact: Option<String>,
}

/// Update user payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[validate(length(min = 1, max = 120, message = "name must be 1-120 characters"))]
    pub name: Option<String>,
    pub role: Option<UserRole>,
    #[validate(length(min = 1, max = 64, message = "badge code must be 1-64 characters"))]
    pub badge_code: Option<String>,
    pub contact: Option<String>,
}
