//! Item Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Category of a front-desk item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemCategory {
    Key,
    Remote,
    Other,
}

/// Item entity
///
/// `available` is derived from the reservation set: true iff no active
/// reservation references the item. Clients can never set it directly;
/// only lifecycle transitions (and reconciliation) may flip it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    pub category: ItemCategory,
    pub location: String,
    /// Derived availability flag, read-only for clients
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

/// Create item payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ItemCreate {
    #[validate(length(min = 1, max = 120, message = "name must be 1-120 characters"))]
    pub name: String,
    pub category: ItemCategory,
    #[validate(length(max = 200, message = "location must be at most 200 characters"))]
    pub location: String,
}

/// Update item payload
///
/// Deliberately has no `available` field: availability only changes
/// through the reservation lifecycle.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdate {
    #[validate(length(min = 1, max = 120, message = "name must be 1-120 characters"))]
    pub name: Option<String>,
    pub category: Option<ItemCategory>,
    #[validate(length(max = 200, message = "location must be at most 200 characters"))]
    pub location: Option<String>,
}
