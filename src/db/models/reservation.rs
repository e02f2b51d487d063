//! Reservation Model
//!
//! A reservation walks a strictly forward state machine:
//!
//! ```text
//! RESERVED ──check out──> CHECKED_OUT ──return──> RETURNED
//! ```
//!
//! RETURNED is terminal; the record is kept for history queries and never
//! mutated again. While a reservation is RESERVED or CHECKED_OUT it is
//! "active" and pins its item as unavailable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Reserved,
    CheckedOut,
    Returned,
}

impl ReservationStatus {
    /// Active = still pins the item (RESERVED or CHECKED_OUT)
    pub fn is_active(&self) -> bool {
        matches!(self, ReservationStatus::Reserved | ReservationStatus::CheckedOut)
    }

    /// Terminal state, no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReservationStatus::Returned)
    }
}

/// Reservation entity
///
/// Transition timestamps are present iff the corresponding transition
/// happened; they are monotonically non-decreasing over the lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub item_id: String,
    pub user_id: String,
    pub status: ReservationStatus,
    pub reserved_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_out_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returned_at: Option<DateTime<Utc>>,
}

impl Reservation {
    /// Still pinning its item?
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}
