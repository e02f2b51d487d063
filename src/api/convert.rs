//! Conversion from storage models to API response models
//!
//! Reservation rows cross the wire enriched with the display fields the desk
//! screens need (item and user names), so clients never join on their side.

use serde::{Deserialize, Serialize};

use crate::db::MemoryStore;
use crate::db::models::Reservation;
use crate::db::repository::{ItemRepository, UserRepository};

/// Reservation enriched with display fields
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDetail {
    #[serde(flatten)]
    pub reservation: Reservation,
    /// Name of the reserved item
    pub item_name: String,
    /// Name of the owning user
    pub user_name: String,
    /// Badge code of the owning user
    pub user_badge: String,
}

/// Join display fields onto a single reservation row
///
/// History rows may reference entities deleted since; those fall back to the
/// raw id so old rows stay renderable.
pub fn reservation_detail(store: &MemoryStore, reservation: Reservation) -> ReservationDetail {
    let item_name = ItemRepository::new(store.clone())
        .find_by_id(&reservation.item_id)
        .map(|i| i.name)
        .unwrap_or_else(|| reservation.item_id.clone());

    let (user_name, user_badge) = UserRepository::new(store.clone())
        .find_by_id(&reservation.user_id)
        .map(|u| (u.name, u.badge_code))
        .unwrap_or_else(|| (reservation.user_id.clone(), String::new()));

    ReservationDetail {
        reservation,
        item_name,
        user_name,
        user_badge,
    }
}

/// Join display fields onto a whole listing, preserving order
pub fn reservation_details(
    store: &MemoryStore,
    reservations: Vec<Reservation>,
) -> Vec<ReservationDetail> {
    reservations
        .into_iter()
        .map(|r| reservation_detail(store, r))
        .collect()
}
