//! Availability index
//!
//! Derived view answering "which items are pinned by an active reservation
//! right now". The reservation table stays authoritative; the engine keeps
//! this index in step on every transition and rebuilds it wholesale during
//! reconciliation.

use crate::db::models::Reservation;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;

/// item id → id of the active reservation pinning it
#[derive(Clone, Debug, Default)]
pub struct AvailabilityIndex {
    held: Arc<DashMap<String, String>>,
}

impl AvailabilityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reservation currently pinning the item, if any
    pub fn hold_for(&self, item_id: &str) -> Option<String> {
        self.held.get(item_id).map(|entry| entry.value().clone())
    }

    pub fn is_held(&self, item_id: &str) -> bool {
        self.held.contains_key(item_id)
    }

    /// An item with no active hold is free to reserve
    pub fn is_available(&self, item_id: &str) -> bool {
        !self.is_held(item_id)
    }

    /// Record a hold. Returns the previous holder if one was present.
    pub fn claim(&self, item_id: &str, reservation_id: &str) -> Option<String> {
        self.held
            .insert(item_id.to_string(), reservation_id.to_string())
    }

    /// Drop the hold for an item. Returns the released reservation id.
    pub fn release(&self, item_id: &str) -> Option<String> {
        self.held.remove(item_id).map(|(_, id)| id)
    }

    pub fn held_count(&self) -> usize {
        self.held.len()
    }

    /// Swap in a freshly computed set of holds
    pub fn replace(&self, holds: impl IntoIterator<Item = (String, String)>) {
        self.held.clear();
        for (item_id, reservation_id) in holds {
            self.held.insert(item_id, reservation_id);
        }
    }

    /// Recompute the whole view from the reservation set
    ///
    /// Idempotent. Returns the number of holds recorded. When the input
    /// violates the one-active-hold-per-item invariant, the earliest
    /// reservation wins and the collision is logged.
    pub fn rebuild<'a>(&self, reservations: impl IntoIterator<Item = &'a Reservation>) -> usize {
        let mut holds: HashMap<String, String> = HashMap::new();
        let mut duplicates = 0;
        let mut ordered: Vec<&Reservation> =
            reservations.into_iter().filter(|r| r.is_active()).collect();
        ordered.sort_by(|a, b| b.reserved_at.cmp(&a.reserved_at));
        // Newest first, so the earliest active hold ends up winning
        for reservation in ordered {
            if holds
                .insert(reservation.item_id.clone(), reservation.id.clone())
                .is_some()
            {
                duplicates += 1;
            }
        }
        if duplicates > 0 {
            tracing::warn!(duplicates, "Multiple active reservations share an item");
        }
        let count = holds.len();
        self.replace(holds);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::ReservationStatus;

    #[test]
    fn test_claim_and_release() {
        let index = AvailabilityIndex::new();
        assert!(!index.is_held("item-1"));

        assert_eq!(index.claim("item-1", "res-1"), None);
        assert!(index.is_held("item-1"));
        assert_eq!(index.hold_for("item-1"), Some("res-1".to_string()));
        assert_eq!(index.held_count(), 1);

        assert_eq!(index.release("item-1"), Some("res-1".to_string()));
        assert!(!index.is_held("item-1"));
        assert_eq!(index.release("item-1"), None);
    }

    #[test]
    fn test_claim_returns_previous_holder() {
        let index = AvailabilityIndex::new();
        index.claim("item-1", "res-1");
        assert_eq!(index.claim("item-1", "res-2"), Some("res-1".to_string()));
        assert_eq!(index.hold_for("item-1"), Some("res-2".to_string()));
    }

    #[test]
    fn test_replace_swaps_whole_view() {
        let index = AvailabilityIndex::new();
        index.claim("item-1", "res-1");
        index.claim("item-2", "res-2");

        index.replace(vec![("item-3".to_string(), "res-3".to_string())]);

        assert!(!index.is_held("item-1"));
        assert!(!index.is_held("item-2"));
        assert_eq!(index.hold_for("item-3"), Some("res-3".to_string()));
        assert_eq!(index.held_count(), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let index = AvailabilityIndex::new();
        let clone = index.clone();
        index.claim("item-1", "res-1");
        assert!(clone.is_held("item-1"));
    }

    #[test]
    fn test_rebuild_from_reservations() {
        let index = AvailabilityIndex::new();
        index.claim("item-9", "stale");

        let reservations = vec![
            reservation("res-1", "item-1", ReservationStatus::Reserved, 10),
            reservation("res-2", "item-2", ReservationStatus::CheckedOut, 20),
            reservation("res-3", "item-3", ReservationStatus::Returned, 30),
        ];
        let holds = index.rebuild(reservations.iter());

        assert_eq!(holds, 2);
        assert!(index.is_held("item-1"));
        assert!(index.is_held("item-2"));
        assert!(index.is_available("item-3"));
        assert!(index.is_available("item-9"));

        // Idempotent
        assert_eq!(index.rebuild(reservations.iter()), 2);
        assert_eq!(index.held_count(), 2);
    }

    #[test]
    fn test_rebuild_earliest_active_hold_wins() {
        let index = AvailabilityIndex::new();
        let reservations = vec![
            reservation("res-late", "item-1", ReservationStatus::Reserved, 50),
            reservation("res-early", "item-1", ReservationStatus::Reserved, 10),
        ];
        index.rebuild(reservations.iter());
        assert_eq!(index.hold_for("item-1"), Some("res-early".to_string()));
    }

    fn reservation(
        id: &str,
        item_id: &str,
        status: ReservationStatus,
        offset_secs: i64,
    ) -> Reservation {
        use chrono::{Duration, Utc};
        Reservation {
            id: id.to_string(),
            item_id: item_id.to_string(),
            user_id: "user-1".to_string(),
            status,
            reserved_at: Utc::now() + Duration::seconds(offset_secs),
            checked_out_at: None,
            returned_at: None,
        }
    }
}
