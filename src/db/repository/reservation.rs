//! Reservation Repository
//!
//! Reservations are only ever created and transitioned by the reservation
//! engine, so this repository exposes `save` (whole-record replacement)
//! instead of create/update payload methods.

use crate::db::MemoryStore;
use crate::db::models::Reservation;

#[derive(Clone)]
pub struct ReservationRepository {
    store: MemoryStore,
}

impl ReservationRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Full history, newest first
    pub fn find_all(&self) -> Vec<Reservation> {
        let mut reservations: Vec<Reservation> = self
            .store
            .reservations()
            .iter()
            .map(|e| e.value().clone())
            .collect();
        reservations.sort_by(|a, b| {
            b.reserved_at
                .cmp(&a.reserved_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        reservations
    }

    pub fn find_by_id(&self, id: &str) -> Option<Reservation> {
        self.store.reservations().get(id).map(|e| e.value().clone())
    }

    /// Every reservation for one user, newest first
    pub fn find_by_user(&self, user_id: &str) -> Vec<Reservation> {
        let mut reservations: Vec<Reservation> = self
            .store
            .reservations()
            .iter()
            .filter(|e| e.value().user_id == user_id)
            .map(|e| e.value().clone())
            .collect();
        reservations.sort_by(|a, b| {
            b.reserved_at
                .cmp(&a.reserved_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        reservations
    }

    /// Active reservations for one user, oldest first so staff see the
    /// longest-outstanding item at the top
    pub fn find_active_by_user(&self, user_id: &str) -> Vec<Reservation> {
        let mut reservations: Vec<Reservation> = self
            .store
            .reservations()
            .iter()
            .filter(|e| e.value().user_id == user_id && e.value().is_active())
            .map(|e| e.value().clone())
            .collect();
        reservations.sort_by(|a, b| {
            a.reserved_at
                .cmp(&b.reserved_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        reservations
    }

    /// The single active reservation pinning an item, if any
    pub fn find_active_by_item(&self, item_id: &str) -> Option<Reservation> {
        self.store
            .reservations()
            .iter()
            .find(|e| e.value().item_id == item_id && e.value().is_active())
            .map(|e| e.value().clone())
    }

    /// Item ids pinned by an active reservation
    pub fn active_item_ids(&self) -> Vec<String> {
        self.store
            .reservations()
            .iter()
            .filter(|e| e.value().is_active())
            .map(|e| e.value().item_id.clone())
            .collect()
    }

    pub fn count_active(&self) -> usize {
        self.store
            .reservations()
            .iter()
            .filter(|e| e.value().is_active())
            .count()
    }

    pub fn count_all(&self) -> usize {
        self.store.reservations().len()
    }

    /// Insert or replace a whole reservation record
    pub fn save(&self, reservation: Reservation) {
        self.store
            .reservations()
            .insert(reservation.id.clone(), reservation);
    }

    /// Drain every reservation, returning the removed records
    pub fn remove_all(&self) -> Vec<Reservation> {
        let mut removed = Vec::with_capacity(self.store.reservations().len());
        self.store.reservations().retain(|_, reservation| {
            removed.push(reservation.clone());
            false
        });
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::ReservationStatus;
    use chrono::{Duration, Utc};

    fn reservation(id: &str, item: &str, user: &str, status: ReservationStatus) -> Reservation {
        Reservation {
            id: id.to_string(),
            item_id: item.to_string(),
            user_id: user.to_string(),
            status,
            reserved_at: Utc::now(),
            checked_out_at: None,
            returned_at: None,
        }
    }

    #[test]
    fn test_active_by_item() {
        let repo = ReservationRepository::new(MemoryStore::new());
        repo.save(reservation("r1", "i1", "u1", ReservationStatus::Returned));
        repo.save(reservation("r2", "i1", "u2", ReservationStatus::CheckedOut));
        repo.save(reservation("r3", "i2", "u1", ReservationStatus::Reserved));

        let active = repo.find_active_by_item("i1").unwrap();
        assert_eq!(active.id, "r2");
        assert!(repo.find_active_by_item("i9").is_none());
    }

    #[test]
    fn test_active_by_user_oldest_first() {
        let repo = ReservationRepository::new(MemoryStore::new());
        let base = Utc::now();

        let mut older = reservation("r1", "i1", "u1", ReservationStatus::CheckedOut);
        older.reserved_at = base - Duration::minutes(30);
        let mut newer = reservation("r2", "i2", "u1", ReservationStatus::Reserved);
        newer.reserved_at = base;
        let mut returned = reservation("r3", "i3", "u1", ReservationStatus::Returned);
        returned.reserved_at = base - Duration::minutes(60);

        repo.save(newer);
        repo.save(older);
        repo.save(returned);

        let active = repo.find_active_by_user("u1");
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].id, "r1");
        assert_eq!(active[1].id, "r2");
    }

    #[test]
    fn test_find_all_newest_first() {
        let repo = ReservationRepository::new(MemoryStore::new());
        let base = Utc::now();

        let mut first = reservation("r1", "i1", "u1", ReservationStatus::Returned);
        first.reserved_at = base - Duration::minutes(10);
        let mut second = reservation("r2", "i2", "u1", ReservationStatus::Reserved);
        second.reserved_at = base;

        repo.save(first);
        repo.save(second);

        let all = repo.find_all();
        assert_eq!(all[0].id, "r2");
        assert_eq!(all[1].id, "r1");
    }

    #[test]
    fn test_counts_and_remove_all() {
        let repo = ReservationRepository::new(MemoryStore::new());
        repo.save(reservation("r1", "i1", "u1", ReservationStatus::Reserved));
        repo.save(reservation("r2", "i2", "u2", ReservationStatus::Returned));

        assert_eq!(repo.count_active(), 1);
        assert_eq!(repo.count_all(), 2);
        assert_eq!(repo.active_item_ids(), vec!["i1".to_string()]);

        let removed = repo.remove_all();
        assert_eq!(removed.len(), 2);
        assert_eq!(repo.count_all(), 0);
    }
}
