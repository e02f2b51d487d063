//! Database Module
//!
//! In-memory entity store shared by every repository. State is
//! process-local; a restart starts from an empty desk.

pub mod models;
pub mod repository;

use dashmap::DashMap;
use std::sync::Arc;

use models::{Item, Reservation, User};

/// In-memory entity store backed by concurrent maps
///
/// Records are immutable snapshots: reads clone whole records out of the
/// maps and writes replace whole records, so a reader only ever observes a
/// record fully before or fully after a mutation, never mid-update.
///
/// Cloning the store is cheap (Arc) and every clone sees the same data.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<StoreInner>,
}

#[derive(Debug, Default)]
struct StoreInner {
    users: DashMap<String, User>,
    items: DashMap<String, Item>,
    reservations: DashMap<String, Reservation>,
    /// badge code -> user id
    badges: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn users(&self) -> &DashMap<String, User> {
        &self.inner.users
    }

    pub(crate) fn items(&self) -> &DashMap<String, Item> {
        &self.inner.items
    }

    pub(crate) fn reservations(&self) -> &DashMap<String, Reservation> {
        &self.inner.reservations
    }

    pub(crate) fn badges(&self) -> &DashMap<String, String> {
        &self.inner.badges
    }

    // ========== Counts (dashboard, health) ==========

    pub fn user_count(&self) -> usize {
        self.inner.users.len()
    }

    pub fn item_count(&self) -> usize {
        self.inner.items.len()
    }

    pub fn reservation_count(&self) -> usize {
        self.inner.reservations.len()
    }

    /// True when no entity of any kind has been registered yet
    pub fn is_empty(&self) -> bool {
        self.inner.users.is_empty()
            && self.inner.items.is_empty()
            && self.inner.reservations.is_empty()
    }
}
