//! Server State
//!
//! One [`ServerState`] is built at startup and cloned into every handler;
//! all fields are cheap Arc-backed handles over the same store.

use crate::core::Config;
use crate::db::MemoryStore;
use crate::db::models::{ItemCategory, ItemCreate, UserCreate, UserRole};
use crate::db::repository::{ItemRepository, UserRepository};
use crate::desk::BadgeGateway;
use crate::reservations::ReservationEngine;

/// Shared application state
#[derive(Clone, Debug)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// In-memory store (users, items, reservations, badge index)
    pub store: MemoryStore,
    /// Reservation lifecycle engine
    pub engine: ReservationEngine,
    /// Badge-first desk gateway
    pub gateway: BadgeGateway,
}

impl ServerState {
    /// Build state around an existing store
    pub fn new(config: Config, store: MemoryStore) -> Self {
        let engine = ReservationEngine::new(store.clone(), config.lock_wait());
        let gateway = BadgeGateway::new(store.clone(), engine.clone());
        Self {
            config,
            store,
            engine,
            gateway,
        }
    }

    /// Create and warm up the full application state
    ///
    /// ├─ 1. Fresh store and engine
    /// ├─ 2. Optional demo seed (only into an empty store)
    /// └─ 3. Reconcile derived availability before serving
    pub fn initialize(config: &Config) -> Self {
        let state = Self::new(config.clone(), MemoryStore::new());

        if state.config.seed_demo_data && state.store.is_empty() {
            state.seed_demo_data();
        }

        state.engine.reconcile();
        state
    }

    /// Seed a demo roster so a fresh terminal can exercise the flow
    fn seed_demo_data(&self) {
        let users = UserRepository::new(self.store.clone());
        let items = ItemRepository::new(self.store.clone());

        let demo_users = [
            ("Ana Souza", UserRole::Attendant, "90000001"),
            ("Maria Silva", UserRole::Student, "20230001"),
            ("Joao Pereira", UserRole::Student, "20230002"),
            ("Carla Mendes", UserRole::Faculty, "10000001"),
        ];
        for (name, role, badge) in demo_users {
            if let Err(e) = users.create(UserCreate {
                name: name.to_string(),
                role,
                badge_code: badge.to_string(),
                contact: None,
            }) {
                tracing::warn!(badge, error = %e, "Skipped demo user");
            }
        }

        let demo_items = [
            ("Key Lab 101", ItemCategory::Key, "Block A"),
            ("Key Lab 102", ItemCategory::Key, "Block A"),
            ("Projector remote", ItemCategory::Remote, "Media room"),
            ("Gym storage key", ItemCategory::Key, "Gym"),
            ("Spare HDMI adapter", ItemCategory::Other, "Front desk"),
        ];
        for (name, category, location) in demo_items {
            if let Err(e) = items.create(ItemCreate {
                name: name.to_string(),
                category,
                location: location.to_string(),
            }) {
                tracing::warn!(item = name, error = %e, "Skipped demo item");
            }
        }

        tracing::info!(
            users = self.store.user_count(),
            items = self.store.item_count(),
            "Seeded demo data"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_seeds_when_enabled() {
        let mut config = Config::with_overrides(0, 50);
        config.seed_demo_data = true;

        let state = ServerState::initialize(&config);

        assert!(state.store.user_count() >= 4);
        assert!(state.store.item_count() >= 5);
        // The seeded attendant badge resolves
        let attendant = state.gateway.resolve("90000001").unwrap();
        assert!(attendant.role.is_attendant());
        // Fresh seed has no reservations, everything is available
        assert_eq!(state.store.reservation_count(), 0);
        assert_eq!(
            state.engine.available_items().len(),
            state.store.item_count()
        );
    }

    #[test]
    fn test_initialize_without_seed_starts_empty() {
        let config = Config::with_overrides(0, 50);
        let state = ServerState::initialize(&config);

        assert!(state.store.is_empty());
    }

    #[test]
    fn test_state_clones_share_the_store() {
        let mut config = Config::with_overrides(0, 50);
        config.seed_demo_data = true;

        let state = ServerState::initialize(&config);
        let clone = state.clone();

        assert_eq!(state.store.user_count(), clone.store.user_count());
        assert_eq!(state.engine.epoch(), clone.engine.epoch());
    }
}
