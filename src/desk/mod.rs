//! Front Desk Gateway
//!
//! Badge-first entry points for the desk terminal. Every desk flow
//! identifies people by the badge they scan; the gateway resolves the badge
//! to its user and delegates to the engine with that user as the acting
//! party. It holds no state of its own.

use crate::db::MemoryStore;
use crate::db::models::{Reservation, User};
use crate::db::repository::UserRepository;
use crate::error::AppError;
use crate::reservations::{ClearOutcome, EngineError, ReservationEngine};
use thiserror::Error;

/// Gateway errors
#[derive(Debug, Error)]
pub enum DeskError {
    #[error("Badge not found: {0}")]
    BadgeNotFound(String),

    #[error("{0}")]
    Engine(#[from] EngineError),
}

impl From<DeskError> for AppError {
    fn from(err: DeskError) -> Self {
        match err {
            DeskError::BadgeNotFound(badge) => AppError::badge_not_found(badge),
            DeskError::Engine(e) => e.into(),
        }
    }
}

pub type DeskResult<T> = Result<T, DeskError>;

/// Badge-first wrapper over the reservation engine
#[derive(Clone, Debug)]
pub struct BadgeGateway {
    store: MemoryStore,
    engine: ReservationEngine,
}

impl BadgeGateway {
    pub fn new(store: MemoryStore, engine: ReservationEngine) -> Self {
        Self { store, engine }
    }

    /// Resolve a badge code to its user
    pub fn resolve(&self, badge_code: &str) -> DeskResult<User> {
        UserRepository::new(self.store.clone())
            .find_by_badge(badge_code)
            .ok_or_else(|| DeskError::BadgeNotFound(badge_code.to_string()))
    }

    /// Active reservations for the badge's user, longest-outstanding first
    pub fn active_by_badge(&self, badge_code: &str) -> DeskResult<Vec<Reservation>> {
        let user = self.resolve(badge_code)?;
        Ok(self.engine.list_active_for_user(&user.id)?)
    }

    /// Full history for the badge's user, newest first
    pub fn history_by_badge(&self, badge_code: &str) -> DeskResult<Vec<Reservation>> {
        let user = self.resolve(badge_code)?;
        Ok(self.engine.list_for_user(&user.id)?)
    }

    /// Reserve an item for the badge's user
    pub fn reserve_by_badge(&self, badge_code: &str, item_id: &str) -> DeskResult<Reservation> {
        let user = self.resolve(badge_code)?;
        Ok(self.engine.reserve(item_id, &user.id)?)
    }

    /// Check out a reservation, the badge's user acting
    pub fn check_out_by_badge(
        &self,
        badge_code: &str,
        reservation_id: &str,
    ) -> DeskResult<Reservation> {
        let user = self.resolve(badge_code)?;
        Ok(self.engine.check_out(reservation_id, &user.id)?)
    }

    /// Return a reservation, the badge's user acting
    pub fn return_by_badge(
        &self,
        badge_code: &str,
        reservation_id: &str,
    ) -> DeskResult<Reservation> {
        let user = self.resolve(badge_code)?;
        Ok(self.engine.return_item(reservation_id, &user.id)?)
    }

    /// Clear the reservation table, the badge's user acting
    pub fn clear_by_badge(&self, badge_code: &str) -> DeskResult<ClearOutcome> {
        let user = self.resolve(badge_code)?;
        Ok(self.engine.clear_all(&user.id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{Item, ItemCategory, ItemCreate, ReservationStatus, UserCreate, UserRole};
    use crate::db::repository::ItemRepository;
    use crate::error::ErrorCode;
    use std::time::Duration;

    fn create_test_gateway() -> BadgeGateway {
        let store = MemoryStore::new();
        let engine = ReservationEngine::new(store.clone(), Duration::from_millis(200));
        BadgeGateway::new(store, engine)
    }

    fn seed_user(gateway: &BadgeGateway, name: &str, badge: &str, role: UserRole) -> User {
        UserRepository::new(gateway.store.clone())
            .create(UserCreate {
                name: name.to_string(),
                role,
                badge_code: badge.to_string(),
                contact: None,
            })
            .unwrap()
    }

    fn seed_item(gateway: &BadgeGateway, name: &str) -> Item {
        ItemRepository::new(gateway.store.clone())
            .create(ItemCreate {
                name: name.to_string(),
                category: ItemCategory::Key,
                location: "Front desk".to_string(),
            })
            .unwrap()
    }

    #[test]
    fn test_resolve_badge() {
        let gateway = create_test_gateway();
        let user = seed_user(&gateway, "Ana Souza", "20240001", UserRole::Student);

        let resolved = gateway.resolve("20240001").unwrap();
        assert_eq!(resolved.id, user.id);

        let missing = gateway.resolve("99999999");
        assert!(matches!(missing, Err(DeskError::BadgeNotFound(_))));
    }

    #[test]
    fn test_full_cycle_by_badge() {
        let gateway = create_test_gateway();
        seed_user(&gateway, "Ana Souza", "20240001", UserRole::Student);
        let item = seed_item(&gateway, "Lab 2 key");

        let reservation = gateway.reserve_by_badge("20240001", &item.id).unwrap();
        assert_eq!(reservation.status, ReservationStatus::Reserved);

        let active = gateway.active_by_badge("20240001").unwrap();
        assert_eq!(active.len(), 1);

        let checked = gateway
            .check_out_by_badge("20240001", &reservation.id)
            .unwrap();
        assert_eq!(checked.status, ReservationStatus::CheckedOut);

        let returned = gateway
            .return_by_badge("20240001", &reservation.id)
            .unwrap();
        assert_eq!(returned.status, ReservationStatus::Returned);

        assert!(gateway.active_by_badge("20240001").unwrap().is_empty());
        assert_eq!(gateway.history_by_badge("20240001").unwrap().len(), 1);
    }

    #[test]
    fn test_attendant_badge_acts_on_behalf() {
        let gateway = create_test_gateway();
        seed_user(&gateway, "Ana Souza", "20240001", UserRole::Student);
        seed_user(&gateway, "Carlos Porteiro", "10000001", UserRole::Attendant);
        let item = seed_item(&gateway, "Lab 2 key");

        let reservation = gateway.reserve_by_badge("20240001", &item.id).unwrap();

        // The desk scans its own badge to hand the item over
        let checked = gateway
            .check_out_by_badge("10000001", &reservation.id)
            .unwrap();
        assert_eq!(checked.user_id, reservation.user_id);
    }

    #[test]
    fn test_clear_by_badge_requires_attendant() {
        let gateway = create_test_gateway();
        seed_user(&gateway, "Ana Souza", "20240001", UserRole::Student);
        seed_user(&gateway, "Carlos Porteiro", "10000001", UserRole::Attendant);
        let item = seed_item(&gateway, "Lab 2 key");
        gateway.reserve_by_badge("20240001", &item.id).unwrap();

        let denied = gateway.clear_by_badge("20240001");
        assert!(matches!(
            denied,
            Err(DeskError::Engine(EngineError::PermissionDenied(_)))
        ));

        let outcome = gateway.clear_by_badge("10000001").unwrap();
        assert_eq!(outcome.total_removed, 1);
        assert_eq!(outcome.items_freed, 1);
    }

    #[test]
    fn test_unknown_badge_on_every_operation() {
        let gateway = create_test_gateway();
        let item = seed_item(&gateway, "Lab 2 key");

        assert!(matches!(
            gateway.reserve_by_badge("nope", &item.id),
            Err(DeskError::BadgeNotFound(_))
        ));
        assert!(matches!(
            gateway.check_out_by_badge("nope", "res-1"),
            Err(DeskError::BadgeNotFound(_))
        ));
        assert!(matches!(
            gateway.return_by_badge("nope", "res-1"),
            Err(DeskError::BadgeNotFound(_))
        ));
        assert!(matches!(
            gateway.active_by_badge("nope"),
            Err(DeskError::BadgeNotFound(_))
        ));
        assert!(matches!(
            gateway.clear_by_badge("nope"),
            Err(DeskError::BadgeNotFound(_))
        ));
    }

    #[test]
    fn test_badge_error_maps_to_wire_code() {
        let err: AppError = DeskError::BadgeNotFound("x".to_string()).into();
        assert_eq!(err.code, ErrorCode::BadgeNotFound);
        assert_eq!(err.http_status(), http::StatusCode::NOT_FOUND);
    }
}
