use super::*;
use crate::db::models::{Item, ItemCategory, ItemCreate, User, UserCreate, UserRole};

fn create_test_engine() -> ReservationEngine {
    ReservationEngine::new(MemoryStore::new(), Duration::from_millis(200))
}

// ========================================================================
// Seed helpers: go through the repositories, same path production uses
// ========================================================================

fn seed_user(engine: &ReservationEngine, name: &str, role: UserRole) -> User {
    UserRepository::new(engine.store().clone())
        .create(UserCreate {
            name: name.to_string(),
            role,
            badge_code: format!("badge-{}", name.to_lowercase().replace(' ', "-")),
            contact: None,
        })
        .unwrap()
}

fn seed_item(engine: &ReservationEngine, name: &str) -> Item {
    ItemRepository::new(engine.store().clone())
        .create(ItemCreate {
            name: name.to_string(),
            category: ItemCategory::Key,
            location: "Front desk".to_string(),
        })
        .unwrap()
}

// ========================================================================
// Lifecycle helpers
// ========================================================================

/// Reserve and assert success
fn place_hold(engine: &ReservationEngine, item: &Item, user: &User) -> Reservation {
    let reservation = engine.reserve(&item.id, &user.id);
    assert!(reservation.is_ok(), "Failed to reserve: {reservation:?}");
    reservation.unwrap()
}

/// Reserve then check out, asserting both steps
fn hand_over(engine: &ReservationEngine, item: &Item, user: &User) -> Reservation {
    let reservation = place_hold(engine, item, user);
    let checked = engine.check_out(&reservation.id, &user.id);
    assert!(checked.is_ok(), "Failed to check out: {checked:?}");
    checked.unwrap()
}

fn item_available(engine: &ReservationEngine, item_id: &str) -> bool {
    ItemRepository::new(engine.store().clone())
        .find_by_id(item_id)
        .map(|i| i.available)
        .unwrap_or(false)
}

fn assert_status(engine: &ReservationEngine, reservation_id: &str, expected: ReservationStatus) {
    let reservation = ReservationRepository::new(engine.store().clone())
        .find_by_id(reservation_id)
        .unwrap();
    assert_eq!(
        reservation.status, expected,
        "Expected reservation status {:?}, got {:?}",
        expected, reservation.status
    );
}

mod test_flows;
