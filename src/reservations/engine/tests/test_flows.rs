use super::*;
use crate::error::{AppError, ErrorCode};
use std::sync::mpsc;
use std::thread;

#[test]
fn test_clear_requires_administrator() {
    let engine = create_test_engine();
    let ana = seed_user(&engine, "Ana Souza", UserRole::Student);
    let item = seed_item(&engine, "Lab 2 key");
    place_hold(&engine, &item, &ana);

    let denied = engine.clear_all(&ana.id);
    assert!(matches!(denied, Err(EngineError::PermissionDenied(_))));
    // Nothing was removed
    assert_eq!(engine.list_all().len(), 1);
    assert!(!item_available(&engine, &item.id));
}

#[test]
fn test_clear_wipes_history_and_frees_items() {
    let engine = create_test_engine();
    let ana = seed_user(&engine, "Ana Souza", UserRole::Student);
    let bia = seed_user(&engine, "Bia Lima", UserRole::Student);
    let desk = seed_user(&engine, "Carlos Porteiro", UserRole::Attendant);
    let key = seed_item(&engine, "Lab 2 key");
    let remote = seed_item(&engine, "Projector remote");
    let tablet = seed_item(&engine, "Sign-in tablet");

    // One RESERVED, one CHECKED_OUT, one already RETURNED
    place_hold(&engine, &key, &ana);
    hand_over(&engine, &remote, &bia);
    let done = hand_over(&engine, &tablet, &ana);
    engine.return_item(&done.id, &ana.id).unwrap();

    let outcome = engine.clear_all(&desk.id).unwrap();

    assert_eq!(
        outcome,
        ClearOutcome {
            total_removed: 3,
            active_removed: 2,
            items_freed: 2,
        }
    );
    assert!(engine.list_all().is_empty());
    assert!(item_available(&engine, &key.id));
    assert!(item_available(&engine, &remote.id));
    assert!(item_available(&engine, &tablet.id));

    // Everything can be reserved again
    assert!(engine.reserve(&key.id, &bia.id).is_ok());
}

#[test]
fn test_clear_on_empty_table() {
    let engine = create_test_engine();
    let desk = seed_user(&engine, "Carlos Porteiro", UserRole::Attendant);

    let outcome = engine.clear_all(&desk.id).unwrap();
    assert_eq!(
        outcome,
        ClearOutcome {
            total_removed: 0,
            active_removed: 0,
            items_freed: 0,
        }
    );
}

#[test]
fn test_reconcile_repairs_drifted_flags() {
    let engine = create_test_engine();
    let ana = seed_user(&engine, "Ana Souza", UserRole::Student);
    let item = seed_item(&engine, "Lab 2 key");
    place_hold(&engine, &item, &ana);

    // Corrupt the derived flag behind the engine's back
    ItemRepository::new(engine.store().clone())
        .set_available(&item.id, true)
        .unwrap();
    assert!(item_available(&engine, &item.id));

    let corrected = engine.reconcile();
    assert_eq!(corrected, 1);
    assert!(!item_available(&engine, &item.id));

    // A second run has nothing left to fix
    assert_eq!(engine.reconcile(), 0);
}

#[test]
fn test_restart_over_shared_store() {
    let engine = create_test_engine();
    let ana = seed_user(&engine, "Ana Souza", UserRole::Student);
    let bia = seed_user(&engine, "Bia Lima", UserRole::Student);
    let item = seed_item(&engine, "Lab 2 key");
    place_hold(&engine, &item, &ana);

    // Fresh engine over the same store: empty index, same tables
    let restarted = ReservationEngine::new(engine.store().clone(), Duration::from_millis(200));
    assert_ne!(restarted.epoch(), engine.epoch());

    // The authoritative re-check still rejects a double hold
    let result = restarted.reserve(&item.id, &bia.id);
    assert!(matches!(result, Err(EngineError::ItemUnavailable(_))));

    // Warm-up pass finds the flags intact
    assert_eq!(restarted.reconcile(), 0);
}

#[test]
fn test_dashboard_counts() {
    let engine = create_test_engine();
    let ana = seed_user(&engine, "Ana Souza", UserRole::Student);
    let key = seed_item(&engine, "Lab 2 key");
    let remote = seed_item(&engine, "Projector remote");
    seed_item(&engine, "Sign-in tablet");

    place_hold(&engine, &key, &ana);
    let done = hand_over(&engine, &remote, &ana);
    engine.return_item(&done.id, &ana.id).unwrap();

    let snapshot = engine.dashboard();
    assert_eq!(
        snapshot,
        DashboardSnapshot {
            total_items: 3,
            available_items: 2,
            total_reservations: 2,
            active_reservations: 1,
        }
    );
}

#[test]
fn test_repeated_cycles_accumulate_history() {
    let engine = create_test_engine();
    let ana = seed_user(&engine, "Ana Souza", UserRole::Student);
    let item = seed_item(&engine, "Lab 2 key");

    for _ in 0..3 {
        let checked = hand_over(&engine, &item, &ana);
        engine.return_item(&checked.id, &ana.id).unwrap();
    }

    let history = engine.list_for_user(&ana.id).unwrap();
    assert_eq!(history.len(), 3);
    // Newest first
    assert!(history[0].reserved_at >= history[1].reserved_at);
    assert!(history[1].reserved_at >= history[2].reserved_at);
    assert!(history.iter().all(|r| r.status == ReservationStatus::Returned));
    assert!(item_available(&engine, &item.id));
}

#[test]
fn test_concurrent_reserves_on_distinct_items() {
    let engine = create_test_engine();
    let ana = seed_user(&engine, "Ana Souza", UserRole::Student);
    let bia = seed_user(&engine, "Bia Lima", UserRole::Student);
    let key = seed_item(&engine, "Lab 2 key");
    let remote = seed_item(&engine, "Projector remote");

    let first = {
        let engine = engine.clone();
        let (item_id, user_id) = (key.id.clone(), ana.id.clone());
        thread::spawn(move || engine.reserve(&item_id, &user_id))
    };
    let second = {
        let engine = engine.clone();
        let (item_id, user_id) = (remote.id.clone(), bia.id.clone());
        thread::spawn(move || engine.reserve(&item_id, &user_id))
    };

    assert!(first.join().unwrap().is_ok());
    assert!(second.join().unwrap().is_ok());
    assert_eq!(engine.dashboard().active_reservations, 2);
}

#[test]
fn test_contended_item_surfaces_retryable_conflict() {
    let engine = ReservationEngine::new(MemoryStore::new(), Duration::from_millis(10));
    let ana = seed_user(&engine, "Ana Souza", UserRole::Student);
    let item = seed_item(&engine, "Lab 2 key");

    // Park a writer on the item's lock so the reserve times out
    let locks = engine.locks.clone();
    let item_id = item.id.clone();
    let (started_tx, started_rx) = mpsc::channel();
    let holder = thread::spawn(move || {
        locks.with_item(&item_id, || {
            started_tx.send(()).unwrap();
            thread::sleep(Duration::from_millis(100));
        })
    });
    started_rx.recv().unwrap();

    let err = engine.reserve(&item.id, &ana.id).unwrap_err();
    assert!(matches!(err, EngineError::LockContended(_)));

    // Surfaces as the one wire code clients may retry
    let app: AppError = err.into();
    assert_eq!(app.code, ErrorCode::ReservationConflict);
    assert!(app.code.is_retryable());

    assert!(holder.join().unwrap().is_some());
}

#[test]
fn test_list_all_newest_first() {
    let engine = create_test_engine();
    let ana = seed_user(&engine, "Ana Souza", UserRole::Student);
    let key = seed_item(&engine, "Lab 2 key");
    let remote = seed_item(&engine, "Projector remote");

    let first = place_hold(&engine, &key, &ana);
    let second = place_hold(&engine, &remote, &ana);

    let all = engine.list_all();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, second.id);
    assert_eq!(all[1].id, first.id);
}
