//! ReservationEngine - Core lifecycle processing for item holds
//!
//! This module handles:
//! - Lifecycle transitions (reserve → check out → return)
//! - Per-item serialization of transitions
//! - Availability bookkeeping on the item table
//! - Audit trail emission
//!
//! # Transition Flow
//!
//! ```text
//! reserve(item_id, user_id)
//!     ├─ 1. Resolve the user and the item
//!     ├─ 2. Pre-check the availability index (fast fail)
//!     ├─ 3. Acquire the per-item lock (bounded wait)
//!     ├─ 4. Re-check the reservation table under the lock
//!     ├─ 5. Persist the RESERVED record
//!     ├─ 6. Flip the item to unavailable and claim the hold
//!     └─ 7. Emit the audit trail and return the record
//! ```
//!
//! Check-out and return follow the same shape: fast-path reads outside the
//! lock, authoritative re-read and mutation inside it.

mod error;
pub use error::*;

use super::availability::AvailabilityIndex;
use super::locks::ItemLockTable;
use super::policy::{ActingPolicy, RolePolicy};
use crate::db::MemoryStore;
use crate::db::models::{Item, Reservation, ReservationStatus};
use crate::db::repository::{ItemRepository, RepoError, ReservationRepository, UserRepository};
use crate::{audit_log, security_log};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// Summary returned by the bulk clear operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearOutcome {
    pub total_removed: usize,
    pub active_removed: usize,
    pub items_freed: usize,
}

/// Aggregate counters for the front-desk dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub total_items: usize,
    pub available_items: usize,
    pub total_reservations: usize,
    pub active_reservations: usize,
}

/// ReservationEngine for lifecycle processing
///
/// The `epoch` field is a unique identifier generated on each startup.
/// Since the store is volatile, clients use it to detect restarts and
/// discard anything they cached.
#[derive(Clone)]
pub struct ReservationEngine {
    store: MemoryStore,
    locks: ItemLockTable,
    availability: AvailabilityIndex,
    policy: Arc<dyn ActingPolicy>,
    /// Server instance epoch - unique ID generated on startup
    epoch: String,
}

impl std::fmt::Debug for ReservationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReservationEngine")
            .field("store", &self.store)
            .field("policy", &"<ActingPolicy>")
            .field("epoch", &self.epoch)
            .finish()
    }
}

impl ReservationEngine {
    /// Create a new ReservationEngine over the given store
    pub fn new(store: MemoryStore, lock_wait: Duration) -> Self {
        let epoch = uuid::Uuid::new_v4().to_string();
        tracing::info!(epoch = %epoch, "ReservationEngine started with new epoch");
        Self {
            store,
            locks: ItemLockTable::new(lock_wait),
            availability: AvailabilityIndex::new(),
            policy: Arc::new(RolePolicy),
            epoch,
        }
    }

    /// Swap the acting policy
    pub fn set_policy(&mut self, policy: Arc<dyn ActingPolicy>) {
        self.policy = policy;
    }

    /// Get the server epoch (unique instance ID)
    pub fn epoch(&self) -> &str {
        &self.epoch
    }

    /// Get the underlying store
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    fn users(&self) -> UserRepository {
        UserRepository::new(self.store.clone())
    }

    fn items(&self) -> ItemRepository {
        ItemRepository::new(self.store.clone())
    }

    fn reservations(&self) -> ReservationRepository {
        ReservationRepository::new(self.store.clone())
    }

    // ========== Lifecycle Transitions ==========

    /// Place a hold on an item for a user
    ///
    /// The item must exist and carry no active reservation. On success the
    /// item is flipped to unavailable in the same locked section.
    pub fn reserve(&self, item_id: &str, user_id: &str) -> EngineResult<Reservation> {
        tracing::debug!(item_id, user_id, "Processing reserve");

        // 1. Both ends of the reservation must exist
        let user = self
            .users()
            .find_by_id(user_id)
            .ok_or_else(|| EngineError::UserNotFound(user_id.to_string()))?;
        let item = self
            .items()
            .find_by_id(item_id)
            .ok_or_else(|| EngineError::ItemNotFound(item_id.to_string()))?;

        // 2. Pre-check the index before taking the lock
        // This rejects the common contended case without serializing readers
        if let Some(existing) = self.availability.hold_for(item_id) {
            return Err(EngineError::ItemUnavailable(format!(
                "Item {} is already reserved (reservation: {})",
                item.name, existing
            )));
        }

        // 3-6. Transition under the per-item lock
        let reservation = self
            .locks
            .with_item(item_id, || {
                // Re-check the authoritative table; the index read may be stale
                if let Some(existing) = self.reservations().find_active_by_item(item_id) {
                    return Err(EngineError::ItemUnavailable(format!(
                        "Item {} is already reserved (reservation: {})",
                        item.name, existing.id
                    )));
                }

                // Verifies the item is still present before anything is written
                self.items()
                    .set_available(item_id, false)
                    .map_err(|e| match e {
                        RepoError::NotFound(_) => EngineError::ItemNotFound(item_id.to_string()),
                        other => EngineError::Internal(other.to_string()),
                    })?;

                let reservation = Reservation {
                    id: uuid::Uuid::new_v4().to_string(),
                    item_id: item_id.to_string(),
                    user_id: user_id.to_string(),
                    status: ReservationStatus::Reserved,
                    reserved_at: Utc::now(),
                    checked_out_at: None,
                    returned_at: None,
                };
                self.reservations().save(reservation.clone());

                if let Some(prev) = self.availability.claim(item_id, &reservation.id) {
                    tracing::warn!(item_id, prev = %prev, "Availability index held a stale entry");
                }
                Ok(reservation)
            })
            .ok_or_else(|| {
                EngineError::LockContended(format!(
                    "Item {item_id} is being updated by another operation"
                ))
            })??;

        // 7. Audit trail
        audit_log!(
            user.id.as_str(),
            "reserve",
            format!("reservation:{}", reservation.id),
            format!("item:{}", reservation.item_id)
        );
        tracing::info!(
            reservation_id = %reservation.id,
            item_id,
            user_id,
            "Reservation placed"
        );
        Ok(reservation)
    }

    /// Move a reservation from RESERVED to CHECKED_OUT
    ///
    /// Only the owner, or someone the policy allows to act for the owner,
    /// may drive the transition.
    pub fn check_out(&self, reservation_id: &str, acting_user_id: &str) -> EngineResult<Reservation> {
        tracing::debug!(reservation_id, acting_user_id, "Processing check-out");

        let acting = self
            .users()
            .find_by_id(acting_user_id)
            .ok_or_else(|| EngineError::UserNotFound(acting_user_id.to_string()))?;
        let current = self
            .reservations()
            .find_by_id(reservation_id)
            .ok_or_else(|| EngineError::ReservationNotFound(reservation_id.to_string()))?;

        if !self.policy.may_act_for(&acting, &current.user_id) {
            security_log!(
                "WARN",
                "acting_denied",
                user_id = acting.id.as_str(),
                owner_id = current.user_id.as_str(),
                action = "check_out"
            );
            return Err(EngineError::UserMismatch(format!(
                "Reservation {} belongs to user {}, not {}",
                reservation_id, current.user_id, acting.id
            )));
        }

        let updated = self
            .locks
            .with_item(&current.item_id, || {
                // Reload under the lock; the fast-path read above may be stale
                let mut reservation = self
                    .reservations()
                    .find_by_id(reservation_id)
                    .ok_or_else(|| EngineError::ReservationNotFound(reservation_id.to_string()))?;

                match reservation.status {
                    ReservationStatus::Reserved => {}
                    ReservationStatus::Returned => {
                        return Err(EngineError::Finalized(reservation_id.to_string()));
                    }
                    other => {
                        return Err(EngineError::NotReserved(format!(
                            "Reservation {reservation_id} is {other:?}, expected Reserved"
                        )));
                    }
                }

                // Wall clocks can step backwards; transition stamps never do
                reservation.checked_out_at = Some(Utc::now().max(reservation.reserved_at));
                reservation.status = ReservationStatus::CheckedOut;
                self.reservations().save(reservation.clone());
                Ok(reservation)
            })
            .ok_or_else(|| {
                EngineError::LockContended(format!(
                    "Item {} is being updated by another operation",
                    current.item_id
                ))
            })??;

        audit_log!(
            acting.id.as_str(),
            "check_out",
            format!("reservation:{}", updated.id),
            format!("item:{}", updated.item_id)
        );
        tracing::info!(reservation_id, acting_user_id, "Reservation checked out");
        Ok(updated)
    }

    /// Move a reservation from CHECKED_OUT to RETURNED and release the item
    ///
    /// RETURNED is terminal: the record is kept for history and the item
    /// becomes available again.
    pub fn return_item(
        &self,
        reservation_id: &str,
        acting_user_id: &str,
    ) -> EngineResult<Reservation> {
        tracing::debug!(reservation_id, acting_user_id, "Processing return");

        let acting = self
            .users()
            .find_by_id(acting_user_id)
            .ok_or_else(|| EngineError::UserNotFound(acting_user_id.to_string()))?;
        let current = self
            .reservations()
            .find_by_id(reservation_id)
            .ok_or_else(|| EngineError::ReservationNotFound(reservation_id.to_string()))?;

        if !self.policy.may_act_for(&acting, &current.user_id) {
            security_log!(
                "WARN",
                "acting_denied",
                user_id = acting.id.as_str(),
                owner_id = current.user_id.as_str(),
                action = "return"
            );
            return Err(EngineError::UserMismatch(format!(
                "Reservation {} belongs to user {}, not {}",
                reservation_id, current.user_id, acting.id
            )));
        }

        let updated = self
            .locks
            .with_item(&current.item_id, || {
                let mut reservation = self
                    .reservations()
                    .find_by_id(reservation_id)
                    .ok_or_else(|| EngineError::ReservationNotFound(reservation_id.to_string()))?;

                match reservation.status {
                    ReservationStatus::CheckedOut => {}
                    ReservationStatus::Returned => {
                        return Err(EngineError::Finalized(reservation_id.to_string()));
                    }
                    other => {
                        return Err(EngineError::NotCheckedOut(format!(
                            "Reservation {reservation_id} is {other:?}, expected CheckedOut"
                        )));
                    }
                }

                let floor = reservation.checked_out_at.unwrap_or(reservation.reserved_at);
                reservation.returned_at = Some(Utc::now().max(floor));
                reservation.status = ReservationStatus::Returned;
                self.reservations().save(reservation.clone());

                // The hold ends with the lifecycle
                if let Err(e) = self.items().set_available(&reservation.item_id, true) {
                    tracing::warn!(
                        item_id = %reservation.item_id,
                        error = %e,
                        "Failed to flip a returned item back to available"
                    );
                }
                self.availability.release(&reservation.item_id);
                Ok(reservation)
            })
            .ok_or_else(|| {
                EngineError::LockContended(format!(
                    "Item {} is being updated by another operation",
                    current.item_id
                ))
            })??;

        audit_log!(
            acting.id.as_str(),
            "return",
            format!("reservation:{}", updated.id),
            format!("item:{}", updated.item_id)
        );
        tracing::info!(reservation_id, acting_user_id, "Reservation returned");
        Ok(updated)
    }

    // ========== Queries ==========

    /// Active reservations for one user, longest-outstanding first
    pub fn list_active_for_user(&self, user_id: &str) -> EngineResult<Vec<Reservation>> {
        self.users()
            .find_by_id(user_id)
            .ok_or_else(|| EngineError::UserNotFound(user_id.to_string()))?;
        Ok(self.reservations().find_active_by_user(user_id))
    }

    /// Full history for one user, newest first
    pub fn list_for_user(&self, user_id: &str) -> EngineResult<Vec<Reservation>> {
        self.users()
            .find_by_id(user_id)
            .ok_or_else(|| EngineError::UserNotFound(user_id.to_string()))?;
        Ok(self.reservations().find_by_user(user_id))
    }

    /// Full reservation history, newest first
    pub fn list_all(&self) -> Vec<Reservation> {
        self.reservations().find_all()
    }

    /// Items currently free to reserve, full records, name order
    pub fn available_items(&self) -> Vec<Item> {
        self.items()
            .find_all()
            .into_iter()
            .filter(|item| item.available)
            .collect()
    }

    /// Aggregate counters for the front-desk dashboard
    pub fn dashboard(&self) -> DashboardSnapshot {
        let items = self.items().find_all();
        let available_items = items.iter().filter(|i| i.available).count();
        DashboardSnapshot {
            total_items: items.len(),
            available_items,
            total_reservations: self.reservations().count_all(),
            active_reservations: self.reservations().count_active(),
        }
    }

    // ========== Administrative Operations ==========

    /// Wipe the reservation table and release every held item
    ///
    /// Restricted by the acting policy. Returns counts for the
    /// operator-facing summary.
    pub fn clear_all(&self, acting_user_id: &str) -> EngineResult<ClearOutcome> {
        let acting = self
            .users()
            .find_by_id(acting_user_id)
            .ok_or_else(|| EngineError::UserNotFound(acting_user_id.to_string()))?;

        if !self.policy.may_administer(&acting) {
            security_log!(
                "WARN",
                "admin_denied",
                user_id = acting.id.as_str(),
                action = "clear_reservations"
            );
            return Err(EngineError::PermissionDenied(format!(
                "User {} may not clear the reservation table",
                acting.id
            )));
        }

        let removed = self.reservations().remove_all();
        let active_items: HashSet<&str> = removed
            .iter()
            .filter(|r| r.is_active())
            .map(|r| r.item_id.as_str())
            .collect();

        for item_id in &active_items {
            if let Err(e) = self.items().set_available(item_id, true) {
                tracing::warn!(item_id, error = %e, "Failed to free an item during clear");
            }
            self.availability.release(item_id);
        }

        let outcome = ClearOutcome {
            total_removed: removed.len(),
            active_removed: removed.iter().filter(|r| r.is_active()).count(),
            items_freed: active_items.len(),
        };

        audit_log!(
            acting.id.as_str(),
            "clear",
            "reservations:all",
            format!(
                "removed {} ({} active, {} items freed)",
                outcome.total_removed, outcome.active_removed, outcome.items_freed
            )
        );
        tracing::info!(
            total = outcome.total_removed,
            active = outcome.active_removed,
            "Reservation table cleared"
        );
        Ok(outcome)
    }

    /// Rebuild the availability view from the reservation table
    ///
    /// The reservation table is authoritative. Recomputes the index and
    /// fixes any item whose available flag drifted. Returns the number of
    /// items corrected. Called at startup and safe to run at any time.
    pub fn reconcile(&self) -> usize {
        let reservations = self.reservations().find_all();
        self.availability.rebuild(reservations.iter());

        let mut corrected = 0;
        for item in self.items().find_all() {
            let should_be_available = !self.availability.is_held(&item.id);
            if item.available != should_be_available {
                match self.items().set_available(&item.id, should_be_available) {
                    Ok(_) => corrected += 1,
                    Err(e) => {
                        tracing::warn!(item_id = %item.id, error = %e, "Failed to repair item availability");
                    }
                }
            }
        }
        if corrected > 0 {
            tracing::info!(corrected, "Repaired drifted item availability flags");
        }
        corrected
    }
}

#[cfg(test)]
mod tests;
