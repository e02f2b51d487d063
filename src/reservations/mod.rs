//! Reservation Lifecycle Module
//!
//! This module implements the item hold lifecycle for the front desk:
//!
//! - **engine**: Core ReservationEngine for transitions and admin operations
//! - **locks**: Per-item mutex table serializing transitions
//! - **availability**: Derived item-availability view over the reservation table
//! - **policy**: Authorization seam for acting-on-behalf and admin rights
//!
//! # Architecture
//!
//! ```text
//! Request → ReservationEngine → MemoryStore
//!               │                    │
//!          ItemLockTable      AvailabilityIndex
//!               │                    │
//!          (per-item gate)    (items/disponiveis)
//! ```
//!
//! # Lifecycle
//!
//! 1. `reserve` places a RESERVED hold and pins the item
//! 2. `check_out` hands the item over (CHECKED_OUT)
//! 3. `return_item` ends the hold (RETURNED, terminal) and frees the item
//!
//! At most one active reservation exists per item; the engine enforces it
//! under the item's lock and `reconcile` repairs any drift.

pub mod availability;
pub mod engine;
pub mod locks;
pub mod policy;

// Re-exports
pub use availability::AvailabilityIndex;
pub use engine::{ClearOutcome, DashboardSnapshot, EngineError, EngineResult, ReservationEngine};
pub use locks::ItemLockTable;
pub use policy::{ActingPolicy, RolePolicy};
