//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness probe with runtime counters
//! - [`users`] - user registry (badge holders)
//! - [`items`] - item catalog
//! - [`reservas`] - reservation lifecycle, id-based surface
//! - [`portaria`] - badge-first front desk flows, dashboard, bulk reset
//!
//! Every `/api` handler responds with the [`ApiResponse`] envelope; errors
//! convert through [`AppError`] into the same envelope with a non-zero code.

pub mod convert;

pub mod health;
pub mod portaria;

// Data models API
pub mod items;
pub mod reservas;
pub mod users;

// Re-export common types for handlers
pub use crate::error::{ApiResponse, AppError, AppResult};
