//! Database Models

pub mod item;
pub mod reservation;
pub mod user;

// Re-exports
pub use item::{Item, ItemCategory, ItemCreate, ItemUpdate};
pub use reservation::{Reservation, ReservationStatus};
pub use user::{User, UserCreate, UserRole, UserUpdate};
