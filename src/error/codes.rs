//! Unified error codes for the portaria service
//!
//! Error codes are shared between the server and the front-desk clients.
//! They are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Badge errors
//! - 2xxx: Permission errors
//! - 3xxx: Reservation errors
//! - 4xxx: Item errors
//! - 5xxx: User errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Badge ====================
    /// Badge code does not resolve to a user
    BadgeNotFound = 1001,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Attendant role required
    AttendantRequired = 2002,

    // ==================== 3xxx: Reservation ====================
    /// Reservation not found
    ReservationNotFound = 3001,
    /// Reservation is not in the RESERVED state
    ReservationNotReserved = 3002,
    /// Reservation is not in the CHECKED_OUT state
    ReservationNotCheckedOut = 3003,
    /// Reservation has already been returned
    ReservationFinalized = 3004,
    /// Acting user does not match the reservation's user
    UserMismatch = 3005,
    /// Lost a concurrency race, safe to retry
    ReservationConflict = 3006,

    // ==================== 4xxx: Item ====================
    /// Item not found
    ItemNotFound = 4001,
    /// Item already has an active reservation
    ItemUnavailable = 4002,
    /// Item is referenced by an active reservation
    ItemHasActiveReservation = 4003,

    // ==================== 5xxx: User ====================
    /// User not found
    UserNotFound = 5001,
    /// Badge code already registered to another user
    BadgeCodeExists = 5002,
    /// User is referenced by an active reservation
    UserHasActiveReservation = 5003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Configuration error
    ConfigError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Check if the caller may safely retry the operation unchanged
    ///
    /// Only concurrency losses are retryable; every other failure needs a
    /// corrected request (different item, different reservation, etc.)
    #[inline]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, ErrorCode::ReservationConflict)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",

            // Badge
            ErrorCode::BadgeNotFound => "Badge code does not resolve to a user",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AttendantRequired => "Attendant role is required",

            // Reservation
            ErrorCode::ReservationNotFound => "Reservation not found",
            ErrorCode::ReservationNotReserved => "Reservation has already been checked out or returned",
            ErrorCode::ReservationNotCheckedOut => "Reservation has not been checked out",
            ErrorCode::ReservationFinalized => "Reservation has already been returned",
            ErrorCode::UserMismatch => "User is not authorized for this reservation",
            ErrorCode::ReservationConflict => "Concurrent update conflict, please retry",

            // Item
            ErrorCode::ItemNotFound => "Item not found",
            ErrorCode::ItemUnavailable => "Item already has an active reservation",
            ErrorCode::ItemHasActiveReservation => "Item is referenced by an active reservation",

            // User
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::BadgeCodeExists => "Badge code is already registered",
            ErrorCode::UserHasActiveReservation => "User still has an active reservation",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),

            // Badge
            1001 => Ok(ErrorCode::BadgeNotFound),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::AttendantRequired),

            // Reservation
            3001 => Ok(ErrorCode::ReservationNotFound),
            3002 => Ok(ErrorCode::ReservationNotReserved),
            3003 => Ok(ErrorCode::ReservationNotCheckedOut),
            3004 => Ok(ErrorCode::ReservationFinalized),
            3005 => Ok(ErrorCode::UserMismatch),
            3006 => Ok(ErrorCode::ReservationConflict),

            // Item
            4001 => Ok(ErrorCode::ItemNotFound),
            4002 => Ok(ErrorCode::ItemUnavailable),
            4003 => Ok(ErrorCode::ItemHasActiveReservation),

            // User
            5001 => Ok(ErrorCode::UserNotFound),
            5002 => Ok(ErrorCode::BadgeCodeExists),
            5003 => Ok(ErrorCode::UserHasActiveReservation),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
