use crate::error::{AppError, ErrorCode};
use thiserror::Error;

/// Engine errors
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Reservation not found: {0}")]
    ReservationNotFound(String),

    #[error("Item is already reserved: {0}")]
    ItemUnavailable(String),

    #[error("Reservation is not awaiting check-out: {0}")]
    NotReserved(String),

    #[error("Reservation is not checked out: {0}")]
    NotCheckedOut(String),

    #[error("Reservation already returned: {0}")]
    Finalized(String),

    #[error("Acting user does not own the reservation: {0}")]
    UserMismatch(String),

    #[error("Operation not permitted: {0}")]
    PermissionDenied(String),

    #[error("Item is locked by another operation: {0}")]
    LockContended(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::UserNotFound(id) => AppError::user_not_found(id),
            EngineError::ItemNotFound(id) => AppError::item_not_found(id),
            EngineError::ReservationNotFound(id) => AppError::reservation_not_found(id),
            EngineError::ItemUnavailable(msg) => {
                AppError::with_message(ErrorCode::ItemUnavailable, msg)
            }
            EngineError::NotReserved(msg) => {
                AppError::with_message(ErrorCode::ReservationNotReserved, msg)
            }
            EngineError::NotCheckedOut(msg) => {
                AppError::with_message(ErrorCode::ReservationNotCheckedOut, msg)
            }
            EngineError::Finalized(id) => {
                AppError::with_message(
                    ErrorCode::ReservationFinalized,
                    format!("Reservation already returned: {id}"),
                )
                .with_detail("reservationId", id)
            }
            EngineError::UserMismatch(msg) => AppError::user_mismatch(msg),
            EngineError::PermissionDenied(msg) => AppError::permission_denied(msg),
            EngineError::LockContended(msg) => AppError::conflict(msg),
            EngineError::Internal(msg) => {
                tracing::error!(error = %msg, "Engine internal error");
                AppError::internal(msg)
            }
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
