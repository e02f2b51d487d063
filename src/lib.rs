//! Portaria Server - front desk item reservation service
//!
//! # Architecture
//!
//! A self-contained HTTP service that tracks who currently holds the keys,
//! remotes and other shared items handed out at a school front desk:
//!
//! - **HTTP API** (`api`): RESTful routes and handlers
//! - **Reservation engine** (`reservations`): the item lifecycle state machine
//! - **Front desk gateway** (`desk`): badge-first operations for attendants
//! - **Storage** (`db`): in-memory store, models and repositories
//!
//! # Module layout
//!
//! ```text
//! src/
//! ├── core/          # Config, state, server
//! ├── api/           # HTTP routes and handlers
//! ├── desk/          # Badge-first front desk gateway
//! ├── reservations/  # Reservation lifecycle engine
//! ├── db/            # In-memory store, models, repositories
//! ├── error/         # Error codes and API envelope
//! └── utils/         # Logging stack
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod desk;
pub mod error;
pub mod reservations;
pub mod utils;

// Re-export common types
pub use core::{Config, Server, ServerState};
pub use db::MemoryStore;
pub use desk::BadgeGateway;
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use reservations::ReservationEngine;

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

/// Load `.env`, then bring up the logging stack from environment variables
///
/// Reads `RUST_LOG` (fallback "info"), `RUST_ENV` (JSON console output when
/// "production") and `PORTARIA_LOG_DIR` (file logging when set).
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let json_console = std::env::var("RUST_ENV")
        .map(|env| env == "production")
        .unwrap_or(false);
    let log_dir = std::env::var("PORTARIA_LOG_DIR").ok();

    init_logger_with_file(&level, json_console, log_dir.as_deref())
}

pub fn print_banner() {
    println!(
        r#"
   ___   ____    ___  ______   ___    ___   ____   ___
  / _ \ / __ \  / _ \/_  __/  / _ |  / _ \ /  _/  / _ |
 / ___// /_/ / / , _/ / /    / __ | / , _/_/ /   / __ |
/_/    \____/ /_/|_| /_/    /_/ |_|/_/|_|/___/  /_/ |_|
    "#
    );
}
