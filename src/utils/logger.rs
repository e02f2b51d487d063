//! Logging Infrastructure
//!
//! Structured logging with three sinks when a log directory is configured:
//!
//! - `app/` - application logs, rotated daily, trimmed after 14 days
//! - `audit/` - audit trail (target `audit`), kept permanently
//! - `security/` - security events (target `security`), kept permanently
//!
//! Console output is pretty in development and JSON in production; file
//! output is always JSON.

use std::fs;
use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

/// How long application log files are kept
const RETENTION_DAYS: i64 = 14;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize the logging system
///
/// # Arguments
/// * `level` - fallback log level when `RUST_LOG` is unset (e.g. "info")
/// * `json_console` - JSON console output (true for production)
/// * `log_dir` - optional directory for file logging
pub fn init_logger_with_file(
    level: &str,
    json_console: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let mut layers: Vec<BoxedLayer> = Vec::new();
    layers.push(env_filter.boxed());

    let console: BoxedLayer = if json_console {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };
    layers.push(console);

    if let Some(dir) = log_dir {
        let log_dir = Path::new(dir);
        let app_dir = log_dir.join("app");
        let audit_dir = log_dir.join("audit");
        let security_dir = log_dir.join("security");
        fs::create_dir_all(&app_dir)?;
        fs::create_dir_all(&audit_dir)?;
        fs::create_dir_all(&security_dir)?;

        // Application log: everything except the permanent sinks
        let app_log = RollingFileAppender::new(Rotation::DAILY, app_dir, "app");
        layers.push(
            fmt::layer()
                .json()
                .with_target(true)
                .with_thread_ids(true)
                .with_writer(std::sync::Mutex::new(app_log))
                .with_filter(filter_fn(|meta| {
                    meta.target() != "audit" && meta.target() != "security"
                }))
                .boxed(),
        );

        // Audit trail, never deleted
        let audit_log = RollingFileAppender::new(Rotation::DAILY, audit_dir, "audit");
        layers.push(
            fmt::layer()
                .json()
                .with_target(true)
                .with_writer(std::sync::Mutex::new(audit_log))
                .with_filter(filter_fn(|meta| meta.target() == "audit"))
                .boxed(),
        );

        // Security events, never deleted
        let security_log = RollingFileAppender::new(Rotation::DAILY, security_dir, "security");
        layers.push(
            fmt::layer()
                .json()
                .with_target(true)
                .with_writer(std::sync::Mutex::new(security_log))
                .with_filter(filter_fn(|meta| meta.target() == "security"))
                .boxed(),
        );

        // The cleanup task needs a runtime; skip it when initialized outside one
        if tokio::runtime::Handle::try_current().is_ok() {
            tokio::spawn(periodic_cleanup(log_dir.to_path_buf()));
        }
    }

    tracing_subscriber::registry().with(layers).init();
    Ok(())
}

/// Initialize the logging system (console only)
pub fn init_logger(level: &str, json_console: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json_console, None)
}

/// Delete application log files older than the retention window
///
/// Only `app/` is trimmed; audit and security logs are kept forever.
pub fn cleanup_old_logs(log_dir: &Path) -> anyhow::Result<()> {
    use chrono::{Local, NaiveDate, TimeZone};

    let cutoff = Local::now() - chrono::Duration::days(RETENTION_DAYS);
    let app_dir = log_dir.join("app");
    if !app_dir.exists() {
        return Ok(());
    }

    for entry in fs::read_dir(app_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        // Daily appender files are named app.YYYY-MM-DD
        let Some(date_part) = name.strip_prefix("app.") else {
            continue;
        };
        let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") else {
            continue;
        };
        let Some(midnight) = date.and_hms_opt(0, 0, 0) else {
            continue;
        };
        let Some(local) = Local.from_local_datetime(&midnight).single() else {
            continue;
        };
        if local < cutoff {
            fs::remove_file(&path)?;
            tracing::info!(file = %name, "Deleted old log file");
        }
    }

    Ok(())
}

/// Hourly cleanup loop for the application log directory
async fn periodic_cleanup(log_dir: PathBuf) {
    use tokio::time::{Duration, sleep};

    loop {
        sleep(Duration::from_secs(3600)).await;

        if let Err(e) = cleanup_old_logs(&log_dir) {
            tracing::error!(error = %e, "Failed to cleanup old logs");
        }
    }
}

/// Audit log helper - records critical business operations
///
/// Audit records target the `audit` sink and are stored permanently when
/// file logging is enabled.
///
/// # Examples
/// ```no_run
/// use portaria_server::audit_log;
///
/// audit_log!("user-1", "reserve", "reservation:42");
/// audit_log!("user-1", "return", "reservation:42", "item:key-101");
/// ```
#[macro_export]
macro_rules! audit_log {
    ($user_id:expr, $action:expr, $resource:expr) => {
        tracing::info!(
            target: "audit",
            user_id = $user_id,
            action = $action,
            resource = $resource,
            timestamp = chrono::Local::now().to_rfc3339(),
            "AUDIT"
        );
    };
    ($user_id:expr, $action:expr, $resource:expr, $details:expr) => {
        tracing::info!(
            target: "audit",
            user_id = $user_id,
            action = $action,
            resource = $resource,
            details = $details,
            timestamp = chrono::Local::now().to_rfc3339(),
            "AUDIT"
        );
    };
}

/// Security log helper - records authorization denials
///
/// # Examples
/// ```no_run
/// use portaria_server::security_log;
///
/// security_log!("WARN", "admin_denied", user_id = "user-1", action = "clear_reservations");
/// ```
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        tracing::warn!(
            target: "security",
            level = $level,
            event = $event,
            timestamp = chrono::Local::now().to_rfc3339(),
            $($key = $value),*
        );
    };
}
