use std::time::Duration;

/// Server configuration
///
/// # Environment variables
///
/// Every setting can be overridden through the environment:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | PORTARIA_HOST | 0.0.0.0 | Bind address |
/// | PORTARIA_PORT | 8080 | HTTP API port |
/// | PORTARIA_LOG_DIR | (unset) | Directory for rolling log files; console only when unset |
/// | PORTARIA_LOCK_WAIT_MS | 200 | Bounded wait for a contended item lock (ms) |
/// | PORTARIA_REQUEST_TIMEOUT_MS | 30000 | Request timeout (ms) |
/// | PORTARIA_MAX_CONNECTIONS | 1000 | Concurrently processed request cap |
/// | PORTARIA_SEED_DEMO_DATA | false | Seed demo users/items into an empty store |
/// | RUST_ENV | development | Runtime environment |
///
/// # Example
///
/// ```ignore
/// PORTARIA_PORT=9090 PORTARIA_SEED_DEMO_DATA=true cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address for the HTTP listener
    pub host: String,
    /// HTTP API port
    pub http_port: u16,
    /// Log directory; `None` keeps logging on the console only
    pub log_dir: Option<String>,
    /// How long a lifecycle operation waits for a contended item lock (ms)
    pub lock_wait_ms: u64,
    /// Request timeout applied to every route (ms)
    pub request_timeout_ms: u64,
    /// Cap on concurrently processed requests
    pub max_connections: usize,
    /// Seed demo users and items into an empty store at startup
    pub seed_demo_data: bool,
    /// Runtime environment: development | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to their defaults.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("PORTARIA_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            http_port: std::env::var("PORTARIA_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            log_dir: std::env::var("PORTARIA_LOG_DIR").ok(),
            lock_wait_ms: std::env::var("PORTARIA_LOCK_WAIT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(200),
            request_timeout_ms: std::env::var("PORTARIA_REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            max_connections: std::env::var("PORTARIA_MAX_CONNECTIONS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(1000),
            seed_demo_data: std::env::var("PORTARIA_SEED_DEMO_DATA")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            environment: std::env::var("RUST_ENV").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Override the knobs tests care about
    pub fn with_overrides(http_port: u16, lock_wait_ms: u64) -> Self {
        let mut config = Self::from_env();
        config.http_port = http_port;
        config.lock_wait_ms = lock_wait_ms;
        config.seed_demo_data = false;
        config
    }

    /// Bounded item-lock wait as a [`Duration`]
    pub fn lock_wait(&self) -> Duration {
        Duration::from_millis(self.lock_wait_ms)
    }

    /// Request timeout as a [`Duration`]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Running in production?
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Running in development?
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
