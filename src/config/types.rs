// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub assets: AssetConfig,
    pub sensors: SensorConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Async worker threads, one per CPU core if unset
    pub workers: Option<usize>,
    /// Upper bound for threads doing blocking sensor and file I/O
    pub blocking_threads: Option<usize>,
    /// Listen backlog
    pub backlog: i32,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// Prefix of every operational log line
    pub tag: String,
    pub access_log: bool,
    /// Access log format (`common` or `json`)
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// Static asset configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AssetConfig {
    /// Mount point of the read-only asset filesystem
    pub root: String,
    /// Document served for `/`
    pub default_document: String,
    /// Scripts under this prefix are served from their `.gz` variant
    pub vendor_prefix: String,
    pub script_extension: String,
    /// Maximum bytes per transmitted chunk
    pub chunk_size: usize,
}

/// Base values for the simulated sensor devices
#[derive(Debug, Deserialize, Clone)]
pub struct SensorConfig {
    pub temperature_c: f32,
    pub humidity_pct: f32,
    pub pressure_pa: f32,
}
