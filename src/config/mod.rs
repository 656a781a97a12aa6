// Configuration module entry point
// Loads the startup configuration and holds the shared application state

mod state;
mod types;

use std::net::SocketAddr;
use std::path::Path;

pub use state::AppState;
pub use types::{
    AssetConfig, Config, LoggingConfig, PerformanceConfig, SensorConfig, ServerConfig,
};

/// Config file used when none is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// The file is optional; `STATION_`-prefixed environment variables
    /// override it, e.g. `STATION_SERVER__PORT=8081`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("STATION").separator("__"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 80)?
            .set_default("server.backlog", 128)?
            .set_default("logging.level", "info")?
            .set_default("logging.tag", "weather-station")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "common")?
            .set_default("performance.keep_alive_timeout", 5)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("performance.max_connections", 7)?
            .set_default("assets.root", "/www")?
            .set_default("assets.default_document", "index.html")?
            .set_default("assets.vendor_prefix", "/vendor/")?
            .set_default("assets.script_extension", ".js")?
            .set_default("assets.chunk_size", 1024)?
            .set_default("sensors.temperature_c", 21.5)?
            .set_default("sensors.humidity_pct", 45.0)?
            .set_default("sensors.pressure_pa", 101_325.0)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Reject configurations the station cannot run with
    ///
    /// A missing default document is not fatal; it is reported by the caller.
    pub fn validate(&self) -> Result<(), String> {
        if self.assets.chunk_size == 0 {
            return Err("assets.chunk_size must be greater than zero".to_string());
        }
        if !self.assets.vendor_prefix.starts_with('/') {
            return Err(format!(
                "assets.vendor_prefix must start with '/': {}",
                self.assets.vendor_prefix
            ));
        }
        if !Path::new(&self.assets.root).is_dir() {
            return Err(format!(
                "Asset root '{}' is missing or not a directory",
                self.assets.root
            ));
        }
        Ok(())
    }
}
