// Application state module
// Everything a request handler needs, built once at startup and shared read-only

use std::sync::Arc;

use super::types::Config;
use crate::assets::{AssetResolver, ChunkedFileTransmitter};
use crate::handler::{self, Endpoint};
use crate::routing::{RouteError, Router};
use crate::telemetry::{SensorBus, TelemetryBridge};

/// Application state
pub struct AppState {
    pub config: Config,
    pub routes: Router<Endpoint>,
    pub resolver: AssetResolver,
    pub transmitter: ChunkedFileTransmitter,
    pub telemetry: Arc<TelemetryBridge>,
    pub access_log: bool,
}

impl AppState {
    /// Build the state around an initialized sensor bus
    ///
    /// Fails only if the route table is inconsistent.
    pub fn new(config: Config, bus: SensorBus) -> Result<Self, RouteError> {
        let routes = handler::build_routes()?;
        let resolver = AssetResolver::new(&config.assets);
        let transmitter = ChunkedFileTransmitter::new(config.assets.chunk_size);
        let access_log = config.logging.access_log;

        Ok(Self {
            config,
            routes,
            resolver,
            transmitter,
            telemetry: Arc::new(TelemetryBridge::new(bus)),
            access_log,
        })
    }
}
