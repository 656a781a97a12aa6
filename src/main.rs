use std::path::Path;
use std::sync::Arc;

use tokio::sync::Notify;

use weather_station::config::{self, AppState, Config};
use weather_station::{logger, server, telemetry};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());

    let cfg = Config::load_from(&config_path)?;
    cfg.validate()?;
    logger::init(&cfg)?;

    let index = Path::new(&cfg.assets.root).join(&cfg.assets.default_document);
    if !index.is_file() {
        logger::log_warning(&format!(
            "Default document {} is missing; '/' will answer 500",
            index.display()
        ));
    }

    // Bounded pools: request workers, plus blocking threads for sensor reads
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    if let Some(blocking) = cfg.server.blocking_threads {
        runtime_builder.max_blocking_threads(blocking);
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr, cfg.server.backlog)?;

    let bus = telemetry::sim::simulated_bus(&cfg.sensors);
    let state = Arc::new(AppState::new(cfg, bus)?);

    logger::log_server_start(&addr, &state.config, state.telemetry.models());

    let shutdown = Arc::new(Notify::new());
    server::start_signal_handler(Arc::clone(&shutdown))?;

    server::start_server_loop(listener, state, shutdown).await?;
    logger::log_info("Server stopped");
    Ok(())
}
