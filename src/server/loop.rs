// Server loop module
// Accepts connections until the shutdown signal fires

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// Accept loop of the station's HTTP server
///
/// Returns once `shutdown` is notified. Connections already being served
/// keep running on their own tasks.
///
/// # Errors
///
/// Accept errors are logged and the loop continues; the result is reserved
/// for listener failures.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<Notify>,
) -> std::io::Result<()> {
    let active_connections = Arc::new(AtomicUsize::new(0));
    let local_addr = listener.local_addr()?;

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            () = shutdown.notified() => {
                logger::log_info(&format!(
                    "Stopped accepting on {local_addr}, {} connection(s) still active",
                    active_connections.load(Ordering::SeqCst)
                ));
                return Ok(());
            }
        }
    }
}
