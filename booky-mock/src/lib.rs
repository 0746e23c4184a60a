//! Booky Mock - in-memory Booky backend
//!
//! Serves the exchange, library and auth endpoints the client consumes,
//! enforcing the exchange status transition table. Used by integration
//! tests and for local development.

pub mod api;
pub mod config;
pub mod logger;
pub mod state;

pub use api::router;
pub use config::Config;
pub use state::{AppState, MockStore};

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve `state` until the listener fails
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "Booky mock listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Bind 127.0.0.1 on an OS-assigned port and serve in the background
///
/// Returns the bound address and the server task; abort the task to stop.
pub async fn serve_ephemeral(
    state: Arc<AppState>,
) -> anyhow::Result<(SocketAddr, JoinHandle<anyhow::Result<()>>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let handle = tokio::spawn(serve(listener, state));
    Ok((addr, handle))
}
