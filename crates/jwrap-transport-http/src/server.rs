//! HTTP server that binds an axum Router to a TCP socket.

use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::error::HttpTransportError;
use crate::router::{build_router, AppState, PROBE_PATHS};

/// Axum-based HTTP server for the jwrap endpoint.
pub struct HttpServer<T> {
    pub(crate) addr: SocketAddr,
    pub(crate) path: String,
    pub(crate) state: AppState<T>,
}

impl<T> HttpServer<T>
where
    T: Send + Sync + 'static,
{
    /// Creates a new HTTP server.
    ///
    /// # Arguments
    ///
    /// * `state` : target, registry and policies shared by all requests
    /// * `host` / `port` : listen address
    /// * `path` : route of the endpoint, e.g. `/json`
    ///
    /// # Errors
    ///
    /// Returns an error if the address does not parse, or the path is not
    /// absolute or collides with a health probe.
    pub fn new(
        state: AppState<T>,
        host: &str,
        port: u16,
        path: &str,
    ) -> Result<Self, HttpTransportError> {
        let raw = format!("{host}:{port}");
        let addr = raw
            .parse::<SocketAddr>()
            .map_err(|source| HttpTransportError::InvalidAddress { addr: raw, source })?;
        if !path.starts_with('/') {
            return Err(HttpTransportError::InvalidPath(path.to_string()));
        }
        if PROBE_PATHS.iter().any(|probe| *probe == path) {
            return Err(HttpTransportError::ReservedPath(path.to_string()));
        }
        Ok(Self {
            addr,
            path: path.to_string(),
            state,
        })
    }

    /// Starts the server and blocks until it exits.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP bind fails or the server crashes.
    pub async fn run(self) -> Result<(), HttpTransportError> {
        let listener =
            TcpListener::bind(self.addr)
                .await
                .map_err(|e| HttpTransportError::Bind {
                    addr: self.addr.to_string(),
                    source: e,
                })?;

        tracing::info!(addr = %self.addr, path = %self.path, "jwrap HTTP server ready");

        let router = build_router(self.state, &self.path);
        axum::serve(listener, router)
            .await
            .map_err(|e| HttpTransportError::Serve(e.to_string()))?;

        Ok(())
    }
}
