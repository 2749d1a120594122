use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::Router;
use tokio::{net::TcpListener, sync::watch, time::sleep};

use crate::models::errors::AppError;
use crate::services::net_discovery;
use crate::utils::config::AppConfig;

/// Delay between producing the upload response and stopping the listener,
/// so the response reaches the client's socket before the server goes away.
pub const SHUTDOWN_DELAY: Duration = Duration::from_secs(1);

/// Cloneable trigger for stopping the server from any task.
#[derive(Clone)]
pub struct ShutdownHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownHandle {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Request shutdown. Idempotent; returns true only for the call that
    /// actually initiated it, so repeat calls stay silent.
    pub fn shutdown(&self) -> bool {
        let already_stopping = self.tx.send_replace(true);
        if !already_stopping {
            tracing::info!("Shutting down the server gracefully...");
        }
        !already_stopping
    }

    /// Spawn a task that sleeps for `delay`, then requests shutdown.
    /// Used by the upload path; never blocks the caller.
    pub fn schedule(&self, delay: Duration) {
        let handle = self.clone();
        tokio::spawn(async move {
            sleep(delay).await;
            handle.shutdown();
        });
    }

    /// Resolve once shutdown has been requested.
    pub async fn triggered(&self) {
        let mut rx = self.tx.subscribe();
        if *rx.borrow() {
            return;
        }
        // The sender lives in self, so changed() cannot see a closed channel.
        let _ = rx.changed().await;
    }
}

impl Default for ShutdownHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns one bind-serve-shutdown cycle. A fresh instance is needed for every
/// cycle; there is no restart path.
pub struct ServerLifecycle {
    config: Arc<AppConfig>,
    shutdown: ShutdownHandle,
}

impl ServerLifecycle {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            shutdown: ShutdownHandle::new(),
        }
    }

    /// Handle for triggering shutdown from other tasks (the upload handler).
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    pub fn shutdown(&self) {
        self.shutdown.shutdown();
    }

    /// Bind and serve until shutdown is requested, then drain in-flight
    /// requests and return. Fails with a bind error if the address is
    /// invalid or unavailable.
    pub async fn start(&self, app: Router) -> Result<(), AppError> {
        let addr: SocketAddr = self.config.bind_address().parse().map_err(|e| {
            AppError::bind_failed(format!(
                "invalid bind address {}: {}",
                self.config.bind_address(),
                e
            ))
        })?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::bind_failed(format!("failed to bind {}: {}", addr, e)))?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| AppError::bind_failed(format!("failed to read bound address: {}", e)))?;

        tracing::info!("Server is running on http://{}", local_addr);
        if addr.ip().is_unspecified() {
            let lan_ips = net_discovery::lan_addresses();
            if !lan_ips.is_empty() {
                tracing::info!("Accessible on the following LAN addresses:");
                for ip in lan_ips {
                    tracing::info!("    http://{}:{}", ip, local_addr.port());
                }
            }
        }

        let shutdown = self.shutdown.clone();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.triggered().await })
            .await
            .map_err(|e| AppError::server_failed(format!("serve loop failed: {}", e)))?;

        tracing::info!("Server has shut down. Exiting...");
        Ok(())
    }
}
