//! HTTP server exposing the user directory and the client assets.

pub mod assets;
pub mod error;
pub mod routes;
pub mod shutdown;

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::directory::{DirectoryError, UserDirectory};
use crate::server::assets::AssetStore;
use crate::server::routes::{build_router, ServerState};
use crate::server::shutdown::ShutdownManager;

/// Errors that stop the server from starting or serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error("Invalid bind address '{addr}'")]
    InvalidAddress { addr: String },

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("try_bind() must be called before run()")]
    NotBound,

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

pub struct AppServer {
    pub addr: SocketAddr,
    /// Populated by try_bind(), consumed by run().
    listener: Option<TcpListener>,
    state: ServerState,
    shutdown: Arc<ShutdownManager>,
}

impl AppServer {
    pub fn new(config: &Config) -> Result<Self, ServerError> {
        let addr = config
            .server
            .bind_addr
            .parse()
            .map_err(|_| ServerError::InvalidAddress {
                addr: config.server.bind_addr.clone(),
            })?;
        let directory = UserDirectory::from_seed(config.directory.seed_file.as_deref())?;
        let assets = AssetStore::new(&config.server.assets_dir);
        Ok(Self::with_state(addr, ServerState::new(directory, assets)))
    }

    pub fn with_state(addr: SocketAddr, state: ServerState) -> Self {
        Self {
            addr,
            listener: None,
            state,
            shutdown: Arc::new(ShutdownManager::new()),
        }
    }

    /// Binds the configured address and keeps the listener until run().
    ///
    /// Returns the actual address, which differs from the configured one
    /// when port 0 was requested.
    pub async fn try_bind(&mut self) -> Result<SocketAddr, ServerError> {
        let listener = TcpListener::bind(self.addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: self.addr,
                source,
            })?;
        self.addr = listener.local_addr()?;
        self.listener = Some(listener);
        tracing::info!("Server bound to {}", self.addr);
        Ok(self.addr)
    }

    pub fn directory(&self) -> UserDirectory {
        self.state.directory.clone()
    }

    pub fn handle(&self) -> ServerHandle {
        ServerHandle {
            shutdown: self.shutdown.clone(),
        }
    }

    /// Serves until shutdown is signalled.
    pub async fn run(self) -> Result<(), ServerError> {
        let listener = self.listener.ok_or(ServerError::NotBound)?;
        tracing::info!("Serving on {}", self.addr);

        let app = build_router(self.state);
        let shutdown = self.shutdown.clone();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                if let Err(err) = shutdown.wait_for_shutdown().await {
                    tracing::error!("Signal handler failed: {err}");
                }
            })
            .into_future()
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

#[derive(Clone)]
pub struct ServerHandle {
    shutdown: Arc<ShutdownManager>,
}

impl ServerHandle {
    pub fn shutdown(&self) {
        self.shutdown.signal_shutdown();
    }
}
