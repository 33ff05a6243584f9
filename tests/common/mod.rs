//! Shared test utilities: a live server on a free port and client fixtures.

#![allow(dead_code, unused_imports)]

use example_spa::client::ApiClient;
use example_spa::config::ClientConfig;
use example_spa::directory::UserDirectory;
use example_spa::server::assets::AssetStore;
use example_spa::server::routes::ServerState;
use example_spa::server::{AppServer, ServerHandle};
use example_spa::session::SessionStore;
use std::net::{SocketAddr, TcpListener};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// The assets shipped with the crate.
pub fn shipped_assets() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("client")
}

/// Writes `(relative path, content)` pairs under a fresh temp dir.
pub fn write_assets(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for (rel, content) in files {
        let path = dir.path().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }
    dir
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub directory: UserDirectory,
    pub handle: ServerHandle,
    task: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn stop(self) {
        self.handle.shutdown();
        let _ = tokio::time::timeout(Duration::from_secs(5), self.task).await;
    }
}

/// Starts a server with the demo users, serving assets from `assets_dir`.
pub async fn start_server(assets_dir: &Path) -> TestServer {
    let directory = UserDirectory::seeded();
    let state = ServerState::new(directory.clone(), AssetStore::new(assets_dir));
    let mut server = AppServer::with_state("127.0.0.1:0".parse().unwrap(), state);
    let addr = server.try_bind().await.expect("Failed to bind test server");
    let handle = server.handle();
    let task = tokio::spawn(async move {
        server.run().await.expect("Server failed");
    });
    TestServer {
        addr,
        directory,
        handle,
        task,
    }
}

pub fn client_config(base_url: &str) -> ClientConfig {
    ClientConfig {
        base_url: base_url.to_string(),
        request_timeout_seconds: 5,
        connect_timeout_seconds: 2,
        ..ClientConfig::default()
    }
}

pub fn api(base_url: &str) -> ApiClient {
    ApiClient::new(&client_config(base_url)).expect("Failed to build client")
}

/// Session store inside `dir`.
pub fn session_in(dir: &TempDir) -> SessionStore {
    SessionStore::new(dir.path().join("session.json"))
}
