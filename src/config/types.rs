use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
}

/// Settings for the HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the server (host:port).
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Directory holding `screens/*.inc` fragments and `templates/screen.tmpl`.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,
}

/// Settings for the terminal client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Server base URL (scheme + host + port).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Screens in registration order. Each name is also a nav button.
    #[serde(default = "default_screens")]
    pub screens: Vec<String>,
    /// Screen shown when the address path names no screen.
    #[serde(default = "default_screen")]
    pub default_screen: String,
    /// Shown after the screen title in the window title line.
    #[serde(default = "default_app_title")]
    pub app_title: String,
    /// Total timeout for a single request, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u32,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    /// Where the logged-in user id is persisted. Defaults to the
    /// platform data directory.
    #[serde(default)]
    pub session_file: Option<PathBuf>,
}

/// Settings for the in-memory user directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// JSON array of users to seed the directory with. When absent the
    /// built-in demo users are used.
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("client")
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_screens() -> Vec<String> {
    ["home", "about", "contact", "foods", "login", "logout"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_screen() -> String {
    "home".to_string()
}

fn default_app_title() -> String {
    "Example SPA".to_string()
}

fn default_request_timeout() -> u32 {
    10
}

fn default_connect_timeout() -> u32 {
    5
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            assets_dir: default_assets_dir(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            screens: default_screens(),
            default_screen: default_screen(),
            app_title: default_app_title(),
            request_timeout_seconds: default_request_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            session_file: None,
        }
    }
}

impl ClientConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.request_timeout_seconds))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.connect_timeout_seconds))
    }

    /// Resolved session file path.
    pub fn session_path(&self) -> PathBuf {
        self.session_file.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("example-spa")
                .join("session.json")
        })
    }
}
