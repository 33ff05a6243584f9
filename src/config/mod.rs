//! Configuration for the server and the terminal client.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{ClientConfig, Config, DirectoryConfig, ServerConfig};
