pub mod client;
pub mod config;
pub mod directory;
pub mod logging;
pub mod model;
pub mod server;
pub mod session;
pub mod ui;
