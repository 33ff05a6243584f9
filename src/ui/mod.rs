pub mod app;
pub mod editor;
pub mod effects;
pub mod events;
pub mod footer;
pub mod header;
pub mod input;
pub mod layout;
pub mod mvi;
pub mod render;
pub mod router;
pub mod runtime;
pub mod terminal_guard;
pub mod theme;

/// Screen whose nav button is shown only while logged out.
pub const LOGIN_SCREEN: &str = "login";
/// Screen whose nav button is shown only while logged in; activating it logs out.
pub const LOGOUT_SCREEN: &str = "logout";
