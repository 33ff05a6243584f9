//! View router: screens, nav buttons and navigation history.

mod history;
mod intent;
mod reducer;
mod state;
mod template;

pub use history::{resolve_initial_screen, screen_path, History, APP_PATH_PREFIX};
pub use intent::RouterIntent;
pub use reducer::RouterReducer;
pub use state::{capitalize, AppState, NavButton, RouterState, Screen};
pub use template::{ScreenTemplate, TemplateError};
