use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum RouterIntent {
    /// Fragment for `name` arrived.
    ContentLoaded { name: String, content: String },
    /// Show `name`. Unregistered names are ignored.
    NavigateTo { name: String },
    /// Swap login/logout buttons for the session state.
    SessionChanged { logged_in: bool },
}

impl Intent for RouterIntent {}
