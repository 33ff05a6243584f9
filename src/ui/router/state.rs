use crate::ui::mvi::UiState;
use crate::ui::router::template::ScreenTemplate;

/// One named view region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub name: String,
    pub title: String,
    /// `None` until the fragment has been fetched.
    pub content: Option<String>,
    pub visible: bool,
}

impl Screen {
    pub fn content_loaded(&self) -> bool {
        self.content.is_some()
    }
}

/// Nav entry for one screen. Disabled while its screen is current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavButton {
    pub screen: String,
    pub enabled: bool,
    /// Hidden buttons are not shown at all (login while logged in,
    /// logout while logged out).
    pub hidden: bool,
}

/// Where the user is and where they came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub current: Option<String>,
    pub previous: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouterState {
    pub template: ScreenTemplate,
    pub screens: Vec<Screen>,
    pub buttons: Vec<NavButton>,
    pub app: AppState,
    pub app_title: String,
    pub window_title: String,
}

impl UiState for RouterState {}

impl RouterState {
    /// Builds one hidden screen and one enabled nav button per name, in
    /// the given order.
    pub fn initialize(template: ScreenTemplate, names: &[String], app_title: &str) -> Self {
        let screens = names
            .iter()
            .map(|name| Screen {
                name: name.clone(),
                title: capitalize(name),
                content: None,
                visible: false,
            })
            .collect();
        let buttons = names
            .iter()
            .map(|name| NavButton {
                screen: name.clone(),
                enabled: true,
                hidden: false,
            })
            .collect();

        Self {
            template,
            screens,
            buttons,
            app: AppState::default(),
            app_title: app_title.to_string(),
            window_title: app_title.to_string(),
        }
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.screens.iter().any(|s| s.name == name)
    }

    pub fn screen(&self, name: &str) -> Option<&Screen> {
        self.screens.iter().find(|s| s.name == name)
    }

    pub fn button(&self, name: &str) -> Option<&NavButton> {
        self.buttons.iter().find(|b| b.screen == name)
    }

    pub fn current(&self) -> Option<&str> {
        self.app.current.as_deref()
    }

    pub fn previous(&self) -> Option<&str> {
        self.app.previous.as_deref()
    }

    pub fn visible_screen(&self) -> Option<&Screen> {
        self.screens.iter().find(|s| s.visible)
    }

    /// Buttons that are currently shown, in nav order.
    pub fn shown_buttons(&self) -> impl Iterator<Item = &NavButton> {
        self.buttons.iter().filter(|b| !b.hidden)
    }

    /// The visible screen laid out through the template.
    pub fn render_visible(&self) -> Option<String> {
        let screen = self.visible_screen()?;
        Some(
            self.template
                .render(&screen.title, screen.content.as_deref().unwrap_or_default()),
        )
    }
}

/// First letter upper-cased.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalizes_first_letter() {
        assert_eq!(capitalize("home"), "Home");
        assert_eq!(capitalize("é"), "É");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn initialize_registers_every_name_hidden() {
        let names = vec!["home".to_string(), "about".to_string()];
        let state = RouterState::initialize(ScreenTemplate::default(), &names, "App");
        assert_eq!(state.screens.len(), 2);
        assert!(state.screens.iter().all(|s| !s.visible && !s.content_loaded()));
        assert_eq!(state.screen("about").unwrap().title, "About");
        assert!(state.buttons.iter().all(|b| b.enabled && !b.hidden));
        assert_eq!(state.current(), None);
    }
}
