use crate::ui::mvi::Reducer;
use crate::ui::router::intent::RouterIntent;
use crate::ui::router::state::RouterState;
use crate::ui::LOGIN_SCREEN;
use crate::ui::LOGOUT_SCREEN;

pub struct RouterReducer;

impl Reducer for RouterReducer {
    type State = RouterState;
    type Intent = RouterIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            RouterIntent::ContentLoaded { name, content } => {
                if let Some(screen) = state.screens.iter_mut().find(|s| s.name == name) {
                    screen.content = Some(content);
                }
                state
            }
            RouterIntent::NavigateTo { name } => {
                if !state.is_registered(&name) {
                    return state;
                }

                let mut title = String::new();
                for screen in &mut state.screens {
                    screen.visible = screen.name == name;
                    if screen.visible {
                        title.clone_from(&screen.title);
                    }
                }
                for button in &mut state.buttons {
                    button.enabled = button.screen != name;
                }

                // Re-showing the current screen keeps where the user came from.
                if state.app.current.as_deref() != Some(name.as_str()) {
                    state.app.previous = state.app.current.take();
                    state.app.current = Some(name);
                }
                state.window_title = format!("{} - {}", title, state.app_title);
                state
            }
            RouterIntent::SessionChanged { logged_in } => {
                for button in &mut state.buttons {
                    if button.screen == LOGIN_SCREEN {
                        button.hidden = logged_in;
                    } else if button.screen == LOGOUT_SCREEN {
                        button.hidden = !logged_in;
                    }
                }
                state
            }
        }
    }
}
