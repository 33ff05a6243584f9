use crate::client::ClientError;
use crate::config::ClientConfig;
use crate::model::{FoodUpdate, User};
use crate::session::SessionStore;
use crate::ui::editor::{favourites_sentence, EditorIntent, EditorReducer, EditorState};
use crate::ui::mvi::Reducer;
use crate::ui::router::{
    resolve_initial_screen, screen_path, History, RouterIntent, RouterReducer, RouterState,
    ScreenTemplate,
};
use crate::ui::{LOGIN_SCREEN, LOGOUT_SCREEN};

/// Replaced with the logged-in user's name in screen content.
pub const USERNAME_MARKER: &str = "{username}";
/// Replaced with the favourites sentence in screen content.
pub const FAVOURITES_MARKER: &str = "{favourites}";
/// Screen hosts the selectable account list.
pub const USER_LIST_MARKER: &str = "{userlist}";
/// Screen hosts the food editor rows.
pub const FOOD_EDITOR_MARKER: &str = "{foods}";

const GUEST_NAME: &str = "guest";
const LOGGED_OUT_FAVOURITES: &str = "Log in to see your favourite foods.";

/// Work that needs the network. Executed by `ui::effects`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchUser { id: String, origin: LoginOrigin },
    UpdateFood { update: FoodUpdate, request: u64 },
}

/// Why a user is being fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOrigin {
    /// Persisted id found at startup.
    Restored,
    /// Picked from the account list.
    Selected,
}

/// Completion of a [`Command`].
#[derive(Debug)]
pub enum CommandResult {
    UserLoaded {
        id: String,
        origin: LoginOrigin,
        result: Result<Option<User>, ClientError>,
    },
    FoodSaved {
        index: usize,
        request: u64,
        result: Result<User, ClientError>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Focus {
    Nav,
    Body,
}

/// Interactive part of a screen, declared by a marker in its content.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Widget {
    UserList,
    FoodEditor,
}

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

pub struct App {
    should_quit: bool,
    focus: Focus,
    /// Screens, nav buttons and current/previous screen (MVI pattern).
    router: RouterState,
    /// Food rows and save state (MVI pattern).
    editor: EditorState,
    history: History,
    session: SessionStore,
    default_screen: String,
    users: Vec<User>,
    /// Cached copy of the logged-in user. The server owns the record.
    user: Option<User>,
    notice: Option<String>,
    nav_selection: usize,
    list_selection: usize,
}

impl App {
    /// Registers every configured screen. `start_path` is the address the
    /// client was opened at, e.g. `/app/foods`.
    pub fn new(
        config: &ClientConfig,
        template: ScreenTemplate,
        session: SessionStore,
        start_path: &str,
    ) -> Self {
        let mut router = RouterState::initialize(template, &config.screens, &config.app_title);
        router = RouterReducer::reduce(router, RouterIntent::SessionChanged { logged_in: false });
        Self {
            should_quit: false,
            focus: Focus::Nav,
            router,
            editor: EditorState::default(),
            history: History::new(start_path),
            session,
            default_screen: config.default_screen.clone(),
            users: Vec::new(),
            user: None,
            notice: None,
            nav_selection: 0,
            list_selection: 0,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn router(&self) -> &RouterState {
        &self.router
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn nav_selection(&self) -> usize {
        self.nav_selection
    }

    pub fn list_selection(&self) -> usize {
        self.list_selection
    }

    /// Favourites sentence for the logged-in user.
    pub fn favourites(&self) -> Option<String> {
        self.user.as_ref().map(|u| favourites_sentence(&u.foods))
    }

    // -- Startup --------------------------------------------------------------

    pub fn on_content_loaded(&mut self, name: &str, content: String) {
        dispatch_mvi!(
            self,
            router,
            RouterReducer,
            RouterIntent::ContentLoaded {
                name: name.to_string(),
                content,
            }
        );
    }

    pub fn set_users(&mut self, users: Vec<User>) {
        self.users = users;
        self.list_selection = 0;
    }

    /// Fetch for a persisted login, if there is one.
    pub fn restore_session(&mut self) -> Option<Command> {
        match self.session.load() {
            Ok(Some(id)) => Some(Command::FetchUser {
                id,
                origin: LoginOrigin::Restored,
            }),
            Ok(None) => None,
            Err(err) => {
                tracing::warn!("Ignoring unreadable session: {err}");
                None
            }
        }
    }

    /// Shows the screen named by the start address and makes the current
    /// history entry point at it.
    pub fn show_initial_screen(&mut self) {
        let name = self.reachable_screen(self.resolve_initial_screen(self.history.current()));
        self.navigate_to(&name);
        if let Some(current) = self.router.current() {
            self.history.replace(screen_path(current));
        }
        self.sync_nav_selection();
    }

    // -- Navigation -----------------------------------------------------------

    /// `name` if it is registered and its nav button is shown, else the
    /// default screen. Keeps addresses from opening the login screen while
    /// logged in or the logout screen while logged out.
    fn reachable_screen(&self, name: String) -> String {
        match self.router.button(&name) {
            Some(button) if !button.hidden => name,
            _ => self.default_screen.clone(),
        }
    }

    pub fn resolve_initial_screen(&self, path: &str) -> String {
        resolve_initial_screen(path, &self.default_screen)
    }

    /// Shows `name`. Unregistered names are ignored.
    pub fn navigate_to(&mut self, name: &str) {
        dispatch_mvi!(
            self,
            router,
            RouterReducer,
            RouterIntent::NavigateTo {
                name: name.to_string(),
            }
        );
        self.list_selection = 0;
    }

    /// Pushes the current screen's path onto the history stack.
    pub fn record_history_entry(&mut self) {
        if let Some(current) = self.router.current() {
            self.history.push(screen_path(current));
        }
    }

    /// Nav button press. Disabled and hidden buttons do nothing; the
    /// logout button logs out.
    pub fn go_to(&mut self, name: &str) {
        let Some(button) = self.router.button(name) else {
            return;
        };
        if !button.enabled || button.hidden {
            return;
        }
        if name == LOGOUT_SCREEN {
            self.logout();
            return;
        }
        self.navigate_to(name);
        self.record_history_entry();
        self.sync_nav_selection();
    }

    pub fn back(&mut self) {
        if let Some(path) = self.history.back().map(str::to_string) {
            self.on_history_pop(&path);
        }
    }

    pub fn forward(&mut self) {
        if let Some(path) = self.history.forward().map(str::to_string) {
            self.on_history_pop(&path);
        }
    }

    /// Replays navigation for a history entry without recording a new one.
    pub fn on_history_pop(&mut self, path: &str) {
        let name = self.reachable_screen(self.resolve_initial_screen(path));
        self.navigate_to(&name);
        self.sync_nav_selection();
    }

    // -- Session --------------------------------------------------------------

    pub fn login(&mut self, id: &str) -> Command {
        Command::FetchUser {
            id: id.to_string(),
            origin: LoginOrigin::Selected,
        }
    }

    /// Forgets the user and returns to the default screen.
    pub fn logout(&mut self) {
        if let Err(err) = self.session.clear() {
            tracing::warn!("Failed to clear session: {err}");
        }
        self.user = None;
        self.notice = None;
        dispatch_mvi!(self, editor, EditorReducer, EditorIntent::Build { items: Vec::new() });
        dispatch_mvi!(
            self,
            router,
            RouterReducer,
            RouterIntent::SessionChanged { logged_in: false }
        );
        let home = self.default_screen.clone();
        self.navigate_to(&home);
        self.record_history_entry();
        self.sync_nav_selection();
    }

    fn populate_user(&mut self, user: User) {
        dispatch_mvi!(
            self,
            editor,
            EditorReducer,
            EditorIntent::Build {
                items: user.foods.clone(),
            }
        );
        dispatch_mvi!(
            self,
            router,
            RouterReducer,
            RouterIntent::SessionChanged { logged_in: true }
        );
        self.user = Some(user);
    }

    /// Where to go after logging in: back where the user came from,
    /// unless that was a session screen.
    fn return_screen(&self) -> String {
        match self.router.previous() {
            Some(prev) if prev != LOGIN_SCREEN && prev != LOGOUT_SCREEN => prev.to_string(),
            _ => self.default_screen.clone(),
        }
    }

    // -- Editing --------------------------------------------------------------

    pub fn edit_row(&mut self, index: usize, value: impl Into<String>) {
        dispatch_mvi!(
            self,
            editor,
            EditorReducer,
            EditorIntent::InputChanged {
                index,
                value: value.into(),
            }
        );
    }

    /// Starts saving row `index`.
    ///
    /// Returns the update to send, or `None` when the save was refused:
    /// another save is in flight, the row does not exist, or the payload
    /// is invalid (reported as a failed save).
    pub fn save(&mut self, index: usize) -> Option<Command> {
        if self.editor.is_saving() {
            self.notice = Some("A save is already in progress".to_string());
            return None;
        }
        let value = self.editor.row(index)?.input.clone();
        let user_id = self.user.as_ref().map(|u| u.id.as_str());

        match FoodUpdate::new(user_id, &value, Some(index)) {
            Ok(update) => {
                dispatch_mvi!(self, editor, EditorReducer, EditorIntent::SaveStarted { index });
                let request = self.editor.in_flight.as_ref()?.request;
                Some(Command::UpdateFood { update, request })
            }
            Err(err) => {
                tracing::warn!(index, "Save rejected: {err}");
                dispatch_mvi!(self, editor, EditorReducer, EditorIntent::SaveRejected { index });
                None
            }
        }
    }

    // -- Command results ------------------------------------------------------

    /// Applies a finished command.
    pub fn apply(&mut self, result: CommandResult) {
        match result {
            CommandResult::UserLoaded { id, origin, result } => {
                self.on_user_loaded(&id, origin, result);
            }
            CommandResult::FoodSaved {
                index,
                request,
                result,
            } => {
                if !self.editor.in_flight.as_ref().is_some_and(|s| s.request == request) {
                    tracing::debug!(index, request, "Dropping result of a superseded save");
                    return;
                }
                match result {
                    Ok(user) => {
                        if self.user.as_ref().is_some_and(|u| u.id == user.id) {
                            self.user = Some(user);
                        }
                        dispatch_mvi!(self, editor, EditorReducer, EditorIntent::SaveSucceeded { request });
                    }
                    Err(err) => {
                        tracing::warn!(index, "Save failed: {err}");
                        dispatch_mvi!(self, editor, EditorReducer, EditorIntent::SaveFailed { request });
                    }
                }
            }
        }
    }

    fn on_user_loaded(
        &mut self,
        id: &str,
        origin: LoginOrigin,
        result: Result<Option<User>, ClientError>,
    ) {
        match (origin, result) {
            (LoginOrigin::Selected, Ok(Some(user))) => {
                if let Err(err) = self.session.save(&user.id) {
                    tracing::warn!("Failed to persist session: {err}");
                }
                tracing::info!(user = %user.id, "Logged in");
                self.notice = None;
                self.populate_user(user);
                let target = self.return_screen();
                self.navigate_to(&target);
                self.record_history_entry();
                self.sync_nav_selection();
            }
            (LoginOrigin::Restored, Ok(Some(user))) => {
                tracing::info!(user = %user.id, "Restored session");
                self.populate_user(user);
            }
            (LoginOrigin::Restored, Ok(None)) => {
                tracing::info!(user = %id, "Persisted user no longer exists");
                if let Err(err) = self.session.clear() {
                    tracing::warn!("Failed to clear session: {err}");
                }
            }
            (LoginOrigin::Restored, Err(err)) => {
                tracing::warn!(user = %id, "Could not restore session: {err}");
            }
            (LoginOrigin::Selected, Ok(None)) => {
                self.notice = Some(format!("No user with id {id}"));
            }
            (LoginOrigin::Selected, Err(err)) => {
                tracing::warn!(user = %id, "Login failed: {err}");
                self.notice = Some("Could not log in".to_string());
            }
        }
    }

    // -- View helpers ---------------------------------------------------------

    /// Interactive widget on the visible screen, if any.
    pub fn widget(&self) -> Option<Widget> {
        let content = self.router.visible_screen()?.content.as_deref()?;
        if content.contains(USER_LIST_MARKER) {
            Some(Widget::UserList)
        } else if content.contains(FOOD_EDITOR_MARKER) {
            Some(Widget::FoodEditor)
        } else {
            None
        }
    }

    /// Visible screen laid out through the template, with user fields
    /// filled in and widget markers removed.
    pub fn body_text(&self) -> Option<String> {
        let text = self.router.render_visible()?;
        let name = self.user.as_ref().map_or(GUEST_NAME, |u| u.name.as_str());
        let favourites = self
            .favourites()
            .unwrap_or_else(|| LOGGED_OUT_FAVOURITES.to_string());
        Some(
            text.replace(USERNAME_MARKER, name)
                .replace(FAVOURITES_MARKER, &favourites)
                .replace(USER_LIST_MARKER, "")
                .replace(FOOD_EDITOR_MARKER, ""),
        )
    }

    // -- Keyboard selection ---------------------------------------------------

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Nav if self.widget().is_some() => Focus::Body,
            _ => Focus::Nav,
        };
    }

    pub fn move_nav_selection(&mut self, delta: isize) {
        let count = self.router.shown_buttons().count();
        self.nav_selection = wrap(self.nav_selection, delta, count);
    }

    /// Presses the selected nav button.
    pub fn activate_nav(&mut self) {
        let Some(name) = self
            .router
            .shown_buttons()
            .nth(self.nav_selection)
            .map(|b| b.screen.clone())
        else {
            return;
        };
        self.go_to(&name);
    }

    pub fn move_list_selection(&mut self, delta: isize) {
        let count = match self.widget() {
            Some(Widget::UserList) => self.users.len(),
            Some(Widget::FoodEditor) => self.editor.rows.len(),
            None => 0,
        };
        self.list_selection = wrap(self.list_selection, delta, count);
    }

    /// Enter on the body: log in as the selected user, or save the
    /// selected row if its save control is enabled.
    pub fn activate_list(&mut self) -> Option<Command> {
        match self.widget()? {
            Widget::UserList => {
                let id = self.users.get(self.list_selection)?.id.clone();
                Some(self.login(&id))
            }
            Widget::FoodEditor => {
                let row = self.editor.row(self.list_selection)?;
                if !row.save_enabled {
                    return None;
                }
                self.save(self.list_selection)
            }
        }
    }

    pub fn type_char(&mut self, c: char) {
        if self.widget() != Some(Widget::FoodEditor) {
            return;
        }
        if let Some(row) = self.editor.row(self.list_selection) {
            let mut value = row.input.clone();
            value.push(c);
            self.edit_row(self.list_selection, value);
        }
    }

    pub fn backspace(&mut self) {
        if self.widget() != Some(Widget::FoodEditor) {
            return;
        }
        if let Some(row) = self.editor.row(self.list_selection) {
            let mut value = row.input.clone();
            if value.pop().is_some() {
                self.edit_row(self.list_selection, value);
            }
        }
    }

    /// Points the nav selection at the current screen and leaves the body
    /// if the new screen has nothing to interact with.
    fn sync_nav_selection(&mut self) {
        let current = self.router.current().map(str::to_string);
        if let Some(pos) = self
            .router
            .shown_buttons()
            .position(|b| Some(&b.screen) == current.as_ref())
        {
            self.nav_selection = pos;
        } else {
            let count = self.router.shown_buttons().count();
            self.nav_selection = self.nav_selection.min(count.saturating_sub(1));
        }
        if self.widget().is_none() {
            self.focus = Focus::Nav;
        }
    }
}

fn wrap(current: usize, delta: isize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let count = count as isize;
    let next = (current as isize + delta).rem_euclid(count);
    next as usize
}
