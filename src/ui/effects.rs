//! Runs [`Command`]s against the server and reports their results.

use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinSet;

use crate::client::{ApiClient, ClientError};
use crate::config::ClientConfig;
use crate::session::SessionStore;
use crate::ui::app::{App, Command, CommandResult};
use crate::ui::events::AppEvent;
use crate::ui::router::{ScreenTemplate, TemplateError};

/// Startup failures. All of them abort the client.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Could not fetch the screen template: {0}")]
    TemplateUnavailable(#[source] ClientError),

    #[error(transparent)]
    InvalidTemplate(#[from] TemplateError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),
}

/// Executes one command to completion.
pub async fn execute(api: &ApiClient, command: Command) -> CommandResult {
    match command {
        Command::FetchUser { id, origin } => {
            let result = api.get_user(&id).await;
            CommandResult::UserLoaded { id, origin, result }
        }
        Command::UpdateFood { update, request } => {
            let index = update.index;
            let result = api.update_food(&update).await;
            CommandResult::FoodSaved {
                index,
                request,
                result,
            }
        }
    }
}

/// Builds the app: template, every screen's content in registration
/// order, the account list and any persisted login, then shows the
/// screen named by `start_path`.
pub async fn bootstrap(
    api: &ApiClient,
    config: &ClientConfig,
    session: SessionStore,
    start_path: &str,
) -> Result<App, AppError> {
    let raw = api
        .fetch_template()
        .await
        .map_err(AppError::TemplateUnavailable)?;
    let template = ScreenTemplate::parse(&raw)?;
    let mut app = App::new(config, template, session, start_path);

    for name in &config.screens {
        let content = api.fetch_screen_content(name).await;
        app.on_content_loaded(name, content);
    }

    match api.list_users().await {
        Ok(users) => app.set_users(users),
        Err(err) => tracing::warn!("Could not load users: {err}"),
    }

    if let Some(command) = app.restore_session() {
        let result = execute(api, command).await;
        app.apply(result);
    }

    app.show_initial_screen();
    tracing::info!(
        screen = app.router().current().unwrap_or_default(),
        "Client started"
    );
    Ok(app)
}

/// Spawns commands as tasks and posts their results to the event loop.
pub struct EffectRunner {
    api: ApiClient,
    events: UnboundedSender<AppEvent>,
    tasks: JoinSet<()>,
}

impl EffectRunner {
    pub fn new(api: ApiClient, events: UnboundedSender<AppEvent>) -> Self {
        Self {
            api,
            events,
            tasks: JoinSet::new(),
        }
    }

    pub fn spawn(&mut self, command: Command) {
        while self.tasks.try_join_next().is_some() {}

        let api = self.api.clone();
        let events = self.events.clone();
        self.tasks.spawn(async move {
            let result = execute(&api, command).await;
            if events.send(AppEvent::Completed(result)).is_err() {
                tracing::trace!("Command result dropped (event loop gone)");
            }
        });
    }

    /// Cancels everything in flight.
    pub fn shutdown(&mut self) {
        self.tasks.abort_all();
    }
}
