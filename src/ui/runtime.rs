use std::time::Duration;

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::session::SessionStore;
use crate::ui::effects::{bootstrap, AppError, EffectRunner};
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;

const INPUT_POLL: Duration = Duration::from_millis(100);

/// Runs the terminal client until the user quits.
///
/// Startup happens before the terminal is taken over, so a fatal startup
/// error prints normally.
pub async fn run(config: &ClientConfig, start_path: &str) -> Result<(), AppError> {
    let api = ApiClient::new(config)?;
    let session = SessionStore::new(config.session_path());
    let mut app = bootstrap(&api, config, session, start_path).await?;

    let (mut terminal, guard) = setup_terminal()?;
    let mut events = EventHandler::new(INPUT_POLL);
    let mut runner = EffectRunner::new(api, events.sender());

    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        let Some(event) = events.next().await else {
            break;
        };
        match event {
            AppEvent::Key(key) => {
                if let Some(command) = handle_key(&mut app, key) {
                    runner.spawn(command);
                }
            }
            AppEvent::Resize(..) => {}
            AppEvent::Completed(result) => app.apply(result),
        }
    }

    runner.shutdown();
    events.stop();
    drop(guard);
    Ok(())
}
