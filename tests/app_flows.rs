mod common;

use common::{api, client_config, session_in, shipped_assets, start_server, TestServer};
use example_spa::client::ApiClient;
use example_spa::ui::app::{App, Widget};
use example_spa::ui::editor::SaveStatus;
use example_spa::ui::effects::{bootstrap, execute, AppError};
use tempfile::TempDir;

struct Harness {
    server: TestServer,
    api: ApiClient,
    session_dir: TempDir,
}

impl Harness {
    async fn start() -> Self {
        let server = start_server(&shipped_assets()).await;
        let api = api(&server.base_url());
        Self {
            server,
            api,
            session_dir: TempDir::new().unwrap(),
        }
    }

    async fn app_at(&self, path: &str) -> App {
        let config = client_config(&self.server.base_url());
        bootstrap(&self.api, &config, session_in(&self.session_dir), path)
            .await
            .expect("bootstrap failed")
    }

    async fn login(&self, app: &mut App, name: &str) {
        app.go_to("login");
        assert_eq!(app.widget(), Some(Widget::UserList));
        let id = app
            .users()
            .iter()
            .find(|u| u.name == name)
            .map(|u| u.id.clone())
            .unwrap();
        let command = app.login(&id);
        app.apply(execute(&self.api, command).await);
    }

    async fn save(&self, app: &mut App, index: usize) {
        let command = app.save(index).expect("save refused");
        app.apply(execute(&self.api, command).await);
    }
}

#[tokio::test]
async fn starts_on_default_screen_logged_out() {
    let h = Harness::start().await;
    let app = h.app_at("/app/").await;

    let router = app.router();
    assert_eq!(router.current(), Some("home"));
    assert_eq!(router.window_title, "Home - Example SPA");
    assert_eq!(router.screens.iter().filter(|s| s.visible).count(), 1);
    assert!(router.screens.iter().all(|s| s.content_loaded()));
    assert!(!router.button("home").unwrap().enabled);
    assert!(!router.button("login").unwrap().hidden);
    assert!(router.button("logout").unwrap().hidden);

    let body = app.body_text().unwrap();
    assert!(body.starts_with("== Home =="), "{body}");
    assert!(body.contains("Hello, guest."), "{body}");
    assert_eq!(app.history().current(), "/app/home");

    h.server.stop().await;
}

#[tokio::test]
async fn deep_link_opens_named_screen() {
    let h = Harness::start().await;

    let app = h.app_at("/app/about").await;
    assert_eq!(app.router().current(), Some("about"));

    let app = h.app_at("/app/nowhere").await;
    assert_eq!(app.router().current(), Some("home"));

    let app = h.app_at("/somewhere/else").await;
    assert_eq!(app.router().current(), Some("home"));

    let app = h.app_at("/app/logout").await;
    assert_eq!(app.router().current(), Some("home"));

    h.server.stop().await;
}

#[tokio::test]
async fn login_returns_to_previous_screen() {
    let h = Harness::start().await;
    let mut app = h.app_at("/app/about").await;

    h.login(&mut app, "Matt").await;

    assert_eq!(app.user().map(|u| u.name.as_str()), Some("Matt"));
    assert_eq!(app.router().current(), Some("about"));
    assert!(app.router().button("login").unwrap().hidden);
    assert!(!app.router().button("logout").unwrap().hidden);
    assert_eq!(
        session_in(&h.session_dir).load().unwrap().as_deref(),
        Some("1")
    );

    app.go_to("home");
    let body = app.body_text().unwrap();
    assert!(body.contains("Hello, Matt."), "{body}");
    assert!(
        body.contains("Your favourite foods are: cheese, pie, and sausage."),
        "{body}"
    );

    h.server.stop().await;
}

#[tokio::test]
async fn editing_a_row_updates_the_sentence() {
    let h = Harness::start().await;
    let mut app = h.app_at("/app/").await;
    h.login(&mut app, "Matt").await;

    app.go_to("foods");
    assert_eq!(app.widget(), Some(Widget::FoodEditor));
    assert_eq!(app.editor().rows.len(), 3);

    app.edit_row(1, "gravy");
    assert_eq!(app.editor().enabled_rows(), vec![1]);
    h.save(&mut app, 1).await;

    assert_eq!(app.editor().status, SaveStatus::Saved);
    assert!(app.editor().enabled_rows().is_empty());
    assert_eq!(
        app.favourites().as_deref(),
        Some("Your favourite foods are: cheese, gravy, and sausage.")
    );
    assert_eq!(
        h.server.directory.get_user("1").unwrap().foods,
        ["cheese", "gravy", "sausage"]
    );

    h.server.stop().await;
}

#[tokio::test]
async fn failed_save_reports_and_keeps_edit() {
    let h = Harness::start().await;
    let mut app = h.app_at("/app/").await;
    h.login(&mut app, "George").await;
    app.go_to("foods");

    app.edit_row(2, "beans");
    let command = app.save(2).unwrap();
    assert!(app.save(0).is_none());

    let stopped = api(&format!("http://127.0.0.1:{}", common::free_port()));
    app.apply(execute(&stopped, command).await);

    assert_eq!(app.editor().status, SaveStatus::Failed);
    assert_eq!(app.editor().status.message(), Some("Could not save"));
    assert_eq!(app.editor().row(2).unwrap().input, "beans");
    assert!(app.editor().row(2).unwrap().save_enabled);
    assert_eq!(
        app.favourites().as_deref(),
        Some("Your favourite foods are: carrot, cake, and tomato.")
    );

    h.server.stop().await;
}

#[tokio::test]
async fn history_back_and_forward() {
    let h = Harness::start().await;
    let mut app = h.app_at("/app/").await;

    app.go_to("about");
    app.go_to("contact");
    assert_eq!(app.history().len(), 3);

    app.back();
    assert_eq!(app.router().current(), Some("about"));
    app.back();
    assert_eq!(app.router().current(), Some("home"));
    app.back();
    assert_eq!(app.router().current(), Some("home"));

    app.forward();
    assert_eq!(app.router().current(), Some("about"));
    assert_eq!(app.history().len(), 3);

    app.go_to("foods");
    assert_eq!(app.history().len(), 3);
    app.forward();
    assert_eq!(app.router().current(), Some("foods"));

    h.server.stop().await;
}

#[tokio::test]
async fn persisted_session_is_restored() {
    let h = Harness::start().await;
    session_in(&h.session_dir).save("3").unwrap();

    let app = h.app_at("/app/").await;
    assert_eq!(app.user().map(|u| u.name.as_str()), Some("Mildred"));
    assert!(app.router().button("login").unwrap().hidden);
    assert_eq!(app.editor().rows.len(), 3);

    h.server.stop().await;
}

#[tokio::test]
async fn stale_session_is_cleared() {
    let h = Harness::start().await;
    session_in(&h.session_dir).save("99").unwrap();

    let app = h.app_at("/app/").await;
    assert!(app.user().is_none());
    assert_eq!(session_in(&h.session_dir).load().unwrap(), None);

    h.server.stop().await;
}

#[tokio::test]
async fn logout_forgets_user() {
    let h = Harness::start().await;
    let mut app = h.app_at("/app/").await;
    h.login(&mut app, "Matt").await;
    app.go_to("about");

    app.go_to("logout");

    assert!(app.user().is_none());
    assert_eq!(app.router().current(), Some("home"));
    assert!(app.editor().rows.is_empty());
    assert!(!app.router().button("login").unwrap().hidden);
    assert_eq!(session_in(&h.session_dir).load().unwrap(), None);

    h.server.stop().await;
}

#[tokio::test]
async fn missing_template_aborts_startup() {
    let assets = common::write_assets(&[("screens/home.inc", "hi")]);
    let server = start_server(assets.path()).await;
    let api = api(&server.base_url());
    let dir = TempDir::new().unwrap();

    let result = bootstrap(
        &api,
        &client_config(&server.base_url()),
        session_in(&dir),
        "/app/",
    )
    .await;
    assert!(matches!(result, Err(AppError::TemplateUnavailable(_))));

    server.stop().await;
}

#[tokio::test]
async fn template_without_placeholders_aborts_startup() {
    let assets = common::write_assets(&[("templates/screen.tmpl", "<div>{title}</div>")]);
    let server = start_server(assets.path()).await;
    let api = api(&server.base_url());
    let dir = TempDir::new().unwrap();

    let result = bootstrap(
        &api,
        &client_config(&server.base_url()),
        session_in(&dir),
        "/app/",
    )
    .await;
    assert!(matches!(result, Err(AppError::InvalidTemplate(_))));

    server.stop().await;
}

#[tokio::test]
async fn late_result_from_previous_login_is_ignored() {
    let h = Harness::start().await;
    let mut app = h.app_at("/app/").await;

    h.login(&mut app, "Matt").await;
    app.go_to("foods");
    app.edit_row(1, "gravy");
    let matt_save = app.save(1).unwrap();

    app.go_to("logout");
    h.login(&mut app, "George").await;
    app.go_to("foods");
    app.edit_row(1, "beans");
    let george_save = app.save(1).unwrap();

    // Matt's request completes after George's save was started.
    app.apply(execute(&h.api, matt_save).await);
    assert_eq!(app.editor().status, SaveStatus::Saving);
    assert!(app.editor().is_saving());
    assert!(app.save(0).is_none());
    assert_eq!(app.user().map(|u| u.name.as_str()), Some("George"));

    app.apply(execute(&h.api, george_save).await);
    assert_eq!(app.editor().status, SaveStatus::Saved);
    assert!(!app.editor().is_saving());
    assert_eq!(
        app.favourites().as_deref(),
        Some("Your favourite foods are: carrot, beans, and tomato.")
    );

    h.server.stop().await;
}

#[tokio::test]
async fn late_failure_from_previous_login_is_ignored() {
    let h = Harness::start().await;
    let mut app = h.app_at("/app/").await;
    let unreachable = api(&format!("http://127.0.0.1:{}", common::free_port()));

    h.login(&mut app, "Matt").await;
    app.go_to("foods");
    app.edit_row(1, "gravy");
    let matt_save = app.save(1).unwrap();

    app.go_to("logout");
    h.login(&mut app, "Matt").await;
    app.go_to("foods");
    app.edit_row(1, "pie crust");
    let second_save = app.save(1).unwrap();

    app.apply(execute(&unreachable, matt_save).await);
    assert_eq!(app.editor().status, SaveStatus::Saving);
    assert!(app.editor().is_saving());

    app.apply(execute(&h.api, second_save).await);
    assert_eq!(app.editor().status, SaveStatus::Saved);

    h.server.stop().await;
}
