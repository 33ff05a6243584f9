//! HTTP routes for the user directory and client assets.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::directory::UserDirectory;
use crate::model::{FoodUpdate, FoodUpdateRequest, User};
use crate::server::assets::AssetStore;
use crate::server::error::ApiError;

const HTML: &str = "text/html; charset=utf-8";
const TEXT: &str = "text/plain; charset=utf-8";

/// Shared handler state.
#[derive(Clone)]
pub struct ServerState {
    pub directory: UserDirectory,
    pub assets: Arc<AssetStore>,
}

impl ServerState {
    pub fn new(directory: UserDirectory, assets: AssetStore) -> Self {
        Self {
            directory,
            assets: Arc::new(assets),
        }
    }
}

pub fn build_router(state: ServerState) -> Router {
    Router::new()
        .route("/users", get(list_users))
        .route("/user/{id}", get(get_user))
        .route("/user", axum::routing::put(update_user))
        .route("/screens/{file}", get(screen))
        .route("/templates/{file}", get(template))
        .route("/app", get(app_index))
        .route("/app/{*screen}", get(app_index))
        .with_state(state)
}

async fn list_users(State(state): State<ServerState>) -> Json<Vec<User>> {
    Json(state.directory.list_users())
}

/// No match is a 200 with a `null` body.
async fn get_user(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Json<Option<User>> {
    Json(state.directory.get_user(&id))
}

async fn update_user(
    State(state): State<ServerState>,
    payload: Result<Json<FoodUpdateRequest>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
    let update =
        FoodUpdate::try_from(request).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
    let user = state.directory.update_food(&update)?;
    Ok(Json(user))
}

async fn screen(
    State(state): State<ServerState>,
    Path(file): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let content = state.assets.screen(&file).await?;
    Ok(([(CONTENT_TYPE, HTML)], content))
}

async fn template(
    State(state): State<ServerState>,
    Path(file): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let content = state.assets.template(&file).await?;
    Ok(([(CONTENT_TYPE, TEXT)], content))
}

async fn app_index(State(state): State<ServerState>) -> Result<impl IntoResponse, ApiError> {
    let content = state.assets.index().await?;
    Ok(([(CONTENT_TYPE, HTML)], content))
}
