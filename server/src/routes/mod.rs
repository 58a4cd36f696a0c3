//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every endpoint lives under `/api` except `/healthz`. Auth and activity
//! routes mirror the account backend; project and type routes expose the
//! workspace and the component registry. Errors are JSON `{"error": "..."}`.

pub mod activity;
pub mod auth;
pub mod projects;
pub mod types;

use axum::Router;
use axum::extract::{FromRequest, OptionalFromRequest, Request};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, patch, post};
use serde::de::DeserializeOwned;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Error body for every failed API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

// =============================================================================
// JSON BODIES
// =============================================================================

/// `Json` whose rejections answer with the same `{"error": ...}` body as
/// every other failure.
/// `Option<ApiJson<T>>` treats a request without a content type as no body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match <Json<T> as FromRequest<S>>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::new(rejection.status(), rejection.body_text())),
        }
    }
}

impl<S, T> OptionalFromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        if req.headers().get(CONTENT_TYPE).is_none() {
            return Ok(None);
        }
        <Self as FromRequest<S>>::from_request(req, state).await.map(Some)
    }
}

/// Full API router with CORS and request tracing.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/me", get(auth::me))
        .route("/api/activity/track", post(activity::track))
        .route("/api/activity/my", get(activity::my_activities))
        .route("/api/types", get(types::catalog))
        .route("/api/types/{kind}/form", post(types::form))
        .route("/api/types/{kind}/edit", post(types::edit))
        .route("/api/types/{kind}/render", post(types::render))
        .route("/api/projects", get(projects::list_projects).post(projects::create_project))
        .route(
            "/api/projects/{id}",
            get(projects::get_project)
                .patch(projects::rename_project)
                .delete(projects::delete_project),
        )
        .route(
            "/api/projects/{id}/components",
            get(projects::list_components).post(projects::add_component),
        )
        .route(
            "/api/projects/{id}/components/{component_id}",
            patch(projects::rename_component).delete(projects::delete_component),
        )
        .route(
            "/api/projects/{id}/components/{component_id}/duplicate",
            post(projects::duplicate_component),
        )
        .route(
            "/api/projects/{id}/components/{component_id}/scene.svg",
            get(projects::component_svg),
        )
        .route(
            "/api/projects/{id}/settings",
            get(projects::get_settings).put(projects::put_settings),
        )
        .route("/api/projects/{id}/settings/units/toggle", post(projects::toggle_units))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
