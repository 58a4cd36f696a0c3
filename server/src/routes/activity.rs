//! Activity routes: anonymous tracking and the caller's history.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use pillarx::activity::{ActivityPage, Page, UserActivity, action};
use serde::Deserialize;

use crate::routes::ApiJson;
use crate::routes::auth::{AuthUser, ClientInfo};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct TrackBody {
    pub action_type: Option<String>,
    pub action_detail: Option<serde_json::Value>,
    pub user_id: Option<String>,
}

/// `POST /api/activity/track`: record an activity. No auth; `user_id` is
/// taken as given and may be absent.
pub async fn track(
    State(state): State<AppState>,
    client: ClientInfo,
    ApiJson(body): ApiJson<TrackBody>,
) -> (StatusCode, Json<UserActivity>) {
    let action_type = body.action_type.filter(|a| !a.is_empty()).unwrap_or_else(|| action::GENERAL.to_owned());
    let caller = client.caller(body.user_id.filter(|id| !id.is_empty()));
    let mut workspace = state.workspace.write().await;
    let activity = workspace.record(&caller, &action_type, body.action_detail).clone();
    state.persist(&workspace);
    (StatusCode::CREATED, Json(activity))
}

/// Raw query values; unparsable numbers fall back to the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl ActivityQuery {
    fn page(&self) -> Page {
        let parse = |v: &Option<String>| v.as_deref().and_then(|s| s.trim().parse::<usize>().ok());
        Page::new(parse(&self.limit), parse(&self.offset))
    }
}

/// `GET /api/activity/my`: the caller's activities, newest first.
pub async fn my_activities(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ActivityQuery>,
) -> Json<ActivityPage> {
    let workspace = state.workspace.read().await;
    Json(workspace.my_activities(&auth.user_id, query.page()))
}

#[cfg(test)]
#[path = "activity_test.rs"]
mod tests;
