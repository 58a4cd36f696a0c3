use pillarx::actor::ActorType;
use serde_json::json;

use super::*;
use crate::state::test_helpers::{self, browser};

fn query(limit: Option<&str>, offset: Option<&str>) -> ActivityQuery {
    ActivityQuery { limit: limit.map(Into::into), offset: offset.map(Into::into) }
}

#[test]
fn query_parses_leniently() {
    assert_eq!(query(None, None).page(), Page::default());
    assert_eq!(query(Some("5"), Some("10")).page(), Page { limit: 5, offset: 10 });
    assert_eq!(query(Some("abc"), Some("-1")).page(), Page::default());
    assert_eq!(query(Some("0"), None).page().limit, 20);
}

#[tokio::test]
async fn anonymous_track_defaults_to_general() {
    let state = test_helpers::test_app_state();
    let (status, Json(activity)) = track(State(state), browser(), ApiJson(TrackBody::default())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(activity.action_type, action::GENERAL);
    assert!(activity.user_id.is_none());
    assert_eq!(activity.actor_type, ActorType::Human);
}

#[tokio::test]
async fn track_from_bot_is_classified() {
    let state = test_helpers::test_app_state();
    let client = ClientInfo { ip_address: "10.0.0.2".into(), user_agent: "python-requests bot".into() };
    let body = TrackBody {
        action_type: Some("EXPORT_PDF".into()),
        action_detail: Some(json!({"pages": 3})),
        user_id: Some("u1".into()),
    };
    let (_, Json(activity)) = track(State(state), client, ApiJson(body)).await;
    assert_eq!(activity.actor_type, ActorType::Bot);
    assert_eq!(activity.action_type, "EXPORT_PDF");
    assert_eq!(activity.user_id.as_deref(), Some("u1"));
    assert_eq!(activity.ip_address, "10.0.0.2");
}

#[tokio::test]
async fn my_activities_paginates_callers_history() {
    let state = test_helpers::test_app_state();
    let auth = test_helpers::login_as(&state, "a@b.c").await;
    for i in 0..3 {
        let body = TrackBody {
            action_type: Some(format!("STEP_{i}")),
            action_detail: None,
            user_id: Some(auth.user_id.clone()),
        };
        track(State(state.clone()), browser(), ApiJson(body)).await;
    }
    track(State(state.clone()), browser(), ApiJson(TrackBody::default())).await;

    // REGISTER + LOGIN + three tracked steps
    let Json(page) = my_activities(State(state), auth, Query(query(Some("2"), Some("0")))).await;
    assert_eq!(page.pagination.total, 5);
    assert_eq!(page.pagination.limit, 2);
    assert_eq!(page.data.len(), 2);
    assert!(page.data.iter().all(|a| a.action_type.starts_with("STEP_")));
}
