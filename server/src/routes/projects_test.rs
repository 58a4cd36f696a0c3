use pillarx::activity::{Page, action};
use pillarx::store::Store;

use super::*;
use crate::state::test_helpers::{self, browser};

fn rename(name: &str) -> ApiJson<RenameBody> {
    ApiJson(RenameBody { name: name.into() })
}

#[test]
fn project_error_to_status_maps_not_found() {
    assert_eq!(project_error_to_status(&ProjectError::UnknownProject("p".into())), StatusCode::NOT_FOUND);
    assert_eq!(project_error_to_status(&ProjectError::UnknownComponent("c".into())), StatusCode::NOT_FOUND);
}

// =============================================================================
// Projects
// =============================================================================

#[tokio::test]
async fn list_defaults_to_recents_and_searches() {
    let state = test_helpers::test_app_state();
    let auth = test_helpers::login_as(&state, "a@b.c").await;

    let Json(recents) = list_projects(State(state.clone()), auth.clone(), Query(ListQuery::default())).await.unwrap();
    assert_eq!(recents.len(), 2);

    let query = ListQuery { view: Some("all".into()), search: Some("bridge".into()) };
    let Json(hits) = list_projects(State(state.clone()), auth.clone(), Query(query)).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Bridge Section B");

    let bad = ListQuery { view: Some("starred".into()), search: None };
    let err = list_projects(State(state), auth, Query(bad)).await.unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_project_persists_and_records() {
    let state = test_helpers::test_app_state();
    let auth = test_helpers::login_as(&state, "a@b.c").await;
    let user_id = auth.user_id.clone();
    let body = CreateProjectBody { name: String::new(), initial_type: "Wind Load".into() };

    let (status, Json(project)) = create_project(State(state.clone()), auth, browser(), ApiJson(body)).await.unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(project.name, "Project 4");
    assert_eq!(project.components[0].name, "Wind Load 1");

    let saved = state.store.load().unwrap().unwrap();
    assert_eq!(saved.projects[0].id, project.id);

    let workspace = state.workspace.read().await;
    let page = workspace.my_activities(&user_id, Page::default());
    assert_eq!(page.data[0].action_type, action::CREATE_PROJECT);
}

#[tokio::test]
async fn create_project_requires_type() {
    let state = test_helpers::test_app_state();
    let auth = test_helpers::login_as(&state, "a@b.c").await;
    let body = CreateProjectBody { name: "X".into(), initial_type: " ".into() };
    let err = create_project(State(state), auth, browser(), ApiJson(body)).await.unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_project_records_view_and_404s_unknown() {
    let state = test_helpers::test_app_state();
    let auth = test_helpers::login_as(&state, "a@b.c").await;

    let Json(project) = get_project(State(state.clone()), auth.clone(), browser(), Path("2".into())).await.unwrap();
    assert_eq!(project.name, "Structural Analysis Tower A");

    let err = get_project(State(state.clone()), auth.clone(), browser(), Path("nope".into())).await.unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);

    let workspace = state.workspace.read().await;
    let page = workspace.my_activities(&auth.user_id, Page::default());
    assert_eq!(page.data[0].action_type, action::VIEW_PROJECT);
}

#[tokio::test]
async fn rename_same_name_is_noop() {
    let state = test_helpers::test_app_state();
    let auth = test_helpers::login_as(&state, "a@b.c").await;
    let before = state.workspace.read().await.project("1").cloned().unwrap();

    let Json(same) = rename_project(State(state.clone()), auth.clone(), Path("1".into()), rename(" Project 1 ")).await.unwrap();
    assert_eq!(same, before);

    let Json(renamed) = rename_project(State(state), auth, Path("1".into()), rename("Lobby")).await.unwrap();
    assert_eq!(renamed.name, "Lobby");
}

#[tokio::test]
async fn delete_project_removes_it() {
    let state = test_helpers::test_app_state();
    let auth = test_helpers::login_as(&state, "a@b.c").await;
    delete_project(State(state.clone()), auth.clone(), browser(), Path("3".into())).await.unwrap();
    assert!(state.workspace.read().await.project("3").is_none());
    let err = delete_project(State(state), auth, browser(), Path("3".into())).await.unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Components
// =============================================================================

#[tokio::test]
async fn component_lifecycle() {
    let state = test_helpers::test_app_state();
    let auth = test_helpers::login_as(&state, "a@b.c").await;
    let pid = || Path("1".to_owned());

    let body = AddComponentBody { type_name: "Beam".into() };
    let (_, Json(added)) = add_component(State(state.clone()), auth.clone(), pid(), ApiJson(body)).await.unwrap();
    assert_eq!(added.name, "Beam 2");

    let path = Path(("1".to_owned(), added.id.clone()));
    let Json(renamed) = rename_component(State(state.clone()), auth.clone(), path, rename("Beam A")).await.unwrap();
    assert_eq!(renamed.name, "Beam A");

    let path = Path(("1".to_owned(), added.id.clone()));
    let (_, Json(copy)) = duplicate_component(State(state.clone()), auth.clone(), path).await.unwrap();
    assert_eq!(copy.name, "Beam A (Copy)");

    let query = ComponentQuery { type_filter: Some("Beam".into()) };
    let Json(list) = list_components(State(state.clone()), auth.clone(), pid(), Query(query)).await.unwrap();
    assert_eq!(list.components.len(), 3);
    assert_eq!(list.filter_options, vec!["ALL", "Beam", "Column"]);

    let path = Path(("1".to_owned(), copy.id.clone()));
    let Json(deleted) = delete_component(State(state.clone()), auth.clone(), path).await.unwrap();
    assert_eq!(deleted["deleted"], true);

    let project = state.workspace.read().await.project("1").cloned().unwrap();
    assert_eq!(project.components.len(), 3);
    assert_eq!(project.components_count, 3);
}

#[tokio::test]
async fn deleting_last_component_reports_false() {
    let state = test_helpers::test_app_state();
    let auth = test_helpers::login_as(&state, "a@b.c").await;
    let path = Path(("2".to_owned(), "c3".to_owned()));
    let Json(deleted) = delete_component(State(state), auth, path).await.unwrap();
    assert_eq!(deleted["deleted"], false);
}

#[tokio::test]
async fn unchanged_edits_skip_the_save() {
    let (state, store) = test_helpers::counting_app_state();
    let auth = test_helpers::login_as(&state, "a@b.c").await;
    assert_eq!(store.saves(), 0);

    let path = Path(("1".to_owned(), "c1".to_owned()));
    rename_component(State(state.clone()), auth.clone(), path, rename("Beam 1")).await.unwrap();
    let path = Path(("2".to_owned(), "c3".to_owned()));
    delete_component(State(state.clone()), auth.clone(), path).await.unwrap();
    rename_project(State(state.clone()), auth.clone(), Path("1".into()), rename("Project 1")).await.unwrap();
    assert_eq!(store.saves(), 0);

    let path = Path(("1".to_owned(), "c1".to_owned()));
    rename_component(State(state), auth, path, rename("Main Beam")).await.unwrap();
    assert_eq!(store.saves(), 1);
}

#[tokio::test]
async fn unknown_component_is_not_found() {
    let state = test_helpers::test_app_state();
    let auth = test_helpers::login_as(&state, "a@b.c").await;
    let path = Path(("1".to_owned(), "c_missing".to_owned()));
    let err = duplicate_component(State(state), auth, path).await.unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn component_svg_renders_its_type() {
    let state = test_helpers::test_app_state();
    let auth = test_helpers::login_as(&state, "a@b.c").await;
    let path = Path(("2".to_owned(), "c3".to_owned()));
    let response = component_svg(State(state), auth, path).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Settings
// =============================================================================

#[tokio::test]
async fn put_settings_validates_and_saves() {
    let state = test_helpers::test_app_state();
    let auth = test_helpers::login_as(&state, "a@b.c").await;

    let mut update = SettingsUpdate::default();
    update.codes.insert("wind".into(), "ASCE 7-22".into());
    let Json(saved) = put_settings(State(state.clone()), auth.clone(), Path("1".into()), ApiJson(update)).await.unwrap();
    assert_eq!(saved.codes.wind, "ASCE 7-22");

    let Json(reopened) = get_settings(State(state.clone()), auth.clone(), Path("1".into())).await.unwrap();
    assert_eq!(reopened.codes.wind, "ASCE 7-22");

    let mut bad = SettingsUpdate::default();
    bad.units.insert("length".into(), "furlong".into());
    let err = put_settings(State(state.clone()), auth.clone(), Path("1".into()), ApiJson(bad)).await.unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);

    let Json(unchanged) = get_settings(State(state), auth, Path("1".into())).await.unwrap();
    assert_eq!(unchanged.units.length, "ft");
}

#[tokio::test]
async fn put_settings_switches_system_then_applies_units() {
    let state = test_helpers::test_app_state();
    let auth = test_helpers::login_as(&state, "a@b.c").await;
    let mut update = SettingsUpdate { unit_system: Some("Metric".into()), ..SettingsUpdate::default() };
    update.units.insert("length".into(), "cm".into());
    let Json(saved) = put_settings(State(state), auth, Path("1".into()), ApiJson(update)).await.unwrap();
    assert_eq!(saved.unit_system, UnitSystem::Metric);
    assert_eq!(saved.units.length, "cm");
    assert_eq!(saved.units.forces, "kN");
}

#[tokio::test]
async fn toggle_units_resets_every_unit() {
    let state = test_helpers::test_app_state();
    let auth = test_helpers::login_as(&state, "a@b.c").await;
    let Json(metric) = toggle_units(State(state.clone()), auth.clone(), Path("1".into())).await.unwrap();
    assert_eq!(metric.unit_system, UnitSystem::Metric);
    assert_eq!(metric.units, pillarx::settings::Units::for_system(UnitSystem::Metric));

    let Json(imperial) = toggle_units(State(state), auth, Path("1".into())).await.unwrap();
    assert_eq!(imperial.units, pillarx::settings::Units::for_system(UnitSystem::Imperial));
}
