//! Project routes: the project table, components, settings, and schematics.
//!
//! All routes require a bearer token. Every mutation is saved through the
//! store before the response is sent; requests that change nothing skip the
//! save.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Json, Response};
use pillarx::project::{FilterOptions, Project, ProjectComponent, ProjectError, TypeFilter};
use pillarx::settings::{
    CodeField, CompositeSettings, ConcreteSettings, ProjectSettings, SettingsDraft, SettingsError, UnitField,
    UnitSystem,
};
use pillarx::workspace::ListView;
use serde::{Deserialize, Serialize};

use crate::routes::{ApiError, ApiJson};
use crate::routes::auth::{AuthUser, ClientInfo};
use crate::routes::types::svg_response;
use crate::state::AppState;

pub(crate) fn project_error_to_status(err: &ProjectError) -> StatusCode {
    match err {
        ProjectError::UnknownProject(_) | ProjectError::UnknownComponent(_) => StatusCode::NOT_FOUND,
    }
}

fn project_error(err: ProjectError) -> ApiError {
    ApiError::new(project_error_to_status(&err), err.to_string())
}

fn settings_error(err: SettingsError) -> ApiError {
    ApiError::bad_request(err.to_string())
}

/// Run `f` on one project under the write lock. `f` returns its result and
/// whether the project changed; only changes are persisted.
async fn mutate<R>(
    state: &AppState,
    id: &str,
    f: impl FnOnce(&mut Project) -> Result<(R, bool), ProjectError>,
) -> Result<R, ApiError> {
    let mut workspace = state.workspace.write().await;
    let (out, changed) = workspace.update_project(id, f).map_err(project_error)?;
    if changed {
        state.persist(&workspace);
    }
    Ok(out)
}

async fn read_project(state: &AppState, id: &str) -> Result<Project, ApiError> {
    let workspace = state.workspace.read().await;
    workspace
        .project(id)
        .cloned()
        .ok_or_else(|| project_error(ProjectError::UnknownProject(id.to_owned())))
}

// =============================================================================
// PROJECTS
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub view: Option<String>,
    pub search: Option<String>,
}

/// `GET /api/projects?view&search`: the project table.
pub async fn list_projects(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Project>>, ApiError> {
    let view = match query.view.as_deref() {
        None => ListView::default(),
        Some(raw) => ListView::parse(raw).ok_or_else(|| ApiError::bad_request(format!("unknown view {raw:?}")))?,
    };
    let workspace = state.workspace.read().await;
    let projects = workspace.list(view, query.search.as_deref().unwrap_or_default()).into_iter().cloned().collect();
    Ok(Json(projects))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectBody {
    #[serde(default)]
    pub name: String,
    pub initial_type: String,
}

/// `POST /api/projects`: create a project with one component.
pub async fn create_project(
    State(state): State<AppState>,
    auth: AuthUser,
    client: ClientInfo,
    ApiJson(body): ApiJson<CreateProjectBody>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    if body.initial_type.trim().is_empty() {
        return Err(ApiError::bad_request("initialType is required."));
    }
    let mut workspace = state.workspace.write().await;
    let project = workspace.create_project(&body.name, &body.initial_type, &client.caller(Some(auth.user_id))).clone();
    state.persist(&workspace);
    Ok((StatusCode::CREATED, Json(project)))
}

/// `GET /api/projects/{id}`: open a project, recording the view.
pub async fn get_project(
    State(state): State<AppState>,
    auth: AuthUser,
    client: ClientInfo,
    Path(id): Path<String>,
) -> Result<Json<Project>, ApiError> {
    let mut workspace = state.workspace.write().await;
    let project = workspace.open_project(&id, &client.caller(Some(auth.user_id))).map_err(project_error)?.clone();
    state.persist(&workspace);
    Ok(Json(project))
}

#[derive(Debug, Deserialize)]
pub struct RenameBody {
    pub name: String,
}

/// `PATCH /api/projects/{id}`: rename. Blank or unchanged names leave the
/// project untouched.
pub async fn rename_project(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<RenameBody>,
) -> Result<Json<Project>, ApiError> {
    let mut workspace = state.workspace.write().await;
    let changed = workspace.update_project(&id, |p| Ok(p.rename(&body.name))).map_err(project_error)?;
    if changed {
        state.persist(&workspace);
    }
    workspace.project(&id).cloned().map(Json).ok_or_else(|| project_error(ProjectError::UnknownProject(id)))
}

/// `DELETE /api/projects/{id}`.
pub async fn delete_project(
    State(state): State<AppState>,
    auth: AuthUser,
    client: ClientInfo,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut workspace = state.workspace.write().await;
    workspace.delete_project(&id, &client.caller(Some(auth.user_id))).map_err(project_error)?;
    state.persist(&workspace);
    Ok(Json(serde_json::json!({ "ok": true })))
}

// =============================================================================
// COMPONENTS
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ComponentQuery {
    #[serde(rename = "type")]
    pub type_filter: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentList {
    pub components: Vec<ProjectComponent>,
    pub filter_options: Vec<String>,
}

/// `GET /api/projects/{id}/components?type`: components passing the filter.
pub async fn list_components(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
    Query(query): Query<ComponentQuery>,
) -> Result<Json<ComponentList>, ApiError> {
    let project = read_project(&state, &id).await?;
    let filter = query.type_filter.as_deref().map(TypeFilter::parse).unwrap_or_default();
    Ok(Json(ComponentList {
        components: project.filter(&filter).into_iter().cloned().collect(),
        filter_options: project.filter_options(FilterOptions::Present),
    }))
}

#[derive(Debug, Deserialize)]
pub struct AddComponentBody {
    #[serde(rename = "type")]
    pub type_name: String,
}

fn component_of(project: &Project, id: &str) -> Result<ProjectComponent, ProjectError> {
    project.component(id).cloned().ok_or_else(|| ProjectError::UnknownComponent(id.to_owned()))
}

/// `POST /api/projects/{id}/components`: append a component named
/// `"{type} {n}"`.
pub async fn add_component(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<AddComponentBody>,
) -> Result<(StatusCode, Json<ProjectComponent>), ApiError> {
    let component = mutate(&state, &id, |p| {
        let new_id = p.add_component(&body.type_name);
        Ok((component_of(p, &new_id)?, true))
    })
    .await?;
    Ok((StatusCode::CREATED, Json(component)))
}

/// `PATCH /api/projects/{id}/components/{component_id}`: rename a component.
pub async fn rename_component(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((id, component_id)): Path<(String, String)>,
    ApiJson(body): ApiJson<RenameBody>,
) -> Result<Json<ProjectComponent>, ApiError> {
    let component = mutate(&state, &id, |p| {
        let changed = p.rename_component(&component_id, &body.name)?;
        Ok((component_of(p, &component_id)?, changed))
    })
    .await?;
    Ok(Json(component))
}

/// `POST /api/projects/{id}/components/{component_id}/duplicate`.
pub async fn duplicate_component(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((id, component_id)): Path<(String, String)>,
) -> Result<(StatusCode, Json<ProjectComponent>), ApiError> {
    let copy = mutate(&state, &id, |p| {
        let copy_id = p.duplicate_component(&component_id)?;
        Ok((component_of(p, &copy_id)?, true))
    })
    .await?;
    Ok((StatusCode::CREATED, Json(copy)))
}

/// `DELETE /api/projects/{id}/components/{component_id}`. The last component
/// stays; `deleted` reports whether anything was removed.
pub async fn delete_component(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((id, component_id)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = mutate(&state, &id, |p| {
        let deleted = p.delete_component(&component_id)?;
        Ok((deleted, deleted))
    })
    .await?;
    Ok(Json(serde_json::json!({ "deleted": deleted })))
}

/// `GET /api/projects/{id}/components/{component_id}/scene.svg`: schematic
/// of the component's type at its default properties.
pub async fn component_svg(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((id, component_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let project = read_project(&state, &id).await?;
    let component = component_of(&project, &component_id).map_err(project_error)?;
    let def = state.registry.lookup(&component.type_name);
    Ok(svg_response(&def.render(&def.defaults())))
}

// =============================================================================
// SETTINGS
// =============================================================================

/// `GET /api/projects/{id}/settings`.
pub async fn get_settings(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ProjectSettings>, ApiError> {
    Ok(Json(read_project(&state, &id).await?.settings))
}

/// Partial settings edit. Code and unit values must come from their option
/// lists; a unit-system change resets every unit before `units` is applied.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub unit_system: Option<String>,
    #[serde(default)]
    pub codes: BTreeMap<String, String>,
    #[serde(default)]
    pub units: BTreeMap<String, String>,
    pub concrete: Option<ConcreteSettings>,
    pub composite: Option<CompositeSettings>,
}

impl SettingsUpdate {
    fn apply(self, current: &ProjectSettings) -> Result<ProjectSettings, SettingsError> {
        let mut draft = SettingsDraft::open(current);
        if let Some(raw) = self.unit_system.as_deref() {
            let system = UnitSystem::parse(raw)
                .ok_or_else(|| SettingsError::InvalidOption { field: "unitSystem", value: raw.to_owned() })?;
            if system != draft.settings().unit_system {
                draft.set_unit_system(system);
            }
        }
        for (key, value) in &self.codes {
            let field = CodeField::from_key(key).ok_or_else(|| SettingsError::UnknownField(key.clone()))?;
            draft.set_code(field, value)?;
        }
        for (key, value) in &self.units {
            let field = UnitField::from_key(key).ok_or_else(|| SettingsError::UnknownField(key.clone()))?;
            draft.set_unit(field, value)?;
        }
        if let Some(concrete) = self.concrete {
            draft.settings_mut().concrete = concrete;
        }
        if let Some(composite) = self.composite {
            draft.settings_mut().composite = composite;
        }
        Ok(draft.commit())
    }
}

/// `PUT /api/projects/{id}/settings`: validate a draft and replace the
/// project's settings with it.
pub async fn put_settings(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<SettingsUpdate>,
) -> Result<Json<ProjectSettings>, ApiError> {
    let mut workspace = state.workspace.write().await;
    let current = workspace
        .project(&id)
        .map(|p| p.settings.clone())
        .ok_or_else(|| project_error(ProjectError::UnknownProject(id.clone())))?;
    let next = update.apply(&current).map_err(settings_error)?;
    workspace
        .update_project(&id, |p| {
            p.save_settings(next.clone());
            Ok(())
        })
        .map_err(project_error)?;
    state.persist(&workspace);
    Ok(Json(next))
}

/// `POST /api/projects/{id}/settings/units/toggle`: flip Imperial/Metric and
/// reset every unit to the new system's defaults.
pub async fn toggle_units(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ProjectSettings>, ApiError> {
    let settings = mutate(&state, &id, |p| {
        let mut draft = SettingsDraft::open(&p.settings);
        draft.toggle_unit_system();
        p.save_settings(draft.commit());
        Ok((p.settings.clone(), true))
    })
    .await?;
    Ok(Json(settings))
}

#[cfg(test)]
#[path = "projects_test.rs"]
mod tests;
