//! Component type routes: catalog, property forms, edits, and schematics.
//!
//! These are stateless. The client owns the property bag and sends it with
//! each request; every edit answers with the full replacement bag.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Json, Response};
use pillarx::bag::PropertyBag;
use pillarx::editor::{EditError, Form};
use pillarx::kind::{CatalogGroup, catalog as component_catalog};
use pillarx::scene::Scene;
use serde::{Deserialize, Serialize};

use crate::routes::{ApiError, ApiJson};
use crate::state::AppState;

pub(crate) const SVG_CONTENT_TYPE: &str = "image/svg+xml";

pub(crate) fn svg_response(scene: &Scene) -> Response {
    ([(CONTENT_TYPE, SVG_CONTENT_TYPE)], scene.to_svg()).into_response()
}

pub(crate) fn edit_error_to_status(err: &EditError) -> StatusCode {
    match err {
        EditError::UnknownField { .. }
        | EditError::NotANumber { .. }
        | EditError::InvalidChoice { .. }
        | EditError::NotEditable(_) => StatusCode::BAD_REQUEST,
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct BagBody {
    /// Omitted means the type's defaults.
    pub bag: Option<PropertyBag>,
}

#[derive(Debug, Deserialize)]
pub struct EditBody {
    pub bag: Option<PropertyBag>,
    pub field: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct EditResponse {
    pub bag: PropertyBag,
    pub form: Form,
}

/// `GET /api/types`: the add-component catalog.
pub async fn catalog() -> Json<Vec<CatalogGroup>> {
    Json(component_catalog())
}

fn bag_of(body: Option<ApiJson<BagBody>>) -> Option<PropertyBag> {
    body.and_then(|ApiJson(body)| body.bag)
}

/// `POST /api/types/{kind}/form`: the property panel for a bag. No body
/// means the type's defaults.
pub async fn form(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    body: Option<ApiJson<BagBody>>,
) -> Json<Form> {
    let def = state.registry.lookup(&kind);
    let bag = bag_of(body).unwrap_or_else(|| def.defaults());
    Json(def.form(&bag))
}

/// `POST /api/types/{kind}/edit`: apply one field change.
pub async fn edit(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    ApiJson(body): ApiJson<EditBody>,
) -> Result<Json<EditResponse>, ApiError> {
    let def = state.registry.lookup(&kind);
    let bag = body.bag.unwrap_or_else(|| def.defaults());
    let next = def
        .edit(&bag, &body.field, &body.value)
        .map_err(|e| ApiError::new(edit_error_to_status(&e), e.to_string()))?;
    let form = def.form(&next);
    Ok(Json(EditResponse { bag: next, form }))
}

/// `POST /api/types/{kind}/render`: SVG schematic for a bag. No body means
/// the type's defaults.
pub async fn render(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    body: Option<ApiJson<BagBody>>,
) -> Response {
    let def = state.registry.lookup(&kind);
    let bag = bag_of(body).unwrap_or_else(|| def.defaults());
    svg_response(&def.render(&bag))
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
