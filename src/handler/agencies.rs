use std::sync::Arc;

use axum::{extract::Path, response::IntoResponse, Extension, Json};
use serde_json::json;

use crate::{
    db::agencydb::AgencyExt, dtos::agencydtos::AgencyBrandingDto, error::HttpError,
    models::agencymodel::AgencyStatus, AppState,
};

pub async fn get_agency_branding(
    Path(slug): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let agency = app_state
        .db_client
        .get_agency_by_slug(&slug)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .filter(|agency| agency.status == AgencyStatus::Active)
        .ok_or_else(|| HttpError::not_found("Agency not found"))?;

    Ok(Json(json!({
        "status": "success",
        "data": {
            "agency": AgencyBrandingDto::from_agency(&agency)
        }
    })))
}
