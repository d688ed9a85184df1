use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{enquirydb::EnquiryExt, propertydb::PropertyExt},
    dtos::enquirydtos::{CreateEnquiryDto, EnquiryListQueryDto, UpdateEnquiryDto},
    error::HttpError,
    AppState,
};

pub async fn create_enquiry(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateEnquiryDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    // Agency scope is inherited from the property, never from the caller.
    let property = app_state
        .db_client
        .get_property_by_id(body.property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Property not found"))?;

    let enquiry = app_state
        .db_client
        .create_enquiry(property.agency_id, &body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "data": {
                "enquiry": enquiry
            }
        })),
    ))
}

pub async fn update_enquiry(
    Path(enquiry_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdateEnquiryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let enquiry = app_state
        .db_client
        .update_enquiry(enquiry_id, &body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Enquiry not found"))?;

    Ok(Json(json!({
        "status": "success",
        "data": {
            "enquiry": enquiry
        }
    })))
}

pub async fn list_enquiries(
    Query(query_params): Query<EnquiryListQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let enquiries = app_state
        .db_client
        .get_enquiries_for_agency(query_params.agency_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(json!({
        "status": "success",
        "results": enquiries.len(),
        "data": {
            "enquiries": enquiries
        }
    })))
}
