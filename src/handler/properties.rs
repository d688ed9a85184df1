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
    db::{agencydb::AgencyExt, propertydb::PropertyExt},
    dtos::propertydtos::{CreatePropertyDto, PropertyListingDto, SearchQueryDto},
    error::HttpError,
    service::search_service::{execute_search, SearchCriteria},
    utils::slug::{property_slug, random_suffix},
    AppState,
};

pub async fn search_properties(
    Query(query_params): Query<SearchQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let criteria = SearchCriteria::from_query(query_params)?;
    let response = execute_search(app_state.db_client.as_ref(), &criteria).await?;

    Ok(Json(response))
}

pub async fn get_property(
    Path(property_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let property = app_state
        .db_client
        .get_property_by_id(property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Property not found"))?;

    Ok(Json(json!({
        "status": "success",
        "data": {
            "property": PropertyListingDto::from_property(&property)
        }
    })))
}

pub async fn create_property(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreatePropertyDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let agency = app_state
        .db_client
        .get_agency_by_id(body.agency_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Agency not found"))?;

    let mut slug = property_slug(&body.title);
    let taken = app_state
        .db_client
        .slug_exists(agency.id, &slug)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    if taken {
        slug = format!("{}-{}", slug, random_suffix(5));
    }

    let property = app_state
        .db_client
        .create_property(&slug, &body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "data": {
                "property": PropertyListingDto::from_property(&property)
            }
        })),
    ))
}
