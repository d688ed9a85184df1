use std::sync::Arc;

use axum::{
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{agencies, enquiries, properties},
    AppState,
};

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .route(
            "/properties",
            get(properties::search_properties).post(properties::create_property),
        )
        .route("/properties/:property_id", get(properties::get_property))
        .route("/agencies/:slug", get(agencies::get_agency_branding))
        .route(
            "/enquiries",
            post(enquiries::create_enquiry).get(enquiries::list_enquiries),
        )
        .route("/enquiries/:enquiry_id", put(enquiries::update_enquiry))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "success",
        "message": "Service is healthy"
    }))
}
