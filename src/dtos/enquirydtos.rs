use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::models::enquirymodel::EnquiryStatus;

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEnquiryDto {
    pub property_id: Uuid,

    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,

    #[validate(length(min = 1, message = "Email is required"), email(message = "Email is invalid"))]
    pub email: String,

    #[validate(length(min = 10, max = 20, message = "Phone number must be between 10-20 characters"))]
    pub phone: Option<String>,

    #[validate(length(min = 10, message = "Message must be at least 10 characters"))]
    pub message: String,
}

/// Dashboard update: either field absent means "leave unchanged".
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEnquiryDto {
    pub status: Option<EnquiryStatus>,
    pub internal_notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EnquiryListQueryDto {
    #[serde(rename = "agencyId")]
    pub agency_id: Uuid,
}

/// Dashboard row: the enquiry plus a light summary of the property it is
/// about.
#[derive(Debug, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryWithPropertyDto {
    pub id: Uuid,
    pub property_id: Uuid,
    pub agency_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub status: EnquiryStatus,
    pub created_at: DateTime<Utc>,
    pub property_title: String,
    pub property_slug: String,
}
