use sqlx::types::chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "agency_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgencyStatus {
    Active,
    Suspended,
    PendingSetup,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Agency {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub status: AgencyStatus,
    pub email: String,
    pub phone: Option<String>,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub created_at: DateTime<Utc>,
}
