use sqlx::types::chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use uuid::Uuid;

use crate::models::agencymodel::AgencyStatus;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "listing_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingStatus {
    ForSale,
    ToRent,
}

impl ListingStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "FOR_SALE" => Some(ListingStatus::ForSale),
            "TO_RENT" => Some(ListingStatus::ToRent),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "property_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyType {
    House,
    Flat,
    Apartment,
    Bungalow,
    Cottage,
    Maisonette,
    Studio,
    Terraced,
    SemiDetached,
    Detached,
    EndTerrace,
    Townhouse,
    Land,
    Commercial,
    Other,
}

impl PropertyType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "HOUSE" => Some(PropertyType::House),
            "FLAT" => Some(PropertyType::Flat),
            "APARTMENT" => Some(PropertyType::Apartment),
            "BUNGALOW" => Some(PropertyType::Bungalow),
            "COTTAGE" => Some(PropertyType::Cottage),
            "MAISONETTE" => Some(PropertyType::Maisonette),
            "STUDIO" => Some(PropertyType::Studio),
            "TERRACED" => Some(PropertyType::Terraced),
            "SEMI_DETACHED" => Some(PropertyType::SemiDetached),
            "DETACHED" => Some(PropertyType::Detached),
            "END_TERRACE" => Some(PropertyType::EndTerrace),
            "TOWNHOUSE" => Some(PropertyType::Townhouse),
            "LAND" => Some(PropertyType::Land),
            "COMMERCIAL" => Some(PropertyType::Commercial),
            "OTHER" => Some(PropertyType::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyImage {
    pub url: String,
    pub sort_order: i32,
    pub is_primary: bool,
}

/// Search read model: a property row joined to its owning agency.
/// `agency_slug` and `agency_status` come from the join, everything else
/// from the properties table.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Property {
    pub id: Uuid,
    pub agency_id: Uuid,
    pub agency_slug: String,
    pub agency_status: AgencyStatus,

    pub slug: String,
    pub is_published: bool,
    pub status: ListingStatus,
    pub property_type: PropertyType,

    pub title: String,
    pub description: String,
    pub address_line1: String,
    pub city: String,
    pub postcode: String,
    pub latitude: f64,
    pub longitude: f64,

    pub price: i64,
    pub bedrooms: i32,

    pub images: Json<Vec<PropertyImage>>,

    pub created_at: DateTime<Utc>,
}
