use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::models::propertymodel::{ListingStatus, Property, PropertyImage, PropertyType};

/// At most this many images come back per listing in search results.
pub const MAX_SEARCH_IMAGES: usize = 5;

/// Raw query-string parameters for `GET /api/properties`. Everything arrives
/// as an optional string; the translation into typed criteria (and all the
/// validation) happens in `SearchCriteria::from_query`.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQueryDto {
    pub status: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub min_bedrooms: Option<String>,
    pub max_bedrooms: Option<String>,
    pub property_type: Option<String>,
    pub keyword: Option<String>,
    pub city: Option<String>,
    pub postcode: Option<String>,
    pub agency_slug: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyDto {
    pub agency_id: Uuid,

    #[validate(length(min = 5, max = 200, message = "Title must be between 5 and 200 characters"))]
    pub title: String,

    #[validate(length(min = 20, message = "Description must be at least 20 characters"))]
    pub description: String,

    pub status: ListingStatus,
    pub property_type: PropertyType,

    #[validate(length(min = 1, message = "Address is required"))]
    pub address_line1: String,

    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,

    #[validate(length(min = 1, message = "Postcode is required"))]
    pub postcode: String,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    pub longitude: f64,

    #[validate(range(min = 0, message = "Price must not be negative"))]
    pub price: i64,

    #[validate(range(min = 0, max = 20, message = "Bedrooms must be between 0 and 20"))]
    pub bedrooms: i32,

    pub is_published: Option<bool>,
    pub images: Option<Vec<PropertyImage>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListingDto {
    pub id: Uuid,
    pub agency_slug: String,
    pub slug: String,
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
    pub images: Vec<PropertyImage>,
    pub created_at: DateTime<Utc>,
}

impl PropertyListingDto {
    pub fn from_property(property: &Property) -> Self {
        let mut images = property.images.0.clone();
        images.sort_by_key(|image| image.sort_order);
        images.truncate(MAX_SEARCH_IMAGES);

        Self {
            id: property.id,
            agency_slug: property.agency_slug.clone(),
            slug: property.slug.clone(),
            status: property.status,
            property_type: property.property_type,
            title: property.title.clone(),
            description: property.description.clone(),
            address_line1: property.address_line1.clone(),
            city: property.city.clone(),
            postcode: property.postcode.clone(),
            latitude: property.latitude,
            longitude: property.longitude,
            price: property.price,
            bedrooms: property.bedrooms,
            images,
            created_at: property.created_at,
        }
    }
}

/// Minimal projection used to render map markers.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct MapMarkerDto {
    pub id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub price: i64,
    pub title: String,
    pub status: ListingStatus,
}

impl MapMarkerDto {
    pub fn from_property(property: &Property) -> Self {
        Self {
            id: property.id,
            latitude: property.latitude,
            longitude: property.longitude,
            price: property.price,
            title: property.title.clone(),
            status: property.status,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDto {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub total_pages: i64,
    pub has_more: bool,
}

impl PaginationDto {
    pub fn new(page: u32, limit: u32, total: i64) -> Self {
        let limit_i64 = limit as i64;
        let total_pages = if total == 0 {
            0
        } else {
            (total + limit_i64 - 1) / limit_i64
        };

        Self {
            page,
            limit,
            total,
            total_pages,
            has_more: (page as i64) * limit_i64 < total,
        }
    }
}

/// The dual projection of one search: a page of listings for the result
/// cards, markers for every match, and the pagination metadata.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySearchResponse {
    pub data: Vec<PropertyListingDto>,
    pub map_data: Vec<MapMarkerDto>,
    pub pagination: PaginationDto,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::agencymodel::AgencyStatus;
    use chrono::Utc;
    use sqlx::types::Json;

    #[test]
    fn listing_keeps_at_most_five_images_in_sort_order() {
        let images: Vec<PropertyImage> = (0..8)
            .rev()
            .map(|i| PropertyImage {
                url: format!("https://img.example/{i}.jpg"),
                sort_order: i,
                is_primary: i == 0,
            })
            .collect();

        let property = Property {
            id: Uuid::new_v4(),
            agency_id: Uuid::new_v4(),
            agency_slug: "acme-estates".to_string(),
            agency_status: AgencyStatus::Active,
            slug: "seafront-cottage".to_string(),
            is_published: true,
            status: ListingStatus::ForSale,
            property_type: PropertyType::Cottage,
            title: "Seafront cottage".to_string(),
            description: "Stone cottage overlooking the harbour".to_string(),
            address_line1: "1 Quay Street".to_string(),
            city: "Whitby".to_string(),
            postcode: "YO21 1DB".to_string(),
            latitude: 54.4863,
            longitude: -0.6133,
            price: 425_000,
            bedrooms: 3,
            images: Json(images),
            created_at: Utc::now(),
        };

        let listing = PropertyListingDto::from_property(&property);
        assert_eq!(listing.images.len(), MAX_SEARCH_IMAGES);
        let orders: Vec<i32> = listing.images.iter().map(|i| i.sort_order).collect();
        assert_eq!(orders, vec![0, 1, 2, 3, 4]);
        assert!(listing.images[0].is_primary);
    }
}
