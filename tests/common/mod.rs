use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use sqlx::types::Json;
use uuid::Uuid;

use nestboard::dtos::propertydtos::MapMarkerDto;
use nestboard::models::agencymodel::AgencyStatus;
use nestboard::models::propertymodel::{ListingStatus, Property, PropertyType};
use nestboard::service::error::SearchError;
use nestboard::service::search_service::{compare, matches, PropertyStore, SearchCriteria};

/// In-memory store that evaluates the reference predicate directly. Lets the
/// search pipeline run end to end without a database.
pub struct InMemoryStore {
    properties: Vec<Property>,
}

impl InMemoryStore {
    pub fn new(properties: Vec<Property>) -> Self {
        InMemoryStore { properties }
    }

    fn sorted_matches(&self, criteria: &SearchCriteria) -> Vec<&Property> {
        let mut hits: Vec<&Property> = self
            .properties
            .iter()
            .filter(|p| matches(p, criteria))
            .collect();
        hits.sort_by(|a, b| compare(a, b, criteria.sort_by, criteria.sort_order));
        hits
    }
}

#[async_trait]
impl PropertyStore for InMemoryStore {
    async fn count_matching(&self, criteria: &SearchCriteria) -> Result<i64, SearchError> {
        Ok(self.sorted_matches(criteria).len() as i64)
    }

    async fn fetch_page(&self, criteria: &SearchCriteria) -> Result<Vec<Property>, SearchError> {
        Ok(self
            .sorted_matches(criteria)
            .into_iter()
            .skip(criteria.offset() as usize)
            .take(criteria.limit as usize)
            .cloned()
            .collect())
    }

    async fn fetch_markers(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<Vec<MapMarkerDto>, SearchError> {
        Ok(self
            .sorted_matches(criteria)
            .into_iter()
            .map(MapMarkerDto::from_property)
            .collect())
    }
}

/// Published listing under an active agency; tests overwrite the fields a
/// scenario cares about.
pub fn listing(seq: u128, title: &str, price: i64) -> Property {
    Property {
        id: Uuid::from_u128(seq),
        agency_id: Uuid::from_u128(1000),
        agency_slug: "acme-estates".to_string(),
        agency_status: AgencyStatus::Active,
        slug: format!("listing-{seq}"),
        is_published: true,
        status: ListingStatus::ForSale,
        property_type: PropertyType::House,
        title: title.to_string(),
        description: "Well presented family home close to local schools".to_string(),
        address_line1: "14 Orchard Lane".to_string(),
        city: "Leeds".to_string(),
        postcode: "LS1 4AP".to_string(),
        latitude: 53.8008,
        longitude: -1.5491,
        price,
        bedrooms: 3,
        images: Json(vec![]),
        created_at: Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .unwrap()
            + chrono::Duration::hours(seq as i64),
    }
}
