use std::cmp::Ordering;

use async_trait::async_trait;

use crate::{
    dtos::propertydtos::{
        MapMarkerDto, PaginationDto, PropertyListingDto, PropertySearchResponse, SearchQueryDto,
    },
    models::{
        agencymodel::AgencyStatus,
        propertymodel::{ListingStatus, Property, PropertyType},
    },
    service::error::SearchError,
};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 12;
pub const MAX_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    Price,
    Bedrooms,
}

impl SortField {
    /// Allow-listed sortable fields only; anything else is rejected before
    /// query construction.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "createdAt" => Some(SortField::CreatedAt),
            "price" => Some(SortField::Price),
            "bedrooms" => Some(SortField::Bedrooms),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::Price => "price",
            SortField::Bedrooms => "bedrooms",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Fully typed search criteria. Built once per request from the raw query
/// string; every supported filter is an explicit field so the predicate is
/// statically enumerable.
#[derive(Debug, Clone)]
pub struct SearchCriteria {
    pub status: Option<ListingStatus>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub min_bedrooms: Option<i32>,
    pub max_bedrooms: Option<i32>,
    pub property_type: Option<PropertyType>,
    pub keyword: Option<String>,
    pub city: Option<String>,
    /// Uppercased on the way in; matched as a prefix, not a substring.
    pub postcode: Option<String>,
    pub agency_slug: Option<String>,
    pub page: u32,
    pub limit: u32,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        SearchCriteria {
            status: None,
            min_price: None,
            max_price: None,
            min_bedrooms: None,
            max_bedrooms: None,
            property_type: None,
            keyword: None,
            city: None,
            postcode: None,
            agency_slug: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort_by: SortField::CreatedAt,
            sort_order: SortOrder::Desc,
        }
    }
}

impl SearchCriteria {
    /// Translate the wire-level query into typed criteria. Empty strings are
    /// treated as absent, numbers and enums are parsed strictly, and the
    /// `propertyType=all` sentinel is folded into "no filter" here so it
    /// never reaches the predicate.
    pub fn from_query(query: SearchQueryDto) -> Result<Self, SearchError> {
        let mut criteria = SearchCriteria::default();

        if let Some(value) = non_empty(query.status) {
            criteria.status = Some(ListingStatus::parse(&value).ok_or_else(|| {
                SearchError::validation("status", "must be one of FOR_SALE, TO_RENT")
            })?);
        }

        criteria.min_price = parse_bound_i64("minPrice", query.min_price)?;
        criteria.max_price = parse_bound_i64("maxPrice", query.max_price)?;
        criteria.min_bedrooms = parse_bound_i32("minBedrooms", query.min_bedrooms)?;
        criteria.max_bedrooms = parse_bound_i32("maxBedrooms", query.max_bedrooms)?;

        if let Some(value) = non_empty(query.property_type) {
            if !value.eq_ignore_ascii_case("all") {
                criteria.property_type = Some(PropertyType::parse(&value).ok_or_else(|| {
                    SearchError::validation("propertyType", format!("unknown property type '{}'", value))
                })?);
            }
        }

        criteria.keyword = non_empty(query.keyword);
        criteria.city = non_empty(query.city);
        criteria.postcode = non_empty(query.postcode).map(|p| p.to_uppercase());
        criteria.agency_slug = non_empty(query.agency_slug);

        if let Some(value) = non_empty(query.page) {
            let page: u32 = value
                .parse()
                .map_err(|_| SearchError::validation("page", format!("'{}' is not a number", value)))?;
            if page < 1 {
                return Err(SearchError::validation("page", "must be at least 1"));
            }
            criteria.page = page;
        }

        if let Some(value) = non_empty(query.limit) {
            let limit: u32 = value
                .parse()
                .map_err(|_| SearchError::validation("limit", format!("'{}' is not a number", value)))?;
            if !(1..=MAX_LIMIT).contains(&limit) {
                return Err(SearchError::validation(
                    "limit",
                    format!("must be between 1 and {}", MAX_LIMIT),
                ));
            }
            criteria.limit = limit;
        }

        if let Some(value) = non_empty(query.sort_by) {
            criteria.sort_by = SortField::parse(&value).ok_or_else(|| {
                SearchError::validation("sortBy", "must be one of createdAt, price, bedrooms")
            })?;
        }

        if let Some(value) = non_empty(query.sort_order) {
            criteria.sort_order = SortOrder::parse(&value)
                .ok_or_else(|| SearchError::validation("sortOrder", "must be asc or desc"))?;
        }

        Ok(criteria)
    }

    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.limit as i64
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_bound_i64(field: &'static str, value: Option<String>) -> Result<Option<i64>, SearchError> {
    match non_empty(value) {
        None => Ok(None),
        Some(raw) => {
            let parsed: i64 = raw
                .parse()
                .map_err(|_| SearchError::validation(field, format!("'{}' is not a number", raw)))?;
            if parsed < 0 {
                return Err(SearchError::validation(field, "must not be negative"));
            }
            Ok(Some(parsed))
        }
    }
}

fn parse_bound_i32(field: &'static str, value: Option<String>) -> Result<Option<i32>, SearchError> {
    match non_empty(value) {
        None => Ok(None),
        Some(raw) => {
            let parsed: i32 = raw
                .parse()
                .map_err(|_| SearchError::validation(field, format!("'{}' is not a number", raw)))?;
            if parsed < 0 {
                return Err(SearchError::validation(field, "must not be negative"));
            }
            Ok(Some(parsed))
        }
    }
}

/// Reference predicate for the search criteria. The Postgres store compiles
/// the same conditions to SQL; in-memory stores evaluate records with this
/// function directly.
pub fn matches(property: &Property, criteria: &SearchCriteria) -> bool {
    // Eligibility invariant, independent of caller-supplied filters.
    if !property.is_published || property.agency_status != AgencyStatus::Active {
        return false;
    }

    if let Some(slug) = &criteria.agency_slug {
        if &property.agency_slug != slug {
            return false;
        }
    }

    if let Some(status) = criteria.status {
        if property.status != status {
            return false;
        }
    }

    if let Some(min) = criteria.min_price {
        if property.price < min {
            return false;
        }
    }
    if let Some(max) = criteria.max_price {
        if property.price > max {
            return false;
        }
    }

    if let Some(min) = criteria.min_bedrooms {
        if property.bedrooms < min {
            return false;
        }
    }
    if let Some(max) = criteria.max_bedrooms {
        if property.bedrooms > max {
            return false;
        }
    }

    if let Some(property_type) = criteria.property_type {
        if property.property_type != property_type {
            return false;
        }
    }

    if let Some(keyword) = &criteria.keyword {
        let needle = keyword.to_lowercase();
        let hit = [
            &property.title,
            &property.description,
            &property.address_line1,
            &property.city,
            &property.postcode,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle));
        if !hit {
            return false;
        }
    }

    if let Some(city) = &criteria.city {
        if !property.city.to_lowercase().contains(&city.to_lowercase()) {
            return false;
        }
    }

    if let Some(postcode) = &criteria.postcode {
        // Prefix match, not substring; criteria postcode is already uppercase.
        if !property.postcode.to_uppercase().starts_with(postcode.as_str()) {
            return false;
        }
    }

    true
}

/// Total order over matching records: the requested sort field, then id
/// ascending so equal keys come back in the same order on every call.
pub fn compare(a: &Property, b: &Property, sort_by: SortField, sort_order: SortOrder) -> Ordering {
    let by_field = match sort_by {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::Price => a.price.cmp(&b.price),
        SortField::Bedrooms => a.bedrooms.cmp(&b.bedrooms),
    };

    let directed = match sort_order {
        SortOrder::Asc => by_field,
        SortOrder::Desc => by_field.reverse(),
    };

    directed.then_with(|| a.id.cmp(&b.id))
}

/// The record store the search runs against. `count` and `fetch_page` power
/// the paginated listing; `fetch_markers` returns the map projection for the
/// full filtered set, unwindowed.
#[async_trait]
pub trait PropertyStore {
    async fn count_matching(&self, criteria: &SearchCriteria) -> Result<i64, SearchError>;

    async fn fetch_page(&self, criteria: &SearchCriteria) -> Result<Vec<Property>, SearchError>;

    async fn fetch_markers(&self, criteria: &SearchCriteria)
        -> Result<Vec<MapMarkerDto>, SearchError>;
}

/// Run one search invocation: count the full match set, fetch the requested
/// page, fetch markers for every match, and shape the dual projection.
/// Stateless; a store failure aborts the whole response, never partial data.
pub async fn execute_search<S>(
    store: &S,
    criteria: &SearchCriteria,
) -> Result<PropertySearchResponse, SearchError>
where
    S: PropertyStore + ?Sized + Sync,
{
    let total = store.count_matching(criteria).await?;
    let page = store.fetch_page(criteria).await?;
    let map_data = store.fetch_markers(criteria).await?;

    let data = page.iter().map(PropertyListingDto::from_property).collect();

    Ok(PropertySearchResponse {
        data,
        map_data,
        pagination: PaginationDto::new(criteria.page, criteria.limit, total),
    })
}
