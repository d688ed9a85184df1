use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    db::db::DBClient,
    dtos::propertydtos::{CreatePropertyDto, MapMarkerDto},
    models::{agencymodel::AgencyStatus, propertymodel::Property},
    service::{
        error::SearchError,
        search_service::{PropertyStore, SearchCriteria},
    },
};

const PROPERTY_COLUMNS: &str = "p.id, p.agency_id, a.slug AS agency_slug, \
    a.status AS agency_status, p.slug, p.is_published, p.status, p.property_type, \
    p.title, p.description, p.address_line1, p.city, p.postcode, p.latitude, \
    p.longitude, p.price, p.bedrooms, p.images, p.created_at";

/// LIKE treats `%`, `_` and `\` as metacharacters; criteria values are plain
/// substrings, so escape them before they go into a pattern.
fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Compile the search criteria into the WHERE clause. Mirrors
/// `search_service::matches` condition for condition; the eligibility
/// invariant is pushed unconditionally before any caller-supplied filter.
fn push_search_filters(builder: &mut QueryBuilder<'_, Postgres>, criteria: &SearchCriteria) {
    builder.push(" WHERE p.is_published = TRUE AND a.status = ");
    builder.push_bind(AgencyStatus::Active);

    if let Some(slug) = &criteria.agency_slug {
        builder.push(" AND a.slug = ");
        builder.push_bind(slug.clone());
    }

    if let Some(status) = criteria.status {
        builder.push(" AND p.status = ");
        builder.push_bind(status);
    }

    if let Some(min) = criteria.min_price {
        builder.push(" AND p.price >= ");
        builder.push_bind(min);
    }
    if let Some(max) = criteria.max_price {
        builder.push(" AND p.price <= ");
        builder.push_bind(max);
    }

    if let Some(min) = criteria.min_bedrooms {
        builder.push(" AND p.bedrooms >= ");
        builder.push_bind(min);
    }
    if let Some(max) = criteria.max_bedrooms {
        builder.push(" AND p.bedrooms <= ");
        builder.push_bind(max);
    }

    if let Some(property_type) = criteria.property_type {
        builder.push(" AND p.property_type = ");
        builder.push_bind(property_type);
    }

    if let Some(keyword) = &criteria.keyword {
        let pattern = format!("%{}%", escape_like(keyword));
        builder.push(" AND (p.title ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" ESCAPE '\\' OR p.description ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" ESCAPE '\\' OR p.address_line1 ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" ESCAPE '\\' OR p.city ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" ESCAPE '\\' OR p.postcode ILIKE ");
        builder.push_bind(pattern);
        builder.push(" ESCAPE '\\')");
    }

    if let Some(city) = &criteria.city {
        builder.push(" AND p.city ILIKE ");
        builder.push_bind(format!("%{}%", escape_like(city)));
        builder.push(" ESCAPE '\\'");
    }

    if let Some(postcode) = &criteria.postcode {
        // Criteria postcode is already uppercased; prefix match only.
        builder.push(" AND UPPER(p.postcode) LIKE ");
        builder.push_bind(format!("{}%", escape_like(postcode)));
        builder.push(" ESCAPE '\\'");
    }
}

/// Sort columns come from the allow-listed `SortField` enum, never from the
/// raw query string, so they are safe to splice into the statement.
fn push_sort_order(builder: &mut QueryBuilder<'_, Postgres>, criteria: &SearchCriteria) {
    builder.push(" ORDER BY p.");
    builder.push(criteria.sort_by.column());
    builder.push(" ");
    builder.push(criteria.sort_order.keyword());
    builder.push(", p.id ASC");
}

#[async_trait]
impl PropertyStore for DBClient {
    async fn count_matching(&self, criteria: &SearchCriteria) -> Result<i64, SearchError> {
        let mut builder = QueryBuilder::new(
            "SELECT COUNT(*) FROM properties p JOIN agencies a ON a.id = p.agency_id",
        );
        push_search_filters(&mut builder, criteria);

        let total = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn fetch_page(&self, criteria: &SearchCriteria) -> Result<Vec<Property>, SearchError> {
        let mut builder = QueryBuilder::new(format!(
            "SELECT {} FROM properties p JOIN agencies a ON a.id = p.agency_id",
            PROPERTY_COLUMNS
        ));
        push_search_filters(&mut builder, criteria);
        push_sort_order(&mut builder, criteria);
        builder.push(" LIMIT ");
        builder.push_bind(criteria.limit as i64);
        builder.push(" OFFSET ");
        builder.push_bind(criteria.offset());

        let properties = builder
            .build_query_as::<Property>()
            .fetch_all(&self.pool)
            .await?;

        Ok(properties)
    }

    async fn fetch_markers(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<Vec<MapMarkerDto>, SearchError> {
        let mut builder = QueryBuilder::new(
            "SELECT p.id, p.latitude, p.longitude, p.price, p.title, p.status \
             FROM properties p JOIN agencies a ON a.id = p.agency_id",
        );
        push_search_filters(&mut builder, criteria);
        push_sort_order(&mut builder, criteria);

        let markers = builder
            .build_query_as::<MapMarkerDto>()
            .fetch_all(&self.pool)
            .await?;

        Ok(markers)
    }
}

#[async_trait]
pub trait PropertyExt {
    async fn get_property_by_id(&self, property_id: Uuid) -> Result<Option<Property>, sqlx::Error>;

    async fn slug_exists(&self, agency_id: Uuid, slug: &str) -> Result<bool, sqlx::Error>;

    async fn create_property(
        &self,
        slug: &str,
        property_data: &CreatePropertyDto,
    ) -> Result<Property, sqlx::Error>;
}

#[async_trait]
impl PropertyExt for DBClient {
    async fn get_property_by_id(&self, property_id: Uuid) -> Result<Option<Property>, sqlx::Error> {
        let property = sqlx::query_as::<_, Property>(&format!(
            "SELECT {} FROM properties p JOIN agencies a ON a.id = p.agency_id WHERE p.id = $1",
            PROPERTY_COLUMNS
        ))
        .bind(property_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(property)
    }

    async fn slug_exists(&self, agency_id: Uuid, slug: &str) -> Result<bool, sqlx::Error> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM properties WHERE agency_id = $1 AND slug = $2)",
        )
        .bind(agency_id)
        .bind(slug)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn create_property(
        &self,
        slug: &str,
        property_data: &CreatePropertyDto,
    ) -> Result<Property, sqlx::Error> {
        let images = Json(property_data.images.clone().unwrap_or_default());

        let property_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO properties (
                agency_id, slug, is_published, status, property_type, title, description,
                address_line1, city, postcode, latitude, longitude, price, bedrooms, images
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING id
            "#,
        )
        .bind(property_data.agency_id)
        .bind(slug)
        .bind(property_data.is_published.unwrap_or(false))
        .bind(property_data.status)
        .bind(property_data.property_type)
        .bind(&property_data.title)
        .bind(&property_data.description)
        .bind(&property_data.address_line1)
        .bind(&property_data.city)
        .bind(&property_data.postcode)
        .bind(property_data.latitude)
        .bind(property_data.longitude)
        .bind(property_data.price)
        .bind(property_data.bedrooms)
        .bind(images)
        .fetch_one(&self.pool)
        .await?;

        self.get_property_by_id(property_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("two_bed"), "two\\_bed");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("garden"), "garden");
    }

    #[test]
    fn substring_filters_carry_an_escape_clause() {
        let criteria = SearchCriteria {
            keyword: Some("100%".to_string()),
            city: Some("leeds".to_string()),
            postcode: Some("LS1".to_string()),
            ..SearchCriteria::default()
        };

        let mut builder = QueryBuilder::new(
            "SELECT COUNT(*) FROM properties p JOIN agencies a ON a.id = p.agency_id",
        );
        push_search_filters(&mut builder, &criteria);

        let sql = builder.sql();
        assert_eq!(sql.matches("ESCAPE '\\'").count(), 7);
    }

    #[test]
    fn keyword_pattern_matches_percent_literally() {
        // "100%" must only match titles containing the literal string "100%".
        assert_eq!(format!("%{}%", escape_like("100%")), "%100\\%%");
    }
}
