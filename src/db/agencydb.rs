use async_trait::async_trait;
use uuid::Uuid;

use crate::{db::db::DBClient, models::agencymodel::Agency};

const AGENCY_COLUMNS: &str =
    "id, name, slug, status, email, phone, logo_url, primary_color, created_at";

#[async_trait]
pub trait AgencyExt {
    async fn get_agency_by_id(&self, agency_id: Uuid) -> Result<Option<Agency>, sqlx::Error>;

    async fn get_agency_by_slug(&self, slug: &str) -> Result<Option<Agency>, sqlx::Error>;
}

#[async_trait]
impl AgencyExt for DBClient {
    async fn get_agency_by_id(&self, agency_id: Uuid) -> Result<Option<Agency>, sqlx::Error> {
        let agency = sqlx::query_as::<_, Agency>(&format!(
            "SELECT {} FROM agencies WHERE id = $1",
            AGENCY_COLUMNS
        ))
        .bind(agency_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(agency)
    }

    async fn get_agency_by_slug(&self, slug: &str) -> Result<Option<Agency>, sqlx::Error> {
        let agency = sqlx::query_as::<_, Agency>(&format!(
            "SELECT {} FROM agencies WHERE slug = $1",
            AGENCY_COLUMNS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(agency)
    }
}
