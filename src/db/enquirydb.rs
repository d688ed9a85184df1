use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::db::DBClient,
    dtos::enquirydtos::{CreateEnquiryDto, EnquiryWithPropertyDto, UpdateEnquiryDto},
    models::enquirymodel::{Enquiry, EnquiryStatus},
};

const ENQUIRY_COLUMNS: &str = "id, property_id, agency_id, name, email, phone, message, \
    status, internal_notes, responded_at, closed_at, created_at";

#[async_trait]
pub trait EnquiryExt {
    async fn create_enquiry(
        &self,
        agency_id: Uuid,
        enquiry_data: &CreateEnquiryDto,
    ) -> Result<Enquiry, sqlx::Error>;

    async fn update_enquiry(
        &self,
        enquiry_id: Uuid,
        enquiry_data: &UpdateEnquiryDto,
    ) -> Result<Option<Enquiry>, sqlx::Error>;

    async fn get_enquiries_for_agency(
        &self,
        agency_id: Uuid,
    ) -> Result<Vec<EnquiryWithPropertyDto>, sqlx::Error>;
}

#[async_trait]
impl EnquiryExt for DBClient {
    async fn create_enquiry(
        &self,
        agency_id: Uuid,
        enquiry_data: &CreateEnquiryDto,
    ) -> Result<Enquiry, sqlx::Error> {
        let enquiry = sqlx::query_as::<_, Enquiry>(&format!(
            r#"
            INSERT INTO enquiries (property_id, agency_id, name, email, phone, message, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            ENQUIRY_COLUMNS
        ))
        .bind(enquiry_data.property_id)
        .bind(agency_id)
        .bind(&enquiry_data.name)
        .bind(&enquiry_data.email)
        .bind(&enquiry_data.phone)
        .bind(&enquiry_data.message)
        .bind(EnquiryStatus::New)
        .fetch_one(&self.pool)
        .await?;

        Ok(enquiry)
    }

    async fn update_enquiry(
        &self,
        enquiry_id: Uuid,
        enquiry_data: &UpdateEnquiryDto,
    ) -> Result<Option<Enquiry>, sqlx::Error> {
        // SET expressions read the pre-update row, so the CASE arms only
        // stamp a timestamp on an actual transition into that status.
        let enquiry = sqlx::query_as::<_, Enquiry>(&format!(
            r#"
            UPDATE enquiries
            SET status = COALESCE($2, status),
                internal_notes = COALESCE($3, internal_notes),
                responded_at = CASE
                    WHEN $2 = 'RESPONDED' AND status <> 'RESPONDED' THEN NOW()
                    ELSE responded_at
                END,
                closed_at = CASE
                    WHEN $2 = 'CLOSED' AND status <> 'CLOSED' THEN NOW()
                    ELSE closed_at
                END
            WHERE id = $1
            RETURNING {}
            "#,
            ENQUIRY_COLUMNS
        ))
        .bind(enquiry_id)
        .bind(enquiry_data.status)
        .bind(&enquiry_data.internal_notes)
        .fetch_optional(&self.pool)
        .await?;

        Ok(enquiry)
    }

    async fn get_enquiries_for_agency(
        &self,
        agency_id: Uuid,
    ) -> Result<Vec<EnquiryWithPropertyDto>, sqlx::Error> {
        let enquiries = sqlx::query_as::<_, EnquiryWithPropertyDto>(
            r#"
            SELECT
                e.id, e.property_id, e.agency_id, e.name, e.email, e.phone, e.message,
                e.status, e.created_at,
                p.title AS property_title, p.slug AS property_slug
            FROM enquiries e
            JOIN properties p ON p.id = e.property_id
            WHERE e.agency_id = $1
            ORDER BY e.created_at DESC
            "#,
        )
        .bind(agency_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(enquiries)
    }
}
