use serde::{Deserialize, Serialize};

use crate::models::agencymodel::Agency;

/// Public branding projection of an agency, served to the portal frontend.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgencyBrandingDto {
    pub name: String,
    pub slug: String,
    pub email: String,
    pub phone: Option<String>,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
}

impl AgencyBrandingDto {
    pub fn from_agency(agency: &Agency) -> Self {
        Self {
            name: agency.name.clone(),
            slug: agency.slug.clone(),
            email: agency.email.clone(),
            phone: agency.phone.clone(),
            logo_url: agency.logo_url.clone(),
            primary_color: agency.primary_color.clone(),
        }
    }
}
