pub mod agencydb;
pub mod db;
pub mod enquirydb;
pub mod propertydb;
