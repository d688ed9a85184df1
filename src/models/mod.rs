pub mod agencymodel;
pub mod enquirymodel;
pub mod propertymodel;
