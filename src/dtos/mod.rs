pub mod agencydtos;
pub mod enquirydtos;
pub mod propertydtos;
