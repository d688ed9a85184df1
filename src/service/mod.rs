pub mod error;
pub mod search_service;
