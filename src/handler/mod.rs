pub mod agencies;
pub mod enquiries;
pub mod properties;
