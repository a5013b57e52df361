pub mod analysis;
pub mod development;
pub mod error;
pub mod metrics;
pub mod projection;
pub mod report;
pub mod search;
pub mod sensitivity;
pub mod time_value;
pub mod types;

pub use error::LeaseRentError;
pub use types::*;

/// Standard result type for all lease-rent operations
pub type LeaseRentResult<T> = Result<T, LeaseRentError>;
