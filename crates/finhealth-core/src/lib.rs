pub mod error;
pub mod ratios;
pub mod types;

#[cfg(feature = "scoring")]
pub mod scoring;

#[cfg(feature = "risk")]
pub mod risk;

#[cfg(feature = "optimization")]
pub mod optimization;

#[cfg(feature = "trends")]
pub mod trends;

#[cfg(feature = "report")]
pub mod report;

pub use error::FinHealthError;
pub use types::*;

/// Standard result type for all finhealth operations
pub type FinHealthResult<T> = Result<T, FinHealthError>;
