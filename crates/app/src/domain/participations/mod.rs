//! Campaign Participations
//!
//! Admission of a store's products into a campaign. A batch is checked as a
//! whole first; then every product is admitted or rejected on its own.

pub mod data;
pub mod errors;
pub mod pricing;
pub mod records;
mod repository;
pub mod service;

pub use errors::{InvalidState, ItemError, ItemRejection, ParticipationsServiceError};
pub use repository::*;
pub use service::*;
