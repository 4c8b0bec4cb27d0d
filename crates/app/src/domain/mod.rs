//! Bazaar Domain Concerns

pub mod campaigns;
pub mod categories;
pub mod participations;
pub mod products;
pub mod stores;
