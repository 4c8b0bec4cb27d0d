//! Campaign Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{domain::categories::records::CategoryUuid, uuids::TypedUuid};

/// Campaign UUID
pub type CampaignUuid = TypedUuid<CampaignRecord>;

/// Campaign Record
///
/// `total_participants` and `total_products` are computed on read from the
/// pending and approved participations; they are never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignRecord {
    pub uuid: CampaignUuid,
    pub name: String,
    pub description: Option<String>,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub min_discount_percent: Decimal,
    pub max_products_per_store: Option<u32>,
    pub allowed_categories: Option<Vec<CategoryUuid>>,
    pub requires_approval: bool,
    pub is_active: bool,
    pub is_featured: bool,
    pub badge_text: Option<String>,
    pub badge_color: Option<String>,
    pub list_banner: Option<String>,
    pub detail_banner: Option<String>,
    pub total_participants: u64,
    pub total_products: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CampaignRecord {
    /// Whether `at` falls inside the campaign window, both ends inclusive.
    #[must_use]
    pub fn is_running_at(&self, at: Timestamp) -> bool {
        self.starts_at <= at && at <= self.ends_at
    }
}

/// A campaign a store can join, with the store's own enrolment count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableCampaign {
    pub campaign: CampaignRecord,
    pub my_participations: u64,
}
