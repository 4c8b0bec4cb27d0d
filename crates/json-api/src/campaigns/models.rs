//! Campaign models.

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::campaigns::records::CampaignRecord;

/// Campaign
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CampaignResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub starts_at: String,
    pub ends_at: String,

    /// Lowest percentage discount a participation may offer
    #[salvo(schema(value_type = String))]
    pub min_discount_percent: Decimal,

    pub max_products_per_store: Option<u32>,

    /// Categories products must belong to; `null` admits every category
    pub allowed_categories: Option<Vec<Uuid>>,

    pub requires_approval: bool,
    pub is_active: bool,
    pub is_featured: bool,
    pub badge_text: Option<String>,
    pub badge_color: Option<String>,
    pub list_banner: Option<String>,
    pub detail_banner: Option<String>,

    /// Stores with a pending or approved participation
    pub total_participants: u64,

    /// Pending and approved participations
    pub total_products: u64,

    pub created_at: String,
    pub updated_at: String,
}

impl From<CampaignRecord> for CampaignResponse {
    fn from(campaign: CampaignRecord) -> Self {
        Self {
            id: campaign.uuid.into_uuid(),
            name: campaign.name,
            description: campaign.description,
            starts_at: campaign.starts_at.to_string(),
            ends_at: campaign.ends_at.to_string(),
            min_discount_percent: campaign.min_discount_percent,
            max_products_per_store: campaign.max_products_per_store,
            allowed_categories: campaign
                .allowed_categories
                .map(|categories| categories.into_iter().map(Into::into).collect()),
            requires_approval: campaign.requires_approval,
            is_active: campaign.is_active,
            is_featured: campaign.is_featured,
            badge_text: campaign.badge_text,
            badge_color: campaign.badge_color,
            list_banner: campaign.list_banner,
            detail_banner: campaign.detail_banner,
            total_participants: campaign.total_participants,
            total_products: campaign.total_products,
            created_at: campaign.created_at.to_string(),
            updated_at: campaign.updated_at.to_string(),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use bazaar_app::domain::campaigns::{
        data::DEFAULT_MIN_DISCOUNT_PERCENT, records::CampaignUuid,
    };
    use jiff::{Timestamp, ToSpan};

    use super::*;

    pub(crate) fn make_campaign() -> CampaignRecord {
        let starts_at = Timestamp::UNIX_EPOCH;

        CampaignRecord {
            uuid: CampaignUuid::new(),
            name: "Spring Market".to_string(),
            description: None,
            starts_at,
            ends_at: starts_at + 24.hours(),
            min_discount_percent: DEFAULT_MIN_DISCOUNT_PERCENT,
            max_products_per_store: None,
            allowed_categories: None,
            requires_approval: false,
            is_active: true,
            is_featured: false,
            badge_text: None,
            badge_color: None,
            list_banner: None,
            detail_banner: None,
            total_participants: 0,
            total_products: 0,
            created_at: starts_at,
            updated_at: starts_at,
        }
    }
}
