//! Campaigns Data

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::domain::{
    campaigns::{
        errors::CampaignsServiceError,
        records::{CampaignRecord, CampaignUuid},
    },
    categories::records::CategoryUuid,
};

/// Minimum percentage discount applied when a campaign does not set one.
pub const DEFAULT_MIN_DISCOUNT_PERCENT: Decimal = Decimal::TEN;

/// The writable part of a campaign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignDefinition {
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
}

impl CampaignDefinition {
    /// Check the rules storage does not enforce.
    ///
    /// # Errors
    ///
    /// Returns [`CampaignsServiceError::InvalidData`] naming the first broken rule.
    pub fn validate(&self) -> Result<(), CampaignsServiceError> {
        if self.name.trim().is_empty() {
            return Err(CampaignsServiceError::InvalidData("name must not be empty"));
        }

        if self.starts_at >= self.ends_at {
            return Err(CampaignsServiceError::InvalidData(
                "starts_at must be before ends_at",
            ));
        }

        if self.min_discount_percent < Decimal::ZERO
            || self.min_discount_percent > Decimal::ONE_HUNDRED
        {
            return Err(CampaignsServiceError::InvalidData(
                "min_discount_percent must be between 0 and 100",
            ));
        }

        if self.max_products_per_store == Some(0) {
            return Err(CampaignsServiceError::InvalidData(
                "max_products_per_store must be positive",
            ));
        }

        Ok(())
    }
}

impl From<CampaignRecord> for CampaignDefinition {
    fn from(record: CampaignRecord) -> Self {
        Self {
            name: record.name,
            description: record.description,
            starts_at: record.starts_at,
            ends_at: record.ends_at,
            min_discount_percent: record.min_discount_percent,
            max_products_per_store: record.max_products_per_store,
            allowed_categories: record.allowed_categories,
            requires_approval: record.requires_approval,
            is_active: record.is_active,
            is_featured: record.is_featured,
            badge_text: record.badge_text,
            badge_color: record.badge_color,
            list_banner: record.list_banner,
            detail_banner: record.detail_banner,
        }
    }
}

/// New Campaign Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCampaign {
    pub uuid: CampaignUuid,
    pub definition: CampaignDefinition,
}

/// Campaign Update Data
///
/// Only supplied fields replace the stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub min_discount_percent: Option<Decimal>,
    pub max_products_per_store: Option<u32>,
    pub allowed_categories: Option<Vec<CategoryUuid>>,

    /// Drop the allow-list so every category is permitted again. Takes
    /// precedence over `allowed_categories`.
    pub clear_allowed_categories: bool,
    pub requires_approval: Option<bool>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub badge_text: Option<String>,
    pub badge_color: Option<String>,
    pub list_banner: Option<String>,
    pub detail_banner: Option<String>,
}

impl CampaignUpdate {
    #[must_use]
    pub fn apply(self, current: CampaignDefinition) -> CampaignDefinition {
        CampaignDefinition {
            name: self.name.unwrap_or(current.name),
            description: self.description.or(current.description),
            starts_at: self.starts_at.unwrap_or(current.starts_at),
            ends_at: self.ends_at.unwrap_or(current.ends_at),
            min_discount_percent: self
                .min_discount_percent
                .unwrap_or(current.min_discount_percent),
            max_products_per_store: self
                .max_products_per_store
                .or(current.max_products_per_store),
            allowed_categories: if self.clear_allowed_categories {
                None
            } else {
                self.allowed_categories.or(current.allowed_categories)
            },
            requires_approval: self.requires_approval.unwrap_or(current.requires_approval),
            is_active: self.is_active.unwrap_or(current.is_active),
            is_featured: self.is_featured.unwrap_or(current.is_featured),
            badge_text: self.badge_text.or(current.badge_text),
            badge_color: self.badge_color.or(current.badge_color),
            list_banner: self.list_banner.or(current.list_banner),
            detail_banner: self.detail_banner.or(current.detail_banner),
        }
    }
}
