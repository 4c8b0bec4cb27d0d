//! Participations Data

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::domain::{
    campaigns::records::CampaignUuid,
    participations::{
        errors::ItemError,
        pricing::Discount,
        records::{ParticipationRecord, ParticipationStatus, ParticipationUuid},
    },
    products::records::ProductUuid,
    stores::records::StoreUuid,
};

/// A store's request to enrol products into a campaign, as received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipationRequest {
    pub campaign: Option<CampaignUuid>,
    pub products: Vec<ProductUuid>,
    pub discount_percent: Option<Decimal>,
    pub discount_fixed: Option<Decimal>,
}

/// New Participation Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewParticipation {
    pub uuid: ParticipationUuid,
    pub campaign: CampaignUuid,
    pub store: StoreUuid,
    pub product: ProductUuid,
    pub discount: Discount,
    pub original_price: Decimal,
    pub promo_price: Decimal,
    pub status: ParticipationStatus,
    pub approved_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Result of a batch in which at least one product was admitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub participations: Vec<ParticipationRecord>,
    pub requires_approval: bool,
    pub errors: Vec<ItemError>,
}
