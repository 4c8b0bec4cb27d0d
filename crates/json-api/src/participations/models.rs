//! Participation response models.

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::participations::{ItemError, records::ParticipationRecord};

/// A product that was not admitted, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ItemErrorResponse {
    pub product_id: Uuid,
    pub error: String,
}

impl From<&ItemError> for ItemErrorResponse {
    fn from(error: &ItemError) -> Self {
        Self {
            product_id: error.product.into_uuid(),
            error: error.reason.to_string(),
        }
    }
}

/// Participation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ParticipationResponse {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub store_id: Uuid,
    pub product_id: Uuid,

    /// Set for percentage discounts
    #[salvo(schema(value_type = Option<String>))]
    pub discount_percent: Option<Decimal>,

    /// Set for fixed-amount discounts
    #[salvo(schema(value_type = Option<String>))]
    pub discount_fixed: Option<Decimal>,

    /// Product price when the participation was created
    #[salvo(schema(value_type = String))]
    pub original_price: Decimal,

    #[salvo(schema(value_type = String))]
    pub promo_price: Decimal,

    /// `pending`, `approved` or `rejected`
    pub status: String,

    pub approved_at: Option<String>,
    pub approved_by: Option<Uuid>,
    pub created_at: String,
}

impl From<ParticipationRecord> for ParticipationResponse {
    fn from(record: ParticipationRecord) -> Self {
        Self {
            id: record.uuid.into_uuid(),
            campaign_id: record.campaign.into_uuid(),
            store_id: record.store.into_uuid(),
            product_id: record.product.into_uuid(),
            discount_percent: record.discount.percent(),
            discount_fixed: record.discount.fixed(),
            original_price: record.original_price,
            promo_price: record.promo_price,
            status: record.status.to_string(),
            approved_at: record.approved_at.map(|at| at.to_string()),
            approved_by: record.approved_by.map(Into::into),
            created_at: record.created_at.to_string(),
        }
    }
}

/// Message-only response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
