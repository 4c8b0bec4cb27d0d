//! Participation Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    auth::UserUuid,
    domain::{
        campaigns::records::CampaignUuid, participations::pricing::Discount,
        products::records::ProductUuid, stores::records::StoreUuid,
    },
    uuids::TypedUuid,
};

/// Participation UUID
pub type ParticipationUuid = TypedUuid<ParticipationRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticipationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ParticipationStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ParticipationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown participation status `{0}`")]
pub struct UnknownStatus(pub String);

impl FromStr for ParticipationStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Participation Record
///
/// `original_price` is the product price when the participation was created;
/// later price changes do not touch it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipationRecord {
    pub uuid: ParticipationUuid,
    pub campaign: CampaignUuid,
    pub store: StoreUuid,
    pub product: ProductUuid,
    pub discount: Discount,
    pub original_price: Decimal,
    pub promo_price: Decimal,
    pub status: ParticipationStatus,
    pub approved_at: Option<Timestamp>,
    pub approved_by: Option<UserUuid>,
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_strings_round_trip() {
        for status in [
            ParticipationStatus::Pending,
            ParticipationStatus::Approved,
            ParticipationStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<ParticipationStatus>(), Ok(status));
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert_eq!(
            "archived".parse::<ParticipationStatus>(),
            Err(UnknownStatus("archived".to_string()))
        );
    }
}
