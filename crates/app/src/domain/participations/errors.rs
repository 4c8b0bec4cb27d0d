//! Participations service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::products::records::ProductUuid;

/// A batch precondition that does not hold in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidState {
    #[error("campaign not active")]
    CampaignNotActive,

    #[error("campaign disabled")]
    CampaignDisabled,

    #[error("discount below minimum")]
    DiscountBelowMinimum,

    #[error("discount out of range")]
    DiscountOutOfRange,

    #[error("status must be approved or rejected")]
    InvalidStatus,
}

/// Why one product of a batch was not admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ItemRejection {
    #[error("not found or not owned by your store")]
    NotOwned,

    #[error("category not allowed")]
    CategoryNotAllowed,

    #[error("already participating")]
    AlreadyParticipating,

    #[error("failed to process product")]
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemError {
    pub product: ProductUuid,
    pub reason: ItemRejection,
}

#[derive(Debug, Error)]
pub enum ParticipationsServiceError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("caller does not own a store")]
    StoreNotFound,

    #[error("campaign not found")]
    CampaignNotFound,

    #[error("participation not found")]
    NotFound,

    #[error(transparent)]
    InvalidState(#[from] InvalidState),

    #[error(
        "max products per store exceeded: limit {limit}, already enrolled {existing}, requested {requested}"
    )]
    LimitExceeded {
        limit: u32,
        existing: u64,
        requested: usize,
    },

    #[error("caller is not allowed to perform this action")]
    Forbidden,

    #[error("no products were added to the campaign")]
    NoneAccepted(Vec<ItemError>),

    #[error("related resource not found")]
    InvalidReference,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ParticipationsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(_) | None => Self::Sql(error),
        }
    }
}
