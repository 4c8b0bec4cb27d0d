//! Participation Errors
//!
//! The admission routes answer with `{ "error": ..., "details": [...] }`
//! bodies rather than plain status briefs.

use salvo::{
    oapi::{self, Components, EndpointOutRegister, Operation, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use bazaar_app::domain::participations::ParticipationsServiceError;

use crate::participations::models::ItemErrorResponse;

/// Participation error body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorResponse {
    /// What went wrong
    pub error: String,

    /// Per-product rejections, when no product was admitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ItemErrorResponse>>,
}

#[derive(Debug)]
pub(crate) enum ParticipationError {
    /// Errors raised before the request reaches the service.
    Status(StatusError),

    Body {
        status: StatusCode,
        body: ErrorResponse,
    },
}

impl ParticipationError {
    pub(crate) fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self::Body {
            status,
            body: ErrorResponse {
                error: error.into(),
                details: None,
            },
        }
    }
}

impl From<StatusError> for ParticipationError {
    fn from(error: StatusError) -> Self {
        Self::Status(error)
    }
}

impl From<ParticipationsServiceError> for ParticipationError {
    fn from(error: ParticipationsServiceError) -> Self {
        let status = match &error {
            ParticipationsServiceError::MissingField(_)
            | ParticipationsServiceError::InvalidState(_)
            | ParticipationsServiceError::LimitExceeded { .. }
            | ParticipationsServiceError::InvalidReference => StatusCode::BAD_REQUEST,
            ParticipationsServiceError::StoreNotFound
            | ParticipationsServiceError::CampaignNotFound
            | ParticipationsServiceError::NotFound => StatusCode::NOT_FOUND,
            ParticipationsServiceError::Forbidden => StatusCode::FORBIDDEN,
            ParticipationsServiceError::NoneAccepted(errors) => {
                return Self::Body {
                    status: StatusCode::BAD_REQUEST,
                    body: ErrorResponse {
                        error: error.to_string(),
                        details: Some(errors.iter().map(ItemErrorResponse::from).collect()),
                    },
                };
            }
            ParticipationsServiceError::Sql(source) => {
                error!("participation storage error: {source}");

                return Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
            }
        };

        Self::new(status, error.to_string())
    }
}

impl Scribe for ParticipationError {
    fn render(self, res: &mut Response) {
        match self {
            Self::Status(error) => res.render(error),
            Self::Body { status, body } => {
                res.status_code(status);
                res.render(Json(body));
            }
        }
    }
}

impl EndpointOutRegister for ParticipationError {
    fn register(components: &mut Components, operation: &mut Operation) {
        let schema = ErrorResponse::to_schema(components);

        for (status, description) in [
            ("400", "Bad Request"),
            ("401", "Unauthorized"),
            ("403", "Forbidden"),
            ("404", "Not Found"),
            ("500", "Internal Server Error"),
        ] {
            operation.responses.insert(
                status,
                oapi::Response::new(description)
                    .add_content("application/json", oapi::Content::new(schema.clone())),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::{
        participations::{InvalidState, ItemError, ItemRejection},
        products::records::ProductUuid,
    };
    use testresult::TestResult;

    use super::*;

    fn status_of(error: ParticipationsServiceError) -> Option<StatusCode> {
        match ParticipationError::from(error) {
            ParticipationError::Body { status, .. } => Some(status),
            ParticipationError::Status(_) => None,
        }
    }

    #[test]
    fn taxonomy_maps_to_status_codes() {
        assert_eq!(
            status_of(ParticipationsServiceError::MissingField("campaign_id")),
            Some(StatusCode::BAD_REQUEST)
        );
        assert_eq!(
            status_of(InvalidState::CampaignNotActive.into()),
            Some(StatusCode::BAD_REQUEST)
        );
        assert_eq!(
            status_of(ParticipationsServiceError::LimitExceeded {
                limit: 2,
                existing: 1,
                requested: 2,
            }),
            Some(StatusCode::BAD_REQUEST)
        );
        assert_eq!(
            status_of(ParticipationsServiceError::CampaignNotFound),
            Some(StatusCode::NOT_FOUND)
        );
        assert_eq!(
            status_of(ParticipationsServiceError::Forbidden),
            Some(StatusCode::FORBIDDEN)
        );
    }

    #[test]
    fn none_accepted_carries_details() -> TestResult {
        let product = ProductUuid::new();

        let error = ParticipationError::from(ParticipationsServiceError::NoneAccepted(vec![
            ItemError {
                product,
                reason: ItemRejection::AlreadyParticipating,
            },
        ]));

        let ParticipationError::Body { status, body } = error else {
            return Err("expected a JSON body".into());
        };

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "no products were added to the campaign");
        assert_eq!(
            body.details,
            Some(vec![ItemErrorResponse {
                product_id: product.into_uuid(),
                error: "already participating".to_string(),
            }])
        );

        Ok(())
    }
}
