//! Withdraw Participation Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    participations::{errors::ParticipationError, models::MessageResponse},
    state::State,
};

/// Withdraw Participation Handler
///
/// Removes one of the caller's products from a campaign.
#[endpoint(
    tags("campaign-participations"),
    summary = "Withdraw Participation",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Participation withdrawn"),
    ),
)]
pub(crate) async fn handler(
    participation: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, ParticipationError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;
    let participation = participation.into_inner();

    state
        .app
        .participations
        .withdraw(caller, participation.into())
        .await?;

    tracing::info!(participation_uuid = %participation, "withdrew participation");

    Ok(Json(MessageResponse::new("Participation withdrawn")))
}
