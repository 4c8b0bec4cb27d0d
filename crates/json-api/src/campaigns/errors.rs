//! Campaign Errors

use salvo::http::StatusError;
use tracing::error;

use bazaar_app::domain::campaigns::CampaignsServiceError;

pub(crate) fn into_status_error(error: CampaignsServiceError) -> StatusError {
    match error {
        CampaignsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Campaign already exists")
        }
        CampaignsServiceError::NotFound => StatusError::not_found().brief("Campaign not found"),
        CampaignsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Unknown category in allowed_categories")
        }
        CampaignsServiceError::InvalidData(reason) => StatusError::bad_request().brief(reason),
        CampaignsServiceError::Sql(source) => {
            error!("campaign storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
