//! Store Errors

use salvo::http::StatusError;
use tracing::error;

use bazaar_app::domain::stores::StoresServiceError;

pub(crate) fn into_status_error(error: StoresServiceError) -> StatusError {
    match error {
        StoresServiceError::AlreadyExists => {
            StatusError::conflict().brief("You already own a store")
        }
        StoresServiceError::NotFound => StatusError::not_found().brief("Store not found"),
        StoresServiceError::InvalidReference => StatusError::bad_request().brief("Unknown owner"),
        StoresServiceError::InvalidData(reason) => StatusError::bad_request().brief(reason),
        StoresServiceError::Sql(source) => {
            error!("store storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
