//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use bazaar_app::auth::Caller;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Stores the authenticated caller for downstream handlers.
    fn insert_caller(&mut self, caller: Caller);

    /// The caller injected by the auth middleware; 401 when absent.
    fn caller_or_401(&self) -> Result<Caller, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_caller(&mut self, caller: Caller) {
        self.inject(caller);
    }

    fn caller_or_401(&self) -> Result<Caller, StatusError> {
        self.obtain::<Caller>()
            .copied()
            .map_err(|_ignored| StatusError::unauthorized().brief("Authentication required"))
    }
}

#[cfg(test)]
mod tests {
    use bazaar_app::auth::{Role, UserUuid};
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn caller_round_trips_through_depot() {
        let caller = Caller {
            user: UserUuid::new(),
            role: Role::Store,
        };

        let mut depot = Depot::new();
        depot.insert_caller(caller);

        assert_eq!(depot.caller_or_401().ok(), Some(caller));
    }

    #[test]
    fn missing_caller_is_unauthorized() {
        let depot = Depot::new();

        let status = depot.caller_or_401().err().map(|error| error.code);

        assert_eq!(status, Some(StatusCode::UNAUTHORIZED));
    }
}
