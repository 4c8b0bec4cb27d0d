//! Point-in-time query parsing helpers.

use jiff::Timestamp;
use salvo::{oapi::extract::QueryParam, prelude::StatusError};

use crate::extensions::*;

pub(crate) trait PointInTimeExt {
    /// The `at` query parameter as a timestamp, defaulting to now.
    fn into_point_in_time(self) -> Result<Timestamp, StatusError>;
}

impl PointInTimeExt for QueryParam<String, false> {
    fn into_point_in_time(self) -> Result<Timestamp, StatusError> {
        let Some(value) = self.into_inner() else {
            return Ok(Timestamp::now());
        };

        value
            .parse::<Timestamp>()
            .or_400("could not parse \"at\" query parameter")
    }
}
