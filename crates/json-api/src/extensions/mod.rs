//! Handler helpers: typed depot access, error mapping and the `at` query
//! parameter. Imported anonymously so only the methods come into scope.

mod depot;
mod point_in_time;
mod result;

pub(crate) use depot::DepotExt as _;
pub(crate) use point_in_time::PointInTimeExt as _;
pub(crate) use result::ResultExt as _;
