//! Store Records

use jiff::Timestamp;

use crate::{auth::UserUuid, uuids::TypedUuid};

/// Store UUID
pub type StoreUuid = TypedUuid<StoreRecord>;

/// Store Record
///
/// A user owns at most one store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreRecord {
    pub uuid: StoreUuid,
    pub owner: UserUuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
}
