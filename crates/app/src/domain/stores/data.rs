//! Stores Data

use crate::domain::stores::records::StoreUuid;

/// New Store Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStore {
    pub uuid: StoreUuid,
    pub name: String,
    pub description: Option<String>,
}
