//! Store models.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::stores::records::StoreRecord;

/// Store
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StoreResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
}

impl From<StoreRecord> for StoreResponse {
    fn from(store: StoreRecord) -> Self {
        Self {
            id: store.uuid.into_uuid(),
            owner_id: store.owner.into_uuid(),
            name: store.name,
            description: store.description,
            created_at: store.created_at.to_string(),
        }
    }
}
