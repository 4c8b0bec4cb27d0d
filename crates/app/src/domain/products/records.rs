//! Product Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{categories::records::CategoryUuid, stores::records::StoreUuid},
    uuids::TypedUuid,
};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub store: StoreUuid,
    pub category: Option<CategoryUuid>,
    pub name: String,
    pub price: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
