//! Products Data

use rust_decimal::Decimal;

use crate::domain::{categories::records::CategoryUuid, products::records::ProductUuid};

/// New Product Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub category: Option<CategoryUuid>,
    pub name: String,
    pub price: Decimal,
}

/// Product Update Data
///
/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductUpdate {
    pub category: Option<CategoryUuid>,
    pub name: Option<String>,
    pub price: Option<Decimal>,
}
