//! Categories Repository

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::domain::categories::{
    data::NewCategory,
    records::{CategoryRecord, CategoryUuid},
};

mod postgres;
mod sqlite;

pub use postgres::PgCategoriesRepository;
pub use sqlite::SqliteCategoriesRepository;

const CREATE_CATEGORY_SQL: &str = include_str!("../sql/create_category.sql");
const LIST_CATEGORIES_SQL: &str = include_str!("../sql/list_categories.sql");
const DELETE_CATEGORY_SQL: &str = include_str!("../sql/delete_category.sql");

#[automock]
#[async_trait]
pub trait CategoriesRepository: Send + Sync {
    async fn create_category(
        &self,
        category: NewCategory,
        at: Timestamp,
    ) -> Result<CategoryRecord, sqlx::Error>;

    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, sqlx::Error>;

    /// Returns the number of rows removed.
    async fn delete_category(&self, category: CategoryUuid) -> Result<u64, sqlx::Error>;
}
