//! Categories service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::domain::categories::{
    data::NewCategory,
    errors::CategoriesServiceError,
    records::{CategoryRecord, CategoryUuid},
    repository::CategoriesRepository,
};

#[derive(Clone)]
pub struct DbCategoriesService {
    repository: Arc<dyn CategoriesRepository>,
}

impl DbCategoriesService {
    #[must_use]
    pub fn new(repository: Arc<dyn CategoriesRepository>) -> Self {
        Self { repository }
    }
}

impl std::fmt::Debug for DbCategoriesService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbCategoriesService").finish_non_exhaustive()
    }
}

/// Slugs are lowercase ascii words joined by single hyphens.
fn is_valid_slug(slug: &str) -> bool {
    slug.split('-').all(|part| {
        !part.is_empty()
            && part
                .bytes()
                .all(|byte| byte.is_ascii_lowercase() || byte.is_ascii_digit())
    })
}

#[async_trait]
impl CategoriesService for DbCategoriesService {
    #[tracing::instrument(
        name = "categories.service.create_category",
        skip(self, category),
        fields(category_uuid = %category.uuid, slug = %category.slug),
        err
    )]
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        if category.name.trim().is_empty() {
            return Err(CategoriesServiceError::InvalidData("name must not be empty"));
        }

        if !is_valid_slug(&category.slug) {
            return Err(CategoriesServiceError::InvalidData(
                "slug must be lowercase letters, digits and single hyphens",
            ));
        }

        let created = self
            .repository
            .create_category(category, Timestamp::now())
            .await?;

        info!("created category");

        Ok(created)
    }

    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CategoriesServiceError> {
        Ok(self.repository.list_categories().await?)
    }

    #[tracing::instrument(
        name = "categories.service.delete_category",
        skip(self),
        fields(category_uuid = %category),
        err
    )]
    async fn delete_category(&self, category: CategoryUuid) -> Result<(), CategoriesServiceError> {
        let rows_affected = self.repository.delete_category(category).await?;

        if rows_affected == 0 {
            return Err(CategoriesServiceError::NotFound);
        }

        info!("deleted category");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// Creates a category with a unique slug.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Lists every category, alphabetically.
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CategoriesServiceError>;

    /// Deletes a category. Products in it become uncategorised.
    async fn delete_category(&self, category: CategoryUuid) -> Result<(), CategoriesServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn new_category(name: &str, slug: &str) -> NewCategory {
        NewCategory {
            uuid: CategoryUuid::new(),
            name: name.to_string(),
            slug: slug.to_string(),
        }
    }

    #[test]
    fn slug_validation() {
        assert!(is_valid_slug("fresh-produce"));
        assert!(is_valid_slug("bakery2"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Fresh"));
        assert!(!is_valid_slug("fresh--produce"));
        assert!(!is_valid_slug("-fresh"));
    }

    #[tokio::test]
    async fn create_category_returns_record() -> TestResult {
        let ctx = TestContext::new().await?;
        let category = new_category("Bakery", "bakery");
        let uuid = category.uuid;

        let created = ctx.categories.create_category(category).await?;

        assert_eq!(created.uuid, uuid);
        assert_eq!(created.name, "Bakery");
        assert_eq!(created.slug, "bakery");

        Ok(())
    }

    #[tokio::test]
    async fn create_category_duplicate_slug_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await?;

        ctx.categories
            .create_category(new_category("Bakery", "bakery"))
            .await?;

        let result = ctx
            .categories
            .create_category(new_category("Bread", "bakery"))
            .await;

        assert!(
            matches!(result, Err(CategoriesServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_category_rejects_bad_slug() -> TestResult {
        let ctx = TestContext::new().await?;

        let result = ctx
            .categories
            .create_category(new_category("Bakery", "Bake Ry"))
            .await;

        assert!(
            matches!(result, Err(CategoriesServiceError::InvalidData(_))),
            "expected InvalidData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_categories_is_alphabetical() -> TestResult {
        let ctx = TestContext::new().await?;

        ctx.categories
            .create_category(new_category("Produce", "produce"))
            .await?;
        ctx.categories
            .create_category(new_category("Bakery", "bakery"))
            .await?;

        let names: Vec<String> = ctx
            .categories
            .list_categories()
            .await?
            .into_iter()
            .map(|category| category.name)
            .collect();

        assert_eq!(names, vec!["Bakery".to_string(), "Produce".to_string()]);

        Ok(())
    }

    #[tokio::test]
    async fn delete_category_unknown_uuid_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await?;

        let result = ctx.categories.delete_category(CategoryUuid::new()).await;

        assert!(
            matches!(result, Err(CategoriesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }
}
