//! Test Helpers

use jiff::Timestamp;
use testresult::TestResult;

use crate::{
    auth::{AuthService, NewUser, Role, UserRecord, UserUuid},
    domain::{
        campaigns::data::{CampaignDefinition, DEFAULT_MIN_DISCOUNT_PERCENT},
        categories::{
            CategoriesService,
            data::NewCategory,
            records::{CategoryRecord, CategoryUuid},
        },
        stores::{
            StoresService,
            data::NewStore,
            records::{StoreRecord, StoreUuid},
        },
    },
    test::TestContext,
};

/// The current time truncated to whole seconds, so values survive every
/// backend's timestamp precision unchanged.
pub(crate) fn now() -> Timestamp {
    Timestamp::from_second(Timestamp::now().as_second()).unwrap_or(Timestamp::UNIX_EPOCH)
}

pub(crate) async fn create_user(ctx: &TestContext, role: Role) -> TestResult<UserRecord> {
    let uuid = UserUuid::new();

    let user = ctx
        .auth
        .create_user(NewUser {
            uuid,
            name: format!("user-{uuid}"),
            role,
        })
        .await?;

    Ok(user)
}

/// A store-role user together with the store they own.
pub(crate) async fn create_store_owner(ctx: &TestContext) -> TestResult<(UserRecord, StoreRecord)> {
    let owner = create_user(ctx, Role::Store).await?;

    let store = ctx
        .stores
        .onboard_store(
            owner.uuid,
            NewStore {
                uuid: StoreUuid::new(),
                name: format!("store of {}", owner.name),
                description: None,
            },
        )
        .await?;

    Ok((owner, store))
}

pub(crate) async fn create_category(ctx: &TestContext, slug: &str) -> TestResult<CategoryRecord> {
    let category = ctx
        .categories
        .create_category(NewCategory {
            uuid: CategoryUuid::new(),
            name: slug.to_uppercase(),
            slug: slug.to_string(),
        })
        .await?;

    Ok(category)
}

/// An open, active campaign with no cap, no allow-list and no approval step.
pub(crate) fn campaign_definition(starts_at: Timestamp, ends_at: Timestamp) -> CampaignDefinition {
    CampaignDefinition {
        name: "Spring Market".to_string(),
        description: None,
        starts_at,
        ends_at,
        min_discount_percent: DEFAULT_MIN_DISCOUNT_PERCENT,
        max_products_per_store: None,
        allowed_categories: None,
        requires_approval: false,
        is_active: true,
        is_featured: false,
        badge_text: None,
        badge_color: None,
        list_banner: None,
        detail_banner: None,
    }
}
