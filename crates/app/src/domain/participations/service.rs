//! Participations service.
//!
//! [`ParticipationsService::submit`] is the admission engine. The batch
//! preconditions are checked in a fixed order and the first failure aborts
//! the batch. Products are then admitted one by one, in request order, and a
//! product that cannot be admitted never affects its siblings.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::FxHashSet;
use tracing::{Span, error, info};

use crate::{
    auth::{Caller, Role},
    domain::{
        campaigns::{
            CampaignsRepository,
            records::{AvailableCampaign, CampaignRecord, CampaignUuid},
        },
        categories::records::CategoryUuid,
        participations::{
            data::{NewParticipation, ParticipationRequest, SubmissionOutcome},
            errors::{InvalidState, ItemError, ItemRejection, ParticipationsServiceError},
            pricing::Discount,
            records::{ParticipationRecord, ParticipationStatus, ParticipationUuid},
            repository::ParticipationsRepository,
        },
        products::{ProductsRepository, records::ProductUuid},
        stores::{StoresRepository, records::StoreUuid},
    },
};

#[derive(Clone)]
pub struct DbParticipationsService {
    stores: Arc<dyn StoresRepository>,
    campaigns: Arc<dyn CampaignsRepository>,
    products: Arc<dyn ProductsRepository>,
    repository: Arc<dyn ParticipationsRepository>,
}

impl DbParticipationsService {
    #[must_use]
    pub fn new(
        stores: Arc<dyn StoresRepository>,
        campaigns: Arc<dyn CampaignsRepository>,
        products: Arc<dyn ProductsRepository>,
        repository: Arc<dyn ParticipationsRepository>,
    ) -> Self {
        Self {
            stores,
            campaigns,
            products,
            repository,
        }
    }

    async fn store_for(&self, caller: Caller) -> Result<StoreUuid, ParticipationsServiceError> {
        let store = self
            .stores
            .find_store_by_owner(caller.user)
            .await?
            .ok_or(ParticipationsServiceError::StoreNotFound)?;

        Span::current().record("store_uuid", tracing::field::display(store.uuid));

        Ok(store.uuid)
    }

    /// Admit a single product of a batch. Storage failures are logged and
    /// reported as [`ItemRejection::Failed`].
    async fn admit(
        &self,
        campaign: &CampaignRecord,
        store: StoreUuid,
        product: ProductUuid,
        discount: Discount,
        allowed: Option<&FxHashSet<CategoryUuid>>,
        at: Timestamp,
    ) -> Result<ParticipationRecord, ItemRejection> {
        let record = self
            .products
            .get_store_product(store, product)
            .await
            .map_err(|e| item_failed(product, &e))?
            .ok_or(ItemRejection::NotOwned)?;

        if let Some(allowed) = allowed {
            let permitted = record
                .category
                .is_some_and(|category| allowed.contains(&category));

            if !permitted {
                return Err(ItemRejection::CategoryNotAllowed);
            }
        }

        let (status, approved_at) = if campaign.requires_approval {
            (ParticipationStatus::Pending, None)
        } else {
            (ParticipationStatus::Approved, Some(at))
        };

        let participation = NewParticipation {
            uuid: ParticipationUuid::new(),
            campaign: campaign.uuid,
            store,
            product,
            discount,
            original_price: record.price,
            promo_price: discount.promo_price(record.price),
            status,
            approved_at,
            created_at: at,
        };

        self.repository
            .insert_participation(participation)
            .await
            .map_err(|e| item_failed(product, &e))?
            .ok_or(ItemRejection::AlreadyParticipating)
    }
}

impl std::fmt::Debug for DbParticipationsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbParticipationsService")
            .finish_non_exhaustive()
    }
}

fn item_failed(product: ProductUuid, error: &sqlx::Error) -> ItemRejection {
    error!(product_uuid = %product, %error, "failed to process product");

    ItemRejection::Failed
}

fn require_role(caller: Caller, role: Role) -> Result<(), ParticipationsServiceError> {
    if caller.role == role {
        Ok(())
    } else {
        Err(ParticipationsServiceError::Forbidden)
    }
}

#[async_trait]
impl ParticipationsService for DbParticipationsService {
    #[tracing::instrument(
        name = "participations.service.submit",
        skip(self, request),
        fields(
            user_uuid = %caller.user,
            store_uuid = tracing::field::Empty,
            campaign_uuid = tracing::field::Empty,
            requested = request.products.len(),
            accepted = tracing::field::Empty,
            rejected = tracing::field::Empty
        ),
        err
    )]
    async fn submit(
        &self,
        caller: Caller,
        request: ParticipationRequest,
        at: Timestamp,
    ) -> Result<SubmissionOutcome, ParticipationsServiceError> {
        require_role(caller, Role::Store)?;

        let campaign = request
            .campaign
            .ok_or(ParticipationsServiceError::MissingField("campaign_id"))?;

        Span::current().record("campaign_uuid", tracing::field::display(campaign));

        if request.products.is_empty() {
            return Err(ParticipationsServiceError::MissingField("product_ids"));
        }

        let discount = Discount::from_parts(request.discount_percent, request.discount_fixed)
            .ok_or(ParticipationsServiceError::MissingField(
                "discount_percent or discount_fixed",
            ))?;

        let store = self.store_for(caller).await?;

        let campaign = self
            .campaigns
            .get_campaign(campaign)
            .await?
            .ok_or(ParticipationsServiceError::CampaignNotFound)?;

        if !campaign.is_running_at(at) {
            return Err(InvalidState::CampaignNotActive.into());
        }

        if !campaign.is_active {
            return Err(InvalidState::CampaignDisabled.into());
        }

        if let Some(limit) = campaign.max_products_per_store {
            let existing = self
                .repository
                .count_active_store_participations(campaign.uuid, store)
                .await?;

            let requested = request.products.len();
            let total = u64::try_from(requested)
                .map_or(u64::MAX, |requested| existing.saturating_add(requested));

            if total > u64::from(limit) {
                return Err(ParticipationsServiceError::LimitExceeded {
                    limit,
                    existing,
                    requested,
                });
            }
        }

        discount.validate(campaign.min_discount_percent)?;

        let allowed: Option<FxHashSet<CategoryUuid>> = campaign
            .allowed_categories
            .as_ref()
            .map(|categories| categories.iter().copied().collect());

        let mut participations = Vec::with_capacity(request.products.len());
        let mut errors = Vec::new();

        for product in request.products {
            match self
                .admit(&campaign, store, product, discount, allowed.as_ref(), at)
                .await
            {
                Ok(participation) => participations.push(participation),
                Err(reason) => errors.push(ItemError { product, reason }),
            }
        }

        Span::current().record("accepted", participations.len());
        Span::current().record("rejected", errors.len());

        if participations.is_empty() {
            return Err(ParticipationsServiceError::NoneAccepted(errors));
        }

        info!("admitted products into campaign");

        Ok(SubmissionOutcome {
            participations,
            requires_approval: campaign.requires_approval,
            errors,
        })
    }

    #[tracing::instrument(
        name = "participations.service.withdraw",
        skip(self),
        fields(
            user_uuid = %caller.user,
            participation_uuid = %participation,
            store_uuid = tracing::field::Empty
        ),
        err
    )]
    async fn withdraw(
        &self,
        caller: Caller,
        participation: ParticipationUuid,
    ) -> Result<(), ParticipationsServiceError> {
        require_role(caller, Role::Store)?;

        let store = self.store_for(caller).await?;

        let rows_affected = self
            .repository
            .delete_store_participation(store, participation)
            .await?;

        if rows_affected == 0 {
            return Err(ParticipationsServiceError::NotFound);
        }

        info!("withdrew participation");

        Ok(())
    }

    #[tracing::instrument(
        name = "participations.service.set_status",
        skip(self),
        fields(user_uuid = %caller.user, participation_uuid = %participation, %status),
        err
    )]
    async fn set_status(
        &self,
        caller: Caller,
        participation: ParticipationUuid,
        status: ParticipationStatus,
        at: Timestamp,
    ) -> Result<(), ParticipationsServiceError> {
        require_role(caller, Role::Admin)?;

        if status == ParticipationStatus::Pending {
            return Err(InvalidState::InvalidStatus.into());
        }

        let rows_affected = self
            .repository
            .set_participation_status(participation, status, at, caller.user)
            .await?;

        if rows_affected == 0 {
            return Err(ParticipationsServiceError::NotFound);
        }

        info!("updated participation status");

        Ok(())
    }

    #[tracing::instrument(
        name = "participations.service.list_available_campaigns",
        skip(self),
        fields(user_uuid = %caller.user, store_uuid = tracing::field::Empty),
        err
    )]
    async fn list_available_campaigns(
        &self,
        caller: Caller,
        at: Timestamp,
    ) -> Result<Vec<AvailableCampaign>, ParticipationsServiceError> {
        require_role(caller, Role::Store)?;

        let store = self.store_for(caller).await?;

        Ok(self.campaigns.list_available_campaigns(store, at).await?)
    }

    #[tracing::instrument(
        name = "participations.service.list_my_participations",
        skip(self),
        fields(user_uuid = %caller.user, store_uuid = tracing::field::Empty),
        err
    )]
    async fn list_my_participations(
        &self,
        caller: Caller,
    ) -> Result<Vec<ParticipationRecord>, ParticipationsServiceError> {
        require_role(caller, Role::Store)?;

        let store = self.store_for(caller).await?;

        Ok(self.repository.list_store_participations(store).await?)
    }

    #[tracing::instrument(
        name = "participations.service.list_campaign_participations",
        skip(self),
        fields(user_uuid = %caller.user, campaign_uuid = %campaign),
        err
    )]
    async fn list_campaign_participations(
        &self,
        caller: Caller,
        campaign: CampaignUuid,
    ) -> Result<Vec<ParticipationRecord>, ParticipationsServiceError> {
        require_role(caller, Role::Admin)?;

        self.campaigns
            .get_campaign(campaign)
            .await?
            .ok_or(ParticipationsServiceError::CampaignNotFound)?;

        Ok(self.repository.list_campaign_participations(campaign).await?)
    }
}

#[automock]
#[async_trait]
pub trait ParticipationsService: Send + Sync {
    /// Enrol a batch of the caller's products into a campaign.
    ///
    /// Fails as a whole when a batch precondition does not hold or when no
    /// product was admitted; otherwise returns the admitted participations
    /// alongside the per-product rejections.
    async fn submit(
        &self,
        caller: Caller,
        request: ParticipationRequest,
        at: Timestamp,
    ) -> Result<SubmissionOutcome, ParticipationsServiceError>;

    /// Remove one of the caller's participations.
    async fn withdraw(
        &self,
        caller: Caller,
        participation: ParticipationUuid,
    ) -> Result<(), ParticipationsServiceError>;

    /// Approve or reject a participation.
    async fn set_status(
        &self,
        caller: Caller,
        participation: ParticipationUuid,
        status: ParticipationStatus,
        at: Timestamp,
    ) -> Result<(), ParticipationsServiceError>;

    /// Campaigns the caller's store can join at `at`.
    async fn list_available_campaigns(
        &self,
        caller: Caller,
        at: Timestamp,
    ) -> Result<Vec<AvailableCampaign>, ParticipationsServiceError>;

    /// The caller's participations, newest first.
    async fn list_my_participations(
        &self,
        caller: Caller,
    ) -> Result<Vec<ParticipationRecord>, ParticipationsServiceError>;

    /// Review queue for a campaign, newest first.
    async fn list_campaign_participations(
        &self,
        caller: Caller,
        campaign: CampaignUuid,
    ) -> Result<Vec<ParticipationRecord>, ParticipationsServiceError>;
}
