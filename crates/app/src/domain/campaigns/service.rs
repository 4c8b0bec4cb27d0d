//! Campaigns service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::domain::campaigns::{
    data::{CampaignDefinition, CampaignUpdate, NewCampaign},
    errors::CampaignsServiceError,
    records::{CampaignRecord, CampaignUuid},
    repository::CampaignsRepository,
};

#[derive(Clone)]
pub struct DbCampaignsService {
    repository: Arc<dyn CampaignsRepository>,
}

impl DbCampaignsService {
    #[must_use]
    pub fn new(repository: Arc<dyn CampaignsRepository>) -> Self {
        Self { repository }
    }
}

impl std::fmt::Debug for DbCampaignsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbCampaignsService").finish_non_exhaustive()
    }
}

#[async_trait]
impl CampaignsService for DbCampaignsService {
    #[tracing::instrument(
        name = "campaigns.service.create_campaign",
        skip(self, campaign),
        fields(campaign_uuid = %campaign.uuid),
        err
    )]
    async fn create_campaign(
        &self,
        campaign: NewCampaign,
    ) -> Result<CampaignRecord, CampaignsServiceError> {
        campaign.definition.validate()?;

        let created = self
            .repository
            .create_campaign(campaign, Timestamp::now())
            .await?;

        info!("created campaign");

        Ok(created)
    }

    async fn get_campaign(
        &self,
        campaign: CampaignUuid,
    ) -> Result<CampaignRecord, CampaignsServiceError> {
        self.repository
            .get_campaign(campaign)
            .await?
            .ok_or(CampaignsServiceError::NotFound)
    }

    async fn list_campaigns(&self) -> Result<Vec<CampaignRecord>, CampaignsServiceError> {
        Ok(self.repository.list_campaigns().await?)
    }

    #[tracing::instrument(
        name = "campaigns.service.update_campaign",
        skip(self, update),
        fields(campaign_uuid = %campaign),
        err
    )]
    async fn update_campaign(
        &self,
        campaign: CampaignUuid,
        update: CampaignUpdate,
    ) -> Result<CampaignRecord, CampaignsServiceError> {
        let current = self
            .repository
            .get_campaign(campaign)
            .await?
            .ok_or(CampaignsServiceError::NotFound)?;

        let merged = update.apply(CampaignDefinition::from(current));

        merged.validate()?;

        let updated = self
            .repository
            .update_campaign(campaign, merged, Timestamp::now())
            .await?
            .ok_or(CampaignsServiceError::NotFound)?;

        info!("updated campaign");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "campaigns.service.delete_campaign",
        skip(self),
        fields(campaign_uuid = %campaign),
        err
    )]
    async fn delete_campaign(&self, campaign: CampaignUuid) -> Result<(), CampaignsServiceError> {
        let rows_affected = self.repository.delete_campaign(campaign).await?;

        if rows_affected == 0 {
            return Err(CampaignsServiceError::NotFound);
        }

        info!("deleted campaign");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CampaignsService: Send + Sync {
    /// Validates and stores a new campaign.
    async fn create_campaign(
        &self,
        campaign: NewCampaign,
    ) -> Result<CampaignRecord, CampaignsServiceError>;

    /// Retrieve a single campaign with its computed totals.
    async fn get_campaign(
        &self,
        campaign: CampaignUuid,
    ) -> Result<CampaignRecord, CampaignsServiceError>;

    /// Lists every campaign, featured first, then by most recent start.
    async fn list_campaigns(&self) -> Result<Vec<CampaignRecord>, CampaignsServiceError>;

    /// Replaces the supplied fields and re-validates the merged campaign.
    async fn update_campaign(
        &self,
        campaign: CampaignUuid,
        update: CampaignUpdate,
    ) -> Result<CampaignRecord, CampaignsServiceError>;

    /// Deletes a campaign and, through the foreign key, its participations.
    async fn delete_campaign(&self, campaign: CampaignUuid) -> Result<(), CampaignsServiceError>;
}
