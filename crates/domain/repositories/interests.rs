use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::interests::{InsertTourishInterestEntity, TourishInterestEntity};

#[automock]
#[async_trait]
pub trait InterestRepository {
    async fn find_interest(
        &self,
        tourish_plan_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<TourishInterestEntity>>;

    async fn list_plan_interests(&self, tourish_plan_id: Uuid) -> Result<Vec<TourishInterestEntity>>;

    async fn insert_interest(&self, insert_interest: InsertTourishInterestEntity) -> Result<Uuid>;

    async fn update_interest_status(
        &self,
        interest_id: Uuid,
        interest_status: String,
        update_date: DateTime<Utc>,
    ) -> Result<()>;
}
