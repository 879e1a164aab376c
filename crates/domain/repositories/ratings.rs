use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::ratings::InsertTourishRatingEntity, value_objects::ratings::PlanRatingSummary,
};

#[automock]
#[async_trait]
pub trait RatingRepository {
    /// Inserts the caller's rating or overwrites the one they already gave.
    async fn upsert_rating(&self, insert_rating: InsertTourishRatingEntity) -> Result<()>;

    /// Summaries of plans rated more than `TOP_RATING_MIN_COUNT` times.
    async fn list_rating_summaries(&self) -> Result<Vec<PlanRatingSummary>>;

    /// Whether `email` holds a receipt on the plan for a schedule that has not
    /// ended by `now`, optionally limited to the given schedules. An empty
    /// list places no limit.
    async fn has_active_booking(
        &self,
        tourish_plan_id: Uuid,
        email: String,
        tourish_schedule_ids: Option<Vec<Uuid>>,
        now: DateTime<Utc>,
    ) -> Result<bool>;
}
