use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain;
use crate::infra::db::postgres::{postgres_connection::PgPoolSquad, schema::tourish_interests};
use domain::{
    entities::interests::{InsertTourishInterestEntity, TourishInterestEntity},
    repositories::interests::InterestRepository,
};

pub struct InterestPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl InterestPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl InterestRepository for InterestPostgres {
    async fn find_interest(
        &self,
        tourish_plan_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<TourishInterestEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = tourish_interests::table
            .filter(tourish_interests::tourish_plan_id.eq(tourish_plan_id))
            .filter(tourish_interests::user_id.eq(user_id))
            .select(TourishInterestEntity::as_select())
            .first::<TourishInterestEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn list_plan_interests(&self, tourish_plan_id: Uuid) -> Result<Vec<TourishInterestEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = tourish_interests::table
            .filter(tourish_interests::tourish_plan_id.eq(tourish_plan_id))
            .order(tourish_interests::create_date.asc())
            .select(TourishInterestEntity::as_select())
            .load::<TourishInterestEntity>(&mut conn)?;

        Ok(results)
    }

    async fn insert_interest(&self, insert_interest: InsertTourishInterestEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(tourish_interests::table)
            .values(&insert_interest)
            .returning(tourish_interests::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(result)
    }

    async fn update_interest_status(
        &self,
        interest_id: Uuid,
        interest_status: String,
        update_date: DateTime<Utc>,
    ) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(tourish_interests::table.find(interest_id))
            .set((
                tourish_interests::interest_status.eq(interest_status),
                tourish_interests::update_date.eq(update_date),
            ))
            .execute(&mut conn)?;

        Ok(())
    }
}
