use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{
    PgConnection, RunQueryDsl,
    dsl::{count_star, sum},
    insert_into,
    pg::Pg,
    prelude::*,
    query_builder::QueryFragment,
    query_dsl::LoadQuery,
    upsert::excluded,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain;
use crate::infra::db::postgres::{
    postgres_connection::PgPoolSquad,
    schema::{full_receipts, total_receipts, tourish_ratings, tourish_schedules},
};
use domain::{
    entities::ratings::InsertTourishRatingEntity, repositories::ratings::RatingRepository,
    value_objects::ratings::{PlanRatingSummary, TOP_RATING_MIN_COUNT},
};

pub struct RatingPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl RatingPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

/// Rating count and total per plan, for plans rated often enough to rank.
fn rating_summaries_query()
-> impl LoadQuery<'static, PgConnection, (Uuid, i64, Option<i64>)> + QueryFragment<Pg> {
    tourish_ratings::table
        .group_by(tourish_ratings::tourish_plan_id)
        .having(count_star().gt(TOP_RATING_MIN_COUNT))
        .select((
            tourish_ratings::tourish_plan_id,
            count_star(),
            sum(tourish_ratings::rating),
        ))
}

#[async_trait]
impl RatingRepository for RatingPostgres {
    async fn upsert_rating(&self, insert_rating: InsertTourishRatingEntity) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        insert_into(tourish_ratings::table)
            .values(&insert_rating)
            .on_conflict((tourish_ratings::tourish_plan_id, tourish_ratings::user_id))
            .do_update()
            .set((
                tourish_ratings::rating.eq(excluded(tourish_ratings::rating)),
                tourish_ratings::update_date.eq(excluded(tourish_ratings::update_date)),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn list_rating_summaries(&self) -> Result<Vec<PlanRatingSummary>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = rating_summaries_query().load::<(Uuid, i64, Option<i64>)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(tourish_plan_id, rating_count, rating_total)| PlanRatingSummary {
                tourish_plan_id,
                rating_count,
                rating_total: rating_total.unwrap_or(0),
            })
            .collect())
    }

    async fn has_active_booking(
        &self,
        tourish_plan_id: Uuid,
        email: String,
        tourish_schedule_ids: Option<Vec<Uuid>>,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = full_receipts::table
            .inner_join(total_receipts::table)
            .inner_join(tourish_schedules::table)
            .filter(full_receipts::email.eq(email))
            .filter(total_receipts::tourish_plan_id.eq(tourish_plan_id))
            .filter(tourish_schedules::end_date.ge(now))
            .select(full_receipts::id)
            .into_boxed();

        if let Some(schedule_ids) = tourish_schedule_ids.filter(|ids| !ids.is_empty()) {
            query = query.filter(
                full_receipts::tourish_schedule_id
                    .assume_not_null()
                    .eq_any(schedule_ids),
            );
        }

        let booking = query.first::<Uuid>(&mut conn).optional()?;

        Ok(booking.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::debug_query;

    #[test]
    fn rating_threshold_is_applied_in_sql() {
        let sql = debug_query::<Pg, _>(&rating_summaries_query()).to_string();

        assert!(sql.contains(r#"GROUP BY "tourish_ratings"."tourish_plan_id""#), "{sql}");
        assert!(sql.contains("HAVING COUNT(*) > $1"), "{sql}");
        assert!(sql.contains("-- binds: [10]"), "{sql}");
    }
}
