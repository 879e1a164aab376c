use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::tourish_ratings;

#[derive(Debug, Clone, Insertable, PartialEq)]
#[diesel(table_name = tourish_ratings)]
pub struct InsertTourishRatingEntity {
    pub tourish_plan_id: Uuid,
    pub user_id: Uuid,
    pub rating: i32,
    pub create_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}
