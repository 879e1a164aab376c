use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    domain::entities::tourish_plans::TourishPlanEntity,
    infra::db::postgres::schema::tourish_interests,
};

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, Associations, Serialize, PartialEq)]
#[diesel(table_name = tourish_interests)]
#[diesel(belongs_to(TourishPlanEntity, foreign_key = tourish_plan_id))]
#[serde(rename_all = "camelCase")]
pub struct TourishInterestEntity {
    pub id: Uuid,
    pub tourish_plan_id: Uuid,
    pub user_id: Uuid,
    pub interest_status: String,
    pub create_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, PartialEq)]
#[diesel(table_name = tourish_interests)]
pub struct InsertTourishInterestEntity {
    pub tourish_plan_id: Uuid,
    pub user_id: Uuid,
    pub interest_status: String,
    pub create_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}
