use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    domain::entities::tourish_plans::TourishPlanEntity,
    infra::db::postgres::schema::tourish_schedules,
};

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, Associations, Serialize, PartialEq)]
#[diesel(table_name = tourish_schedules)]
#[diesel(belongs_to(TourishPlanEntity, foreign_key = tourish_plan_id))]
#[serde(rename_all = "camelCase")]
pub struct TourishScheduleEntity {
    pub id: Uuid,
    pub tourish_plan_id: Uuid,
    pub plan_status: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub total_ticket: i32,
    pub remain_ticket: i32,
    pub create_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, PartialEq)]
#[diesel(table_name = tourish_schedules)]
pub struct InsertTourishScheduleEntity {
    pub tourish_plan_id: Uuid,
    pub plan_status: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub total_ticket: i32,
    pub remain_ticket: i32,
    pub create_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset, PartialEq)]
#[diesel(table_name = tourish_schedules)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateTourishScheduleEntity {
    pub plan_status: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub total_ticket: i32,
    pub remain_ticket: i32,
    pub update_date: DateTime<Utc>,
}
