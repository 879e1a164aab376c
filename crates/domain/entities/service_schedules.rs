use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    domain::entities::tourish_plans::TourishPlanEntity,
    infra::db::postgres::schema::{eat_schedules, moving_schedules, staying_schedules},
};

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, Associations, Serialize, PartialEq)]
#[diesel(table_name = eat_schedules)]
#[diesel(belongs_to(TourishPlanEntity, foreign_key = tourish_plan_id))]
#[serde(rename_all = "camelCase")]
pub struct EatScheduleEntity {
    pub id: Uuid,
    pub tourish_plan_id: Uuid,
    pub place_name: String,
    pub address: String,
    pub support_number: String,
    pub restaurant_id: Option<Uuid>,
    pub single_price: Option<f64>,
    pub create_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = eat_schedules)]
pub struct InsertEatScheduleEntity {
    pub tourish_plan_id: Uuid,
    pub place_name: String,
    pub address: String,
    pub support_number: String,
    pub restaurant_id: Option<Uuid>,
    pub single_price: Option<f64>,
    pub create_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, Associations, Serialize, PartialEq)]
#[diesel(table_name = staying_schedules)]
#[diesel(belongs_to(TourishPlanEntity, foreign_key = tourish_plan_id))]
#[serde(rename_all = "camelCase")]
pub struct StayingScheduleEntity {
    pub id: Uuid,
    pub tourish_plan_id: Uuid,
    pub place_name: String,
    pub address: String,
    pub support_number: String,
    pub rest_house_branch_id: Option<Uuid>,
    pub rest_house_type: Option<i32>,
    pub single_price: Option<f64>,
    pub create_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = staying_schedules)]
pub struct InsertStayingScheduleEntity {
    pub tourish_plan_id: Uuid,
    pub place_name: String,
    pub address: String,
    pub support_number: String,
    pub rest_house_branch_id: Option<Uuid>,
    pub rest_house_type: Option<i32>,
    pub single_price: Option<f64>,
    pub create_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, Associations, Serialize, PartialEq)]
#[diesel(table_name = moving_schedules)]
#[diesel(belongs_to(TourishPlanEntity, foreign_key = tourish_plan_id))]
#[serde(rename_all = "camelCase")]
pub struct MovingScheduleEntity {
    pub id: Uuid,
    pub tourish_plan_id: Uuid,
    pub driver_name: String,
    pub vehicle_plate: String,
    pub branch_name: String,
    pub vehicle_type: Option<i32>,
    pub transport_id: Option<Uuid>,
    pub phone_number: String,
    pub starting_place: String,
    pub heading_place: String,
    pub single_price: Option<f64>,
    pub create_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = moving_schedules)]
pub struct InsertMovingScheduleEntity {
    pub tourish_plan_id: Uuid,
    pub driver_name: String,
    pub vehicle_plate: String,
    pub branch_name: String,
    pub vehicle_type: Option<i32>,
    pub transport_id: Option<Uuid>,
    pub phone_number: String,
    pub starting_place: String,
    pub heading_place: String,
    pub single_price: Option<f64>,
    pub create_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}
