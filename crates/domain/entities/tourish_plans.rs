use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::infra::db::postgres::schema::tourish_plans;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, Serialize, PartialEq)]
#[diesel(table_name = tourish_plans)]
#[serde(rename_all = "camelCase")]
pub struct TourishPlanEntity {
    pub id: Uuid,
    pub tour_name: String,
    pub starting_point: String,
    pub end_point: String,
    pub support_number: String,
    pub create_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, PartialEq)]
#[diesel(table_name = tourish_plans)]
pub struct InsertTourishPlanEntity {
    pub tour_name: String,
    pub starting_point: String,
    pub end_point: String,
    pub support_number: String,
    pub create_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

/// Scalar columns rewritten by a plan update.
#[derive(Debug, Clone, AsChangeset, PartialEq)]
#[diesel(table_name = tourish_plans)]
pub struct UpdateTourishPlanEntity {
    pub tour_name: String,
    pub starting_point: String,
    pub end_point: String,
    pub support_number: String,
    pub update_date: DateTime<Utc>,
}
