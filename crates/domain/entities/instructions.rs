use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    domain::entities::tourish_plans::TourishPlanEntity,
    infra::db::postgres::schema::instructions,
};

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, Associations, Serialize, PartialEq)]
#[diesel(table_name = instructions)]
#[diesel(belongs_to(TourishPlanEntity, foreign_key = tourish_plan_id))]
#[serde(rename_all = "camelCase")]
pub struct InstructionEntity {
    pub id: Uuid,
    pub tourish_plan_id: Uuid,
    pub instruction_type: String,
    pub description: String,
    pub create_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = instructions)]
pub struct InsertInstructionEntity {
    pub tourish_plan_id: Uuid,
    pub instruction_type: String,
    pub description: String,
    pub create_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}
