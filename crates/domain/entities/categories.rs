use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    domain::entities::tourish_plans::TourishPlanEntity,
    infra::db::postgres::schema::{tourish_categories, tourish_category_relations},
};

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, Serialize, PartialEq)]
#[diesel(table_name = tourish_categories)]
#[serde(rename_all = "camelCase")]
pub struct TourishCategoryEntity {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, Associations, Serialize, PartialEq)]
#[diesel(table_name = tourish_category_relations)]
#[diesel(belongs_to(TourishPlanEntity, foreign_key = tourish_plan_id))]
#[serde(rename_all = "camelCase")]
pub struct CategoryRelationEntity {
    pub id: Uuid,
    pub tourish_plan_id: Uuid,
    pub tourish_category_id: Uuid,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tourish_category_relations)]
pub struct InsertCategoryRelationEntity {
    pub tourish_plan_id: Uuid,
    pub tourish_category_id: Uuid,
}
