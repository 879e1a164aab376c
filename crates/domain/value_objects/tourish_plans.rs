use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::{
        instructions::{InsertInstructionEntity, InstructionEntity},
        interests::TourishInterestEntity,
        service_schedules::{EatScheduleEntity, MovingScheduleEntity, StayingScheduleEntity},
        tourish_plans::{InsertTourishPlanEntity, TourishPlanEntity, UpdateTourishPlanEntity},
        tourish_schedules::{
            InsertTourishScheduleEntity, TourishScheduleEntity, UpdateTourishScheduleEntity,
        },
    },
    value_objects::{
        enums::plan_statuses::PlanStatus,
        instructions::InstructionModel,
        service_schedules::{
            InsertedServiceScheduleIds, ServiceScheduleBatches, ServiceScheduleReplacement,
        },
    },
};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRelationModel {
    pub tourish_category_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TourishScheduleModel {
    /// Present when the entry targets an existing schedule of the plan.
    pub id: Option<Uuid>,
    #[serde(default)]
    pub plan_status: PlanStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub total_ticket: i32,
    pub remain_ticket: i32,
}

impl TourishScheduleModel {
    pub fn has_negative_tickets(&self) -> bool {
        self.total_ticket < 0 || self.remain_ticket < 0
    }

    pub fn to_insert_entity(
        &self,
        tourish_plan_id: Uuid,
        now: DateTime<Utc>,
    ) -> InsertTourishScheduleEntity {
        InsertTourishScheduleEntity {
            tourish_plan_id,
            plan_status: self.plan_status.to_string(),
            start_date: self.start_date,
            end_date: self.end_date,
            total_ticket: self.total_ticket,
            remain_ticket: self.remain_ticket,
            create_date: now,
            update_date: now,
        }
    }
}

impl InstructionModel {
    pub fn to_insert_entity(
        &self,
        tourish_plan_id: Uuid,
        now: DateTime<Utc>,
    ) -> InsertInstructionEntity {
        InsertInstructionEntity {
            tourish_plan_id,
            instruction_type: self.instruction_type.to_string(),
            description: self.description.clone(),
            create_date: now,
            update_date: now,
        }
    }
}

/// Body of `POST /tourish-plans`. Line-item batches arrive as JSON text.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsertTourishPlanModel {
    pub tour_name: String,
    pub starting_point: String,
    pub end_point: String,
    pub support_number: String,
    pub description: Option<String>,
    #[serde(default)]
    pub tourish_category_relations: Vec<CategoryRelationModel>,
    #[serde(default)]
    pub tourish_schedules: Vec<TourishScheduleModel>,
    pub eating_schedule_string: Option<String>,
    pub moving_schedule_string: Option<String>,
    pub staying_schedule_string: Option<String>,
}

/// Body of `PUT /tourish-plans`. Omitted fields keep their stored value.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTourishPlanModel {
    pub id: Uuid,
    pub tour_name: Option<String>,
    pub starting_point: Option<String>,
    pub end_point: Option<String>,
    pub support_number: Option<String>,
    pub description: Option<String>,
    pub tourish_category_relations: Option<Vec<CategoryRelationModel>>,
    pub tourish_schedules: Option<Vec<TourishScheduleModel>>,
    pub instructions: Option<Vec<InstructionModel>>,
    pub eating_schedule_string: Option<String>,
    pub moving_schedule_string: Option<String>,
    pub staying_schedule_string: Option<String>,
}

impl UpdateTourishPlanModel {
    pub fn to_changeset(
        &self,
        existing: &TourishPlanEntity,
        now: DateTime<Utc>,
    ) -> UpdateTourishPlanEntity {
        UpdateTourishPlanEntity {
            tour_name: self
                .tour_name
                .clone()
                .unwrap_or_else(|| existing.tour_name.clone()),
            starting_point: self
                .starting_point
                .clone()
                .unwrap_or_else(|| existing.starting_point.clone()),
            end_point: self
                .end_point
                .clone()
                .unwrap_or_else(|| existing.end_point.clone()),
            support_number: self
                .support_number
                .clone()
                .unwrap_or_else(|| existing.support_number.clone()),
            update_date: now,
        }
    }
}

/// Everything the create transaction writes.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTourishPlan {
    pub plan: InsertTourishPlanEntity,
    pub creator_id: Option<Uuid>,
    pub instructions: Vec<InstructionModel>,
    pub category_ids: Vec<Uuid>,
    pub tourish_schedules: Vec<TourishScheduleModel>,
    pub service_schedules: ServiceScheduleBatches,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatedTourishPlan {
    pub plan_id: Uuid,
    pub service_schedule_ids: InsertedServiceScheduleIds,
}

/// Stored state an update is reconciled against.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanUpdateSnapshot {
    pub plan: TourishPlanEntity,
    pub tourish_schedules: Vec<TourishScheduleEntity>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TourishScheduleChange {
    pub schedule_id: Uuid,
    pub changes: UpdateTourishScheduleEntity,
}

/// Everything the update transaction writes.
#[derive(Debug, Clone, PartialEq)]
pub struct TourishPlanUpdate {
    pub plan_id: Uuid,
    pub changes: UpdateTourishPlanEntity,
    pub category_ids: Option<Vec<Uuid>>,
    pub instructions: Option<Vec<InstructionModel>>,
    pub schedule_updates: Vec<TourishScheduleChange>,
    pub schedule_inserts: Vec<TourishScheduleModel>,
    pub service_schedules: ServiceScheduleReplacement,
    pub modifier_id: Option<Uuid>,
}

/// Line-item rows removed together with a plan, for blob cleanup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletedTourishPlan {
    pub plan_id: Uuid,
    pub eat_schedule_ids: Vec<Uuid>,
    pub staying_schedule_ids: Vec<Uuid>,
    pub moving_schedule_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRelationDto {
    pub id: Uuid,
    pub tourish_category_id: Uuid,
    pub category_name: String,
}

/// A plan with its child collections loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct TourishPlanAggregate {
    pub plan: TourishPlanEntity,
    pub tourish_schedules: Vec<TourishScheduleEntity>,
    pub eat_schedules: Vec<EatScheduleEntity>,
    pub staying_schedules: Vec<StayingScheduleEntity>,
    pub moving_schedules: Vec<MovingScheduleEntity>,
    pub instructions: Vec<InstructionEntity>,
    pub categories: Vec<CategoryRelationDto>,
    pub interests: Vec<TourishInterestEntity>,
}

impl TourishPlanAggregate {
    pub fn new(plan: TourishPlanEntity) -> Self {
        Self {
            plan,
            tourish_schedules: Vec::new(),
            eat_schedules: Vec::new(),
            staying_schedules: Vec::new(),
            moving_schedules: Vec::new(),
            instructions: Vec::new(),
            categories: Vec::new(),
            interests: Vec::new(),
        }
    }

    /// Sum of line-item prices; items without a price count as zero.
    pub fn total_price(&self) -> f64 {
        let eat: f64 = self
            .eat_schedules
            .iter()
            .filter_map(|item| item.single_price)
            .sum();
        let staying: f64 = self
            .staying_schedules
            .iter()
            .filter_map(|item| item.single_price)
            .sum();
        let moving: f64 = self
            .moving_schedules
            .iter()
            .filter_map(|item| item.single_price)
            .sum();

        eat + staying + moving
    }

    /// What an anonymous customer may see: confirmed schedules only, no interests.
    pub fn customer_view(mut self) -> Self {
        self.tourish_schedules.retain(|schedule| {
            PlanStatus::from_str(&schedule.plan_status).is_visible_to_customers()
        });
        self.interests.clear();
        self
    }

    pub fn into_dto(self) -> TourishPlanDto {
        let total_price = self.total_price();

        TourishPlanDto {
            plan: self.plan,
            tourish_schedules: self.tourish_schedules,
            eat_schedules: self.eat_schedules,
            staying_schedules: self.staying_schedules,
            moving_schedules: self.moving_schedules,
            instructions: self.instructions,
            tourish_category_relations: self.categories,
            tourish_interests: self.interests,
            total_price,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TourishPlanDto {
    #[serde(flatten)]
    pub plan: TourishPlanEntity,
    pub tourish_schedules: Vec<TourishScheduleEntity>,
    pub eat_schedules: Vec<EatScheduleEntity>,
    pub staying_schedules: Vec<StayingScheduleEntity>,
    pub moving_schedules: Vec<MovingScheduleEntity>,
    pub instructions: Vec<InstructionEntity>,
    pub tourish_category_relations: Vec<CategoryRelationDto>,
    pub tourish_interests: Vec<TourishInterestEntity>,
    pub total_price: f64,
}
