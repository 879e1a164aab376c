use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::tourish_plans::TourishPlanEntity,
    value_objects::{
        pagination::Page,
        plan_query::PlanQuery,
        service_schedules::InsertedServiceScheduleIds,
        tourish_plans::{
            CreatedTourishPlan, DeletedTourishPlan, NewTourishPlan, PlanUpdateSnapshot,
            TourishPlanAggregate, TourishPlanUpdate,
        },
    },
};

#[automock]
#[async_trait]
pub trait TourishPlanRepository {
    async fn list_plans(&self, query: PlanQuery) -> Result<Page<TourishPlanAggregate>>;

    async fn find_aggregate(&self, plan_id: Uuid) -> Result<Option<TourishPlanAggregate>>;

    async fn find_by_name(&self, tour_name: String) -> Result<Option<TourishPlanEntity>>;

    async fn find_plans_by_ids(&self, plan_ids: Vec<Uuid>) -> Result<Vec<TourishPlanEntity>>;

    /// Writes the plan and every child row in one transaction.
    async fn create_plan(&self, new_plan: NewTourishPlan) -> Result<CreatedTourishPlan>;

    async fn find_update_snapshot(&self, plan_id: Uuid) -> Result<Option<PlanUpdateSnapshot>>;

    /// Applies all row changes of an update in one transaction and returns the
    /// ids of re-inserted line items.
    async fn apply_update(&self, update: TourishPlanUpdate) -> Result<InsertedServiceScheduleIds>;

    /// `None` when the plan did not exist.
    async fn delete_plan(&self, plan_id: Uuid) -> Result<Option<DeletedTourishPlan>>;
}
