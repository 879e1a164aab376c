use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{
    Connection, PgConnection, RunQueryDsl, delete,
    dsl::{sql, sum},
    insert_into,
    pg::Pg,
    prelude::*,
    query_builder::QueryFragment,
    query_dsl::LoadQuery,
    sql_types::{Bool, Double},
    update,
};
use uuid::Uuid;

use crate::domain;
use crate::infra::db::postgres::{
    postgres_connection::PgPoolSquad,
    schema::{
        eat_schedules, full_receipts, instructions, moving_schedules, staying_schedules,
        total_receipts, tourish_categories, tourish_category_relations, tourish_interests,
        tourish_plans, tourish_schedules,
    },
};
use domain::{
    entities::{
        categories::{CategoryRelationEntity, InsertCategoryRelationEntity, TourishCategoryEntity},
        instructions::{InsertInstructionEntity, InstructionEntity},
        interests::{InsertTourishInterestEntity, TourishInterestEntity},
        service_schedules::{EatScheduleEntity, MovingScheduleEntity, StayingScheduleEntity},
        tourish_plans::TourishPlanEntity,
        tourish_schedules::{InsertTourishScheduleEntity, TourishScheduleEntity},
    },
    repositories::tourish_plans::TourishPlanRepository,
    value_objects::{
        enums::{
            interest_statuses::InterestStatus, plan_statuses::PlanStatus,
            receipt_statuses::ReceiptStatus, sort_order::SortOrder,
        },
        instructions::InstructionModel,
        pagination::Page,
        plan_query::{
            PlanListScope, PlanOrdering, PlanQuery, PlanSortField, TicketSalesRanking,
            ticket_sales_window,
        },
        service_schedules::{
            EatScheduleItem, InsertedServiceScheduleIds, MovingScheduleItem, ServiceScheduleBatches,
            StayingScheduleItem,
        },
        tourish_plans::{
            CategoryRelationDto, CreatedTourishPlan, DeletedTourishPlan, NewTourishPlan,
            PlanUpdateSnapshot, TourishPlanAggregate, TourishPlanUpdate, TourishScheduleModel,
        },
    },
};

type BoxedPlans = tourish_plans::BoxedQuery<'static, Pg>;

/// Summed line-item price of the outer `tourish_plans` row.
const TOTAL_PRICE_SQL: &str = "(\
    COALESCE((SELECT SUM(eat_schedules.single_price) FROM eat_schedules \
        WHERE eat_schedules.tourish_plan_id = tourish_plans.id), 0) + \
    COALESCE((SELECT SUM(staying_schedules.single_price) FROM staying_schedules \
        WHERE staying_schedules.tourish_plan_id = tourish_plans.id), 0) + \
    COALESCE((SELECT SUM(moving_schedules.single_price) FROM moving_schedules \
        WHERE moving_schedules.tourish_plan_id = tourish_plans.id), 0))";

#[derive(Debug, Clone, Copy)]
enum InterestScope {
    Skip,
    All,
    User(Uuid),
}

pub struct TourishPlanPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl TourishPlanPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

fn contains_pattern(text: &str) -> String {
    format!("%{}%", text.trim())
}

/// Base plan query with every requested filter applied.
fn filtered_plans(query: &PlanQuery) -> Result<BoxedPlans> {
    let mut plans = tourish_plans::table.into_boxed();

    if let PlanListScope::Public = query.scope {
        plans = plans.filter(
            tourish_plans::id.eq_any(
                tourish_schedules::table
                    .filter(tourish_schedules::plan_status.eq(PlanStatus::ConfirmInfo.to_string()))
                    .select(tourish_schedules::tourish_plan_id),
            ),
        );
    }

    if let Some(search) = &query.search {
        plans = plans.filter(tourish_plans::tour_name.ilike(contains_pattern(search)));
    }

    if let Some(category) = &query.category {
        plans = plans.filter(
            tourish_plans::id.eq_any(
                tourish_category_relations::table
                    .inner_join(tourish_categories::table)
                    .filter(tourish_categories::name.ilike(contains_pattern(category)))
                    .select(tourish_category_relations::tourish_plan_id),
            ),
        );
    }

    if let Some(category_names) = &query.category_names {
        plans = plans.filter(
            tourish_plans::id.eq_any(
                tourish_category_relations::table
                    .inner_join(tourish_categories::table)
                    .filter(tourish_categories::name.eq_any(category_names.clone()))
                    .select(tourish_category_relations::tourish_plan_id),
            ),
        );
    }

    if let Some(starting_point) = &query.starting_point {
        plans = plans.filter(tourish_plans::starting_point.ilike(contains_pattern(starting_point)));
    }

    if let Some(end_point) = &query.end_point {
        plans = plans.filter(tourish_plans::end_point.ilike(contains_pattern(end_point)));
    }

    if let Some(starting_date) = query.starting_date {
        let (day_start, day_end) = starting_date
            .utc_bounds()
            .context("starting date is out of range")?;
        plans = plans.filter(
            tourish_plans::id.eq_any(
                tourish_schedules::table
                    .filter(tourish_schedules::start_date.ge(day_start))
                    .filter(tourish_schedules::start_date.lt(day_end))
                    .select(tourish_schedules::tourish_plan_id),
            ),
        );
    }

    if let Some(price_range) = query.price_range {
        plans = plans.filter(
            sql::<Bool>(&format!("{TOTAL_PRICE_SQL} >= ")).bind::<Double, _>(price_range.from),
        );
        if let Some(price_to) = price_range.to {
            plans = plans
                .filter(sql::<Bool>(&format!("{TOTAL_PRICE_SQL} <= ")).bind::<Double, _>(price_to));
        }
    }

    Ok(plans)
}

fn order_by_column(plans: BoxedPlans, field: PlanSortField, order: SortOrder) -> BoxedPlans {
    let plans = match (field, order) {
        (PlanSortField::TourName, SortOrder::Asc) => plans.order(tourish_plans::tour_name.asc()),
        (PlanSortField::TourName, SortOrder::Desc) => plans.order(tourish_plans::tour_name.desc()),
        (PlanSortField::StartingPoint, SortOrder::Asc) => {
            plans.order(tourish_plans::starting_point.asc())
        }
        (PlanSortField::StartingPoint, SortOrder::Desc) => {
            plans.order(tourish_plans::starting_point.desc())
        }
        (PlanSortField::EndPoint, SortOrder::Asc) => plans.order(tourish_plans::end_point.asc()),
        (PlanSortField::EndPoint, SortOrder::Desc) => plans.order(tourish_plans::end_point.desc()),
        (PlanSortField::CreateDate, SortOrder::Asc) => {
            plans.order(tourish_plans::create_date.asc())
        }
        (PlanSortField::CreateDate, SortOrder::Desc) => {
            plans.order(tourish_plans::create_date.desc())
        }
        (PlanSortField::UpdateDate, SortOrder::Asc) => {
            plans.order(tourish_plans::update_date.asc())
        }
        (PlanSortField::UpdateDate, SortOrder::Desc) => {
            plans.order(tourish_plans::update_date.desc())
        }
    };

    plans.then_order_by(tourish_plans::id.asc())
}

/// Tickets sold per plan in `[window_start, window_end)`, zero totals left out.
fn ticket_sales_query(
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> impl LoadQuery<'static, PgConnection, (Uuid, Option<i64>)> + QueryFragment<Pg> {
    let sales_statuses: Vec<String> = ReceiptStatus::sales_statuses()
        .iter()
        .map(ToString::to_string)
        .collect();
    let tickets_sold = sum(full_receipts::total_ticket + full_receipts::total_child_ticket);

    full_receipts::table
        .inner_join(total_receipts::table)
        .filter(full_receipts::status.eq_any(sales_statuses))
        .filter(
            full_receipts::created_date
                .ge(window_start)
                .and(full_receipts::created_date.lt(window_end))
                .or(full_receipts::complete_date
                    .assume_not_null()
                    .ge(window_start)
                    .and(full_receipts::complete_date.assume_not_null().lt(window_end))),
        )
        .group_by(total_receipts::tourish_plan_id)
        .having(tickets_sold.gt(0_i64))
        .select((total_receipts::tourish_plan_id, tickets_sold))
}

/// Tickets sold per plan over the previous and current month.
fn load_ticket_sales(conn: &mut PgConnection, now: DateTime<Utc>) -> Result<TicketSalesRanking> {
    let (window_start, window_end) =
        ticket_sales_window(now).context("ticket sales window is out of range")?;

    let totals = ticket_sales_query(window_start, window_end)
        .load::<(Uuid, Option<i64>)>(conn)?
        .into_iter()
        .map(|(plan_id, total)| (plan_id, total.unwrap_or(0)));

    Ok(TicketSalesRanking::new(totals))
}

/// Loads every child collection for the given plans with one query per table.
fn load_aggregates(
    conn: &mut PgConnection,
    plans: Vec<TourishPlanEntity>,
    interest_scope: InterestScope,
) -> QueryResult<Vec<TourishPlanAggregate>> {
    if plans.is_empty() {
        return Ok(Vec::new());
    }

    let tourish_schedules = TourishScheduleEntity::belonging_to(&plans)
        .select(TourishScheduleEntity::as_select())
        .order(tourish_schedules::start_date.asc())
        .load::<TourishScheduleEntity>(conn)?
        .grouped_by(&plans);

    let eat_schedules = EatScheduleEntity::belonging_to(&plans)
        .select(EatScheduleEntity::as_select())
        .order(eat_schedules::create_date.asc())
        .load::<EatScheduleEntity>(conn)?
        .grouped_by(&plans);

    let staying_schedules = StayingScheduleEntity::belonging_to(&plans)
        .select(StayingScheduleEntity::as_select())
        .order(staying_schedules::create_date.asc())
        .load::<StayingScheduleEntity>(conn)?
        .grouped_by(&plans);

    let moving_schedules = MovingScheduleEntity::belonging_to(&plans)
        .select(MovingScheduleEntity::as_select())
        .order(moving_schedules::create_date.asc())
        .load::<MovingScheduleEntity>(conn)?
        .grouped_by(&plans);

    let instructions = InstructionEntity::belonging_to(&plans)
        .select(InstructionEntity::as_select())
        .order(instructions::create_date.asc())
        .load::<InstructionEntity>(conn)?
        .grouped_by(&plans);

    let categories = CategoryRelationEntity::belonging_to(&plans)
        .inner_join(tourish_categories::table)
        .select((
            CategoryRelationEntity::as_select(),
            TourishCategoryEntity::as_select(),
        ))
        .load::<(CategoryRelationEntity, TourishCategoryEntity)>(conn)?
        .grouped_by(&plans);

    let interests = match interest_scope {
        InterestScope::Skip => plans.iter().map(|_| Vec::new()).collect(),
        InterestScope::All => TourishInterestEntity::belonging_to(&plans)
            .select(TourishInterestEntity::as_select())
            .load::<TourishInterestEntity>(conn)?
            .grouped_by(&plans),
        InterestScope::User(user_id) => TourishInterestEntity::belonging_to(&plans)
            .filter(tourish_interests::user_id.eq(user_id))
            .select(TourishInterestEntity::as_select())
            .load::<TourishInterestEntity>(conn)?
            .grouped_by(&plans),
    };

    let mut tourish_schedules = tourish_schedules.into_iter();
    let mut eat_schedules = eat_schedules.into_iter();
    let mut staying_schedules = staying_schedules.into_iter();
    let mut moving_schedules = moving_schedules.into_iter();
    let mut instructions = instructions.into_iter();
    let mut categories = categories.into_iter();
    let mut interests = interests.into_iter();

    let aggregates = plans
        .into_iter()
        .map(|plan| TourishPlanAggregate {
            plan,
            tourish_schedules: tourish_schedules.next().unwrap_or_default(),
            eat_schedules: eat_schedules.next().unwrap_or_default(),
            staying_schedules: staying_schedules.next().unwrap_or_default(),
            moving_schedules: moving_schedules.next().unwrap_or_default(),
            instructions: instructions.next().unwrap_or_default(),
            categories: categories
                .next()
                .unwrap_or_default()
                .into_iter()
                .map(|(relation, category)| CategoryRelationDto {
                    id: relation.id,
                    tourish_category_id: relation.tourish_category_id,
                    category_name: category.name,
                })
                .collect(),
            interests: interests.next().unwrap_or_default(),
        })
        .collect();

    Ok(aggregates)
}

fn insert_instructions(
    conn: &mut PgConnection,
    plan_id: Uuid,
    instruction_models: &[InstructionModel],
    now: DateTime<Utc>,
) -> QueryResult<()> {
    if instruction_models.is_empty() {
        return Ok(());
    }

    let rows: Vec<InsertInstructionEntity> = instruction_models
        .iter()
        .map(|instruction| instruction.to_insert_entity(plan_id, now))
        .collect();

    insert_into(instructions::table)
        .values(&rows)
        .execute(conn)?;

    Ok(())
}

fn insert_category_relations(
    conn: &mut PgConnection,
    plan_id: Uuid,
    category_ids: &[Uuid],
) -> QueryResult<()> {
    if category_ids.is_empty() {
        return Ok(());
    }

    let rows: Vec<InsertCategoryRelationEntity> = category_ids
        .iter()
        .map(|category_id| InsertCategoryRelationEntity {
            tourish_plan_id: plan_id,
            tourish_category_id: *category_id,
        })
        .collect();

    insert_into(tourish_category_relations::table)
        .values(&rows)
        .execute(conn)?;

    Ok(())
}

fn insert_tourish_schedules(
    conn: &mut PgConnection,
    plan_id: Uuid,
    schedules: &[TourishScheduleModel],
    now: DateTime<Utc>,
) -> QueryResult<()> {
    if schedules.is_empty() {
        return Ok(());
    }

    let rows: Vec<InsertTourishScheduleEntity> = schedules
        .iter()
        .map(|schedule| schedule.to_insert_entity(plan_id, now))
        .collect();

    insert_into(tourish_schedules::table)
        .values(&rows)
        .execute(conn)?;

    Ok(())
}

fn insert_eat_schedules(
    conn: &mut PgConnection,
    plan_id: Uuid,
    items: &[EatScheduleItem],
    now: DateTime<Utc>,
) -> QueryResult<Vec<Uuid>> {
    items
        .iter()
        .map(|item| {
            insert_into(eat_schedules::table)
                .values(&item.to_insert_entity(plan_id, now))
                .returning(eat_schedules::id)
                .get_result::<Uuid>(conn)
        })
        .collect()
}

fn insert_staying_schedules(
    conn: &mut PgConnection,
    plan_id: Uuid,
    items: &[StayingScheduleItem],
    now: DateTime<Utc>,
) -> QueryResult<Vec<Uuid>> {
    items
        .iter()
        .map(|item| {
            insert_into(staying_schedules::table)
                .values(&item.to_insert_entity(plan_id, now))
                .returning(staying_schedules::id)
                .get_result::<Uuid>(conn)
        })
        .collect()
}

fn insert_moving_schedules(
    conn: &mut PgConnection,
    plan_id: Uuid,
    items: &[MovingScheduleItem],
    now: DateTime<Utc>,
) -> QueryResult<Vec<Uuid>> {
    items
        .iter()
        .map(|item| {
            insert_into(moving_schedules::table)
                .values(&item.to_insert_entity(plan_id, now))
                .returning(moving_schedules::id)
                .get_result::<Uuid>(conn)
        })
        .collect()
}

fn insert_service_schedules(
    conn: &mut PgConnection,
    plan_id: Uuid,
    batches: &ServiceScheduleBatches,
    now: DateTime<Utc>,
) -> QueryResult<InsertedServiceScheduleIds> {
    Ok(InsertedServiceScheduleIds {
        eat: insert_eat_schedules(conn, plan_id, &batches.eat, now)?,
        staying: insert_staying_schedules(conn, plan_id, &batches.staying, now)?,
        moving: insert_moving_schedules(conn, plan_id, &batches.moving, now)?,
    })
}

#[async_trait]
impl TourishPlanRepository for TourishPlanPostgres {
    async fn list_plans(&self, query: PlanQuery) -> Result<Page<TourishPlanAggregate>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let interest_scope = match query.scope {
            PlanListScope::Public => InterestScope::Skip,
            PlanListScope::Authority { user_id } => InterestScope::User(user_id),
        };

        let page = match query.ordering {
            PlanOrdering::Column { field, order } => {
                let total_count = filtered_plans(&query)?
                    .count()
                    .get_result::<i64>(&mut conn)?;

                let plans = order_by_column(filtered_plans(&query)?, field, order)
                    .offset(query.pagination.offset())
                    .limit(query.pagination.limit())
                    .load::<TourishPlanEntity>(&mut conn)?;

                Page {
                    items: plans,
                    total_count,
                }
            }
            PlanOrdering::TotalTicketInMonth => {
                let ranking = load_ticket_sales(&mut conn, Utc::now())?;
                let plans = if ranking.is_empty() {
                    Vec::new()
                } else {
                    filtered_plans(&query)?
                        .filter(tourish_plans::id.eq_any(ranking.plan_ids()))
                        .load::<TourishPlanEntity>(&mut conn)?
                };

                let ranked = ranking.order_by_sales(plans, |plan| plan.id);
                query.pagination.slice(ranked)
            }
        };

        let total_count = page.total_count;
        let items = load_aggregates(&mut conn, page.items, interest_scope)?;

        Ok(Page { items, total_count })
    }

    async fn find_aggregate(&self, plan_id: Uuid) -> Result<Option<TourishPlanAggregate>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let plan = tourish_plans::table
            .find(plan_id)
            .select(TourishPlanEntity::as_select())
            .first::<TourishPlanEntity>(&mut conn)
            .optional()?;

        let Some(plan) = plan else {
            return Ok(None);
        };

        let aggregate = load_aggregates(&mut conn, vec![plan], InterestScope::All)?
            .into_iter()
            .next();

        Ok(aggregate)
    }

    async fn find_by_name(&self, tour_name: String) -> Result<Option<TourishPlanEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = tourish_plans::table
            .filter(tourish_plans::tour_name.eq(tour_name))
            .order(tourish_plans::create_date.asc())
            .select(TourishPlanEntity::as_select())
            .first::<TourishPlanEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn find_plans_by_ids(&self, plan_ids: Vec<Uuid>) -> Result<Vec<TourishPlanEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = tourish_plans::table
            .filter(tourish_plans::id.eq_any(plan_ids))
            .select(TourishPlanEntity::as_select())
            .load::<TourishPlanEntity>(&mut conn)?;

        Ok(results)
    }

    async fn create_plan(&self, new_plan: NewTourishPlan) -> Result<CreatedTourishPlan> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let now = Utc::now();

        let result = conn.transaction::<CreatedTourishPlan, diesel::result::Error, _>(|tx| {
            let plan_id = insert_into(tourish_plans::table)
                .values(&new_plan.plan)
                .returning(tourish_plans::id)
                .get_result::<Uuid>(tx)?;

            if let Some(creator_id) = new_plan.creator_id {
                insert_into(tourish_interests::table)
                    .values(&InsertTourishInterestEntity {
                        tourish_plan_id: plan_id,
                        user_id: creator_id,
                        interest_status: InterestStatus::Creator.to_string(),
                        create_date: now,
                        update_date: now,
                    })
                    .execute(tx)?;
            }

            insert_instructions(tx, plan_id, &new_plan.instructions, now)?;
            insert_category_relations(tx, plan_id, &new_plan.category_ids)?;
            insert_tourish_schedules(tx, plan_id, &new_plan.tourish_schedules, now)?;
            let service_schedule_ids =
                insert_service_schedules(tx, plan_id, &new_plan.service_schedules, now)?;

            Ok(CreatedTourishPlan {
                plan_id,
                service_schedule_ids,
            })
        })?;

        Ok(result)
    }

    async fn find_update_snapshot(&self, plan_id: Uuid) -> Result<Option<PlanUpdateSnapshot>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let plan = tourish_plans::table
            .find(plan_id)
            .select(TourishPlanEntity::as_select())
            .first::<TourishPlanEntity>(&mut conn)
            .optional()?;

        let Some(plan) = plan else {
            return Ok(None);
        };

        let tourish_schedules = tourish_schedules::table
            .filter(tourish_schedules::tourish_plan_id.eq(plan_id))
            .select(TourishScheduleEntity::as_select())
            .load::<TourishScheduleEntity>(&mut conn)?;

        Ok(Some(PlanUpdateSnapshot {
            plan,
            tourish_schedules,
        }))
    }

    async fn apply_update(&self, plan_update: TourishPlanUpdate) -> Result<InsertedServiceScheduleIds> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let now = plan_update.changes.update_date;
        let plan_id = plan_update.plan_id;

        let result = conn.transaction::<InsertedServiceScheduleIds, diesel::result::Error, _>(|tx| {
            update(tourish_plans::table.find(plan_id))
                .set(&plan_update.changes)
                .execute(tx)?;

            if let Some(category_ids) = &plan_update.category_ids {
                delete(
                    tourish_category_relations::table
                        .filter(tourish_category_relations::tourish_plan_id.eq(plan_id)),
                )
                .execute(tx)?;
                insert_category_relations(tx, plan_id, category_ids)?;
            }

            if let Some(instruction_models) = &plan_update.instructions {
                delete(instructions::table.filter(instructions::tourish_plan_id.eq(plan_id)))
                    .execute(tx)?;
                insert_instructions(tx, plan_id, instruction_models, now)?;
            }

            for schedule in &plan_update.schedule_updates {
                update(
                    tourish_schedules::table
                        .filter(tourish_schedules::id.eq(schedule.schedule_id))
                        .filter(tourish_schedules::tourish_plan_id.eq(plan_id)),
                )
                .set(&schedule.changes)
                .execute(tx)?;
            }
            insert_tourish_schedules(tx, plan_id, &plan_update.schedule_inserts, now)?;

            let mut inserted = InsertedServiceScheduleIds::default();
            let replacement = &plan_update.service_schedules;

            if let Some(items) = &replacement.staying {
                delete(
                    staying_schedules::table
                        .filter(staying_schedules::tourish_plan_id.eq(plan_id)),
                )
                .execute(tx)?;
                inserted.staying = insert_staying_schedules(tx, plan_id, items, now)?;
            }

            if let Some(items) = &replacement.moving {
                delete(moving_schedules::table.filter(moving_schedules::tourish_plan_id.eq(plan_id)))
                    .execute(tx)?;
                inserted.moving = insert_moving_schedules(tx, plan_id, items, now)?;
            }

            if let Some(items) = &replacement.eat {
                delete(eat_schedules::table.filter(eat_schedules::tourish_plan_id.eq(plan_id)))
                    .execute(tx)?;
                inserted.eat = insert_eat_schedules(tx, plan_id, items, now)?;
            }

            if let Some(modifier_id) = plan_update.modifier_id {
                insert_into(tourish_interests::table)
                    .values(&InsertTourishInterestEntity {
                        tourish_plan_id: plan_id,
                        user_id: modifier_id,
                        interest_status: InterestStatus::Modifier.to_string(),
                        create_date: now,
                        update_date: now,
                    })
                    .on_conflict((tourish_interests::tourish_plan_id, tourish_interests::user_id))
                    .do_nothing()
                    .execute(tx)?;
            }

            Ok(inserted)
        })?;

        Ok(result)
    }

    async fn delete_plan(&self, plan_id: Uuid) -> Result<Option<DeletedTourishPlan>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = conn.transaction::<Option<DeletedTourishPlan>, diesel::result::Error, _>(|tx| {
            let existing = tourish_plans::table
                .find(plan_id)
                .select(tourish_plans::id)
                .first::<Uuid>(tx)
                .optional()?;

            if existing.is_none() {
                return Ok(None);
            }

            let moving_schedule_ids =
                delete(moving_schedules::table.filter(moving_schedules::tourish_plan_id.eq(plan_id)))
                    .returning(moving_schedules::id)
                    .get_results::<Uuid>(tx)?;

            let staying_schedule_ids = delete(
                staying_schedules::table.filter(staying_schedules::tourish_plan_id.eq(plan_id)),
            )
            .returning(staying_schedules::id)
            .get_results::<Uuid>(tx)?;

            let eat_schedule_ids =
                delete(eat_schedules::table.filter(eat_schedules::tourish_plan_id.eq(plan_id)))
                    .returning(eat_schedules::id)
                    .get_results::<Uuid>(tx)?;

            delete(tourish_plans::table.find(plan_id)).execute(tx)?;

            Ok(Some(DeletedTourishPlan {
                plan_id,
                eat_schedule_ids,
                staying_schedule_ids,
                moving_schedule_ids,
            }))
        })?;

        Ok(result)
    }
}
