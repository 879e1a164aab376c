use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tourish::domain::{
    entities::tourish_plans::InsertTourishPlanEntity,
    repositories::{storage::BlobStorage, tourish_plans::TourishPlanRepository},
    value_objects::{
        instructions::default_instruction_list,
        plan_changes::{
            ScheduleValidationError, changed_plan_properties, reconcile_tourish_schedules,
            validate_tourish_schedules,
        },
        plan_query::{PlanListScope, PlanQuery, PlanSearchParams},
        response::{ApiResponse, ChangeSummary, message_codes},
        service_schedules::{
            ScheduleBatchError, ServiceScheduleBatches, ServiceScheduleKind,
            ServiceScheduleReplacement, batch_blob_writes,
        },
        storage::{
            BlobWrite, TEXT_CONTENT_TYPE, TOURISH_CONTENT_CONTAINER, blob_name, blob_name_from_key,
            description_container,
        },
        tourish_plans::{
            InsertTourishPlanModel, NewTourishPlan, TourishPlanUpdate, UpdateTourishPlanModel,
        },
    },
};
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum TourishPlanError {
    #[error(transparent)]
    InvalidScheduleBatch(#[from] ScheduleBatchError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unknown description container: {0}")]
    UnknownContainer(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<ScheduleValidationError> for TourishPlanError {
    fn from(err: ScheduleValidationError) -> Self {
        TourishPlanError::InvalidInput(err.to_string())
    }
}

impl TourishPlanError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            TourishPlanError::InvalidScheduleBatch(_)
            | TourishPlanError::InvalidInput(_)
            | TourishPlanError::UnknownContainer(_) => StatusCode::BAD_REQUEST,
            TourishPlanError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, TourishPlanError>;

fn known_container(name: &str) -> UseCaseResult<&'static str> {
    description_container(name).ok_or_else(|| {
        warn!(container = name, "tourish_plans: rejected unknown description container");
        TourishPlanError::UnknownContainer(name.to_string())
    })
}

pub(crate) fn to_data<T: Serialize>(value: &T) -> anyhow::Result<serde_json::Value> {
    Ok(serde_json::to_value(value)?)
}

pub struct TourishPlanUseCase<R, B>
where
    R: TourishPlanRepository + Send + Sync + 'static,
    B: BlobStorage + Send + Sync + 'static,
{
    plan_repo: Arc<R>,
    blob_storage: Arc<B>,
    default_page_size: i64,
}

impl<R, B> TourishPlanUseCase<R, B>
where
    R: TourishPlanRepository + Send + Sync + 'static,
    B: BlobStorage + Send + Sync + 'static,
{
    pub fn new(plan_repo: Arc<R>, blob_storage: Arc<B>, default_page_size: i64) -> Self {
        Self {
            plan_repo,
            blob_storage,
            default_page_size,
        }
    }

    pub async fn list_plans(
        &self,
        params: PlanSearchParams,
        scope: PlanListScope,
    ) -> UseCaseResult<ApiResponse> {
        let query = PlanQuery::from_params(params, scope, self.default_page_size);
        info!(
            page = query.pagination.page,
            page_size = query.pagination.page_size,
            ordering = ?query.ordering,
            "tourish_plans: listing plans"
        );

        let page = self.plan_repo.list_plans(query).await.map_err(|err| {
            error!(db_error = ?err, "tourish_plans: failed to list plans");
            TourishPlanError::Internal(err)
        })?;

        let page = match scope {
            PlanListScope::Public => page.map(|aggregate| aggregate.customer_view().into_dto()),
            PlanListScope::Authority { .. } => page.map(|aggregate| aggregate.into_dto()),
        };

        info!(
            item_count = page.items.len(),
            total_count = page.total_count,
            "tourish_plans: plans listed"
        );
        Ok(ApiResponse::page(to_data(&page.items)?, page.total_count))
    }

    /// Staff view: every schedule and interest of the plan.
    pub async fn get_plan(&self, plan_id: Uuid) -> UseCaseResult<ApiResponse> {
        self.load_plan(plan_id, false).await
    }

    pub async fn get_client_plan(&self, plan_id: Uuid) -> UseCaseResult<ApiResponse> {
        self.load_plan(plan_id, true).await
    }

    async fn load_plan(&self, plan_id: Uuid, customer_view: bool) -> UseCaseResult<ApiResponse> {
        let aggregate = self
            .plan_repo
            .find_aggregate(plan_id)
            .await
            .map_err(|err| {
                error!(%plan_id, db_error = ?err, "tourish_plans: failed to load plan");
                TourishPlanError::Internal(err)
            })?;

        let Some(aggregate) = aggregate else {
            info!(%plan_id, "tourish_plans: plan not found");
            return Ok(ApiResponse::rejected(message_codes::PLAN_NOT_FOUND));
        };

        let aggregate = if customer_view {
            aggregate.customer_view()
        } else {
            aggregate
        };

        Ok(ApiResponse::data(to_data(&aggregate.into_dto())?))
    }

    pub async fn get_plan_by_name(&self, tour_name: String) -> UseCaseResult<ApiResponse> {
        let plan = self
            .plan_repo
            .find_by_name(tour_name.clone())
            .await
            .map_err(|err| {
                error!(%tour_name, db_error = ?err, "tourish_plans: failed to find plan by name");
                TourishPlanError::Internal(err)
            })?;

        Ok(ApiResponse::data(to_data(&plan)?))
    }

    pub async fn create_plan(
        &self,
        creator_id: Option<Uuid>,
        model: InsertTourishPlanModel,
    ) -> UseCaseResult<ApiResponse> {
        let service_schedules = ServiceScheduleBatches::parse(
            model.eating_schedule_string.as_deref(),
            model.moving_schedule_string.as_deref(),
            model.staying_schedule_string.as_deref(),
        )
        .inspect_err(|err| warn!(kind = %err.kind, "tourish_plans: rejected schedule batch"))?;
        validate_tourish_schedules(&model.tourish_schedules)?;

        let now = Utc::now();
        let new_plan = NewTourishPlan {
            plan: InsertTourishPlanEntity {
                tour_name: model.tour_name.clone(),
                starting_point: model.starting_point,
                end_point: model.end_point,
                support_number: model.support_number,
                create_date: now,
                update_date: now,
            },
            creator_id,
            instructions: default_instruction_list(),
            category_ids: model
                .tourish_category_relations
                .iter()
                .map(|relation| relation.tourish_category_id)
                .collect(),
            tourish_schedules: model.tourish_schedules,
            service_schedules: service_schedules.clone(),
        };

        let created = self.plan_repo.create_plan(new_plan).await.map_err(|err| {
            error!(
                tour_name = %model.tour_name,
                db_error = ?err,
                "tourish_plans: failed to create plan"
            );
            TourishPlanError::Internal(err)
        })?;
        let plan_id = created.plan_id;

        let mut writes = vec![BlobWrite::upload(
            TOURISH_CONTENT_CONTAINER,
            blob_name(plan_id),
            model.description.unwrap_or_default(),
        )];
        writes.extend(batch_blob_writes(
            &service_schedules,
            &created.service_schedule_ids,
        ));

        if let Err((applied, err)) = self.apply_blob_writes(writes).await {
            error!(%plan_id, blob_error = ?err, "tourish_plans: blob write failed, reverting plan");
            self.revert_blob_writes(applied).await;
            if let Err(delete_err) = self.plan_repo.delete_plan(plan_id).await {
                error!(
                    %plan_id,
                    db_error = ?delete_err,
                    "tourish_plans: failed to remove plan after blob failure"
                );
            }
            return Err(TourishPlanError::Internal(err));
        }

        info!(%plan_id, "tourish_plans: plan created");
        Ok(ApiResponse::ok(message_codes::PLAN_CREATED).with_return_id(plan_id))
    }

    pub async fn update_plan(
        &self,
        modifier_id: Option<Uuid>,
        model: UpdateTourishPlanModel,
    ) -> UseCaseResult<ApiResponse> {
        let plan_id = model.id;
        let snapshot = self
            .plan_repo
            .find_update_snapshot(plan_id)
            .await
            .map_err(|err| {
                error!(%plan_id, db_error = ?err, "tourish_plans: failed to load plan for update");
                TourishPlanError::Internal(err)
            })?;

        let Some(snapshot) = snapshot else {
            info!(%plan_id, "tourish_plans: update target missing");
            return Ok(ApiResponse::ok(message_codes::UPDATE_TARGET_MISSING));
        };

        let service_schedules = ServiceScheduleReplacement::parse(
            model.eating_schedule_string.as_deref(),
            model.moving_schedule_string.as_deref(),
            model.staying_schedule_string.as_deref(),
        )
        .inspect_err(|err| warn!(%plan_id, kind = %err.kind, "tourish_plans: rejected schedule batch"))?;

        let now = Utc::now();
        let changes = model.to_changeset(&snapshot.plan, now);
        let property_change_list = changed_plan_properties(&snapshot.plan, &changes);
        let reconciliation = reconcile_tourish_schedules(
            &snapshot.tourish_schedules,
            model.tourish_schedules.as_deref().unwrap_or_default(),
            now,
        )?;
        let service_change_list: Vec<String> = service_schedules
            .changed_kinds()
            .iter()
            .map(ServiceScheduleKind::change_label)
            .collect();

        info!(
            %plan_id,
            properties = ?property_change_list,
            schedules = ?reconciliation.changed_ids,
            services = ?service_change_list,
            "tourish_plans: applying update"
        );

        let update = TourishPlanUpdate {
            plan_id,
            changes,
            category_ids: model.tourish_category_relations.as_ref().map(|relations| {
                relations
                    .iter()
                    .map(|relation| relation.tourish_category_id)
                    .collect()
            }),
            instructions: model.instructions.clone(),
            schedule_updates: reconciliation.updates,
            schedule_inserts: reconciliation.inserts,
            service_schedules: service_schedules.clone(),
            modifier_id,
        };

        let inserted = self.plan_repo.apply_update(update).await.map_err(|err| {
            error!(%plan_id, db_error = ?err, "tourish_plans: failed to update plan");
            TourishPlanError::Internal(err)
        })?;

        let mut writes = Vec::new();
        if let Some(description) = model.description.filter(|text| !text.is_empty()) {
            writes.push(BlobWrite::upload(
                TOURISH_CONTENT_CONTAINER,
                blob_name(plan_id),
                description,
            ));
        }
        writes.extend(batch_blob_writes(&service_schedules.to_batches(), &inserted));

        if let Err((_, err)) = self.apply_blob_writes(writes).await {
            error!(%plan_id, blob_error = ?err, "tourish_plans: blob write failed after update");
            return Err(TourishPlanError::Internal(err));
        }

        info!(%plan_id, "tourish_plans: plan updated");
        Ok(
            ApiResponse::ok(message_codes::PLAN_UPDATED).with_change(ChangeSummary {
                service_change_list,
                schedule_change_list: reconciliation.changed_ids,
                property_change_list,
                is_new_schedule_added: reconciliation.is_new_schedule_added,
            }),
        )
    }

    pub async fn delete_plan(&self, plan_id: Uuid) -> UseCaseResult<ApiResponse> {
        let deleted = self.plan_repo.delete_plan(plan_id).await.map_err(|err| {
            error!(%plan_id, db_error = ?err, "tourish_plans: failed to delete plan");
            TourishPlanError::Internal(err)
        })?;

        let Some(deleted) = deleted else {
            info!(%plan_id, "tourish_plans: nothing to delete");
            return Ok(ApiResponse::ok(message_codes::PLAN_DELETED));
        };

        let blobs = std::iter::once((TOURISH_CONTENT_CONTAINER, deleted.plan_id))
            .chain(
                deleted
                    .moving_schedule_ids
                    .iter()
                    .map(|id| (ServiceScheduleKind::Moving.container(), *id)),
            )
            .chain(
                deleted
                    .staying_schedule_ids
                    .iter()
                    .map(|id| (ServiceScheduleKind::Staying.container(), *id)),
            )
            .chain(
                deleted
                    .eat_schedule_ids
                    .iter()
                    .map(|id| (ServiceScheduleKind::Eat.container(), *id)),
            );

        for (container, id) in blobs {
            let key = blob_name(id);
            if let Err(err) = self
                .blob_storage
                .delete(container.to_string(), key.clone())
                .await
            {
                warn!(%plan_id, container, %key, blob_error = ?err, "tourish_plans: failed to delete blob");
            }
        }

        info!(%plan_id, "tourish_plans: plan deleted");
        Ok(ApiResponse::ok(message_codes::PLAN_DELETED))
    }

    /// Reads `<key>.txt`, then the bare key when that is empty.
    pub async fn get_description(&self, container: String, key: String) -> UseCaseResult<String> {
        let container = known_container(&container)?;

        let text = self
            .blob_storage
            .fetch(container.to_string(), blob_name_from_key(&key))
            .await
            .map_err(|err| {
                error!(container, %key, blob_error = ?err, "tourish_plans: failed to fetch description");
                TourishPlanError::Internal(err)
            })?;

        if !text.is_empty() {
            return Ok(text);
        }

        self.blob_storage
            .fetch(container.to_string(), key.clone())
            .await
            .map_err(|err| {
                error!(container, %key, blob_error = ?err, "tourish_plans: failed to fetch description");
                TourishPlanError::Internal(err)
            })
    }

    /// Deletes `<key>.txt`, then the bare key when nothing was stored under
    /// the first name. Reports whether a blob was removed.
    pub async fn delete_description(&self, container: String, key: String) -> UseCaseResult<bool> {
        let container = known_container(&container)?;

        for blob_key in [blob_name_from_key(&key), key.clone()] {
            let deleted = self
                .blob_storage
                .delete(container.to_string(), blob_key.clone())
                .await
                .map_err(|err| {
                    error!(container, key = %blob_key, blob_error = ?err, "tourish_plans: failed to delete description");
                    TourishPlanError::Internal(err)
                })?;

            if deleted {
                info!(container, key = %blob_key, "tourish_plans: description deleted");
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Runs writes in order. On failure returns the writes that already
    /// succeeded together with the error.
    async fn apply_blob_writes(
        &self,
        writes: Vec<BlobWrite>,
    ) -> Result<(), (Vec<BlobWrite>, anyhow::Error)> {
        let mut applied = Vec::with_capacity(writes.len());

        for write in writes {
            let result = match &write {
                BlobWrite::Rename {
                    container,
                    from,
                    to,
                } => self
                    .blob_storage
                    .rename(container.to_string(), from.clone(), to.clone())
                    .await
                    .map(|_| ()),
                BlobWrite::Upload {
                    container,
                    key,
                    text,
                } => {
                    self.blob_storage
                        .upload(
                            container.to_string(),
                            text.clone(),
                            TEXT_CONTENT_TYPE.to_string(),
                            key.clone(),
                        )
                        .await
                }
            };

            match result {
                Ok(()) => applied.push(write),
                Err(err) => return Err((applied, err)),
            }
        }

        Ok(())
    }

    /// Best-effort undo: uploads are deleted and renames moved back.
    async fn revert_blob_writes(&self, applied: Vec<BlobWrite>) {
        for write in applied.into_iter().rev() {
            let container = write.container();
            let result = match write {
                BlobWrite::Rename { from, to, .. } => self
                    .blob_storage
                    .rename(container.to_string(), to, from)
                    .await
                    .map(|_| ()),
                BlobWrite::Upload { key, .. } => self
                    .blob_storage
                    .delete(container.to_string(), key)
                    .await
                    .map(|_| ()),
            };

            if let Err(err) = result {
                warn!(container, blob_error = ?err, "tourish_plans: failed to revert blob write");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use chrono::{Duration, TimeZone};
    use mockall::predicate::eq;
    use std::sync::Mutex;
    use tourish::domain::{
        entities::{tourish_plans::TourishPlanEntity, tourish_schedules::TourishScheduleEntity},
        repositories::{storage::MockBlobStorage, tourish_plans::MockTourishPlanRepository},
        value_objects::{
            enums::{instruction_types::InstructionType, plan_statuses::PlanStatus},
            pagination::Page,
            service_schedules::InsertedServiceScheduleIds,
            storage::{EAT_SCHEDULE_CONTAINER, MISSING_DESCRIPTION_TEXT, STAYING_SCHEDULE_CONTAINER},
            tourish_plans::{
                CreatedTourishPlan, DeletedTourishPlan, PlanUpdateSnapshot, TourishPlanAggregate,
                TourishScheduleModel,
            },
        },
    };

    fn plan_entity(plan_id: Uuid) -> TourishPlanEntity {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        TourishPlanEntity {
            id: plan_id,
            tour_name: "Ha Long Bay".to_string(),
            starting_point: "Ha Noi".to_string(),
            end_point: "Ha Long".to_string(),
            support_number: "0901234567".to_string(),
            create_date: now,
            update_date: now,
        }
    }

    fn stored_schedule(plan_id: Uuid, status: PlanStatus) -> TourishScheduleEntity {
        let start = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        TourishScheduleEntity {
            id: Uuid::new_v4(),
            tourish_plan_id: plan_id,
            plan_status: status.to_string(),
            start_date: start,
            end_date: Some(start + Duration::days(2)),
            total_ticket: 20,
            remain_ticket: 20,
            create_date: start,
            update_date: start,
        }
    }

    fn insert_model() -> InsertTourishPlanModel {
        InsertTourishPlanModel {
            tour_name: "Ha Long Bay".to_string(),
            starting_point: "Ha Noi".to_string(),
            end_point: "Ha Long".to_string(),
            support_number: "0901234567".to_string(),
            description: Some("Two days on the bay".to_string()),
            tourish_category_relations: Vec::new(),
            tourish_schedules: Vec::new(),
            eating_schedule_string: Some(String::new()),
            moving_schedule_string: Some(String::new()),
            staying_schedule_string: Some(String::new()),
        }
    }

    fn update_model(plan_id: Uuid) -> UpdateTourishPlanModel {
        UpdateTourishPlanModel {
            id: plan_id,
            tour_name: None,
            starting_point: None,
            end_point: None,
            support_number: None,
            description: None,
            tourish_category_relations: None,
            tourish_schedules: None,
            instructions: None,
            eating_schedule_string: None,
            moving_schedule_string: None,
            staying_schedule_string: None,
        }
    }

    fn usecase(
        plan_repo: MockTourishPlanRepository,
        blob_storage: MockBlobStorage,
    ) -> TourishPlanUseCase<MockTourishPlanRepository, MockBlobStorage> {
        TourishPlanUseCase::new(Arc::new(plan_repo), Arc::new(blob_storage), 5)
    }

    #[tokio::test]
    async fn create_seeds_instructions_and_uploads_description() {
        let plan_id = Uuid::new_v4();
        let creator_id = Uuid::new_v4();
        let mut plan_repo = MockTourishPlanRepository::new();
        let mut blob_storage = MockBlobStorage::new();

        plan_repo
            .expect_create_plan()
            .withf(move |new_plan| {
                let price_count = new_plan
                    .instructions
                    .iter()
                    .filter(|instruction| instruction.instruction_type == InstructionType::Price)
                    .count();
                new_plan.instructions.len() == 13
                    && price_count == 4
                    && new_plan.creator_id == Some(creator_id)
                    && new_plan.service_schedules.is_empty()
            })
            .times(1)
            .returning(move |_| {
                Ok(CreatedTourishPlan {
                    plan_id,
                    service_schedule_ids: InsertedServiceScheduleIds::default(),
                })
            });

        blob_storage
            .expect_upload()
            .withf(move |container, text, content_type, key| {
                container == TOURISH_CONTENT_CONTAINER
                    && text == "Two days on the bay"
                    && content_type == TEXT_CONTENT_TYPE
                    && *key == format!("{plan_id}.txt")
            })
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let response = usecase(plan_repo, blob_storage)
            .create_plan(Some(creator_id), insert_model())
            .await
            .unwrap();

        assert_eq!(response.result_cd, 0);
        assert_eq!(response.message_code.as_deref(), Some("I411"));
        assert_eq!(response.return_id, Some(plan_id));
    }

    #[tokio::test]
    async fn create_writes_line_item_blobs_with_placeholder() {
        let plan_id = Uuid::new_v4();
        let eat_id = Uuid::new_v4();
        let mut plan_repo = MockTourishPlanRepository::new();
        let mut blob_storage = MockBlobStorage::new();

        plan_repo.expect_create_plan().returning(move |_| {
            Ok(CreatedTourishPlan {
                plan_id,
                service_schedule_ids: InsertedServiceScheduleIds {
                    eat: vec![eat_id],
                    ..Default::default()
                },
            })
        });

        let uploads = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&uploads);
        blob_storage
            .expect_upload()
            .times(2)
            .returning(move |container, text, _, key| {
                recorded.lock().unwrap().push((container, key, text));
                Ok(())
            });

        let mut model = insert_model();
        model.eating_schedule_string = Some(r#"[{"placeName":"Pho 10","singlePrice":50000}]"#.to_string());

        usecase(plan_repo, blob_storage)
            .create_plan(None, model)
            .await
            .unwrap();

        let uploads = uploads.lock().unwrap();
        assert_eq!(
            uploads[1],
            (
                EAT_SCHEDULE_CONTAINER.to_string(),
                format!("{eat_id}.txt"),
                MISSING_DESCRIPTION_TEXT.to_string()
            )
        );
    }

    #[tokio::test]
    async fn create_rejects_malformed_batch_before_writing() {
        let mut plan_repo = MockTourishPlanRepository::new();
        plan_repo.expect_create_plan().never();

        let mut model = insert_model();
        model.staying_schedule_string = Some("{not json".to_string());

        let err = usecase(plan_repo, MockBlobStorage::new())
            .create_plan(None, model)
            .await
            .unwrap_err();

        assert!(matches!(err, TourishPlanError::InvalidScheduleBatch(_)));
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_rejects_negative_tickets() {
        let mut plan_repo = MockTourishPlanRepository::new();
        plan_repo.expect_create_plan().never();

        let mut model = insert_model();
        model.tourish_schedules = vec![TourishScheduleModel {
            id: None,
            plan_status: PlanStatus::Draft,
            start_date: Utc::now(),
            end_date: None,
            total_ticket: 10,
            remain_ticket: -2,
        }];

        let err = usecase(plan_repo, MockBlobStorage::new())
            .create_plan(None, model)
            .await
            .unwrap_err();

        assert!(matches!(err, TourishPlanError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn create_removes_plan_and_written_blobs_when_upload_fails() {
        let plan_id = Uuid::new_v4();
        let staying_id = Uuid::new_v4();
        let mut plan_repo = MockTourishPlanRepository::new();
        let mut blob_storage = MockBlobStorage::new();

        plan_repo.expect_create_plan().returning(move |_| {
            Ok(CreatedTourishPlan {
                plan_id,
                service_schedule_ids: InsertedServiceScheduleIds {
                    staying: vec![staying_id],
                    ..Default::default()
                },
            })
        });
        plan_repo
            .expect_delete_plan()
            .with(eq(plan_id))
            .times(1)
            .returning(|_| Ok(None));

        blob_storage
            .expect_upload()
            .withf(|container, _, _, _| container == TOURISH_CONTENT_CONTAINER)
            .returning(|_, _, _, _| Ok(()));
        blob_storage
            .expect_upload()
            .withf(|container, _, _, _| container == STAYING_SCHEDULE_CONTAINER)
            .returning(|_, _, _, _| Err(anyhow!("storage unavailable")));
        blob_storage
            .expect_delete()
            .with(
                eq(TOURISH_CONTENT_CONTAINER.to_string()),
                eq(format!("{plan_id}.txt")),
            )
            .times(1)
            .returning(|_, _| Ok(true));

        let mut model = insert_model();
        model.staying_schedule_string = Some(r#"[{"placeName":"Sea Hotel"}]"#.to_string());

        let err = usecase(plan_repo, blob_storage)
            .create_plan(None, model)
            .await
            .unwrap_err();

        assert_eq!(
            err.status_code(),
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn update_on_missing_plan_reports_c412_without_writes() {
        let plan_id = Uuid::new_v4();
        let mut plan_repo = MockTourishPlanRepository::new();

        plan_repo
            .expect_find_update_snapshot()
            .with(eq(plan_id))
            .returning(|_| Ok(None));
        plan_repo.expect_apply_update().never();

        let response = usecase(plan_repo, MockBlobStorage::new())
            .update_plan(None, update_model(plan_id))
            .await
            .unwrap();

        assert_eq!(response.result_cd, 0);
        assert_eq!(response.message_code.as_deref(), Some("C412"));
        assert!(response.change.is_none());
    }

    #[tokio::test]
    async fn update_reports_changes() {
        let plan_id = Uuid::new_v4();
        let modifier_id = Uuid::new_v4();
        let plan = plan_entity(plan_id);
        let stored = stored_schedule(plan_id, PlanStatus::Draft);
        let stored_id = stored.id;
        let eat_id = Uuid::new_v4();

        let mut plan_repo = MockTourishPlanRepository::new();
        let mut blob_storage = MockBlobStorage::new();

        let snapshot = PlanUpdateSnapshot {
            plan,
            tourish_schedules: vec![stored.clone()],
        };
        plan_repo
            .expect_find_update_snapshot()
            .returning(move |_| Ok(Some(snapshot.clone())));
        plan_repo
            .expect_apply_update()
            .withf(move |update| {
                update.modifier_id == Some(modifier_id)
                    && update.schedule_updates.len() == 1
                    && update.schedule_inserts.len() == 1
                    && update.service_schedules.eat.is_some()
                    && update.service_schedules.moving.is_none()
                    && update.category_ids.is_none()
            })
            .times(1)
            .returning(move |_| {
                Ok(InsertedServiceScheduleIds {
                    eat: vec![eat_id],
                    ..Default::default()
                })
            });

        blob_storage
            .expect_upload()
            .withf(|container, text, _, _| container == TOURISH_CONTENT_CONTAINER && text == "New notes")
            .times(1)
            .returning(|_, _, _, _| Ok(()));
        blob_storage
            .expect_rename()
            .with(
                eq(EAT_SCHEDULE_CONTAINER.to_string()),
                eq("old-eat.txt".to_string()),
                eq(format!("{eat_id}.txt")),
            )
            .times(1)
            .returning(|_, _, _| Ok(true));

        let mut model = update_model(plan_id);
        model.tour_name = Some("Ha Long Bay Cruise".to_string());
        model.description = Some("New notes".to_string());
        model.eating_schedule_string = Some(r#"[{"id":"old-eat","placeName":"Pho 10"}]"#.to_string());
        model.tourish_schedules = Some(vec![
            TourishScheduleModel {
                id: Some(stored_id),
                plan_status: PlanStatus::ConfirmInfo,
                start_date: stored.start_date,
                end_date: stored.end_date,
                total_ticket: stored.total_ticket,
                remain_ticket: stored.remain_ticket,
            },
            TourishScheduleModel {
                id: None,
                plan_status: PlanStatus::Draft,
                start_date: stored.start_date + Duration::days(7),
                end_date: None,
                total_ticket: 15,
                remain_ticket: 15,
            },
        ]);

        let response = usecase(plan_repo, blob_storage)
            .update_plan(Some(modifier_id), model)
            .await
            .unwrap();

        assert_eq!(response.message_code.as_deref(), Some("I412"));
        assert_eq!(
            response.change,
            Some(ChangeSummary {
                service_change_list: vec!["eating".to_string()],
                schedule_change_list: vec![stored_id],
                property_change_list: vec!["tourName".to_string()],
                is_new_schedule_added: true,
            })
        );
    }

    #[tokio::test]
    async fn delete_removes_description_and_line_item_blobs() {
        let plan_id = Uuid::new_v4();
        let moving_id = Uuid::new_v4();
        let mut plan_repo = MockTourishPlanRepository::new();
        let mut blob_storage = MockBlobStorage::new();

        plan_repo.expect_delete_plan().with(eq(plan_id)).returning(move |_| {
            Ok(Some(DeletedTourishPlan {
                plan_id,
                moving_schedule_ids: vec![moving_id],
                ..Default::default()
            }))
        });

        let deleted = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&deleted);
        blob_storage
            .expect_delete()
            .times(2)
            .returning(move |container, key| {
                recorded.lock().unwrap().push((container, key));
                Err(anyhow!("already gone"))
            });

        let response = usecase(plan_repo, blob_storage)
            .delete_plan(plan_id)
            .await
            .unwrap();

        assert_eq!(response.message_code.as_deref(), Some("I413"));
        assert_eq!(
            deleted.lock().unwrap()[1],
            (
                ServiceScheduleKind::Moving.container().to_string(),
                format!("{moving_id}.txt")
            )
        );
    }

    #[tokio::test]
    async fn delete_of_missing_plan_is_a_no_op() {
        let mut plan_repo = MockTourishPlanRepository::new();
        let mut blob_storage = MockBlobStorage::new();

        plan_repo.expect_delete_plan().returning(|_| Ok(None));
        blob_storage.expect_delete().never();

        let response = usecase(plan_repo, blob_storage)
            .delete_plan(Uuid::new_v4())
            .await
            .unwrap();

        assert_eq!(response.message_code.as_deref(), Some("I413"));
    }

    #[tokio::test]
    async fn missing_plan_read_is_rejected_with_c410() {
        let mut plan_repo = MockTourishPlanRepository::new();
        plan_repo.expect_find_aggregate().returning(|_| Ok(None));

        let response = usecase(plan_repo, MockBlobStorage::new())
            .get_plan(Uuid::new_v4())
            .await
            .unwrap();

        assert_eq!(response.result_cd, 1);
        assert_eq!(response.message_code.as_deref(), Some("C410"));
    }

    #[tokio::test]
    async fn client_read_hides_unconfirmed_schedules() {
        let plan_id = Uuid::new_v4();
        let mut aggregate = TourishPlanAggregate::new(plan_entity(plan_id));
        let confirmed = stored_schedule(plan_id, PlanStatus::ConfirmInfo);
        aggregate.tourish_schedules = vec![stored_schedule(plan_id, PlanStatus::Draft), confirmed.clone()];

        let mut plan_repo = MockTourishPlanRepository::new();
        plan_repo
            .expect_find_aggregate()
            .returning(move |_| Ok(Some(aggregate.clone())));

        let response = usecase(plan_repo, MockBlobStorage::new())
            .get_client_plan(plan_id)
            .await
            .unwrap();

        let data = response.data.unwrap();
        let schedules = data["tourishSchedules"].as_array().unwrap();
        assert_eq!(schedules.len(), 1);
        assert_eq!(schedules[0]["id"], confirmed.id.to_string());
    }

    #[tokio::test]
    async fn listing_returns_page_and_total_count() {
        let mut plan_repo = MockTourishPlanRepository::new();
        plan_repo
            .expect_list_plans()
            .withf(|query| query.pagination.page == 3 && query.pagination.page_size == 5)
            .returning(|_| {
                Ok(Page {
                    items: (0..2)
                        .map(|_| TourishPlanAggregate::new(plan_entity(Uuid::new_v4())))
                        .collect(),
                    total_count: 12,
                })
            });

        let params = PlanSearchParams {
            page: Some(3),
            ..Default::default()
        };
        let response = usecase(plan_repo, MockBlobStorage::new())
            .list_plans(params, PlanListScope::Public)
            .await
            .unwrap();

        assert_eq!(response.count, Some(12));
        assert_eq!(response.data.unwrap().as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn description_falls_back_to_bare_key() {
        let mut blob_storage = MockBlobStorage::new();
        blob_storage
            .expect_fetch()
            .with(eq(TOURISH_CONTENT_CONTAINER.to_string()), eq("abc.txt".to_string()))
            .returning(|_, _| Ok(String::new()));
        blob_storage
            .expect_fetch()
            .with(eq(TOURISH_CONTENT_CONTAINER.to_string()), eq("abc".to_string()))
            .returning(|_, _| Ok("legacy text".to_string()));

        let text = usecase(MockTourishPlanRepository::new(), blob_storage)
            .get_description(TOURISH_CONTENT_CONTAINER.to_string(), "abc".to_string())
            .await
            .unwrap();

        assert_eq!(text, "legacy text");
    }

    #[tokio::test]
    async fn delete_description_removes_the_stored_text_blob() {
        let plan_id = Uuid::new_v4();
        let mut blob_storage = MockBlobStorage::new();
        blob_storage
            .expect_delete()
            .with(eq(TOURISH_CONTENT_CONTAINER.to_string()), eq(blob_name(plan_id)))
            .times(1)
            .returning(|_, _| Ok(true));

        let deleted = usecase(MockTourishPlanRepository::new(), blob_storage)
            .delete_description(TOURISH_CONTENT_CONTAINER.to_string(), plan_id.to_string())
            .await
            .unwrap();

        assert!(deleted);
    }

    #[tokio::test]
    async fn delete_description_falls_back_to_bare_key() {
        let mut blob_storage = MockBlobStorage::new();
        blob_storage
            .expect_delete()
            .with(eq(EAT_SCHEDULE_CONTAINER.to_string()), eq("legacy.txt".to_string()))
            .times(1)
            .returning(|_, _| Ok(false));
        blob_storage
            .expect_delete()
            .with(eq(EAT_SCHEDULE_CONTAINER.to_string()), eq("legacy".to_string()))
            .times(1)
            .returning(|_, _| Ok(true));

        let deleted = usecase(MockTourishPlanRepository::new(), blob_storage)
            .delete_description(EAT_SCHEDULE_CONTAINER.to_string(), "legacy".to_string())
            .await
            .unwrap();

        assert!(deleted);
    }

    #[tokio::test]
    async fn description_access_outside_known_containers_is_rejected() {
        let mut blob_storage = MockBlobStorage::new();
        blob_storage.expect_fetch().never();
        blob_storage.expect_delete().never();
        let usecase = usecase(MockTourishPlanRepository::new(), blob_storage);

        let read = usecase
            .get_description("any-bucket-at-all".to_string(), "secrets".to_string())
            .await
            .unwrap_err();
        let delete = usecase
            .delete_description("any-bucket-at-all".to_string(), Uuid::new_v4().to_string())
            .await
            .unwrap_err();

        assert!(matches!(read, TourishPlanError::UnknownContainer(_)));
        assert!(matches!(delete, TourishPlanError::UnknownContainer(_)));
        assert_eq!(delete.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }
}
