use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use tourish::{
    domain::{
        repositories::{storage::BlobStorage, tourish_plans::TourishPlanRepository},
        value_objects::{
            plan_query::{PlanListScope, PlanSearchParams},
            response::ApiResponse,
            tourish_plans::{InsertTourishPlanModel, UpdateTourishPlanModel},
        },
    },
    infra::{
        db::{
            postgres::postgres_connection::PgPoolSquad,
            repositories::tourish_plans::TourishPlanPostgres,
        },
        storages::s3_blob_storage::S3BlobStorage,
    },
};
use uuid::Uuid;

use crate::{
    auth::AuthUser, axum_http::error_responses::AppError,
    usecases::tourish_plans::TourishPlanUseCase,
};

pub fn routes(
    db_pool: Arc<PgPoolSquad>,
    blob_storage: Arc<S3BlobStorage>,
    default_page_size: i64,
) -> Router {
    let tourish_plan_repository = TourishPlanPostgres::new(Arc::clone(&db_pool));
    let tourish_plan_usecase = TourishPlanUseCase::new(
        Arc::new(tourish_plan_repository),
        blob_storage,
        default_page_size,
    );

    type R = TourishPlanPostgres;
    type B = S3BlobStorage;

    Router::new()
        .route(
            "/tourish-plans",
            get(list_plans::<R, B>)
                .post(create_plan::<R, B>)
                .put(update_plan::<R, B>),
        )
        .route("/tourish-plans/authority", get(list_authority_plans::<R, B>))
        .route("/tourish-plans/by-name/:name", get(get_plan_by_name::<R, B>))
        .route("/tourish-plans/client/:id", get(get_client_plan::<R, B>))
        .route(
            "/tourish-plans/descriptions/:container/:key",
            get(get_description::<R, B>).delete(delete_description::<R, B>),
        )
        .route(
            "/tourish-plans/:id",
            get(get_plan::<R, B>).delete(delete_plan::<R, B>),
        )
        .with_state(Arc::new(tourish_plan_usecase))
}

/// Unparseable query strings fall back to an unfiltered listing.
fn search_params(query: Option<Query<PlanSearchParams>>) -> PlanSearchParams {
    query.map(|Query(params)| params).unwrap_or_default()
}

pub async fn list_plans<R, B>(
    State(tourish_plan_usecase): State<Arc<TourishPlanUseCase<R, B>>>,
    query: Option<Query<PlanSearchParams>>,
) -> Result<Json<ApiResponse>, AppError>
where
    R: TourishPlanRepository + Send + Sync + 'static,
    B: BlobStorage + Send + Sync + 'static,
{
    let response = tourish_plan_usecase
        .list_plans(search_params(query), PlanListScope::Public)
        .await?;
    Ok(Json(response))
}

pub async fn list_authority_plans<R, B>(
    State(tourish_plan_usecase): State<Arc<TourishPlanUseCase<R, B>>>,
    auth: AuthUser,
    query: Option<Query<PlanSearchParams>>,
) -> Result<Json<ApiResponse>, AppError>
where
    R: TourishPlanRepository + Send + Sync + 'static,
    B: BlobStorage + Send + Sync + 'static,
{
    let response = tourish_plan_usecase
        .list_plans(
            search_params(query),
            PlanListScope::Authority {
                user_id: auth.user_id,
            },
        )
        .await?;
    Ok(Json(response))
}

pub async fn get_plan<R, B>(
    State(tourish_plan_usecase): State<Arc<TourishPlanUseCase<R, B>>>,
    _auth: AuthUser,
    Path(plan_id): Path<Uuid>,
) -> Result<Json<ApiResponse>, AppError>
where
    R: TourishPlanRepository + Send + Sync + 'static,
    B: BlobStorage + Send + Sync + 'static,
{
    Ok(Json(tourish_plan_usecase.get_plan(plan_id).await?))
}

pub async fn get_client_plan<R, B>(
    State(tourish_plan_usecase): State<Arc<TourishPlanUseCase<R, B>>>,
    Path(plan_id): Path<Uuid>,
) -> Result<Json<ApiResponse>, AppError>
where
    R: TourishPlanRepository + Send + Sync + 'static,
    B: BlobStorage + Send + Sync + 'static,
{
    Ok(Json(tourish_plan_usecase.get_client_plan(plan_id).await?))
}

pub async fn get_plan_by_name<R, B>(
    State(tourish_plan_usecase): State<Arc<TourishPlanUseCase<R, B>>>,
    Path(tour_name): Path<String>,
) -> Result<Json<ApiResponse>, AppError>
where
    R: TourishPlanRepository + Send + Sync + 'static,
    B: BlobStorage + Send + Sync + 'static,
{
    Ok(Json(tourish_plan_usecase.get_plan_by_name(tour_name).await?))
}

pub async fn create_plan<R, B>(
    State(tourish_plan_usecase): State<Arc<TourishPlanUseCase<R, B>>>,
    auth: AuthUser,
    Json(insert_tourish_plan_model): Json<InsertTourishPlanModel>,
) -> Result<Json<ApiResponse>, AppError>
where
    R: TourishPlanRepository + Send + Sync + 'static,
    B: BlobStorage + Send + Sync + 'static,
{
    let response = tourish_plan_usecase
        .create_plan(Some(auth.user_id), insert_tourish_plan_model)
        .await?;
    Ok(Json(response))
}

pub async fn update_plan<R, B>(
    State(tourish_plan_usecase): State<Arc<TourishPlanUseCase<R, B>>>,
    auth: AuthUser,
    Json(update_tourish_plan_model): Json<UpdateTourishPlanModel>,
) -> Result<Json<ApiResponse>, AppError>
where
    R: TourishPlanRepository + Send + Sync + 'static,
    B: BlobStorage + Send + Sync + 'static,
{
    let response = tourish_plan_usecase
        .update_plan(Some(auth.user_id), update_tourish_plan_model)
        .await?;
    Ok(Json(response))
}

pub async fn delete_plan<R, B>(
    State(tourish_plan_usecase): State<Arc<TourishPlanUseCase<R, B>>>,
    _auth: AuthUser,
    Path(plan_id): Path<Uuid>,
) -> Result<Json<ApiResponse>, AppError>
where
    R: TourishPlanRepository + Send + Sync + 'static,
    B: BlobStorage + Send + Sync + 'static,
{
    Ok(Json(tourish_plan_usecase.delete_plan(plan_id).await?))
}

pub async fn get_description<R, B>(
    State(tourish_plan_usecase): State<Arc<TourishPlanUseCase<R, B>>>,
    Path((container, key)): Path<(String, String)>,
) -> Result<String, AppError>
where
    R: TourishPlanRepository + Send + Sync + 'static,
    B: BlobStorage + Send + Sync + 'static,
{
    Ok(tourish_plan_usecase.get_description(container, key).await?)
}

pub async fn delete_description<R, B>(
    State(tourish_plan_usecase): State<Arc<TourishPlanUseCase<R, B>>>,
    _auth: AuthUser,
    Path((container, key)): Path<(String, String)>,
) -> Result<Json<ApiResponse>, AppError>
where
    R: TourishPlanRepository + Send + Sync + 'static,
    B: BlobStorage + Send + Sync + 'static,
{
    let existed = tourish_plan_usecase
        .delete_description(container, key)
        .await?;
    Ok(Json(ApiResponse::data(serde_json::Value::Bool(existed))))
}
