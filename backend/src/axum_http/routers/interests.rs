use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use tourish::{
    domain::{repositories::interests::InterestRepository, value_objects::response::ApiResponse},
    infra::db::{
        postgres::postgres_connection::PgPoolSquad, repositories::interests::InterestPostgres,
    },
};
use uuid::Uuid;

use crate::{
    auth::AuthUser, axum_http::error_responses::AppError, usecases::interests::InterestUseCase,
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let interest_repository = InterestPostgres::new(Arc::clone(&db_pool));
    let interest_usecase = InterestUseCase::new(Arc::new(interest_repository));

    Router::new()
        .route(
            "/tourish-plans/:id/interests",
            get(list_interests::<InterestPostgres>),
        )
        .route(
            "/tourish-plans/:id/interest",
            get(get_interest::<InterestPostgres>).post(toggle_interest::<InterestPostgres>),
        )
        .with_state(Arc::new(interest_usecase))
}

pub async fn list_interests<T>(
    State(interest_usecase): State<Arc<InterestUseCase<T>>>,
    Path(tourish_plan_id): Path<Uuid>,
) -> Result<Json<ApiResponse>, AppError>
where
    T: InterestRepository + Send + Sync + 'static,
{
    Ok(Json(interest_usecase.list_interests(tourish_plan_id).await?))
}

pub async fn get_interest<T>(
    State(interest_usecase): State<Arc<InterestUseCase<T>>>,
    auth: AuthUser,
    Path(tourish_plan_id): Path<Uuid>,
) -> Result<Json<ApiResponse>, AppError>
where
    T: InterestRepository + Send + Sync + 'static,
{
    let response = interest_usecase
        .get_interest(tourish_plan_id, auth.user_id)
        .await?;
    Ok(Json(response))
}

pub async fn toggle_interest<T>(
    State(interest_usecase): State<Arc<InterestUseCase<T>>>,
    auth: AuthUser,
    Path(tourish_plan_id): Path<Uuid>,
) -> Result<Json<ApiResponse>, AppError>
where
    T: InterestRepository + Send + Sync + 'static,
{
    let response = interest_usecase
        .toggle_interest(tourish_plan_id, auth.user_id)
        .await?;
    Ok(Json(response))
}
