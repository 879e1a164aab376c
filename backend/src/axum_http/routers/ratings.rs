use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use tourish::{
    domain::{
        repositories::{ratings::RatingRepository, tourish_plans::TourishPlanRepository},
        value_objects::{
            ratings::{BookingCheckModel, SendRatingModel},
            response::ApiResponse,
        },
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{ratings::RatingPostgres, tourish_plans::TourishPlanPostgres},
    },
};
use uuid::Uuid;

use crate::{
    auth::AuthUser, axum_http::error_responses::AppError, usecases::ratings::RatingUseCase,
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let rating_repository = RatingPostgres::new(Arc::clone(&db_pool));
    let tourish_plan_repository = TourishPlanPostgres::new(Arc::clone(&db_pool));
    let rating_usecase = RatingUseCase::new(
        Arc::new(rating_repository),
        Arc::new(tourish_plan_repository),
    );

    type R = RatingPostgres;
    type P = TourishPlanPostgres;

    Router::new()
        .route("/schedule-ratings", post(send_rating::<R, P>))
        .route("/tourish-plans/top-rating", get(top_rated_plans::<R, P>))
        .route(
            "/tourish-plans/:id/booking-check",
            post(check_booking::<R, P>),
        )
        .with_state(Arc::new(rating_usecase))
}

pub async fn send_rating<R, P>(
    State(rating_usecase): State<Arc<RatingUseCase<R, P>>>,
    auth: AuthUser,
    Json(send_rating_model): Json<SendRatingModel>,
) -> Result<Json<ApiResponse>, AppError>
where
    R: RatingRepository + Send + Sync + 'static,
    P: TourishPlanRepository + Send + Sync + 'static,
{
    let response = rating_usecase
        .send_rating(auth.user_id, send_rating_model)
        .await?;
    Ok(Json(response))
}

pub async fn top_rated_plans<R, P>(
    State(rating_usecase): State<Arc<RatingUseCase<R, P>>>,
) -> Result<Json<ApiResponse>, AppError>
where
    R: RatingRepository + Send + Sync + 'static,
    P: TourishPlanRepository + Send + Sync + 'static,
{
    Ok(Json(rating_usecase.top_rated_plans().await?))
}

pub async fn check_booking<R, P>(
    State(rating_usecase): State<Arc<RatingUseCase<R, P>>>,
    auth: AuthUser,
    Path(tourish_plan_id): Path<Uuid>,
    Json(booking_check_model): Json<BookingCheckModel>,
) -> Result<Json<ApiResponse>, AppError>
where
    R: RatingRepository + Send + Sync + 'static,
    P: TourishPlanRepository + Send + Sync + 'static,
{
    let response = rating_usecase
        .check_booking(tourish_plan_id, auth.email, booking_check_model)
        .await?;
    Ok(Json(response))
}
