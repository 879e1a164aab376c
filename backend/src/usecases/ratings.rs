use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tourish::domain::{
    entities::ratings::InsertTourishRatingEntity,
    repositories::{ratings::RatingRepository, tourish_plans::TourishPlanRepository},
    value_objects::{
        ratings::{BookingCheckModel, SendRatingModel, TopRatedPlanDto, rank_top_rated},
        response::{ApiResponse, message_codes},
    },
};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::usecases::tourish_plans::to_data;

#[derive(Debug, Error)]
pub enum RatingError {
    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(i32),
    #[error("an email is required to check bookings")]
    MissingEmail,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl RatingError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            RatingError::InvalidRating(_) | RatingError::MissingEmail => StatusCode::BAD_REQUEST,
            RatingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, RatingError>;

pub struct RatingUseCase<R, P>
where
    R: RatingRepository + Send + Sync + 'static,
    P: TourishPlanRepository + Send + Sync + 'static,
{
    rating_repo: Arc<R>,
    plan_repo: Arc<P>,
}

impl<R, P> RatingUseCase<R, P>
where
    R: RatingRepository + Send + Sync + 'static,
    P: TourishPlanRepository + Send + Sync + 'static,
{
    pub fn new(rating_repo: Arc<R>, plan_repo: Arc<P>) -> Self {
        Self {
            rating_repo,
            plan_repo,
        }
    }

    pub async fn send_rating(
        &self,
        user_id: Uuid,
        model: SendRatingModel,
    ) -> UseCaseResult<ApiResponse> {
        if !model.is_in_range() {
            warn!(%user_id, rating = model.rating, "ratings: rating out of range");
            return Err(RatingError::InvalidRating(model.rating));
        }

        let now = Utc::now();
        let tourish_plan_id = model.tourish_plan_id;
        self.rating_repo
            .upsert_rating(InsertTourishRatingEntity {
                tourish_plan_id,
                user_id,
                rating: model.rating,
                create_date: now,
                update_date: now,
            })
            .await
            .map_err(|err| {
                error!(%tourish_plan_id, %user_id, db_error = ?err, "ratings: failed to save rating");
                RatingError::Internal(err)
            })?;

        info!(%tourish_plan_id, %user_id, rating = model.rating, "ratings: rating saved");
        Ok(ApiResponse::ok(message_codes::RATING_SAVED))
    }

    pub async fn top_rated_plans(&self) -> UseCaseResult<ApiResponse> {
        let summaries = self
            .rating_repo
            .list_rating_summaries()
            .await
            .map_err(|err| {
                error!(db_error = ?err, "ratings: failed to load rating summaries");
                RatingError::Internal(err)
            })?;

        let ranked = rank_top_rated(summaries);
        if ranked.is_empty() {
            return Ok(ApiResponse::page(to_data(&Vec::<TopRatedPlanDto>::new())?, 0));
        }

        let plans = self
            .plan_repo
            .find_plans_by_ids(ranked.iter().map(|summary| summary.tourish_plan_id).collect())
            .await
            .map_err(|err| {
                error!(db_error = ?err, "ratings: failed to load top rated plans");
                RatingError::Internal(err)
            })?;

        let items: Vec<TopRatedPlanDto> = ranked
            .iter()
            .filter_map(|summary| {
                plans
                    .iter()
                    .find(|plan| plan.id == summary.tourish_plan_id)
                    .map(|plan| TopRatedPlanDto {
                        plan: plan.clone(),
                        average_rating: summary.average(),
                        rating_count: summary.rating_count,
                    })
            })
            .collect();

        let count = items.len() as i64;
        Ok(ApiResponse::page(to_data(&items)?, count))
    }

    /// `Data` is `true` when the email holds a booking on a schedule that has
    /// not ended yet.
    pub async fn check_booking(
        &self,
        tourish_plan_id: Uuid,
        token_email: Option<String>,
        model: BookingCheckModel,
    ) -> UseCaseResult<ApiResponse> {
        let schedule_filter = model.schedule_filter();
        let email = model
            .email
            .filter(|email| !email.trim().is_empty())
            .or(token_email)
            .ok_or(RatingError::MissingEmail)?;

        let booked = self
            .rating_repo
            .has_active_booking(
                tourish_plan_id,
                email,
                schedule_filter,
                Utc::now(),
            )
            .await
            .map_err(|err| {
                error!(%tourish_plan_id, db_error = ?err, "ratings: failed to check booking");
                RatingError::Internal(err)
            })?;

        Ok(ApiResponse::data(serde_json::Value::Bool(booked)))
    }
}
