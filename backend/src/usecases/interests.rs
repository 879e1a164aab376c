use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tourish::domain::{
    entities::interests::InsertTourishInterestEntity,
    repositories::interests::InterestRepository,
    value_objects::{
        enums::interest_statuses::InterestStatus,
        response::{ApiResponse, message_codes},
    },
};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::usecases::tourish_plans::to_data;

#[derive(Debug, Error)]
pub enum InterestError {
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl InterestError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        match self {
            InterestError::Internal(_) => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, InterestError>;

pub struct InterestUseCase<T>
where
    T: InterestRepository + Send + Sync + 'static,
{
    interest_repo: Arc<T>,
}

impl<T> InterestUseCase<T>
where
    T: InterestRepository + Send + Sync + 'static,
{
    pub fn new(interest_repo: Arc<T>) -> Self {
        Self { interest_repo }
    }

    /// Flips the caller's interest in a plan. Plan roles (creator, modifier,
    /// user) are locked and get `C416`.
    pub async fn toggle_interest(
        &self,
        tourish_plan_id: Uuid,
        user_id: Uuid,
    ) -> UseCaseResult<ApiResponse> {
        let existing = self
            .interest_repo
            .find_interest(tourish_plan_id, user_id)
            .await
            .map_err(|err| {
                error!(%tourish_plan_id, %user_id, db_error = ?err, "interests: failed to load interest");
                InterestError::Internal(err)
            })?;
        let now = Utc::now();

        let Some(interest) = existing else {
            self.interest_repo
                .insert_interest(InsertTourishInterestEntity {
                    tourish_plan_id,
                    user_id,
                    interest_status: InterestStatus::Interest.to_string(),
                    create_date: now,
                    update_date: now,
                })
                .await
                .map_err(|err| {
                    error!(%tourish_plan_id, %user_id, db_error = ?err, "interests: failed to insert interest");
                    InterestError::Internal(err)
                })?;

            info!(%tourish_plan_id, %user_id, "interests: interest added");
            return Ok(ApiResponse::ok(message_codes::INTEREST_ADDED));
        };

        let Some(current) = InterestStatus::from_str(&interest.interest_status) else {
            warn!(
                interest_id = %interest.id,
                status = %interest.interest_status,
                "interests: unrecognized stored status, toggle rejected"
            );
            return Ok(ApiResponse::rejected(message_codes::INTEREST_LOCKED));
        };
        let Some(next) = current.toggled() else {
            info!(
                %tourish_plan_id,
                %user_id,
                status = %current,
                "interests: toggle rejected for plan role"
            );
            return Ok(ApiResponse::rejected(message_codes::INTEREST_LOCKED));
        };

        self.interest_repo
            .update_interest_status(interest.id, next.to_string(), now)
            .await
            .map_err(|err| {
                error!(interest_id = %interest.id, db_error = ?err, "interests: failed to update interest");
                InterestError::Internal(err)
            })?;

        info!(%tourish_plan_id, %user_id, status = %next, "interests: interest toggled");
        let message_code = match next {
            InterestStatus::NotInterested => message_codes::INTEREST_REMOVED,
            _ => message_codes::INTEREST_ADDED,
        };
        Ok(ApiResponse::ok(message_code))
    }

    pub async fn get_interest(
        &self,
        tourish_plan_id: Uuid,
        user_id: Uuid,
    ) -> UseCaseResult<ApiResponse> {
        let interest = self
            .interest_repo
            .find_interest(tourish_plan_id, user_id)
            .await
            .map_err(|err| {
                error!(%tourish_plan_id, %user_id, db_error = ?err, "interests: failed to load interest");
                InterestError::Internal(err)
            })?;

        Ok(ApiResponse::data(to_data(&interest)?))
    }

    pub async fn list_interests(&self, tourish_plan_id: Uuid) -> UseCaseResult<ApiResponse> {
        let interests = self
            .interest_repo
            .list_plan_interests(tourish_plan_id)
            .await
            .map_err(|err| {
                error!(%tourish_plan_id, db_error = ?err, "interests: failed to list interests");
                InterestError::Internal(err)
            })?;

        let count = interests.len() as i64;
        Ok(ApiResponse::page(to_data(&interests)?, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::{always, eq};
    use tourish::domain::{
        entities::interests::TourishInterestEntity, repositories::interests::MockInterestRepository,
    };

    fn stored_interest(status: InterestStatus) -> TourishInterestEntity {
        let now = Utc::now();
        TourishInterestEntity {
            id: Uuid::new_v4(),
            tourish_plan_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            interest_status: status.to_string(),
            create_date: now,
            update_date: now,
        }
    }

    #[tokio::test]
    async fn first_toggle_inserts_interest() {
        let plan_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        let mut interest_repo = MockInterestRepository::new();

        interest_repo
            .expect_find_interest()
            .with(eq(plan_id), eq(user_id))
            .returning(|_, _| Ok(None));
        interest_repo
            .expect_insert_interest()
            .withf(move |insert| {
                insert.tourish_plan_id == plan_id
                    && insert.user_id == user_id
                    && insert.interest_status == "interest"
            })
            .times(1)
            .returning(|_| Ok(Uuid::new_v4()));

        let response = InterestUseCase::new(Arc::new(interest_repo))
            .toggle_interest(plan_id, user_id)
            .await
            .unwrap();

        assert_eq!(response.message_code.as_deref(), Some("I415"));
    }

    #[tokio::test]
    async fn interest_toggles_to_not_interested() {
        let interest = stored_interest(InterestStatus::Interest);
        let interest_id = interest.id;
        let mut interest_repo = MockInterestRepository::new();

        interest_repo
            .expect_find_interest()
            .returning(move |_, _| Ok(Some(interest.clone())));
        interest_repo
            .expect_update_interest_status()
            .with(eq(interest_id), eq("not_interested".to_string()), always())
            .times(1)
            .returning(|_, _, _| Ok(()));

        let response = InterestUseCase::new(Arc::new(interest_repo))
            .toggle_interest(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap();

        assert_eq!(response.result_cd, 0);
        assert_eq!(response.message_code.as_deref(), Some("I416"));
    }

    #[tokio::test]
    async fn not_interested_toggles_back() {
        let interest = stored_interest(InterestStatus::NotInterested);
        let mut interest_repo = MockInterestRepository::new();

        interest_repo
            .expect_find_interest()
            .returning(move |_, _| Ok(Some(interest.clone())));
        interest_repo
            .expect_update_interest_status()
            .with(always(), eq("interest".to_string()), always())
            .times(1)
            .returning(|_, _, _| Ok(()));

        let response = InterestUseCase::new(Arc::new(interest_repo))
            .toggle_interest(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap();

        assert_eq!(response.message_code.as_deref(), Some("I415"));
    }

    #[tokio::test]
    async fn creator_cannot_toggle() {
        let interest = stored_interest(InterestStatus::Creator);
        let mut interest_repo = MockInterestRepository::new();

        interest_repo
            .expect_find_interest()
            .returning(move |_, _| Ok(Some(interest.clone())));
        interest_repo.expect_update_interest_status().never();
        interest_repo.expect_insert_interest().never();

        let response = InterestUseCase::new(Arc::new(interest_repo))
            .toggle_interest(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap();

        assert_eq!(response.result_cd, 1);
        assert_eq!(response.message_code.as_deref(), Some("C416"));
    }

    #[tokio::test]
    async fn unrecognized_stored_status_stays_locked() {
        let mut interest = stored_interest(InterestStatus::Interest);
        interest.interest_status = "owner".to_string();
        let mut interest_repo = MockInterestRepository::new();

        interest_repo
            .expect_find_interest()
            .returning(move |_, _| Ok(Some(interest.clone())));
        interest_repo.expect_update_interest_status().never();
        interest_repo.expect_insert_interest().never();

        let response = InterestUseCase::new(Arc::new(interest_repo))
            .toggle_interest(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap();

        assert_eq!(response.result_cd, 1);
        assert_eq!(response.message_code.as_deref(), Some("C416"));
    }
}
