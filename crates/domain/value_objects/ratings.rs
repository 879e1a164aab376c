use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::tourish_plans::TourishPlanEntity;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Plans need more ratings than this before they can be ranked.
pub const TOP_RATING_MIN_COUNT: i64 = 10;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SendRatingModel {
    pub tourish_plan_id: Uuid,
    pub rating: i32,
}

impl SendRatingModel {
    pub fn is_in_range(&self) -> bool {
        (MIN_RATING..=MAX_RATING).contains(&self.rating)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanRatingSummary {
    pub tourish_plan_id: Uuid,
    pub rating_count: i64,
    pub rating_total: i64,
}

impl PlanRatingSummary {
    pub fn average(&self) -> f64 {
        if self.rating_count == 0 {
            return 0.0;
        }
        self.rating_total as f64 / self.rating_count as f64
    }
}

/// Summaries eligible for the top-rated listing, best first.
pub fn rank_top_rated(summaries: Vec<PlanRatingSummary>) -> Vec<PlanRatingSummary> {
    let mut ranked: Vec<PlanRatingSummary> = summaries
        .into_iter()
        .filter(|summary| summary.rating_count > TOP_RATING_MIN_COUNT)
        .collect();

    ranked.sort_by(|left, right| {
        right
            .average()
            .total_cmp(&left.average())
            .then_with(|| right.rating_count.cmp(&left.rating_count))
    });

    ranked
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopRatedPlanDto {
    #[serde(flatten)]
    pub plan: TourishPlanEntity,
    pub average_rating: f64,
    pub rating_count: i64,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingCheckModel {
    /// Falls back to the email in the caller's token.
    pub email: Option<String>,
    pub tourish_schedule_ids: Option<Vec<Uuid>>,
}

impl BookingCheckModel {
    /// Schedules the check is limited to. An empty list means every schedule.
    pub fn schedule_filter(&self) -> Option<Vec<Uuid>> {
        self.tourish_schedule_ids
            .clone()
            .filter(|schedule_ids| !schedule_ids.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(rating_count: i64, rating_total: i64) -> PlanRatingSummary {
        PlanRatingSummary {
            tourish_plan_id: Uuid::new_v4(),
            rating_count,
            rating_total,
        }
    }

    #[test]
    fn ranks_by_average_then_count() {
        let steady = summary(20, 80);
        let popular = summary(40, 160);
        let best = summary(11, 55);
        let too_few = summary(10, 50);

        let ranked = rank_top_rated(vec![steady, too_few, popular, best]);

        assert_eq!(ranked, vec![best, popular, steady]);
    }

    #[test]
    fn rating_range_is_one_to_five() {
        let plan_id = Uuid::new_v4();
        let accepted: Vec<i32> = (-1..=7)
            .filter(|rating| {
                SendRatingModel {
                    tourish_plan_id: plan_id,
                    rating: *rating,
                }
                .is_in_range()
            })
            .collect();

        assert_eq!(accepted, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn empty_schedule_list_is_no_restriction() {
        let schedule_id = Uuid::new_v4();
        let unrestricted = BookingCheckModel {
            email: None,
            tourish_schedule_ids: Some(Vec::new()),
        };
        let limited = BookingCheckModel {
            email: None,
            tourish_schedule_ids: Some(vec![schedule_id]),
        };

        assert_eq!(unrestricted.schedule_filter(), None);
        assert_eq!(BookingCheckModel::default().schedule_filter(), None);
        assert_eq!(limited.schedule_filter(), Some(vec![schedule_id]));
    }
}
