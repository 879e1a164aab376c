use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Lifecycle of a sellable tourish schedule. Only `ConfirmInfo` schedules are
/// shown to customers.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlanStatus {
    #[default]
    Draft,
    ConfirmInfo,
    OnTour,
    Completed,
    Cancelled,
}

impl Display for PlanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            PlanStatus::Draft => "draft",
            PlanStatus::ConfirmInfo => "confirm_info",
            PlanStatus::OnTour => "on_tour",
            PlanStatus::Completed => "completed",
            PlanStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", status)
    }
}

impl PlanStatus {
    pub fn from_str(value: &str) -> Self {
        match value {
            "draft" => PlanStatus::Draft,
            "confirm_info" => PlanStatus::ConfirmInfo,
            "on_tour" => PlanStatus::OnTour,
            "completed" => PlanStatus::Completed,
            "cancelled" => PlanStatus::Cancelled,
            _ => PlanStatus::Draft,
        }
    }

    pub fn is_visible_to_customers(&self) -> bool {
        matches!(self, PlanStatus::ConfirmInfo)
    }
}
