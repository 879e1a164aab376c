use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    entities::{
        tourish_plans::{TourishPlanEntity, UpdateTourishPlanEntity},
        tourish_schedules::{TourishScheduleEntity, UpdateTourishScheduleEntity},
    },
    value_objects::tourish_plans::{TourishScheduleChange, TourishScheduleModel},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleValidationError {
    #[error("tourish schedule tickets must not be negative (total {total_ticket}, remain {remain_ticket})")]
    NegativeTickets { total_ticket: i32, remain_ticket: i32 },
}

pub fn validate_tourish_schedules(
    schedules: &[TourishScheduleModel],
) -> Result<(), ScheduleValidationError> {
    match schedules.iter().find(|schedule| schedule.has_negative_tickets()) {
        Some(schedule) => Err(ScheduleValidationError::NegativeTickets {
            total_ticket: schedule.total_ticket,
            remain_ticket: schedule.remain_ticket,
        }),
        None => Ok(()),
    }
}

/// Names of the scalar plan fields whose value differs after the update.
pub fn changed_plan_properties(
    existing: &TourishPlanEntity,
    next: &UpdateTourishPlanEntity,
) -> Vec<String> {
    let comparisons = [
        ("tourName", existing.tour_name == next.tour_name),
        ("startingPoint", existing.starting_point == next.starting_point),
        ("endPoint", existing.end_point == next.end_point),
        ("supportNumber", existing.support_number == next.support_number),
    ];

    comparisons
        .into_iter()
        .filter(|(_, unchanged)| !unchanged)
        .map(|(name, _)| name.to_string())
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleReconciliation {
    pub updates: Vec<TourishScheduleChange>,
    pub inserts: Vec<TourishScheduleModel>,
    /// Ids of existing schedules with at least one field changed.
    pub changed_ids: Vec<Uuid>,
    pub is_new_schedule_added: bool,
}

/// Matches incoming schedule entries against the plan's stored schedules.
/// Entries naming an id the plan does not own are dropped; stored schedules
/// missing from the request are left alone.
pub fn reconcile_tourish_schedules(
    existing: &[TourishScheduleEntity],
    incoming: &[TourishScheduleModel],
    now: DateTime<Utc>,
) -> Result<ScheduleReconciliation, ScheduleValidationError> {
    validate_tourish_schedules(incoming)?;

    let mut reconciliation = ScheduleReconciliation::default();

    for entry in incoming {
        let Some(schedule_id) = entry.id else {
            reconciliation.inserts.push(entry.clone());
            reconciliation.is_new_schedule_added = true;
            continue;
        };

        let Some(stored) = existing.iter().find(|stored| stored.id == schedule_id) else {
            continue;
        };

        let plan_status = entry.plan_status.to_string();
        let changed = stored.plan_status != plan_status
            || stored.start_date != entry.start_date
            || stored.end_date != entry.end_date
            || stored.total_ticket != entry.total_ticket
            || stored.remain_ticket != entry.remain_ticket;

        if changed && !reconciliation.changed_ids.contains(&schedule_id) {
            reconciliation.changed_ids.push(schedule_id);
        }

        reconciliation.updates.push(TourishScheduleChange {
            schedule_id,
            changes: UpdateTourishScheduleEntity {
                plan_status,
                start_date: entry.start_date,
                end_date: entry.end_date,
                total_ticket: entry.total_ticket,
                remain_ticket: entry.remain_ticket,
                update_date: now,
            },
        });
    }

    Ok(reconciliation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::enums::plan_statuses::PlanStatus;
    use chrono::{Duration, TimeZone};

    fn stored_schedule(plan_id: Uuid) -> TourishScheduleEntity {
        let start = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        TourishScheduleEntity {
            id: Uuid::new_v4(),
            tourish_plan_id: plan_id,
            plan_status: PlanStatus::Draft.to_string(),
            start_date: start,
            end_date: Some(start + Duration::days(3)),
            total_ticket: 30,
            remain_ticket: 30,
            create_date: start,
            update_date: start,
        }
    }

    fn entry_from(stored: &TourishScheduleEntity) -> TourishScheduleModel {
        TourishScheduleModel {
            id: Some(stored.id),
            plan_status: PlanStatus::from_str(&stored.plan_status),
            start_date: stored.start_date,
            end_date: stored.end_date,
            total_ticket: stored.total_ticket,
            remain_ticket: stored.remain_ticket,
        }
    }

    #[test]
    fn unchanged_schedule_is_rewritten_but_not_reported() {
        let stored = stored_schedule(Uuid::new_v4());
        let result =
            reconcile_tourish_schedules(&[stored.clone()], &[entry_from(&stored)], Utc::now()).unwrap();

        assert_eq!(result.updates.len(), 1);
        assert!(result.changed_ids.is_empty());
        assert!(!result.is_new_schedule_added);
    }

    #[test]
    fn changed_status_is_reported() {
        let stored = stored_schedule(Uuid::new_v4());
        let mut entry = entry_from(&stored);
        entry.plan_status = PlanStatus::ConfirmInfo;
        entry.remain_ticket = 28;

        let now = Utc::now();
        let result = reconcile_tourish_schedules(&[stored.clone()], &[entry], now).unwrap();

        assert_eq!(result.changed_ids, vec![stored.id]);
        assert_eq!(result.updates[0].changes.plan_status, "confirm_info");
        assert_eq!(result.updates[0].changes.update_date, now);
    }

    #[test]
    fn entry_without_id_is_inserted() {
        let stored = stored_schedule(Uuid::new_v4());
        let mut entry = entry_from(&stored);
        entry.id = None;

        let result = reconcile_tourish_schedules(&[stored], &[entry.clone()], Utc::now()).unwrap();

        assert_eq!(result.inserts, vec![entry]);
        assert!(result.is_new_schedule_added);
        assert!(result.updates.is_empty());
    }

    #[test]
    fn foreign_schedule_id_is_ignored() {
        let stored = stored_schedule(Uuid::new_v4());
        let mut entry = entry_from(&stored);
        entry.id = Some(Uuid::new_v4());
        entry.total_ticket = 99;

        let result = reconcile_tourish_schedules(&[stored], &[entry], Utc::now()).unwrap();

        assert_eq!(result, ScheduleReconciliation::default());
    }

    #[test]
    fn negative_tickets_are_rejected() {
        let stored = stored_schedule(Uuid::new_v4());
        let mut entry = entry_from(&stored);
        entry.remain_ticket = -1;

        let err = reconcile_tourish_schedules(&[stored], &[entry], Utc::now()).unwrap_err();
        assert_eq!(
            err,
            ScheduleValidationError::NegativeTickets {
                total_ticket: 30,
                remain_ticket: -1
            }
        );
    }

    #[test]
    fn property_diff_lists_changed_scalars_in_field_order() {
        let now = Utc::now();
        let existing = TourishPlanEntity {
            id: Uuid::new_v4(),
            tour_name: "Sa Pa".to_string(),
            starting_point: "Ha Noi".to_string(),
            end_point: "Sa Pa".to_string(),
            support_number: "0909".to_string(),
            create_date: now,
            update_date: now,
        };
        let next = UpdateTourishPlanEntity {
            tour_name: "Sa Pa Trekking".to_string(),
            starting_point: "Ha Noi".to_string(),
            end_point: "Sa Pa".to_string(),
            support_number: "0911".to_string(),
            update_date: now,
        };

        assert_eq!(
            changed_plan_properties(&existing, &next),
            vec!["tourName".to_string(), "supportNumber".to_string()]
        );
    }
}
