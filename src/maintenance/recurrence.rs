//! Recurrence date arithmetic and follow-up task creation

use chrono::{DateTime, Months, Utc};
use uuid::Uuid;

use crate::types::{MaintenanceTask, Recurrence, SettlementError, SettlementResult};

/// The next occurrence after `from` under the given recurrence policy.
///
/// Calendar-month addition clamps at month ends: Dec 31 plus one month is
/// Jan 31, while Feb 29 plus twelve months lands on Feb 28 of a non-leap
/// year. Time of day is preserved. Returns `None` for non-recurring
/// policies.
pub fn next_occurrence(from: DateTime<Utc>, recurrence: Recurrence) -> Option<DateTime<Utc>> {
    let months = recurrence.months()?;
    from.checked_add_months(Months::new(months))
}

/// Create the follow-up instance of a completed recurring task.
///
/// The new task copies `title`, `description`, `category`, `recurrence`,
/// and `created_by` under a fresh id, starts out scheduled with cleared
/// completion fields, and is scheduled one recurrence interval after the
/// completion date. A deadline, when the original had one, is recomputed
/// from the completion date as well, not shifted from the old deadline.
pub fn create_recurring_task_from_completed(
    task: &MaintenanceTask,
) -> SettlementResult<MaintenanceTask> {
    if !task.recurrence.is_recurring() {
        return Err(SettlementError::Precondition(
            "Cannot create recurring task from a non-recurring task".to_string(),
        ));
    }

    let completed_date = task.completed_date.ok_or_else(|| {
        SettlementError::Precondition(
            "Cannot create recurring task without completion date".to_string(),
        )
    })?;

    let next = next_occurrence(completed_date, task.recurrence).ok_or_else(|| {
        SettlementError::Precondition("Completion date is out of calendar range".to_string())
    })?;

    let mut follow_up = MaintenanceTask::new(
        Uuid::new_v4().to_string(),
        task.title.clone(),
        task.description.clone(),
        task.category.clone(),
        next,
        task.recurrence,
        task.created_by.clone(),
    );

    if task.due_date.is_some() {
        follow_up.due_date = Some(next);
    }

    Ok(follow_up)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaskStatus;
    use chrono::TimeZone;

    fn completed_task(completed: DateTime<Utc>, recurrence: Recurrence) -> MaintenanceTask {
        let mut task = MaintenanceTask::new(
            "task1".to_string(),
            "Lift servicing".to_string(),
            "Quarterly lift motor inspection".to_string(),
            "elevator".to_string(),
            completed,
            recurrence,
            "admin".to_string(),
        );
        task.status = TaskStatus::Completed;
        task.completed_date = Some(completed);
        task
    }

    #[test]
    fn test_monthly_rollover_clamps_month_end() {
        let from = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        let next = next_occurrence(from, Recurrence::Monthly).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2025, 1, 31, 23, 59, 59).unwrap());

        let from = Utc.with_ymd_and_hms(2025, 1, 31, 8, 0, 0).unwrap();
        let next = next_occurrence(from, Recurrence::Monthly).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2025, 2, 28, 8, 0, 0).unwrap());
    }

    #[test]
    fn test_annual_rollover_clamps_leap_day() {
        let from = Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap();
        let next = next_occurrence(from, Recurrence::Annual).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2025, 2, 28, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_quarterly_and_semi_annual_offsets() {
        let from = Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap();
        assert_eq!(
            next_occurrence(from, Recurrence::Quarterly).unwrap(),
            Utc.with_ymd_and_hms(2025, 4, 15, 9, 30, 0).unwrap()
        );
        assert_eq!(
            next_occurrence(from, Recurrence::SemiAnnual).unwrap(),
            Utc.with_ymd_and_hms(2025, 7, 15, 9, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_no_occurrence_for_one_off_tasks() {
        let from = Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap();
        assert!(next_occurrence(from, Recurrence::None).is_none());
    }

    #[test]
    fn test_follow_up_copies_identity_and_resets_state() {
        let completed = Utc.with_ymd_and_hms(2025, 3, 10, 10, 0, 0).unwrap();
        let mut task = completed_task(completed, Recurrence::Quarterly);
        task.actual_cost = Some(bigdecimal::BigDecimal::from(1500));
        task.attachments = vec!["invoice.pdf".to_string()];
        task.due_date = Some(Utc.with_ymd_and_hms(2025, 3, 20, 0, 0, 0).unwrap());

        let follow_up = create_recurring_task_from_completed(&task).unwrap();

        assert_ne!(follow_up.id, task.id);
        assert_eq!(follow_up.title, task.title);
        assert_eq!(follow_up.description, task.description);
        assert_eq!(follow_up.category, task.category);
        assert_eq!(follow_up.recurrence, task.recurrence);
        assert_eq!(follow_up.created_by, task.created_by);
        assert_eq!(follow_up.status, TaskStatus::Scheduled);
        assert!(follow_up.completed_date.is_none());
        assert!(follow_up.actual_cost.is_none());
        assert!(follow_up.attachments.is_empty());

        let expected = Utc.with_ymd_and_hms(2025, 6, 10, 10, 0, 0).unwrap();
        assert_eq!(follow_up.scheduled_date, expected);
        // deadline recomputed from the completion date, not the old deadline
        assert_eq!(follow_up.due_date, Some(expected));
    }

    #[test]
    fn test_follow_up_without_deadline_stays_deadline_free() {
        let completed = Utc.with_ymd_and_hms(2025, 3, 10, 10, 0, 0).unwrap();
        let task = completed_task(completed, Recurrence::Monthly);

        let follow_up = create_recurring_task_from_completed(&task).unwrap();
        assert!(follow_up.due_date.is_none());
    }

    #[test]
    fn test_non_recurring_task_is_refused() {
        let completed = Utc.with_ymd_and_hms(2025, 3, 10, 10, 0, 0).unwrap();
        let task = completed_task(completed, Recurrence::None);

        let err = create_recurring_task_from_completed(&task).unwrap_err();
        assert!(matches!(err, SettlementError::Precondition(_)));
        assert_eq!(
            err.to_string(),
            "Cannot create recurring task from a non-recurring task"
        );
    }

    #[test]
    fn test_missing_completion_date_is_refused() {
        let completed = Utc.with_ymd_and_hms(2025, 3, 10, 10, 0, 0).unwrap();
        let mut task = completed_task(completed, Recurrence::Monthly);
        task.completed_date = None;

        let err = create_recurring_task_from_completed(&task).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot create recurring task without completion date"
        );
    }
}
