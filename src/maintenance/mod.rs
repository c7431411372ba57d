//! Maintenance task management and recurrence scheduling

pub mod recurrence;

pub use recurrence::*;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

use crate::traits::*;
use crate::types::*;

/// Task manager for maintenance work and recurring schedules
pub struct TaskManager<S: CommunityStorage> {
    storage: S,
    validator: Box<dyn TaskValidator>,
}

impl<S: CommunityStorage> TaskManager<S> {
    /// Create a new task manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultTaskValidator),
        }
    }

    /// Create a new task manager with custom validator
    pub fn with_validator(storage: S, validator: Box<dyn TaskValidator>) -> Self {
        Self { storage, validator }
    }

    /// Create a new maintenance task
    pub async fn create_task(&mut self, task: MaintenanceTask) -> SettlementResult<MaintenanceTask> {
        self.validator.validate_task(&task)?;

        if self.storage.get_task(&task.id).await?.is_some() {
            return Err(SettlementError::Validation(format!(
                "Task with ID '{}' already exists",
                task.id
            )));
        }

        self.storage.save_task(&task).await?;

        Ok(task)
    }

    /// Get a task by ID
    pub async fn get_task(&self, task_id: &str) -> SettlementResult<Option<MaintenanceTask>> {
        self.storage.get_task(task_id).await
    }

    /// Get a task by ID, returning an error if not found
    pub async fn get_task_required(&self, task_id: &str) -> SettlementResult<MaintenanceTask> {
        self.storage
            .get_task(task_id)
            .await?
            .ok_or_else(|| SettlementError::TaskNotFound(task_id.to_string()))
    }

    /// List tasks, optionally filtered by status
    pub async fn list_tasks(
        &self,
        status: Option<TaskStatus>,
    ) -> SettlementResult<Vec<MaintenanceTask>> {
        self.storage.list_tasks(status).await
    }

    /// Update a task
    pub async fn update_task(&mut self, task: &MaintenanceTask) -> SettlementResult<()> {
        self.validator.validate_task(task)?;

        if self.storage.get_task(&task.id).await?.is_none() {
            return Err(SettlementError::TaskNotFound(task.id.clone()));
        }

        self.storage.update_task(task).await
    }

    /// Delete a task
    pub async fn delete_task(&mut self, task_id: &str) -> SettlementResult<()> {
        if self.storage.get_task(task_id).await?.is_none() {
            return Err(SettlementError::TaskNotFound(task_id.to_string()));
        }

        self.storage.delete_task(task_id).await
    }

    /// Mark a task as completed, recording when and at what cost
    pub async fn complete_task(
        &mut self,
        task_id: &str,
        completed_date: DateTime<Utc>,
        actual_cost: Option<BigDecimal>,
    ) -> SettlementResult<MaintenanceTask> {
        let mut task = self.get_task_required(task_id).await?;

        match task.status {
            TaskStatus::Completed => {
                return Err(SettlementError::InvalidStatusTransition(format!(
                    "task '{task_id}' is already completed"
                )))
            }
            TaskStatus::Cancelled => {
                return Err(SettlementError::InvalidStatusTransition(format!(
                    "task '{task_id}' is cancelled"
                )))
            }
            TaskStatus::Scheduled | TaskStatus::InProgress => {}
        }

        task.status = TaskStatus::Completed;
        task.completed_date = Some(completed_date);
        task.actual_cost = actual_cost;
        task.updated_at = chrono::Utc::now().naive_utc();

        self.storage.update_task(&task).await?;

        Ok(task)
    }

    /// Spawn the follow-up instance of a completed recurring task and
    /// persist it. The completed original is left untouched.
    pub async fn roll_over_completed(&mut self, task_id: &str) -> SettlementResult<MaintenanceTask> {
        let task = self.get_task_required(task_id).await?;

        let follow_up = recurrence::create_recurring_task_from_completed(&task)?;

        self.storage.save_task(&follow_up).await?;

        Ok(follow_up)
    }
}
