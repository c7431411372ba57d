//! Traits for storage abstraction and extensibility

use async_trait::async_trait;

use crate::types::*;

/// Storage abstraction for the settlement system
///
/// This trait allows the settlement core to work with any storage backend
/// (a document store, PostgreSQL, SQLite, in-memory, etc.) by implementing
/// these methods. Persistence failure semantics live entirely behind this
/// seam: the managers compute new values, hand them here, and propagate
/// errors without touching previously stored state.
#[async_trait]
pub trait CommunityStorage: Send + Sync {
    /// Save an expense to storage
    async fn save_expense(&mut self, expense: &Expense) -> SettlementResult<()>;

    /// Get an expense by ID
    async fn get_expense(&self, expense_id: &str) -> SettlementResult<Option<Expense>>;

    /// List all expenses
    async fn list_expenses(&self) -> SettlementResult<Vec<Expense>>;

    /// Update an expense
    async fn update_expense(&mut self, expense: &Expense) -> SettlementResult<()>;

    /// Delete an expense (explicit admin action, no cascade)
    async fn delete_expense(&mut self, expense_id: &str) -> SettlementResult<()>;

    /// Save a payment to storage
    async fn save_payment(&mut self, payment: &Payment) -> SettlementResult<()>;

    /// Get a payment by ID
    async fn get_payment(&self, payment_id: &str) -> SettlementResult<Option<Payment>>;

    /// List payments, optionally restricted to one `YYYY-MM` month
    async fn list_payments(&self, month_year: Option<&str>) -> SettlementResult<Vec<Payment>>;

    /// Update a payment
    async fn update_payment(&mut self, payment: &Payment) -> SettlementResult<()>;

    /// Delete a payment regardless of its status
    async fn delete_payment(&mut self, payment_id: &str) -> SettlementResult<()>;

    /// Save a maintenance task to storage
    async fn save_task(&mut self, task: &MaintenanceTask) -> SettlementResult<()>;

    /// Get a maintenance task by ID
    async fn get_task(&self, task_id: &str) -> SettlementResult<Option<MaintenanceTask>>;

    /// List maintenance tasks, optionally filtered by status
    async fn list_tasks(&self, status: Option<TaskStatus>)
        -> SettlementResult<Vec<MaintenanceTask>>;

    /// Update a maintenance task
    async fn update_task(&mut self, task: &MaintenanceTask) -> SettlementResult<()>;

    /// Delete a maintenance task
    async fn delete_task(&mut self, task_id: &str) -> SettlementResult<()>;
}

/// Trait for implementing custom expense validation rules
pub trait ExpenseValidator: Send + Sync {
    /// Validate an expense before saving
    fn validate_expense(&self, expense: &Expense) -> SettlementResult<()>;

    /// Validate expense deletion
    fn validate_expense_deletion(&self, expense_id: &str) -> SettlementResult<()>;
}

/// Trait for implementing custom payment validation rules
pub trait PaymentValidator: Send + Sync {
    /// Validate a payment before saving
    fn validate_payment(&self, payment: &Payment) -> SettlementResult<()>;

    /// Validate a status transition before applying it
    fn validate_status_transition(
        &self,
        current: PaymentStatus,
        next: PaymentStatus,
    ) -> SettlementResult<()>;
}

/// Trait for implementing custom maintenance task validation rules
pub trait TaskValidator: Send + Sync {
    /// Validate a task before saving
    fn validate_task(&self, task: &MaintenanceTask) -> SettlementResult<()>;
}

/// Default expense validator with basic rules
pub struct DefaultExpenseValidator;

impl ExpenseValidator for DefaultExpenseValidator {
    fn validate_expense(&self, expense: &Expense) -> SettlementResult<()> {
        if expense.id.trim().is_empty() {
            return Err(SettlementError::Validation(
                "Expense ID cannot be empty".to_string(),
            ));
        }

        if expense.paid_by_apartment.trim().is_empty() {
            return Err(SettlementError::Validation(
                "Paying apartment cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_expense_deletion(&self, _expense_id: &str) -> SettlementResult<()> {
        // Deletion is an explicit admin action with no feedback loop into
        // other entities, so nothing to check here
        Ok(())
    }
}

/// Default payment validator with basic rules
pub struct DefaultPaymentValidator;

impl PaymentValidator for DefaultPaymentValidator {
    fn validate_payment(&self, payment: &Payment) -> SettlementResult<()> {
        if payment.id.trim().is_empty() {
            return Err(SettlementError::Validation(
                "Payment ID cannot be empty".to_string(),
            ));
        }

        if payment.payer_id.trim().is_empty() {
            return Err(SettlementError::Validation(
                "Payer cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_status_transition(
        &self,
        current: PaymentStatus,
        next: PaymentStatus,
    ) -> SettlementResult<()> {
        match (current, next) {
            // A rejected payment is immutable
            (PaymentStatus::Rejected, _) => Err(SettlementError::InvalidStatusTransition(
                "rejected payments cannot change status".to_string(),
            )),
            (PaymentStatus::Pending, PaymentStatus::Approved)
            | (PaymentStatus::Pending, PaymentStatus::Rejected)
            | (PaymentStatus::Approved, PaymentStatus::Paid) => Ok(()),
            (from, to) => Err(SettlementError::InvalidStatusTransition(format!(
                "{from:?} -> {to:?} is not allowed"
            ))),
        }
    }
}

/// Default task validator with basic rules
pub struct DefaultTaskValidator;

impl TaskValidator for DefaultTaskValidator {
    fn validate_task(&self, task: &MaintenanceTask) -> SettlementResult<()> {
        if task.id.trim().is_empty() {
            return Err(SettlementError::Validation(
                "Task ID cannot be empty".to_string(),
            ));
        }

        if task.title.trim().is_empty() {
            return Err(SettlementError::Validation(
                "Task title cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
