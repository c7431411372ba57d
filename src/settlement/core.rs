//! Main ledger facade that coordinates expenses, payments, and tasks

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::maintenance::TaskManager;
use crate::reporting::{aggregate, BalanceSummary, MonthlyBalanceSheet};
use crate::settlement::{ExpenseManager, ExpenseSplit, PaymentManager};
use crate::traits::*;
use crate::types::*;
use crate::utils::validation::validate_month_year;

/// Community ledger that orchestrates all settlement operations
pub struct CommunityLedger<S: CommunityStorage> {
    expense_manager: ExpenseManager<S>,
    payment_manager: PaymentManager<S>,
    task_manager: TaskManager<S>,
}

impl<S: CommunityStorage + Clone> CommunityLedger<S> {
    /// Create a new ledger with the given storage backend
    pub fn new(storage: S) -> Self {
        Self {
            expense_manager: ExpenseManager::new(storage.clone()),
            payment_manager: PaymentManager::new(storage.clone()),
            task_manager: TaskManager::new(storage),
        }
    }

    /// Create a new ledger with custom validators
    pub fn with_validators(
        storage: S,
        expense_validator: Box<dyn ExpenseValidator>,
        payment_validator: Box<dyn PaymentValidator>,
        task_validator: Box<dyn TaskValidator>,
    ) -> Self {
        Self {
            expense_manager: ExpenseManager::with_validator(storage.clone(), expense_validator),
            payment_manager: PaymentManager::with_validator(storage.clone(), payment_validator),
            task_manager: TaskManager::with_validator(storage, task_validator),
        }
    }

    // Expense operations
    /// Create a new shared expense
    pub async fn create_expense(&mut self, expense: Expense) -> SettlementResult<Expense> {
        self.expense_manager.create_expense(expense).await
    }

    /// Get an expense by ID
    pub async fn get_expense(&self, expense_id: &str) -> SettlementResult<Option<Expense>> {
        self.expense_manager.get_expense(expense_id).await
    }

    /// List all expenses
    pub async fn list_expenses(&self) -> SettlementResult<Vec<Expense>> {
        self.expense_manager.list_expenses().await
    }

    /// Update an expense
    pub async fn update_expense(&mut self, expense: &Expense) -> SettlementResult<()> {
        self.expense_manager.update_expense(expense).await
    }

    /// Delete an expense
    pub async fn delete_expense(&mut self, expense_id: &str) -> SettlementResult<()> {
        self.expense_manager.delete_expense(expense_id).await
    }

    /// Mark an apartment's share of an expense as paid
    pub async fn settle_share(
        &mut self,
        expense_id: &str,
        apartment_id: &str,
    ) -> SettlementResult<Expense> {
        self.expense_manager
            .settle_share(expense_id, apartment_id)
            .await
    }

    /// Revert an apartment's share of an expense to unpaid
    pub async fn unsettle_share(
        &mut self,
        expense_id: &str,
        apartment_id: &str,
    ) -> SettlementResult<Expense> {
        self.expense_manager
            .unsettle_share(expense_id, apartment_id)
            .await
    }

    /// Calculate the split breakdown for a stored expense
    pub async fn split_for(&self, expense_id: &str) -> SettlementResult<ExpenseSplit> {
        self.expense_manager.split_for(expense_id).await
    }

    // Payment operations
    /// Record a new payment
    pub async fn record_payment(&mut self, payment: Payment) -> SettlementResult<Payment> {
        self.payment_manager.record_payment(payment).await
    }

    /// Get a payment by ID
    pub async fn get_payment(&self, payment_id: &str) -> SettlementResult<Option<Payment>> {
        self.payment_manager.get_payment(payment_id).await
    }

    /// List payments, optionally restricted to one month
    pub async fn list_payments(
        &self,
        month_year: Option<&str>,
    ) -> SettlementResult<Vec<Payment>> {
        self.payment_manager.list_payments(month_year).await
    }

    /// Approve a pending payment
    pub async fn approve_payment(
        &mut self,
        payment_id: &str,
        admin_id: &str,
        admin_name: &str,
    ) -> SettlementResult<Payment> {
        self.payment_manager
            .approve_payment(payment_id, admin_id, admin_name)
            .await
    }

    /// Reject a pending payment
    pub async fn reject_payment(
        &mut self,
        payment_id: &str,
        admin_id: &str,
        admin_name: &str,
    ) -> SettlementResult<Payment> {
        self.payment_manager
            .reject_payment(payment_id, admin_id, admin_name)
            .await
    }

    /// Mark an approved payment as settled in full
    pub async fn mark_payment_paid(&mut self, payment_id: &str) -> SettlementResult<Payment> {
        self.payment_manager.mark_payment_paid(payment_id).await
    }

    /// Update a payment
    pub async fn update_payment(&mut self, payment: &Payment) -> SettlementResult<()> {
        self.payment_manager.update_payment(payment).await
    }

    /// Delete a payment regardless of its status
    pub async fn delete_payment(&mut self, payment_id: &str) -> SettlementResult<()> {
        self.payment_manager.delete_payment(payment_id).await
    }

    // Maintenance task operations
    /// Create a new maintenance task
    pub async fn create_task(&mut self, task: MaintenanceTask) -> SettlementResult<MaintenanceTask> {
        self.task_manager.create_task(task).await
    }

    /// Get a maintenance task by ID
    pub async fn get_task(&self, task_id: &str) -> SettlementResult<Option<MaintenanceTask>> {
        self.task_manager.get_task(task_id).await
    }

    /// List maintenance tasks, optionally filtered by status
    pub async fn list_tasks(
        &self,
        status: Option<TaskStatus>,
    ) -> SettlementResult<Vec<MaintenanceTask>> {
        self.task_manager.list_tasks(status).await
    }

    /// Update a maintenance task
    pub async fn update_task(&mut self, task: &MaintenanceTask) -> SettlementResult<()> {
        self.task_manager.update_task(task).await
    }

    /// Delete a maintenance task
    pub async fn delete_task(&mut self, task_id: &str) -> SettlementResult<()> {
        self.task_manager.delete_task(task_id).await
    }

    /// Mark a task as completed
    pub async fn complete_task(
        &mut self,
        task_id: &str,
        completed_date: DateTime<Utc>,
        actual_cost: Option<BigDecimal>,
    ) -> SettlementResult<MaintenanceTask> {
        self.task_manager
            .complete_task(task_id, completed_date, actual_cost)
            .await
    }

    /// Spawn and persist the follow-up instance of a completed recurring task
    pub async fn roll_over_completed(&mut self, task_id: &str) -> SettlementResult<MaintenanceTask> {
        self.task_manager.roll_over_completed(task_id).await
    }

    // Reporting operations
    /// Generate monthly balance sheets from the full payment list,
    /// ordered by month ascending
    pub async fn generate_balance_sheets(&self) -> SettlementResult<Vec<MonthlyBalanceSheet>> {
        let payments = self.payment_manager.list_payments(None).await?;
        Ok(aggregate(&payments))
    }

    /// Generate the grand totals across all months
    pub async fn generate_balance_summary(&self) -> SettlementResult<BalanceSummary> {
        let sheets = self.generate_balance_sheets().await?;
        Ok(BalanceSummary::from_sheets(&sheets))
    }

    /// The balance sheet for a single month, zeroed when no approved or
    /// paid payments fall in it
    pub async fn month_sheet(&self, month_year: &str) -> SettlementResult<MonthlyBalanceSheet> {
        let sheets = self.generate_balance_sheets().await?;
        Ok(sheets
            .into_iter()
            .find(|sheet| sheet.month_year == month_year)
            .unwrap_or_else(|| MonthlyBalanceSheet::empty(month_year.to_string())))
    }

    /// Validate the integrity of the stored records
    pub async fn validate_integrity(&self) -> SettlementResult<IntegrityReport> {
        let expenses = self.expense_manager.list_expenses().await?;
        let payments = self.payment_manager.list_payments(None).await?;

        let mut issues = Vec::new();

        for expense in &expenses {
            let subset = expense
                .paid_by_apartments
                .iter()
                .all(|apartment| expense.owed_by_apartments.contains(apartment));
            if !subset {
                issues.push(format!(
                    "Expense '{}' has confirmed payers outside its ower list",
                    expense.id
                ));
            }

            if expense.paid != expense.is_fully_paid() {
                issues.push(format!(
                    "Expense '{}' has a stale paid flag: stored {}, derived {}",
                    expense.id,
                    expense.paid,
                    expense.is_fully_paid()
                ));
            }
        }

        for payment in &payments {
            if validate_month_year(&payment.month_year).is_err() {
                issues.push(format!(
                    "Payment '{}' has a malformed month '{}'",
                    payment.id, payment.month_year
                ));
            }
        }

        Ok(IntegrityReport {
            is_valid: issues.is_empty(),
            issues,
            expenses_checked: expenses.len(),
            payments_checked: payments.len(),
        })
    }
}

/// Report on stored-record integrity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub expenses_checked: usize,
    pub payments_checked: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settlement::ExpenseBuilder;
    use crate::utils::memory_storage::MemoryStorage;

    #[tokio::test]
    async fn test_ledger_basic_settlement() {
        let storage = MemoryStorage::new();
        let mut ledger = CommunityLedger::new(storage);

        let expense = ExpenseBuilder::new(
            "exp1".to_string(),
            "Lobby painting".to_string(),
            BigDecimal::from(300),
            "A".to_string(),
        )
        .owed_by(vec!["A".to_string(), "B".to_string(), "C".to_string()])
        .build()
        .unwrap();

        ledger.create_expense(expense).await.unwrap();

        let split = ledger.split_for("exp1").await.unwrap();
        assert_eq!(split.per_apartment_share, BigDecimal::from(100));
        assert_eq!(split.unpaid_apartments.len(), 3);

        let updated = ledger.settle_share("exp1", "B").await.unwrap();
        assert!(!updated.paid);

        ledger.settle_share("exp1", "A").await.unwrap();
        let updated = ledger.settle_share("exp1", "C").await.unwrap();
        assert!(updated.paid);

        let report = ledger.validate_integrity().await.unwrap();
        assert!(report.is_valid);
        assert_eq!(report.expenses_checked, 1);
    }
}
