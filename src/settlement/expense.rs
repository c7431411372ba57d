//! Expense management and share settlement

use bigdecimal::BigDecimal;

use crate::settlement::marking;
use crate::settlement::split::ExpenseSplit;
use crate::traits::*;
use crate::types::*;

/// Expense manager for shared-cost records and their settlement
pub struct ExpenseManager<S: CommunityStorage> {
    storage: S,
    validator: Box<dyn ExpenseValidator>,
}

impl<S: CommunityStorage> ExpenseManager<S> {
    /// Create a new expense manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultExpenseValidator),
        }
    }

    /// Create a new expense manager with custom validator
    pub fn with_validator(storage: S, validator: Box<dyn ExpenseValidator>) -> Self {
        Self { storage, validator }
    }

    /// Create a new expense. The record is normalized to the structural
    /// invariants before it is validated and saved.
    pub async fn create_expense(&mut self, mut expense: Expense) -> SettlementResult<Expense> {
        expense.normalize();

        self.validator.validate_expense(&expense)?;

        if self.storage.get_expense(&expense.id).await?.is_some() {
            return Err(SettlementError::Validation(format!(
                "Expense with ID '{}' already exists",
                expense.id
            )));
        }

        self.storage.save_expense(&expense).await?;

        Ok(expense)
    }

    /// Get an expense by ID
    pub async fn get_expense(&self, expense_id: &str) -> SettlementResult<Option<Expense>> {
        self.storage.get_expense(expense_id).await
    }

    /// Get an expense by ID, returning an error if not found
    pub async fn get_expense_required(&self, expense_id: &str) -> SettlementResult<Expense> {
        self.storage
            .get_expense(expense_id)
            .await?
            .ok_or_else(|| SettlementError::ExpenseNotFound(expense_id.to_string()))
    }

    /// List all expenses
    pub async fn list_expenses(&self) -> SettlementResult<Vec<Expense>> {
        self.storage.list_expenses().await
    }

    /// Update an expense
    pub async fn update_expense(&mut self, expense: &Expense) -> SettlementResult<()> {
        self.validator.validate_expense(expense)?;

        if self.storage.get_expense(&expense.id).await?.is_none() {
            return Err(SettlementError::ExpenseNotFound(expense.id.clone()));
        }

        self.storage.update_expense(expense).await
    }

    /// Delete an expense. An explicit admin action with no cascade.
    pub async fn delete_expense(&mut self, expense_id: &str) -> SettlementResult<()> {
        self.validator.validate_expense_deletion(expense_id)?;

        if self.storage.get_expense(expense_id).await?.is_none() {
            return Err(SettlementError::ExpenseNotFound(expense_id.to_string()));
        }

        self.storage.delete_expense(expense_id).await
    }

    /// Mark an apartment's share as paid and persist the result. On a
    /// storage failure the error propagates and the stored value is left
    /// untouched, so callers holding an optimistic local copy can revert.
    pub async fn settle_share(
        &mut self,
        expense_id: &str,
        apartment_id: &str,
    ) -> SettlementResult<Expense> {
        let expense = self.get_expense_required(expense_id).await?;

        let mut updated = marking::mark_paid(&expense, apartment_id);
        updated.updated_at = chrono::Utc::now().naive_utc();

        self.storage.update_expense(&updated).await?;

        Ok(updated)
    }

    /// Revert an apartment's share to unpaid and persist the result
    pub async fn unsettle_share(
        &mut self,
        expense_id: &str,
        apartment_id: &str,
    ) -> SettlementResult<Expense> {
        let expense = self.get_expense_required(expense_id).await?;

        let mut updated = marking::mark_unpaid(&expense, apartment_id);
        updated.updated_at = chrono::Utc::now().naive_utc();

        self.storage.update_expense(&updated).await?;

        Ok(updated)
    }

    /// Calculate the split breakdown for a stored expense
    pub async fn split_for(&self, expense_id: &str) -> SettlementResult<ExpenseSplit> {
        let expense = self.get_expense_required(expense_id).await?;
        Ok(ExpenseSplit::calculate(&expense))
    }
}

/// Expense builder for assembling shared-cost records
#[derive(Debug)]
pub struct ExpenseBuilder {
    expense: Expense,
}

impl ExpenseBuilder {
    /// Create a new expense builder
    pub fn new(
        id: String,
        description: String,
        amount: BigDecimal,
        paid_by_apartment: String,
    ) -> Self {
        Self {
            expense: Expense::new(id, description, amount, paid_by_apartment, Vec::new()),
        }
    }

    /// Set the apartments owing a share. The split policy (whether the
    /// payer is included) is up to the caller; the list is taken verbatim.
    pub fn owed_by(mut self, apartments: Vec<String>) -> Self {
        self.expense.owed_by_apartments = apartments;
        self
    }

    /// Set the expense category label
    pub fn category(mut self, category: String) -> Self {
        self.expense.category = Some(category);
        self
    }

    /// Flag the expense as no-split: each ower owes the full amount
    pub fn no_split(mut self) -> Self {
        self.expense.no_split = true;
        self
    }

    /// Add metadata to the expense
    pub fn metadata(mut self, key: String, value: String) -> Self {
        self.expense.metadata.insert(key, value);
        self
    }

    /// Build the expense
    pub fn build(mut self) -> SettlementResult<Expense> {
        self.expense.normalize();
        DefaultExpenseValidator.validate_expense(&self.expense)?;
        Ok(self.expense)
    }
}
