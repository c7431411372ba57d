//! In-memory storage implementation for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

/// In-memory storage implementation for testing and development
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    expenses: Arc<RwLock<HashMap<String, Expense>>>,
    payments: Arc<RwLock<HashMap<String, Payment>>>,
    tasks: Arc<RwLock<HashMap<String, MaintenanceTask>>>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self {
            expenses: Arc::new(RwLock::new(HashMap::new())),
            payments: Arc::new(RwLock::new(HashMap::new())),
            tasks: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.expenses.write().unwrap().clear();
        self.payments.write().unwrap().clear();
        self.tasks.write().unwrap().clear();
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommunityStorage for MemoryStorage {
    async fn save_expense(&mut self, expense: &Expense) -> SettlementResult<()> {
        self.expenses
            .write()
            .unwrap()
            .insert(expense.id.clone(), expense.clone());
        Ok(())
    }

    async fn get_expense(&self, expense_id: &str) -> SettlementResult<Option<Expense>> {
        Ok(self.expenses.read().unwrap().get(expense_id).cloned())
    }

    async fn list_expenses(&self) -> SettlementResult<Vec<Expense>> {
        let expenses = self.expenses.read().unwrap();
        let mut all: Vec<Expense> = expenses.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    async fn update_expense(&mut self, expense: &Expense) -> SettlementResult<()> {
        if self.expenses.read().unwrap().contains_key(&expense.id) {
            self.expenses
                .write()
                .unwrap()
                .insert(expense.id.clone(), expense.clone());
            Ok(())
        } else {
            Err(SettlementError::ExpenseNotFound(expense.id.clone()))
        }
    }

    async fn delete_expense(&mut self, expense_id: &str) -> SettlementResult<()> {
        if self.expenses.write().unwrap().remove(expense_id).is_some() {
            Ok(())
        } else {
            Err(SettlementError::ExpenseNotFound(expense_id.to_string()))
        }
    }

    async fn save_payment(&mut self, payment: &Payment) -> SettlementResult<()> {
        self.payments
            .write()
            .unwrap()
            .insert(payment.id.clone(), payment.clone());
        Ok(())
    }

    async fn get_payment(&self, payment_id: &str) -> SettlementResult<Option<Payment>> {
        Ok(self.payments.read().unwrap().get(payment_id).cloned())
    }

    async fn list_payments(&self, month_year: Option<&str>) -> SettlementResult<Vec<Payment>> {
        let payments = self.payments.read().unwrap();
        let mut filtered: Vec<Payment> = payments
            .values()
            .filter(|payment| month_year.is_none_or(|m| payment.month_year == m))
            .cloned()
            .collect();
        filtered.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(filtered)
    }

    async fn update_payment(&mut self, payment: &Payment) -> SettlementResult<()> {
        if self.payments.read().unwrap().contains_key(&payment.id) {
            self.payments
                .write()
                .unwrap()
                .insert(payment.id.clone(), payment.clone());
            Ok(())
        } else {
            Err(SettlementError::PaymentNotFound(payment.id.clone()))
        }
    }

    async fn delete_payment(&mut self, payment_id: &str) -> SettlementResult<()> {
        if self.payments.write().unwrap().remove(payment_id).is_some() {
            Ok(())
        } else {
            Err(SettlementError::PaymentNotFound(payment_id.to_string()))
        }
    }

    async fn save_task(&mut self, task: &MaintenanceTask) -> SettlementResult<()> {
        self.tasks
            .write()
            .unwrap()
            .insert(task.id.clone(), task.clone());
        Ok(())
    }

    async fn get_task(&self, task_id: &str) -> SettlementResult<Option<MaintenanceTask>> {
        Ok(self.tasks.read().unwrap().get(task_id).cloned())
    }

    async fn list_tasks(
        &self,
        status: Option<TaskStatus>,
    ) -> SettlementResult<Vec<MaintenanceTask>> {
        let tasks = self.tasks.read().unwrap();
        let mut filtered: Vec<MaintenanceTask> = tasks
            .values()
            .filter(|task| status.is_none_or(|s| task.status == s))
            .cloned()
            .collect();
        filtered.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(filtered)
    }

    async fn update_task(&mut self, task: &MaintenanceTask) -> SettlementResult<()> {
        if self.tasks.read().unwrap().contains_key(&task.id) {
            self.tasks
                .write()
                .unwrap()
                .insert(task.id.clone(), task.clone());
            Ok(())
        } else {
            Err(SettlementError::TaskNotFound(task.id.clone()))
        }
    }

    async fn delete_task(&mut self, task_id: &str) -> SettlementResult<()> {
        if self.tasks.write().unwrap().remove(task_id).is_some() {
            Ok(())
        } else {
            Err(SettlementError::TaskNotFound(task_id.to_string()))
        }
    }
}
