//! Core types and data structures for the community settlement system

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lifecycle states of a ledger payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Recorded but not yet reviewed by an admin
    Pending,
    /// Approved by an admin; counts toward balance sheets
    Approved,
    /// Rejected by an admin; immutable afterwards
    Rejected,
    /// Settled in full; counts toward balance sheets
    Paid,
}

impl PaymentStatus {
    /// Whether a payment in this status contributes to monthly
    /// income/expense totals. Pending and rejected payments never do.
    pub fn counts_toward_balance(&self) -> bool {
        matches!(self, PaymentStatus::Approved | PaymentStatus::Paid)
    }
}

/// Ledger side of a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentCategory {
    /// Money flowing into the community fund (maintenance fees, reimbursements)
    Income,
    /// Money flowing out (expense settlements)
    Expense,
}

impl PaymentCategory {
    /// Resolve the category once at ingestion: an explicit category wins,
    /// otherwise a payment linked to an expense is an expense and a
    /// standalone payment is income.
    pub fn resolve(explicit: Option<PaymentCategory>, expense_id: Option<&str>) -> Self {
        match explicit {
            Some(category) => category,
            None if expense_id.is_some() => PaymentCategory::Expense,
            None => PaymentCategory::Income,
        }
    }
}

/// One shared cost event fronted by a single apartment and owed by many
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier for the expense
    pub id: String,
    /// Human-readable description of the cost
    pub description: String,
    /// Total cost of the expense
    pub amount: BigDecimal,
    /// Optional expense category label
    pub category: Option<String>,
    /// When set, the expense is not divided: each ower owes the full amount
    pub no_split: bool,
    /// Apartment that fronted the payment
    pub paid_by_apartment: String,
    /// Apartments that owe a share, in display order
    pub owed_by_apartments: Vec<String>,
    /// Apartments that have confirmed payment of their share.
    /// Always a subset of `owed_by_apartments`.
    pub paid_by_apartments: Vec<String>,
    /// True iff every ower has confirmed payment
    pub paid: bool,
    /// Additional metadata
    pub metadata: HashMap<String, String>,
    /// When the expense was created
    pub created_at: NaiveDateTime,
    /// When the expense was last updated
    pub updated_at: NaiveDateTime,
}

impl Expense {
    /// Create a new expense with no confirmed payments
    pub fn new(
        id: String,
        description: String,
        amount: BigDecimal,
        paid_by_apartment: String,
        owed_by_apartments: Vec<String>,
    ) -> Self {
        let now = chrono::Utc::now().naive_utc();
        let mut expense = Self {
            id,
            description,
            amount,
            category: None,
            no_split: false,
            paid_by_apartment,
            owed_by_apartments,
            paid_by_apartments: Vec::new(),
            paid: false,
            metadata: HashMap::new(),
            created_at: now,
            updated_at: now,
        };
        expense.paid = expense.is_fully_paid();
        expense
    }

    /// Whether an apartment owes a share of this expense
    pub fn owes(&self, apartment_id: &str) -> bool {
        self.owed_by_apartments.iter().any(|a| a == apartment_id)
    }

    /// Whether an apartment has confirmed payment of its share
    pub fn has_paid(&self, apartment_id: &str) -> bool {
        self.paid_by_apartments.iter().any(|a| a == apartment_id)
    }

    /// True iff every member of `owed_by_apartments` appears in
    /// `paid_by_apartments`. An expense with no owers is trivially paid.
    pub fn is_fully_paid(&self) -> bool {
        self.owed_by_apartments
            .iter()
            .all(|apartment| self.paid_by_apartments.iter().any(|p| p == apartment))
    }

    /// Restore the structural invariants: `paid_by_apartments` is
    /// deduplicated, restricted to owers, ordered like
    /// `owed_by_apartments`, and the `paid` flag matches the sets.
    pub fn normalize(&mut self) {
        let confirmed: Vec<String> = self
            .owed_by_apartments
            .iter()
            .filter(|apartment| self.paid_by_apartments.iter().any(|p| &p == apartment))
            .cloned()
            .collect();
        self.paid_by_apartments = confirmed;
        self.paid = self.is_fully_paid();
    }
}

/// One ledger transaction: a maintenance fee, a reimbursement, or the
/// settlement of a shared expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier for the payment
    pub id: String,
    /// User or apartment that made the payment
    pub payer_id: String,
    /// Optional receiving party
    pub payee_id: Option<String>,
    /// Payment amount
    pub amount: BigDecimal,
    /// Current lifecycle status
    pub status: PaymentStatus,
    /// Calendar month the payment belongs to, `YYYY-MM`
    pub month_year: String,
    /// Ledger side, resolved once at construction
    pub category: PaymentCategory,
    /// Link back to the expense being settled, if any
    pub expense_id: Option<String>,
    /// Optional uploaded receipt reference
    pub receipt_url: Option<String>,
    /// Admin that approved or rejected the payment
    pub approved_by: Option<String>,
    /// Display name of the approving admin
    pub approved_by_name: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
    /// When the payment was created
    pub created_at: NaiveDateTime,
    /// When the payment was last updated
    pub updated_at: NaiveDateTime,
}

impl Payment {
    /// Create a new pending payment. The category is resolved here and
    /// never re-derived: an explicit category wins, otherwise the presence
    /// of an expense link decides.
    pub fn new(
        id: String,
        payer_id: String,
        amount: BigDecimal,
        month_year: String,
        category: Option<PaymentCategory>,
        expense_id: Option<String>,
    ) -> Self {
        let now = chrono::Utc::now().naive_utc();
        let category = PaymentCategory::resolve(category, expense_id.as_deref());
        Self {
            id,
            payer_id,
            payee_id: None,
            amount,
            status: PaymentStatus::Pending,
            month_year,
            category,
            expense_id,
            receipt_url: None,
            approved_by: None,
            approved_by_name: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this payment contributes to monthly balance totals
    pub fn counts_toward_balance(&self) -> bool {
        self.status.counts_toward_balance()
    }
}

/// Recurrence policy attached to a maintenance task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    None,
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
}

impl Recurrence {
    /// Calendar months between occurrences, or `None` for one-off tasks
    pub fn months(&self) -> Option<u32> {
        match self {
            Recurrence::None => None,
            Recurrence::Monthly => Some(1),
            Recurrence::Quarterly => Some(3),
            Recurrence::SemiAnnual => Some(6),
            Recurrence::Annual => Some(12),
        }
    }

    /// Whether completing a task with this policy spawns a new instance
    pub fn is_recurring(&self) -> bool {
        !matches!(self, Recurrence::None)
    }
}

/// Lifecycle states of a maintenance task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

/// A maintenance job carried out by a vendor for the community
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceTask {
    /// Unique identifier for the task
    pub id: String,
    /// Short task title
    pub title: String,
    /// Detailed description of the work
    pub description: String,
    /// Task category label (plumbing, electrical, ...)
    pub category: String,
    /// Current lifecycle status
    pub status: TaskStatus,
    /// When the work is scheduled to happen
    pub scheduled_date: DateTime<Utc>,
    /// Optional deadline
    pub due_date: Option<DateTime<Utc>>,
    /// When the work was completed, if it was
    pub completed_date: Option<DateTime<Utc>>,
    /// Recurrence policy for spawning follow-up instances
    pub recurrence: Recurrence,
    /// User that created the task
    pub created_by: String,
    /// Actual cost recorded on completion
    pub actual_cost: Option<BigDecimal>,
    /// Attachment references (photos, invoices)
    pub attachments: Vec<String>,
    /// When the task record was created
    pub created_at: NaiveDateTime,
    /// When the task record was last updated
    pub updated_at: NaiveDateTime,
}

impl MaintenanceTask {
    /// Create a new scheduled task
    pub fn new(
        id: String,
        title: String,
        description: String,
        category: String,
        scheduled_date: DateTime<Utc>,
        recurrence: Recurrence,
        created_by: String,
    ) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id,
            title,
            description,
            category,
            status: TaskStatus::Scheduled,
            scheduled_date,
            due_date: None,
            completed_date: None,
            recurrence,
            created_by,
            actual_cost: None,
            attachments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Errors that can occur in the settlement system
#[derive(Debug, thiserror::Error)]
pub enum SettlementError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("{0}")]
    Precondition(String),
    #[error("Expense not found: {0}")]
    ExpenseNotFound(String),
    #[error("Payment not found: {0}")]
    PaymentNotFound(String),
    #[error("Task not found: {0}")]
    TaskNotFound(String),
    #[error("Invalid status transition: {0}")]
    InvalidStatusTransition(String),
}

/// Result type for settlement operations
pub type SettlementResult<T> = Result<T, SettlementError>;
