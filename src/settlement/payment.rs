//! Payment recording and approval workflow

use bigdecimal::BigDecimal;

use crate::traits::*;
use crate::types::*;

/// Payment manager for ledger transactions and their status workflow
pub struct PaymentManager<S: CommunityStorage> {
    storage: S,
    validator: Box<dyn PaymentValidator>,
}

impl<S: CommunityStorage> PaymentManager<S> {
    /// Create a new payment manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultPaymentValidator),
        }
    }

    /// Create a new payment manager with custom validator
    pub fn with_validator(storage: S, validator: Box<dyn PaymentValidator>) -> Self {
        Self { storage, validator }
    }

    /// Record a new payment
    pub async fn record_payment(&mut self, payment: Payment) -> SettlementResult<Payment> {
        self.validator.validate_payment(&payment)?;

        if self.storage.get_payment(&payment.id).await?.is_some() {
            return Err(SettlementError::Validation(format!(
                "Payment with ID '{}' already exists",
                payment.id
            )));
        }

        self.storage.save_payment(&payment).await?;

        Ok(payment)
    }

    /// Get a payment by ID
    pub async fn get_payment(&self, payment_id: &str) -> SettlementResult<Option<Payment>> {
        self.storage.get_payment(payment_id).await
    }

    /// Get a payment by ID, returning an error if not found
    pub async fn get_payment_required(&self, payment_id: &str) -> SettlementResult<Payment> {
        self.storage
            .get_payment(payment_id)
            .await?
            .ok_or_else(|| SettlementError::PaymentNotFound(payment_id.to_string()))
    }

    /// List payments, optionally restricted to one `YYYY-MM` month
    pub async fn list_payments(
        &self,
        month_year: Option<&str>,
    ) -> SettlementResult<Vec<Payment>> {
        self.storage.list_payments(month_year).await
    }

    /// Approve a pending payment. Rejected payments are immutable, so the
    /// transition is refused for them.
    pub async fn approve_payment(
        &mut self,
        payment_id: &str,
        admin_id: &str,
        admin_name: &str,
    ) -> SettlementResult<Payment> {
        self.transition(payment_id, PaymentStatus::Approved, admin_id, admin_name)
            .await
    }

    /// Reject a pending payment
    pub async fn reject_payment(
        &mut self,
        payment_id: &str,
        admin_id: &str,
        admin_name: &str,
    ) -> SettlementResult<Payment> {
        self.transition(payment_id, PaymentStatus::Rejected, admin_id, admin_name)
            .await
    }

    /// Mark an approved payment as settled in full
    pub async fn mark_payment_paid(&mut self, payment_id: &str) -> SettlementResult<Payment> {
        let mut payment = self.get_payment_required(payment_id).await?;

        self.validator
            .validate_status_transition(payment.status, PaymentStatus::Paid)?;

        payment.status = PaymentStatus::Paid;
        payment.updated_at = chrono::Utc::now().naive_utc();

        self.storage.update_payment(&payment).await?;

        Ok(payment)
    }

    /// Update a payment
    pub async fn update_payment(&mut self, payment: &Payment) -> SettlementResult<()> {
        self.validator.validate_payment(payment)?;

        if self.storage.get_payment(&payment.id).await?.is_none() {
            return Err(SettlementError::PaymentNotFound(payment.id.clone()));
        }

        self.storage.update_payment(payment).await
    }

    /// Delete a payment regardless of its status
    pub async fn delete_payment(&mut self, payment_id: &str) -> SettlementResult<()> {
        if self.storage.get_payment(payment_id).await?.is_none() {
            return Err(SettlementError::PaymentNotFound(payment_id.to_string()));
        }

        self.storage.delete_payment(payment_id).await
    }

    async fn transition(
        &mut self,
        payment_id: &str,
        next: PaymentStatus,
        admin_id: &str,
        admin_name: &str,
    ) -> SettlementResult<Payment> {
        let mut payment = self.get_payment_required(payment_id).await?;

        self.validator
            .validate_status_transition(payment.status, next)?;

        payment.status = next;
        payment.approved_by = Some(admin_id.to_string());
        payment.approved_by_name = Some(admin_name.to_string());
        payment.updated_at = chrono::Utc::now().naive_utc();

        self.storage.update_payment(&payment).await?;

        Ok(payment)
    }
}

/// Payment builder for assembling ledger transactions
#[derive(Debug)]
pub struct PaymentBuilder {
    id: String,
    payer_id: String,
    payee_id: Option<String>,
    amount: BigDecimal,
    month_year: String,
    category: Option<PaymentCategory>,
    expense_id: Option<String>,
    receipt_url: Option<String>,
    notes: Option<String>,
}

impl PaymentBuilder {
    /// Create a new payment builder
    pub fn new(id: String, payer_id: String, amount: BigDecimal, month_year: String) -> Self {
        Self {
            id,
            payer_id,
            payee_id: None,
            amount,
            month_year,
            category: None,
            expense_id: None,
            receipt_url: None,
            notes: None,
        }
    }

    /// Set the receiving party
    pub fn payee(mut self, payee_id: String) -> Self {
        self.payee_id = Some(payee_id);
        self
    }

    /// Set an explicit ledger category, overriding the expense-link default
    pub fn category(mut self, category: PaymentCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Link the payment to the expense it settles
    pub fn expense(mut self, expense_id: String) -> Self {
        self.expense_id = Some(expense_id);
        self
    }

    /// Attach a receipt reference
    pub fn receipt(mut self, receipt_url: String) -> Self {
        self.receipt_url = Some(receipt_url);
        self
    }

    /// Attach free-form notes
    pub fn notes(mut self, notes: String) -> Self {
        self.notes = Some(notes);
        self
    }

    /// Build the payment. Created pending; the category resolves here.
    pub fn build(self) -> SettlementResult<Payment> {
        crate::utils::validation::validate_month_year(&self.month_year)?;

        let mut payment = Payment::new(
            self.id,
            self.payer_id,
            self.amount,
            self.month_year,
            self.category,
            self.expense_id,
        );
        payment.payee_id = self.payee_id;
        payment.receipt_url = self.receipt_url;
        payment.notes = self.notes;

        DefaultPaymentValidator.validate_payment(&payment)?;

        Ok(payment)
    }
}

/// Common payment shapes
pub mod patterns {
    use super::*;

    /// Monthly maintenance fee paid by an apartment into the community fund
    pub fn maintenance_fee(
        id: String,
        apartment_id: String,
        amount: BigDecimal,
        month_year: String,
    ) -> SettlementResult<Payment> {
        PaymentBuilder::new(id, apartment_id, amount, month_year)
            .category(PaymentCategory::Income)
            .build()
    }

    /// Settlement of one apartment's share of a shared expense. The
    /// expense link makes the category resolve to expense.
    pub fn expense_settlement(
        id: String,
        apartment_id: String,
        amount: BigDecimal,
        month_year: String,
        expense_id: String,
    ) -> SettlementResult<Payment> {
        PaymentBuilder::new(id, apartment_id, amount, month_year)
            .expense(expense_id)
            .build()
    }

    /// Reimbursement from the community fund to the apartment that
    /// fronted a cost
    pub fn reimbursement(
        id: String,
        payer_id: String,
        payee_id: String,
        amount: BigDecimal,
        month_year: String,
    ) -> SettlementResult<Payment> {
        PaymentBuilder::new(id, payer_id, amount, month_year)
            .payee(payee_id)
            .category(PaymentCategory::Income)
            .build()
    }
}
