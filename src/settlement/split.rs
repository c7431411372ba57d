//! Per-apartment share calculation for shared expenses

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::Expense;

/// Breakdown of one shared expense into per-apartment settlement state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSplit {
    /// Total cost as recorded on the expense
    pub original_amount: BigDecimal,
    /// Effective total after any waiver; equals `original_amount` unless
    /// an adjustment was supplied
    pub adjusted_amount: BigDecimal,
    /// Amount each ower is responsible for
    pub per_apartment_share: BigDecimal,
    /// Owers that have confirmed payment, in `owed_by_apartments` order
    pub paid_apartments: Vec<String>,
    /// Owers that have not yet paid, in `owed_by_apartments` order
    pub unpaid_apartments: Vec<String>,
}

impl ExpenseSplit {
    /// Calculate the split for an expense.
    ///
    /// Total over any well-formed expense: an empty ower list keeps the
    /// full amount as the share (the divisor is clamped to one), and a
    /// no-split expense charges every ower the full amount.
    pub fn calculate(expense: &Expense) -> Self {
        Self::calculate_with_adjustment(expense, None)
    }

    /// Calculate the split with an adjusted total, for partial waivers.
    /// The adjusted amount is what gets divided into shares.
    pub fn calculate_with_adjustment(
        expense: &Expense,
        adjusted: Option<BigDecimal>,
    ) -> Self {
        let original_amount = expense.amount.clone();
        let adjusted_amount = adjusted.unwrap_or_else(|| original_amount.clone());

        let per_apartment_share = if expense.no_split {
            adjusted_amount.clone()
        } else {
            let owers = expense.owed_by_apartments.len().max(1);
            &adjusted_amount / BigDecimal::from(owers as u64)
        };

        let paid_apartments: Vec<String> = expense
            .owed_by_apartments
            .iter()
            .filter(|apartment| expense.has_paid(apartment.as_str()))
            .cloned()
            .collect();

        let unpaid_apartments: Vec<String> = expense
            .owed_by_apartments
            .iter()
            .filter(|apartment| !expense.has_paid(apartment.as_str()))
            .cloned()
            .collect();

        Self {
            original_amount,
            adjusted_amount,
            per_apartment_share,
            paid_apartments,
            unpaid_apartments,
        }
    }

    /// Share rounded to the currency's minor-unit precision. Rounding
    /// happens only here; the stored share keeps full precision so that
    /// repeated toggles never accumulate drift.
    pub fn rounded_share(&self, scale: i64) -> BigDecimal {
        self.per_apartment_share.round(scale)
    }

    /// Whether every ower has confirmed payment
    pub fn is_settled(&self) -> bool {
        self.unpaid_apartments.is_empty()
    }

    /// Outstanding amount still owed across unpaid apartments
    pub fn outstanding_amount(&self) -> BigDecimal {
        &self.per_apartment_share * BigDecimal::from(self.unpaid_apartments.len() as u64)
    }
}
