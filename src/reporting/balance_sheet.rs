//! Monthly balance sheet aggregation over ledger payments

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{Payment, PaymentCategory};

/// Income versus expense rollup for one calendar month. Derived on every
/// read, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBalanceSheet {
    /// Month in `YYYY-MM` format
    pub month_year: String,
    /// Carried-in balance. Always zero: months are not chained.
    pub opening: BigDecimal,
    /// Sum of approved and paid income payments for the month
    pub income: BigDecimal,
    /// Sum of approved and paid expense payments for the month
    pub expenses: BigDecimal,
    /// `opening + income - expenses`
    pub closing: BigDecimal,
}

impl MonthlyBalanceSheet {
    /// A zeroed sheet for a month with no qualifying payments
    pub fn empty(month_year: String) -> Self {
        Self {
            month_year,
            opening: BigDecimal::from(0),
            income: BigDecimal::from(0),
            expenses: BigDecimal::from(0),
            closing: BigDecimal::from(0),
        }
    }
}

/// Aggregate payments into one balance sheet per month, ordered by month
/// ascending (lexicographic on `YYYY-MM` equals chronological).
///
/// Only payments whose status counts toward the balance (approved or paid)
/// contribute; pending and rejected payments are excluded. The function is
/// total and deterministic: the same payment list always produces the same
/// sheets in the same order, with no clock or hidden state involved.
pub fn aggregate(payments: &[Payment]) -> Vec<MonthlyBalanceSheet> {
    let mut months: BTreeMap<String, (BigDecimal, BigDecimal)> = BTreeMap::new();

    for payment in payments {
        if !payment.counts_toward_balance() {
            continue;
        }

        let totals = months
            .entry(payment.month_year.clone())
            .or_insert_with(|| (BigDecimal::from(0), BigDecimal::from(0)));

        match payment.category {
            PaymentCategory::Income => totals.0 += &payment.amount,
            PaymentCategory::Expense => totals.1 += &payment.amount,
        }
    }

    months
        .into_iter()
        .map(|(month_year, (income, expenses))| {
            let opening = BigDecimal::from(0);
            let closing = &opening + &income - &expenses;
            MonthlyBalanceSheet {
                month_year,
                opening,
                income,
                expenses,
                closing,
            }
        })
        .collect()
}

/// Grand totals across all months of a balance sheet run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSummary {
    pub total_income: BigDecimal,
    pub total_expenses: BigDecimal,
    pub net: BigDecimal,
}

impl BalanceSummary {
    /// Sum a sequence of monthly sheets into community-wide totals
    pub fn from_sheets(sheets: &[MonthlyBalanceSheet]) -> Self {
        let total_income: BigDecimal = sheets.iter().map(|s| &s.income).sum();
        let total_expenses: BigDecimal = sheets.iter().map(|s| &s.expenses).sum();
        let net = &total_income - &total_expenses;

        Self {
            total_income,
            total_expenses,
            net,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentStatus;

    fn payment(
        id: &str,
        month: &str,
        amount: i64,
        category: PaymentCategory,
        status: PaymentStatus,
    ) -> Payment {
        let mut payment = Payment::new(
            id.to_string(),
            "apartment-1".to_string(),
            BigDecimal::from(amount),
            month.to_string(),
            Some(category),
            None,
        );
        payment.status = status;
        payment
    }

    #[test]
    fn test_single_month_rollup_excludes_pending() {
        let payments = vec![
            payment(
                "p1",
                "2025-01",
                1000,
                PaymentCategory::Income,
                PaymentStatus::Approved,
            ),
            payment(
                "p2",
                "2025-01",
                400,
                PaymentCategory::Expense,
                PaymentStatus::Approved,
            ),
            payment(
                "p3",
                "2025-01",
                999,
                PaymentCategory::Income,
                PaymentStatus::Pending,
            ),
        ];

        let sheets = aggregate(&payments);

        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].month_year, "2025-01");
        assert_eq!(sheets[0].opening, BigDecimal::from(0));
        assert_eq!(sheets[0].income, BigDecimal::from(1000));
        assert_eq!(sheets[0].expenses, BigDecimal::from(400));
        assert_eq!(sheets[0].closing, BigDecimal::from(600));
    }

    #[test]
    fn test_rejected_payments_never_contribute() {
        let payments = vec![
            payment(
                "p1",
                "2025-02",
                500,
                PaymentCategory::Income,
                PaymentStatus::Rejected,
            ),
            payment(
                "p2",
                "2025-02",
                300,
                PaymentCategory::Expense,
                PaymentStatus::Rejected,
            ),
        ];

        assert!(aggregate(&payments).is_empty());
    }

    #[test]
    fn test_months_sorted_ascending() {
        let payments = vec![
            payment(
                "p1",
                "2025-03",
                100,
                PaymentCategory::Income,
                PaymentStatus::Paid,
            ),
            payment(
                "p2",
                "2024-11",
                100,
                PaymentCategory::Income,
                PaymentStatus::Approved,
            ),
            payment(
                "p3",
                "2025-01",
                100,
                PaymentCategory::Income,
                PaymentStatus::Approved,
            ),
        ];

        let sheets = aggregate(&payments);
        let months: Vec<&str> = sheets.iter().map(|s| s.month_year.as_str()).collect();
        assert_eq!(months, vec!["2024-11", "2025-01", "2025-03"]);
    }

    #[test]
    fn test_aggregate_is_deterministic() {
        let payments = vec![
            payment(
                "p1",
                "2025-01",
                750,
                PaymentCategory::Income,
                PaymentStatus::Paid,
            ),
            payment(
                "p2",
                "2025-02",
                250,
                PaymentCategory::Expense,
                PaymentStatus::Approved,
            ),
        ];

        assert_eq!(aggregate(&payments), aggregate(&payments));
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn test_summary_totals() {
        let payments = vec![
            payment(
                "p1",
                "2025-01",
                1000,
                PaymentCategory::Income,
                PaymentStatus::Approved,
            ),
            payment(
                "p2",
                "2025-02",
                400,
                PaymentCategory::Expense,
                PaymentStatus::Paid,
            ),
        ];

        let summary = BalanceSummary::from_sheets(&aggregate(&payments));
        assert_eq!(summary.total_income, BigDecimal::from(1000));
        assert_eq!(summary.total_expenses, BigDecimal::from(400));
        assert_eq!(summary.net, BigDecimal::from(600));
    }
}
