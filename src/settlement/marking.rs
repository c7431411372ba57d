//! Paid/unpaid toggling of apartment shares
//!
//! These are pure value transforms: they return a new [`Expense`] and never
//! mutate the input. Persisting the result, and rolling local state back if
//! persistence fails, is the caller's concern.

use crate::types::Expense;

/// Record an apartment's share as paid.
///
/// Idempotent: marking an apartment that already paid is a no-op. An
/// apartment outside `owed_by_apartments` is accepted without error but not
/// recorded, which keeps `paid_by_apartments` a subset of the owers. The
/// `paid` flag is recomputed from the resulting sets.
pub fn mark_paid(expense: &Expense, apartment_id: &str) -> Expense {
    let mut updated = expense.clone();
    if updated.owes(apartment_id) && !updated.has_paid(apartment_id) {
        updated.paid_by_apartments.push(apartment_id.to_string());
    }
    updated.paid = updated.is_fully_paid();
    updated
}

/// Revert an apartment's share to unpaid.
///
/// Removing an apartment that never paid is a no-op. The `paid` flag is
/// recomputed and can only remain true when the ower list is empty.
pub fn mark_unpaid(expense: &Expense, apartment_id: &str) -> Expense {
    let mut updated = expense.clone();
    updated.paid_by_apartments.retain(|a| a != apartment_id);
    updated.paid = updated.is_fully_paid();
    updated
}
