//! Validation utilities

use crate::traits::*;
use crate::types::*;
use bigdecimal::BigDecimal;

/// Validate that an amount is positive
pub fn validate_positive_amount(amount: &BigDecimal) -> SettlementResult<()> {
    if *amount <= BigDecimal::from(0) {
        Err(SettlementError::Validation(
            "Amount must be positive".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Validate that an apartment identifier is valid
pub fn validate_apartment_id(apartment_id: &str) -> SettlementResult<()> {
    if apartment_id.trim().is_empty() {
        return Err(SettlementError::Validation(
            "Apartment ID cannot be empty".to_string(),
        ));
    }

    if apartment_id.len() > 50 {
        return Err(SettlementError::Validation(
            "Apartment ID cannot exceed 50 characters".to_string(),
        ));
    }

    // Check for valid characters (alphanumeric, dashes, underscores)
    if !apartment_id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(SettlementError::Validation(
            "Apartment ID can only contain alphanumeric characters, dashes, and underscores"
                .to_string(),
        ));
    }

    Ok(())
}

/// Validate that a month string is in `YYYY-MM` format with a month
/// between 01 and 12
pub fn validate_month_year(month_year: &str) -> SettlementResult<()> {
    let bytes = month_year.as_bytes();
    let shape_ok = bytes.len() == 7
        && bytes[4] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || b.is_ascii_digit());
    let month_ok = shape_ok && matches!(month_year[5..7].parse::<u8>(), Ok(1..=12));

    if month_ok {
        Ok(())
    } else {
        Err(SettlementError::Validation(format!(
            "Month must be in YYYY-MM format: '{month_year}'"
        )))
    }
}

/// Validate that a description is valid
pub fn validate_description(description: &str) -> SettlementResult<()> {
    if description.trim().is_empty() {
        return Err(SettlementError::Validation(
            "Description cannot be empty".to_string(),
        ));
    }

    if description.len() > 500 {
        return Err(SettlementError::Validation(
            "Description cannot exceed 500 characters".to_string(),
        ));
    }

    Ok(())
}

/// Enhanced expense validator with detailed checks
pub struct EnhancedExpenseValidator;

impl ExpenseValidator for EnhancedExpenseValidator {
    fn validate_expense(&self, expense: &Expense) -> SettlementResult<()> {
        // Basic validation
        DefaultExpenseValidator.validate_expense(expense)?;

        // Enhanced validations
        validate_description(&expense.description)?;
        validate_positive_amount(&expense.amount)?;
        validate_apartment_id(&expense.paid_by_apartment)?;

        for apartment in &expense.owed_by_apartments {
            validate_apartment_id(apartment)?;
        }

        // Check for duplicate owers
        let mut seen = std::collections::HashSet::new();
        for apartment in &expense.owed_by_apartments {
            if !seen.insert(apartment) {
                return Err(SettlementError::Validation(format!(
                    "Apartment '{apartment}' appears multiple times in the ower list"
                )));
            }
        }

        // Confirmed payers must all be owers
        for apartment in &expense.paid_by_apartments {
            if !expense.owes(apartment) {
                return Err(SettlementError::Validation(format!(
                    "Apartment '{apartment}' is marked paid but owes no share"
                )));
            }
        }

        Ok(())
    }

    fn validate_expense_deletion(&self, _expense_id: &str) -> SettlementResult<()> {
        // Deletion never cascades, nothing to check beyond existence
        Ok(())
    }
}

/// Enhanced payment validator with detailed checks
pub struct EnhancedPaymentValidator;

impl PaymentValidator for EnhancedPaymentValidator {
    fn validate_payment(&self, payment: &Payment) -> SettlementResult<()> {
        DefaultPaymentValidator.validate_payment(payment)?;

        validate_positive_amount(&payment.amount)?;
        validate_month_year(&payment.month_year)?;

        Ok(())
    }

    fn validate_status_transition(
        &self,
        current: PaymentStatus,
        next: PaymentStatus,
    ) -> SettlementResult<()> {
        DefaultPaymentValidator.validate_status_transition(current, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_year_shapes() {
        assert!(validate_month_year("2025-01").is_ok());
        assert!(validate_month_year("1999-12").is_ok());
        assert!(validate_month_year("2025-13").is_err());
        assert!(validate_month_year("2025-00").is_err());
        assert!(validate_month_year("2025/01").is_err());
        assert!(validate_month_year("2025-1").is_err());
        assert!(validate_month_year("").is_err());
    }

    #[test]
    fn test_enhanced_expense_validator_rejects_phantom_payer() {
        let mut expense = Expense::new(
            "exp1".to_string(),
            "Stairwell bulbs".to_string(),
            BigDecimal::from(60),
            "A".to_string(),
            vec!["A".to_string(), "B".to_string()],
        );
        expense.paid_by_apartments = vec!["Z".to_string()];

        assert!(EnhancedExpenseValidator.validate_expense(&expense).is_err());
    }
}
