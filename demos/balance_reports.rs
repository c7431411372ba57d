//! Payment approval and monthly balance sheet example

use apargo_core::utils::MemoryStorage;
use apargo_core::{patterns, CommunityLedger};
use bigdecimal::BigDecimal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧾 Apargo Core - Balance Reports Example\n");

    let storage = MemoryStorage::new();
    let mut ledger = CommunityLedger::new(storage);

    // 1. Record maintenance fees and an expense settlement
    println!("💰 Recording payments...");
    for (id, apartment, amount) in [("fee-a", "A", 1000), ("fee-b", "B", 1000)] {
        let fee = patterns::maintenance_fee(
            id.to_string(),
            apartment.to_string(),
            BigDecimal::from(amount),
            "2025-01".to_string(),
        )?;
        ledger.record_payment(fee).await?;
        println!("  ✓ Maintenance fee from apartment {apartment}: ₹{amount}");
    }

    let settlement = patterns::expense_settlement(
        "settle-1".to_string(),
        "C".to_string(),
        BigDecimal::from(400),
        "2025-01".to_string(),
        "exp001".to_string(),
    )?;
    ledger.record_payment(settlement).await?;
    println!("  ✓ Expense settlement from apartment C: ₹400");

    let late_fee = patterns::maintenance_fee(
        "fee-c".to_string(),
        "C".to_string(),
        BigDecimal::from(1000),
        "2025-02".to_string(),
    )?;
    ledger.record_payment(late_fee).await?;
    println!("  ✓ Maintenance fee from apartment C: ₹1000 (February)");
    println!();

    // 2. Approve everything except the February fee
    println!("🔏 Approving payments...");
    for id in ["fee-a", "fee-b", "settle-1"] {
        ledger.approve_payment(id, "admin1", "Treasurer").await?;
        println!("  ✓ Approved {id}");
    }
    println!("  (fee-c stays pending and will not appear in any sheet)");
    println!();

    // 3. Generate the monthly ledger view
    println!("📊 Monthly balance sheets:");
    for sheet in ledger.generate_balance_sheets().await? {
        println!(
            "  {} | opening ₹{} | income ₹{} | expenses ₹{} | closing ₹{}",
            sheet.month_year, sheet.opening, sheet.income, sheet.expenses, sheet.closing
        );
    }

    let summary = ledger.generate_balance_summary().await?;
    println!(
        "\n  Totals: income ₹{} - expenses ₹{} = net ₹{}",
        summary.total_income, summary.total_expenses, summary.net
    );

    Ok(())
}
