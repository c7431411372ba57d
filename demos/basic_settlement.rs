//! Basic expense settlement example

use apargo_core::utils::MemoryStorage;
use apargo_core::{CommunityLedger, ExpenseBuilder};
use bigdecimal::BigDecimal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🏢 Apargo Core - Basic Settlement Example\n");

    // Create a new ledger with in-memory storage
    let storage = MemoryStorage::new();
    let mut ledger = CommunityLedger::new(storage);

    // 1. Apartment A fronts a shared repair
    println!("💸 Recording a shared expense...");
    let expense = ExpenseBuilder::new(
        "exp001".to_string(),
        "Water pump replacement".to_string(),
        BigDecimal::from(300),
        "A".to_string(),
    )
    .owed_by(vec!["A".to_string(), "B".to_string(), "C".to_string()])
    .category("plumbing".to_string())
    .build()?;

    let expense = ledger.create_expense(expense).await?;
    println!(
        "  ✓ Created expense: {} - {} (₹{})",
        expense.id, expense.description, expense.amount
    );
    println!();

    // 2. Show the per-apartment breakdown
    println!("🧮 Split breakdown...");
    let split = ledger.split_for("exp001").await?;
    println!("  Per-apartment share: ₹{}", split.rounded_share(2));
    println!("  Unpaid apartments: {:?}", split.unpaid_apartments);
    println!();

    // 3. Apartments settle their shares one by one
    println!("✅ Settling shares...");
    for apartment in ["B", "A", "C"] {
        let updated = ledger.settle_share("exp001", apartment).await?;
        println!(
            "  ✓ Apartment {} paid - fully settled: {}",
            apartment, updated.paid
        );
    }
    println!();

    // 4. Final state
    let split = ledger.split_for("exp001").await?;
    println!("📋 Final state:");
    println!("  Paid apartments: {:?}", split.paid_apartments);
    println!("  Outstanding: ₹{}", split.outstanding_amount());

    let report = ledger.validate_integrity().await?;
    println!("  Ledger integrity: {}", report.is_valid);

    Ok(())
}
