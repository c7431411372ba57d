//! # Apargo Core
//!
//! A settlement library for residential communities providing shared-expense
//! splitting, payment approval workflows, and monthly balance reporting.
//!
//! ## Features
//!
//! - **Expense splitting**: per-apartment shares with a paid/unpaid partition
//! - **Share settlement**: idempotent paid/unpaid toggling that preserves the
//!   payer-subset invariant
//! - **Payment workflow**: pending/approved/rejected/paid lifecycle with
//!   immutable rejections
//! - **Monthly balance sheets**: deterministic income-versus-expense rollups
//!   per calendar month
//! - **Maintenance recurrence**: calendar-month scheduling of follow-up task
//!   instances after completion
//! - **Storage abstraction**: database-agnostic design with trait-based storage
//!
//! ## Quick Start
//!
//! ```rust
//! use apargo_core::{CommunityLedger, ExpenseBuilder, ExpenseSplit};
//! use bigdecimal::BigDecimal;
//!
//! // This example shows basic usage - you need to implement CommunityStorage
//! // let storage = YourStorageImplementation::new();
//! // let mut ledger = CommunityLedger::new(storage);
//! ```

pub mod maintenance;
pub mod reporting;
pub mod settlement;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use maintenance::*;
pub use reporting::*;
pub use settlement::*;
pub use traits::*;
pub use types::*;

// Re-export payment patterns for convenience
pub use settlement::payment::patterns;
