//! Reporting module for monthly balance rollups

pub mod balance_sheet;

pub use balance_sheet::*;
