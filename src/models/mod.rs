//! Data models representing database entities.
//!
//! This module contains all data structures that map to database tables.

/// Ledger account model
pub mod account;
/// Customer (account owner) model
pub mod customer;
/// Scheduled payment model
pub mod scheduled_payment;
/// Transfer record model
pub mod transfer;
