//! Ledger Service
//!
//! A small ledger: customers own accounts, accounts hold balances, and
//! transfers move funds between accounts either immediately or on a
//! recurring schedule.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server) exposing the admin surface
//! - **Database**: SQLite with sqlx (async queries, automatic migrations)
//! - **Transfer Engine**: atomic debit/credit with insufficient-funds
//!   protection ([`services::transfer_service`])
//! - **Scheduler**: materializes due scheduled payments into transfers and
//!   re-enrolls recurring ones ([`services::scheduler_service`])
//!
//! The library crate holds everything; `src/main.rs` runs the HTTP server
//! and `src/bin/run_scheduled_payments.rs` is the cron-style batch trigger.

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
