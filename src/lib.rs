//! Single-user bank-account ledger backed by SQLite.
//!
//! The core type is [`domain::ledger::AccountLedger`]: it holds an account's
//! current balance plus its append-only transaction log, applies validated
//! deposit/withdraw operations, and writes through to a [`store::Store`]
//! before reporting success.

pub mod app;
pub mod common;
pub mod domain;
pub mod store;
