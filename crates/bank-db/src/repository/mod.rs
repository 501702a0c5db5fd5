//! # Repository Module
//!
//! One repository per table. Each holds a clone of the pool and exposes
//! async methods returning [`crate::error::DbResult`].
//!
//! ```text
//! Service
//!    │  db.accounts().get_by_public_id(id)
//!    ▼
//! AccountRepository ──► SQL ──► SQLite
//! ```
//!
//! - [`AccountRepository`] - Account persistence with optimistic versioning
//! - [`TransactionRepository`] - Transaction records

pub mod account;
pub mod transaction;

pub use account::AccountRepository;
pub use transaction::TransactionRepository;
