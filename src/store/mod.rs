//! Transaction record source.
//!
//! The store is the only collaborator that touches the submitter's database;
//! everything downstream works on in-memory `TransactionRecord`s.

pub mod sqlite;

// Re-export main types
pub use sqlite::TransactionStore;
