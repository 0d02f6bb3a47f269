//! Tx Metrics
//!
//! TPS and latency graph generation for batched transaction runs.
//!
//! Reads the `transactions.db` written by a transaction submitter, buckets
//! the records into fixed-width time windows, and renders throughput and
//! latency charts per batch or across all batches.
//!
//! This crate provides the core implementation for the `tx-metrics` CLI
//! tool.
//!
//! ## Getting Started
//!
//! Most users should install and use the CLI:
//!
//! ```bash
//! cargo install tx-metrics
//! tx-metrics graph --help
//! ```

pub mod aggregator;
pub mod chart;
pub mod commands;
pub mod output;
pub mod record;
pub mod store;
pub mod utils;
