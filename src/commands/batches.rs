//! Batches command implementation.
//!
//! Lists the batch identifiers known to the transaction database, most
//! recent first, so a batch can be picked for `graph --batch`.

use crate::store::TransactionStore;
use anyhow::{Context, Result};
use std::path::Path;

/// Execute the batches command
///
/// **Public** - called from main.rs
pub fn execute_batches(db_path: &Path) -> Result<()> {
    let store = TransactionStore::open(db_path)
        .with_context(|| format!("Failed to open transaction database {}", db_path.display()))?;

    let batches = store.list_batches().context("Failed to list batches")?;

    if batches.is_empty() {
        println!("No batches found in database.");
        return Ok(());
    }

    println!("Available batches (most recent first):");
    for batch in &batches {
        println!("  {}", batch);
    }
    println!("{} batch(es) total", batches.len());

    Ok(())
}
