//! SQLite-backed transaction record source.
//!
//! The transaction submitter writes a `transactions` table (one row per
//! submitted transaction); this store reads it back. Opened read-only: this
//! tool never mutates the submitter's data.

use crate::record::{TransactionRecord, TxStatus};
use crate::utils::error::StoreError;
use log::{debug, info};
use rusqlite::{params, Connection, OpenFlags};
use std::path::Path;

const RECORD_COLUMNS: &str = "batch_number, status, submitted_at, confirmed_at, execution_time";

/// Read-only handle to the transaction database
pub struct TransactionStore {
    conn: Connection,
}

impl TransactionStore {
    /// Open the transaction database
    ///
    /// **Public** - fatal if the database is missing or unreadable; no
    /// partial aggregation is attempted on a broken source
    ///
    /// # Errors
    /// * `StoreError::DatabaseNotFound` - no file at the given path
    /// * `StoreError::QueryFailed` - sqlite refused to open it
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(StoreError::DatabaseNotFound(path.to_path_buf()));
        }

        info!("Opening transaction database: {}", path.display());
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;

        Ok(Self { conn })
    }

    /// Fetch all records, optionally restricted to one batch
    ///
    /// **Public** - returns the full matching set in submission order;
    /// the aggregator does not rely on that ordering
    pub fn fetch_records(&self, batch: Option<&str>) -> Result<Vec<TransactionRecord>, StoreError> {
        let records = match batch {
            Some(batch_id) => {
                let mut stmt = self.conn.prepare(&format!(
                    "SELECT {RECORD_COLUMNS} FROM transactions \
                     WHERE batch_number = ?1 ORDER BY submitted_at"
                ))?;
                let rows = stmt.query_map(params![batch_id], row_to_record)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = self.conn.prepare(&format!(
                    "SELECT {RECORD_COLUMNS} FROM transactions ORDER BY submitted_at"
                ))?;
                let rows = stmt.query_map([], row_to_record)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };

        debug!(
            "Fetched {} records (batch filter: {})",
            records.len(),
            batch.unwrap_or("none")
        );

        Ok(records)
    }

    /// List distinct batch identifiers, most recent first
    ///
    /// **Public** - batch numbers embed their creation time, so reverse
    /// lexicographic order is reverse chronological
    pub fn list_batches(&self) -> Result<Vec<String>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT batch_number FROM transactions ORDER BY batch_number DESC")?;
        let rows = stmt.query_map([], |row| row.get(0))?;

        rows.collect::<Result<Vec<_>, _>>().map_err(StoreError::from)
    }
}

/// Map one `transactions` row to a record
///
/// **Private** - timestamps stay raw text so the aggregator can apply its
/// per-record data-quality skip
fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<TransactionRecord> {
    let status: String = row.get(1)?;

    Ok(TransactionRecord {
        batch_id: row.get(0)?,
        status: TxStatus::parse(&status),
        submitted_at: row.get(2)?,
        confirmed_at: row.get(3)?,
        execution_time_ms: row.get(4)?,
    })
}
