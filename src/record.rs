//! Transaction record data model.
//!
//! Records come out of the transaction store exactly as the submitter wrote
//! them. Timestamps stay raw strings here: parsing happens in the aggregator
//! so a malformed value can be skipped per record instead of failing a whole
//! fetch.

use serde::{Deserialize, Serialize};

/// Terminal state of a submitted transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Success,
    Failed,
    Pending,
    /// Anything the store reports that we do not recognize
    Other,
}

impl TxStatus {
    /// Parse a status column value
    ///
    /// **Public** - used by the store row mapper
    pub fn parse(raw: &str) -> Self {
        match raw {
            "success" => TxStatus::Success,
            "failed" => TxStatus::Failed,
            "pending" => TxStatus::Pending,
            _ => TxStatus::Other,
        }
    }

    /// Only successful transactions count toward confirmation-side series
    pub fn is_success(&self) -> bool {
        matches!(self, TxStatus::Success)
    }
}

/// A single transaction as recorded by the submitter
///
/// **Public** - input to the interval aggregator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Batch the transaction was submitted in (None = unbatched/global)
    pub batch_id: Option<String>,

    /// Terminal status reported by the chain
    pub status: TxStatus,

    /// When the transaction was submitted (raw timestamp text)
    pub submitted_at: String,

    /// When the transaction was confirmed, if it was (raw timestamp text)
    pub confirmed_at: Option<String>,

    /// Time taken to submit, in milliseconds
    pub execution_time_ms: Option<f64>,
}

impl TransactionRecord {
    /// Create a record with only the required fields set
    pub fn new(submitted_at: impl Into<String>, status: TxStatus) -> Self {
        Self {
            batch_id: None,
            status,
            submitted_at: submitted_at.into(),
            confirmed_at: None,
            execution_time_ms: None,
        }
    }

    pub fn with_batch(mut self, batch_id: impl Into<String>) -> Self {
        self.batch_id = Some(batch_id.into());
        self
    }

    pub fn with_confirmation(mut self, confirmed_at: impl Into<String>) -> Self {
        self.confirmed_at = Some(confirmed_at.into());
        self
    }

    pub fn with_execution_time(mut self, ms: f64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(TxStatus::parse("success"), TxStatus::Success);
        assert_eq!(TxStatus::parse("failed"), TxStatus::Failed);
        assert_eq!(TxStatus::parse("pending"), TxStatus::Pending);
        assert_eq!(TxStatus::parse("reverted"), TxStatus::Other);
    }

    #[test]
    fn test_only_success_confirms() {
        assert!(TxStatus::Success.is_success());
        assert!(!TxStatus::Failed.is_success());
        assert!(!TxStatus::Pending.is_success());
        assert!(!TxStatus::Other.is_success());
    }

    #[test]
    fn test_record_builder() {
        let record = TransactionRecord::new("2024-01-01T00:00:00", TxStatus::Success)
            .with_batch("batch_007")
            .with_confirmation("2024-01-01T00:00:01")
            .with_execution_time(42.0);

        assert_eq!(record.batch_id.as_deref(), Some("batch_007"));
        assert_eq!(record.confirmed_at.as_deref(), Some("2024-01-01T00:00:01"));
        assert_eq!(record.execution_time_ms, Some(42.0));
    }
}
