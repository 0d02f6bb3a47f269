//! Configuration and constants for the CLI.

/// Default path to the transaction database written by the submitter
pub const DEFAULT_DB_PATH: &str = "./transactions.db";

/// Default aggregation window width in seconds
pub const DEFAULT_WINDOW_SECS: u32 = 1;

/// Upper bound on the aggregation window (one hour)
pub const MAX_WINDOW_SECS: u32 = 3600;

/// Default directory for generated chart files
pub const DEFAULT_OUTPUT_DIR: &str = "images";

/// File-name token used when graphing across all batches
pub const ALL_BATCHES_TOKEN: &str = "all";

/// Current series export schema version
pub const SERIES_SCHEMA_VERSION: &str = "1.0.0";
