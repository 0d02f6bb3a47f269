//! Graph command implementation.
//!
//! The graph command:
//! 1. Opens the transaction database
//! 2. Resolves the batch selection
//! 3. Fetches the matching records
//! 4. Aggregates TPS and/or latency intervals and aligns them
//! 5. Renders SVG charts (and optional JSON exports)

use crate::aggregator::{
    latency_intervals, latency_stats, merge_series, tps_intervals, tps_stats, AlignedSeries,
};
use crate::chart::{render_line_chart, ChartConfig};
use crate::output::{write_series, write_svg, SeriesDocument};
use crate::store::TransactionStore;
use crate::utils::config::{
    ALL_BATCHES_TOKEN, DEFAULT_DB_PATH, DEFAULT_OUTPUT_DIR, DEFAULT_WINDOW_SECS, MAX_WINDOW_SECS,
};
use crate::utils::error::ChartError;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::Instant;

/// Which series pair to graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphKind {
    Tps,
    Latency,
}

impl GraphKind {
    fn token(&self) -> &'static str {
        match self {
            GraphKind::Tps => "tps",
            GraphKind::Latency => "latency",
        }
    }
}

/// How the batch filter is chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchSelection {
    /// First entry of the batch list (the default)
    MostRecent,
    /// No filter: every record in the database
    All,
    /// A specific batch identifier
    Batch(String),
}

/// Arguments for the graph command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct GraphArgs {
    /// Path to the transaction database
    pub db_path: PathBuf,

    /// Batch selection
    pub batch: BatchSelection,

    /// Series pairs to graph
    pub kinds: Vec<GraphKind>,

    /// Aggregation window width in seconds
    pub window_secs: u32,

    /// Directory for generated files
    pub output_dir: PathBuf,

    /// Also write the aligned series as JSON
    pub export_json: bool,
}

impl Default for GraphArgs {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            batch: BatchSelection::MostRecent,
            kinds: vec![GraphKind::Tps, GraphKind::Latency],
            window_secs: DEFAULT_WINDOW_SECS,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            export_json: false,
        }
    }
}

/// Validate graph arguments
///
/// **Public** - called before execute_graph for early validation
pub fn validate_args(args: &GraphArgs) -> Result<()> {
    if args.db_path.as_os_str().is_empty() {
        anyhow::bail!("Database path cannot be empty");
    }

    if args.window_secs == 0 {
        anyhow::bail!("Window width must be at least 1 second");
    }

    if args.window_secs > MAX_WINDOW_SECS {
        anyhow::bail!("Window width is too large (max {} seconds)", MAX_WINDOW_SECS);
    }

    if args.kinds.is_empty() {
        anyhow::bail!("At least one graph kind must be selected");
    }

    Ok(())
}

/// Execute the graph command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Database open/query failures (fatal, propagated immediately)
/// * File write errors
///
/// An empty record set is not an error: the command logs that there is
/// nothing to plot and exits successfully.
pub fn execute_graph(args: GraphArgs) -> Result<()> {
    let start_time = Instant::now();

    let store = TransactionStore::open(&args.db_path)
        .with_context(|| format!("Failed to open transaction database {}", args.db_path.display()))?;

    let batch = resolve_batch(&store, &args.batch)?;
    match &batch {
        Some(id) => info!("Graphing batch: {}", id),
        None => info!("Graphing all batches"),
    }

    let records = store
        .fetch_records(batch.as_deref())
        .context("Failed to fetch transaction records")?;
    info!("Loaded {} transaction records", records.len());

    for kind in &args.kinds {
        generate_graph(*kind, &records, batch.as_deref(), &args)?;
    }

    info!("Done in {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(())
}

/// Resolve the batch selection against the store's batch list
///
/// **Private** - MostRecent with an empty batch list degrades to the
/// unfiltered view with a warning rather than aborting
fn resolve_batch(store: &TransactionStore, selection: &BatchSelection) -> Result<Option<String>> {
    match selection {
        BatchSelection::Batch(id) => Ok(Some(id.clone())),
        BatchSelection::All => Ok(None),
        BatchSelection::MostRecent => {
            let batches = store.list_batches().context("Failed to list batches")?;
            match batches.into_iter().next() {
                Some(most_recent) => Ok(Some(most_recent)),
                None => {
                    warn!("No batches found; graphing all records");
                    Ok(None)
                }
            }
        }
    }
}

/// Aggregate, render and write one graph
///
/// **Private** - per-kind body of execute_graph
fn generate_graph(
    kind: GraphKind,
    records: &[crate::record::TransactionRecord],
    batch: Option<&str>,
    args: &GraphArgs,
) -> Result<()> {
    let (submission, confirmation) = match kind {
        GraphKind::Tps => tps_intervals(records, batch, args.window_secs),
        GraphKind::Latency => latency_intervals(records, batch, args.window_secs),
    };
    let aligned = merge_series(&submission, &confirmation);
    debug!("{}: {} aligned windows", kind.token(), aligned.len());

    let annotations = stats_annotations(kind, &aligned);
    let config = chart_config(kind, batch, args.window_secs);

    let svg = match render_line_chart(&aligned, &annotations, &config) {
        Ok(svg) => svg,
        Err(ChartError::EmptySeries) => {
            warn!("No data to plot for {} graph", kind.token());
            return Ok(());
        }
    };

    let svg_path = args.output_dir.join(graph_file_name(kind, batch, "svg"));
    write_svg(&svg, &svg_path)
        .with_context(|| format!("Failed to write {} chart", kind.token()))?;

    if args.export_json {
        let doc = SeriesDocument::from_aligned(
            kind.token(),
            batch.unwrap_or(ALL_BATCHES_TOKEN),
            args.window_secs,
            &aligned,
        );
        let json_path = args.output_dir.join(series_file_name(kind, batch));
        write_series(&doc, &json_path)
            .with_context(|| format!("Failed to export {} series", kind.token()))?;
    }

    Ok(())
}

/// Statistics annotation lines for the chart corner box
///
/// **Private** - TPS lines include zero windows; latency lines are computed
/// over positive values only and omitted entirely when none exist
fn stats_annotations(kind: GraphKind, aligned: &AlignedSeries) -> Vec<String> {
    let mut lines = Vec::new();

    match kind {
        GraphKind::Tps => {
            if let Some(stats) = tps_stats(&aligned.submission) {
                lines.push(stats.summary("Submission"));
            }
            if let Some(stats) = tps_stats(&aligned.confirmation) {
                lines.push(stats.summary("Confirmation"));
            }
        }
        GraphKind::Latency => {
            if let Some(stats) = latency_stats(&aligned.submission) {
                lines.push(stats.summary("Submission"));
            }
            if let Some(stats) = latency_stats(&aligned.confirmation) {
                lines.push(stats.summary("Confirmation"));
            }
        }
    }

    lines
}

/// Chart configuration for one graph kind
fn chart_config(kind: GraphKind, batch: Option<&str>, window_secs: u32) -> ChartConfig {
    let config = match kind {
        GraphKind::Tps => ChartConfig::tps().with_title(format!("TPS Over Time ({}s intervals)", window_secs)),
        GraphKind::Latency => ChartConfig::latency()
            .with_title(format!("Transaction Latency Over Time ({}s intervals)", window_secs)),
    };

    match batch {
        Some(id) => config.with_subtitle(format!("Batch: {}", id)),
        None => config,
    }
}

/// Output file name for a graph artifact
///
/// **Public** - `{kind}_graph_{batch|all}.{ext}`
pub fn graph_file_name(kind: GraphKind, batch: Option<&str>, extension: &str) -> String {
    format!(
        "{}_graph_{}.{}",
        kind.token(),
        batch.unwrap_or(ALL_BATCHES_TOKEN),
        extension
    )
}

/// Output file name for a series export
fn series_file_name(kind: GraphKind, batch: Option<&str>) -> String {
    format!("{}_series_{}.json", kind.token(), batch.unwrap_or(ALL_BATCHES_TOKEN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_args_defaults() {
        assert!(validate_args(&GraphArgs::default()).is_ok());
    }

    #[test]
    fn test_validate_args_zero_window() {
        let args = GraphArgs {
            window_secs: 0,
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_window_too_large() {
        let args = GraphArgs {
            window_secs: MAX_WINDOW_SECS + 1,
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_empty_db_path() {
        let args = GraphArgs {
            db_path: PathBuf::new(),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_no_kinds() {
        let args = GraphArgs {
            kinds: vec![],
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_graph_file_name() {
        assert_eq!(
            graph_file_name(GraphKind::Tps, Some("batch_007"), "svg"),
            "tps_graph_batch_007.svg"
        );
        assert_eq!(graph_file_name(GraphKind::Latency, None, "svg"), "latency_graph_all.svg");
    }
}
