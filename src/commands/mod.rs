//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the library components to perform user tasks.

pub mod batches;
pub mod graph;

// Re-export main command functions
pub use batches::execute_batches;
pub use graph::{execute_graph, validate_args, BatchSelection, GraphArgs, GraphKind};
