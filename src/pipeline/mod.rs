//! Pipeline components: walk, aggregate, present, and the orchestrator that wires them.

pub mod aggregate;
pub mod context;
pub mod error_handler;
pub mod orchestrator;
pub mod present;
pub mod walk;

pub use aggregate::{TopN, run_aggregator, spawn_aggregate_thread};
pub use context::{PipelineChannels, PipelineContext, RENDEZVOUS_CAP, create_pipeline_channels};
pub use error_handler::report_skipped_paths;
pub use orchestrator::{run_scan, validate_scan};
pub use present::{
    PresentReport, Render, RenderKind, TableRenderer, format_table, run_presenter,
    spawn_present_thread,
};
pub use walk::{TaskGuard, TaskTracker, build_walk_pool, spawn_walk_thread, walk_tree};
