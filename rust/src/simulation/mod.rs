//! Resource-constrained simulation producing a checkpoint graph.
//!
//! The simulator assigns tasks to people greedily in ascending float order,
//! then the optimizer compacts the raw graph.

mod availability;
mod checkpoint;
mod core;
mod optimize;
mod state;

pub use availability::finish_day;
pub use checkpoint::{Checkpoint, CheckpointGraph, CheckpointId, ExecutionKind, TaskExecution};
pub use core::{simulate, simulate_with_config, SimulationError, Simulator};
pub use optimize::optimize;
pub use state::{PersonIdx, SimulationState};
