//! Mutable bookkeeping for one simulation run.

use crate::graph::{ProjectGraph, TaskIdx};
use crate::interner::IdInt;
use crate::models::Day;

use super::checkpoint::{Checkpoint, CheckpointGraph, CheckpointId, TaskExecution};

/// Index of a person in the project's declaration order.
pub type PersonIdx = IdInt;

/// Everything the simulator tracks between iterations.
///
/// Checkpoints are referred to by position in `graph.checkpoints`, which
/// equals their id until the graph is optimized.
pub struct SimulationState {
    pub graph: CheckpointGraph,
    /// Completed tasks per checkpoint as task indices, parallel to `graph.checkpoints`.
    pub completed: Vec<Vec<TaskIdx>>,
    /// Each person's current checkpoint.
    pub person_checkpoint: Vec<usize>,
    /// Checkpoints at which each task is known complete, in creation order.
    pub task_checkpoints: Vec<Vec<usize>>,
    /// Unscheduled tasks, in declaration order.
    pub incomplete: Vec<TaskIdx>,
}

impl SimulationState {
    /// Checkpoint 0 at `start` with every person parked on it.
    pub fn new(start: Day, task_count: usize, person_count: usize) -> Self {
        let mut graph = CheckpointGraph::default();
        graph.push_checkpoint(Checkpoint::new(0, start, Vec::new()));
        Self {
            graph,
            completed: vec![Vec::new()],
            person_checkpoint: vec![0; person_count],
            task_checkpoints: vec![Vec::new(); task_count],
            incomplete: (0..task_count as TaskIdx).collect(),
        }
    }

    pub fn day(&self, checkpoint: usize) -> Day {
        self.graph.checkpoints[checkpoint].day
    }

    pub fn has_completed(&self, checkpoint: usize, task: TaskIdx) -> bool {
        self.completed[checkpoint].contains(&task)
    }

    /// Append a checkpoint and register it against every task it has completed.
    pub fn add_checkpoint(&mut self, graph: &ProjectGraph<'_>, day: Day, completed: Vec<TaskIdx>) -> usize {
        let id = self.graph.len() as CheckpointId;
        let names = completed.iter().map(|&t| graph.id(t).to_string()).collect();
        let position = self.graph.push_checkpoint(Checkpoint::new(id, day, names));
        self.completed.push(completed);
        position
    }

    /// Register a finished checkpoint in `task_checkpoints`.
    pub fn index_completions(&mut self, checkpoint: usize) {
        for &task in &self.completed[checkpoint] {
            self.task_checkpoints[task as usize].push(checkpoint);
        }
    }

    pub fn connect(&mut self, from: usize, to: usize, execution: TaskExecution) {
        self.graph.connect(from, to, execution);
    }

    pub fn mark_scheduled(&mut self, task: TaskIdx) {
        self.incomplete.retain(|&t| t != task);
    }

    pub fn unscheduled_ids(&self, graph: &ProjectGraph<'_>) -> Vec<String> {
        self.incomplete
            .iter()
            .map(|&t| graph.id(t).to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::make_task;
    use chrono::NaiveDate;

    #[test]
    fn test_initial_state() {
        let tasks = vec![make_task("a", 1.0, &[], &[]), make_task("b", 1.0, &[], &["a"])];
        let graph = ProjectGraph::build(&tasks).unwrap();
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let mut state = SimulationState::new(start, graph.len(), 2);

        assert_eq!(state.graph.len(), 1);
        assert_eq!(state.person_checkpoint, vec![0, 0]);
        assert_eq!(state.incomplete, vec![0, 1]);

        let cp = state.add_checkpoint(&graph, start, vec![0]);
        state.index_completions(cp);
        state.person_checkpoint[1] = cp;
        state.mark_scheduled(0);

        assert_eq!(state.graph.checkpoints[cp].completed_tasks, vec!["a".to_string()]);
        assert_eq!(state.task_checkpoints[0], vec![cp]);
        assert_eq!(state.person_checkpoint, vec![0, cp]);
        assert_eq!(state.unscheduled_ids(&graph), vec!["b".to_string()]);
        assert!(state.has_completed(cp, 0));
    }
}
