//! Critical path method: forward and backward passes over the task graph.

use rustc_hash::FxHashMap;

use crate::graph::{ProjectGraph, ProjectGraphError};
use crate::models::Task;

/// Per-task timing, in days of effort from the project start.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TaskTiming {
    /// Earliest possible start (forward pass).
    pub early_start: f64,
    /// Earliest possible finish (forward pass).
    pub early_finish: f64,
    /// Latest allowable start (backward pass).
    pub late_start: f64,
    /// Latest allowable finish (backward pass).
    pub late_finish: f64,
}

impl TaskTiming {
    /// Schedule slack rounded to whole days.
    pub fn float(&self) -> i64 {
        (self.late_start - self.early_start).round() as i64
    }

    pub fn is_critical(&self) -> bool {
        self.float() == 0
    }
}

/// Timings for every task, indexed like the graph.
pub fn calculate_timings(graph: &ProjectGraph<'_>) -> Vec<TaskTiming> {
    let mut timings = vec![TaskTiming::default(); graph.len()];
    let order = graph.topological_order();

    // Forward pass
    for &idx in order {
        let early_start = graph
            .dependencies(idx)
            .iter()
            .map(|&dep| timings[dep as usize].early_finish)
            .fold(0.0_f64, f64::max);
        let timing = &mut timings[idx as usize];
        timing.early_start = early_start;
        timing.early_finish = early_start + graph.estimate(idx);
    }

    let duration = timings
        .iter()
        .map(|t| t.early_finish)
        .fold(0.0_f64, f64::max);

    // Backward pass
    for &idx in order.iter().rev() {
        let late_finish = graph
            .dependents(idx)
            .iter()
            .map(|&dependent| timings[dependent as usize].late_start)
            .reduce(f64::min)
            .unwrap_or(duration);
        let timing = &mut timings[idx as usize];
        timing.late_finish = late_finish;
        timing.late_start = late_finish - graph.estimate(idx);
    }

    timings
}

/// Rounded float per task id.
pub fn calculate_floats(tasks: &[Task]) -> Result<FxHashMap<String, i64>, ProjectGraphError> {
    let graph = ProjectGraph::build(tasks)?;
    Ok(floats_by_id(&graph))
}

pub(crate) fn floats_by_id(graph: &ProjectGraph<'_>) -> FxHashMap<String, i64> {
    calculate_timings(graph)
        .iter()
        .enumerate()
        .map(|(idx, timing)| (graph.id(idx as u32).to_string(), timing.float()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::make_task;
    use crate::models::TaskEstimate;

    #[test]
    fn test_chain_is_fully_critical() {
        let tasks = vec![
            make_task("a", 2.0, &[], &[]),
            make_task("b", 3.0, &[], &["a"]),
        ];
        let floats = calculate_floats(&tasks).unwrap();
        assert_eq!(floats["a"], 0);
        assert_eq!(floats["b"], 0);
    }

    #[test]
    fn test_diamond_floats() {
        let tasks = vec![
            make_task("task1", 2.0, &[], &[]),
            make_task("task2", 5.0, &[], &[]),
            make_task("task3", 1.0, &[], &["task1", "task2"]),
        ];
        let floats = calculate_floats(&tasks).unwrap();
        assert_eq!(floats["task1"], 3);
        assert_eq!(floats["task2"], 0);
        assert_eq!(floats["task3"], 0);
    }

    #[test]
    fn test_timings() {
        let tasks = vec![
            make_task("design", 2.0, &[], &[]),
            make_task("build", 4.0, &[], &["design"]),
            make_task("docs", 1.0, &[], &["design"]),
        ];
        let graph = ProjectGraph::build(&tasks).unwrap();
        let timings = calculate_timings(&graph);

        let docs = timings[graph.index_of("docs").unwrap() as usize];
        assert_eq!(docs.early_start, 2.0);
        assert_eq!(docs.early_finish, 3.0);
        assert_eq!(docs.late_finish, 6.0);
        assert_eq!(docs.late_start, 5.0);
        assert_eq!(docs.float(), 3);
        assert!(!docs.is_critical());

        let build = timings[graph.index_of("build").unwrap() as usize];
        assert!(build.is_critical());
    }

    #[test]
    fn test_floats_are_non_negative_with_a_critical_task() {
        let mut tasks = vec![
            make_task("a", 1.0, &[], &[]),
            make_task("b", 2.5, &[], &["a"]),
            make_task("c", 0.5, &[], &[]),
            make_task("d", 3.0, &[], &["c"]),
            make_task("e", 1.0, &[], &["b", "d"]),
            make_task("f", 7.0, &[], &[]),
        ];
        tasks[1].estimate = TaskEstimate {
            min: 1.0,
            max: 6.0,
            expected: 2.0,
        };

        let floats = calculate_floats(&tasks).unwrap();
        assert!(floats.values().all(|&f| f >= 0));
        assert!(floats.values().any(|&f| f == 0));
        assert_eq!(floats["f"], 0);
    }

    #[test]
    fn test_invalid_graph_is_rejected() {
        let tasks = vec![
            make_task("a", 1.0, &[], &["b"]),
            make_task("b", 1.0, &[], &["a"]),
        ];
        assert!(matches!(
            calculate_floats(&tasks),
            Err(ProjectGraphError::CircularDependency(_))
        ));

        let tasks = vec![make_task("a", 1.0, &[], &["missing"])];
        assert!(matches!(
            calculate_floats(&tasks),
            Err(ProjectGraphError::UnknownDependency { .. })
        ));
    }

    #[test]
    fn test_empty_task_set() {
        assert!(calculate_floats(&[]).unwrap().is_empty());
    }
}
