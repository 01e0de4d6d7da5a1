//! The checkpoint graph produced by a simulation run.
//!
//! Executions live in one arena on the graph; checkpoints refer to them by
//! index through `incoming` and `outgoing`.

use pyo3::prelude::*;
use rustc_hash::FxHashMap;

use crate::models::Day;

/// Checkpoint ids increase in creation order and survive optimization unchanged.
pub type CheckpointId = u32;

/// A point in simulated time with the set of tasks known complete there.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct Checkpoint {
    #[pyo3(get)]
    pub id: CheckpointId,
    #[pyo3(get)]
    pub day: Day,
    /// Cumulative, in the order the tasks became known here.
    #[pyo3(get)]
    pub completed_tasks: Vec<String>,
    /// Indices into [`CheckpointGraph::executions`] of edges ending here.
    #[pyo3(get)]
    pub incoming: Vec<usize>,
    /// Indices into [`CheckpointGraph::executions`] of edges starting here.
    #[pyo3(get)]
    pub outgoing: Vec<usize>,
}

#[pymethods]
impl Checkpoint {
    fn __repr__(&self) -> String {
        format!(
            "Checkpoint(id={}, day={}, completed={})",
            self.id,
            self.day,
            self.completed_tasks.len()
        )
    }
}

impl Checkpoint {
    pub(crate) fn new(id: CheckpointId, day: Day, completed_tasks: Vec<String>) -> Self {
        Self {
            id,
            day,
            completed_tasks,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    pub fn has_completed(&self, task_id: &str) -> bool {
        self.completed_tasks.iter().any(|t| t == task_id)
    }
}

/// What an edge of the checkpoint graph represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionKind {
    /// One person performing one task.
    Task,
    /// A person idling until a dependency is available.
    PersonWait,
    /// A completion fact flowing into a waiting checkpoint.
    DependencyWait,
}

/// An edge between two checkpoints.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct TaskExecution {
    #[pyo3(get)]
    pub task_id: Option<String>,
    #[pyo3(get)]
    pub person_id: Option<String>,
    /// PERT estimate in days (task executions only).
    #[pyo3(get)]
    pub estimate: Option<f64>,
    /// Schedule slack in days (task executions only).
    #[pyo3(get)]
    pub float: Option<i64>,
    #[pyo3(get)]
    pub from: CheckpointId,
    #[pyo3(get)]
    pub to: CheckpointId,
    #[pyo3(get)]
    pub start_day: Day,
    #[pyo3(get)]
    pub end_day: Day,
}

#[pymethods]
impl TaskExecution {
    fn __repr__(&self) -> String {
        match self.kind() {
            ExecutionKind::Task => format!(
                "TaskExecution(task={:?}, person={:?}, {} -> {}, {} to {})",
                self.task_id.as_deref().unwrap_or_default(),
                self.person_id.as_deref().unwrap_or_default(),
                self.from,
                self.to,
                self.start_day,
                self.end_day
            ),
            ExecutionKind::PersonWait => format!(
                "PersonWait(person={:?}, {} -> {})",
                self.person_id.as_deref().unwrap_or_default(),
                self.from,
                self.to
            ),
            ExecutionKind::DependencyWait => {
                format!("DependencyWait({} -> {})", self.from, self.to)
            }
        }
    }

    #[getter(kind)]
    fn py_kind(&self) -> &'static str {
        match self.kind() {
            ExecutionKind::Task => "task",
            ExecutionKind::PersonWait => "person-wait",
            ExecutionKind::DependencyWait => "dependency-wait",
        }
    }
}

impl TaskExecution {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn task(
        task_id: &str,
        person_id: &str,
        estimate: f64,
        float: i64,
        from: CheckpointId,
        to: CheckpointId,
        start_day: Day,
        end_day: Day,
    ) -> Self {
        Self {
            task_id: Some(task_id.to_string()),
            person_id: Some(person_id.to_string()),
            estimate: Some(estimate),
            float: Some(float),
            from,
            to,
            start_day,
            end_day,
        }
    }

    pub(crate) fn person_wait(
        person_id: &str,
        from: CheckpointId,
        to: CheckpointId,
        start_day: Day,
        end_day: Day,
    ) -> Self {
        Self {
            task_id: None,
            person_id: Some(person_id.to_string()),
            estimate: None,
            float: None,
            from,
            to,
            start_day,
            end_day,
        }
    }

    pub(crate) fn dependency_wait(
        from: CheckpointId,
        to: CheckpointId,
        start_day: Day,
        end_day: Day,
    ) -> Self {
        Self {
            task_id: None,
            person_id: None,
            estimate: None,
            float: None,
            from,
            to,
            start_day,
            end_day,
        }
    }

    pub fn kind(&self) -> ExecutionKind {
        match (&self.task_id, &self.person_id) {
            (Some(_), _) => ExecutionKind::Task,
            (None, Some(_)) => ExecutionKind::PersonWait,
            (None, None) => ExecutionKind::DependencyWait,
        }
    }
}

/// Time-ordered DAG of checkpoints joined by executions.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CheckpointGraph {
    /// Sorted by id.
    #[pyo3(get)]
    pub checkpoints: Vec<Checkpoint>,
    #[pyo3(get)]
    pub executions: Vec<TaskExecution>,
}

#[pymethods]
impl CheckpointGraph {
    fn __repr__(&self) -> String {
        format!(
            "CheckpointGraph(checkpoints={}, executions={})",
            self.checkpoints.len(),
            self.executions.len()
        )
    }

    fn __len__(&self) -> usize {
        self.checkpoints.len()
    }

    #[pyo3(name = "completion_days")]
    fn py_completion_days(&self) -> std::collections::HashMap<String, Day> {
        self.completion_days().into_iter().collect()
    }

    #[pyo3(name = "last_day")]
    fn py_last_day(&self) -> Option<Day> {
        self.last_day()
    }
}

impl CheckpointGraph {
    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    pub fn checkpoint(&self, id: CheckpointId) -> Option<&Checkpoint> {
        self.checkpoints
            .binary_search_by_key(&id, |c| c.id)
            .ok()
            .map(|pos| &self.checkpoints[pos])
    }

    pub fn incoming<'a>(&'a self, checkpoint: &'a Checkpoint) -> impl Iterator<Item = &'a TaskExecution> {
        checkpoint.incoming.iter().map(|&e| &self.executions[e])
    }

    pub fn outgoing<'a>(&'a self, checkpoint: &'a Checkpoint) -> impl Iterator<Item = &'a TaskExecution> {
        checkpoint.outgoing.iter().map(|&e| &self.executions[e])
    }

    /// Executions that perform a task, in creation order.
    pub fn task_executions(&self) -> impl Iterator<Item = &TaskExecution> {
        self.executions
            .iter()
            .filter(|e| e.kind() == ExecutionKind::Task)
    }

    /// Completion day of every scheduled task.
    pub fn completion_days(&self) -> FxHashMap<String, Day> {
        self.task_executions()
            .filter_map(|e| e.task_id.as_ref().map(|id| (id.clone(), e.end_day)))
            .collect()
    }

    /// Day of the latest checkpoint.
    pub fn last_day(&self) -> Option<Day> {
        self.checkpoints.iter().map(|c| c.day).max()
    }

    /// Append a checkpoint whose id must exceed every existing id.
    pub(crate) fn push_checkpoint(&mut self, checkpoint: Checkpoint) -> usize {
        self.checkpoints.push(checkpoint);
        self.checkpoints.len() - 1
    }

    /// Record an edge between the checkpoints at positions `from` and `to`.
    pub(crate) fn connect(&mut self, from: usize, to: usize, execution: TaskExecution) -> usize {
        let edge = self.executions.len();
        self.executions.push(execution);
        self.checkpoints[from].outgoing.push(edge);
        self.checkpoints[to].incoming.push(edge);
        edge
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn two_step_graph() -> CheckpointGraph {
        let mut graph = CheckpointGraph::default();
        let start = graph.push_checkpoint(Checkpoint::new(0, d(2025, 1, 1), vec![]));
        let end = graph.push_checkpoint(Checkpoint::new(4, d(2025, 1, 3), vec!["build".to_string()]));
        graph.connect(
            start,
            end,
            TaskExecution::task("build", "alice", 2.0, 0, 0, 4, d(2025, 1, 1), d(2025, 1, 3)),
        );
        graph
    }

    #[test]
    fn test_execution_kinds() {
        let day = d(2025, 1, 1);
        assert_eq!(
            TaskExecution::task("t", "p", 1.0, 0, 0, 1, day, day).kind(),
            ExecutionKind::Task
        );
        assert_eq!(
            TaskExecution::person_wait("p", 0, 1, day, day).kind(),
            ExecutionKind::PersonWait
        );
        assert_eq!(
            TaskExecution::dependency_wait(0, 1, day, day).kind(),
            ExecutionKind::DependencyWait
        );
    }

    #[test]
    fn test_lookup_by_sparse_id() {
        let graph = two_step_graph();
        assert_eq!(graph.checkpoint(4).map(|c| c.day), Some(d(2025, 1, 3)));
        assert!(graph.checkpoint(2).is_none());
        assert!(graph.checkpoint(4).unwrap().has_completed("build"));
    }

    #[test]
    fn test_edges_and_queries() {
        let graph = two_step_graph();
        let start = graph.checkpoint(0).unwrap();
        let end = graph.checkpoint(4).unwrap();

        assert_eq!(graph.outgoing(start).count(), 1);
        assert_eq!(graph.incoming(end).next().and_then(|e| e.person_id.as_deref()), Some("alice"));
        assert_eq!(graph.completion_days()["build"], d(2025, 1, 3));
        assert_eq!(graph.last_day(), Some(d(2025, 1, 3)));
        assert_eq!(CheckpointGraph::default().last_day(), None);
    }
}
