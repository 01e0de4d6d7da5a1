//! Validated task dependency graph.
//!
//! Tasks live in an arena indexed by interned id (declaration order). All
//! adjacency is stored as `Vec<Vec<TaskIdx>>`, so traversals never touch a
//! string map after construction.

use std::collections::VecDeque;
use thiserror::Error;

use crate::interner::{IdInt, IdInterner};
use crate::models::Task;

/// Index of a task in its [`ProjectGraph`].
pub type TaskIdx = IdInt;

/// Malformed project input. Nothing downstream runs on an invalid graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectGraphError {
    #[error("Invalid project graph: duplicate task id {0:?}")]
    DuplicateTask(String),
    #[error("Invalid project graph: task {task:?} depends on unknown task {dependency:?}")]
    UnknownDependency { task: String, dependency: String },
    #[error("Invalid project graph: circular dependency among {0:?}")]
    CircularDependency(Vec<String>),
}

/// A task set checked for unique ids, resolvable dependencies and acyclicity.
#[derive(Debug, Clone)]
pub struct ProjectGraph<'a> {
    tasks: Vec<&'a Task>,
    ids: IdInterner,
    estimates: Vec<f64>,
    dependencies: Vec<Vec<TaskIdx>>,
    dependents: Vec<Vec<TaskIdx>>,
    topo_order: Vec<TaskIdx>,
}

impl<'a> ProjectGraph<'a> {
    pub fn build(tasks: &'a [Task]) -> Result<Self, ProjectGraphError> {
        let mut ids = IdInterner::with_capacity(tasks.len());
        for task in tasks {
            if ids.insert_new(&task.id).is_none() {
                return Err(ProjectGraphError::DuplicateTask(task.id.clone()));
            }
        }

        let n = tasks.len();
        let mut dependencies: Vec<Vec<TaskIdx>> = vec![Vec::new(); n];
        let mut dependents: Vec<Vec<TaskIdx>> = vec![Vec::new(); n];

        for (idx, task) in tasks.iter().enumerate() {
            for dep_name in &task.dependencies {
                let dep = ids
                    .get(dep_name)
                    .ok_or_else(|| ProjectGraphError::UnknownDependency {
                        task: task.id.clone(),
                        dependency: dep_name.clone(),
                    })?;
                // Repeated entries add nothing
                if dependencies[idx].contains(&dep) {
                    continue;
                }
                dependencies[idx].push(dep);
                dependents[dep as usize].push(idx as TaskIdx);
            }
        }

        let estimates = tasks.iter().map(Task::pert_estimate).collect();
        let topo_order = topological_sort(&ids, &dependencies, &dependents)?;

        Ok(Self {
            tasks: tasks.iter().collect(),
            ids,
            estimates,
            dependencies,
            dependents,
            topo_order,
        })
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// All task indices in declaration order.
    pub fn indices(&self) -> impl Iterator<Item = TaskIdx> {
        0..self.tasks.len() as TaskIdx
    }

    pub fn index_of(&self, id: &str) -> Option<TaskIdx> {
        self.ids.get(id)
    }

    pub fn task(&self, idx: TaskIdx) -> &'a Task {
        self.tasks[idx as usize]
    }

    pub fn id(&self, idx: TaskIdx) -> &str {
        self.ids.name(idx)
    }

    /// PERT estimate in days of effort.
    pub fn estimate(&self, idx: TaskIdx) -> f64 {
        self.estimates[idx as usize]
    }

    pub fn dependencies(&self, idx: TaskIdx) -> &[TaskIdx] {
        &self.dependencies[idx as usize]
    }

    /// Tasks that list `idx` as a dependency, in declaration order.
    pub fn dependents(&self, idx: TaskIdx) -> &[TaskIdx] {
        &self.dependents[idx as usize]
    }

    /// Dependencies before dependents.
    pub fn topological_order(&self) -> &[TaskIdx] {
        &self.topo_order
    }
}

/// Kahn's algorithm, seeded and drained in declaration order.
fn topological_sort(
    ids: &IdInterner,
    dependencies: &[Vec<TaskIdx>],
    dependents: &[Vec<TaskIdx>],
) -> Result<Vec<TaskIdx>, ProjectGraphError> {
    let mut in_degree: Vec<usize> = dependencies.iter().map(Vec::len).collect();

    let mut queue: VecDeque<TaskIdx> = in_degree
        .iter()
        .enumerate()
        .filter(|(_, &degree)| degree == 0)
        .map(|(idx, _)| idx as TaskIdx)
        .collect();

    let mut order: Vec<TaskIdx> = Vec::with_capacity(dependencies.len());

    while let Some(idx) = queue.pop_front() {
        order.push(idx);
        for &dependent in &dependents[idx as usize] {
            let degree = &mut in_degree[dependent as usize];
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(dependent);
            }
        }
    }

    if order.len() != dependencies.len() {
        let stuck = in_degree
            .iter()
            .enumerate()
            .filter(|(_, &degree)| degree > 0)
            .map(|(idx, _)| ids.name(idx as TaskIdx).to_string())
            .collect();
        return Err(ProjectGraphError::CircularDependency(stuck));
    }

    Ok(order)
}
