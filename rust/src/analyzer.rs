//! Summary metrics for a project.

use thiserror::Error;

use crate::calendar::{add_work_days, WorkDayClassifier};
use crate::config::SimulationConfig;
use crate::graph::{ProjectGraph, ProjectGraphError, TaskIdx};
use crate::log_changes;
use crate::models::{Day, Project, ProjectStatus, ProjectSummary, TaskStatus};
use crate::simulation::CheckpointGraph;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error(transparent)]
    InvalidGraph(#[from] ProjectGraphError),
    #[error("No working day found after {from}")]
    NoWorkingDays { from: Day },
}

/// Derives status, effort and completion estimates from a project.
pub struct ProjectAnalyzer<'a, C: WorkDayClassifier + ?Sized> {
    classifier: &'a C,
    max_scan_days: u32,
    verbosity: u8,
}

impl<'a, C: WorkDayClassifier + ?Sized> ProjectAnalyzer<'a, C> {
    pub fn new(classifier: &'a C) -> Self {
        Self::with_config(classifier, &SimulationConfig::default())
    }

    pub fn with_config(classifier: &'a C, config: &SimulationConfig) -> Self {
        Self {
            classifier,
            max_scan_days: config.max_calendar_scan_days,
            verbosity: config.verbosity,
        }
    }

    pub fn analyze_project(
        &self,
        project: &Project,
        simulation: Option<&CheckpointGraph>,
    ) -> Result<ProjectSummary, AnalysisError> {
        let graph = ProjectGraph::build(&project.tasks)?;

        let critical_path = critical_path(&graph);
        let total_estimated_days: f64 = critical_path.iter().map(|&t| graph.estimate(t)).sum();

        let work_days = total_estimated_days.ceil() as u64;
        let estimated_completion_date = add_work_days(
            self.classifier,
            project.start_date,
            work_days,
            self.max_scan_days,
        )
        .ok_or(AnalysisError::NoWorkingDays {
            from: project.start_date,
        })?;

        let summary = ProjectSummary {
            status: project_status(project),
            total_estimated_days,
            estimated_completion_date,
            completion_percentage: completion_percentage(&graph),
            critical_path: critical_path.iter().map(|&t| graph.id(t).to_string()).collect(),
            simulated_completion_date: simulation.and_then(CheckpointGraph::last_day),
        };

        log_changes!(
            self.verbosity,
            "Project {}: {:.2} days on the critical path, done by {}, {}% complete",
            summary.status,
            summary.total_estimated_days,
            summary.estimated_completion_date,
            summary.completion_percentage
        );
        Ok(summary)
    }
}

/// Analyze with default configuration.
pub fn analyze_project<C>(
    project: &Project,
    classifier: &C,
    simulation: Option<&CheckpointGraph>,
) -> Result<ProjectSummary, AnalysisError>
where
    C: WorkDayClassifier + ?Sized,
{
    ProjectAnalyzer::new(classifier).analyze_project(project, simulation)
}

fn project_status(project: &Project) -> ProjectStatus {
    let tasks = &project.tasks;
    if tasks.iter().all(|t| t.status == TaskStatus::NotStarted) {
        TaskStatus::NotStarted
    } else if tasks.iter().all(|t| t.status == TaskStatus::Complete) {
        TaskStatus::Complete
    } else {
        TaskStatus::InProgress
    }
}

/// Effort-weighted share of complete tasks, in whole percent.
fn completion_percentage(graph: &ProjectGraph<'_>) -> u32 {
    let total: f64 = graph.indices().map(|t| graph.estimate(t)).sum();
    if total == 0.0 {
        return 0;
    }
    let complete: f64 = graph
        .indices()
        .filter(|&t| graph.task(t).status == TaskStatus::Complete)
        .map(|t| graph.estimate(t))
        .sum();
    (complete / total * 100.0).round() as u32
}

/// Root-to-leaf path with the largest summed estimate.
///
/// Every path is enumerated depth-first with an explicit stack. Roots and
/// dependents are visited in declaration order and the first strictly
/// longer path wins, so an all-zero project yields an empty path.
fn critical_path(graph: &ProjectGraph<'_>) -> Vec<TaskIdx> {
    let mut best: Vec<TaskIdx> = Vec::new();
    let mut best_length = 0.0;

    let roots = graph.indices().filter(|&t| graph.dependencies(t).is_empty());
    for root in roots {
        // (task, next dependent to visit)
        let mut stack: Vec<(TaskIdx, usize)> = vec![(root, 0)];
        let mut path: Vec<TaskIdx> = vec![root];

        while let Some((task, next)) = stack.last_mut() {
            let dependents = graph.dependents(*task);
            if dependents.is_empty() {
                let length: f64 = path.iter().map(|&t| graph.estimate(t)).sum();
                if length > best_length {
                    best_length = length;
                    best = path.clone();
                }
            }
            match dependents.get(*next) {
                Some(&child) => {
                    *next += 1;
                    stack.push((child, 0));
                    path.push(child);
                }
                None => {
                    stack.pop();
                    path.pop();
                }
            }
        }
    }
    best
}
