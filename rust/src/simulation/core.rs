//! Resource-constrained simulator.
//!
//! Each iteration either advances the lowest-float task that can start at
//! some checkpoint with a free owner, or, failing that, moves one owner of a
//! blocked task forward to where its dependencies are known complete.

use thiserror::Error;

use crate::calendar::WorkDayClassifier;
use crate::config::SimulationConfig;
use crate::cpm::calculate_timings;
use crate::graph::{ProjectGraph, ProjectGraphError, TaskIdx};
use crate::interner::IdInterner;
use crate::models::{Day, Project};
use crate::{log_changes, log_checks};

use super::availability::finish_day;
use super::checkpoint::{CheckpointGraph, CheckpointId, TaskExecution};
use super::optimize::compact;
use super::state::{PersonIdx, SimulationState};

/// Errors that can occur during simulation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error(transparent)]
    InvalidGraph(#[from] ProjectGraphError),
    #[error("Duplicate person id: {0:?}")]
    DuplicatePerson(String),
    #[error("Task {task:?} is owned by unknown person {person:?}")]
    UnknownOwner { task: String, person: String },
    #[error("Simulation did not finish within {limit} iterations; unscheduled: {unscheduled:?}")]
    IterationLimitExceeded {
        limit: usize,
        unscheduled: Vec<String>,
    },
    #[error("Simulation cannot make progress; unscheduled: {0:?}")]
    Stalled(Vec<String>),
}

/// A validated project ready to simulate.
pub struct Simulator<'a, C: WorkDayClassifier + ?Sized> {
    project: &'a Project,
    classifier: &'a C,
    config: SimulationConfig,
    tasks: ProjectGraph<'a>,
    /// Candidate owners per task, in the task's listed order.
    owners: Vec<Vec<PersonIdx>>,
    /// Floats are computed once up front and not revised as tasks complete.
    floats: Vec<i64>,
}

impl<'a, C: WorkDayClassifier + ?Sized> Simulator<'a, C> {
    pub fn new(
        project: &'a Project,
        classifier: &'a C,
        config: SimulationConfig,
    ) -> Result<Self, SimulationError> {
        let tasks = ProjectGraph::build(&project.tasks)?;

        let mut people = IdInterner::with_capacity(project.people.len());
        for person in &project.people {
            if people.insert_new(&person.id).is_none() {
                return Err(SimulationError::DuplicatePerson(person.id.clone()));
            }
        }

        let owners = project
            .tasks
            .iter()
            .map(|task| {
                task.owners
                    .iter()
                    .map(|owner| {
                        people.get(owner).ok_or_else(|| SimulationError::UnknownOwner {
                            task: task.id.clone(),
                            person: owner.clone(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let floats = calculate_timings(&tasks)
            .iter()
            .map(|timing| timing.float())
            .collect();

        Ok(Self {
            project,
            classifier,
            config,
            tasks,
            owners,
            floats,
        })
    }

    /// Simulate and compact the resulting checkpoint graph.
    pub fn run(&self) -> Result<CheckpointGraph, SimulationError> {
        let raw = self.run_unoptimized()?;
        let raw_len = raw.len();
        let optimized = compact(raw, self.config.verbosity);
        log_changes!(
            self.config.verbosity,
            "Optimized checkpoint graph: {} -> {} checkpoints",
            raw_len,
            optimized.len()
        );
        Ok(optimized)
    }

    /// Simulate without compaction.
    pub fn run_unoptimized(&self) -> Result<CheckpointGraph, SimulationError> {
        let mut state = SimulationState::new(
            self.project.start_date,
            self.tasks.len(),
            self.project.people.len(),
        );

        let mut iterations = 0;
        while !state.incomplete.is_empty() {
            if iterations >= self.config.max_iterations {
                return Err(SimulationError::IterationLimitExceeded {
                    limit: self.config.max_iterations,
                    unscheduled: state.unscheduled_ids(&self.tasks),
                });
            }
            iterations += 1;

            let order = self.sorted_by_float(&state.incomplete);
            if self.advance(&mut state, &order) || self.wait(&mut state, &order) {
                continue;
            }
            return Err(SimulationError::Stalled(state.unscheduled_ids(&self.tasks)));
        }

        log_changes!(
            self.config.verbosity,
            "Simulation finished after {} iterations with {} checkpoints",
            iterations,
            state.graph.len()
        );
        Ok(state.graph)
    }

    /// Stable sort, so equal floats keep declaration order.
    fn sorted_by_float(&self, incomplete: &[TaskIdx]) -> Vec<TaskIdx> {
        let mut order = incomplete.to_vec();
        order.sort_by_key(|&task| self.floats[task as usize]);
        order
    }

    /// Start and finish the first task in `order` that some checkpoint allows.
    fn advance(&self, state: &mut SimulationState, order: &[TaskIdx]) -> bool {
        for &task in order {
            let dependencies = self.tasks.dependencies(task);
            for checkpoint in 0..state.graph.len() {
                if !dependencies.iter().all(|&dep| state.has_completed(checkpoint, dep)) {
                    continue;
                }

                let start = state.day(checkpoint);
                let Some((person, end)) = self.earliest_owner(state, task, checkpoint, start) else {
                    continue;
                };

                let mut completed = state.completed[checkpoint].clone();
                completed.push(task);
                let finished = state.add_checkpoint(&self.tasks, end, completed);

                let person_id = &self.project.people[person as usize].id;
                let task_id = self.tasks.id(task);
                state.connect(
                    checkpoint,
                    finished,
                    TaskExecution::task(
                        task_id,
                        person_id,
                        self.tasks.estimate(task),
                        self.floats[task as usize],
                        checkpoint as CheckpointId,
                        finished as CheckpointId,
                        start,
                        end,
                    ),
                );
                state.index_completions(finished);
                state.person_checkpoint[person as usize] = finished;
                state.mark_scheduled(task);

                log_changes!(
                    self.config.verbosity,
                    "Checkpoint {}: {} does {} from {} to {}",
                    finished,
                    person_id,
                    task_id,
                    start,
                    end
                );
                return true;
            }
            log_checks!(
                self.config.verbosity,
                "{} cannot start at any checkpoint",
                self.tasks.id(task)
            );
        }
        false
    }

    /// Owner free at `checkpoint` with the earliest finish day; the first listed wins ties.
    fn earliest_owner(
        &self,
        state: &SimulationState,
        task: TaskIdx,
        checkpoint: usize,
        start: Day,
    ) -> Option<(PersonIdx, Day)> {
        let mut best: Option<(PersonIdx, Day)> = None;
        for &owner in &self.owners[task as usize] {
            if state.person_checkpoint[owner as usize] != checkpoint {
                continue;
            }
            let person = &self.project.people[owner as usize];
            match finish_day(
                person,
                self.classifier,
                start,
                self.tasks.estimate(task),
                &self.config,
            ) {
                Some(end) if best.map_or(true, |(_, best_end)| end < best_end) => {
                    best = Some((owner, end));
                }
                Some(_) => {}
                None => log_checks!(
                    self.config.verbosity,
                    "{} cannot finish {} starting {}",
                    person.id,
                    self.tasks.id(task),
                    start
                ),
            }
        }
        best
    }

    /// Move one owner of the first ready task to where its dependencies are complete.
    ///
    /// A task is ready when each dependency has completed at some checkpoint.
    /// The owner with the earliest current day moves, unless it already sees
    /// every dependency, in which case the next owner by day is tried.
    fn wait(&self, state: &mut SimulationState, order: &[TaskIdx]) -> bool {
        for &task in order {
            let dependencies = self.tasks.dependencies(task);
            if !dependencies
                .iter()
                .all(|&dep| !state.task_checkpoints[dep as usize].is_empty())
            {
                continue;
            }

            // Earliest-day owner first, skipping owners whose checkpoint already
            // holds every dependency since waiting cannot move them.
            let mut candidates = self.owners[task as usize].clone();
            candidates.sort_by_key(|&owner| state.day(state.person_checkpoint[owner as usize]));
            let Some(owner) = candidates.into_iter().find(|&owner| {
                let current = state.person_checkpoint[owner as usize];
                !dependencies.iter().all(|&dep| state.has_completed(current, dep))
            }) else {
                log_checks!(
                    self.config.verbosity,
                    "No owner of {} is missing a dependency",
                    self.tasks.id(task)
                );
                continue;
            };

            let origin = state.person_checkpoint[owner as usize];
            let mut day = state.day(origin);
            let mut completed = state.completed[origin].clone();
            let mut sources = Vec::new();

            for &dep in dependencies {
                if completed.contains(&dep) {
                    continue;
                }
                let Some(&source) = state.task_checkpoints[dep as usize].first() else {
                    continue;
                };
                day = day.max(state.day(source));
                for &done in &state.completed[source] {
                    if !completed.contains(&done) {
                        completed.push(done);
                    }
                }
                sources.push(source);
            }

            let waited = state.add_checkpoint(&self.tasks, day, completed);
            let person_id = &self.project.people[owner as usize].id;
            state.connect(
                origin,
                waited,
                TaskExecution::person_wait(
                    person_id,
                    origin as CheckpointId,
                    waited as CheckpointId,
                    state.day(origin),
                    day,
                ),
            );
            for source in sources {
                state.connect(
                    source,
                    waited,
                    TaskExecution::dependency_wait(
                        source as CheckpointId,
                        waited as CheckpointId,
                        state.day(source),
                        day,
                    ),
                );
            }
            state.index_completions(waited);
            state.person_checkpoint[owner as usize] = waited;

            log_changes!(
                self.config.verbosity,
                "Checkpoint {}: {} waits from checkpoint {} until {} for {}",
                waited,
                person_id,
                origin,
                day,
                self.tasks.id(task)
            );
            return true;
        }
        false
    }
}

/// Simulate `project` with default configuration and return the optimized graph.
pub fn simulate<C>(project: &Project, classifier: &C) -> Result<CheckpointGraph, SimulationError>
where
    C: WorkDayClassifier + ?Sized,
{
    simulate_with_config(project, classifier, SimulationConfig::default())
}

pub fn simulate_with_config<C>(
    project: &Project,
    classifier: &C,
    config: SimulationConfig,
) -> Result<CheckpointGraph, SimulationError>
where
    C: WorkDayClassifier + ?Sized,
{
    Simulator::new(project, classifier, config)?.run()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::calendar::CalendarPreset;
    use crate::graph::tests::make_task;
    use crate::models::{AvailabilityWindow, Person};
    use crate::simulation::checkpoint::ExecutionKind;
    use chrono::NaiveDate;
    use rustc_hash::FxHashMap;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    pub(crate) fn make_person(id: &str, from: Day) -> Person {
        Person {
            id: id.to_string(),
            availability: vec![AvailabilityWindow {
                start_date: from,
                end_date: d(2025, 12, 31),
                hours_per_day: 8.0,
            }],
        }
    }

    /// alice does two independent tasks back to back.
    pub(crate) fn sequential_project() -> Project {
        Project {
            start_date: d(2025, 1, 1),
            people: vec![make_person("alice", d(2025, 1, 1))],
            tasks: vec![
                make_task("task1", 2.0, &["alice"], &[]),
                make_task("task2", 3.0, &["alice"], &[]),
            ],
        }
    }

    /// bob joins a month late and owns the join task.
    pub(crate) fn late_joiner_project() -> Project {
        Project {
            start_date: d(2025, 1, 1),
            people: vec![
                make_person("alice", d(2025, 1, 1)),
                make_person("bob", d(2025, 2, 1)),
            ],
            tasks: vec![
                make_task("task1", 2.0, &["alice"], &[]),
                make_task("task2", 3.0, &["bob"], &[]),
                make_task("task3", 3.0, &["bob"], &["task1", "task2"]),
            ],
        }
    }

    /// Two interchangeable people; the long branch is critical.
    pub(crate) fn critical_branch_project() -> Project {
        Project {
            start_date: d(2025, 1, 1),
            people: vec![
                make_person("alice", d(2025, 1, 1)),
                make_person("bob", d(2025, 1, 1)),
            ],
            tasks: vec![
                make_task("task1", 2.0, &["alice", "bob"], &[]),
                make_task("task2", 5.0, &["alice", "bob"], &[]),
                make_task("task3", 1.0, &["alice"], &["task1", "task2"]),
            ],
        }
    }

    fn execution<'a>(graph: &'a CheckpointGraph, task_id: &str) -> &'a TaskExecution {
        graph
            .task_executions()
            .find(|e| e.task_id.as_deref() == Some(task_id))
            .unwrap()
    }

    fn ids(graph: &CheckpointGraph) -> Vec<CheckpointId> {
        graph.checkpoints.iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_lowest_float_task_goes_first() {
        let project = sequential_project();
        let graph = simulate(&project, &CalendarPreset::AllWeekdays).unwrap();

        assert_eq!(graph.len(), 3);
        assert_eq!(graph.last_day(), Some(d(2025, 1, 8)));

        let task2 = execution(&graph, "task2");
        assert_eq!((task2.from, task2.to), (0, 1));
        assert_eq!(task2.end_day, d(2025, 1, 6));
        assert_eq!(task2.float, Some(0));

        let task1 = execution(&graph, "task1");
        assert_eq!((task1.from, task1.to), (1, 2));
        assert_eq!(task1.start_day, d(2025, 1, 6));
        assert_eq!(task1.end_day, d(2025, 1, 8));
        assert_eq!(task1.float, Some(1));

        assert_eq!(
            graph.checkpoints[2].completed_tasks,
            vec!["task2".to_string(), "task1".to_string()]
        );
    }

    #[test]
    fn test_wait_for_dependencies_then_splice() {
        let project = late_joiner_project();
        let simulator = Simulator::new(&project, &CalendarPreset::AllWeekdays, SimulationConfig::default()).unwrap();

        let raw = simulator.run_unoptimized().unwrap();
        assert_eq!(raw.len(), 5);
        let wait = &raw.checkpoints[3];
        assert_eq!(wait.day, d(2025, 2, 6));
        assert_eq!(wait.completed_tasks, vec!["task2".to_string(), "task1".to_string()]);
        let kinds: Vec<ExecutionKind> = raw.incoming(wait).map(|e| e.kind()).collect();
        assert_eq!(kinds, vec![ExecutionKind::PersonWait, ExecutionKind::DependencyWait]);

        let graph = simulator.run().unwrap();
        assert_eq!(ids(&graph), vec![0, 2, 3, 4]);

        let task2 = execution(&graph, "task2");
        assert_eq!(task2.person_id.as_deref(), Some("bob"));
        assert_eq!((task2.from, task2.to), (0, 3));
        assert_eq!(task2.end_day, d(2025, 2, 6));

        let task1 = execution(&graph, "task1");
        assert_eq!(task1.end_day, d(2025, 1, 3));

        let task3 = execution(&graph, "task3");
        assert_eq!((task3.from, task3.to), (3, 4));
        assert_eq!(task3.end_day, d(2025, 2, 11));
    }

    #[test]
    fn test_wait_merges_every_dependency_source() {
        let project = Project {
            start_date: d(2025, 1, 1),
            people: vec![
                make_person("alice", d(2025, 1, 1)),
                make_person("bob", d(2025, 1, 1)),
                make_person("carol", d(2025, 1, 1)),
            ],
            tasks: vec![
                make_task("a", 2.0, &["alice"], &[]),
                make_task("b", 4.0, &["bob"], &[]),
                make_task("c", 1.0, &["carol"], &["a", "b"]),
            ],
        };
        let simulator =
            Simulator::new(&project, &CalendarPreset::AllWeekdays, SimulationConfig::default())
                .unwrap();
        let raw = simulator.run_unoptimized().unwrap();

        let wait = &raw.checkpoints[3];
        assert_eq!(wait.day, d(2025, 1, 7));
        assert_eq!(wait.completed_tasks, vec!["a".to_string(), "b".to_string()]);

        let edges: Vec<_> = raw
            .incoming(wait)
            .map(|e| (e.kind(), e.from, e.to, e.start_day, e.end_day))
            .collect();
        assert_eq!(
            edges,
            vec![
                (ExecutionKind::PersonWait, 0, 3, d(2025, 1, 1), d(2025, 1, 7)),
                (ExecutionKind::DependencyWait, 2, 3, d(2025, 1, 3), d(2025, 1, 7)),
                (ExecutionKind::DependencyWait, 1, 3, d(2025, 1, 7), d(2025, 1, 7)),
            ]
        );
        assert_eq!(raw.incoming(wait).next().unwrap().person_id.as_deref(), Some("carol"));

        let c = execution(&raw, "c");
        assert_eq!((c.from, c.start_day, c.end_day), (3, d(2025, 1, 7), d(2025, 1, 8)));
    }

    #[test]
    fn test_wait_skips_dependency_already_covered() {
        // q's checkpoint already includes p, so p needs no edge of its own
        let project = Project {
            start_date: d(2025, 1, 1),
            people: vec![
                make_person("alice", d(2025, 1, 1)),
                make_person("carol", d(2025, 1, 1)),
            ],
            tasks: vec![
                make_task("p", 1.0, &["alice"], &[]),
                make_task("q", 1.0, &["alice"], &["p"]),
                make_task("r", 1.0, &["carol"], &["q", "p"]),
            ],
        };
        let simulator =
            Simulator::new(&project, &CalendarPreset::AllWeekdays, SimulationConfig::default())
                .unwrap();
        let raw = simulator.run_unoptimized().unwrap();

        let wait = &raw.checkpoints[3];
        assert_eq!(wait.day, d(2025, 1, 3));
        assert_eq!(wait.completed_tasks, vec!["p".to_string(), "q".to_string()]);

        let edges: Vec<_> = raw
            .incoming(wait)
            .map(|e| (e.kind(), e.from, e.start_day, e.end_day))
            .collect();
        assert_eq!(
            edges,
            vec![
                (ExecutionKind::PersonWait, 0, d(2025, 1, 1), d(2025, 1, 3)),
                (ExecutionKind::DependencyWait, 2, d(2025, 1, 3), d(2025, 1, 3)),
            ]
        );
        assert_eq!(execution(&raw, "r").end_day, d(2025, 1, 6));
    }

    #[test]
    fn test_critical_path_is_prioritized() {
        let project = critical_branch_project();
        let graph = simulate(&project, &CalendarPreset::AllWeekdays).unwrap();

        assert_eq!(ids(&graph), vec![0, 2, 3, 4]);

        let task2 = execution(&graph, "task2");
        assert_eq!(task2.person_id.as_deref(), Some("alice"));
        assert_eq!((task2.from, task2.to), (0, 3));
        assert_eq!((task2.start_day, task2.end_day), (d(2025, 1, 1), d(2025, 1, 8)));
        assert_eq!(task2.estimate, Some(5.0));
        assert_eq!(task2.float, Some(0));

        let task1 = execution(&graph, "task1");
        assert_eq!(task1.person_id.as_deref(), Some("bob"));
        assert_eq!((task1.from, task1.to), (0, 2));
        assert_eq!((task1.start_day, task1.end_day), (d(2025, 1, 1), d(2025, 1, 3)));
        assert_eq!(task1.float, Some(3));

        assert_eq!(execution(&graph, "task3").end_day, d(2025, 1, 9));
    }

    #[test]
    fn test_first_listed_owner_wins_ties() {
        let project = Project {
            start_date: d(2025, 1, 1),
            people: vec![make_person("alice", d(2025, 1, 1)), make_person("bob", d(2025, 1, 1))],
            tasks: vec![make_task("task", 1.0, &["bob", "alice"], &[])],
        };
        let graph = simulate(&project, &CalendarPreset::AllWeekdays).unwrap();
        assert_eq!(execution(&graph, "task").person_id.as_deref(), Some("bob"));
    }

    #[test]
    fn test_simulation_is_deterministic() {
        for project in [sequential_project(), late_joiner_project(), critical_branch_project()] {
            let first = simulate(&project, &CalendarPreset::NovaScotia).unwrap();
            let second = simulate(&project, &CalendarPreset::NovaScotia).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_every_task_completes_exactly_once() {
        for project in [sequential_project(), late_joiner_project(), critical_branch_project()] {
            let graph = simulate(&project, &CalendarPreset::AllWeekdays).unwrap();
            let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
            for e in graph.task_executions() {
                *counts.entry(e.task_id.as_deref().unwrap()).or_default() += 1;
            }
            assert_eq!(counts.len(), project.tasks.len());
            assert!(counts.values().all(|&n| n == 1));
        }
    }

    #[test]
    fn test_closure_calendar() {
        let project = sequential_project();
        let every_day = |_: Day| true;
        let graph = simulate(&project, &every_day).unwrap();
        assert_eq!(execution(&graph, "task2").end_day, d(2025, 1, 4));
        assert_eq!(graph.last_day(), Some(d(2025, 1, 6)));
    }

    #[test]
    fn test_empty_project() {
        let project = Project {
            start_date: d(2025, 1, 1),
            people: vec![],
            tasks: vec![],
        };
        let graph = simulate(&project, &CalendarPreset::AllWeekdays).unwrap();
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.last_day(), Some(d(2025, 1, 1)));
        assert!(graph.executions.is_empty());
    }

    #[test]
    fn test_unavailable_owner_stalls() {
        let project = Project {
            start_date: d(2025, 1, 1),
            people: vec![Person {
                id: "ghost".to_string(),
                availability: vec![],
            }],
            tasks: vec![make_task("task", 1.0, &["ghost"], &[])],
        };
        let err = simulate(&project, &CalendarPreset::AllWeekdays).unwrap_err();
        assert_eq!(err, SimulationError::Stalled(vec!["task".to_string()]));
    }

    #[test]
    fn test_iteration_limit() {
        let config = SimulationConfig {
            max_iterations: 1,
            ..SimulationConfig::default()
        };
        let err = simulate_with_config(&sequential_project(), &CalendarPreset::AllWeekdays, config)
            .unwrap_err();
        assert_eq!(
            err,
            SimulationError::IterationLimitExceeded {
                limit: 1,
                unscheduled: vec!["task1".to_string()],
            }
        );
    }

    #[test]
    fn test_wait_skips_owner_that_already_sees_dependencies() {
        // ghost is listed first and free earliest but can never work
        let project = Project {
            start_date: d(2025, 1, 1),
            people: vec![
                make_person("alice", d(2025, 1, 1)),
                make_person("bob", d(2025, 1, 1)),
                Person {
                    id: "ghost".to_string(),
                    availability: vec![],
                },
            ],
            tasks: vec![
                make_task("a", 2.0, &["alice"], &[]),
                make_task("x", 20.0, &["bob"], &[]),
                make_task("b", 1.0, &["ghost", "bob"], &["a"]),
            ],
        };
        let graph = simulate(&project, &CalendarPreset::AllWeekdays).unwrap();

        assert_eq!(execution(&graph, "x").end_day, d(2025, 1, 29));
        let b = execution(&graph, "b");
        assert_eq!(b.person_id.as_deref(), Some("bob"));
        assert_eq!((b.start_day, b.end_day), (d(2025, 1, 29), d(2025, 1, 30)));
        assert_eq!(graph.last_day(), Some(d(2025, 1, 30)));
    }

    #[test]
    fn test_ownerless_task_stalls() {
        let project = Project {
            start_date: d(2025, 1, 1),
            people: vec![make_person("alice", d(2025, 1, 1))],
            tasks: vec![
                make_task("done", 1.0, &["alice"], &[]),
                make_task("orphan", 1.0, &[], &[]),
            ],
        };
        let err = simulate(&project, &CalendarPreset::AllWeekdays).unwrap_err();
        assert_eq!(err, SimulationError::Stalled(vec!["orphan".to_string()]));
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        let mut project = sequential_project();
        project.tasks[0].dependencies = vec!["task2".to_string()];
        project.tasks[1].dependencies = vec!["task1".to_string()];
        assert!(matches!(
            simulate(&project, &CalendarPreset::AllWeekdays),
            Err(SimulationError::InvalidGraph(ProjectGraphError::CircularDependency(_)))
        ));

        let mut project = sequential_project();
        project.tasks[0].owners = vec!["carol".to_string()];
        assert_eq!(
            simulate(&project, &CalendarPreset::AllWeekdays).unwrap_err(),
            SimulationError::UnknownOwner {
                task: "task1".to_string(),
                person: "carol".to_string(),
            }
        );

        let mut project = sequential_project();
        project.people.push(make_person("alice", d(2025, 1, 1)));
        assert_eq!(
            simulate(&project, &CalendarPreset::AllWeekdays).unwrap_err(),
            SimulationError::DuplicatePerson("alice".to_string())
        );
    }
}
