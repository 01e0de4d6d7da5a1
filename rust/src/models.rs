//! Core data types for the project model.

use chrono::NaiveDate;
use pyo3::prelude::*;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A calendar date. Ordering is year, then month, then day.
pub type Day = NaiveDate;

/// Three-point effort estimate in days.
#[pyclass]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct TaskEstimate {
    #[pyo3(get, set)]
    pub min: f64,
    #[pyo3(get, set)]
    pub max: f64,
    #[pyo3(get, set)]
    pub expected: f64,
}

#[pymethods]
impl TaskEstimate {
    #[new]
    fn new(min: f64, max: f64, expected: f64) -> Self {
        Self { min, max, expected }
    }

    fn __repr__(&self) -> String {
        format!(
            "TaskEstimate(min={}, max={}, expected={})",
            self.min, self.max, self.expected
        )
    }
}

impl TaskEstimate {
    /// Estimate where min, max and expected are all `days`.
    pub fn exact(days: f64) -> Self {
        Self {
            min: days,
            max: days,
            expected: days,
        }
    }

    /// PERT weighted average: `(min + max + 4 * expected) / 6`.
    pub fn pert(&self) -> f64 {
        (self.min + self.max + 4.0 * self.expected) / 6.0
    }
}

/// Progress of a task, also used for the project as a whole.
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    #[default]
    NotStarted,
    InProgress,
    Complete,
}

/// Project status shares the task vocabulary.
pub type ProjectStatus = TaskStatus;

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "not-started",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Complete => "complete",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown task status: {0:?}")]
pub struct UnknownStatus(pub String);

impl FromStr for TaskStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not-started" => Ok(TaskStatus::NotStarted),
            "in-progress" => Ok(TaskStatus::InProgress),
            "complete" => Ok(TaskStatus::Complete),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// A unit of work in the breakdown structure.
///
/// `owners` are alternatives: any one of them may perform the task.
/// Every id in `dependencies` must complete before the task may start.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub summary: String,
    #[pyo3(get, set)]
    pub description: String,
    #[pyo3(get, set)]
    pub estimate: TaskEstimate,
    #[pyo3(get, set)]
    pub status: TaskStatus,
    #[pyo3(get, set)]
    pub owners: Vec<String>,
    #[pyo3(get, set)]
    pub dependencies: Vec<String>,
}

#[pymethods]
impl Task {
    #[new]
    #[pyo3(signature = (
        id,
        estimate,
        owners,
        dependencies,
        status=TaskStatus::NotStarted,
        summary=None,
        description=None
    ))]
    fn new(
        id: String,
        estimate: TaskEstimate,
        owners: Vec<String>,
        dependencies: Vec<String>,
        status: TaskStatus,
        summary: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            id,
            summary: summary.unwrap_or_default(),
            description: description.unwrap_or_default(),
            estimate,
            status,
            owners,
            dependencies,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Task(id={:?}, status={}, owners={:?}, deps={})",
            self.id,
            self.status,
            self.owners,
            self.dependencies.len()
        )
    }
}

impl Task {
    pub fn pert_estimate(&self) -> f64 {
        self.estimate.pert()
    }
}

/// A date range during which a person can work a fixed number of hours per day.
#[pyclass]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AvailabilityWindow {
    #[pyo3(get, set)]
    pub start_date: Day,
    /// Inclusive.
    #[pyo3(get, set)]
    pub end_date: Day,
    #[pyo3(get, set)]
    pub hours_per_day: f64,
}

#[pymethods]
impl AvailabilityWindow {
    #[new]
    fn new(start_date: Day, end_date: Day, hours_per_day: f64) -> Self {
        Self {
            start_date,
            end_date,
            hours_per_day,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "AvailabilityWindow({} to {} at {} hours)",
            self.start_date, self.end_date, self.hours_per_day
        )
    }
}

impl AvailabilityWindow {
    pub fn contains(&self, day: Day) -> bool {
        self.start_date <= day && day <= self.end_date
    }
}

/// Errors from parsing `"YYYY-MM-DD to YYYY-MM-DD at N hours"`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityParseError {
    #[error("Invalid availability format: {0:?}. Expected \"YYYY-MM-DD to YYYY-MM-DD at # hours\"")]
    Format(String),
    #[error("Invalid date format: {0:?}. Expected YYYY-MM-DD")]
    Date(String),
    #[error("Invalid hours value: {0:?}")]
    Hours(String),
}

fn parse_day(text: &str) -> Result<Day, AvailabilityParseError> {
    let well_formed = text.len() == 10
        && text
            .char_indices()
            .all(|(i, c)| if i == 4 || i == 7 { c == '-' } else { c.is_ascii_digit() });
    if !well_formed {
        return Err(AvailabilityParseError::Date(text.to_string()));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| AvailabilityParseError::Date(text.to_string()))
}

impl FromStr for AvailabilityWindow {
    type Err = AvailabilityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_err = || AvailabilityParseError::Format(s.to_string());

        let (start, rest) = s.split_once(" to ").ok_or_else(format_err)?;
        let (end, rest) = rest.split_once(" at ").ok_or_else(format_err)?;
        let hours = rest
            .strip_suffix(" hours")
            .or_else(|| rest.strip_suffix(" hour"))
            .ok_or_else(format_err)?;

        if hours.is_empty() || !hours.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Err(AvailabilityParseError::Hours(hours.to_string()));
        }
        let hours_per_day: f64 = hours
            .parse()
            .map_err(|_| AvailabilityParseError::Hours(hours.to_string()))?;

        Ok(Self {
            start_date: parse_day(start)?,
            end_date: parse_day(end)?,
            hours_per_day,
        })
    }
}

/// Someone who can own tasks.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct Person {
    #[pyo3(get, set)]
    pub id: String,
    /// Not validated for overlap; on any day the first matching window wins.
    #[pyo3(get, set)]
    pub availability: Vec<AvailabilityWindow>,
}

#[pymethods]
impl Person {
    #[new]
    #[pyo3(signature = (id, availability=Vec::new()))]
    fn new(id: String, availability: Vec<AvailabilityWindow>) -> Self {
        Self { id, availability }
    }

    fn __repr__(&self) -> String {
        format!(
            "Person(id={:?}, windows={})",
            self.id,
            self.availability.len()
        )
    }
}

impl Person {
    /// Hours available on `day`, from the first window covering it.
    pub fn hours_on(&self, day: Day) -> f64 {
        self.availability
            .iter()
            .find(|window| window.contains(day))
            .map_or(0.0, |window| window.hours_per_day)
    }
}

/// Immutable input to the float calculator, simulator and analyzer.
///
/// People and tasks keep their declaration order, which drives every
/// tie-break in the simulation.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct Project {
    #[pyo3(get, set)]
    pub start_date: Day,
    #[pyo3(get, set)]
    pub people: Vec<Person>,
    #[pyo3(get, set)]
    pub tasks: Vec<Task>,
}

#[pymethods]
impl Project {
    #[new]
    #[pyo3(signature = (start_date, people=Vec::new(), tasks=Vec::new()))]
    fn new(start_date: Day, people: Vec<Person>, tasks: Vec<Task>) -> Self {
        Self {
            start_date,
            people,
            tasks,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Project(start_date={}, people={}, tasks={})",
            self.start_date,
            self.people.len(),
            self.tasks.len()
        )
    }
}

/// Summary metrics derived by the analyzer.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectSummary {
    #[pyo3(get)]
    pub status: ProjectStatus,
    /// Sum of PERT estimates along the critical path.
    #[pyo3(get)]
    pub total_estimated_days: f64,
    #[pyo3(get)]
    pub estimated_completion_date: Day,
    #[pyo3(get)]
    pub completion_percentage: u32,
    #[pyo3(get)]
    pub critical_path: Vec<String>,
    /// Latest checkpoint day, when a simulation was supplied.
    #[pyo3(get)]
    pub simulated_completion_date: Option<Day>,
}

#[pymethods]
impl ProjectSummary {
    fn __repr__(&self) -> String {
        format!(
            "ProjectSummary(status={}, total_estimated_days={}, estimated_completion_date={}, completion_percentage={})",
            self.status,
            self.total_estimated_days,
            self.estimated_completion_date,
            self.completion_percentage
        )
    }
}
