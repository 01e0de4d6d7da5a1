//! Resource-constrained project scheduling and critical-path analysis.
//!
//! Given tasks with dependencies, three-point estimates and candidate owners,
//! plus per-person availability, this crate computes CPM floats, simulates
//! who does what and when, and summarizes the project.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::collections::HashMap;


pub mod analyzer;
pub mod calendar;
mod config;
pub mod cpm;
pub mod graph;
pub mod interner;
pub mod logging;
mod models;
pub mod simulation;

pub use analyzer::{analyze_project, AnalysisError, ProjectAnalyzer};
pub use calendar::{CalendarPreset, WorkDayClassifier};
pub use config::SimulationConfig;
pub use cpm::{calculate_floats, calculate_timings, TaskTiming};
pub use graph::{ProjectGraph, ProjectGraphError};
pub use models::{
    AvailabilityParseError, AvailabilityWindow, Day, Person, Project, ProjectStatus,
    ProjectSummary, Task, TaskEstimate, TaskStatus,
};
pub use simulation::{
    optimize, simulate, simulate_with_config, Checkpoint, CheckpointGraph, ExecutionKind,
    SimulationError, Simulator, TaskExecution,
};

fn to_py_err(e: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Compute the rounded CPM float of every task.
///
/// # Raises
/// * ValueError if a dependency is unknown or circular
#[pyfunction]
#[pyo3(name = "calculate_floats")]
fn py_calculate_floats(tasks: Vec<Task>) -> PyResult<HashMap<String, i64>> {
    calculate_floats(&tasks)
        .map(|floats| floats.into_iter().collect())
        .map_err(to_py_err)
}

/// Simulate a project and return the optimized checkpoint graph.
///
/// # Arguments
/// * `project` - The project to simulate
/// * `calendar` - Calendar preset name ("general" or "nova_scotia")
/// * `config` - Optional simulation bounds and verbosity
///
/// # Raises
/// * ValueError on invalid input or when the simulation cannot finish
#[pyfunction]
#[pyo3(name = "simulate", signature = (project, calendar="general", config=None))]
fn py_simulate(
    project: Project,
    calendar: &str,
    config: Option<SimulationConfig>,
) -> PyResult<CheckpointGraph> {
    let preset = CalendarPreset::from_name(calendar);
    let config = config.unwrap_or_default();
    log_changes!(
        config.verbosity,
        "Simulating {} tasks on the {} calendar",
        project.tasks.len(),
        preset.name()
    );
    simulate_with_config(&project, &preset, config).map_err(to_py_err)
}

/// Summarize a project, optionally with a simulation of it.
#[pyfunction]
#[pyo3(name = "analyze_project", signature = (project, calendar="general", simulation=None))]
fn py_analyze_project(
    project: Project,
    calendar: &str,
    simulation: Option<CheckpointGraph>,
) -> PyResult<ProjectSummary> {
    let preset = CalendarPreset::from_name(calendar);
    analyze_project(&project, &preset, simulation.as_ref()).map_err(to_py_err)
}

/// Parse `"YYYY-MM-DD to YYYY-MM-DD at N hours"`.
#[pyfunction]
fn parse_availability(text: &str) -> PyResult<AvailabilityWindow> {
    text.parse::<AvailabilityWindow>().map_err(to_py_err)
}

/// The crewplan.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Project model
    m.add_class::<TaskEstimate>()?;
    m.add_class::<TaskStatus>()?;
    m.add_class::<Task>()?;
    m.add_class::<AvailabilityWindow>()?;
    m.add_class::<Person>()?;
    m.add_class::<Project>()?;

    // Results
    m.add_class::<Checkpoint>()?;
    m.add_class::<TaskExecution>()?;
    m.add_class::<CheckpointGraph>()?;
    m.add_class::<ProjectSummary>()?;

    // Config types
    m.add_class::<SimulationConfig>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(py_calculate_floats, m)?)?;
    m.add_function(wrap_pyfunction!(py_simulate, m)?)?;
    m.add_function(wrap_pyfunction!(py_analyze_project, m)?)?;
    m.add_function(wrap_pyfunction!(parse_availability, m)?)?;

    Ok(())
}
