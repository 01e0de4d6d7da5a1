//! Configuration for the simulator and analyzer.

use pyo3::prelude::*;

/// Bounds and knobs for a simulation run.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Main-loop iterations before the run is declared non-terminating.
    #[pyo3(get, set)]
    pub max_iterations: usize,
    /// Working days examined per owner when searching for a finish day.
    #[pyo3(get, set)]
    pub max_work_days_per_attempt: u32,
    /// Hours of availability that retire one day of estimated effort.
    #[pyo3(get, set)]
    pub nominal_hours_per_day: f64,
    /// Calendar days scanned when looking for the next working day.
    #[pyo3(get, set)]
    pub max_calendar_scan_days: u32,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            max_work_days_per_attempt: 100,
            nominal_hours_per_day: 8.0,
            max_calendar_scan_days: 366,
            verbosity: 0,
        }
    }
}

#[pymethods]
impl SimulationConfig {
    #[new]
    #[pyo3(signature = (
        max_iterations=None,
        max_work_days_per_attempt=None,
        nominal_hours_per_day=None,
        max_calendar_scan_days=None,
        verbosity=None
    ))]
    fn new(
        max_iterations: Option<usize>,
        max_work_days_per_attempt: Option<u32>,
        nominal_hours_per_day: Option<f64>,
        max_calendar_scan_days: Option<u32>,
        verbosity: Option<u8>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            max_iterations: max_iterations.unwrap_or(defaults.max_iterations),
            max_work_days_per_attempt: max_work_days_per_attempt
                .unwrap_or(defaults.max_work_days_per_attempt),
            nominal_hours_per_day: nominal_hours_per_day
                .unwrap_or(defaults.nominal_hours_per_day),
            max_calendar_scan_days: max_calendar_scan_days
                .unwrap_or(defaults.max_calendar_scan_days),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "SimulationConfig(max_iterations={}, max_work_days_per_attempt={}, nominal_hours_per_day={}, verbosity={})",
            self.max_iterations,
            self.max_work_days_per_attempt,
            self.nominal_hours_per_day,
            self.verbosity
        )
    }
}
