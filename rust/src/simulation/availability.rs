//! Finish-day search for one person working one task.

use crate::calendar::{next_work_day, WorkDayClassifier};
use crate::config::SimulationConfig;
use crate::log_debug;
use crate::models::{Day, Person};

/// Day on which `person` finishes `effort` days of work started on `start`.
///
/// Each visited day retires `hours_on(day) / nominal_hours_per_day` days of
/// effort, then the search moves to the next working day. The start day is
/// visited even when it is not a working day. The returned day is the working
/// day after the last one worked, so a zero-effort task finishes on `start`.
///
/// Returns `None` when the effort is not covered within
/// `max_work_days_per_attempt` visited days.
pub fn finish_day<C>(
    person: &Person,
    classifier: &C,
    start: Day,
    effort: f64,
    config: &SimulationConfig,
) -> Option<Day>
where
    C: WorkDayClassifier + ?Sized,
{
    let mut end = start;
    let mut burned = 0.0;
    let mut visited = 0;

    while burned < effort && visited < config.max_work_days_per_attempt {
        let hours = person.hours_on(end);
        burned += hours / config.nominal_hours_per_day;
        log_debug!(
            config.verbosity,
            "{} on {}: {:.2}h, {:.2}/{:.2} days",
            person.id,
            end,
            hours,
            burned,
            effort
        );
        end = next_work_day(classifier, end, config.max_calendar_scan_days)?;
        visited += 1;
    }

    if burned >= effort {
        Some(end)
    } else {
        None
    }
}
