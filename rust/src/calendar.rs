//! Working-day classification.
//!
//! The simulator and analyzer only ever ask one question of a calendar:
//! does this day count as a working day? Any `Fn(Day) -> bool` answers it,
//! and [`CalendarPreset`] provides the named calendars.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::models::Day;

/// Opaque predicate deciding whether a day is a working day.
pub trait WorkDayClassifier {
    fn is_work_day(&self, day: Day) -> bool;
}

impl<F> WorkDayClassifier for F
where
    F: Fn(Day) -> bool,
{
    fn is_work_day(&self, day: Day) -> bool {
        self(day)
    }
}

/// Named calendars.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CalendarPreset {
    /// Monday through Friday.
    #[default]
    AllWeekdays,
    /// Weekdays minus Nova Scotia statutory holidays.
    NovaScotia,
}

impl CalendarPreset {
    /// Resolve a preset by name. Unknown names fall back to all weekdays.
    pub fn from_name(name: &str) -> Self {
        match name {
            "nova_scotia" => CalendarPreset::NovaScotia,
            _ => CalendarPreset::AllWeekdays,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CalendarPreset::AllWeekdays => "general",
            CalendarPreset::NovaScotia => "nova_scotia",
        }
    }
}

impl WorkDayClassifier for CalendarPreset {
    fn is_work_day(&self, day: Day) -> bool {
        match self {
            CalendarPreset::AllWeekdays => is_weekday(day),
            CalendarPreset::NovaScotia => {
                is_weekday(day) && !nova_scotia_holidays(day.year()).contains(&day)
            }
        }
    }
}

fn is_weekday(day: Day) -> bool {
    !matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}

fn nova_scotia_holidays(year: i32) -> Vec<Day> {
    [
        observed(year, 1, 1),
        nth_weekday(year, 2, Weekday::Mon, 3),
        good_friday(year),
        observed(year, 7, 1),
        nth_weekday(year, 9, Weekday::Mon, 1),
        observed(year, 12, 25),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// A fixed-date holiday, moved to the following Monday when it lands on a weekend.
fn observed(year: i32, month: u32, day: u32) -> Option<Day> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    match date.weekday() {
        Weekday::Sat => date.checked_add_days(Days::new(2)),
        Weekday::Sun => date.checked_add_days(Days::new(1)),
        _ => Some(date),
    }
}

/// The nth occurrence (1-based) of a weekday in a month.
fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u8) -> Option<Day> {
    NaiveDate::from_weekday_of_month_opt(year, month, weekday, n)
}

/// Two days before Easter Sunday (anonymous Gregorian computus).
fn good_friday(year: i32) -> Option<Day> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)?.checked_sub_days(Days::new(2))
}

/// The first working day strictly after `day`, scanning at most `max_scan` days.
pub fn next_work_day<C>(classifier: &C, day: Day, max_scan: u32) -> Option<Day>
where
    C: WorkDayClassifier + ?Sized,
{
    let mut current = day;
    for _ in 0..max_scan {
        current = current.succ_opt()?;
        if classifier.is_work_day(current) {
            return Some(current);
        }
    }
    None
}

/// Advance `start` by `work_days` working days.
///
/// Non-working days advance the calendar without consuming any of the count.
/// Returns `None` if a gap of more than `max_scan` days between working days
/// is encountered.
pub fn add_work_days<C>(classifier: &C, start: Day, work_days: u64, max_scan: u32) -> Option<Day>
where
    C: WorkDayClassifier + ?Sized,
{
    let mut current = start;
    for _ in 0..work_days {
        current = next_work_day(classifier, current, max_scan)?;
    }
    Some(current)
}
