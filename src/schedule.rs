use crate::calendar::HolidayCalendar;
use crate::dates::format_date;
use crate::module::{ModuleDates, ModuleSpec, ScheduledModule};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Module name -> computed boundaries for one class.
pub type ClassDates = BTreeMap<String, ModuleDates>;

/// Gap between the end of one module and the nominal start of the next.
const WEEKS_BETWEEN_MODULES: u32 = 1;

/// The stored state of one class: its modules in insertion order and the
/// date the whole chain hangs from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSchedule {
    name: String,
    modules: Vec<ModuleSpec>,
    anchor_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub module_count: usize,
    pub distinct_modules: usize,
    pub first_start: Option<NaiveDate>,
    pub last_end: Option<NaiveDate>,
    pub holiday_adjusted_count: usize,
    pub starts_on_holiday: usize,
}

impl ScheduleSummary {
    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("modules={}", self.module_count));
        if self.distinct_modules != self.module_count {
            parts.push(format!("distinct={}", self.distinct_modules));
        }
        match (self.first_start, self.last_end) {
            (Some(start), Some(end)) => {
                parts.push(format!("span={}..{}", format_date(start), format_date(end)));
            }
            _ => parts.push("span=unscheduled".to_string()),
        }
        if self.holiday_adjusted_count > 0 {
            parts.push(format!("holiday_shifts={}", self.holiday_adjusted_count));
        }
        if self.starts_on_holiday > 0 {
            parts.push(format!("holiday_starts={}", self.starts_on_holiday));
        }
        parts.join(", ")
    }
}

impl ClassSchedule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modules: Vec::new(),
            anchor_date: None,
        }
    }

    /// Append a module. The first start date ever supplied becomes the
    /// anchor; later ones are stored but ignored by the chain.
    pub fn add_module(
        &mut self,
        name: impl Into<String>,
        start: Option<NaiveDate>,
        duration_weeks: u32,
    ) {
        self.push(ModuleSpec::new(name, start, duration_weeks));
    }

    pub fn push(&mut self, spec: ModuleSpec) {
        if self.anchor_date.is_none() {
            self.anchor_date = spec.requested_start;
        }
        self.modules.push(spec);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn modules(&self) -> &[ModuleSpec] {
        &self.modules
    }

    pub fn anchor_date(&self) -> Option<NaiveDate> {
        self.anchor_date
    }
}

/// Add whole weeks, saturating at the last representable date.
fn add_weeks(date: NaiveDate, weeks: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(weeks) * 7))
        .unwrap_or(NaiveDate::MAX)
}

/// `start + weeks`, pushed forward day by day until it is not a holiday.
/// A missing start stays missing.
pub fn advance_weeks_skipping_holidays(
    start: Option<NaiveDate>,
    weeks: u32,
    calendar: &HolidayCalendar,
) -> Option<NaiveDate> {
    start.map(|date| calendar.next_non_holiday(add_weeks(date, weeks)))
}

/// Walk the module chain from the anchor date.
///
/// Only end dates are moved off holidays. A start date is the previous end
/// plus one week and is used as is, so it can land on a holiday.
pub fn scheduled_modules(
    schedule: &ClassSchedule,
    calendar: &HolidayCalendar,
) -> Vec<ScheduledModule> {
    let Some(mut cursor) = schedule.anchor_date else {
        return Vec::new();
    };

    let mut chain = Vec::with_capacity(schedule.modules.len());
    for spec in &schedule.modules {
        let start_date = cursor;
        let nominal_end = add_weeks(start_date, spec.duration_weeks);
        let end_date = calendar.next_non_holiday(nominal_end);
        chain.push(ScheduledModule {
            name: spec.name.clone(),
            duration_weeks: spec.duration_weeks,
            start_date,
            end_date,
            holiday_shift_days: (end_date - nominal_end).num_days(),
        });
        cursor = add_weeks(end_date, WEEKS_BETWEEN_MODULES);
    }
    chain
}

/// Start and end dates per module name. Later modules sharing a name
/// replace earlier entries, though both still occupy their slot in the chain.
pub fn compute_schedule(schedule: &ClassSchedule, calendar: &HolidayCalendar) -> ClassDates {
    scheduled_modules(schedule, calendar)
        .into_iter()
        .map(|module| {
            let dates = module.dates();
            (module.name, dates)
        })
        .collect()
}

pub fn summarize(schedule: &ClassSchedule, calendar: &HolidayCalendar) -> ScheduleSummary {
    let chain = scheduled_modules(schedule, calendar);
    let distinct: HashSet<&str> = schedule.modules.iter().map(|m| m.name.as_str()).collect();
    ScheduleSummary {
        module_count: schedule.modules.len(),
        distinct_modules: distinct.len(),
        first_start: chain.first().map(|m| m.start_date),
        last_end: chain.last().map(|m| m.end_date),
        holiday_adjusted_count: chain.iter().filter(|m| m.holiday_shift_days > 0).count(),
        starts_on_holiday: chain
            .iter()
            .filter(|m| calendar.is_holiday(m.start_date))
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn add_weeks_saturates_instead_of_overflowing() {
        assert_eq!(add_weeks(d(2024, 7, 1), 2), d(2024, 7, 15));
        assert_eq!(add_weeks(d(2024, 7, 1), u32::MAX), NaiveDate::MAX);
    }

    #[test]
    fn anchor_is_first_supplied_start_only() {
        let mut class = ClassSchedule::new("T");
        class.add_module("A", None, 1);
        assert_eq!(class.anchor_date(), None);
        class.add_module("B", Some(d(2024, 9, 2)), 1);
        class.add_module("C", Some(d(2025, 1, 6)), 1);
        assert_eq!(class.anchor_date(), Some(d(2024, 9, 2)));
        assert_eq!(class.modules()[2].requested_start, Some(d(2025, 1, 6)));
    }

    #[test]
    fn summary_line_mentions_span_and_shifts() {
        let summary = ScheduleSummary {
            module_count: 2,
            distinct_modules: 2,
            first_start: Some(d(2024, 7, 1)),
            last_end: Some(d(2024, 7, 29)),
            holiday_adjusted_count: 1,
            starts_on_holiday: 0,
        };
        assert_eq!(
            summary.to_cli_summary(),
            "modules=2, span=01/07/2024..29/07/2024, holiday_shifts=1"
        );
    }
}
