use crate::dates;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A module as submitted for a class: a name, an optional requested start
/// and a length in weeks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSpec {
    pub name: String,
    /// Start date supplied by the caller. Only the first one seen in a class
    /// matters; every other module is placed by the chain.
    pub requested_start: Option<NaiveDate>,
    pub duration_weeks: u32,
}

impl ModuleSpec {
    pub fn new(
        name: impl Into<String>,
        requested_start: Option<NaiveDate>,
        duration_weeks: u32,
    ) -> Self {
        Self {
            name: name.into(),
            requested_start,
            duration_weeks,
        }
    }
}

/// Wire form of a module, before its start date has been parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleInput {
    pub module_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "dates::lenient_weeks::deserialize")]
    pub duration_weeks: u32,
}

impl ModuleInput {
    pub fn new(
        module_name: impl Into<String>,
        start_date: Option<&str>,
        duration_weeks: u32,
    ) -> Self {
        Self {
            module_name: module_name.into(),
            start_date: start_date.map(str::to_string),
            duration_weeks,
        }
    }

    /// Convert to a spec. An unparsable start date is treated as absent.
    pub fn into_spec(self) -> ModuleSpec {
        let requested_start = dates::parse_optional_date(self.start_date.as_deref());
        ModuleSpec::new(self.module_name, requested_start, self.duration_weeks)
    }
}

/// Computed boundaries of one module, as exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDates {
    #[serde(with = "dates::serde_format")]
    pub start_date: NaiveDate,
    #[serde(with = "dates::serde_format")]
    pub end_date: NaiveDate,
}

/// One link of a computed chain, in the order the module was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledModule {
    pub name: String,
    pub duration_weeks: u32,
    #[serde(with = "dates::serde_format")]
    pub start_date: NaiveDate,
    #[serde(with = "dates::serde_format")]
    pub end_date: NaiveDate,
    /// Days the end date was pushed forward to clear holidays.
    pub holiday_shift_days: i64,
}

impl ScheduledModule {
    pub fn dates(&self) -> ModuleDates {
        ModuleDates {
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}
