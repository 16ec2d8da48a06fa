pub mod calendar;
pub mod config;
pub mod dates;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod import;
pub mod logging;
pub mod module;
pub mod registry;
pub mod report;
pub mod schedule;

pub use calendar::{HolidayCalendar, HolidayCalendarConfig};
pub use config::{AppConfig, ConfigError};
pub use dates::{DATE_FORMAT, DateParseError, format_date, parse_date, parse_optional_date};
pub use import::{ImportError, load_modules_from_csv, read_modules_csv};
pub use module::{ModuleDates, ModuleInput, ModuleSpec, ScheduledModule};
pub use registry::{AddModulesOutcome, ScheduleRegistry};
pub use report::{render_text_table, schedules_dataframe};
pub use schedule::{
    ClassDates, ClassSchedule, ScheduleSummary, advance_weeks_skipping_holidays,
    compute_schedule, scheduled_modules, summarize,
};
