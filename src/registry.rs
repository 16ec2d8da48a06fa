use crate::calendar::HolidayCalendar;
use crate::module::{ModuleInput, ScheduledModule};
use crate::schedule::{self, ClassDates, ClassSchedule, ScheduleSummary};
use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Every class known to the running application, keyed by class name,
/// together with the holiday calendar they are scheduled against.
///
/// Built once at startup and handed to whoever serves requests.
#[derive(Debug, Clone, Default)]
pub struct ScheduleRegistry {
    classes: HashMap<String, ClassSchedule>,
    calendar: HolidayCalendar,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddModulesOutcome {
    pub class_name: String,
    pub added: usize,
    pub created_class: bool,
}

impl AddModulesOutcome {
    /// Confirmation text shown to the user after a successful submission.
    pub fn notice(&self) -> String {
        format!("Modules added to class {}", self.class_name)
    }
}

impl ScheduleRegistry {
    pub fn new(calendar: HolidayCalendar) -> Self {
        Self {
            classes: HashMap::new(),
            calendar,
        }
    }

    pub fn calendar(&self) -> &HolidayCalendar {
        &self.calendar
    }

    fn class_entry(&mut self, class_name: &str) -> (&mut ClassSchedule, bool) {
        let created = !self.classes.contains_key(class_name);
        if created {
            tracing::info!(class = class_name, "creating class");
        }
        let class = self
            .classes
            .entry(class_name.to_string())
            .or_insert_with(|| ClassSchedule::new(class_name));
        (class, created)
    }

    /// Append submitted modules to a class, creating the class on first use.
    /// Start dates that fail to parse are dropped, not reported.
    pub fn add_modules_to_class(
        &mut self,
        class_name: &str,
        modules: Vec<ModuleInput>,
    ) -> AddModulesOutcome {
        let (class, created_class) = self.class_entry(class_name);
        let added = modules.len();
        for input in modules {
            let spec = input.into_spec();
            tracing::debug!(
                class = class_name,
                module = %spec.name,
                weeks = spec.duration_weeks,
                start = ?spec.requested_start,
                "adding module"
            );
            class.push(spec);
        }
        AddModulesOutcome {
            class_name: class_name.to_string(),
            added,
            created_class,
        }
    }

    pub fn add_module(
        &mut self,
        class_name: &str,
        module_name: impl Into<String>,
        start: Option<NaiveDate>,
        duration_weeks: u32,
    ) -> AddModulesOutcome {
        let (class, created_class) = self.class_entry(class_name);
        class.add_module(module_name, start, duration_weeks);
        AddModulesOutcome {
            class_name: class_name.to_string(),
            added: 1,
            created_class,
        }
    }

    /// Computed dates for every class. Classes that never received a start
    /// date map to an empty set of modules.
    pub fn all_schedules(&self) -> BTreeMap<String, ClassDates> {
        self.classes
            .par_iter()
            .map(|(name, class)| {
                (
                    name.clone(),
                    schedule::compute_schedule(class, &self.calendar),
                )
            })
            .collect()
    }

    pub fn class(&self, name: &str) -> Option<&ClassSchedule> {
        self.classes.get(name)
    }

    pub fn class_schedule(&self, name: &str) -> Option<ClassDates> {
        self.class(name)
            .map(|class| schedule::compute_schedule(class, &self.calendar))
    }

    pub fn class_chain(&self, name: &str) -> Option<Vec<ScheduledModule>> {
        self.class(name)
            .map(|class| schedule::scheduled_modules(class, &self.calendar))
    }

    pub fn class_summary(&self, name: &str) -> Option<ScheduleSummary> {
        self.class(name)
            .map(|class| schedule::summarize(class, &self.calendar))
    }

    /// Class names in ascending order.
    pub fn class_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.classes.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
