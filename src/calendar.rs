use crate::dates::{self, DateParseError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Holidays observed by the training calendar, in `dd/mm/yyyy`.
const DEFAULT_HOLIDAYS: [&str; 20] = [
    "12/02/2024",
    "13/02/2024",
    "14/02/2024",
    "19/03/2024",
    "25/03/2024",
    "29/03/2024",
    "21/04/2024",
    "01/05/2024",
    "30/05/2024",
    "15/08/2024",
    "07/09/2024",
    "12/10/2024",
    "02/11/2024",
    "15/11/2024",
    "24/12/2024",
    "25/12/2024",
    "26/12/2024",
    "27/12/2024",
    "28/12/2024",
    "29/12/2024",
];

/// An immutable set of dates that may not serve as a module boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct HolidayCalendar {
    holidays: HashSet<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayCalendarConfig {
    holidays: Vec<HolidayDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
struct HolidayDate(#[serde(with = "dates::serde_format")] NaiveDate);

impl Default for HolidayCalendar {
    fn default() -> Self {
        let config = HolidayCalendarConfig::from_strings(DEFAULT_HOLIDAYS)
            .expect("built-in holiday list is well formed");
        Self::from_config(&config)
    }
}

impl HolidayCalendar {
    pub fn custom<I>(holidays: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        Self {
            holidays: holidays.into_iter().collect(),
        }
    }

    pub fn from_config(config: &HolidayCalendarConfig) -> Self {
        Self::custom(config.holidays())
    }

    pub fn to_config(&self) -> HolidayCalendarConfig {
        HolidayCalendarConfig::from(self)
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    /// First date on or after `date` that is not a holiday.
    ///
    /// Scans forward one day at a time and never looks backwards. When every
    /// day from `date` through `NaiveDate::MAX` is a holiday there is no later
    /// date to move to, and `NaiveDate::MAX` is returned even though it is a
    /// holiday. This is the only case where the result can be a holiday.
    pub fn next_non_holiday(&self, date: NaiveDate) -> NaiveDate {
        let mut current = date;
        while self.is_holiday(current) {
            match current.succ_opt() {
                Some(next) => current = next,
                None => break,
            }
        }
        current
    }

    /// Holidays in ascending order.
    pub fn holidays(&self) -> Vec<NaiveDate> {
        let mut holidays: Vec<NaiveDate> = self.holidays.iter().copied().collect();
        holidays.sort();
        holidays
    }

    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }
}

impl HolidayCalendarConfig {
    pub fn new<I>(holidays: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let mut holidays: Vec<HolidayDate> = holidays.into_iter().map(HolidayDate).collect();
        holidays.sort();
        holidays.dedup();
        Self { holidays }
    }

    /// Build a config from `dd/mm/yyyy` literals, failing on the first bad entry.
    pub fn from_strings<I, S>(holidays: I) -> Result<Self, DateParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = holidays
            .into_iter()
            .map(|raw| dates::parse_date(raw.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(parsed))
    }

    pub fn holidays(&self) -> Vec<NaiveDate> {
        self.holidays.iter().map(|holiday| holiday.0).collect()
    }
}

impl Default for HolidayCalendarConfig {
    fn default() -> Self {
        HolidayCalendarConfig::from(&HolidayCalendar::default())
    }
}

impl From<&HolidayCalendar> for HolidayCalendarConfig {
    fn from(calendar: &HolidayCalendar) -> Self {
        HolidayCalendarConfig::new(calendar.holidays.iter().copied())
    }
}
