use chrono::{Duration, NaiveDate};
use turma_schedule::{
    ClassSchedule, HolidayCalendar, advance_weeks_skipping_holidays, compute_schedule,
    scheduled_modules, summarize,
};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn single_module_spans_its_weeks() {
    let cal = HolidayCalendar::default();
    let mut class = ClassSchedule::new("Turma1");
    class.add_module("Mod1", Some(d(2024, 7, 1)), 2);

    let dates = compute_schedule(&class, &cal);
    assert_eq!(dates.len(), 1);
    assert_eq!(dates["Mod1"].start_date, d(2024, 7, 1));
    assert_eq!(dates["Mod1"].end_date, d(2024, 7, 15));
}

#[test]
fn next_module_starts_one_week_after_previous_end() {
    let cal = HolidayCalendar::default();
    let mut class = ClassSchedule::new("Turma1");
    class.add_module("Mod1", Some(d(2024, 7, 1)), 2);
    class.add_module("Mod2", None, 1);

    let dates = compute_schedule(&class, &cal);
    assert_eq!(dates["Mod2"].start_date, d(2024, 7, 22));
    assert_eq!(dates["Mod2"].end_date, d(2024, 7, 29));
}

#[test]
fn end_date_on_holiday_moves_day_by_day() {
    let cal = HolidayCalendar::default();
    let mut class = ClassSchedule::new("Turma1");
    // 11/12 + 2 weeks = 25/12, and 26/12..29/12 are holidays too.
    class.add_module("Mod1", Some(d(2024, 12, 11)), 2);

    let chain = scheduled_modules(&class, &cal);
    assert_eq!(chain[0].end_date, d(2024, 12, 30));
    assert_eq!(chain[0].holiday_shift_days, 5);
}

#[test]
fn start_date_may_fall_on_holiday() {
    // Only end dates are adjusted: 08/08 + 1 week is the 15/08 holiday and
    // the next module starts there anyway.
    let cal = HolidayCalendar::default();
    let mut class = ClassSchedule::new("Turma1");
    class.add_module("Mod1", Some(d(2024, 7, 25)), 2);
    class.add_module("Mod2", None, 1);

    let dates = compute_schedule(&class, &cal);
    assert_eq!(dates["Mod1"].end_date, d(2024, 8, 8));
    assert_eq!(dates["Mod2"].start_date, d(2024, 8, 15));
    assert!(cal.is_holiday(dates["Mod2"].start_date));
    assert_eq!(dates["Mod2"].end_date, d(2024, 8, 22));

    assert_eq!(summarize(&class, &cal).starts_on_holiday, 1);
}

#[test]
fn anchor_on_holiday_is_kept_as_start() {
    let cal = HolidayCalendar::default();
    let mut class = ClassSchedule::new("Turma1");
    class.add_module("Mod1", Some(d(2024, 5, 1)), 0);

    let dates = compute_schedule(&class, &cal);
    assert_eq!(dates["Mod1"].start_date, d(2024, 5, 1));
    assert_eq!(dates["Mod1"].end_date, d(2024, 5, 2));
}

#[test]
fn zero_weeks_ends_on_start_when_not_holiday() {
    let cal = HolidayCalendar::default();
    let mut class = ClassSchedule::new("Turma1");
    class.add_module("Intro", Some(d(2024, 6, 3)), 0);
    class.add_module("Next", None, 0);

    let dates = compute_schedule(&class, &cal);
    assert_eq!(dates["Intro"].start_date, dates["Intro"].end_date);
    assert_eq!(dates["Next"].start_date, d(2024, 6, 10));
    assert_eq!(dates["Next"].end_date, d(2024, 6, 10));
}

#[test]
fn without_any_start_date_nothing_is_scheduled() {
    let cal = HolidayCalendar::default();
    let mut class = ClassSchedule::new("Turma1");
    class.add_module("Mod1", None, 2);
    class.add_module("Mod2", None, 3);

    assert!(compute_schedule(&class, &cal).is_empty());
    assert!(scheduled_modules(&class, &cal).is_empty());
    assert_eq!(summarize(&class, &cal).to_cli_summary(), "modules=2, span=unscheduled");
}

#[test]
fn later_start_dates_are_overridden_by_the_chain() {
    let cal = HolidayCalendar::default();
    let mut class = ClassSchedule::new("Turma1");
    class.add_module("Mod1", None, 1);
    class.add_module("Mod2", Some(d(2024, 7, 1)), 1);
    class.add_module("Mod3", Some(d(2030, 1, 7)), 1);

    let dates = compute_schedule(&class, &cal);
    // The first supplied date anchors the first module in sequence.
    assert_eq!(dates["Mod1"].start_date, d(2024, 7, 1));
    assert_eq!(dates["Mod2"].start_date, d(2024, 7, 15));
    assert_eq!(dates["Mod3"].start_date, d(2024, 7, 29));
}

#[test]
fn duplicate_names_keep_the_last_entry() {
    let cal = HolidayCalendar::default();
    let mut class = ClassSchedule::new("Turma1");
    class.add_module("A", Some(d(2024, 7, 1)), 1);
    class.add_module("B", None, 1);
    class.add_module("A", None, 2);

    let dates = compute_schedule(&class, &cal);
    assert_eq!(dates.len(), 2);
    assert_eq!(dates["B"].start_date, d(2024, 7, 15));
    assert_eq!(dates["A"].start_date, d(2024, 7, 29));
    assert_eq!(dates["A"].end_date, d(2024, 8, 12));
    assert_eq!(scheduled_modules(&class, &cal).len(), 3);

    let summary = summarize(&class, &cal);
    assert_eq!(summary.module_count, 3);
    assert_eq!(summary.distinct_modules, 2);
}

#[test]
fn chain_invariants_hold_across_the_holiday_season() {
    let cal = HolidayCalendar::default();
    let mut class = ClassSchedule::new("Long");
    class.add_module("M0", Some(d(2024, 1, 29)), 2);
    for (idx, weeks) in [0, 1, 3, 2, 0, 4, 1, 2, 5, 1, 0, 3].into_iter().enumerate() {
        class.add_module(format!("M{}", idx + 1), None, weeks);
    }

    let chain = scheduled_modules(&class, &cal);
    assert_eq!(chain.len(), 13);
    for (idx, module) in chain.iter().enumerate() {
        assert!(!cal.is_holiday(module.end_date), "{} ends on a holiday", module.name);
        assert!(module.end_date >= module.start_date);
        let nominal = module.start_date + Duration::weeks(i64::from(module.duration_weeks));
        if module.end_date == module.start_date {
            assert_eq!(module.duration_weeks, 0);
        }
        assert_eq!(module.end_date - nominal, Duration::days(module.holiday_shift_days));
        if idx > 0 {
            assert_eq!(module.start_date, chain[idx - 1].end_date + Duration::days(7));
        }
    }
}

#[test]
fn computing_twice_gives_identical_results() {
    let cal = HolidayCalendar::default();
    let mut class = ClassSchedule::new("Turma1");
    class.add_module("Mod1", Some(d(2024, 3, 11)), 2);
    class.add_module("Mod2", None, 1);

    let first = compute_schedule(&class, &cal);
    let second = compute_schedule(&class, &cal);
    assert_eq!(first, second);
    // The stored specs are left untouched.
    assert_eq!(class.modules()[1].requested_start, None);
}

#[test]
fn advance_propagates_missing_start() {
    let cal = HolidayCalendar::default();
    assert_eq!(advance_weeks_skipping_holidays(None, 3, &cal), None);
    assert_eq!(
        advance_weeks_skipping_holidays(Some(d(2024, 3, 4)), 3, &cal),
        Some(d(2024, 3, 26))
    );
}

#[test]
fn huge_durations_do_not_panic() {
    let cal = HolidayCalendar::default();
    let mut class = ClassSchedule::new("Turma1");
    class.add_module("Forever", Some(d(2024, 7, 1)), u32::MAX);
    class.add_module("After", None, 1);

    let dates = compute_schedule(&class, &cal);
    assert_eq!(dates["Forever"].end_date, NaiveDate::MAX);
    assert_eq!(dates["After"].start_date, NaiveDate::MAX);
}
