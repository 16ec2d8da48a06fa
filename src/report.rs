//! Tabular views of the registry, used by the CLI.

use crate::dates::format_date;
use crate::registry::ScheduleRegistry;
use polars::prelude::PlSmallStr;
use polars::prelude::*;

/// One row per added module, classes in name order and modules in chain order.
/// Classes without an anchor date contribute no rows.
pub fn schedules_dataframe(registry: &ScheduleRegistry) -> PolarsResult<DataFrame> {
    let mut classes: Vec<String> = Vec::new();
    let mut modules: Vec<String> = Vec::new();
    let mut weeks: Vec<i64> = Vec::new();
    let mut starts: Vec<String> = Vec::new();
    let mut ends: Vec<String> = Vec::new();
    let mut shifts: Vec<i64> = Vec::new();

    for class_name in registry.class_names() {
        let chain = registry.class_chain(&class_name).unwrap_or_default();
        for module in chain {
            classes.push(class_name.clone());
            modules.push(module.name);
            weeks.push(i64::from(module.duration_weeks));
            starts.push(format_date(module.start_date));
            ends.push(format_date(module.end_date));
            shifts.push(module.holiday_shift_days);
        }
    }

    DataFrame::new(vec![
        Series::new(PlSmallStr::from_static("class"), classes).into_column(),
        Series::new(PlSmallStr::from_static("module"), modules).into_column(),
        Series::new(PlSmallStr::from_static("weeks"), weeks).into_column(),
        Series::new(PlSmallStr::from_static("start_date"), starts).into_column(),
        Series::new(PlSmallStr::from_static("end_date"), ends).into_column(),
        Series::new(PlSmallStr::from_static("holiday_shift_days"), shifts).into_column(),
    ])
}

/// Rows of `df` belonging to one class.
pub fn filter_class(df: &DataFrame, class_name: &str) -> PolarsResult<DataFrame> {
    df.clone()
        .lazy()
        .filter(col("class").eq(lit(class_name)))
        .collect()
}

fn cell_text(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::String(s) => s.to_string(),
        other => other.to_string(),
    }
}

pub fn render_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(df.height());
    for row_idx in 0..df.height() {
        let row = columns
            .iter()
            .map(|col| col.get(row_idx).map(|av| cell_text(&av)).unwrap_or_default())
            .collect();
        rows.push(row);
    }

    let mut widths: Vec<usize> = col_names.iter().map(|n| n.chars().count()).collect();
    for row in &rows {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let render_row = |cells: &[String]| {
        let mut line = String::from("|");
        for (ci, cell) in cells.iter().enumerate() {
            let pad = widths[ci].saturating_sub(cell.chars().count());
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(pad));
            line.push_str(" |");
        }
        line
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_row(col_names.as_slice()));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in &rows {
        out.push_str(&render_row(row.as_slice()));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}
