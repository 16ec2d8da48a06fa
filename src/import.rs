use crate::dates::lenient_weeks;
use crate::module::ModuleInput;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: module_name is empty")]
    MissingName { row: usize },
}

pub type ImportResult<T> = Result<T, ImportError>;

#[derive(Debug, Deserialize)]
struct ModuleCsvRecord {
    module_name: String,
    #[serde(default)]
    start_date: String,
    #[serde(default)]
    duration_weeks: String,
}

impl ModuleCsvRecord {
    fn into_input(self, row: usize) -> ImportResult<ModuleInput> {
        let module_name = self.module_name.trim().to_string();
        if module_name.is_empty() {
            return Err(ImportError::MissingName { row });
        }
        let start_date = match self.start_date.trim() {
            "" => None,
            value => Some(value.to_string()),
        };
        Ok(ModuleInput {
            module_name,
            start_date,
            duration_weeks: lenient_weeks::weeks_from_str(&self.duration_weeks),
        })
    }
}

/// Read `module_name,start_date,duration_weeks` rows in file order.
pub fn read_modules_csv<R: Read>(reader: R) -> ImportResult<Vec<ModuleInput>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut modules = Vec::new();
    for (idx, record) in rdr.deserialize::<ModuleCsvRecord>().enumerate() {
        // Header is line 1.
        modules.push(record?.into_input(idx + 2)?);
    }
    Ok(modules)
}

pub fn load_modules_from_csv<P: AsRef<Path>>(path: P) -> ImportResult<Vec<ModuleInput>> {
    let file = File::open(path)?;
    read_modules_csv(file)
}
