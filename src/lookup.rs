use crate::config::Config;
use crate::errors::ScraperError;
use crate::months::format_date_key;
use crate::store::HolidayStore;
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::path::PathBuf;

/// Exact-match reads by date key. Every call opens its own connection
/// and closes it before returning.
#[derive(Debug, Clone)]
pub struct LookupService {
    db_path: PathBuf,
    table: String,
}

impl LookupService {
    pub fn new(config: &Config) -> Self {
        Self {
            db_path: config.db_path.clone(),
            table: config.table.clone(),
        }
    }

    /// `None` when no row has this key.
    pub fn find(&self, date_key: &str) -> Result<Option<Vec<String>>, ScraperError> {
        let store = HolidayStore::open(&self.db_path, &self.table)?;
        let result = store.find(date_key);
        store.close()?;
        result
    }

    pub fn lookup(&self, date_key: &str) -> Result<Vec<String>, ScraperError> {
        Ok(self.find(date_key)?.unwrap_or_default())
    }
}

/// Turns the optional `D-M` command-line argument into a `DD-MM` key.
/// Without an argument the key of `today` is used.
pub fn resolve_date_key(
    arg: Option<&str>,
    today: NaiveDate,
    year: i32,
) -> Result<String, ScraperError> {
    let Some(arg) = arg else {
        return Ok(format_date_key(today.day(), today.month()));
    };

    let re = Regex::new(r"^(\d{1,2})-(\d{1,2})$")?;
    let invalid = || ScraperError::InvalidDate(format!("{:?}, expected DD-MM", arg));
    let caps = re.captures(arg.trim()).ok_or_else(invalid)?;
    let day: u32 = caps[1].parse().map_err(|_| invalid())?;
    let month: u32 = caps[2].parse().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;

    Ok(format_date_key(day, month))
}
