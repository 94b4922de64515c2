use crate::errors::ScraperError;
use crate::holiday_processor::HolidayDay;
use log::info;
use std::path::Path;

/// Overwrites `path` with the records as an indented JSON array.
pub async fn write_snapshot<P: AsRef<Path>>(
    path: P,
    holidays: &[HolidayDay],
) -> Result<(), ScraperError> {
    let json = serde_json::to_string_pretty(holidays)?;
    tokio::fs::write(path.as_ref(), json).await?;
    info!("Saved snapshot to {}", path.as_ref().display());
    Ok(())
}

pub async fn read_snapshot<P: AsRef<Path>>(path: P) -> Result<Vec<HolidayDay>, ScraperError> {
    let json = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&json)?)
}
