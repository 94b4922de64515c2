use crate::config::Config;
use crate::errors::ScraperError;
use crate::holiday_processor::HolidayDay;
use crate::snapshot::write_snapshot;
use crate::store::HolidayStore;
use log::{error, info};
use std::sync::Arc;

/// Replaces the table content and the JSON snapshot with `holidays`.
///
/// Both sinks run to completion even when one of them fails; the error
/// then names every failed sink. Returns the stored row count.
pub async fn persist(holidays: Vec<HolidayDay>, config: &Config) -> Result<usize, ScraperError> {
    let holidays = Arc::new(holidays);

    let db_records = Arc::clone(&holidays);
    let db_path = config.db_path.clone();
    let table = config.table.clone();
    let year = config.year;
    let store_task = tokio::task::spawn_blocking(move || -> Result<usize, ScraperError> {
        let mut store = HolidayStore::open(&db_path, &table)?;
        let written = store.replace_all(&db_records, year)?;
        store.close()?;
        Ok(written)
    });
    let snapshot_task = write_snapshot(&config.json_path, &holidays);

    let (store_result, snapshot_result) = tokio::join!(store_task, snapshot_task);
    let store_result = store_result
        .map_err(|err| ScraperError::CustomError(format!("Store task failed: {}", err)))
        .and_then(|result| result);

    match (store_result, snapshot_result) {
        (Ok(written), Ok(())) => {
            info!(
                "Saved {} rows to {} and snapshot to {}",
                written,
                config.db_path.display(),
                config.json_path.display()
            );
            Ok(written)
        }
        (store_result, snapshot_result) => {
            let store = store_result.err().map(|err| err.to_string());
            let snapshot = snapshot_result.err().map(|err| err.to_string());
            if let Some(err) = &store {
                error!("Database save failed: {}", err);
            }
            if let Some(err) = &snapshot {
                error!("Snapshot save failed: {}", err);
            }
            Err(ScraperError::PersistError { store, snapshot })
        }
    }
}

/// Persists a non-empty run, then reports what the table holds.
/// An empty run leaves the stored data untouched.
pub async fn finish_run(holidays: Vec<HolidayDay>, config: &Config) -> Result<usize, ScraperError> {
    let persisted = if holidays.is_empty() {
        Ok(0)
    } else {
        persist(holidays, config).await
    };
    let stored = report_database(config);
    persisted?;
    stored
}

/// Logs what the table holds after a run.
pub fn report_database(config: &Config) -> Result<usize, ScraperError> {
    let store = HolidayStore::open(&config.db_path, &config.table)?;
    store.ensure_schema(config.year)?;
    let count = store.count()?;
    info!("Database holds {} records", count);
    for (month, days) in store.month_stats()? {
        info!("{}: {}", month, days);
    }
    store.close()?;
    Ok(count)
}
