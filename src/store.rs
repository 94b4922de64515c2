use crate::errors::ScraperError;
use crate::holiday_processor::HolidayDay;
use log::info;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

pub struct HolidayStore {
    conn: Connection,
    table: String,
}

impl HolidayStore {
    pub fn open<P: AsRef<Path>>(path: P, table: &str) -> Result<Self, ScraperError> {
        Self::from_connection(Connection::open(path)?, table)
    }

    pub fn from_connection(conn: Connection, table: &str) -> Result<Self, ScraperError> {
        // table names cannot be bound as parameters
        if table.is_empty() || !table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ScraperError::CustomError(format!(
                "Invalid table name: {:?}",
                table
            )));
        }
        Ok(Self {
            conn,
            table: table.to_string(),
        })
    }

    pub fn ensure_schema(&self, default_year: i32) -> Result<(), ScraperError> {
        self.conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    day INTEGER NOT NULL,
                    month TEXT NOT NULL,
                    month_number INTEGER NOT NULL,
                    holidays TEXT NOT NULL,
                    full_date_formatted TEXT NOT NULL UNIQUE,
                    full_date_text TEXT NOT NULL,
                    year INTEGER DEFAULT {},
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )",
                self.table, default_year
            ),
            [],
        )?;
        Ok(())
    }

    /// Deletes every stored row and inserts `holidays` in one transaction.
    /// Returns the number of rows written.
    pub fn replace_all(
        &mut self,
        holidays: &[HolidayDay],
        default_year: i32,
    ) -> Result<usize, ScraperError> {
        self.ensure_schema(default_year)?;

        let tx = self.conn.transaction()?;
        tx.execute(&format!("DELETE FROM {}", self.table), [])?;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {}
                (day, month, month_number, holidays, full_date_formatted, full_date_text, year)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                self.table
            ))?;
            for holiday in holidays {
                stmt.execute(params![
                    holiday.day,
                    holiday.month,
                    holiday.month_number,
                    serde_json::to_string(&holiday.holidays)?,
                    holiday.full_date_formatted,
                    holiday.full_date_text,
                    holiday.year,
                ])?;
            }
        }
        tx.commit()?;

        info!("Saved {} rows to table {}", holidays.len(), self.table);
        Ok(holidays.len())
    }

    /// Holiday names stored for `date_key`, or `None` when there is no such row.
    pub fn find(&self, date_key: &str) -> Result<Option<Vec<String>>, ScraperError> {
        let raw: Option<String> = self
            .conn
            .query_row(
                &format!(
                    "SELECT holidays FROM {} WHERE full_date_formatted = ?1",
                    self.table
                ),
                params![date_key],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn lookup(&self, date_key: &str) -> Result<Vec<String>, ScraperError> {
        Ok(self.find(date_key)?.unwrap_or_default())
    }

    pub fn count(&self) -> Result<usize, ScraperError> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", self.table),
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Stored days per month, in calendar order.
    pub fn month_stats(&self) -> Result<Vec<(String, usize)>, ScraperError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT month, COUNT(*) FROM {} GROUP BY month ORDER BY MIN(month_number)",
            self.table
        ))?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as usize))
        })?;

        let mut stats = Vec::new();
        for row in rows {
            stats.push(row?);
        }
        Ok(stats)
    }

    pub fn close(self) -> Result<(), ScraperError> {
        self.conn.close().map_err(|(_, err)| err.into())
    }
}
