use crate::months::{MonthTable, RUSSIAN_MONTHS};
use clap::Args;
use std::path::PathBuf;

pub const DEFAULT_YEAR: i32 = 2026;

/// Settings shared by the scraper, the lookup CLI and the HTTP server.
#[derive(Debug, Clone)]
pub struct Config {
    pub url: String,
    pub year: i32,
    pub db_path: PathBuf,
    pub table: String,
    pub json_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub user_agent: String,
    pub months: MonthTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: format!("https://my-calend.ru/holidays/{}", DEFAULT_YEAR),
            year: DEFAULT_YEAR,
            db_path: PathBuf::from(format!("holidays_{}.db", DEFAULT_YEAR)),
            table: format!("holidays_{}", DEFAULT_YEAR),
            json_path: PathBuf::from(format!("holidays_online_{}.json", DEFAULT_YEAR)),
            host: "127.0.0.1".to_string(),
            port: 12012,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
                .to_string(),
            months: RUSSIAN_MONTHS,
        }
    }
}

/// Command-line overrides, flattened into each binary's options.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// SQLite database file
    #[arg(long)]
    pub db_path: Option<PathBuf>,
    /// Table holding the holiday records
    #[arg(long)]
    pub table: Option<String>,
    /// JSON snapshot file
    #[arg(long)]
    pub json_path: Option<PathBuf>,
    /// Calendar page to scrape
    #[arg(long)]
    pub url: Option<String>,
    /// Target year recorded with every day
    #[arg(long)]
    pub year: Option<i32>,
}

impl ConfigArgs {
    pub fn into_config(self) -> Config {
        self.apply(Config::default())
    }

    pub fn apply(self, mut config: Config) -> Config {
        if let Some(db_path) = self.db_path {
            config.db_path = db_path;
        }
        if let Some(table) = self.table {
            config.table = table;
        }
        if let Some(json_path) = self.json_path {
            config.json_path = json_path;
        }
        if let Some(url) = self.url {
            config.url = url;
        }
        if let Some(year) = self.year {
            config.year = year;
        }
        config
    }
}
