use clap::Parser;
use holiday_scraper::config::{Config, ConfigArgs};
use holiday_scraper::errors::ScraperError;
use holiday_scraper::holiday_processor::HolidayProcessor;
use holiday_scraper::persist::{finish_run, report_database};
use holiday_scraper::scraper_client::ScraperClient;
use log::{error, info, warn};

/// Scrapes the holiday calendar and replaces the stored records.
#[derive(Parser)]
struct Opts {
    #[command(flatten)]
    config: ConfigArgs,
}

#[tokio::main]
async fn main() -> Result<(), ScraperError> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = Opts::parse().config.into_config();
    info!("Scraping {}", config.url);

    let scraper_client = ScraperClient::new_http(&config.user_agent)?;
    let raw_html = match scraper_client.fetch_url(config.url.as_str()).await {
        Ok(html) => html,
        Err(err) => {
            error!("Scraping failed: {}", err);
            if let Some(status) = err.status_code() {
                error!("Status: {}", status);
            }
            check_database(&config);
            return Err(err);
        }
    };

    let mut processor = HolidayProcessor::new(raw_html, config.year, config.months);
    processor.run()?;
    processor.pretty_print();
    finish_run(processor.into_holidays(), &config).await?;

    Ok(())
}

fn check_database(config: &Config) {
    if let Err(err) = report_database(config) {
        warn!("Could not read {}: {}", config.db_path.display(), err);
    }
}
