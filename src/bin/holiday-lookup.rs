use chrono::Local;
use clap::Parser;
use holiday_scraper::config::ConfigArgs;
use holiday_scraper::lookup::{resolve_date_key, LookupService};

/// Prints the holidays stored for a day.
#[derive(Parser)]
struct Opts {
    /// Date as DD-MM, today when omitted
    date: Option<String>,
    #[command(flatten)]
    config: ConfigArgs,
}

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let opts = Opts::parse();
    let config = opts.config.into_config();

    let date_key = match resolve_date_key(
        opts.date.as_deref(),
        Local::now().date_naive(),
        config.year,
    ) {
        Ok(key) => key,
        Err(err) => {
            eprintln!("Ошибка: {}", err);
            return;
        }
    };

    println!("Дата: {}", date_key);
    println!("{}", "-".repeat(50));

    match LookupService::new(&config).lookup(&date_key) {
        Ok(holidays) if holidays.is_empty() => println!("Праздников на эту дату не найдено"),
        Ok(holidays) => {
            for (idx, holiday) in holidays.iter().enumerate() {
                println!("{}. {}", idx + 1, holiday);
            }
        }
        Err(err) => eprintln!("Ошибка: {}", err),
    }
}
