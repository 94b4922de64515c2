use clap::Parser;
use holiday_scraper::config::ConfigArgs;
use holiday_scraper::server::run_server;

/// Serves holiday lookups over HTTP.
#[derive(Parser)]
struct Opts {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value = "12012")]
    port: u16,
    #[command(flatten)]
    config: ConfigArgs,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let opts = Opts::parse();
    let mut config = opts.config.into_config();
    config.host = opts.host;
    config.port = opts.port;

    run_server(config).await
}
