use anyhow::Result;
use clap::Parser;
use tracing::info;

use olx_scout::collector;
use olx_scout::config::{DEFAULT_URL, ScrapeConfig};
use olx_scout::persist;

#[derive(Parser, Debug)]
#[command(name = "olx-scout", version, about = "Scrape OLX search results")]
struct Args {
    /// OLX search URL
    #[arg(short, long, default_value = DEFAULT_URL)]
    url: String,

    /// Maximum number of items to collect
    #[arg(short, long, default_value_t = 300)]
    max: usize,

    /// Run browser headless (useful for servers)
    #[arg(long)]
    headless: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("olx_scout=info".parse()?),
        )
        .init();

    let args = Args::parse();
    info!("Starting OLX Scout...");

    let config = ScrapeConfig::from_env();
    config.validate()?;

    let records = collector::collect(&config, &args.url, args.max, args.headless)?;
    persist::persist(&records, persist::DEFAULT_BASE_NAME)?;
    println!("Done.");

    Ok(())
}
