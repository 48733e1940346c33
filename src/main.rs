use std::path::PathBuf;

use clap::Parser;
use map_colours_scraper::{api::PageScraper, palette::download_palette};

/// Downloads the map colour tables from the Minecraft Wiki and saves them as JSON.
#[derive(Parser)]
struct Opts {
    /// Destination path of the scraped data
    destination: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let opts = Opts::parse();

    let mut scraper = PageScraper::new()?;
    download_palette(&mut scraper, &opts.destination).await?;
    Ok(())
}
