use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fund_chart::config::{self, Watchlist};
use fund_chart::io::html::HtmlSink;
use fund_chart::pipeline;
use nav_ingestor::models::request_params::NavRequestParams;
use nav_ingestor::providers::{NavProvider, eastmoney::EastmoneyProvider};

#[derive(Parser)]
#[command(version, about = "Fund NAV history charting CLI")]
struct Cli {
    /// Path to the watchlist file (TOML). The built-in open-end fund set is
    /// used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every configured fund and render the chart page
    Render {
        /// Directory to write index.html into (overrides the watchlist)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Records to request per fund (overrides the watchlist)
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Fetch one fund and print its raw records as JSON lines
    Fetch {
        /// Provider fund code (e.g. "510310")
        #[arg(long)]
        code: String,

        #[arg(long, default_value = "60")]
        page_size: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut watchlist = match &cli.config {
        Some(path) => config::load_watchlist_path(path)?,
        None => Watchlist::alternative(),
    };

    let provider = EastmoneyProvider::new()?;

    match cli.command {
        Commands::Render {
            output_dir,
            page_size,
        } => {
            if let Some(dir) = output_dir {
                watchlist.output_dir = dir;
            }
            if let Some(size) = page_size {
                watchlist.page_size = size;
            }

            let sink = HtmlSink::new(watchlist.output_dir.clone());
            let output_path = pipeline::run(&provider, &sink, &watchlist).await?;
            println!("{}", output_path.display());
        }

        Commands::Fetch { code, page_size } => {
            let records = provider
                .fetch_nav_history(NavRequestParams::new(code, page_size))
                .await?;
            for record in &records {
                println!("{}", serde_json::to_string(record)?);
            }
        }
    }

    Ok(())
}
