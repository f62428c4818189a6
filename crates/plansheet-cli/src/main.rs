mod pipeline;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::pipeline::Delivery;

#[derive(Debug, Parser)]
#[command(name = "plansheet")]
#[command(about = "Collect storefront listings and their protection-plan offers into a spreadsheet")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Crawl search results, look up plans for every product, and export
    Scrape {
        /// Search-results URL to start from (defaults to PLANSHEET_SEARCH_URL)
        #[arg(long)]
        url: Option<String>,

        /// Stop after this many listing pages (defaults to PLANSHEET_MAX_PAGES)
        #[arg(long)]
        max_pages: Option<usize>,

        /// Do not mail the workbook even if mail is configured
        #[arg(long)]
        no_email: bool,

        /// Also write the rows as JSON next to the workbook
        #[arg(long)]
        json: bool,
    },
    /// Read listings from a search page saved in a browser, then look up plans
    FromHtml {
        /// Saved HTML file
        file: PathBuf,

        /// Address the page was saved from, used to resolve relative links
        #[arg(long)]
        page_url: Option<String>,

        #[arg(long)]
        no_email: bool,

        #[arg(long)]
        json: bool,
    },
    /// Re-extract plans for every product in an existing workbook
    Enrich {
        /// Workbook previously written by this tool
        file: PathBuf,

        #[arg(long)]
        no_email: bool,
    },
    /// Print the plan offers found for a single product
    Plans {
        /// Product identifier (ASIN)
        asin: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = plansheet_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Scrape {
            url,
            max_pages,
            no_email,
            json,
        } => {
            let start_url = url.unwrap_or_else(|| config.search_url.clone());
            let max_pages = max_pages.unwrap_or(config.max_pages);
            pipeline::run_scrape(&config, &start_url, max_pages, Delivery::new(no_email, json))
                .await?;
        }
        Commands::FromHtml {
            file,
            page_url,
            no_email,
            json,
        } => {
            let page_url = page_url.unwrap_or_else(|| config.search_url.clone());
            pipeline::run_from_html(&config, &file, &page_url, Delivery::new(no_email, json))
                .await?;
        }
        Commands::Enrich { file, no_email } => {
            pipeline::run_enrich(&config, &file, Delivery::new(no_email, false)).await?;
        }
        Commands::Plans { asin } => {
            pipeline::run_plans(&config, &asin).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
