//! Command handlers: collect listings, attach plan offers, export.
//!
//! Per-product failures never abort a run; they surface as products
//! without plans. Only configuration, client construction, and workbook
//! writing errors are propagated.

use std::path::{Path, PathBuf};

use anyhow::Context;
use plansheet_core::{AppConfig, ProductReport, ProductSummary};
use plansheet_report::{
    duplicate_to, ensure_directory, notify, read_workbook, report_file_name, write_json,
    write_workbook, NotifyOutcome, WorkbookOptions,
};
use plansheet_scraper::{load_listing_file, ClientOptions, Pacing, PageClient};

const REPORT_PREFIX: &str = "plansheet_report";
const SHEET_NAME: &str = "Products";
const MAIL_BODY: &str = "Automated report attached.";

/// What happens to the workbook once it is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Delivery {
    pub email: bool,
    pub json: bool,
}

impl Delivery {
    pub(crate) fn new(no_email: bool, json: bool) -> Self {
        Self {
            email: !no_email,
            json,
        }
    }
}

/// Counts printed at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RunTotals {
    pub products: usize,
    pub with_plans: usize,
    pub plans: usize,
}

impl RunTotals {
    pub(crate) fn from_reports(reports: &[ProductReport]) -> Self {
        Self {
            products: reports.len(),
            with_plans: reports.iter().filter(|r| r.has_plans()).count(),
            plans: reports.iter().map(ProductReport::plan_count).sum(),
        }
    }
}

fn build_client(config: &AppConfig) -> anyhow::Result<PageClient> {
    PageClient::new(ClientOptions::from_config(config))
        .map_err(|e| anyhow::anyhow!("failed to build page client: {e}"))
}

fn pacing(config: &AppConfig) -> Pacing {
    Pacing::new(config.inter_request_delay_ms, config.inter_request_jitter_ms)
}

/// `plansheet scrape`
pub(crate) async fn run_scrape(
    config: &AppConfig,
    start_url: &str,
    max_pages: usize,
    delivery: Delivery,
) -> anyhow::Result<()> {
    if config.session_cookie.is_none() {
        tracing::warn!("no session cookie configured; the storefront may serve challenge pages");
    }
    let client = build_client(config)?;
    let pacing = pacing(config);

    tracing::info!(start_url, max_pages, "collecting listings");
    let summaries = client.collect_listings(start_url, max_pages, &pacing).await;
    finish_run(config, &client, summaries, true, delivery).await
}

/// `plansheet from-html`
pub(crate) async fn run_from_html(
    config: &AppConfig,
    file: &Path,
    page_url: &str,
    delivery: Delivery,
) -> anyhow::Result<()> {
    let page = load_listing_file(file, page_url, &config.site_origin)
        .with_context(|| format!("failed to load listing page {}", file.display()))?;
    tracing::info!(
        file = %file.display(),
        products = page.products.len(),
        "listings loaded from saved page"
    );
    let client = build_client(config)?;
    finish_run(config, &client, page.products, false, delivery).await
}

/// `plansheet enrich`
pub(crate) async fn run_enrich(
    config: &AppConfig,
    file: &Path,
    delivery: Delivery,
) -> anyhow::Result<()> {
    let existing = read_workbook(file, &config.site_origin)
        .with_context(|| format!("failed to read workbook {}", file.display()))?;
    let summaries: Vec<ProductSummary> = existing.into_iter().map(|r| r.summary).collect();
    let client = build_client(config)?;
    finish_run(config, &client, summaries, false, delivery).await
}

/// `plansheet plans`
pub(crate) async fn run_plans(config: &AppConfig, asin: &str) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let offers = client.fetch_plan_offers(asin, &config.rules).await;

    println!("{}", client.detail_url(asin));
    if offers.is_empty() {
        println!("  no protection plans found");
    }
    for (i, offer) in offers.iter().enumerate() {
        let price = offer
            .price
            .map_or_else(|| "N/A".to_owned(), |p| format!("₹{p}"));
        println!("  {}. {} | {price} | {}", i + 1, offer.name, offer.brand);
    }
    Ok(())
}

async fn finish_run(
    config: &AppConfig,
    client: &PageClient,
    summaries: Vec<ProductSummary>,
    after_fetch: bool,
    delivery: Delivery,
) -> anyhow::Result<()> {
    if summaries.is_empty() {
        println!("No products found; nothing to export.");
        return Ok(());
    }

    let reports = attach_plans(client, config, summaries, after_fetch).await;
    let path = export(config, &reports, delivery).await?;
    print_summary(&RunTotals::from_reports(&reports), &path);
    Ok(())
}

/// Whether to pause before the detail fetch at `index`. The first lookup is
/// paced only when listing pages were fetched right before it.
fn pauses_before(index: usize, after_fetch: bool) -> bool {
    index > 0 || after_fetch
}

/// Looks up plans for each product in order, pacing between requests.
async fn attach_plans(
    client: &PageClient,
    config: &AppConfig,
    summaries: Vec<ProductSummary>,
    after_fetch: bool,
) -> Vec<ProductReport> {
    let pacing = pacing(config);
    let total = summaries.len();
    let mut reports = Vec::with_capacity(total);

    for (index, summary) in summaries.into_iter().enumerate() {
        if pauses_before(index, after_fetch) {
            pacing.pause().await;
        }
        let offers = client.fetch_plan_offers(&summary.asin, &config.rules).await;
        tracing::info!(
            asin = %summary.asin,
            item = index + 1,
            total,
            offers = offers.len(),
            "plans extracted"
        );
        reports.push(ProductReport::assemble(summary, offers));
    }

    reports
}

/// Writes the workbook (and optional JSON), copies it, and mails it.
/// Returns the workbook path.
async fn export(
    config: &AppConfig,
    reports: &[ProductReport],
    delivery: Delivery,
) -> anyhow::Result<PathBuf> {
    ensure_directory(&config.output_dir)?;
    let timestamp = chrono::Local::now().naive_local();
    let path = config
        .output_dir
        .join(report_file_name(REPORT_PREFIX, &timestamp));

    let options = WorkbookOptions {
        sheet_name: SHEET_NAME.to_owned(),
        link_label: config.link_label.clone(),
    };
    write_workbook(&path, reports, &options)
        .with_context(|| format!("failed to write workbook {}", path.display()))?;

    if delivery.json {
        write_json(&path.with_extension("json"), reports)?;
    }

    if let Some(dir) = &config.copy_dir {
        duplicate_to(&path, dir);
    }

    if delivery.email {
        let subject = format!("Protection Plan Report {}", timestamp.format("%Y-%m-%d %H:%M"));
        match notify(config.mail.as_ref(), &path, &subject, MAIL_BODY).await {
            Ok(NotifyOutcome::Sent { recipients }) => println!("Report mailed to {recipients} recipient(s)."),
            Ok(NotifyOutcome::Skipped) => {}
            Err(e) => tracing::warn!(error = %e, "mail delivery failed; report kept on disk"),
        }
    }

    Ok(path)
}

fn print_summary(totals: &RunTotals, path: &Path) {
    println!();
    println!("Summary");
    println!("  Products scraped:        {}", totals.products);
    println!("  Products with plans:     {}", totals.with_plans);
    println!("  Total protection plans:  {}", totals.plans);
    println!("  Output file:             {}", path.display());
}
