use scraper::Html;
use std::collections::HashSet;
use tracing::{debug, warn};
use url::Url;

use crate::browser::{BrowserSession, PageDriver};
use crate::config::ScrapeConfig;
use crate::extract::ListingExtractor;
use crate::models::ListingRecord;
use crate::utils::error::Result;

/// Readiness probe: the page is usable once any listing link has rendered.
/// Narrower than the per-round candidate scan on purpose.
pub const LISTING_WAIT_SELECTOR: &str = "a[href*='/item/'], a[data-testid*='listing']";

/// Everything a scroll session accumulates, threaded through the rounds
/// explicitly rather than living in loop locals.
#[derive(Debug, Default)]
pub struct SessionState {
    pub records: Vec<ListingRecord>,
    pub seen_urls: HashSet<String>,
    pub rounds: u32,
    pub last_height: u64,
}

impl SessionState {
    fn new(initial_height: u64) -> Self {
        SessionState {
            last_height: initial_height,
            ..Default::default()
        }
    }

    /// Appends the record unless its URL was already collected. First sight
    /// wins; later duplicates are dropped.
    fn push(&mut self, record: ListingRecord) {
        if self.seen_urls.contains(&record.url) {
            debug!("Duplicate listing skipped: {}", record.url);
            return;
        }
        self.seen_urls.insert(record.url.clone());
        self.records.push(record);
    }
}

/// Scrolls through the results page at `url` and collects up to `max_items`
/// listing records, launching and tearing down a browser session around the
/// run.
pub fn collect(
    config: &ScrapeConfig,
    url: &str,
    max_items: usize,
    headless: bool,
) -> Result<Vec<ListingRecord>> {
    let session = BrowserSession::launch(config, headless)?;
    run_session(session, config, url, max_items)
}

/// Drives the scroll loop over any `PageDriver` and closes it on every exit
/// path. A close failure after a successful run is logged, not fatal; a
/// failure inside the rounds takes precedence over whatever close reports.
pub fn run_session<D: PageDriver>(
    mut driver: D,
    config: &ScrapeConfig,
    url: &str,
    max_items: usize,
) -> Result<Vec<ListingRecord>> {
    let outcome = scroll_rounds(&mut driver, config, url, max_items);
    if let Err(e) = driver.close() {
        warn!("Failed to close browser session: {}", e);
    }
    outcome.map(dedup_by_url)
}

fn scroll_rounds<D: PageDriver>(
    driver: &mut D,
    config: &ScrapeConfig,
    url: &str,
    max_items: usize,
) -> Result<Vec<ListingRecord>> {
    let base = Url::parse(url)?;
    let extractor = ListingExtractor::new(base);

    println!("Opening {} ...", url);
    driver.navigate(url)?;
    driver.wait_for_listings(LISTING_WAIT_SELECTOR)?;

    let mut state = SessionState::new(driver.scroll_height()?);

    while state.records.len() < max_items && state.rounds < config.max_rounds {
        driver.scroll_to_bottom()?;
        driver.pause(config.scroll_pause());
        driver.pause(config.settle_wait());

        let mut new_height = driver.scroll_height()?;
        let mut end_of_content = false;
        if new_height == state.last_height {
            driver.nudge(config.nudge_pixels)?;
            driver.pause(config.scroll_pause());
            new_height = driver.scroll_height()?;
            end_of_content = new_height == state.last_height;
        }
        state.last_height = new_height;
        state.rounds += 1;

        // The snapshot is absorbed even on the final round: a page whose
        // height never grows still has its first render's anchors.
        let html = driver.content()?;
        absorb_snapshot(&mut state, &extractor, &html, max_items);
        debug!(
            "Round {}: {} listings collected (height {})",
            state.rounds,
            state.records.len(),
            state.last_height
        );

        if end_of_content {
            debug!("Page height stopped growing after round {}", state.rounds);
            break;
        }
    }

    println!(
        "Found {} candidate listings (may include duplicates or partial data).",
        state.records.len()
    );

    Ok(state.records)
}

/// Re-scans every candidate anchor in the snapshot. Virtualized result lists
/// re-render and reorder cards between rounds, so previously seen anchors
/// show up again and are deduplicated rather than skipped positionally.
fn absorb_snapshot(
    state: &mut SessionState,
    extractor: &ListingExtractor,
    html: &str,
    max_items: usize,
) {
    let document = Html::parse_document(html);
    for anchor in extractor.candidates(&document) {
        if state.records.len() >= max_items {
            break;
        }
        match extractor.extract(&anchor) {
            Ok(record) => state.push(record),
            Err(skip) => debug!("Anchor skipped: {}", skip),
        }
    }
}

/// Defensive second pass over the collected batch: keeps the first record
/// seen for each URL, preserving order.
pub fn dedup_by_url(records: Vec<ListingRecord>) -> Vec<ListingRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| seen.insert(r.url.clone()))
        .collect()
}
