use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use url::Url;

use crate::models::ListingRecord;

/// Candidate anchors re-scanned on every scroll round. Listing links live
/// under /item/ or /p/ paths, or carry a listing data-testid.
const CANDIDATE_SELECTOR: &str = "a[href*='/item/'], a[href*='/p/'], a[data-testid*='listing']";

/// Why an anchor yielded no record. Logged at the skip site by the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Skip {
    #[error("anchor has no href")]
    MissingHref,

    #[error("href '{href}' does not resolve against the page URL")]
    UnresolvableHref { href: String },
}

/// Heuristic field extraction over a listing anchor's parsed subtree.
///
/// Every field except the URL is recovered by an ordered list of strategies;
/// the first one that produces a value wins and the rest are not tried.
/// Results pages carry no stable class names, so the probes lean on element
/// kind and text shape instead.
pub struct ListingExtractor {
    base: Url,
    price_regex: Regex,
    title_probes: Vec<Selector>,
    price_probes: Vec<Selector>,
    anchor_probe: Selector,
    text_probe: Selector,
    image_probe: Selector,
}

impl ListingExtractor {
    pub fn new(base: Url) -> Self {
        ListingExtractor {
            base,
            price_regex: Regex::new(r"₹\s?[\d,]+").unwrap(),
            title_probes: ["h3", "h2", "h4", "h5", "span"]
                .iter()
                .map(|s| Selector::parse(s).unwrap())
                .collect(),
            price_probes: ["span", "div"]
                .iter()
                .map(|s| Selector::parse(s).unwrap())
                .collect(),
            anchor_probe: Selector::parse(CANDIDATE_SELECTOR).unwrap(),
            text_probe: Selector::parse("span, small, div").unwrap(),
            image_probe: Selector::parse("img").unwrap(),
        }
    }

    /// All listing-link candidates in a page snapshot, in document order.
    pub fn candidates<'a>(&'a self, document: &'a Html) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        document.select(&self.anchor_probe)
    }

    /// Builds a record from one anchor. Only the URL is mandatory: a missing
    /// or unresolvable href discards the whole anchor, while every other
    /// field degrades to `None` when its strategies come up empty.
    pub fn extract(&self, anchor: &ElementRef) -> Result<ListingRecord, Skip> {
        let href = anchor.value().attr("href").unwrap_or("");
        if href.is_empty() {
            return Err(Skip::MissingHref);
        }
        let url = self
            .base
            .join(href)
            .map_err(|_| Skip::UnresolvableHref { href: href.to_string() })?;

        let anchor_text = block_text(anchor);

        Ok(ListingRecord {
            title: self.title(anchor, &anchor_text),
            price: self.price(anchor, &anchor_text),
            location: self.location(anchor),
            url: url.into(),
            image: self.image(anchor),
        })
    }

    /// First heading-like child with more than one character of text, probed
    /// in a fixed order (h3 first, bare spans last); falls back to the first
    /// line of the anchor's own text.
    fn title(&self, anchor: &ElementRef, anchor_text: &str) -> Option<String> {
        for probe in &self.title_probes {
            if let Some(el) = anchor.select(probe).next() {
                let text = element_text(&el);
                if text.chars().count() > 1 {
                    return Some(text);
                }
            }
        }
        first_line(anchor_text)
    }

    /// First span (then div) whose text carries the rupee glyph, taken
    /// verbatim; falls back to a regex scan of the anchor's full text.
    fn price(&self, anchor: &ElementRef, anchor_text: &str) -> Option<String> {
        for probe in &self.price_probes {
            for el in anchor.select(probe) {
                let text = element_text(&el);
                if text.contains('₹') {
                    return Some(text);
                }
            }
        }
        self.price_regex
            .find(anchor_text)
            .map(|m| m.as_str().to_string())
    }

    /// First descendant text that reads like a place name, scanning span,
    /// small and div elements in document order. Rejected candidates do not
    /// end the scan.
    fn location(&self, anchor: &ElementRef) -> Option<String> {
        for el in anchor.select(&self.text_probe) {
            let text = element_text(&el);
            if !text.is_empty() && looks_like_location(&text) {
                return Some(text);
            }
        }
        None
    }

    /// First img's src, falling back through the common lazy-loading
    /// attributes. Inline data: payloads are placeholder thumbnails, not
    /// images, and disqualify the element outright.
    fn image(&self, anchor: &ElementRef) -> Option<String> {
        let img = anchor.select(&self.image_probe).next()?;
        let src = ["src", "data-src", "data-lazy"]
            .iter()
            .find_map(|attr| img.value().attr(attr).filter(|v| !v.is_empty()))?;
        if src.starts_with("data:") {
            return None;
        }
        self.base.join(src).ok().map(Into::into)
    }
}

/// Place-name shape test for short card texts.
///
/// A candidate is accepted when it is under 80 characters, is not a distance
/// marker ("km", "away"), and either carries a separator (comma, " - ", "•"),
/// mentions IN/India, or is a short run (under 40 characters) without a price
/// glyph. The length gate applies to every branch. Checks are case-sensitive,
/// so "IN" over-matches words like VINTAGE; callers accept that noise.
pub fn looks_like_location(text: &str) -> bool {
    let len = text.chars().count();
    if len >= 80 {
        return false;
    }
    if text.contains("km") || text.contains("away") {
        return false;
    }
    text.contains(',')
        || text.contains(" - ")
        || text.contains('•')
        || text.contains("IN")
        || text.contains("India")
        || (!text.contains('₹') && len < 40)
}

/// Joined and trimmed text of an element's descendant text nodes.
fn element_text(el: &ElementRef) -> String {
    el.text().collect::<Vec<_>>().join(" ").trim().to_string()
}

/// Element text with internal line breaks preserved, outer whitespace trimmed.
fn block_text(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn first_line(text: &str) -> Option<String> {
    let line = text.lines().next()?.trim();
    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}
