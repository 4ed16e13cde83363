use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::config::ScraperSettings;
use crate::domain::{parse_score, parse_vote_count, SnapshotRow};
use crate::http::RateLimitedClient;

const MISSING_MARKER: &str = "N/A";

/// Fetches the popularity chart and turns it into snapshot rows
pub struct ChartScraper {
    client: RateLimitedClient,
    parser: ChartParser,
    chart_url: String,
}

impl ChartScraper {
    pub fn new(settings: &ScraperSettings) -> Result<Self> {
        Ok(Self {
            client: RateLimitedClient::from_settings(settings)?,
            parser: ChartParser::new(settings)?,
            chart_url: settings.chart_url.to_string(),
        })
    }

    /// Fetch the chart page and extract its top entries, in chart order
    pub async fn scrape_chart(&mut self) -> Result<Vec<SnapshotRow>> {
        info!("Fetching chart from {}", self.chart_url);

        let html_text = self
            .client
            .get_text(&self.chart_url)
            .await
            .context("Failed to fetch chart page")?;

        let rows = self.parser.parse_document(&html_text);
        info!("Collected {} entries", rows.len());
        Ok(rows)
    }
}

/// HTML extraction for the chart page, independent of the network
pub struct ChartParser {
    selectors: ChartSelectors,
    rank_prefix_regex: Regex,
    site_base_url: String,
    max_entries: usize,
}

struct ChartSelectors {
    item: Selector,
    title: Selector,
    link: Selector,
    metadata: Selector,
    poster: Selector,
    score: Selector,
    vote_count: Selector,
}

impl ChartSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            item: parse_selector("li.ipc-metadata-list-summary-item")?,
            title: parse_selector("h3")?,
            link: parse_selector("a.ipc-title-link-wrapper")?,
            metadata: parse_selector("div.cli-title-metadata span")?,
            poster: parse_selector("img.ipc-image")?,
            score: parse_selector("div.cli-ratings-container .ipc-rating-star--rating")?,
            vote_count: parse_selector("div.cli-ratings-container .ipc-rating-star--voteCount")?,
        })
    }
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Invalid CSS selector {}: {:?}", css, e))
}

impl ChartParser {
    pub fn new(settings: &ScraperSettings) -> Result<Self> {
        Ok(Self {
            selectors: ChartSelectors::new()?,
            rank_prefix_regex: Self::compile_regex()?,
            site_base_url: settings.site_base_url.trim_end_matches('/').to_string(),
            max_entries: settings.max_entries,
        })
    }

    pub fn parse_document(&self, html_text: &str) -> Vec<SnapshotRow> {
        let html = Html::parse_document(html_text);
        let items: Vec<ElementRef> = html
            .select(&self.selectors.item)
            .take(self.max_entries)
            .collect();
        info!("Found {} movies", items.len());

        items
            .into_iter()
            .enumerate()
            .filter_map(|(idx, item)| self.parse_item(idx + 1, item))
            .collect()
    }

    // --- Construction Helpers ---

    fn compile_regex() -> Result<Regex> {
        Regex::new(r"^\d+\.\s*").context("Failed to compile rank prefix regex")
    }

    // --- Item Extraction ---

    fn parse_item(&self, position: usize, item: ElementRef) -> Option<SnapshotRow> {
        let Some(title) = self.extract_title(item) else {
            warn!("Error parsing item {}: no title", position);
            return None;
        };

        let metadata: Vec<String> = item
            .select(&self.selectors.metadata)
            .map(element_text)
            .collect();
        let meta_at = |idx: usize| metadata.get(idx).and_then(|text| non_missing(text));

        let row = SnapshotRow {
            title,
            year: meta_at(0),
            duration: meta_at(1),
            raw_rating: meta_at(2),
            score: self.first_text(item, &self.selectors.score).and_then(|t| parse_score(&t)),
            vote_count: self
                .first_text(item, &self.selectors.vote_count)
                .and_then(|t| parse_vote_count(&t)),
            link: self.extract_link(item),
            poster_url: first_attr(item, &self.selectors.poster, "src"),
        };

        debug!("Parsed #{}: {:?}", position, row);
        Some(row)
    }

    fn extract_title(&self, item: ElementRef) -> Option<String> {
        let raw = self.first_text(item, &self.selectors.title)?;
        let title = self.rank_prefix_regex.replace(&raw, "").trim().to_string();
        (!title.is_empty()).then_some(title)
    }

    fn extract_link(&self, item: ElementRef) -> Option<String> {
        let href = first_attr(item, &self.selectors.link, "href")?;
        if href.starts_with('/') {
            Some(format!("{}{}", self.site_base_url, href))
        } else {
            Some(href)
        }
    }

    fn first_text(&self, item: ElementRef, selector: &Selector) -> Option<String> {
        item.select(selector)
            .next()
            .map(element_text)
            .and_then(|text| non_missing(&text))
    }
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn first_attr(item: ElementRef, selector: &Selector, attr: &str) -> Option<String> {
    item.select(selector)
        .next()
        .and_then(|element| element.value().attr(attr))
        .and_then(non_missing)
}

fn non_missing(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == MISSING_MARKER {
        None
    } else {
        Some(trimmed.to_string())
    }
}
