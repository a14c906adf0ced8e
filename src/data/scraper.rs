// ============================================================
// Layer 4 — Catalog Scraper
// ============================================================
// Walks every page of the demo catalog (books.toscrape.com by
// default), extracting one record per product card:
//
//   title  — the `title` attribute of the <a> inside <h3>
//   price  — "£51.77" inside <p class="price_color">, currency
//            stripped; unparsable → 0.0
//   rating — the word in <p class="star-rating Three">,
//            One..Five → 1..5; unknown → 0
//
// Pagination follows the <li class="next"> link until a page
// has none. A network failure stops the walk but keeps the
// records scraped so far — a partial catalog is still worth
// saving.
//
// Page parsing is pure (&str in, records out) and is the only
// part of this file the tests touch; no test ever hits the
// network.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::data::html;
use crate::domain::record::CatalogRecord;

/// Where the paginated catalog lives.
pub const DEFAULT_BASE_URL: &str = "http://books.toscrape.com/catalogue/";

const FIRST_PAGE: &str = "page-1.html";
const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

pub struct CatalogScraper {
    base_url: String,
    agent:    ureq::Agent,
}

impl CatalogScraper {
    pub fn new(base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(HTTP_TIMEOUT)
            .build();
        Self { base_url: base_url.into(), agent }
    }

    /// Walk all catalog pages and collect every product record.
    pub fn scrape_all(&self) -> Result<Vec<CatalogRecord>> {
        let mut records  = Vec::new();
        let mut next     = Some(FIRST_PAGE.to_string());
        let mut page_num = 1usize;

        while let Some(page) = next {
            let url = self.page_url(&page);
            tracing::info!("Scraping page {}: {}", page_num, url);

            let body = match self.fetch(&url) {
                Ok(body) => body,
                Err(e) => {
                    // Keep what we have; a partial catalog still trains
                    tracing::warn!("Stopping at page {}: {e}", page_num);
                    break;
                }
            };

            let (page_records, next_page) = parse_page(&body);
            tracing::debug!("Page {}: {} products", page_num, page_records.len());
            records.extend(page_records);

            next = next_page;
            page_num += 1;
        }

        tracing::info!("Scraping complete: {} records", records.len());
        Ok(records)
    }

    /// Resolve a next-page href against the catalog base URL.
    fn page_url(&self, page: &str) -> String {
        if page.starts_with("http") {
            page.to_string()
        } else {
            format!("{}{}", self.base_url, page)
        }
    }

    fn fetch(&self, url: &str) -> Result<String> {
        self.agent
            .get(url)
            .call()
            .with_context(|| format!("GET {url} failed"))?
            .into_string()
            .with_context(|| format!("Cannot read response body of {url}"))
    }
}

impl Default for CatalogScraper {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Parse one catalog page into its product records and the
/// relative href of the next page, if the page has one.
pub fn parse_page(body: &str) -> (Vec<CatalogRecord>, Option<String>) {
    let mut records = Vec::new();
    let mut from    = 0usize;

    while let Some((start, end)) =
        html::next_tag_block(body, "<article class=\"product_pod\"", "</article>", from)
    {
        records.push(parse_product(&body[start..end]));
        from = end;
    }

    let next = html::next_tag_block(body, "<li class=\"next\"", "</li>", 0)
        .and_then(|(start, end)| html::attr_value(&body[start..end], "href"));

    (records, next)
}

/// Extract one record from a product card block. Every field
/// has a fallback — a half-broken card still yields a record.
fn parse_product(block: &str) -> CatalogRecord {
    let title = html::slice_between(block, "<h3", "</h3>")
        .and_then(|h3| html::attr_value(h3, "title"))
        .unwrap_or_else(|| "Not available".to_string());

    let price = html::slice_between(block, "<p class=\"price_color\"", "</p>")
        .map(|inner| parse_price(&html::strip_tags(inner)))
        .unwrap_or(0.0);

    CatalogRecord::new(title, price, parse_star_rating(block))
}

/// "£51.77" → 51.77. Keeps digits and the decimal point only,
/// so currency symbols and stray encoding artifacts drop out.
fn parse_price(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse().unwrap_or(0.0)
}

/// The star rating is encoded as a class word:
/// `<p class="star-rating Three">` → 3.0. Unknown words → 0.0,
/// matching how an absent rating is stored in the catalog.
fn parse_star_rating(block: &str) -> f64 {
    let Some(idx) = block.find("star-rating") else {
        return 0.0;
    };
    let rest = &block[idx + "star-rating".len()..];
    let word = rest
        .split(|c: char| !c.is_ascii_alphabetic())
        .find(|w| !w.is_empty())
        .unwrap_or("");

    match word {
        "One"   => 1.0,
        "Two"   => 2.0,
        "Three" => 3.0,
        "Four"  => 4.0,
        "Five"  => 5.0,
        _       => 0.0,
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    // Trimmed-down copy of a real catalog page
    const PAGE: &str = r#"
        <html><body>
        <article class="product_pod">
            <p class="star-rating Five"></p>
            <h3><a href="a-great-book_1/index.html" title="A Great Book">A Great ...</a></h3>
            <p class="price_color">£51.77</p>
        </article>
        <article class="product_pod">
            <p class="star-rating Two"></p>
            <h3><a href="plain-notes_2/index.html" title="Plain Notes">Plain ...</a></h3>
            <p class="price_color">£10.00</p>
        </article>
        <ul class="pager">
            <li class="next"><a href="page-2.html">next</a></li>
        </ul>
        </body></html>
    "#;

    #[test]
    fn test_parse_page_extracts_all_products() {
        let (records, next) = parse_page(PAGE);
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].title, "A Great Book");
        assert_eq!(records[0].price, 51.77);
        assert_eq!(records[0].rating, 5.0);

        assert_eq!(records[1].title, "Plain Notes");
        assert_eq!(records[1].price, 10.0);
        assert_eq!(records[1].rating, 2.0);

        assert_eq!(next.as_deref(), Some("page-2.html"));
    }

    #[test]
    fn test_last_page_has_no_next_link() {
        let last = PAGE.replace("class=\"next\"", "class=\"previous\"");
        let (records, next) = parse_page(&last);
        assert_eq!(records.len(), 2);
        assert!(next.is_none());
    }

    #[test]
    fn test_broken_card_falls_back_per_field() {
        let broken = r#"
            <article class="product_pod">
                <h3><a href="x.html">no title attribute</a></h3>
            </article>
        "#;
        let (records, _) = parse_page(broken);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Not available");
        assert_eq!(records[0].price, 0.0);
        assert_eq!(records[0].rating, 0.0);
    }

    #[test]
    fn test_price_parsing_strips_currency() {
        assert_eq!(parse_price("£51.77"), 51.77);
        assert_eq!(parse_price("Â£10.00"), 10.0);
        assert_eq!(parse_price("free"), 0.0);
    }

    #[test]
    fn test_unknown_star_word_is_zero() {
        assert_eq!(parse_star_rating(r#"<p class="star-rating Ten">"#), 0.0);
        assert_eq!(parse_star_rating("<p>no stars here</p>"), 0.0);
    }
}
