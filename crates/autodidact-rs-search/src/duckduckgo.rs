//! DuckDuckGo HTML endpoint provider.

use crate::{SearchError, WebProvider};
use async_trait::async_trait;
use autodidact_rs_config::SearchConfig;
use autodidact_rs_protocol::{SearchResult, now_timestamp};
use log::{debug, info, warn};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;

/// Provider that scrapes the DuckDuckGo HTML results page (no API key required).
#[derive(Debug, Clone)]
pub struct DuckDuckGoProvider {
    client: reqwest::Client,
    base_url: String,
    query_suffix: String,
}

impl DuckDuckGoProvider {
    /// Build a provider from search settings.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            query_suffix: config.query_suffix.clone(),
        })
    }
}

#[async_trait]
impl WebProvider for DuckDuckGoProvider {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
        let full_query = format!("{query}{}", self.query_suffix);
        info!(
            "web search (query_len={}, limit={})",
            full_query.len(),
            limit
        );
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", full_query.as_str())])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            warn!("search engine refused query (status={})", status.as_u16());
            return Ok(Vec::new());
        }
        let body = response.text().await?;
        let results = parse_results(&body, limit)?;
        debug!(
            "parsed search results (body_len={}, results={})",
            body.len(),
            results.len()
        );
        Ok(results)
    }
}

/// Extract up to `limit` result blocks from a DuckDuckGo HTML page.
///
/// The limit is applied to result blocks before incomplete blocks (missing a
/// title or snippet) are dropped, so fewer than `limit` results may come back.
pub fn parse_results(html: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
    let document = Html::parse_document(html);
    let block_selector = selector("div.result__body")?;
    let title_selector = selector("h2.result__title")?;
    let snippet_selector = selector(".result__snippet")?;
    let link_selector = selector("a")?;

    let mut results = Vec::new();
    for block in document.select(&block_selector).take(limit) {
        let Some(title_elem) = block.select(&title_selector).next() else {
            continue;
        };
        let Some(snippet_elem) = block.select(&snippet_selector).next() else {
            continue;
        };
        let url = title_elem
            .select(&link_selector)
            .next()
            .and_then(|link| link.value().attr("href"))
            .unwrap_or_default()
            .to_string();
        results.push(SearchResult {
            title: element_text(&title_elem),
            snippet: element_text(&snippet_elem),
            url,
            timestamp: now_timestamp(),
            improvements: Vec::new(),
        });
    }
    Ok(results)
}

fn selector(css: &str) -> Result<Selector, SearchError> {
    Selector::parse(css).map_err(|err| SearchError::Parse(format!("{css}: {err}")))
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::parse_results;
    use pretty_assertions::assert_eq;

    const PAGE: &str = r#"
        <html><body>
          <div class="result results_links">
            <div class="links_main result__body">
              <h2 class="result__title">
                <a class="result__a" href="https://docs.python.org/3/">  Python docs </a>
              </h2>
              <a class="result__snippet" href="https://docs.python.org/3/">Official <b>Python</b> documentation.</a>
            </div>
          </div>
          <div class="result">
            <div class="result__body">
              <h2 class="result__title"><a href="https://example.com/no-snippet">No snippet</a></h2>
            </div>
          </div>
          <div class="result">
            <div class="result__body">
              <h2 class="result__title">Title without link</h2>
              <div class="result__snippet">Snippet text</div>
            </div>
          </div>
        </body></html>
    "#;

    #[test]
    fn extracts_title_snippet_and_link() {
        let results = parse_results(PAGE, 10).expect("parse");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Python docs");
        assert_eq!(results[0].snippet, "Official Python documentation.");
        assert_eq!(results[0].url, "https://docs.python.org/3/");
        assert!(results[0].improvements.is_empty());
        assert_eq!(results[1].url, "");
    }

    #[test]
    fn limit_applies_to_blocks_before_filtering() {
        let results = parse_results(PAGE, 2).expect("parse");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Python docs");
    }

    #[test]
    fn unrelated_markup_yields_nothing() {
        let results = parse_results("<html><body><p>blocked</p></body></html>", 10).expect("parse");
        assert!(results.is_empty());
    }
}
