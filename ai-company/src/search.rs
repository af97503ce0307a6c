//! DuckDuckGo web search.
//!
//! Queries the HTML endpoint and scrapes result titles, links and snippets.
//! No retry and no caching: a failed request is returned to the caller.

use anyhow::{Context, Result};
use regex::Regex;

const SEARCH_URL: &str = "https://html.duckduckgo.com/html/";
const USER_AGENT: &str = "Mozilla/5.0 (compatible; ai-company/0.1; +web_search)";
/// Returned instead of an empty string when nothing matched.
pub const NO_RESULTS: &str = "No good DuckDuckGo Search Result was found";
/// Number of hits rendered per query.
pub const DEFAULT_MAX_RESULTS: usize = 4;

/// One search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

impl SearchResult {
    fn render(&self) -> String {
        format!(
            "snippet: {}, title: {}, link: {}",
            self.snippet, self.title, self.link
        )
    }
}

/// Render hits as a single text blob for the model.
pub fn render_results(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return NO_RESULTS.to_string();
    }
    results
        .iter()
        .map(SearchResult::render)
        .collect::<Vec<_>>()
        .join(", ")
}

/// DuckDuckGo HTML search client.
pub struct WebSearch {
    http: reqwest::Client,
    max_results: usize,
    result_block: Regex,
    result_link: Regex,
    result_snippet: Regex,
    href: Regex,
    tag: Regex,
}

impl WebSearch {
    pub fn new() -> Result<Self> {
        Ok(Self {
            http: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .context("Failed to build search HTTP client")?,
            max_results: DEFAULT_MAX_RESULTS,
            result_block: Regex::new(r#"<div[^>]*\bclass="(result(?:\s[^"]*)?)""#)?,
            result_link: Regex::new(r#"(?s)<a([^>]*class="result__a"[^>]*)>(.*?)</a>"#)?,
            result_snippet: Regex::new(r#"(?s)<a[^>]*class="result__snippet"[^>]*>(.*?)</a>"#)?,
            href: Regex::new(r#"href="([^"]*)""#)?,
            tag: Regex::new(r"<[^>]+>")?,
        })
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Run a query and return the rendered text blob.
    pub async fn run(&self, query: &str) -> Result<String> {
        let results = self.search(query).await?;
        Ok(render_results(&results))
    }

    /// Run a query and return structured hits.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let resp = self
            .http
            .post(SEARCH_URL)
            .form(&[("q", query), ("kl", "wt-wt")])
            .send()
            .await
            .context("DuckDuckGo search request failed")?;

        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("DuckDuckGo search error {status}");
        }

        let body = resp
            .text()
            .await
            .context("Failed to read DuckDuckGo response")?;
        let results = self.parse(&body);
        tracing::debug!(query, hits = results.len(), "web search");
        Ok(results)
    }

    /// Extract hits from a results page, skipping sponsored entries.
    pub fn parse(&self, html: &str) -> Vec<SearchResult> {
        let starts: Vec<(usize, &str)> = self
            .result_block
            .captures_iter(html)
            .filter_map(|caps| Some((caps.get(0)?.start(), caps.get(1)?.as_str())))
            .collect();

        starts
            .iter()
            .enumerate()
            .filter_map(|(i, &(start, class))| {
                let end = starts.get(i + 1).map_or(html.len(), |&(next, _)| next);
                self.parse_block(class, &html[start..end])
            })
            .take(self.max_results)
            .collect()
    }

    /// One `<div class="result ...">` block. `None` for ads and blocks without a title link.
    fn parse_block(&self, class: &str, block: &str) -> Option<SearchResult> {
        if class.split_whitespace().any(|c| c == "result--ad") {
            return None;
        }
        let caps = self.result_link.captures(block)?;
        let href = self.href.captures(caps.get(1)?.as_str())?.get(1)?.as_str();
        let href = decode_html_entities(href);
        if is_ad_link(&href) {
            return None;
        }
        let snippet = self
            .result_snippet
            .captures(block)
            .and_then(|c| c.get(1))
            .map(|m| self.clean(m.as_str()))
            .unwrap_or_default();
        Some(SearchResult {
            title: self.clean(caps.get(2)?.as_str()),
            link: unwrap_redirect(&href),
            snippet,
        })
    }

    fn clean(&self, fragment: &str) -> String {
        let stripped = self.tag.replace_all(fragment, "");
        decode_html_entities(stripped.trim())
    }
}

/// Sponsored hits go through `duckduckgo.com/y.js?ad_domain=...`.
fn is_ad_link(href: &str) -> bool {
    href.contains("duckduckgo.com/y.js")
}

/// DuckDuckGo wraps outbound links as `//duckduckgo.com/l/?uddg=<target>&rut=...`.
fn unwrap_redirect(href: &str) -> String {
    let Some((_, query)) = href.split_once("uddg=") else {
        return href.to_string();
    };
    let encoded = query.split('&').next().unwrap_or_default();
    match urlencoding::decode(encoded) {
        Ok(target) => target.into_owned(),
        Err(_) => href.to_string(),
    }
}

/// `&amp;` goes last so `&amp;lt;` stays the literal text `&lt;`.
fn decode_html_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&#x27;", "'")
        .replace("&#x2F;", "/")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
