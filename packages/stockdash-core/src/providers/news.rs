//! Yahoo Finance RSS headline feed.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Url};
use scraper::{ElementRef, Html, Selector};

use super::{http_client, normalize_symbol, NewsProvider, ProviderError};
use crate::sentiment::SentimentAnalyzer;
use crate::types::NewsItem;

/// Headline feed client that scores each item as it is parsed.
#[derive(Debug, Clone)]
pub struct YahooNewsFeed {
    base_url: String,
    client: Client,
    analyzer: SentimentAnalyzer,
}

impl YahooNewsFeed {
    pub const DEFAULT_BASE_URL: &'static str = "https://feeds.finance.yahoo.com/rss/2.0/headline";

    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self::with_client(base_url, http_client(timeout)?))
    }

    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            analyzer: SentimentAnalyzer::default(),
        }
    }

    fn build_url(&self, symbol: &str) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| ProviderError::Url(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("s", symbol)
            .append_pair("region", "US")
            .append_pair("lang", "en-US");
        Ok(url)
    }
}

#[async_trait]
impl NewsProvider for YahooNewsFeed {
    async fn latest_news(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<NewsItem>, ProviderError> {
        let symbol = normalize_symbol(symbol)?;
        let url = self.build_url(&symbol)?;
        tracing::debug!(symbol = %symbol, limit, "requesting news feed");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ProviderError::status(status, &body));
        }

        let items = parse_feed(&body, limit, &self.analyzer)?;
        tracing::debug!(symbol = %symbol, items = items.len(), "news feed received");
        Ok(items)
    }

    fn name(&self) -> &str {
        "yahoo_rss"
    }
}

struct FeedSelectors {
    channel: Selector,
    item: Selector,
    title: Selector,
    description: Selector,
    pub_date: Selector,
}

impl FeedSelectors {
    fn new() -> Result<Self, ProviderError> {
        let parse = |s: &str| {
            Selector::parse(s).map_err(|e| ProviderError::Parse(format!("selector {s}: {e}")))
        };
        Ok(Self {
            channel: parse("channel")?,
            item: parse("item")?,
            title: parse("title")?,
            description: parse("description")?,
            // Element names are lowercased by the HTML parser
            pub_date: parse("pubdate")?,
        })
    }
}

/// Parse an RSS 2.0 document into at most `limit` scored news items, in feed order.
///
/// An item without a title is skipped. A missing description scores as neutral.
pub fn parse_feed(
    xml: &str,
    limit: usize,
    analyzer: &SentimentAnalyzer,
) -> Result<Vec<NewsItem>, ProviderError> {
    let selectors = FeedSelectors::new()?;
    // CDATA sections are comments to the HTML parser; unwrap them first
    let cleaned = xml.replace("<![CDATA[", "").replace("]]>", "");
    let document = Html::parse_document(&cleaned);

    let channel = document
        .select(&selectors.channel)
        .next()
        .ok_or_else(|| ProviderError::Parse("feed has no channel".to_string()))?;

    let items = channel
        .select(&selectors.item)
        .filter_map(|item| {
            let title = child_text(item, &selectors.title)?;
            let summary = child_text(item, &selectors.description).unwrap_or_default();
            let published = child_text(item, &selectors.pub_date).unwrap_or_default();
            let published_at = DateTime::parse_from_rfc2822(&published)
                .ok()
                .map(|dt| dt.with_timezone(&Utc));

            Some(NewsItem {
                title_sentiment: analyzer.compound(&title),
                summary_sentiment: analyzer.compound(&summary),
                published,
                published_at,
                title,
                summary,
            })
        })
        .take(limit)
        .collect();

    Ok(items)
}

fn child_text(parent: ElementRef<'_>, selector: &Selector) -> Option<String> {
    let text = parent
        .select(selector)
        .next()?
        .text()
        .collect::<String>()
        .trim()
        .to_string();
    (!text.is_empty()).then_some(text)
}
