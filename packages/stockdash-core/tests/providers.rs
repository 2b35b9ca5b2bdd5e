//! HTTP-level tests for the price, fundamentals and news providers.

use std::time::Duration;

use chrono::NaiveDate;
use mockito::{Matcher, Server};
use stockdash_core::providers::{
    AlphaVantageClient, FundamentalsProvider, NewsProvider, PriceProvider, ProviderError,
    YahooNewsFeed, YahooPriceClient,
};
use stockdash_core::{DateRange, StatementKind};

const TIMEOUT: Duration = Duration::from_secs(5);

const CHART_BODY: &str = r#"{
    "chart": {
        "result": [{
            "meta": {"currency": "USD", "symbol": "AAPL", "exchangeTimezoneName": "America/New_York", "gmtoffset": -18000},
            "timestamp": [1672756200, 1672842600, 1672929000, 1673015400],
            "indicators": {
                "quote": [{
                    "open": [130.28, 126.89, 127.13, 126.01],
                    "high": [130.90, 128.66, 127.77, 130.29],
                    "low": [124.17, 125.08, 124.76, 124.89],
                    "close": [125.07, 126.36, 125.02, 129.62],
                    "volume": [112117500, 89113600, 80962700, 87754700]
                }],
                "adjclose": [{"adjclose": [123.90, 125.18, 123.85, 128.41]}]
            }
        }],
        "error": null
    }
}"#;

const FEED_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Yahoo! Finance: AAPL News</title>
    <item>
      <title>Apple stock rallies on strong iPhone demand</title>
      <description>Shares gained after analysts upgraded the stock.</description>
      <pubDate>Fri, 06 Jan 2023 18:12:00 +0000</pubDate>
    </item>
    <item>
      <title>Apple supplier warns of weak quarter</title>
      <description>Weak demand weighs on the sector.</description>
      <pubDate>Thu, 05 Jan 2023 09:45:00 +0000</pubDate>
    </item>
    <item>
      <title>Apple to present at conference</title>
      <description>The company will webcast the event.</description>
      <pubDate>Wed, 04 Jan 2023 12:00:00 +0000</pubDate>
    </item>
  </channel>
</rss>"#;

fn range() -> DateRange {
    DateRange::parse("2023-01-03", "2023-01-07").unwrap()
}

#[tokio::test]
async fn test_yahoo_prices() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v8/finance/chart/AAPL")
        .match_query(Matcher::AllOf(vec![
            // one day before the requested start
            Matcher::UrlEncoded("period1".into(), "1672617600".into()),
            Matcher::UrlEncoded("period2".into(), "1673049600".into()),
            Matcher::UrlEncoded("interval".into(), "1d".into()),
            Matcher::UrlEncoded("includeAdjustedClose".into(), "true".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(CHART_BODY)
        .create_async()
        .await;

    let client =
        YahooPriceClient::new(&format!("{}/v8/finance/chart", server.url()), TIMEOUT).unwrap();
    let series = client.fetch_prices("aapl", range()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(series.symbol(), "AAPL");
    assert_eq!(series.len(), 4);
    assert_eq!(
        series.first_date(),
        Some(NaiveDate::from_ymd_opt(2023, 1, 3).unwrap())
    );
    assert_eq!(series.adj_closes(), vec![123.90, 125.18, 123.85, 128.41]);
}

#[tokio::test]
async fn test_yahoo_unknown_symbol() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/chart/ZZZZZZ")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#)
        .create_async()
        .await;

    let client = YahooPriceClient::new(&format!("{}/chart", server.url()), TIMEOUT).unwrap();
    let err = client.fetch_prices("ZZZZZZ", range()).await.unwrap_err();
    assert!(err.is_no_data(), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_yahoo_server_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/chart/AAPL")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("Service Unavailable")
        .create_async()
        .await;

    let client = YahooPriceClient::new(&format!("{}/chart", server.url()), TIMEOUT).unwrap();
    match client.fetch_prices("AAPL", range()).await {
        Err(ProviderError::Status { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "Service Unavailable");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_alpha_vantage_statement() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/query")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("function".into(), "INCOME_STATEMENT".into()),
            Matcher::UrlEncoded("symbol".into(), "IBM".into()),
            Matcher::UrlEncoded("apikey".into(), "test-key".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "symbol": "IBM",
                "annualReports": [
                    {"fiscalDateEnding": "2023-12-31", "reportedCurrency": "USD", "totalRevenue": "61860000000", "netIncome": "7502000000"},
                    {"fiscalDateEnding": "2022-12-31", "reportedCurrency": "USD", "totalRevenue": "60530000000", "netIncome": "1640000000"}
                ],
                "quarterlyReports": []
            }"#,
        )
        .create_async()
        .await;

    let client =
        AlphaVantageClient::new(&server.url(), Some("test-key".to_string()), TIMEOUT).unwrap();
    let statement = client.income_statement("IBM").await.unwrap();

    mock.assert_async().await;
    assert_eq!(statement.kind, StatementKind::IncomeStatement);
    assert_eq!(statement.periods, vec!["2023-12-31", "2022-12-31"]);
    assert_eq!(statement.value("netIncome", "2022-12-31"), Some(1640000000.0));
    assert!(statement.row("reportedCurrency").is_none());
}

#[tokio::test]
async fn test_alpha_vantage_rate_limit_note() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/query")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"Note": "Our standard API call frequency is 5 calls per minute and 500 calls per day."}"#)
        .create_async()
        .await;

    let client =
        AlphaVantageClient::new(&server.url(), Some("test-key".to_string()), TIMEOUT).unwrap();
    let err = client.balance_sheet("IBM").await.unwrap_err();
    assert!(matches!(err, ProviderError::Api(ref msg) if msg.contains("5 calls per minute")));
}

#[tokio::test]
async fn test_alpha_vantage_without_key_makes_no_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/query")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = AlphaVantageClient::new(&server.url(), None, TIMEOUT).unwrap();
    let err = client.cash_flow("IBM").await.unwrap_err();

    assert!(matches!(err, ProviderError::MissingApiKey));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_news_feed() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/rss/2.0/headline")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("s".into(), "AAPL".into()),
            Matcher::UrlEncoded("region".into(), "US".into()),
            Matcher::UrlEncoded("lang".into(), "en-US".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/rss+xml")
        .with_body(FEED_BODY)
        .create_async()
        .await;

    let feed = YahooNewsFeed::new(&format!("{}/rss/2.0/headline", server.url()), TIMEOUT).unwrap();
    let items = feed.latest_news("AAPL", 2).await.unwrap();

    mock.assert_async().await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title, "Apple stock rallies on strong iPhone demand");
    assert!(items[0].title_sentiment > 0.0);
    assert!(items[1].title_sentiment < 0.0);
    assert!(items[1].summary_sentiment < 0.0);
    assert!(items.iter().all(|item| item.published_at.is_some()));
}

#[tokio::test]
async fn test_news_feed_http_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/rss")
        .match_query(Matcher::Any)
        .with_status(429)
        .with_body("Too Many Requests")
        .create_async()
        .await;

    let feed = YahooNewsFeed::new(&format!("{}/rss", server.url()), TIMEOUT).unwrap();
    let err = feed.latest_news("AAPL", 10).await.unwrap_err();
    assert!(matches!(err, ProviderError::Status { status: 429, .. }));
}
