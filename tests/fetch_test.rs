//! Integration tests for the HTTP price source

use swap_quote::error::FetchError;
use swap_quote::sources::{HttpPriceSource, PriceSource};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PRICES: &str = r#"[
  {"currency":"BLUR","date":"2023-08-29T07:10:40.000Z","price":0.20811525423728813},
  {"currency":"ETH","date":"2023-08-29T07:10:52.000Z","price":1645.9337373737374},
  {"currency":"ETH","date":"2023-08-29T07:10:40.000Z","price":1600.0},
  {"currency":"USDC","date":"2023-08-29T07:10:30.000Z","price":1},
  {"currency":"USDC","date":"2023-08-29T07:10:30.000Z","price":0.989832},
  {"currency":"WBTC","date":"2023-08-29T07:10:52.000Z","price":26002.82202020202,"iconUrl":"WBTC.svg"},
  {"currency":"LUNA","date":"2023-08-29T07:10:52.000Z","price":0}
]"#;

fn source(server: &MockServer) -> HttpPriceSource {
    HttpPriceSource::new(reqwest::Client::new(), &server.uri(), "/prices.json").unwrap()
}

#[tokio::test]
async fn test_fetch_price_map_keeps_latest_per_currency() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/prices.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PRICES, "application/json"))
        .mount(&server)
        .await;

    let map = source(&server).fetch_price_map().await.unwrap();

    assert_eq!(
        map.currencies().collect::<Vec<_>>(),
        vec!["BLUR", "ETH", "USDC", "WBTC"]
    );
    assert_eq!(map.price("ETH"), Some(1645.9337373737374));
    // Same timestamp: first record wins.
    assert_eq!(map.price("USDC"), Some(1.0));
    assert_eq!(map.get("WBTC").unwrap().icon_url.as_deref(), Some("WBTC.svg"));
    assert!(!map.contains("LUNA"));
}

#[tokio::test]
async fn test_fetch_records_returns_raw_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/prices.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PRICES, "application/json"))
        .mount(&server)
        .await;

    let records = source(&server).fetch_records().await.unwrap();
    assert_eq!(records.len(), 7);
}

#[tokio::test]
async fn test_error_field_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_raw(r#"{"error":"maintenance"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let err = source(&server).fetch_price_map().await.unwrap_err();
    match err {
        FetchError::Api { status, message } => {
            assert_eq!(status.as_u16(), 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_without_message_uses_generic_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let err = source(&server).fetch_records().await.unwrap_err();
    assert_eq!(err.to_string(), "price API HTTP 404 Not Found: Failed to fetch data");
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"prices":[]}"#, "application/json"))
        .mount(&server)
        .await;

    let err = source(&server).fetch_records().await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn test_query_params_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/prices.json"))
        .and(query_param("chain", "eth"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let map = source(&server)
        .with_param("chain", "eth")
        .fetch_price_map()
        .await
        .unwrap();
    assert!(map.is_empty());
}

#[tokio::test]
async fn test_record_with_bad_date_is_skipped_not_fatal() {
    let body = r#"[
      {"currency":"ETH","date":"2023-08-29T07:10:40.000Z","price":1600.0},
      {"currency":"ETH","date":"yesterday","price":1700.0},
      {"currency":"WBTC","date":"2023-08-29T07:10:52.000Z","price":26002.8}
    ]"#;
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/prices.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(&server)
        .await;

    let map = source(&server).fetch_price_map().await.unwrap();

    assert_eq!(map.len(), 2);
    assert_eq!(map.price("ETH"), Some(1600.0));
    assert_eq!(map.price("WBTC"), Some(26002.8));
}
