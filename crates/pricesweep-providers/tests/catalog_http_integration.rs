//! Catalog client against a mock HTTP catalog
//!
//! Uses wiremock to serve price-window pages computed from the request's
//! `minPrice`/`maxPrice` parameters, then drives full sweeps over HTTP.

use pricesweep_core::{EnumerationDriver, FilterRange, RangeSource, SweepError};
use pricesweep_providers::{CatalogClient, CatalogError};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Serves pages like the real catalog: inclusive filter, per-call cap, lowest prices first
struct PriceWindowResponder {
    prices: Vec<i64>,
    cap: usize,
}

impl Respond for PriceWindowResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let param = |name: &str| {
            request
                .url
                .query_pairs()
                .find(|(k, _)| k == name)
                .and_then(|(_, v)| v.parse::<i64>().ok())
        };
        let (Some(min), Some(max)) = (param("minPrice"), param("maxPrice")) else {
            return ResponseTemplate::new(400);
        };

        let matching: Vec<i64> = self
            .prices
            .iter()
            .copied()
            .filter(|p| (min..=max).contains(p))
            .collect();
        let products: Vec<_> = matching
            .iter()
            .take(self.cap)
            .map(|p| json!({ "name": format!("product-{p}"), "price": p }))
            .collect();

        ResponseTemplate::new(200).set_body_json(json!({
            "total": matching.len(),
            "count": products.len(),
            "products": products,
        }))
    }
}

async fn catalog_server(prices: Vec<i64>, cap: usize) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(PriceWindowResponder { prices, cap })
        .mount(&server)
        .await;
    server
}

fn client_for(server: &MockServer) -> CatalogClient {
    CatalogClient::new(&format!("{}/products", server.uri())).unwrap()
}

#[tokio::test]
async fn test_fetch_page_sends_inclusive_bounds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("minPrice", "100"))
        .and(query_param("maxPrice", "200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1,
            "count": 1,
            "products": [{ "name": "lamp", "price": 150 }],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server)
        .fetch_page(FilterRange::new(100, 200))
        .await
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.count, 1);
    assert_eq!(page.records[0]["name"], "lamp");
}

#[tokio::test]
async fn test_server_error_is_remote_query_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let range = FilterRange::new(0, 10);

    let err = client.fetch(range).await.unwrap_err();

    assert!(matches!(err, SweepError::RemoteQuery { status: 500, .. }));
    assert_eq!(err.range(), Some(range));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let raw = client.fetch_page(FilterRange::new(0, 10)).await.unwrap_err();
    assert!(matches!(raw, CatalogError::Decode(_)));

    let err = client.fetch(FilterRange::new(0, 10)).await.unwrap_err();
    assert!(matches!(err, SweepError::Decode { .. }));
}

#[tokio::test]
async fn test_slow_server_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "total": 0, "count": 0, "products": [] }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = CatalogClient::with_timeout(
        &format!("{}/products", server.uri()),
        Duration::from_millis(100),
    )
    .unwrap();

    let raw = client.fetch_page(FilterRange::new(0, 10)).await.unwrap_err();
    assert!(matches!(raw, CatalogError::Timeout { .. }));

    let err = client.fetch(FilterRange::new(0, 10)).await.unwrap_err();
    assert!(matches!(err, SweepError::Transport { .. }));
}

#[tokio::test]
async fn test_small_catalog_is_one_request() {
    let server = catalog_server((0..500).map(|i| i * 200).collect(), 1_000).await;
    let driver = EnumerationDriver::new(client_for(&server), 1_000);

    let report = driver.run(FilterRange::new(0, 100_000)).await.unwrap();

    assert_eq!(report.records.len(), 500);
    assert_eq!(report.calls, 1);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_sweep_over_http_is_complete() {
    let prices: Vec<i64> = (0..2_500).map(|i| i * 40).collect();
    let server = catalog_server(prices.clone(), 1_000).await;
    let driver = EnumerationDriver::new(client_for(&server), 1_000).with_max_concurrent_requests(4);

    let report = driver.run(FilterRange::new(0, 100_000)).await.unwrap();

    let returned: Vec<i64> = report
        .records
        .iter()
        .map(|r| r["price"].as_i64().unwrap())
        .collect();
    assert_eq!(returned, prices);
    assert!(report.calls > 1);
    assert_eq!(
        report.calls as usize,
        server.received_requests().await.unwrap().len()
    );
}

#[tokio::test]
async fn test_hotspot_over_http_is_partial() {
    let mut prices = vec![4_200; 1_500];
    prices.extend([10, 20, 30]);
    let server = catalog_server(prices, 1_000).await;
    let driver = EnumerationDriver::new(client_for(&server), 1_000);

    let report = driver.run(FilterRange::new(0, 100_000)).await.unwrap();

    assert_eq!(report.total, 1_503);
    assert_eq!(report.records.len(), 1_003);
    assert!(!report.is_complete());
    assert_eq!(report.residues[0].price, 4_200);
}
