//! Listing refresh against a mocked places API
//!
//! Covers the full path: nearby search over HTTP, card rendering, and the
//! patch of a real page on disk.

use std::path::Path;

use furluna_core::config::{ApiKey, MissingRegionPolicy, SearchFailurePolicy};
use furluna_core::storage::{END_MARKER, PatchAction, PatchError};
use furluna_core::{FurlunaConfig, RuntimeMode};
use furluna_web::{ListingRefresher, RefreshError};
use httpmock::prelude::*;
use serde_json::json;
use tempfile::TempDir;

const PAGE: &str = r#"<!DOCTYPE HTML>
<html>
<head><title>Schedule an appointment</title></head>
<body class="is-preload">
    <section id="sidebar"><nav><a href="/dashboard">Dashboard</a></nav></section>
    <div id="wrapper">
    <section><h2>Old Vet</h2></section><!-- END OF REPLACEMENT -->
    </div>
    <footer id="footer">Furluna</footer>
</body>
</html>
"#;

fn setup_page() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("schedule_appt.html"), PAGE).unwrap();
    dir
}

fn production_config(server: &MockServer, public_dir: &Path) -> FurlunaConfig {
    let mut config = FurlunaConfig::for_testing(public_dir);
    config.runtime_mode = RuntimeMode::Production;
    config.places.api_key = Some(ApiKey::new("integration-key"));
    config.places.base_url = server.base_url();
    config
}

fn outside_region(text: &str) -> (String, String) {
    let start = text.find(r#"<div id="wrapper">"#).unwrap();
    let end = text.find(END_MARKER).unwrap() + END_MARKER.len();
    (text[..start].to_string(), text[end..].trim_start_matches('\n').to_string())
}

#[tokio::test]
async fn test_listing_refresh_end_to_end() {
    let server = MockServer::start_async().await;
    let search = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/maps/api/place/nearbysearch/json")
                .query_param("key", "integration-key")
                .query_param("location", "37.7749,-122.4194")
                .query_param("radius", "482803")
                .query_param("type", "veterinary_care");
            then.status(200).json_body(json!({
                "status": "OK",
                "results": [
                    { "name": "Happy Paws Vet", "photos": [{ "photo_reference": "abc123" }] },
                    { "name": "City Animal Hospital" }
                ]
            }));
        })
        .await;

    let dir = setup_page();
    let config = production_config(&server, dir.path());
    let refresher = ListingRefresher::from_config(&config).unwrap();

    let report = refresher.refresh().await.unwrap();
    search.assert_async().await;
    assert_eq!(report.places, 2);
    assert_eq!(report.patch.unwrap().action, PatchAction::Replaced);

    let written = std::fs::read_to_string(&config.listing.target_file).unwrap();
    assert!(!written.contains("Old Vet"));

    let first = written.find("<h2>Happy Paws Vet</h2>").unwrap();
    let second = written.find("<h2>City Animal Hospital</h2>").unwrap();
    let end = written.find(END_MARKER).unwrap();
    assert!(first < second && second < end);
    assert_eq!(written.matches("<section>").count(), 2);
    assert_eq!(written.matches(END_MARKER).count(), 1);

    let photo_src = format!(
        r#"src="{}/maps/api/place/photo?maxwidth=400&amp;photo_reference=abc123&amp;key=integration-key""#,
        server.base_url()
    );
    assert!(written.contains(&photo_src));
    assert!(written.contains(r#"<img src="" alt="""#));

    // Everything outside the region is untouched
    assert_eq!(outside_region(&written), outside_region(PAGE));
}

#[tokio::test]
async fn test_repeated_refresh_is_stable() {
    let server = MockServer::start_async().await;
    let search = server
        .mock_async(|when, then| {
            when.method(GET).path("/maps/api/place/nearbysearch/json");
            then.status(200).json_body(json!({
                "status": "OK",
                "results": [{ "name": "Happy Paws Vet" }]
            }));
        })
        .await;

    let dir = setup_page();
    let config = production_config(&server, dir.path());
    let refresher = ListingRefresher::from_config(&config).unwrap();

    refresher.refresh().await.unwrap();
    let first = std::fs::read_to_string(&config.listing.target_file).unwrap();

    let report = refresher.refresh().await.unwrap();
    let second = std::fs::read_to_string(&config.listing.target_file).unwrap();

    search.assert_hits_async(2).await;
    assert_eq!(first, second);
    assert_eq!(report.patch.unwrap().action, PatchAction::Unchanged);
}

#[tokio::test]
async fn test_failed_search_writes_error_notice() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/maps/api/place/nearbysearch/json");
            then.status(500);
        })
        .await;

    let dir = setup_page();
    let config = production_config(&server, dir.path());
    let refresher = ListingRefresher::from_config(&config).unwrap();

    let report = refresher.refresh().await.unwrap();
    assert_eq!(report.places, 0);
    assert!(report.search_error.is_some());

    let written = std::fs::read_to_string(&config.listing.target_file).unwrap();
    assert!(written.contains("<p>Error fetching nearby hospitals</p><!-- END OF REPLACEMENT -->"));
    assert!(!written.contains("Old Vet"));
    assert_eq!(outside_region(&written), outside_region(PAGE));
}

#[tokio::test]
async fn test_failed_search_can_keep_existing_listing() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/maps/api/place/nearbysearch/json");
            then.status(200)
                .json_body(json!({ "status": "REQUEST_DENIED", "error_message": "bad key" }));
        })
        .await;

    let dir = setup_page();
    let mut config = production_config(&server, dir.path());
    config.listing.search_failure = SearchFailurePolicy::KeepExisting;
    let refresher = ListingRefresher::from_config(&config).unwrap();

    let report = refresher.refresh().await.unwrap();
    assert!(report.patch.is_none());
    assert!(report.search_error.unwrap().contains("REQUEST_DENIED"));
    assert_eq!(
        std::fs::read_to_string(&config.listing.target_file).unwrap(),
        PAGE
    );
}

#[tokio::test]
async fn test_missing_api_key_never_calls_service() {
    let server = MockServer::start_async().await;
    let search = server
        .mock_async(|when, then| {
            when.method(GET).path("/maps/api/place/nearbysearch/json");
            then.status(200).json_body(json!({ "status": "OK", "results": [] }));
        })
        .await;

    let dir = setup_page();
    let mut config = production_config(&server, dir.path());
    config.places.api_key = None;
    config.listing.search_failure = SearchFailurePolicy::EmptyListing;
    let refresher = ListingRefresher::from_config(&config).unwrap();

    let report = refresher.refresh().await.unwrap();
    search.assert_hits_async(0).await;
    assert_eq!(report.places, 0);

    let written = std::fs::read_to_string(&config.listing.target_file).unwrap();
    assert_eq!(written.matches("<section>").count(), 0);
    assert_eq!(written.matches(END_MARKER).count(), 1);
}

#[tokio::test]
async fn test_page_without_region() {
    let dir = tempfile::tempdir().unwrap();
    let page = dir.path().join("schedule_appt.html");
    let original = "<html><body><p>No listing yet</p></body></html>";
    std::fs::write(&page, original).unwrap();

    let mut config = FurlunaConfig::for_testing(dir.path());
    let refresher = ListingRefresher::from_config(&config).unwrap();
    let result = refresher.refresh().await;
    assert!(matches!(
        result,
        Err(RefreshError::Patch(PatchError::RegionNotFound { .. }))
    ));
    assert_eq!(std::fs::read_to_string(&page).unwrap(), original);

    config.listing.missing_region = MissingRegionPolicy::Append;
    let refresher = ListingRefresher::from_config(&config).unwrap();
    let report = refresher.refresh().await.unwrap();
    assert_eq!(report.patch.unwrap().action, PatchAction::Appended);

    let written = std::fs::read_to_string(&page).unwrap();
    let region = written.find(r#"<div id="wrapper">"#).unwrap();
    assert!(region < written.find("</body>").unwrap());
    assert!(written.contains("<p>No listing yet</p>"));
}
