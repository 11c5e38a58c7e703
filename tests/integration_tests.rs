//! Integration tests for the Web Status dashboard
//!
//! These tests write status and sources files to a temporary directory and
//! drive the HTTP router end to end.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

use webstatus::{
    config::Config,
    server::{build_router, AppState},
};

// ==================== Test Helpers ====================

const SOURCES: &str = r#"{
    "firefox_ios": {
        "name": "Firefox for iOS",
        "repository_url": "https://github.com/mozilla-l10n/firefoxios-l10n",
        "source_type": "xliff"
    },
    "browser": {
        "name": "Browser",
        "repository_url": "https://hg.mozilla.org/l10n-central",
        "source_type": "properties"
    },
    "amo": {
        "name": "AMO",
        "repository_url": "https://github.com/mozilla/addons-server",
        "source_type": "gettext"
    }
}"#;

const STATUS: &str = r#"{
    "metadata": {"creation_date": "2016-05-03T08:15:00+00:00"},
    "de": {
        "amo": {"percentage": 100, "total": 40, "source_type": "gettext"},
        "firefox_ios": {"percentage": 100, "total": 200, "source_type": "xliff"}
    },
    "fr": {
        "amo": {"percentage": 100, "total": 40, "source_type": "gettext"},
        "browser": {"percentage": 90, "identical": 30, "total": 100, "source_type": "properties"},
        "firefox_ios": {"percentage": 50, "total": 200, "source_type": "xliff"}
    },
    "it": {
        "browser": {
            "percentage": 70,
            "total": 100,
            "error_status": true,
            "error_message": "Missing file",
            "source_type": "properties"
        }
    }
}"#;

fn create_test_config(temp_dir: &TempDir, status: &str) -> Config {
    let webstatus_file = temp_dir.path().join("web_status.json");
    let sources_file = temp_dir.path().join("sources.json");
    std::fs::write(&webstatus_file, status).expect("Failed to write status file");
    std::fs::write(&sources_file, SOURCES).expect("Failed to write sources file");

    Config {
        webstatus_file,
        sources_file,
        history_url: "https://example.com/webstatus_history/".to_string(),
        assets_folder: "/assets".to_string(),
        default_locale: "en-US".to_string(),
        port: 8080,
    }
}

fn app(config: Config) -> Router {
    build_router(AppState {
        config: Arc::new(config),
    })
}

async fn get(app: Router, uri: &str, accept_language: Option<&str>) -> (StatusCode, Value) {
    let mut request = Request::builder().uri(uri);
    if let Some(value) = accept_language {
        request = request.header("accept-language", value);
    }

    let response = app
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).expect("Response should be JSON");
    (status, json)
}

// ==================== Single Locale View Tests ====================

#[tokio::test]
async fn test_single_locale_view() {
    let temp_dir = TempDir::new().unwrap();
    let (status, page) = get(app(create_test_config(&temp_dir, STATUS)), "/?locale=fr", None).await;

    assert_eq!(status, StatusCode::OK);
    let view = &page["view"];
    assert_eq!(view["mode"], "single_locale");
    assert_eq!(view["locale"], "fr");
    assert_eq!(view["supported"], true);
    assert_eq!(view["title"], "Web Status – fr");
    assert_eq!(view["xliff_note"], true);
    assert!(view.get("metadata").is_none());

    // Products are listed by display name
    let rows = view["rows"].as_array().unwrap();
    let ids: Vec<&str> = rows
        .iter()
        .map(|row| row["product_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["amo", "browser", "firefox_ios"]);
    assert_eq!(rows[2]["source_type"], "xliff");
    assert_eq!(
        rows[2]["repository_url"],
        "https://github.com/mozilla-l10n/firefoxios-l10n"
    );

    assert_eq!(page["requested_locale"], "fr");
    assert_eq!(
        page["url_history"],
        "https://example.com/webstatus_history/?product=all&locale=fr"
    );
    assert_eq!(page["last_update"], "2016-05-03 08:15 UTC (+0000)");
}

#[tokio::test]
async fn test_properties_penalty_changes_row_style() {
    let temp_dir = TempDir::new().unwrap();
    let (_, page) = get(app(create_test_config(&temp_dir, STATUS)), "/?locale=fr", None).await;

    // 90% with 30% identical strings is styled as 60%
    let browser = &page["view"]["rows"][1];
    assert_eq!(browser["product_id"], "browser");
    assert_eq!(browser["class"], "");
    assert_eq!(browser["style"], "background-color: #ffe4b3;");
}

#[tokio::test]
async fn test_error_row() {
    let temp_dir = TempDir::new().unwrap();
    let (_, page) = get(app(create_test_config(&temp_dir, STATUS)), "/?locale=it", None).await;

    let row = &page["view"]["rows"][0];
    assert_eq!(row["class"], "error");
    assert_eq!(row["style"], "");
    assert_eq!(row["record"]["error_message"], "Missing file");
    assert_eq!(page["view"]["xliff_note"], false);
}

#[tokio::test]
async fn test_unsupported_locale_is_not_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let (status, page) = get(app(create_test_config(&temp_dir, STATUS)), "/?locale=xx", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["view"]["supported"], false);
    assert_eq!(page["view"]["rows"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_locale_detected_from_accept_language() {
    let temp_dir = TempDir::new().unwrap();
    let (_, page) = get(
        app(create_test_config(&temp_dir, STATUS)),
        "/",
        Some("de-DE,de;q=0.9,en;q=0.5"),
    )
    .await;

    assert_eq!(page["view"]["locale"], "de");
    assert_eq!(page["requested_product"], "all");
}

#[tokio::test]
async fn test_locale_falls_back_to_default() {
    let temp_dir = TempDir::new().unwrap();
    let (_, page) = get(app(create_test_config(&temp_dir, STATUS)), "/", None).await;

    // en-US is the default but has no data
    assert_eq!(page["view"]["locale"], "en-US");
    assert_eq!(page["view"]["supported"], false);
}

// ==================== Single Product View Tests ====================

#[tokio::test]
async fn test_single_product_view() {
    let temp_dir = TempDir::new().unwrap();
    let (status, page) = get(
        app(create_test_config(&temp_dir, STATUS)),
        "/?product=firefox_ios&locale=fr",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let view = &page["view"];
    assert_eq!(view["mode"], "single_product");
    assert_eq!(view["product_name"], "Firefox for iOS");
    assert_eq!(view["title"], "Web Status – Firefox for iOS");
    assert_eq!(view["xliff_note"], true);
    assert_eq!(view["metadata"]["complete_locales"], 1);
    assert_eq!(view["metadata"]["total_locales"], 2);

    let locales: Vec<&str> = view["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["locale"].as_str().unwrap())
        .collect();
    assert_eq!(locales, vec!["de", "fr"]);

    assert_eq!(page["requested_locale"], "All locales");
    assert_eq!(
        page["url_history"],
        "https://example.com/webstatus_history/?product=firefox_ios&locale=all"
    );
}

#[tokio::test]
async fn test_unknown_product() {
    let temp_dir = TempDir::new().unwrap();
    let (status, page) = get(
        app(create_test_config(&temp_dir, STATUS)),
        "/?product=unknown",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let view = &page["view"];
    assert_eq!(view["supported"], false);
    assert_eq!(view["product_name"], "N/A");
    assert_eq!(view["metadata"]["complete_locales"], 0);
    assert_eq!(view["metadata"]["total_locales"], 0);
    assert_eq!(view["rows"].as_array().unwrap().len(), 0);
}

// ==================== Data Failure Tests ====================

#[tokio::test]
async fn test_missing_metadata_returns_server_error() {
    let temp_dir = TempDir::new().unwrap();
    let (status, body) = get(
        app(create_test_config(&temp_dir, r#"{"fr": {}}"#)),
        "/?locale=fr",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("metadata"));
}

#[tokio::test]
async fn test_identical_above_total_fails_whole_page() {
    // One broken properties record is enough to reject the snapshot
    let status = r#"{
        "metadata": {"creation_date": "2016-05-03T08:15:00+00:00"},
        "fr": {
            "amo": {"percentage": 100, "total": 40, "source_type": "gettext"},
            "browser": {"percentage": 90, "identical": 3, "total": 0, "source_type": "properties"}
        }
    }"#;
    let temp_dir = TempDir::new().unwrap();
    let (status_code, body) = get(
        app(create_test_config(&temp_dir, status)),
        "/?locale=fr",
        None,
    )
    .await;

    assert_eq!(status_code, StatusCode::INTERNAL_SERVER_ERROR);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("browser"));
    assert!(error.contains("identical strings (3) exceed total strings (0)"));
}

#[tokio::test]
async fn test_missing_status_file_returns_server_error() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = create_test_config(&temp_dir, STATUS);
    config.webstatus_file = temp_dir.path().join("does_not_exist.json");

    let (status, body) = get(app(config), "/", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("does_not_exist.json"));
}
