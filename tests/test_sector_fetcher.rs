//! HTTP fetcher and full crawl against a local mock server.

mod common;

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use app_lib::error::CrawlError;
use app_lib::models::sector::SectorKey;
use app_lib::models::settings::AppSettings;
use app_lib::services::crawler::crawl;
use app_lib::services::sector_fetcher::{PageSource, SectorFetcher};
use common::{heatmap_page, page_without_container};

fn settings_for(server: &MockServer, sectors: &[&str]) -> AppSettings {
    AppSettings {
        base_url: format!("{}/sectors/{{sector}}", server.uri()),
        sectors: sectors.iter().map(|s| SectorKey::from(*s)).collect(),
        user_agent: "sector-crawler-test/1.0".to_string(),
        accept_language: "ko-KR,ko;q=0.9".to_string(),
        request_timeout_secs: Some(5),
        ..AppSettings::default()
    }
}

#[tokio::test]
async fn test_fetch_sends_identity_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sectors/technology"))
        .and(header("user-agent", "sector-crawler-test/1.0"))
        .and(header("accept-language", "ko-KR,ko;q=0.9"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>tech</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = SectorFetcher::new(&settings_for(&server, &["technology"])).unwrap();
    let body = fetcher.fetch_page(&"technology".into()).await.unwrap();
    assert_eq!(body, "<html>tech</html>");
}

#[tokio::test]
async fn test_all_sectors_key_fetches_base_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sectors/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("base"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = SectorFetcher::new(&settings_for(&server, &[""])).unwrap();
    assert_eq!(fetcher.fetch_page(&SectorKey::all_sectors()).await.unwrap(), "base");
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sectors/energy"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = SectorFetcher::new(&settings_for(&server, &["energy"])).unwrap();
    let err = fetcher.fetch_page(&"energy".into()).await.unwrap_err();

    assert!(err.is_fetch_failure());
    match err {
        CrawlError::Status { sector, url, status } => {
            assert_eq!(sector.as_str(), "energy");
            assert_eq!(status, 404);
            assert!(url.ends_with("/sectors/energy"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_transport_error_is_reported() {
    // nothing listens on the discard port
    let settings = AppSettings {
        base_url: "http://127.0.0.1:9/sectors/{sector}".to_string(),
        sectors: vec!["energy".into()],
        request_timeout_secs: Some(2),
        ..AppSettings::default()
    };
    let fetcher = SectorFetcher::new(&settings).unwrap();
    let err = fetcher.fetch_page(&"energy".into()).await.unwrap_err();

    assert!(matches!(err, CrawlError::Fetch { .. }));
    assert!(err.to_string().contains("energy"));
}

#[tokio::test]
async fn test_crawl_stops_at_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sectors/technology"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(heatmap_page(&[("AAPL", "+1.2%")])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sectors/energy"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sectors/utilities"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_without_container()))
        .expect(0)
        .mount(&server)
        .await;

    let settings = settings_for(&server, &["technology", "energy", "utilities"]);
    let fetcher = SectorFetcher::new(&settings).unwrap();
    let err = crawl(&settings, &fetcher, |_| {}).await.unwrap_err();

    assert!(matches!(err, CrawlError::Status { status: 500, .. }));
    server.verify().await;
}

#[tokio::test]
async fn test_crawl_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sectors/technology"))
        .respond_with(ResponseTemplate::new(200).set_body_string(heatmap_page(&[
            ("MSFT", "-0.3%"),
            ("AAPL", "+1.2%"),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sectors/energy"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_without_container()))
        .mount(&server)
        .await;

    let settings = settings_for(&server, &["technology", "energy"]);
    let fetcher = SectorFetcher::new(&settings).unwrap();
    let report = crawl(&settings, &fetcher, |_| {}).await.unwrap();

    assert_eq!(report.table.tickers(), &["AAPL", "MSFT"]);
    assert_eq!(report.table.changes(), &["+1.2%", "-0.3%"]);
    assert_eq!(report.table.segments(), vec![("technology", 2)]);
}
