//! Integration tests for a full scrape run
//!
//! These tests use wiremock to serve target pages and check the run summary
//! together with the file written to the data directory.

use daria_scrape::config::{Config, LoggingConfig, OutputFormat, Settings, Target};
use daria_scrape::output::{read_json, split_links, WriteError};
use daria_scrape::scrape::{run, Orchestrator};
use daria_scrape::ScrapeError;
use std::path::Path;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration writing into the given directory
fn create_test_config(targets: Vec<Target>, data_dir: &Path, format: OutputFormat) -> Config {
    Config {
        settings: Settings {
            user_agent: "TestBot/1.0".to_string(),
            request_delay: 0.0,
            timeout: 5.0,
            output_format: format,
            data_dir: data_dir.to_path_buf(),
            filename_prefix: "test_run".to_string(),
        },
        logging: LoggingConfig::default(),
        targets,
    }
}

async fn mount_page(server: &MockServer, route: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_failed_target_is_counted_and_skipped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/broken", 500, "oops").await;
    mount_page(
        &mock_server,
        "/daria",
        200,
        r#"<html><head><title>Daria</title></head><body>
            <h1>Daria Morgendorffer</h1>
            <a href="/art_alter-egos.html#daria">Alter egos</a>
            <a href="ch_jane.html">Jane</a>
        </body></html>"#,
    )
    .await;

    let data_dir = tempdir().unwrap();
    let config = create_test_config(
        vec![
            Target::new("Broken", format!("{}/broken", base_url)).with_selector("title", "h1"),
            Target::new("Daria", format!("{}/daria", base_url))
                .with_selector("title", "h1")
                .with_selector("links", "a[href]"),
        ],
        data_dir.path(),
        OutputFormat::Json,
    );

    let summary = run(config).await.expect("run should complete");

    assert_eq!(summary.attempted, 2);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 1);
    assert!(!summary.all_failed());
    assert_eq!(summary.failures[0].name, "Broken");
    assert!(summary.failures[0].error.contains("500"));
    assert!(summary.duration().is_some());

    let output_path = summary.output_path.expect("output path should be set");
    assert!(output_path.starts_with(data_dir.path()));
    assert_eq!(output_path.extension().unwrap(), "json");

    let records = read_json(&output_path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].target_name, "Daria");
    assert_eq!(records[0].title.as_deref(), Some("Daria Morgendorffer"));
    assert_eq!(
        records[0].links,
        vec![
            format!("{}/art_alter-egos.html#daria", base_url),
            format!("{}/ch_jane.html", base_url),
        ]
    );
}

#[tokio::test]
async fn test_records_follow_declared_target_order() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/z", 200, "<h1>Zeta</h1>").await;
    mount_page(&mock_server, "/a", 200, "<h1>Alpha</h1>").await;
    mount_page(&mock_server, "/m", 200, "<h1>Mu</h1>").await;

    let data_dir = tempdir().unwrap();
    let targets = ["z", "a", "m"]
        .iter()
        .map(|name| {
            Target::new(*name, format!("{}/{}", base_url, name)).with_selector("title", "h1")
        })
        .collect();
    let config = create_test_config(targets, data_dir.path(), OutputFormat::Json);

    let summary = run(config).await.unwrap();
    assert_eq!(summary.succeeded, 3);

    let records = read_json(&summary.output_path.unwrap()).unwrap();
    let titles: Vec<_> = records.iter().map(|r| r.title.as_deref().unwrap()).collect();
    assert_eq!(titles, vec!["Zeta", "Alpha", "Mu"]);
}

#[tokio::test]
async fn test_csv_with_no_successful_targets_is_header_only() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/gone", 404, "not found").await;

    let data_dir = tempdir().unwrap();
    let config = create_test_config(
        vec![Target::new("Gone", format!("{}/gone", base_url)).with_selector("title", "h1")],
        data_dir.path(),
        OutputFormat::Csv,
    );

    let summary = run(config).await.expect("writer must not fail on zero records");

    assert_eq!(summary.attempted, 1);
    assert_eq!(summary.failed, 1);
    assert!(summary.all_failed());

    let output_path = summary.output_path.unwrap();
    let content = std::fs::read_to_string(&output_path).unwrap();
    assert_eq!(content, "target_name,url,title,links,content,fetched_at\n");
}

#[tokio::test]
async fn test_csv_output_flattens_links() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/art",
        200,
        r#"<html><body>
            <img src="/img/daria_1.png"><img src="/img/daria_2.png">
            <p class="caption">Alter egos</p>
        </body></html>"#,
    )
    .await;

    let data_dir = tempdir().unwrap();
    let config = create_test_config(
        vec![Target::new("Art", format!("{}/art", base_url))
            .with_selector("links", "img")
            .with_selector("caption", "p.caption")],
        data_dir.path(),
        OutputFormat::Csv,
    );

    let summary = run(config).await.unwrap();

    let mut reader = csv::Reader::from_path(summary.output_path.unwrap()).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.get(6), Some("caption"));

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get(0), Some("Art"));
    assert_eq!(rows[0].get(6), Some("Alter egos"));
    assert_eq!(
        split_links(rows[0].get(3).unwrap()),
        vec![
            format!("{}/img/daria_1.png", base_url),
            format!("{}/img/daria_2.png", base_url),
        ]
    );
}

#[tokio::test]
async fn test_write_failure_aborts_run() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", 200, "<h1>Hi</h1>").await;

    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "a file, not a directory").unwrap();

    let config = create_test_config(
        vec![Target::new("Home", mock_server.uri()).with_selector("title", "h1")],
        &blocker.join("data"),
        OutputFormat::Json,
    );

    let result = run(config).await;
    assert!(matches!(
        result,
        Err(ScrapeError::Write(WriteError::CreateDir { .. }))
    ));
}

#[tokio::test]
async fn test_invalid_config_fetches_nothing() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let data_dir = tempdir().unwrap();
    let config = create_test_config(
        vec![
            Target::new("Fine", mock_server.uri()),
            Target::new("Broken", mock_server.uri()).with_selector("content", "div >"),
        ],
        data_dir.path(),
        OutputFormat::Json,
    );

    assert!(matches!(
        Orchestrator::new(config),
        Err(ScrapeError::Config(_))
    ));
}

#[tokio::test]
async fn test_back_to_back_runs_keep_both_outputs() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/daria", 200, "<h1>Daria</h1>").await;

    let data_dir = tempdir().unwrap();
    let make_config = || {
        create_test_config(
            vec![Target::new("Daria", format!("{}/daria", mock_server.uri()))
                .with_selector("title", "h1")],
            data_dir.path(),
            OutputFormat::Json,
        )
    };

    let first = run(make_config()).await.unwrap().output_path.unwrap();
    let second = run(make_config()).await.unwrap().output_path.unwrap();

    assert_ne!(first, second);
    assert_eq!(read_json(&first).unwrap().len(), 1);
    assert_eq!(read_json(&second).unwrap().len(), 1);
    assert_eq!(std::fs::read_dir(data_dir.path()).unwrap().count(), 2);
}
