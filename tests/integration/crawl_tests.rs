//! Integration tests for the scraper
//!
//! These tests use wiremock to serve listing and detail pages and check the
//! whole fetch → parse → store cycle end-to-end.

use cinescrape::config::Config;
use cinescrape::crawler::{crawl, run_pages, Coordinator, RunSummary};
use cinescrape::storage::{MovieStore, SqliteStorage};
use cinescrape::MovieRecord;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server and a fresh data dir
fn create_test_config(base_url: &str, data_dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.site.base_url = base_url.to_string();
    config.site.accept_invalid_certs = false;
    config.site.request_timeout_secs = 5;
    config.site.connect_timeout_secs = 2;
    config.storage.data_dir = data_dir.path().to_string_lossy().into_owned();
    config
}

fn listing_page(hrefs: &[&str]) -> String {
    let cards: String = hrefs
        .iter()
        .map(|href| {
            format!(
                r#"<div class="el-card item"><a class="name" href="{}"><h2>x</h2></a></div>"#,
                href
            )
        })
        .collect();
    format!("<html><body>{}</body></html>", cards)
}

fn detail_page(name: &str, categories: &[&str], released: &str, drama: &str, score: &str) -> String {
    let buttons: String = categories
        .iter()
        .map(|c| format!("<button type=\"button\"><span>{}</span></button>", c))
        .collect();
    format!(
        r#"<html><body>
        <img class="cover" src="https://img.example.com/{name}.jpg">
        <a href="/"><h2>{name}</h2></a>
        <div class="categories">{buttons}</div>
        <div class="info"><span>{released}</span></div>
        <div class="drama"><p>{drama}</p></div>
        <p class="score">{score}</p>
        </body></html>"#
    )
}

async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

fn open_store(config: &Config) -> SqliteStorage {
    SqliteStorage::open(&config.storage).expect("Failed to open storage")
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_process_page_saves_every_detail() {
    let mock_server = MockServer::start().await;
    let data_dir = tempfile::tempdir().unwrap();

    mount_html(&mock_server, "/page/1", listing_page(&["/d/1", "/d/2"])).await;
    mount_html(
        &mock_server,
        "/d/1",
        detail_page(
            "Movie A",
            &["Drama", "Romance"],
            "2021-01-15上映",
            "A story.",
            "8.5",
        ),
    )
    .await;
    mount_html(
        &mock_server,
        "/d/2",
        detail_page("Movie B", &[], "上映时间未定", "", ""),
    )
    .await;

    let config = create_test_config(&mock_server.uri(), &data_dir);
    let coordinator = Coordinator::new(config.clone()).expect("Failed to create coordinator");

    let saved = coordinator.process_page(1).await.expect("Page failed");
    assert_eq!(saved, 2);

    let storage = open_store(&config);
    assert_eq!(storage.count_movies().unwrap(), 2);

    let movie_a = storage.get_movie("Movie A").unwrap().expect("Movie A missing");
    assert_eq!(
        movie_a,
        MovieRecord {
            cover: Some("https://img.example.com/Movie A.jpg".to_string()),
            name: "Movie A".to_string(),
            categories: vec!["Drama".to_string(), "Romance".to_string()],
            published_time: Some("2021-01-15".to_string()),
            drama: "A story.".to_string(),
            score: Some(8.5),
        }
    );

    let movie_b = storage.get_movie("Movie B").unwrap().expect("Movie B missing");
    assert!(movie_b.categories.is_empty());
    assert_eq!(movie_b.published_time, None);
    assert_eq!(movie_b.drama, "");
    assert_eq!(movie_b.score, None);
}

#[tokio::test]
async fn test_detail_404_persists_nothing_and_logs_once() {
    let mock_server = MockServer::start().await;
    let data_dir = tempfile::tempdir().unwrap();

    mount_html(&mock_server, "/page/1", listing_page(&["/d/missing", "/d/1"])).await;
    mount_status(&mock_server, "/d/missing", 404).await;
    mount_html(
        &mock_server,
        "/d/1",
        detail_page("Movie A", &["Drama"], "2021-01-15上映", "A story.", "8.5"),
    )
    .await;

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let config = create_test_config(&mock_server.uri(), &data_dir);
    let coordinator = Coordinator::new(config.clone()).unwrap();
    let saved = coordinator.process_page(1).await.unwrap();

    assert_eq!(saved, 1);
    let storage = open_store(&config);
    assert_eq!(storage.count_movies().unwrap(), 1);
    assert!(storage.get_movie("Movie A").unwrap().is_some());

    let missing_url = format!("{}/d/missing", mock_server.uri());
    let errors: Vec<String> = logs
        .lines()
        .into_iter()
        .filter(|line| line.contains("ERROR"))
        .collect();
    assert_eq!(errors.len(), 1, "Expected one error line, got {:?}", errors);
    assert!(errors[0].contains("404"));
    assert!(errors[0].contains(&missing_url));
}

#[tokio::test]
async fn test_failed_index_skips_parsing() {
    let mock_server = MockServer::start().await;
    let data_dir = tempfile::tempdir().unwrap();

    mount_status(&mock_server, "/page/1", 500).await;

    // No detail page may be requested when the listing fetch failed
    Mock::given(method("GET"))
        .and(path("/d/1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), &data_dir);
    let coordinator = Coordinator::new(config.clone()).unwrap();

    assert_eq!(coordinator.process_page(1).await.unwrap(), 0);
    assert_eq!(open_store(&config).count_movies().unwrap(), 0);
}

#[tokio::test]
async fn test_same_movie_on_two_pages_is_one_document() {
    let mock_server = MockServer::start().await;
    let data_dir = tempfile::tempdir().unwrap();

    mount_html(&mock_server, "/page/1", listing_page(&["/d/first"])).await;
    mount_html(&mock_server, "/page/2", listing_page(&["/d/second"])).await;
    mount_html(
        &mock_server,
        "/d/first",
        detail_page("Movie A", &["Drama"], "2021-01-15上映", "Old text.", "7.0"),
    )
    .await;
    mount_html(
        &mock_server,
        "/d/second",
        detail_page("Movie A", &["Comedy"], "", "New text.", "9.0"),
    )
    .await;

    let config = create_test_config(&mock_server.uri(), &data_dir);
    let coordinator = Coordinator::new(config.clone()).unwrap();

    coordinator.process_page(1).await.unwrap();
    coordinator.process_page(2).await.unwrap();

    let storage = open_store(&config);
    assert_eq!(storage.count_movies().unwrap(), 1);

    let movie = storage.get_movie("Movie A").unwrap().unwrap();
    assert_eq!(movie.categories, vec!["Comedy".to_string()]);
    assert_eq!(movie.published_time, None);
    assert_eq!(movie.drama, "New text.");
    assert_eq!(movie.score, Some(9.0));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_run_pages_isolates_failing_pages() {
    let mock_server = MockServer::start().await;
    let data_dir = tempfile::tempdir().unwrap();

    mount_html(&mock_server, "/page/1", listing_page(&["/d/1"])).await;
    mount_status(&mock_server, "/page/2", 503).await;
    mount_html(&mock_server, "/page/3", listing_page(&["/d/3", "/d/gone"])).await;
    mount_html(
        &mock_server,
        "/d/1",
        detail_page("Movie One", &["Drama"], "1994-09-10上映", "One.", "9.5"),
    )
    .await;
    mount_html(
        &mock_server,
        "/d/3",
        detail_page("Movie Three", &["Action"], "2008-07-18上映", "Three.", "not rated"),
    )
    .await;
    mount_status(&mock_server, "/d/gone", 404).await;

    let config = create_test_config(&mock_server.uri(), &data_dir);
    let coordinator = Coordinator::new(config.clone()).unwrap();

    let summary = run_pages(&coordinator, 3, 2).await;
    assert_eq!(
        summary,
        RunSummary {
            pages_completed: 3,
            pages_failed: 0,
            movies_saved: 2,
        }
    );

    let storage = open_store(&config);
    let names: Vec<String> = storage
        .list_movies()
        .unwrap()
        .into_iter()
        .map(|m| m.name)
        .collect();
    assert_eq!(names, vec!["Movie One".to_string(), "Movie Three".to_string()]);
    assert_eq!(
        storage.get_movie("Movie Three").unwrap().unwrap().score,
        None
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_crawl_covers_configured_page_range() {
    let mock_server = MockServer::start().await;
    let data_dir = tempfile::tempdir().unwrap();

    for page in 1..=4 {
        mount_html(
            &mock_server,
            &format!("/page/{}", page),
            listing_page(&[&format!("/d/{}", page)]),
        )
        .await;
        mount_html(
            &mock_server,
            &format!("/d/{}", page),
            detail_page(&format!("Movie {}", page), &["Drama"], "", "", "8.0"),
        )
        .await;
    }

    // Pages past the configured range must not be requested
    Mock::given(method("GET"))
        .and(path("/page/5"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server.uri(), &data_dir);
    config.site.total_pages = 4;
    config.workers.count = Some(3);

    let summary = crawl(config.clone()).await.expect("Crawl failed");
    assert_eq!(summary.pages_completed, 4);
    assert_eq!(summary.movies_saved, 4);
    assert_eq!(open_store(&config).count_movies().unwrap(), 4);
}
