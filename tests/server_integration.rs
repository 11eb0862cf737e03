//! Integration tests for the HTTP surface: a real listener on an
//! ephemeral port, driven with a real HTTP client.

use flate2::write::GzEncoder;
use flate2::Compression;
use logsieve::config::Config;
use logsieve::filter::AUTHOR_OFFSET;
use logsieve::server::LogServer;
use std::io::Write;
use std::net::SocketAddr;
use std::path::Path;
use tempfile::TempDir;

fn log_line(author: &str, message: &str) -> String {
    format!("{}{}{}", "0".repeat(AUTHOR_OFFSET), author, message)
}

fn write_gz(path: &Path, content: &str) {
    let file = std::fs::File::create(path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    encoder.finish().unwrap();
}

async fn spawn_server(logs_dir: &Path) -> SocketAddr {
    let config = Config {
        logs_dir: logs_dir.to_path_buf(),
        port: 0,
    };
    let app = LogServer::new(config).build_router();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn streams_matching_lines_from_plain_and_gzip_files() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("2015-05-01.txt"),
        format!(
            "{}\n{}\n",
            log_line("Alic", " hello"),
            log_line("Bob", " ignored")
        ),
    )
    .unwrap();
    write_gz(
        &dir.path().join("2015-05-02.txt.gz"),
        &format!(
            "{}\n{}\n",
            log_line("Bob", " more noise"),
            log_line("Alic", " from the archive")
        ),
    );

    let addr = spawn_server(dir.path()).await;

    // The listing route exposes enumeration order; the filtered body must
    // concatenate per-file output in exactly that order.
    let listing = reqwest::get(format!("http://{addr}/logs"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    let names: Vec<String> = serde_json::from_str(&listing).unwrap();

    let expected: String = names
        .iter()
        .map(|name| match name.as_str() {
            "2015-05-01.txt" => format!("{}\n", log_line("Alic", " hello")),
            "2015-05-02.txt.gz" => format!("{}\n", log_line("Alic", " from the archive")),
            other => panic!("unexpected corpus file {other}"),
        })
        .collect();

    let response = reqwest::get(format!("http://{addr}/logs/Alic"))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), expected);
}

#[tokio::test]
async fn unknown_author_gets_an_empty_200() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("log.txt"),
        format!("{}\n", log_line("Bob", " hi")),
    )
    .unwrap();

    let addr = spawn_server(dir.path()).await;
    let response = reqwest::get(format!("http://{addr}/logs/Nobody"))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert!(response.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn unreadable_directory_is_a_500_with_the_error_text() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("gone");

    let addr = spawn_server(&missing).await;
    let response = reqwest::get(format!("http://{addr}/logs/Alic"))
        .await
        .unwrap();
    assert_eq!(response.status(), 500);
    assert!(response
        .text()
        .await
        .unwrap()
        .contains("failed to list log directory"));
}

#[tokio::test]
async fn final_unterminated_line_is_streamed_without_a_newline() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("tail.txt"), log_line("Alic", " no newline")).unwrap();

    let addr = spawn_server(dir.path()).await;
    let body = reqwest::get(format!("http://{addr}/logs/Alic"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert_eq!(body, log_line("Alic", " no newline"));
    assert!(!body.ends_with('\n'));
}

#[tokio::test]
async fn listing_route_returns_corpus_file_names() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.txt"), "x").unwrap();
    std::fs::write(dir.path().join("b.txt.gz"), "y").unwrap();

    let addr = spawn_server(dir.path()).await;
    let body = reqwest::get(format!("http://{addr}/logs"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    let mut names: Vec<String> = serde_json::from_str(&body).unwrap();
    names.sort_unstable();
    assert_eq!(names, vec!["a.txt".to_string(), "b.txt.gz".to_string()]);
}

#[tokio::test]
async fn health_route_answers() {
    let dir = TempDir::new().unwrap();
    let addr = spawn_server(dir.path()).await;

    let response = reqwest::get(format!("http://{addr}/health")).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "ok");
}
