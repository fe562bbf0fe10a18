//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use tempfile::TempDir;
use tokio::net::TcpListener;
use veneto_venues::config::AppConfig;
use veneto_venues::dataset::Datasets;
use veneto_venues::http::HttpServer;
use veneto_venues::lifecycle::Shutdown;

/// A server running in-process on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub output_dir: TempDir,
    pub datasets: Datasets,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Path of a shipped data file.
pub fn data_path(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(file)
}

/// Start the service over the shipped tables, writing downloads to a temp dir.
pub async fn start_server() -> TestServer {
    let output_dir = tempfile::tempdir().unwrap();

    let mut config = AppConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.datasets.venues_path = data_path("data.csv").to_string_lossy().into_owned();
    config.datasets.cinemas_path = data_path("cinema.csv").to_string_lossy().into_owned();
    config.downloads.output_dir = output_dir.path().to_string_lossy().into_owned();

    let datasets = Datasets::load(&config.datasets).unwrap();
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, datasets.clone());
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Listener is already bound; give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestServer {
        addr,
        output_dir,
        datasets,
        shutdown,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap()
}
