//! Integration tests for the HTTP repo client against a local server

use repopulse_core::error::CoreError;
use repopulse_core::{
    ClientConfig, HttpRepoClient, RepoDataSource, RepoId, StaticSettings, SvgRenderer, Theme,
    Widget, WidgetKind, WidgetState,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve one canned HTTP response, returning the request head it received
async fn serve_once(status: &'static str, body: &'static str) -> (SocketAddr, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 4096];
        let n = socket.read(&mut buf).await.unwrap();
        let request = String::from_utf8_lossy(&buf[..n]).to_string();

        let response = format!(
            "HTTP/1.1 {}\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });

    (addr, handle)
}

fn client_for(addr: SocketAddr) -> HttpRepoClient {
    HttpRepoClient::new(ClientConfig {
        base_url: format!("http://{}/github", addr),
        timeout: Duration::from_secs(5),
        system_proxy: false,
    })
    .unwrap()
}

fn repo() -> RepoId {
    "octo/widgets".parse().unwrap()
}

#[tokio::test]
async fn test_fetch_repo_detail_ok() {
    let (addr, server) = serve_once(
        "200 OK",
        r#"{"s": [["2023-01-05", 3], ["2023-01-20", 2], ["2023-02-01", 5]]}"#,
    )
    .await;

    let detail = client_for(addr).get_repo_detail(&repo()).await.unwrap();
    assert_eq!(detail.stars.len(), 3);
    assert!(detail.influence.is_empty());

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /github/octo/widgets/meta.json "));
}

#[tokio::test]
async fn test_fetch_repo_detail_http_error() {
    let (addr, _server) = serve_once("404 Not Found", "{}").await;

    let err = client_for(addr).get_repo_detail(&repo()).await.unwrap_err();
    assert!(matches!(err, CoreError::HttpStatus { status: 404, .. }));
    assert!(err.is_fetch_error());
}

#[tokio::test]
async fn test_fetch_repo_detail_bad_body() {
    let (addr, _server) = serve_once("200 OK", r#"{"s": "oops"}"#).await;

    let err = client_for(addr).get_repo_detail(&repo()).await.unwrap_err();
    assert!(matches!(err, CoreError::Parse { .. }));
}

#[tokio::test]
async fn test_widget_end_to_end_svg() {
    let (addr, _server) = serve_once(
        "200 OK",
        r#"{"s": [["2022-12-30", 1], ["2023-01-05", 3], ["2023-01-20", 2]]}"#,
    )
    .await;

    let mut widget = Widget::new(
        WidgetKind::StarPopup,
        Theme::Dark,
        Arc::new(client_for(addr)),
        Arc::new(StaticSettings::default()),
        SvgRenderer::new(),
    );
    widget.mount(repo());
    widget.settled().await;

    assert_eq!(widget.state(), WidgetState::Ready);
    let svg = widget
        .with_renderer(|r| r.svg().map(str::to_owned))
        .expect("frame drawn");
    assert!(svg.contains("#0d1118"));
    assert!(svg.contains("<path"));
}

#[tokio::test]
async fn test_widget_unreachable_backend_fails_quietly() {
    // Bind then drop to get a port nothing listens on
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };

    let mut widget = Widget::new(
        WidgetKind::InfluenceChart,
        Theme::Light,
        Arc::new(client_for(addr)),
        Arc::new(StaticSettings::default()),
        SvgRenderer::new(),
    );
    widget.mount(repo());
    widget.settled().await;

    assert_eq!(widget.state(), WidgetState::Failed);
    assert!(widget.view().is_none());
    assert!(widget.with_renderer(|r| r.svg().is_none()));
}
