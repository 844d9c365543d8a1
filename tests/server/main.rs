use std::net::SocketAddr;

use ping_echo_api::{
    config::AppConfig,
    errors::server_error::ServerError,
    routes::ping::EchoResponse,
    server::{bind, build_app, serve},
};
use tokio::sync::oneshot;

#[tokio::test]
async fn serves_ping_over_tcp_until_shutdown() {
    let listener = bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("should bind an ephemeral port");
    let addr = listener.local_addr().expect("should have a local address");

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(serve(listener, build_app(AppConfig::default()), async move {
        let _ = shutdown_rx.await;
    }));

    let response = reqwest::Client::new()
        .get(format!("http://{addr}/ping?name=alice&name=bob"))
        .header("X-Test", "1")
        .send()
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "application/json");

    let bytes = response.bytes().await.expect("should read body");
    let echo: EchoResponse = serde_json::from_slice(&bytes).expect("should parse JSON");

    assert_eq!(echo.request_uri, "/ping?name=alice&name=bob");
    assert_eq!(echo.payload["name"], vec!["alice", "bob"]);
    assert_eq!(echo.headers["X-Test"], vec!["1"]);
    assert_eq!(echo.headers["Host"], vec![addr.to_string()]);
    assert!(echo.client_ip.starts_with("127.0.0.1:"));

    shutdown_tx.send(()).expect("server should still be running");
    server
        .await
        .expect("server task should not panic")
        .expect("server should stop cleanly");
}

#[tokio::test]
async fn binding_a_busy_port_is_an_error() {
    let taken = bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("should bind an ephemeral port");
    let addr = taken.local_addr().expect("should have a local address");

    let err = bind(addr).await.expect_err("port is already in use");

    assert!(matches!(err, ServerError::Bind { addr: failed, .. } if failed == addr));
}
