use std::net::SocketAddr;

use axum::{
    body::{to_bytes, Body},
    extract::connect_info::MockConnectInfo,
    http::{Request, StatusCode},
    response::Response,
    routing::get,
    Router,
};
use ping_echo_api::{
    config::AppConfig, middleware, routes::ping::EchoResponse, server::build_app,
};
use tower::ServiceExt;

const PEER: &str = "203.0.113.7:54321";

fn peer() -> SocketAddr {
    PEER.parse().expect("valid peer address")
}

fn app(config: AppConfig) -> Router {
    build_app(config).layer(MockConnectInfo(peer()))
}

async fn call(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request)
        .await
        .expect("should have gotten a response")
}

async fn echo_of(response: Response) -> EchoResponse {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("should read body");
    serde_json::from_slice(&bytes).expect("should parse JSON")
}

async fn boom() -> &'static str {
    panic!("handler exploded")
}

//
// ----------- Request Id -----------
//

#[tokio::test]
async fn responses_carry_a_generated_request_id() {
    let request = Request::builder().uri("/ping").body(Body::empty()).unwrap();

    let response = call(app(AppConfig::default()), request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Missing x-request-id")
        .to_str()
        .unwrap()
        .to_owned();
    assert!(!request_id.is_empty());

    let echo = echo_of(response).await;
    assert_eq!(echo.headers["X-Request-Id"], vec![request_id]);
}

#[tokio::test]
async fn incoming_request_id_is_kept() {
    let request = Request::builder()
        .uri("/ping")
        .header("x-request-id", "abc-123")
        .body(Body::empty())
        .unwrap();

    let response = call(app(AppConfig::default()), request).await;

    assert_eq!(response.headers()["x-request-id"], "abc-123");
    assert_eq!(echo_of(response).await.headers["X-Request-Id"], vec!["abc-123"]);
}

//
// ----------- Client Address -----------
//

#[tokio::test]
async fn trusted_proxy_headers_override_peer_address() {
    let request = Request::builder()
        .uri("/ping")
        .header("x-forwarded-for", "198.51.100.4, 10.0.0.1")
        .body(Body::empty())
        .unwrap();

    let echo = echo_of(call(app(AppConfig::default()), request).await).await;

    assert_eq!(echo.client_ip, "198.51.100.4");
    assert_eq!(
        echo.headers["X-Forwarded-For"],
        vec!["198.51.100.4, 10.0.0.1"]
    );
}

#[tokio::test]
async fn proxy_headers_are_ignored_when_not_trusted() {
    let config = AppConfig {
        trust_proxy_headers: false,
        ..AppConfig::default()
    };
    let request = Request::builder()
        .uri("/ping")
        .header("x-real-ip", "198.51.100.5")
        .body(Body::empty())
        .unwrap();

    let echo = echo_of(call(app(config), request).await).await;

    assert_eq!(echo.client_ip, PEER);
}

#[tokio::test]
async fn empty_proxy_header_defers_to_the_next_one() {
    let request = Request::builder()
        .uri("/ping")
        .header("true-client-ip", "")
        .header("x-real-ip", "198.51.100.5")
        .body(Body::empty())
        .unwrap();

    let echo = echo_of(call(app(AppConfig::default()), request).await).await;

    assert_eq!(echo.client_ip, "198.51.100.5");
}

#[tokio::test]
async fn invalid_proxy_header_falls_back_to_peer_address() {
    let request = Request::builder()
        .uri("/ping")
        .header("x-real-ip", "unknown")
        .body(Body::empty())
        .unwrap();

    let echo = echo_of(call(app(AppConfig::default()), request).await).await;

    assert_eq!(echo.client_ip, PEER);
}

//
// ----------- Panic Recovery -----------
//

#[tokio::test]
async fn panicking_handler_becomes_500_and_service_keeps_serving() {
    let config = AppConfig::default();
    let router = middleware::apply(
        Router::new()
            .route("/boom", get(boom))
            .route("/ok", get(|| async { "fine" })),
        &config,
    );

    let response = call(
        router.clone(),
        Request::builder().uri("/boom").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().contains_key("x-request-id"));

    let response = call(
        router,
        Request::builder().uri("/ok").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn malformed_query_still_passes_through_the_stack_as_400() {
    let request = Request::builder()
        .uri("/ping?bad=%ZZ")
        .body(Body::empty())
        .unwrap();

    let response = call(app(AppConfig::default()), request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().contains_key("x-request-id"));
}
