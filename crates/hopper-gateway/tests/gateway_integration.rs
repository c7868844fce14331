use axum::body::Body;
use axum::extract::connect_info::MockConnectInfo;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use hopper_core::ManualClock;
use hopper_gateway::app::App;
use hopper_gateway::state::AppState;
use hopper_generator::RandomGenerator;
use hopper_shortener::ShortenerService;
use hopper_storage::InMemoryRepository;
use jiff::{SignedDuration, Timestamp};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceExt;

const BASE_URL: &str = "http://localhost:5050/shorturls";

fn start() -> Timestamp {
    "2026-01-01T00:00:00Z".parse().unwrap()
}

fn app() -> (Router, ManualClock) {
    let clock = ManualClock::new(start());
    let service = ShortenerService::with_clock(
        InMemoryRepository::new(),
        RandomGenerator::new(),
        clock.clone(),
    );
    let router = App::router(AppState::new(Arc::new(service), BASE_URL))
        .layer(MockConnectInfo(SocketAddr::from(([203, 0, 113, 9], 40000))));
    (router, clock)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, header::HeaderMap, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

fn create(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/shorturls")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn root_reports_running() {
    let (app, _) = app();
    let (status, _, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "URL Shortener Backend is running."}));
}

#[tokio::test]
async fn create_redirect_and_stats() {
    let (app, clock) = app();

    let (status, _, body) = send(
        &app,
        create(json!({"url": "https://example.com", "validity": 1, "shortcode": "abcd"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["shortLink"], "http://localhost:5050/shorturls/abcd");
    assert_eq!(body["expiry"], "2026-01-01T00:01:00Z");

    clock.advance(SignedDuration::from_secs(5));
    let request = Request::builder()
        .uri("/shorturls/abcd/redirect")
        .header(header::REFERER, "https://news.example/")
        .body(Body::empty())
        .unwrap();
    let (status, headers, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(headers[header::LOCATION], "https://example.com");

    let (status, _, stats) = send(&app, get("/shorturls/abcd")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["url"], "https://example.com");
    assert_eq!(stats["createdAt"], "2026-01-01T00:00:00Z");
    assert_eq!(stats["expiry"], "2026-01-01T00:01:00Z");
    assert_eq!(stats["validity"], 1);
    assert_eq!(stats["clickCount"], 1);
    assert_eq!(
        stats["clicks"][0],
        json!({
            "timestamp": "2026-01-01T00:00:05Z",
            "referrer": "https://news.example/",
            "sourceAddress": "203.0.113.9",
        })
    );
}

#[tokio::test]
async fn generated_code_uses_default_validity() {
    let (app, _) = app();

    let (status, _, body) = send(&app, create(json!({"url": "https://example.com/page"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["expiry"], "2026-01-01T00:30:00Z");

    let link = body["shortLink"].as_str().unwrap();
    let code = link.strip_prefix("http://localhost:5050/shorturls/").unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));

    let (status, _, stats) = send(&app, get(&format!("/shorturls/{}", code))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["validity"], 30);
    assert_eq!(stats["clickCount"], 0);
    assert_eq!(stats["clicks"], json!([]));
}

#[tokio::test]
async fn validation_errors_are_bad_requests() {
    let (app, _) = app();

    let cases = [
        (json!({"url": "not-a-url"}), "Invalid URL"),
        (json!({}), "Invalid URL"),
        (
            json!({"url": "https://example.com", "validity": 0}),
            "Validity must be a positive integer (minutes)",
        ),
        (
            json!({"url": "https://example.com", "validity": "5"}),
            "Validity must be a positive integer (minutes)",
        ),
        (
            json!({"url": "https://example.com", "shortcode": "ab"}),
            "Shortcode must be alphanumeric, 4-16 chars",
        ),
        (
            json!({"url": "https://example.com", "shortcode": "bad-code"}),
            "Shortcode must be alphanumeric, 4-16 chars",
        ),
    ];

    for (request, message) in cases {
        let (status, _, body) = send(&app, create(request.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", request);
        assert_eq!(body, json!({"error": message}), "{}", request);
    }
}

#[tokio::test]
async fn url_with_line_break_is_rejected_and_stores_nothing() {
    let (app, _) = app();

    let (status, _, body) = send(
        &app,
        create(json!({"url": "https://example.com/a\nb", "shortcode": "nlnl"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid URL"}));

    let (status, _, _) = send(&app, get("/shorturls/nlnl/redirect")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _, _) = send(&app, get("/shorturls/nlnl")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let (app, _) = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/shorturls")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, _, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn duplicate_shortcode_conflicts() {
    let (app, _) = app();
    let body = json!({"url": "https://example.com", "shortcode": "taken1"});

    let (status, _, _) = send(&app, create(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _, error) = send(&app, create(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error, json!({"error": "Shortcode already exists"}));
}

#[tokio::test]
async fn unknown_codes_are_not_found() {
    let (app, _) = app();

    for uri in ["/shorturls/nope1234", "/shorturls/nope1234/redirect", "/shorturls/x!"] {
        let (status, _, body) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body, json!({"error": "Shortcode not found"}), "{}", uri);
    }
}

#[tokio::test]
async fn expired_redirect_is_gone_but_stats_remain() {
    let (app, clock) = app();
    send(
        &app,
        create(json!({"url": "https://example.com", "validity": 1, "shortcode": "brief"})),
    )
    .await;

    clock.advance(SignedDuration::from_mins(1));
    let (status, headers, body) = send(&app, get("/shorturls/brief/redirect")).await;
    assert_eq!(status, StatusCode::GONE);
    assert!(headers.get(header::LOCATION).is_none());
    assert_eq!(body, json!({"error": "Shortcode expired"}));

    let (status, _, stats) = send(&app, get("/shorturls/brief")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["clickCount"], 0);
}

#[tokio::test]
async fn redirect_without_referer_records_null() {
    let (app, _) = app();
    send(
        &app,
        create(json!({"url": "https://example.com", "shortcode": "plain"})),
    )
    .await;

    let (status, _, _) = send(&app, get("/shorturls/plain/redirect")).await;
    assert_eq!(status, StatusCode::FOUND);

    let (_, _, stats) = send(&app, get("/shorturls/plain")).await;
    assert!(stats["clicks"][0]["referrer"].is_null());
}
