use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use landmark_quest::api;
use landmark_quest::config::Config;
use landmark_quest::infrastructure::{AppState, MemoryKeyValueStore};
use serde_json::{Value, json};
use tower::util::ServiceExt; // for `oneshot`
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_PATH: &str = "/search/local/V1/localSearch";

// Helper to create a test app; `None` leaves the setting unconfigured
fn setup_app(search_url: Option<String>, api_key: Option<&str>, backend: Option<String>) -> Router {
    let mut config = Config::default();
    if let Some(url) = search_url {
        config.local_search_url = url;
    }
    config.local_search_api_key = api_key.map(String::from);
    config.backend_url = backend;

    let state = AppState::new(config, Arc::new(MemoryKeyValueStore::new()))
        .expect("Failed to build state");
    api::api_router(state)
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_missing_api_key_returns_500_before_upstream_call() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let app = setup_app(
        Some(format!("{}{}", mock_server.uri(), SEARCH_PATH)),
        None,
        None,
    );

    // with and without coordinates
    for uri in ["/yahoo-local-search?lat=35.0&lon=135.0", "/yahoo-local-search"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            read_json(response).await,
            json!({ "error": "API key is not configured" })
        );
    }
}

#[tokio::test]
async fn test_missing_coordinates_returns_400() {
    let app = setup_app(None, Some("test-key"), None);

    for uri in [
        "/yahoo-local-search?lon=135.0",
        "/yahoo-local-search?lat=35.0",
        "/yahoo-local-search?lat=&lon=135.0",
        "/landmarks/nearby?lat=35.0",
    ] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri {}", uri);
        assert_eq!(
            read_json(response).await,
            json!({ "error": "Missing required parameters: lat and lon" })
        );
    }
}

#[tokio::test]
async fn test_upstream_status_is_relayed() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = setup_app(
        Some(format!("{}{}", mock_server.uri(), SEARCH_PATH)),
        Some("bad-key"),
        None,
    );

    let response = app
        .oneshot(get("/yahoo-local-search?lat=35.0&lon=135.0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        read_json(response).await,
        json!({ "error": "Yahoo API responded with status: 403" })
    );
}

#[tokio::test]
async fn test_undecodable_upstream_body_returns_500() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let app = setup_app(
        Some(format!("{}{}", mock_server.uri(), SEARCH_PATH)),
        Some("test-key"),
        None,
    );

    let response = app
        .oneshot(get("/yahoo-local-search?lat=35.0&lon=135.0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        read_json(response).await,
        json!({ "error": "Failed to fetch data from Yahoo API" })
    );
}

#[tokio::test]
async fn test_unreachable_upstream_returns_500() {
    // Nothing listens on the discard port
    let app = setup_app(
        Some(format!("http://127.0.0.1:9{}", SEARCH_PATH)),
        Some("test-key"),
        None,
    );

    let response = app
        .oneshot(get("/yahoo-local-search?lat=35.0&lon=135.0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        read_json(response).await,
        json!({ "error": "Failed to fetch data from Yahoo API" })
    );
}

#[tokio::test]
async fn test_quests_without_backend_return_503() {
    let app = setup_app(None, None, None);

    let response = app.oneshot(get("/quests")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        read_json(response).await,
        json!({ "error": "Quest backend is not configured" })
    );
}

#[tokio::test]
async fn test_quest_failures_are_generic() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quest"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": "db down" })))
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/quest/7"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let app = setup_app(None, None, Some(mock_server.uri()));

    let response = app.clone().oneshot(get("/quests")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(
        read_json(response).await,
        json!({ "error": "Failed to fetch quests" })
    );

    let request = Request::builder()
        .uri("/quests/7")
        .method("DELETE")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(
        read_json(response).await,
        json!({ "error": "Failed to delete quest" })
    );
}

#[tokio::test]
async fn test_invalid_visited_and_geofence_input() {
    let app = setup_app(None, None, None);

    let request = Request::builder()
        .uri("/visited")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&json!({ "id": "  " })).unwrap()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await,
        json!({ "error": "Missing landmark id" })
    );

    let payload = json!({
        "position": { "lat": 35.0, "lng": 135.0 },
        "landmark": { "name": "Gate", "latitude": 35.0, "longitude": 135.0 },
        "radius_m": -1.0
    });
    let request = Request::builder()
        .uri("/geofence/check")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&payload).unwrap()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await,
        json!({ "error": "radius_m must be a non-negative number" })
    );

    let response = app
        .oneshot(get("/geofence/circle?lat=35.0&lng=135.0&points=0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await,
        json!({ "error": "points must be between 1 and 1440" })
    );
}
