use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Form, Json, Router,
};
use contentflow::api::csrf::{get_cookie, CSRF_COOKIE_NAME};
use contentflow::dom::Document;
use contentflow::likes::LIKE_ERROR_MESSAGE;
use contentflow::logging::LogConfig;
use contentflow::{ApiClient, ApiError, LikeApi, LikeToggleController};
use contentflow_types::PostId;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const TOKEN: &str = "faketoken";

/// Likes per post id, flipped on every request like the real endpoint
#[derive(Clone, Default)]
struct MockSite {
    likes: Arc<Mutex<HashMap<String, (bool, u64)>>>,
    hits: Arc<Mutex<usize>>,
}

async fn like_toggle(
    State(site): State<MockSite>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    *site.hits.lock().unwrap() += 1;

    let token = headers.get("X-CSRFToken").and_then(|v| v.to_str().ok());
    if token != Some(TOKEN) {
        return Err(StatusCode::FORBIDDEN);
    }
    let post_id = form.get("post_id").ok_or(StatusCode::BAD_REQUEST)?;
    let numeric: i64 = post_id.parse().map_err(|_| StatusCode::NOT_FOUND)?;

    let mut likes = site.likes.lock().unwrap();
    let entry = likes.entry(post_id.clone()).or_insert((false, 0));
    entry.0 = !entry.0;
    entry.1 = if entry.0 { entry.1 + 1 } else { entry.1.saturating_sub(1) };

    Ok(Json(json!({
        "liked": entry.0,
        "likes_count": entry.1,
        "post_id": numeric,
    })))
}

async fn always_fails() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Server error" })),
    )
}

async fn not_json() -> &'static str {
    "<p>ok</p>"
}

async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn mock_site() -> (String, MockSite) {
    let site = MockSite::default();
    let app = Router::new()
        .route("/likes/ajax/like-toggle/", post(like_toggle))
        .with_state(site.clone());
    (spawn_server(app).await, site)
}

fn client(base_url: &str) -> ApiClient {
    let token = get_cookie("sessionid=x; csrftoken=faketoken", CSRF_COOKIE_NAME);
    ApiClient::new(base_url).with_csrf_token(token)
}

#[tokio::test]
async fn test_like_then_unlike_round_trip() {
    let (base_url, _site) = mock_site().await;
    let controller = LikeToggleController::new(client(&base_url), LogConfig::disabled());

    let mut doc = Document::new();
    let button = doc.add_like_button(PostId::from(1), false, 0);

    let first = controller.toggle(&mut doc, button).await.unwrap();
    assert!(first.liked);
    assert_eq!(doc.like_button(button).unwrap().label, "❤️ Unlike");
    assert_eq!(doc.like_button(button).unwrap().liked, "true");
    assert_eq!(doc.text_of("likes-count-1"), Some("1 like"));

    let second = controller.toggle(&mut doc, button).await.unwrap();
    assert!(!second.liked);
    assert_eq!(doc.like_button(button).unwrap().label, "🤍 Like");
    assert_eq!(doc.like_button(button).unwrap().liked, "false");
    assert_eq!(doc.text_of("likes-count-1"), Some("0 likes"));
    assert!(doc.alerts().is_empty());
}

#[tokio::test]
async fn test_buttons_only_touch_their_own_counter() {
    let (base_url, _site) = mock_site().await;
    let controller = LikeToggleController::new(client(&base_url), LogConfig::disabled());

    let mut doc = Document::new();
    let first = doc.add_like_button(PostId::from(1), false, 0);
    let _second = doc.add_like_button(PostId::from(2), false, 4);

    controller.toggle(&mut doc, first).await.unwrap();
    assert_eq!(doc.text_of("likes-count-1"), Some("1 like"));
    assert_eq!(doc.text_of("likes-count-2"), Some("4 likes"));
}

#[tokio::test]
async fn test_server_error_alerts_and_leaves_page() {
    let app = Router::new().route("/likes/ajax/like-toggle/", post(always_fails));
    let base_url = spawn_server(app).await;
    let controller = LikeToggleController::new(client(&base_url), LogConfig::disabled());

    let mut doc = Document::new();
    let button = doc.add_like_button(PostId::from(1), false, 0);
    let before = doc.like_button(button).unwrap().clone();

    let err = controller.toggle(&mut doc, button).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(doc.like_button(button).unwrap(), &before);
    assert_eq!(doc.text_of("likes-count-1"), Some("0 likes"));
    assert_eq!(doc.alerts(), &[LIKE_ERROR_MESSAGE.to_string()]);
}

#[tokio::test]
async fn test_missing_csrf_token_is_forbidden() {
    let (base_url, site) = mock_site().await;
    let controller = LikeToggleController::new(ApiClient::new(&base_url), LogConfig::disabled());

    let mut doc = Document::new();
    let button = doc.add_like_button(PostId::from(1), false, 0);

    let err = controller.toggle(&mut doc, button).await.unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));
    assert_eq!(doc.alerts().len(), 1);
    assert_eq!(*site.hits.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (base_url, _site) = mock_site().await;
    let api = client(&format!("{}/missing", base_url));
    let err = api.toggle_like(&PostId::from(1)).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn test_success_status_with_bad_body_is_an_error() {
    let app = Router::new().route("/likes/ajax/like-toggle/", post(not_json));
    let base_url = spawn_server(app).await;
    let controller = LikeToggleController::new(client(&base_url), LogConfig::disabled());

    let mut doc = Document::new();
    let button = doc.add_like_button(PostId::from(1), false, 0);

    let err = controller.toggle(&mut doc, button).await.unwrap_err();
    assert!(matches!(err, ApiError::Serialization(_)));
    assert_eq!(doc.like_button(button).unwrap().label, "🤍 Like");
    assert_eq!(doc.alerts().len(), 1);
}

#[tokio::test]
async fn test_network_failure_alerts() {
    // Bind then drop a listener so the port is known to be closed
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let controller =
        LikeToggleController::new(client(&format!("http://{}", addr)), LogConfig::disabled());
    let mut doc = Document::new();
    let button = doc.add_like_button(PostId::from(1), true, 3);

    let err = controller.toggle(&mut doc, button).await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(doc.like_button(button).unwrap().label, "❤️ Unlike");
    assert_eq!(doc.text_of("likes-count-1"), Some("3 likes"));
    assert_eq!(doc.alerts(), &[LIKE_ERROR_MESSAGE.to_string()]);
}
