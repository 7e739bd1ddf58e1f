//! Integration tests for the catalog API endpoints.
//!
//! Most tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. This validates handler logic and routing
//! without needing a live network connection. The shutdown test serves on
//! a loopback listener because graceful shutdown only exists there.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use fluxflix_api::{AppState, build_router, serve};
use fluxflix_core::{EventStreamConfig, MovieCatalog, seed_demo_data};
use fluxflix_db::{DbError, InMemoryMovieStore, MovieStore};
use fluxflix_types::{Movie, MovieId, NewMovie};
use futures::StreamExt;
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tower::ServiceExt;

async fn make_test_state() -> (Arc<AppState<InMemoryMovieStore>>, Vec<Movie>) {
    let store = InMemoryMovieStore::new();
    let movies = seed_demo_data(&store, &["A", "B"]).await.unwrap();
    let catalog = MovieCatalog::new(store, EventStreamConfig::default());
    (Arc::new(AppState::new(catalog)), movies)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// A store whose every operation fails.
#[derive(Clone)]
struct FailingStore;

impl MovieStore for FailingStore {
    async fn create(&self, _movie: NewMovie) -> Result<Movie, DbError> {
        Err(DbError::Config("store offline".to_owned()))
    }

    async fn delete_all(&self) -> Result<(), DbError> {
        Err(DbError::Config("store offline".to_owned()))
    }

    async fn find_all(&self) -> Result<Vec<Movie>, DbError> {
        Err(DbError::Config("store offline".to_owned()))
    }

    async fn find_by_id(&self, _id: &MovieId) -> Result<Option<Movie>, DbError> {
        Err(DbError::Config("store offline".to_owned()))
    }

    async fn find_by_title(&self, _title: &str) -> Result<Vec<Movie>, DbError> {
        Err(DbError::Config("store offline".to_owned()))
    }
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_health() {
    let (state, _) = make_test_state().await;
    let response = build_router(state)
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response.into_body()).await["status"], "ok");
}

#[tokio::test]
async fn test_list_movies() {
    let (state, movies) = make_test_state().await;
    let response = build_router(state)
        .oneshot(Request::get("/movies").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    let arr = json.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["id"], movies[0].id.as_str());
    assert_eq!(arr[0]["title"], "A");
    assert_eq!(arr[1]["title"], "B");
}

#[tokio::test]
async fn test_list_movies_empty_store() {
    let catalog = MovieCatalog::new(InMemoryMovieStore::new(), EventStreamConfig::default());
    let response = build_router(Arc::new(AppState::new(catalog)))
        .oneshot(Request::get("/movies").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response.into_body()).await, serde_json::json!([]));
}

#[tokio::test]
async fn test_get_movie() {
    let (state, movies) = make_test_state().await;
    let uri = format!("/movies/{}", movies[1].id);
    let response = build_router(state)
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(
        json,
        serde_json::json!({"id": movies[1].id.as_str(), "title": "B"})
    );
}

#[tokio::test]
async fn test_get_movie_not_found() {
    let (state, _) = make_test_state().await;
    let response = build_router(state)
        .oneshot(
            Request::get("/movies/no-such-movie")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], 404);
    assert!(json["error"].as_str().unwrap().contains("no-such-movie"));
}

#[tokio::test]
async fn test_store_failure_is_500() {
    let catalog = MovieCatalog::new(FailingStore, EventStreamConfig::default());
    let router = build_router(Arc::new(AppState::new(catalog)));

    let response = router
        .clone()
        .oneshot(Request::get("/movies").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("store offline"));

    let response = router
        .oneshot(Request::get("/movies/x").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test(start_paused = true)]
async fn test_event_stream_frames() {
    let store = InMemoryMovieStore::new();
    let catalog = MovieCatalog::new(store, EventStreamConfig::new(Duration::from_millis(100)));
    let router = build_router(Arc::new(AppState::new(catalog)));

    // The id is deliberately not in the catalog.
    let response = router
        .oneshot(
            Request::get("/movies/ghost/events")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/event-stream"));

    let mut body = response.into_body().into_data_stream();
    let mut text = String::new();
    while text.matches("\n\n").count() < 2 {
        let chunk = body.next().await.unwrap().unwrap();
        text.push_str(std::str::from_utf8(&chunk).unwrap());
    }

    let frames: Vec<&str> = text.split("\n\n").filter(|f| !f.is_empty()).collect();
    assert!(frames.len() >= 2);
    for frame in frames.iter().take(2) {
        assert!(frame.contains("event: movie-event"));
        let data = frame
            .lines()
            .find_map(|line| line.strip_prefix("data: "))
            .unwrap();
        let event: Value = serde_json::from_str(data).unwrap();
        assert_eq!(event["movieId"], "ghost");
        assert!(event["dateViewed"].is_string());
    }
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn test_event_stream_disconnect_stops_producer() {
    let metrics = tokio::runtime::Handle::current().metrics();
    let catalog = MovieCatalog::new(
        InMemoryMovieStore::new(),
        EventStreamConfig::new(Duration::from_millis(100)),
    );
    let router = build_router(Arc::new(AppState::new(catalog)));

    let response = router
        .oneshot(Request::get("/movies/m1/events").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let mut body = response.into_body().into_data_stream();
    body.next().await.unwrap().unwrap();
    assert_eq!(metrics.num_alive_tasks(), 1);

    // A client disconnect drops the response body.
    drop(body);
    for _ in 0..10 {
        if metrics.num_alive_tasks() == 0 {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert_eq!(metrics.num_alive_tasks(), 0);
}

#[tokio::test]
async fn test_shutdown_closes_open_event_streams() {
    let catalog = MovieCatalog::new(
        InMemoryMovieStore::new(),
        EventStreamConfig::new(Duration::from_millis(20)),
    );
    let state = Arc::new(AppState::new(catalog));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(serve(listener, state, async move {
        stop_rx.await.ok();
    }));

    let mut client = TcpStream::connect(addr).await.unwrap();
    client
        .write_all(b"GET /movies/m1/events HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .await
        .unwrap();
    let mut buf = [0_u8; 1024];
    let read = client.read(&mut buf).await.unwrap();
    assert!(read > 0);
    assert!(std::str::from_utf8(&buf[..read]).unwrap().contains("200 OK"));

    stop_tx.send(()).unwrap();
    let result = tokio::time::timeout(Duration::from_secs(3), server)
        .await
        .unwrap()
        .unwrap();
    assert!(result.is_ok());
}
