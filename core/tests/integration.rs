//! End-to-end activations against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `Fetcher` over real
//! HTTP through `ReqwestTransport`. Validates that descriptors built by
//! `PlaceholderApi` and response decoding work against the actual routes.

use std::sync::Arc;
use std::time::Duration;

use fetch_core::{
    ErrorKind, FetchConfig, Fetcher, NewPost, PlaceholderApi, RecordingObserver, RequestDescriptor, RequestState,
    ReqwestTransport, Status, StatusPolicy,
};
use serde_json::json;

/// Start the mock server on a random port and return its base URL.
async fn start_mock_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    format!("http://{addr}")
}

fn config(base_url: &str) -> FetchConfig {
    FetchConfig {
        base_url: base_url.to_string(),
        timeout: Duration::from_secs(5),
        ..FetchConfig::default()
    }
}

#[tokio::test]
async fn users_first_element_is_alice() {
    let base = start_mock_server().await;
    let config = config(&base);
    let api = PlaceholderApi::from_config(&config);
    let fetcher = Fetcher::from_config(&config).unwrap();

    fetcher.activate(api.list_users()).unwrap();
    assert_eq!(fetcher.state(), RequestState::Loading);

    let state = fetcher.settled().await;
    assert_eq!(state.status(), Status::Success);
    let first = &state.data().unwrap()[0];
    assert_eq!(first["id"], 1);
    assert_eq!(first["name"], "Alice");
}

#[tokio::test]
async fn todos_are_returned_as_a_list() {
    let base = start_mock_server().await;
    let config = config(&base);
    let fetcher = Fetcher::from_config(&config).unwrap();

    fetcher.activate(PlaceholderApi::from_config(&config).list_todos()).unwrap();

    let state = fetcher.settled().await;
    let todos = state.data().unwrap().as_array().unwrap();
    assert_eq!(todos.len(), 3);
    assert_eq!(todos[0]["userId"], 1);
}

#[tokio::test]
async fn create_post_returns_id_101() {
    let base = start_mock_server().await;
    let config = config(&base);
    let recorder = RecordingObserver::new();
    let fetcher = Fetcher::from_config(&config)
        .unwrap()
        .with_observer(Arc::new(recorder.clone()));

    let descriptor = PlaceholderApi::from_config(&config)
        .create_post(&NewPost::sample())
        .unwrap();
    fetcher.activate(descriptor).unwrap();

    let state = fetcher.settled().await;
    let post = state.data().unwrap();
    assert_eq!(post["id"], 101);
    assert_eq!(post["title"], "Novo Post");
    assert_eq!(post["userId"], 1);
    assert_eq!(recorder.statuses(), vec![Status::Loading, Status::Success]);
    assert!(recorder.transitions()[1].url.ends_with("/posts"));
}

#[tokio::test]
async fn missing_user_is_an_error_by_default() {
    let base = start_mock_server().await;
    let config = config(&base);
    let fetcher = Fetcher::from_config(&config).unwrap();

    fetcher.activate(PlaceholderApi::from_config(&config).get_user(999)).unwrap();

    let state = fetcher.settled().await;
    assert_eq!(state.status(), Status::Error);
    assert!(state.data().is_none());
    let err = state.error().unwrap();
    assert_eq!(err.kind(), ErrorKind::HttpStatus);
    assert_eq!(err.to_string(), "HTTP 404: {}");
}

#[tokio::test]
async fn missing_user_parses_when_any_status_is_accepted() {
    let base = start_mock_server().await;
    let config = FetchConfig {
        status_policy: StatusPolicy::AcceptAny,
        ..config(&base)
    };
    let fetcher = Fetcher::from_config(&config).unwrap();

    fetcher.activate(PlaceholderApi::from_config(&config).get_user(999)).unwrap();

    assert_eq!(fetcher.settled().await, RequestState::Success(json!({})));
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    // Bind and release a port so nothing is listening on it.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let fetcher = Fetcher::new(ReqwestTransport::new(&config("unused")).unwrap());

    fetcher
        .activate(RequestDescriptor::get(format!("http://{addr}/users")))
        .unwrap();

    let state = fetcher.settled().await;
    assert_eq!(state.status(), Status::Error);
    assert_eq!(state.error().unwrap().kind(), ErrorKind::Network);
}

#[tokio::test]
async fn reactivation_overwrites_previous_terminal_state() {
    let base = start_mock_server().await;
    let config = config(&base);
    let api = PlaceholderApi::from_config(&config);
    let fetcher = Fetcher::from_config(&config).unwrap();

    fetcher.activate(api.get_user(999)).unwrap();
    assert_eq!(fetcher.settled().await.status(), Status::Error);

    fetcher.activate(api.get_user(1)).unwrap();
    let state = fetcher.settled().await;
    assert_eq!(state.status(), Status::Success);
    assert_eq!(state.data().unwrap()["name"], "Alice");
    assert!(state.error().is_none());
}

#[tokio::test]
async fn empty_url_never_reaches_the_network() {
    let fetcher = Fetcher::from_config(&FetchConfig::default()).unwrap();

    let err = fetcher.activate(RequestDescriptor::get("")).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert_eq!(fetcher.state(), RequestState::Idle);
}
