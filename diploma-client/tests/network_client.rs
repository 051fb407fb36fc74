// diploma-client/tests/network_client.rs
// Network transport against a registry bound to a local port

mod common;

use std::sync::{Arc, Mutex};

use common::{Backend, book};
use diploma_client::{ClientConfig, ClientError, DiplomaApi, DiplomaStore, HttpClient};

async fn serve(backend: Backend) -> (common::SharedBackend, String) {
    let state = Arc::new(Mutex::new(backend));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = common::router(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (state, format!("http://{addr}"))
}

#[tokio::test]
async fn test_store_over_network() {
    let (state, base_url) = serve(Backend {
        books: vec![book("b1", 2024)],
        ..Default::default()
    })
    .await;
    let config = ClientConfig::new(base_url).with_token("secret").with_timeout(5);
    let http = config.build_http_client().unwrap();
    let store = DiplomaStore::new(DiplomaApi::from_config(http, &config).with_clock(common::today));

    assert!(store.initialize().await.unwrap().is_complete());
    assert_eq!(store.books().await[0].year, 2024);
    assert_eq!(
        state.lock().unwrap().last_authorization.as_deref(),
        Some("Bearer secret")
    );

    let created = store.create_book(2025).await.unwrap();
    assert_eq!(store.books().await.last(), Some(&created));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (_state, base_url) = serve(Backend::default()).await;
    let http = ClientConfig::new(base_url).build_http_client().unwrap();

    let result: Result<serde_json::Value, _> = http.get("/api/other").await;
    assert!(matches!(result, Err(ClientError::NotFound(_))));
}

#[tokio::test]
async fn test_unreachable_server_is_http_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig::new(format!("http://{addr}")).with_timeout(2);
    let api = DiplomaApi::from_config(config.build_http_client().unwrap(), &config);
    let err = api.list_books().await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
}
