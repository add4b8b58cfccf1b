//! Wire-level tests for the guarded category delete and the optimistic
//! notification bell, against a small recording backend.
//!
//! Each test spins up an axum app on an ephemeral port that logs every
//! request it sees, so the assertions cover exactly which calls a flow
//! issues, not just its end state.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::json;

use whitebox_client::bell::NotificationBell;
use whitebox_client::pages::category_admin::{CategoryAdminPage, CategoryDeleteOutcome};
use whitebox_client::token::MemoryTokenStore;
use whitebox_client::ApiClient;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

type RequestLog = Arc<Mutex<Vec<String>>>;

/// Bind an ephemeral port, serve the router in the background, and
/// return the base URL to point the client at.
async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test backend");
    });
    format!("http://{addr}")
}

fn client_for(base_url: String) -> ApiClient {
    ApiClient::with_client(reqwest::Client::new(), base_url, MemoryTokenStore::new())
}

fn record(log: &RequestLog, method: &Method, uri: &Uri) {
    if let Ok(mut entries) = log.lock() {
        entries.push(format!("{method} {}", uri.path()));
    }
}

fn logged(log: &RequestLog) -> Vec<String> {
    log.lock().expect("request log").clone()
}

// ---------------------------------------------------------------------------
// Category delete guard
// ---------------------------------------------------------------------------

async fn category_backend(State(log): State<RequestLog>, method: Method, uri: Uri) -> Response {
    record(&log, &method, &uri);
    match (method.as_str(), uri.path()) {
        ("GET", "/courses/") => Json(json!([
            { "id": "x", "title": "Python Basics", "status": "PUBLISHED", "category": "c1" },
            { "id": "y", "title": "Python Advanced", "status": "DRAFT", "category": "c1" },
            { "id": "z", "title": "Welding", "status": "PUBLISHED", "category": "c2" },
        ]))
        .into_response(),
        ("DELETE", "/courses/categories/c1/") => StatusCode::NO_CONTENT.into_response(),
        ("GET", "/courses/categories/") => Json(json!([])).into_response(),
        _ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

/// A delete request for a category with linked courses is blocked
/// before any delete call fires; only the course lookup goes out.
#[tokio::test]
async fn linked_category_delete_is_blocked_without_a_delete_call() {
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let router = Router::new()
        .fallback(category_backend)
        .with_state(Arc::clone(&log));
    let base_url = spawn_backend(router).await;
    let client = client_for(base_url);

    let mut page = CategoryAdminPage::default();
    let outcome = page
        .delete_category(&client, "c1")
        .await
        .expect("guarded delete should not error");

    match outcome {
        CategoryDeleteOutcome::Blocked { linked_titles } => {
            assert_eq!(linked_titles, vec!["Python Basics", "Python Advanced"]);
        }
        CategoryDeleteOutcome::Deleted => panic!("linked category must not delete"),
    }
    assert_eq!(logged(&log), vec!["GET /courses/"]);
}

/// Confirming the cascade warning issues exactly the delete call plus
/// the category reload, and nothing else.
#[tokio::test]
async fn forced_category_delete_issues_only_the_delete_and_reload() {
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let router = Router::new()
        .fallback(category_backend)
        .with_state(Arc::clone(&log));
    let base_url = spawn_backend(router).await;
    let client = client_for(base_url);

    let mut page = CategoryAdminPage::default();
    page.force_delete_category(&client, "c1")
        .await
        .expect("forced delete should succeed");

    assert_eq!(
        logged(&log),
        vec!["DELETE /courses/categories/c1/", "GET /courses/categories/"]
    );
    assert!(page.categories.is_empty());
    assert!(page.error.is_none());
}

// ---------------------------------------------------------------------------
// Notification bell reconcile
// ---------------------------------------------------------------------------

async fn notification_backend(
    State(log): State<RequestLog>,
    method: Method,
    uri: Uri,
) -> Response {
    record(&log, &method, &uri);
    match (method.as_str(), uri.path()) {
        ("POST", "/notifications/notifications/n1/mark_as_read/") => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "boom" })),
        )
            .into_response(),
        ("POST", "/notifications/notifications/n2/mark_as_read/") => {
            StatusCode::NO_CONTENT.into_response()
        }
        ("GET", "/notifications/notifications/") => Json(json!([])).into_response(),
        ("GET", "/notifications/notifications/count_unread/") => {
            Json(json!({ "unread_count": 5 })).into_response()
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

/// A failed mark-read keeps the optimistic change out of the way by
/// refetching the feed instead of rolling back in place.
#[tokio::test]
async fn failed_mark_read_reconciles_with_a_refetch() {
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let router = Router::new()
        .fallback(notification_backend)
        .with_state(Arc::clone(&log));
    let base_url = spawn_backend(router).await;
    let bell = NotificationBell::new(client_for(base_url));

    bell.mark_read("n1").await;

    let requests = logged(&log);
    assert_eq!(requests[0], "POST /notifications/notifications/n1/mark_as_read/");
    // The refetch pair runs in parallel; arrival order is not fixed.
    assert_eq!(requests.len(), 3);
    assert!(requests[1..].contains(&"GET /notifications/notifications/".to_string()));
    assert!(requests[1..].contains(&"GET /notifications/notifications/count_unread/".to_string()));
    assert_eq!(bell.feed().unread_count, 5);
}

/// A successful mark-read keeps the optimistic state and issues no
/// reconcile traffic.
#[tokio::test]
async fn successful_mark_read_does_not_refetch() {
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let router = Router::new()
        .fallback(notification_backend)
        .with_state(Arc::clone(&log));
    let base_url = spawn_backend(router).await;
    let bell = NotificationBell::new(client_for(base_url));

    bell.mark_read("n2").await;

    assert_eq!(
        logged(&log),
        vec!["POST /notifications/notifications/n2/mark_as_read/"]
    );
    assert_eq!(bell.feed().unread_count, 0);
}
