use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    http::StatusCode,
    routing::{MethodRouter, any},
};
use serde_json::Value;
use tokio::net::TcpListener;

use crate::api_client::ApiClient;

/// Serve `router` on an ephemeral local port and return a client pointed at it.
///
/// Resource routes should be nested under "/api", e.g. "/api/accounts", and
/// the log-in and registration routes under "/auth".
pub(crate) async fn spawn_mock_api(router: Router) -> ApiClient {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind mock API listener");
    let address = listener
        .local_addr()
        .expect("Could not get mock API address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Mock API server failed");
    });

    ApiClient::new(&format!("http://{address}/api"))
}

/// The JSON bodies received by a mock API route, in the order they arrived.
pub(crate) type RecordedBodies = Arc<Mutex<Vec<Value>>>;

pub(crate) fn recorded_bodies() -> RecordedBodies {
    Arc::new(Mutex::new(Vec::new()))
}

/// A route for any method that stores the JSON request body in `bodies` and responds with 200 OK.
pub(crate) fn record_json_body(bodies: &RecordedBodies) -> MethodRouter {
    let bodies = bodies.clone();

    any(move |Json(body): Json<Value>| {
        let bodies = bodies.clone();

        async move {
            bodies.lock().unwrap().push(body);
            StatusCode::OK
        }
    })
}

/// A route for any method that counts requests in `bodies` with a null entry and responds with 200 OK.
///
/// Use this for routes without a request body, e.g. DELETE.
pub(crate) fn record_request(bodies: &RecordedBodies) -> MethodRouter {
    let bodies = bodies.clone();

    any(move || {
        let bodies = bodies.clone();

        async move {
            bodies.lock().unwrap().push(Value::Null);
            StatusCode::OK
        }
    })
}
