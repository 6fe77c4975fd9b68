//! In-process mock of the CRM backend.

#![allow(dead_code, missing_debug_implementations)]

use axum::Router;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::{self, Next};
use axum::response::Response;
use client::{ApiClient, CredentialStore, MemoryCredentialStore, SessionManager, SessionState};
use serde_json::{Value, json};
use shared::config::ClientConfig;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use yewdux::{Context, Dispatch};

/// One request as the backend saw it.
#[derive(Debug, Clone)]
pub struct Hit {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub bearer: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Hit>>>);

impl Recorder {
    pub fn hits(&self) -> Vec<Hit> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn last(&self) -> Hit {
        self.hits().pop().expect("no request recorded")
    }
}

async fn record(State(recorder): State<Recorder>, request: Request, next: Next) -> Response {
    let bearer = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string);
    recorder.0.lock().unwrap().push(Hit {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        query: request.uri().query().map(str::to_string),
        bearer,
    });
    next.run(request).await
}

/// Serve `routes` under `/api` on an ephemeral port.
pub async fn serve(routes: Router) -> (String, Recorder) {
    let recorder = Recorder::default();
    let app = Router::new()
        .nest("/api", routes)
        .layer(middleware::from_fn_with_state(recorder.clone(), record));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/api"), recorder)
}

pub fn config(base_url: &str) -> ClientConfig {
    ClientConfig {
        api_base_url: base_url.to_string(),
        ..ClientConfig::default()
    }
}

pub struct Harness {
    pub api: ApiClient,
    pub credentials: Arc<dyn CredentialStore>,
    pub session: SessionManager,
    pub cx: Context,
}

impl Harness {
    pub fn new(config: ClientConfig, token: Option<&str>) -> Self {
        let credentials: Arc<dyn CredentialStore> = match token {
            Some(token) => Arc::new(MemoryCredentialStore::with_token(token)),
            None => MemoryCredentialStore::shared(),
        };
        let api = ApiClient::new(config, Arc::clone(&credentials)).unwrap();
        let cx = Context::new();
        let session = SessionManager::new(api.clone(), Dispatch::<SessionState>::new(&cx));
        Self {
            api,
            credentials,
            session,
            cx,
        }
    }

    pub fn dispatch<S: yewdux::Store>(&self) -> Dispatch<S> {
        Dispatch::new(&self.cx)
    }

    pub fn token(&self) -> Option<String> {
        self.credentials.load().unwrap()
    }
}

pub fn admin_json() -> Value {
    json!({"id": 1, "email": "ayse@example.com", "fullName": "Ayse Yilmaz", "role": "ADMIN"})
}

pub fn customer_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("contact{id}@example.com"),
        "phone": "05551234567",
        "isActive": true,
        "createdAt": "2024-01-20T10:00:00"
    })
}

pub fn task_json(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "title": "Quarterly review",
        "description": "Walk the customer through the report",
        "status": status,
        "priority": 0,
        "dueDate": "2030-06-01T12:00:00",
        "customerId": 3,
        "customerName": "Acme",
        "assignedUserId": 1,
        "assignedUserName": "Ayse Yilmaz"
    })
}

pub fn bearer(headers: &axum::http::HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}
