//! Test helpers: stub HTTP upstreams bound to an ephemeral local port

use axum::{
    body::Bytes,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode, Uri},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// Fixed response returned by a stub upstream.
#[derive(Debug, Clone)]
pub struct StubReply {
    status: StatusCode,
    content_type: &'static str,
    body: String,
    delay: Option<Duration>,
}

impl StubReply {
    pub fn json(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn text(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            content_type: "text/html",
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Value,
}

pub struct Stub {
    pub base_url: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl Stub {
    pub async fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().await.clone()
    }
}

/// Serve `app` on `127.0.0.1:0` and return its base URL.
pub async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Start an upstream that records every request and answers with `reply`.
pub async fn spawn_stub(reply: StubReply) -> Stub {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();

    let app = Router::new().fallback(move |uri: Uri, headers: HeaderMap, body: Bytes| {
        let recorder = recorder.clone();
        let reply = reply.clone();
        async move {
            recorder.lock().await.push(SeenRequest {
                path: uri.path().to_string(),
                query: uri.query().map(str::to_string),
                authorization: headers
                    .get("Authorization")
                    .and_then(|h| h.to_str().ok())
                    .map(str::to_string),
                body: serde_json::from_slice(&body).unwrap_or(Value::Null),
            });
            if let Some(delay) = reply.delay {
                tokio::time::sleep(delay).await;
            }
            (reply.status, [(CONTENT_TYPE, reply.content_type)], reply.body)
        }
    });

    Stub {
        base_url: serve(app).await,
        seen,
    }
}
