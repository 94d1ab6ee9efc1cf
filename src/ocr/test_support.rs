//! Local stand-in for the Aliyun OCR endpoint

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;

pub(crate) struct StubServer {
    pub endpoint: String,
    hits: Arc<AtomicUsize>,
}

impl StubServer {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Start a stub on an ephemeral port.
///
/// URL requests echo `url:<url>`, byte uploads echo `bytes:<body>`.
/// URLs containing `rejected` get a 400, `no-content` gets an empty `Data`.
pub(crate) async fn spawn_stub() -> StubServer {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/", post(recognize))
        .with_state(hits.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubServer {
        endpoint: format!("http://{}", addr),
        hits,
    }
}

async fn recognize(
    State(hits): State<Arc<AtomicUsize>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);

    let signed = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("ACS3-HMAC-SHA256 Credential="));
    let action = headers.get("x-acs-action").and_then(|v| v.to_str().ok());
    if !signed || action != Some("RecognizeGeneral") {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"Code": "SignatureDoesNotMatch", "Message": "unsigned request"})),
        )
            .into_response();
    }

    let content = match query.get("Url") {
        Some(url) if url.contains("rejected") => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"Code": "InvalidParameter", "Message": "image url is not accessible"})),
            )
                .into_response();
        }
        Some(url) if url.contains("no-content") => {
            return Json(json!({"RequestId": "stub", "Data": "{}"})).into_response();
        }
        Some(url) => format!("url:{}", url),
        None => format!("bytes:{}", String::from_utf8_lossy(&body)),
    };

    let data = json!({ "content": content }).to_string();
    Json(json!({"RequestId": "stub", "Data": data})).into_response()
}
