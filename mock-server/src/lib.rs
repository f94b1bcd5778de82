//! httpbin-style echo server used to exercise `typed-http` over real HTTP.
//!
//! Every endpoint is stateless. `/get` and `/post` echo what the client sent
//! so tests can assert on query args, headers and the JSON body exactly as
//! the server received them.

use std::collections::HashMap;
use std::time::Duration;

use axum::{
    extract::{Path, Query},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get, post},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::net::TcpListener;

/// Echo of a `GET /get` request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GetEcho {
    pub args: HashMap<String, String>,
    pub headers: HashMap<String, String>,
}

/// Echo of a `POST /post` request. `json` is `null` when the body was not JSON.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PostEcho {
    pub args: HashMap<String, String>,
    pub headers: HashMap<String, String>,
    pub data: String,
    pub json: Value,
}

#[derive(Deserialize)]
pub struct StatusQuery {
    #[serde(default)]
    pub body: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/get", get(echo_get))
        .route("/post", post(echo_post))
        .route("/status/{code}", any(status))
        .route("/no-content", any(no_content))
        .route("/empty", get(empty))
        .route("/basic-auth/{user}/{passwd}", any(basic_auth))
        .route("/duplicate-header", get(duplicate_header))
        .route("/latin1", get(latin1))
        .route("/bytes/{n}", get(bytes))
        .route("/redirect", any(redirect))
        .route("/delay/{millis}", any(delay))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Flatten request headers; repeated names are joined with `", "`.
fn header_map(headers: &HeaderMap) -> HashMap<String, String> {
    let mut out: HashMap<String, String> = HashMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        out.entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    out
}

async fn echo_get(
    Query(args): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Json<GetEcho> {
    Json(GetEcho {
        args,
        headers: header_map(&headers),
    })
}

async fn echo_post(
    Query(args): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: String,
) -> Json<PostEcho> {
    let json = serde_json::from_str(&body).unwrap_or(Value::Null);
    Json(PostEcho {
        args,
        headers: header_map(&headers),
        data: body,
        json,
    })
}

async fn status(Path(code): Path<u16>, Query(query): Query<StatusQuery>) -> Response {
    match StatusCode::from_u16(code) {
        Ok(status) => (status, query.body).into_response(),
        Err(_) => (StatusCode::BAD_REQUEST, "invalid status code").into_response(),
    }
}

async fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn empty() -> (StatusCode, &'static str) {
    (StatusCode::OK, "")
}

async fn basic_auth(Path((user, passwd)): Path<(String, String)>, headers: HeaderMap) -> Response {
    let expected = format!("Basic {}", STANDARD.encode(format!("{user}:{passwd}")));
    let authorized = headers
        .get(header::AUTHORIZATION)
        .map(|value| value.as_bytes() == expected.as_bytes())
        .unwrap_or(false);
    if authorized {
        Json(serde_json::json!({ "authenticated": true, "user": user })).into_response()
    } else {
        log::debug!("rejecting basic auth for {user}");
        (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Basic realm=\"mock\"")],
            "unauthorized",
        )
            .into_response()
    }
}

async fn duplicate_header() -> Response {
    let mut response = "dup".into_response();
    let name = HeaderName::from_static("x-dup");
    let headers = response.headers_mut();
    headers.append(name.clone(), HeaderValue::from_static("first"));
    headers.append(name, HeaderValue::from_static("second"));
    response
}

/// "café" encoded as ISO-8859-1.
async fn latin1() -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=ISO-8859-1")],
        vec![0x63u8, 0x61, 0x66, 0xE9],
    )
        .into_response()
}

/// `n` bytes of `'a'`, for bodies larger than any client-side default cap.
async fn bytes(Path(n): Path<usize>) -> Vec<u8> {
    vec![b'a'; n]
}

/// Always `302 Found` pointing at `/get`.
async fn redirect() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/get")], "moved").into_response()
}

async fn delay(Path(millis): Path<u64>) -> &'static str {
    tokio::time::sleep(Duration::from_millis(millis)).await;
    "late"
}
