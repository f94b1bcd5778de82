use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, GetEcho, PostEcho};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- get ---

#[tokio::test]
async fn get_echoes_query_args_and_headers() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/get?a=1&b=two")
                .header("x-trace", "abc")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: GetEcho = body_json(resp).await;
    assert_eq!(echo.args["a"], "1");
    assert_eq!(echo.args["b"], "two");
    assert_eq!(echo.headers["x-trace"], "abc");
}

// --- post ---

#[tokio::test]
async fn post_echoes_json_body() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/post")
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(r#"{"country":"US"}"#.to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: PostEcho = body_json(resp).await;
    assert_eq!(echo.json["country"], "US");
    assert_eq!(echo.data, r#"{"country":"US"}"#);
    assert_eq!(echo.headers["content-type"], "application/json");
}

#[tokio::test]
async fn post_non_json_body_yields_null_json() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/post")
                .body("plain text".to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    let echo: PostEcho = body_json(resp).await;
    assert!(echo.json.is_null());
    assert_eq!(echo.data, "plain text");
}

// --- status ---

#[tokio::test]
async fn status_returns_requested_code_and_body() {
    let resp = app().oneshot(get_request("/status/404?body=missing")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_bytes(resp).await, "missing");
}

#[tokio::test]
async fn status_rejects_out_of_range_code() {
    let resp = app().oneshot(get_request("/status/42")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn no_content_returns_204_without_body() {
    let resp = app().oneshot(get_request("/no-content")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());
}

// --- basic auth ---

#[tokio::test]
async fn basic_auth_accepts_matching_credentials() {
    // base64("user:passwd")
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/basic-auth/user/passwd")
                .header(http::header::AUTHORIZATION, "Basic dXNlcjpwYXNzd2Q=")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["user"], "user");
}

#[tokio::test]
async fn basic_auth_rejects_missing_header() {
    let resp = app().oneshot(get_request("/basic-auth/user/passwd")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().contains_key(http::header::WWW_AUTHENTICATE));
}

// --- headers ---

#[tokio::test]
async fn duplicate_header_sends_both_values() {
    let resp = app().oneshot(get_request("/duplicate-header")).await.unwrap();

    let values: Vec<_> = resp.headers().get_all("x-dup").iter().collect();
    assert_eq!(values, ["first", "second"]);
}

// --- bytes ---

#[tokio::test]
async fn bytes_returns_requested_length() {
    let resp = app().oneshot(get_request("/bytes/4096")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_bytes(resp).await;
    assert_eq!(body.len(), 4096);
    assert!(body.iter().all(|&b| b == b'a'));
}

// --- redirect ---

#[tokio::test]
async fn redirect_points_at_get() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/redirect")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers()[http::header::LOCATION], "/get");
    assert_eq!(body_bytes(resp).await, "moved");
}

// --- delay ---

#[tokio::test]
async fn delay_waits_before_answering() {
    let start = std::time::Instant::now();
    let resp = app().oneshot(get_request("/delay/50")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(start.elapsed() >= std::time::Duration::from_millis(50));
    assert_eq!(body_bytes(resp).await, "late");
}
