//! Verify request building and response classification against the JSON
//! test vectors stored in `test-vectors/`.
//!
//! Each build vector describes a `RequestSpec` and either the request that
//! must be built from it or the argument that must be rejected. Each
//! classify vector describes a simulated response and its classification.

use typed_http::executor::{build_request, parse_response};
use typed_http::{CallError, Charset, HttpMethod, HttpResponse, RequestSpec};

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_headers(value: &serde_json::Value) -> Vec<(String, String)> {
    value
        .as_array()
        .map(|headers| {
            headers
                .iter()
                .map(|h| {
                    let arr = h.as_array().unwrap();
                    (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
                })
                .collect()
        })
        .unwrap_or_default()
}

fn spec_from(input: &serde_json::Value) -> RequestSpec {
    let mut spec = RequestSpec::new(
        parse_method(input["method"].as_str().unwrap()),
        input["url"].as_str().unwrap(),
    )
    .headers(parse_headers(&input["headers"]));
    if let Some(body) = input["body"].as_str() {
        spec = spec.body(body);
    }
    if let Some(encoding) = input["encoding"].as_str() {
        spec = spec.encoding(encoding);
    }
    if let Some(timeout) = input["timeout_millis"].as_u64() {
        spec = spec.timeout_millis(timeout);
    }
    if let (Some(username), Some(password)) = (input["username"].as_str(), input["password"].as_str()) {
        spec = spec.basic_auth(username, password);
    }
    spec
}

// ---------------------------------------------------------------------------
// Build
// ---------------------------------------------------------------------------

#[test]
fn build_test_vectors() {
    let raw = include_str!("../../test-vectors/build.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let spec = spec_from(&case["input"]);
        let result = build_request(&spec);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match err {
                CallError::InvalidArgument(field) => {
                    assert_eq!(field, expected_error.as_str().unwrap(), "{name}: field")
                }
                other => panic!("{name}: expected InvalidArgument, got {other:?}"),
            }
            continue;
        }

        let req = result.unwrap();
        let expected = &case["expected_request"];
        assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, expected["url"].as_str().unwrap(), "{name}: url");
        assert_eq!(req.headers, parse_headers(&expected["headers"]), "{name}: headers");
        assert_eq!(
            req.timeout.as_millis() as u64,
            expected["timeout_millis"].as_u64().unwrap(),
            "{name}: timeout"
        );
        match expected["body"].as_str() {
            Some(body) => assert_eq!(req.body.as_deref(), Some(body.as_bytes()), "{name}: body"),
            None => assert!(req.body.is_none(), "{name}: body should be None"),
        }
    }
}

// ---------------------------------------------------------------------------
// Classify
// ---------------------------------------------------------------------------

#[test]
fn classify_test_vectors() {
    let raw = include_str!("../../test-vectors/classify.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let sim = &case["response"];
        let response = HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            reason: sim["reason"].as_str().unwrap().to_string(),
            headers: vec![("x-case".to_string(), name.to_string())],
            body: sim["body"].as_str().map(|b| b.as_bytes().to_vec()),
        };
        let expected = &case["expected"];
        let result = parse_response(response, Charset::Utf8, false);

        if expected["success"].as_bool().unwrap() {
            let raw = result.unwrap();
            assert_eq!(
                raw.is_body_present(),
                expected["body_present"].as_bool().unwrap(),
                "{name}: body present"
            );
            assert_eq!(raw.body_text(), expected["body_text"].as_str().unwrap(), "{name}: body");
            assert!(raw.headers().is_none(), "{name}: headers not requested");
        } else {
            let CallError::Failure(failure) = result.unwrap_err() else {
                panic!("{name}: expected call failure");
            };
            assert_eq!(failure.message(), expected["message"].as_str().unwrap(), "{name}: message");
            assert_eq!(failure.body(), expected["body_text"].as_str().unwrap(), "{name}: body");
            assert_eq!(failure.reason(), sim["reason"].as_str().unwrap(), "{name}: reason");
            assert_eq!(failure.headers()["x-case"], name, "{name}: headers always captured");
        }
    }
}
