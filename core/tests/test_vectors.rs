//! Verify request building and response classification against JSON test
//! vectors stored in `test-vectors/`.
//!
//! Request vectors pin down the exact URL, header list, and body the client
//! produces. Response vectors feed canned status/body pairs through a fake
//! transport and check how `get_json` classifies them. JSON bodies are
//! compared as parsed values so field order does not matter.

use std::sync::Arc;

use serde_json::Value;
use snappy_core::{
    Account, ApiError, Body, ClientConfig, Credentials, HttpMethod, HttpRequest, HttpResponse, Locator,
    Params, ResponseStream, SnappyClient, Transport,
};

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_credentials(v: &Value) -> Credentials {
    if let Some(key) = v.get("api_key") {
        return Credentials::api_key(key.as_str().unwrap());
    }
    Credentials::username_password(v["username"].as_str().unwrap(), v["password"].as_str().unwrap())
}

fn parse_pairs(v: &Value) -> Params {
    v.as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let pair = pair.as_array().unwrap();
            (pair[0].as_str().unwrap().to_string(), pair[1].as_str().unwrap().to_string())
        })
        .collect()
}

fn parse_body(v: &Value) -> Option<Body> {
    if v.is_null() {
        return None;
    }
    if let Some(form) = v.get("form") {
        return Some(Body::form(&parse_pairs(form)));
    }
    Some(Body::json(&v["json"]).unwrap())
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let prefix = vectors["endpoint_prefix"].as_str().unwrap();
    let user_agent = vectors["user_agent"].as_str().unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let config = ClientConfig::new(parse_credentials(&case["credentials"]))
            .with_endpoint_prefix(prefix)
            .with_user_agent(user_agent);
        let client = SnappyClient::new(config);

        let method = parse_method(case["method"].as_str().unwrap());
        let locator = Locator::new(case["path"].as_str().unwrap()).with_params(parse_pairs(&case["params"]));
        let req = client.build_request(method, &locator, parse_body(&case["body"]));

        let expected = &case["expected_request"];
        assert_eq!(req.method, method, "{name}: method");
        assert_eq!(req.url, expected["url"].as_str().unwrap(), "{name}: url");

        let expected_headers: Vec<(String, String)> = expected["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        let expected_body = &expected["body"];
        match req.body.as_deref() {
            None => assert!(expected_body.is_null(), "{name}: body should be absent"),
            Some(bytes) => {
                if let Some(form) = expected_body.get("form") {
                    assert_eq!(std::str::from_utf8(bytes).unwrap(), form.as_str().unwrap(), "{name}: form body");
                } else {
                    let sent: Value = serde_json::from_slice(bytes).unwrap();
                    assert_eq!(sent, expected_body["json"], "{name}: json body");
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Answers every request with the same status and body.
struct Canned {
    status: u16,
    body: Vec<u8>,
}

impl Transport for Canned {
    fn execute(&self, _request: HttpRequest) -> snappy_core::Result<HttpResponse> {
        Ok(HttpResponse {
            status: self.status,
            body: ResponseStream::from_bytes(self.body.clone()),
        })
    }
}

#[test]
fn response_test_vectors() {
    let raw = include_str!("../../test-vectors/responses.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let canned = Canned {
            status: case["status"].as_u64().unwrap() as u16,
            body: case["body"].as_str().unwrap().as_bytes().to_vec(),
        };
        let client = SnappyClient::with_api_key("apikey").with_transport(Arc::new(canned));

        let result: snappy_core::Result<Vec<Account>> = client.get_json(&Locator::new("/accounts"));

        let expected = &case["expected"];
        if let Some(ok) = expected.get("ok") {
            let expected: Vec<Account> = serde_json::from_value(ok.clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: decoded result");
            continue;
        }
        let err = result.unwrap_err();
        match expected.as_str().unwrap() {
            "remote" => assert!(matches!(err, ApiError::Remote), "{name}: expected Remote, got {err:?}"),
            "decode" => assert!(matches!(err, ApiError::Decode(_)), "{name}: expected Decode, got {err:?}"),
            other => panic!("{name}: unknown expected error: {other}"),
        }
    }
}
