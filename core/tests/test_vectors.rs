//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use serde_json::Value;
use wardrobe_core::{ApiError, ClothingClient, ClothingItem, HttpMethod, HttpRequest, HttpResponse, ItemDraft, ItemId};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> ClothingClient {
    ClothingClient::new(BASE_URL, "roupas")
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn cases(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

fn simulated_response(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

fn input_id(case: &Value) -> ItemId {
    serde_json::from_value(case["input_id"].clone()).unwrap()
}

fn assert_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.path, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");

    if let Some(headers) = expected.get("headers") {
        let expected_headers: Vec<(String, String)> = headers
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");
    }

    match expected.get("body") {
        Some(body) => {
            let req_body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&req_body, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

/// Compare a failed parse against `expected_error`, or fail when none was expected.
fn assert_error(name: &str, case: &Value, err: ApiError) {
    let Some(expected) = case.get("expected_error") else {
        panic!("{name}: unexpected error {err}");
    };
    assert_eq!(
        err.status(),
        Some(expected["status"].as_u64().unwrap() as u16),
        "{name}: status"
    );
    assert_eq!(err.to_string(), expected["message"].as_str().unwrap(), "{name}: message");
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();

        let req = c.build_list_items();
        assert_request(name, &req, &case["expected_request"]);

        match c.parse_list_items(simulated_response(&case)) {
            Ok(items) => {
                assert!(case.get("expected_error").is_none(), "{name}: expected an error");
                let expected: Vec<ClothingItem> =
                    serde_json::from_value(case["expected_result"].clone()).unwrap();
                assert_eq!(items, expected, "{name}: parsed result");
            }
            Err(err) => assert_error(name, &case, err),
        }
    }
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[test]
fn get_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/get.json")) {
        let name = case["name"].as_str().unwrap();

        let req = c.build_get_item(&input_id(&case));
        assert_request(name, &req, &case["expected_request"]);

        match c.parse_get_item(simulated_response(&case)) {
            Ok(item) => {
                assert!(case.get("expected_error").is_none(), "{name}: expected an error");
                let expected: Option<ClothingItem> =
                    serde_json::from_value(case["expected_result"].clone()).unwrap();
                assert_eq!(item, expected, "{name}: parsed result");
            }
            Err(err) => assert_error(name, &case, err),
        }
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/create.json")) {
        let name = case["name"].as_str().unwrap();
        let input: ItemDraft = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_create_item(&input).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        match c.parse_create_item(simulated_response(&case)) {
            Ok(item) => {
                assert!(case.get("expected_error").is_none(), "{name}: expected an error");
                let expected: ClothingItem =
                    serde_json::from_value(case["expected_result"].clone()).unwrap();
                assert_eq!(item, expected, "{name}: parsed result");
            }
            Err(err) => assert_error(name, &case, err),
        }
    }
}

// ---------------------------------------------------------------------------
// Replace
// ---------------------------------------------------------------------------

#[test]
fn replace_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/replace.json")) {
        let name = case["name"].as_str().unwrap();
        let input: ItemDraft = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_replace_item(&input_id(&case), &input).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        match c.parse_replace_item(simulated_response(&case)) {
            Ok(()) => assert!(case.get("expected_error").is_none(), "{name}: expected an error"),
            Err(err) => assert_error(name, &case, err),
        }
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/delete.json")) {
        let name = case["name"].as_str().unwrap();

        let req = c.build_delete_item(&input_id(&case));
        assert_request(name, &req, &case["expected_request"]);

        match c.parse_delete_item(simulated_response(&case)) {
            Ok(()) => assert!(case.get("expected_error").is_none(), "{name}: expected an error"),
            Err(err) => assert_error(name, &case, err),
        }
    }
}
