//! Collection output scenarios: headers, base URL, query and body
//! parameters, and run-to-run determinism.

mod common;

use common::{api_config, api_config_with_headers, read_collection, run_into};
use routedoc::route::RouteTable;

fn sample_table() -> RouteTable {
    let mut table = RouteTable::new();
    table.get(
        "api/withDescription",
        "TestController@withEndpointDescription",
        "Example title.\nThis is the long description.",
    );
    table.get(
        "api/withResponseTag",
        "TestController@withResponseTag",
        "@response {\"id\": 4, \"name\": \"banana\", \"color\": \"red\"}",
    );
    table.post(
        "api/withBodyParameters",
        "TestController@withBodyParameters",
        "@bodyParam user_id int required The id of the user. Example: 9\n@bodyParam room_id string The id of the room.",
    );
    table.get(
        "api/withQueryParameters",
        "TestController@withQueryParameters",
        "@queryParam location_id required The id of the location.\n@queryParam user_id required The id of the user. Example: me\n@queryParam page required The page number. Example: 4",
    );
    table.get(
        "api/echoesUrlParameters/{param}-{param2}/{param3?}",
        "TestController@echoesUrlParameters",
        "",
    );
    table
}

#[test]
fn collection_has_the_documented_shape() {
    let dir = tempfile::tempdir().unwrap();
    run_into(&sample_table(), api_config(), dir.path());

    let collection = read_collection(dir.path());
    assert_eq!(collection["info"]["name"], "API Documentation");
    assert_eq!(
        collection["info"]["schema"],
        "https://schema.getpostman.com/json/collection/v2.0.0/collection.json"
    );
    let folders = collection["item"].as_array().unwrap();
    assert_eq!(folders.len(), 1, "every endpoint is in the default group");
    let requests = folders[0]["item"].as_array().unwrap();
    assert_eq!(requests.len(), 5);
    assert_eq!(requests[0]["name"], "Example title.");
    assert_eq!(requests[0]["request"]["method"], "GET");
}

#[test]
fn apply_headers_reach_every_request_item() {
    let dir = tempfile::tempdir().unwrap();
    let config = api_config_with_headers(&[
        ("Authorization", "customAuthToken"),
        ("Custom-Header", "NotSoCustom"),
        ("Accept", "application/json"),
        ("Content-Type", "application/json"),
    ]);
    run_into(&sample_table(), config, dir.path());

    let collection = read_collection(dir.path());
    for request in collection["item"][0]["item"].as_array().unwrap() {
        let headers = request["request"]["header"].as_array().unwrap();
        assert_eq!(headers[0]["key"], "Authorization");
        assert_eq!(headers[0]["value"], "customAuthToken");
        assert_eq!(headers[1]["key"], "Custom-Header");
        assert_eq!(headers[1]["value"], "NotSoCustom");
    }
}

#[test]
fn base_url_controls_host_and_protocol_only() {
    let dir_default = tempfile::tempdir().unwrap();
    let dir_custom = tempfile::tempdir().unwrap();

    run_into(&sample_table(), api_config(), dir_default.path());
    let mut custom = api_config();
    custom.base_url = "https://somedomain.test".to_string();
    run_into(&sample_table(), custom, dir_custom.path());

    let a = read_collection(dir_default.path());
    let b = read_collection(dir_custom.path());

    let url_a = &a["item"][0]["item"][0]["request"]["url"];
    let url_b = &b["item"][0]["item"][0]["request"]["url"];
    assert_eq!(url_a["host"], "localhost");
    assert_eq!(url_a["protocol"], "http");
    assert_eq!(url_b["host"], "somedomain.test");
    assert_eq!(url_b["protocol"], "https");
    assert_eq!(url_a["path"], url_b["path"]);

    // everything but the URL host/scheme (and raw URL spelling) is unchanged
    let mut a = a;
    let mut b = b;
    for value in [&mut a, &mut b] {
        for folder in value["item"].as_array_mut().unwrap() {
            for request in folder["item"].as_array_mut().unwrap() {
                let url = &mut request["request"]["url"];
                url["host"] = serde_json::Value::String(String::new());
                url["protocol"] = serde_json::Value::String(String::new());
                url["raw"] = serde_json::Value::String(String::new());
            }
        }
    }
    assert_eq!(a, b);
}

#[test]
fn query_parameters_carry_their_examples() {
    let dir = tempfile::tempdir().unwrap();
    run_into(&sample_table(), api_config(), dir.path());

    let collection = read_collection(dir.path());
    let requests = collection["item"][0]["item"].as_array().unwrap();
    let with_query = requests
        .iter()
        .find(|r| r["request"]["url"]["path"] == "api/withQueryParameters")
        .expect("query endpoint present");
    let query = with_query["request"]["url"]["query"].as_array().unwrap();
    assert_eq!(query.len(), 3);
    assert_eq!(query[0]["key"], "location_id");
    assert_eq!(query[1]["key"], "user_id");
    assert_eq!(query[1]["value"], "me");
    assert_eq!(query[2]["key"], "page");
    assert_eq!(query[2]["value"], "4");
}

#[test]
fn body_parameters_become_a_raw_json_body() {
    let dir = tempfile::tempdir().unwrap();
    run_into(&sample_table(), api_config(), dir.path());

    let collection = read_collection(dir.path());
    let requests = collection["item"][0]["item"].as_array().unwrap();
    let with_body = requests
        .iter()
        .find(|r| r["request"]["url"]["path"] == "api/withBodyParameters")
        .expect("body endpoint present");
    assert_eq!(with_body["request"]["method"], "POST");
    let body = with_body["request"]["body"]["raw"].as_str().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(parsed["user_id"], 9);
    assert!(parsed["room_id"].is_string());
}

#[test]
fn identical_runs_differ_only_in_the_postman_id() {
    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();
    run_into(&sample_table(), api_config(), dir_a.path());
    run_into(&sample_table(), api_config(), dir_b.path());

    let raw_a =
        std::fs::read_to_string(dir_a.path().join("docs").join("collection.json")).unwrap();
    let raw_b =
        std::fs::read_to_string(dir_b.path().join("docs").join("collection.json")).unwrap();
    assert_ne!(raw_a, raw_b, "the collection identifier is randomized");
    assert_eq!(read_collection(dir_a.path()), read_collection(dir_b.path()));
}
