use std::collections::BTreeSet;

use http::{Method, StatusCode};
use schemars::JsonSchema;
use serde_json::{json, Value};
use swagger_meta::{BodySpec, EndpointInfo, EndpointRegistry, ParameterSpec, TypeDefinition};

#[derive(JsonSchema)]
#[allow(dead_code)]
struct Invoice {
    number: String,
    amount_cents: i64,
    paid: bool,
}

fn populated() -> EndpointInfo {
    let mut registry = EndpointRegistry::new();
    registry
        .endpoint(Method::PUT, "/invoices/{number}")
        .with_operation_id("updateInvoice")
        .with_summary("Update invoice")
        .with_description_and_tags("Replace an invoice", ["billing", "invoices"])
        .with_request_parameter("number")
        .with_request_parameter(
            ParameterSpec::new("dry_run")
                .param_type("boolean")
                .in_query()
                .optional(),
        )
        .with_request_model::<Invoice>(BodySpec::new().description("Invoice state"))
        .unwrap()
        .with_default_response::<Invoice>()
        .unwrap()
        .with_response(StatusCode::NOT_FOUND, "Unknown invoice")
        .with_response_header(StatusCode::OK, "ETag", TypeDefinition::string());

    registry
        .remove(&Method::PUT, "/invoices/{number}")
        .unwrap()
}

fn summary(endpoint: &EndpointInfo) -> (BTreeSet<String>, Vec<(String, String)>, Vec<String>) {
    let codes = endpoint.responses.keys().cloned().collect();
    let params = endpoint
        .parameters
        .iter()
        .map(|p| (p.name.clone(), p.location.to_string()))
        .collect();
    let tags = endpoint
        .tags
        .as_ref()
        .map(|t| t.iter().cloned().collect())
        .unwrap_or_default();
    (codes, params, tags)
}

#[test]
fn wire_field_names() {
    let json = serde_json::to_value(populated()).unwrap();

    assert_eq!(json["operationId"], "updateInvoice");
    assert_eq!(json["summary"], "Update invoice");
    assert_eq!(json["description"], "Replace an invoice");
    assert_eq!(json["tags"], json!(["billing", "invoices"]));

    let path_param = &json["parameters"][0];
    assert_eq!(path_param["name"], "number");
    assert_eq!(path_param["in"], "path");
    assert_eq!(path_param["required"], true);
    assert_eq!(path_param["type"], "string");

    let query_param = &json["parameters"][1];
    assert_eq!(query_param["in"], "query");
    assert_eq!(query_param["required"], false);
    assert_eq!(query_param["type"], "boolean");

    let body = &json["parameters"][2];
    assert_eq!(body["name"], "body");
    assert_eq!(body["in"], "body");
    assert_eq!(body["description"], "Invoice state");
    assert_eq!(body["schema"]["title"], "Invoice");
    assert!(body.get("type").is_none());

    let ok = &json["responses"]["200"];
    assert_eq!(ok["schema"]["properties"]["paid"]["type"], "boolean");
    assert_eq!(ok["headers"]["ETag"]["type"], "string");
    assert!(ok.get("description").is_none());

    assert_eq!(json["responses"]["404"]["description"], "Unknown invoice");
    assert!(json["responses"]["404"].get("schema").is_none());
    assert!(json.get("deprecated").is_none());
}

#[test]
fn round_trip_preserves_structure() {
    let original = populated();
    let text = serde_json::to_string_pretty(&original).unwrap();
    let parsed: EndpointInfo = serde_json::from_str(&text).unwrap();

    assert_eq!(summary(&parsed), summary(&original));
    assert!(parsed.parameters[2].schema().is_some());
    assert_eq!(parsed.parameters[0].param_type(), Some("string"));
}

#[test]
fn parses_handwritten_operation() {
    let json: Value = json!({
        "description": "Search",
        "tags": ["search"],
        "parameters": [
            { "name": "q", "in": "query", "required": true, "type": "string" },
            {
                "name": "limit",
                "in": "query",
                "required": false,
                "type": "integer",
                "format": "int32"
            }
        ],
        "responses": {
            "200": { "description": "Results", "schema": { "type": "array" } },
            "400": { "description": "Bad query" }
        }
    });

    let endpoint: EndpointInfo = serde_json::from_value(json).unwrap();
    assert_eq!(endpoint.parameters[1].format(), Some("int32"));
    assert!(endpoint.response(StatusCode::OK).unwrap().schema.is_some());
    assert!(endpoint.response(StatusCode::BAD_REQUEST).unwrap().schema.is_none());
    assert!(endpoint.has_tags());
}
