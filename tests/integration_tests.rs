//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: mocked HTTP response → content format → decoded record

use bodymap::http::{HttpClient, HttpClientConfig};
use bodymap::shape::load_shape_from_str;
use bodymap::{decode, Child, ContentFormat, Error, Pet};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const XML_CHILDREN_BEFORE_AGE: &str = r#"<?xml version="1.0"?>
<CAT>
  <name>Izzy</name>
  <breed>Siamese</breed>
  <children>
        <child>
            <name>A</name>
        </child>
        <child>
            <name>B</name>
        </child>
  </children>
  <age>6</age>
</CAT>"#;

const XML_AGE_BEFORE_CHILDREN: &str = r#"<?xml version="1.0"?>
<CAT>
  <name>Izzy</name>
  <breed>Siamese</breed>
  <age>6</age>
  <children>
        <child>
            <name>A</name>
        </child>
        <child>
            <name>B</name>
        </child>
  </children>
</CAT>"#;

fn izzy_with_children() -> Pet {
    Pet {
        name: "Izzy".to_string(),
        breed: "Siamese".to_string(),
        age: 6,
        children: vec![Child::new("A"), Child::new("B")],
    }
}

async fn mock_root(body: &str, content_type: &str) -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, content_type))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;

    mock_server
}

fn client(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .expect_success(false)
        .build();
    HttpClient::with_config(config).unwrap()
}

// ============================================================================
// Original scenarios
// ============================================================================

#[tokio::test]
async fn test_can_convert_xml() {
    let mock_server = mock_root(XML_CHILDREN_BEFORE_AGE, "application/xml").await;

    // Fetch the raw text, then decode it separately
    let fetched = client(&mock_server).get("/").await.unwrap();
    let pet = Pet::decode(fetched.text(), ContentFormat::Xml).unwrap();

    assert_eq!(pet, izzy_with_children());
}

#[tokio::test]
async fn test_can_retrieve_xml_with_accept_negotiation() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("accept", "application/xml"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(XML_AGE_BEFORE_CHILDREN, "application/xml"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let pet = client(&mock_server)
        .get_pet("/", Some(ContentFormat::Xml))
        .await
        .unwrap();

    assert_eq!(pet, izzy_with_children());
}

#[tokio::test]
async fn test_can_retrieve_json() {
    let body = r#"{
  "name" : "Izzy",
  "breed" : "Siamese",
  "age" : 6,
  "children" : []
}"#;
    let mock_server = mock_root(body, "application/json").await;

    let pet = client(&mock_server).get_pet("/", None).await.unwrap();

    assert_eq!(
        pet,
        Pet {
            name: "Izzy".to_string(),
            breed: "Siamese".to_string(),
            age: 6,
            children: vec![],
        }
    );
}

#[tokio::test]
async fn test_unknown_path_returns_not_found_body() {
    let mock_server = mock_root("{}", "application/json").await;

    let fetched = client(&mock_server).get("/elsewhere").await.unwrap();
    assert_eq!(fetched.status, 404);
    assert_eq!(fetched.text(), "Not Found");
}

// ============================================================================
// Error paths over HTTP
// ============================================================================

#[tokio::test]
async fn test_missing_age_over_http() {
    let mock_server = mock_root(
        "<CAT><name>Izzy</name><breed>Siamese</breed><children/></CAT>",
        "text/xml; charset=utf-8",
    )
    .await;

    let err = client(&mock_server).get_pet("/", None).await.unwrap_err();
    assert!(matches!(err, Error::MissingField { ref field } if field == "age"));
}

#[tokio::test]
async fn test_non_numeric_age_over_http() {
    let mock_server = mock_root(
        r#"{"name": "Izzy", "breed": "Siamese", "age": "six", "children": []}"#,
        "application/json",
    )
    .await;

    let err = client(&mock_server).get_pet("/", None).await.unwrap_err();
    match err {
        Error::TypeCoercion { field, text, .. } => {
            assert_eq!(field, "age");
            assert_eq!(text, "six");
        }
        other => panic!("expected TypeCoercion, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_over_http() {
    let mock_server = mock_root("<CAT><name>Izzy</CAT>", "application/xml").await;

    let err = client(&mock_server).get_pet("/", None).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Parse {
            format: ContentFormat::Xml,
            ..
        }
    ));
}

// ============================================================================
// Custom shapes
// ============================================================================

#[tokio::test]
async fn test_custom_shape_from_yaml_over_http() {
    let shape = load_shape_from_str(
        r"
name: Listing
fields:
  - name: title
    type: string
  - name: price
    type: float
  - name: available
    type: boolean
  - name: tags
    type: string
    list: true
",
    )
    .unwrap();

    let mock_server = mock_root(
        r#"<listing><title>Cat tree</title><price>49.5</price><available>true</available><tags><tag>furniture</tag><tag>cats</tag></tags><sku>X1</sku></listing>"#,
        "application/xml",
    )
    .await;

    let record = client(&mock_server)
        .get_decoded("/", &shape, None)
        .await
        .unwrap();

    assert_eq!(
        record.to_json(),
        json!({
            "title": "Cat tree",
            "price": 49.5,
            "available": true,
            "tags": ["furniture", "cats"]
        })
    );
}

#[test]
fn test_extra_field_ignored_without_http() {
    let record = decode(
        r#"{"name":"Izzy","breed":"Siamese","age":6,"children":[],"color":"white"}"#,
        ContentFormat::Json,
        &Pet::shape(),
    )
    .unwrap();

    assert_eq!(
        record.to_json(),
        json!({"name": "Izzy", "breed": "Siamese", "age": 6, "children": []})
    );
}
