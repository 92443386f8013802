//! Integration tests for resource operations against a mock JSON API.
//!
//! These tests verify:
//! - Request paths, methods, headers and query parameters
//! - Decoding of entities, collections and reports
//! - POST/PUT selection in `save()`
//! - Translation of error responses into `ApiError`
//! - Polymorphic assortment rows

use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use moysklad_api::query::{ApiParameterBuilder, ValidationError};
use moysklad_api::rest::resources::{
    AssortmentGroupBy, AssortmentItem, AssortmentParameterBuilder, CompanyType, Counterparty,
    CurrentStock, CurrentStockParameterBuilder, CurrentStockType, CustomerOrder,
    CustomerOrderPosition, StockMode, StockReport, StockReportParameterBuilder,
};
use moysklad_api::rest::{ApiError, RestResource};
use moysklad_api::{BaseUrl, Credentials, MoySkladConfig, RestClient};

const COUNTERPARTY_ID: &str = "12a8b923-692c-11e6-8a84-bae500000053";
const ORDER_ID: &str = "8d3f5a3e-0b5c-11ef-0a80-17e1000ad6f1";

/// Creates a client pointed at the mock server.
fn create_client(server: &MockServer) -> RestClient {
    let config = MoySkladConfig::builder()
        .credentials(Credentials::token("test-token").unwrap())
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    RestClient::new(&config).unwrap()
}

fn counterparty_json(server: &MockServer, name: &str) -> serde_json::Value {
    json!({
        "meta": {
            "href": format!("{}/1.2/entity/counterparty/{COUNTERPARTY_ID}", server.uri()),
            "type": "counterparty",
            "mediaType": "application/json"
        },
        "id": COUNTERPARTY_ID,
        "accountId": "84e60e93-f504-11e5-8a84-bae500000008",
        "name": name,
        "companyType": "legal",
        "archived": false,
        "created": "2024-01-15 10:30:00.000",
        "updated": "2024-06-20 15:45:00.123"
    })
}

fn counterparty_id() -> Uuid {
    Uuid::parse_str(COUNTERPARTY_ID).unwrap()
}

// ============================================================================
// Find and List
// ============================================================================

#[tokio::test]
async fn test_find_sends_credentials_and_decodes_entity() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/1.2/entity/counterparty/{COUNTERPARTY_ID}")))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(counterparty_json(&server, "Acme LLC"))
                .insert_header("X-Request-Id", "req-123")
                .insert_header("X-RateLimit-Limit", "45")
                .insert_header("X-RateLimit-Remaining", "44"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let response = Counterparty::find(&client, counterparty_id(), None)
        .await
        .unwrap();

    assert_eq!(response.name, "Acme LLC");
    assert_eq!(response.id, Some(counterparty_id()));
    assert_eq!(response.company_type, Some(CompanyType::Legal));
    assert_eq!(response.request_id(), Some("req-123"));
    assert_eq!(response.rate_limit().and_then(|l| l.remaining), Some(44));
}

#[tokio::test]
async fn test_find_sends_expand_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/1.2/entity/counterparty/{COUNTERPARTY_ID}")))
        .and(query_param("expand", "owner"))
        .respond_with(ResponseTemplate::new(200).set_body_json(counterparty_json(&server, "Acme")))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let mut query = ApiParameterBuilder::<Counterparty>::new();
    query.expand(Counterparty::OWNER).unwrap();

    Counterparty::find(&client, counterparty_id(), Some(&query))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_all_sends_query_parameters_and_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.2/entity/counterparty"))
        .and(query_param("filter", "name~Acme;archived=false"))
        .and(query_param("order", "name,asc"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {
                "href": format!("{}/1.2/entity/counterparty?limit=2", server.uri()),
                "type": "counterparty",
                "size": 5,
                "limit": 2,
                "offset": 0,
                "nextHref": format!("{}/1.2/entity/counterparty?limit=2&offset=2", server.uri())
            },
            "rows": [
                counterparty_json(&server, "Acme Logistics"),
                counterparty_json(&server, "Acme Trading")
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let mut query = ApiParameterBuilder::<Counterparty>::new();
    query.filter(Counterparty::NAME).unwrap().contains("Acme").unwrap();
    query.filter(Counterparty::ARCHIVED).unwrap().be(false).unwrap();
    query.order_by(Counterparty::NAME).unwrap();
    query.limit(2).unwrap();

    let page = Counterparty::all(&client, Some(&query)).await.unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.meta.size, 5);
    assert!(page.has_next_page());
    assert_eq!(page.next_offset(), Some(2));
    assert_eq!(page.rows[1].name, "Acme Trading");
}

#[tokio::test]
async fn test_all_without_query_sends_no_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.2/entity/counterparty"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"href": "", "size": 0, "limit": 1000, "offset": 0},
            "rows": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let page = Counterparty::all(&client, None).await.unwrap();

    assert!(page.is_empty());
    assert!(!page.has_next_page());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

// ============================================================================
// Save and Delete
// ============================================================================

#[tokio::test]
async fn test_save_new_entity_posts_writable_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1.2/entity/counterparty"))
        .and(body_json(json!({"name": "Acme LLC", "companyType": "legal"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(counterparty_json(&server, "Acme LLC")))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let counterparty = Counterparty {
        name: "Acme LLC".to_string(),
        company_type: Some(CompanyType::Legal),
        ..Default::default()
    };

    let saved = counterparty.save(&client).await.unwrap();
    assert_eq!(saved.id, Some(counterparty_id()));
    assert!(saved.created.is_some());
}

#[tokio::test]
async fn test_save_existing_entity_puts_to_its_path() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("/1.2/entity/counterparty/{COUNTERPARTY_ID}")))
        .and(body_json(json!({
            "name": "Acme LLC",
            "description": "Key account",
            "companyType": "legal",
            "archived": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(counterparty_json(&server, "Acme LLC")))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let mut counterparty: Counterparty =
        serde_json::from_value(counterparty_json(&server, "Acme LLC")).unwrap();
    counterparty.description = Some("Key account".to_string());

    counterparty.save(&client).await.unwrap();
}

#[tokio::test]
async fn test_delete_sends_delete_to_entity_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("/1.2/entity/counterparty/{COUNTERPARTY_ID}")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let counterparty = Counterparty {
        id: Some(counterparty_id()),
        ..Default::default()
    };

    counterparty.delete(&client).await.unwrap();
}

#[tokio::test]
async fn test_delete_without_id_fails_before_sending() {
    let server = MockServer::start().await;
    let client = create_client(&server);

    let result = Counterparty::default().delete(&client).await;

    assert!(matches!(
        result,
        Err(ApiError::PathResolutionFailed {
            resource: "Counterparty",
            ..
        })
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ============================================================================
// Error Responses
// ============================================================================

#[tokio::test]
async fn test_not_found_maps_to_not_found_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/1.2/entity/counterparty/{COUNTERPARTY_ID}")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errors": [{"error": "Object not found", "code": 1021}]
        })))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let result = Counterparty::find(&client, counterparty_id(), None).await;

    match result {
        Err(ApiError::NotFound { resource, id }) => {
            assert_eq!(resource, "Counterparty");
            assert_eq!(id, COUNTERPARTY_ID);
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rejected_entity_carries_error_details() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1.2/entity/counterparty"))
        .respond_with(
            ResponseTemplate::new(412)
                .insert_header("X-Request-Id", "req-412")
                .set_body_json(json!({
                    "errors": [{
                        "error": "Field 'name' is required",
                        "code": 3000,
                        "parameter": "name",
                        "moreInfo": "https://dev.moysklad.ru/doc/api/remap/1.2/#error_3000"
                    }]
                })),
        )
        .mount(&server)
        .await;

    let client = create_client(&server);
    let error = Counterparty::default().save(&client).await.unwrap_err();

    assert!(matches!(error, ApiError::Rejected { status: 412, .. }));
    assert_eq!(error.request_id(), Some("req-412"));
    assert_eq!(error.details()[0].code, Some(3000));
    assert_eq!(error.details()[0].parameter.as_deref(), Some("name"));
    assert!(error.to_string().contains("Field 'name' is required"));
}

#[tokio::test]
async fn test_rate_limited_carries_retry_hint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.2/entity/counterparty"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("X-Lognex-Retry-After", "1500")
                .insert_header("X-RateLimit-Remaining", "0")
                .set_body_json(json!({"errors": [{"error": "Rate limit exceeded", "code": 1049}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let result = Counterparty::all(&client, None).await;

    assert!(matches!(
        result,
        Err(ApiError::RateLimited {
            retry_after_ms: Some(1500),
            ..
        })
    ));
}

#[tokio::test]
async fn test_unauthorized_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.2/entity/counterparty"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errors": [{"error": "Authentication failed", "code": 1056}]
        })))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let error = Counterparty::all(&client, None).await.unwrap_err();

    assert!(matches!(error, ApiError::Unauthorized { status: 401, .. }));
    assert_eq!(error.details()[0].error, "Authentication failed");
}

#[tokio::test]
async fn test_server_error_keeps_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.2/entity/counterparty"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let error = Counterparty::all(&client, None).await.unwrap_err();

    assert!(matches!(error, ApiError::Api { status: 502, .. }));
    assert_eq!(error.details()[0].error, "<html>Bad Gateway</html>");
}

#[tokio::test]
async fn test_validation_error_converts_into_api_error() {
    async fn search(client: &RestClient) -> Result<usize, ApiError> {
        let mut query = ApiParameterBuilder::<Counterparty>::new();
        query.limit(5000)?;
        Ok(Counterparty::all(client, Some(&query)).await?.len())
    }

    let server = MockServer::start().await;
    let client = create_client(&server);

    assert!(matches!(
        search(&client).await,
        Err(ApiError::Validation(ValidationError::LimitOutOfRange { limit: 5000 }))
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ============================================================================
// Nested Resources
// ============================================================================

#[tokio::test]
async fn test_positions_are_listed_under_their_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/1.2/entity/customerorder/{ORDER_ID}/positions")))
        .and(query_param("expand", "assortment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"href": "", "type": "customerorderposition", "size": 1, "limit": 1000, "offset": 0},
            "rows": [{
                "id": "f5a1c6a2-0b5c-11ef-0a80-17e1000ad700",
                "quantity": 3.0,
                "price": 12500.0,
                "discount": 0.0,
                "vat": 20,
                "assortment": {
                    "meta": {
                        "href": format!("{}/1.2/entity/product/7944ef04-f831-11e5-7a69-971500188b19", server.uri()),
                        "type": "product"
                    },
                    "name": "Widget"
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let mut query = ApiParameterBuilder::<CustomerOrderPosition>::new();
    query.expand(CustomerOrderPosition::ASSORTMENT).unwrap();

    let order_id = Uuid::parse_str(ORDER_ID).unwrap();
    let positions = CustomerOrderPosition::all_in_order(&client, order_id, Some(&query))
        .await
        .unwrap();

    let position = &positions.rows[0];
    assert_eq!(position.quantity, 3.0);
    assert_eq!(position.vat, Some(20));
    assert_eq!(
        position.assortment.as_ref().and_then(|a| a.name()),
        Some("Widget")
    );
}

#[tokio::test]
async fn test_single_position_is_found_by_order_and_id() {
    let position_id = "f5a1c6a2-0b5c-11ef-0a80-17e1000ad700";
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!(
            "/1.2/entity/customerorder/{ORDER_ID}/positions/{position_id}"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": position_id,
            "quantity": 1.0,
            "price": 100.0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let position = CustomerOrderPosition::find_in_order(
        &client,
        Uuid::parse_str(ORDER_ID).unwrap(),
        Uuid::parse_str(position_id).unwrap(),
        None,
    )
    .await
    .unwrap();

    assert_eq!(position.price, 100.0);
}

#[tokio::test]
async fn test_new_order_is_posted_with_positions() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1.2/entity/customerorder"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": ORDER_ID,
            "name": "00001",
            "sum": 200.0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let order = CustomerOrder {
        positions: Some(vec![CustomerOrderPosition {
            quantity: 2.0,
            price: 100.0,
            ..Default::default()
        }]),
        ..Default::default()
    };

    let saved = order.save(&client).await.unwrap();
    assert_eq!(saved.sum, Some(200.0));

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["positions"][0]["quantity"], 2.0);
}

// ============================================================================
// Assortment
// ============================================================================

fn assortment_row(server: &MockServer, entity_type: &str, name: &str) -> serde_json::Value {
    json!({
        "meta": {
            "href": format!("{}/1.2/entity/{entity_type}/7944ef04-f831-11e5-7a69-971500188b19", server.uri()),
            "type": entity_type
        },
        "id": "7944ef04-f831-11e5-7a69-971500188b19",
        "name": name
    })
}

#[tokio::test]
async fn test_assortment_rows_are_polymorphic() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.2/entity/assortment"))
        .and(query_param("groupBy", "variant"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"href": "", "size": 3, "limit": 1000, "offset": 0},
            "rows": [
                assortment_row(&server, "product", "Widget"),
                assortment_row(&server, "variant", "Widget (XL)"),
                assortment_row(&server, "service", "Delivery")
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let mut query = AssortmentParameterBuilder::new();
    query.group_by(AssortmentGroupBy::Variant);

    let page = AssortmentItem::all(&client, Some(&query)).await.unwrap();

    assert!(matches!(page.rows[0], AssortmentItem::Product(_)));
    assert!(matches!(page.rows[1], AssortmentItem::Variant(_)));
    assert!(matches!(page.rows[2], AssortmentItem::Service(_)));
    assert_eq!(page.rows[2].name(), "Delivery");
}

#[tokio::test]
async fn test_assortment_with_unknown_row_type_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.2/entity/assortment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"href": "", "size": 1, "limit": 1000, "offset": 0},
            "rows": [assortment_row(&server, "counterparty", "Acme LLC")]
        })))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let result = AssortmentItem::all(&client, None).await;

    assert!(matches!(
        result,
        Err(ApiError::Deserialize {
            resource: "Assortment",
            ..
        })
    ));
}

#[tokio::test]
async fn test_assortment_cannot_be_saved() {
    let server = MockServer::start().await;
    let client = create_client(&server);
    let item: AssortmentItem =
        serde_json::from_value(assortment_row(&server, "service", "Delivery")).unwrap();

    assert!(matches!(
        item.save(&client).await,
        Err(ApiError::PathResolutionFailed { .. })
    ));
}

// ============================================================================
// Stock Reports
// ============================================================================

#[tokio::test]
async fn test_stock_report_sends_stock_mode_in_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.2/report/stock/all"))
        .and(query_param("filter", "stockMode=positiveOnly"))
        .and(query_param("order", "quantity,desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"href": "", "size": 1, "limit": 1000, "offset": 0},
            "rows": [{
                "meta": {
                    "href": format!("{}/1.2/entity/product/7944ef04-f831-11e5-7a69-971500188b19", server.uri()),
                    "type": "product"
                },
                "name": "Widget",
                "stock": 12.0,
                "reserve": 2.0,
                "inTransit": 1.0,
                "quantity": 11.0
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let mut query = StockReportParameterBuilder::new();
    query.order_by_descending(StockReport::QUANTITY).unwrap();
    query.stock_mode(StockMode::PositiveOnly);

    let report = StockReport::all(&client, Some(&query)).await.unwrap();
    assert_eq!(report.rows[0].quantity, 11.0);
}

#[tokio::test]
async fn test_current_stock_is_an_unpaged_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.2/report/stock/all/current"))
        .and(query_param("include", "zeroLines"))
        .and(query_param("stockType", "quantity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"assortmentId": "7944ef04-f831-11e5-7a69-971500188b19", "quantity": 11.0},
            {"assortmentId": "7944ef04-f831-11e5-7a69-971500188b20", "quantity": 0.0}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let mut query = CurrentStockParameterBuilder::new();
    query
        .include_zero_lines(true)
        .stock_type(CurrentStockType::Quantity);

    let rows = CurrentStock::all(&client, Some(&query)).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].quantity, Some(0.0));
}
