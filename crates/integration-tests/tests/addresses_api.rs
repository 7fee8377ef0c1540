//! End-to-end tests for the address endpoints.

use axum::http::StatusCode;
use rolodex_integration_tests::TestContext;
use serde_json::{Value, json};

fn address_json(details: &str, city: &str, state: &str, pin: &str) -> Value {
    json!({"address_details": details, "city": city, "state": state, "pin_code": pin})
}

fn data_len(body: &Value) -> usize {
    body["data"].as_array().map_or(0, Vec::len)
}

#[tokio::test]
async fn test_add_and_list_addresses() {
    let ctx = TestContext::new().await;
    let ann = ctx.create_customer("Ann", "Lee", "1234567890").await;

    let added = ctx
        .post(
            &format!("/customers/{ann}/addresses"),
            &address_json("12 Park Street", "Pune", "Maharashtra", "411001"),
        )
        .await;
    assert_eq!(added.status, StatusCode::OK);
    assert_eq!(added.body["message"], "Address added successfully");
    assert_eq!(added.body["data"]["customer_id"], ann);
    assert_eq!(added.body["data"]["city"], "Pune");

    let listed = ctx.get(&format!("/customers/{ann}/addresses")).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["message"], "Success");
    assert_eq!(data_len(&listed.body), 1);
    assert_eq!(listed.body["data"][0], added.body["data"]);
}

#[tokio::test]
async fn test_list_for_unknown_customer_is_empty() {
    let ctx = TestContext::new().await;
    let listed = ctx.get("/customers/321/addresses").await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["data"], json!([]));
}

#[tokio::test]
async fn test_add_address_missing_fields_is_400() {
    let ctx = TestContext::new().await;
    let ann = ctx.create_customer("Ann", "Lee", "1234567890").await;

    let response = ctx
        .post(
            &format!("/customers/{ann}/addresses"),
            &json!({"address_details": "12 Park Street", "city": "Pune"}),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "All address fields are required");
    assert_eq!(response.body["fields"]["state"], "State is required");
    assert_eq!(response.body["fields"]["pin_code"], "PIN code is required");
}

#[tokio::test]
async fn test_add_address_to_unknown_customer_is_store_error() {
    let ctx = TestContext::new().await;
    let response = ctx
        .post(
            "/customers/999/addresses",
            &address_json("12 Park Street", "Pune", "Maharashtra", "411001"),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(
        response.body["error"]
            .as_str()
            .is_some_and(|e| e.contains("FOREIGN KEY"))
    );
}

#[tokio::test]
async fn test_update_address() {
    let ctx = TestContext::new().await;
    let ann = ctx.create_customer("Ann", "Lee", "1234567890").await;
    let id = ctx
        .create_address(ann, "12 Park Street", "Pune", "Maharashtra", "411001")
        .await;

    let response = ctx
        .put(
            &format!("/addresses/{id}"),
            &address_json("7 Lake Road", "Nagpur", "Maharashtra", "440001"),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Address updated successfully");
    assert_eq!(response.body["data"]["id"], id);
    assert_eq!(response.body["data"]["customer_id"], ann);
    assert_eq!(response.body["data"]["city"], "Nagpur");
}

#[tokio::test]
async fn test_update_unknown_address_is_404() {
    let ctx = TestContext::new().await;
    let response = ctx
        .put(
            "/addresses/55",
            &address_json("7 Lake Road", "Nagpur", "Maharashtra", "440001"),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!({"error": "Address not found"}));
}

#[tokio::test]
async fn test_delete_address() {
    let ctx = TestContext::new().await;
    let ann = ctx.create_customer("Ann", "Lee", "1234567890").await;
    let id = ctx
        .create_address(ann, "12 Park Street", "Pune", "Maharashtra", "411001")
        .await;

    let response = ctx.delete(&format!("/addresses/{id}")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({"message": "Address deleted successfully"})
    );

    let again = ctx.delete(&format!("/addresses/{id}")).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    assert_eq!(again.body["error"], "Address not found");
}

#[tokio::test]
async fn test_deleting_customer_removes_addresses() {
    let ctx = TestContext::new().await;
    let ann = ctx.create_customer("Ann", "Lee", "1234567890").await;
    let bob = ctx.create_customer("Bob", "Ray", "2222222222").await;
    ctx.create_address(ann, "1 A St", "Pune", "Maharashtra", "411001")
        .await;
    ctx.create_address(ann, "2 B St", "Mumbai", "Maharashtra", "400001")
        .await;
    ctx.create_address(bob, "3 C St", "Pune", "Maharashtra", "411002")
        .await;

    assert_eq!(
        ctx.delete(&format!("/customers/{ann}")).await.status,
        StatusCode::OK
    );

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM addresses WHERE customer_id = ?")
        .bind(ann)
        .fetch_one(&ctx.pool)
        .await
        .unwrap_or(-1);
    assert_eq!(remaining, 0);

    let everything = ctx.get("/addresses/search").await;
    assert_eq!(data_len(&everything.body), 1);
    assert_eq!(everything.body["data"][0]["first_name"], "Bob");
}

#[tokio::test]
async fn test_search_addresses() {
    let ctx = TestContext::new().await;
    let ann = ctx.create_customer("Ann", "Lee", "1234567890").await;
    let bob = ctx.create_customer("Bob", "Ray", "2222222222").await;
    ctx.create_address(ann, "1 A St", "Pune", "Maharashtra", "411001")
        .await;
    ctx.create_address(bob, "2 B St", "Pune", "Maharashtra", "411045")
        .await;
    ctx.create_address(bob, "3 C St", "Panaji", "Goa", "403001")
        .await;

    let pune = ctx.get("/addresses/search?city=pun").await;
    assert_eq!(pune.status, StatusCode::OK);
    assert_eq!(pune.body["message"], "Success");
    assert_eq!(data_len(&pune.body), 2);
    assert_eq!(pune.body["data"][0]["first_name"], "Ann");
    assert_eq!(pune.body["data"][0]["last_name"], "Lee");
    assert_eq!(pune.body["data"][0]["customer_id"], ann);

    let narrowed = ctx.get("/addresses/search?city=Pune&pin_code=045").await;
    assert_eq!(data_len(&narrowed.body), 1);
    assert_eq!(narrowed.body["data"][0]["first_name"], "Bob");

    let goa = ctx.get("/addresses/search?state=goa").await;
    assert_eq!(data_len(&goa.body), 1);

    let none = ctx.get("/addresses/search?state=Kerala").await;
    assert_eq!(none.body["data"], json!([]));
}
