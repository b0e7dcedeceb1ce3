#![cfg(feature = "test")]

// crates.io
use httpmock::{Mock, prelude::*};
use serde_json::json;
// self
use tekmetric_gateway::_preludet::*;

async fn mock_token(server: &MockServer) -> Mock<'_> {
	server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"history-token\",\"expires_in\":3600}");
		})
		.await
}

#[tokio::test]
async fn history_nests_vehicles_repair_orders_and_jobs() {
	let server = MockServer::start_async().await;
	let gateway = build_test_gateway(&test_config(&server.url("/")), test_clock());
	let _token = mock_token(&server).await;
	let _customer = server
		.mock_async(|when, then| {
			when.method(GET).path("/customers/20");
			then.status(200).json_body(json!({ "id": 20, "firstName": "Jane", "lastName": "Doe" }));
		})
		.await;
	let _vehicles = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/vehicles")
				.query_param("shop", TEST_SHOP_ID.to_string())
				.query_param("customerId", "20");
			then.status(200).json_body(json!({
				"content": [
					{ "id": 10, "year": 2022, "make": "Ford", "model": "Escape" },
					{ "id": 11, "year": 2015, "make": "Honda", "model": "Fit" }
				]
			}));
		})
		.await;
	let _orders_10 = server
		.mock_async(|when, then| {
			when.method(GET).path("/repair-orders").query_param("vehicleId", "10");
			then.status(200).json_body(json!({ "content": [{ "id": 1, "repairOrderNumber": 1001 }] }));
		})
		.await;
	let _orders_11 = server
		.mock_async(|when, then| {
			when.method(GET).path("/repair-orders").query_param("vehicleId", "11");
			then.status(500).body("unavailable");
		})
		.await;
	let jobs = server
		.mock_async(|when, then| {
			when.method(GET).path("/jobs").query_param("repairOrderId", "1");
			then.status(200).json_body(json!({ "content": [{ "id": 900, "name": "Oil change" }] }));
		})
		.await;
	let history = gateway.customer_history(20).await.expect("History should load.");

	assert_eq!(history.customer.display_name().as_deref(), Some("Jane Doe"));
	assert_eq!(history.vehicles.len(), 2);
	assert_eq!(history.vehicles[0].vehicle.vehicle_id, Some(10));
	assert_eq!(history.vehicles[0].repair_orders.len(), 1);
	assert_eq!(history.vehicles[0].repair_orders[0].jobs, vec![json!({ "id": 900, "name": "Oil change" })]);
	assert!(history.vehicles[1].repair_orders.is_empty());

	let json = serde_json::to_value(&history).expect("History should serialize.");

	assert_eq!(json["vehicles"][0]["repairOrders"][0]["repairOrderNumber"], 1001);
	assert_eq!(json["vehicles"][1]["vin"], "N/A");

	jobs.assert_calls_async(1).await;
}

#[tokio::test]
async fn missing_customer_is_not_found() {
	let server = MockServer::start_async().await;
	let gateway = build_test_gateway(&test_config(&server.url("/")), test_clock());
	let _token = mock_token(&server).await;
	let _customer = server
		.mock_async(|when, then| {
			when.method(GET).path("/customers/404");
			then.status(404);
		})
		.await;
	let vehicles = server
		.mock_async(|when, then| {
			when.method(GET).path("/vehicles");
			then.status(200).json_body(json!({ "content": [] }));
		})
		.await;
	let err = gateway.customer_history(404).await.expect_err("Missing customer should fail.");

	assert!(matches!(err, Error::NotFound { entity: "Customer", id: 404 }));

	vehicles.assert_calls_async(0).await;
}

#[tokio::test]
async fn vehicle_list_failure_aborts_history() {
	let server = MockServer::start_async().await;
	let gateway = build_test_gateway(&test_config(&server.url("/")), test_clock());
	let _token = mock_token(&server).await;
	let _customer = server
		.mock_async(|when, then| {
			when.method(GET).path("/customers/20");
			then.status(200).json_body(json!({ "id": 20 }));
		})
		.await;
	let _vehicles = server
		.mock_async(|when, then| {
			when.method(GET).path("/vehicles");
			then.status(503).body("down");
		})
		.await;
	let err = gateway.customer_history(20).await.expect_err("Vehicle failure should abort.");

	assert!(matches!(err, Error::Upstream { status: 503, .. }));
}
