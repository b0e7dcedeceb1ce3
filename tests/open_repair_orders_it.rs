#![cfg(feature = "test")]

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use tekmetric_gateway::{_preludet::*, model::OpenRepairOrder};

#[tokio::test]
async fn open_repair_orders_are_hydrated_and_degrade_per_field() {
	let server = MockServer::start_async().await;
	let gateway = build_test_gateway(&test_config(&server.url("/")), test_clock());
	let token = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"ro-token\",\"expires_in\":3600}");
		})
		.await;
	let list = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/repair-orders")
				.query_param("shop", TEST_SHOP_ID.to_string())
				.query_param("repairOrderStatusId", "1")
				.query_param("repairOrderStatusId", "2")
				.query_param("size", "100");
			then.status(200).json_body(json!({
				"content": [
					{
						"id": 1,
						"repairOrderNumber": 1001,
						"vehicleId": 10,
						"customerId": 20,
						"technicianId": 30,
						"repairOrderStatus": { "id": 2, "name": "Work-in-Progress" },
						"updatedDate": "2025-01-01T08:00:00Z"
					},
					{
						"id": 2,
						"repairOrderNumber": 1002,
						"vehicleId": 11,
						"customerId": 21,
						"repairOrderStatus": { "id": 1, "name": "Estimate" },
						"updatedDate": "2025-01-01T09:00:00Z"
					}
				],
				"pageable": { "pageNumber": 0 }
			}));
		})
		.await;
	let _vehicle_10 = server
		.mock_async(|when, then| {
			when.method(GET).path("/vehicles/10").header("authorization", "Bearer ro-token");
			then.status(200).json_body(json!({ "id": 10, "year": 2022, "make": "Ford", "model": "Escape" }));
		})
		.await;
	let _vehicle_11 = server
		.mock_async(|when, then| {
			when.method(GET).path("/vehicles/11");
			then.status(200)
				.delay(StdDuration::from_millis(1_500))
				.json_body(json!({ "id": 11, "year": 2015, "make": "Honda", "model": "Fit" }));
		})
		.await;
	let _customer_20 = server
		.mock_async(|when, then| {
			when.method(GET).path("/customers/20");
			then.status(200).json_body(json!({ "id": 20, "firstName": "Jane", "lastName": "Doe" }));
		})
		.await;
	let _customer_21 = server
		.mock_async(|when, then| {
			when.method(GET).path("/customers/21");
			then.status(200).json_body(json!({ "id": 21, "firstName": "John", "lastName": "Roe" }));
		})
		.await;
	let _technician = server
		.mock_async(|when, then| {
			when.method(GET).path("/employees/30");
			then.status(200).json_body(json!({ "id": 30, "firstName": "Sam", "lastName": "Tech" }));
		})
		.await;
	let open = gateway.open_repair_orders().await.expect("Open repair orders should load.");

	assert_eq!(
		open,
		vec![
			OpenRepairOrder {
				id: Some(1),
				ro_number: Some(1001),
				vehicle: "2022 Ford Escape".into(),
				customer: "Jane Doe".into(),
				technician: "Sam Tech".into(),
				status: "Work-in-Progress".into(),
				last_updated: Some("2025-01-01T08:00:00Z".into()),
			},
			OpenRepairOrder {
				id: Some(2),
				ro_number: Some(1002),
				vehicle: "Unknown".into(),
				customer: "John Roe".into(),
				technician: "Unassigned".into(),
				status: "Estimate".into(),
				last_updated: Some("2025-01-01T09:00:00Z".into()),
			},
		]
	);

	token.assert_calls_async(1).await;
	list.assert_async().await;
}

#[tokio::test]
async fn failing_repair_order_list_fails_the_call() {
	let server = MockServer::start_async().await;
	let gateway = build_test_gateway(&test_config(&server.url("/")), test_clock());
	let _token = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"ro-token\",\"expires_in\":3600}");
		})
		.await;
	let _list = server
		.mock_async(|when, then| {
			when.method(GET).path("/repair-orders");
			then.status(502).body("bad gateway");
		})
		.await;
	let err = gateway.open_repair_orders().await.expect_err("List failure should propagate.");

	assert!(matches!(err, Error::Upstream { status: 502, .. }));
}
