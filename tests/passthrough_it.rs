#![cfg(feature = "test")]

// crates.io
use httpmock::{Mock, prelude::*};
use serde_json::json;
// self
use tekmetric_gateway::{_preludet::*, gateway::Gateway, http::QueryPairs, model::JobClock, resource::Resource};

async fn mock_token(server: &MockServer) -> Mock<'_> {
	server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"pass-token\",\"expires_in\":3600}");
		})
		.await
}

fn gateway(server: &MockServer) -> Gateway {
	build_test_gateway(&test_config(&server.url("/")), test_clock())
}

fn payload(value: Value) -> JsonMap<String, Value> {
	match value {
		Value::Object(map) => map,
		other => panic!("Payload fixture should be an object, got {other}."),
	}
}

#[tokio::test]
async fn created_customer_can_be_fetched() {
	let server = MockServer::start_async().await;
	let gateway = gateway(&server);
	let _token = mock_token(&server).await;
	let create = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/customers")
				.header("authorization", "Bearer pass-token")
				.json_body(json!({ "firstName": "Ada", "lastName": "Lovelace", "shopId": TEST_SHOP_ID }));
			then.status(200).json_body(json!({ "id": 77, "firstName": "Ada", "lastName": "Lovelace" }));
		})
		.await;
	let fetch = server
		.mock_async(|when, then| {
			when.method(GET).path("/customers/77");
			then.status(200).json_body(json!({ "id": 77, "firstName": "Ada", "lastName": "Lovelace" }));
		})
		.await;
	let created = gateway
		.create(Resource::Customer, payload(json!({ "firstName": "Ada", "lastName": "Lovelace" })))
		.await
		.expect("Create should succeed.");
	let id = created["id"].as_i64().expect("Created customer should carry an id.");
	let fetched = gateway.fetch(Resource::Customer, id).await.expect("Fetch should succeed.");

	assert_eq!(fetched["firstName"], "Ada");

	create.assert_async().await;
	fetch.assert_async().await;
}

#[tokio::test]
async fn verified_update_of_missing_entity_sends_no_patch() {
	let server = MockServer::start_async().await;
	let gateway = gateway(&server);
	let _token = mock_token(&server).await;
	let check = server
		.mock_async(|when, then| {
			when.method(GET).path("/customers/99");
			then.status(404);
		})
		.await;
	let patch = server
		.mock_async(|when, then| {
			when.method(PATCH).path("/customers/99");
			then.status(200).json_body(json!({ "id": 99 }));
		})
		.await;
	let err = gateway
		.update(Resource::Customer, 99, payload(json!({ "notes": "vip" })))
		.await
		.expect_err("Missing customer should not be updated.");

	assert!(matches!(err, Error::NotFound { entity: "Customer", id: 99 }));
	assert_eq!(err.to_string(), "Customer ID 99 not found");

	check.assert_calls_async(1).await;
	patch.assert_calls_async(0).await;
}

#[tokio::test]
async fn verified_update_stamps_shop_after_check() {
	let server = MockServer::start_async().await;
	let gateway = gateway(&server);
	let _token = mock_token(&server).await;
	let _check = server
		.mock_async(|when, then| {
			when.method(GET).path("/vehicles/5");
			then.status(200).json_body(json!({ "id": 5 }));
		})
		.await;
	let patch = server
		.mock_async(|when, then| {
			when.method(PATCH)
				.path("/vehicles/5")
				.json_body(json!({ "color": "red", "shopId": TEST_SHOP_ID }));
			then.status(200).json_body(json!({ "id": 5, "color": "red" }));
		})
		.await;
	let updated = gateway
		.update(Resource::Vehicle, 5, payload(json!({ "color": "red" })))
		.await
		.expect("Update should succeed.");

	assert_eq!(updated["color"], "red");

	patch.assert_async().await;
}

#[tokio::test]
async fn verification_failure_other_than_404_aborts() {
	let server = MockServer::start_async().await;
	let gateway = gateway(&server);
	let _token = mock_token(&server).await;
	let _check = server
		.mock_async(|when, then| {
			when.method(GET).path("/jobs/3");
			then.status(503).header("retry-after", "7").body("maintenance");
		})
		.await;
	let patch = server
		.mock_async(|when, then| {
			when.method(PATCH).path("/jobs/3");
			then.status(200);
		})
		.await;
	let err = gateway
		.update(Resource::Job, 3, payload(json!({ "note": "x" })))
		.await
		.expect_err("Failed verification should abort.");

	assert!(matches!(
		err,
		Error::Upstream { status: 503, ref body, retry_after: Some(delay) }
			if body == "maintenance" && delay == Duration::seconds(7)
	));

	patch.assert_calls_async(0).await;
}

#[tokio::test]
async fn lists_are_scoped_to_the_configured_shop() {
	let server = MockServer::start_async().await;
	let gateway = gateway(&server);
	let _token = mock_token(&server).await;
	let list = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/employees")
				.query_param("shop", TEST_SHOP_ID.to_string())
				.query_param("search", "sam")
				.query_param("size", "100");
			then.status(200).json_body(json!({ "content": [{ "id": 1 }], "pageable": { "pageNumber": 0 } }));
		})
		.await;
	let mut filters = QueryPairs::new();

	filters.push("search", "sam").push("size", 100);

	let page = gateway.list(Resource::Employee, filters).await.expect("List should succeed.");

	assert_eq!(page.content, vec![json!({ "id": 1 })]);
	assert_eq!(page.pageable, Some(json!({ "pageNumber": 0 })));

	list.assert_async().await;
}

#[tokio::test]
async fn list_without_content_is_a_decode_error() {
	let server = MockServer::start_async().await;
	let gateway = gateway(&server);
	let _token = mock_token(&server).await;
	let _list = server
		.mock_async(|when, then| {
			when.method(GET).path("/canned-jobs");
			then.status(200).json_body(json!({ "items": [] }));
		})
		.await;
	let err = gateway
		.list(Resource::CannedJob, QueryPairs::new())
		.await
		.expect_err("Envelope without content should fail.");

	assert!(matches!(err, Error::Decode { .. }));
}

#[tokio::test]
async fn delete_confirms_or_echoes() {
	let server = MockServer::start_async().await;
	let gateway = gateway(&server);
	let _token = mock_token(&server).await;
	let _archive = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/repair-orders/12");
			then.status(200).json_body(json!({ "type": "SUCCESS" }));
		})
		.await;
	let _appointment = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/appointments/4");
			then.status(200).json_body(json!({ "type": "SUCCESS", "message": "Appointment deleted" }));
		})
		.await;
	let _missing = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/vehicles/8");
			then.status(404);
		})
		.await;

	assert_eq!(
		gateway.delete(Resource::RepairOrder, 12).await.expect("Delete should succeed."),
		json!({ "detail": "Repair Order 12 deleted" })
	);
	assert_eq!(
		gateway.delete(Resource::Appointment, 4).await.expect("Delete should succeed.")["message"],
		"Appointment deleted"
	);
	assert!(matches!(
		gateway.delete(Resource::Vehicle, 8).await,
		Err(Error::NotFound { entity: "Vehicle", id: 8 })
	));
}

#[tokio::test]
async fn vehicle_list_is_summarised() {
	let server = MockServer::start_async().await;
	let gateway = gateway(&server);
	let _token = mock_token(&server).await;
	let _list = server
		.mock_async(|when, then| {
			when.method(GET).path("/vehicles").query_param("customerId", "20");
			then.status(200).json_body(json!({
				"content": [
					{ "id": 10, "year": 2022, "make": "Ford", "model": "Escape", "vin": "1FM", "color": "red" },
					{ "id": 11, "year": 2015, "make": "Honda", "model": "Fit" }
				]
			}));
		})
		.await;
	let vehicles = gateway.list_vehicles(20).await.expect("Vehicle list should succeed.");
	let json = serde_json::to_value(&vehicles).expect("Summaries should serialize.");

	assert_eq!(
		json,
		json!([
			{ "vehicleId": 10, "year": 2022, "make": "Ford", "model": "Escape", "vin": "1FM", "licensePlate": "N/A" },
			{ "vehicleId": 11, "year": 2015, "make": "Honda", "model": "Fit", "vin": "N/A", "licensePlate": "N/A" }
		])
	);
}

#[tokio::test]
async fn canned_jobs_require_existing_repair_order() {
	let server = MockServer::start_async().await;
	let gateway = gateway(&server);
	let _token = mock_token(&server).await;
	let _check = server
		.mock_async(|when, then| {
			when.method(GET).path("/repair-orders/5");
			then.status(200).json_body(json!({ "id": 5 }));
		})
		.await;
	let add = server
		.mock_async(|when, then| {
			when.method(POST).path("/repair-orders/5/canned-jobs").json_body(json!([101, 102]));
			then.status(200).json_body(json!({ "type": "SUCCESS" }));
		})
		.await;
	let _missing = server
		.mock_async(|when, then| {
			when.method(GET).path("/repair-orders/6");
			then.status(404);
		})
		.await;

	gateway.add_canned_jobs(5, &[101, 102]).await.expect("Canned jobs should be added.");

	assert!(matches!(
		gateway.add_canned_jobs(6, &[101]).await,
		Err(Error::NotFound { entity: "Repair Order", id: 6 })
	));

	add.assert_calls_async(1).await;
}

#[tokio::test]
async fn job_clock_and_shop_scope_map_not_found() {
	let server = MockServer::start_async().await;
	let gateway = gateway(&server);
	let _token = mock_token(&server).await;
	let clock = server
		.mock_async(|when, then| {
			when.method(PUT)
				.path("/jobs/9/job-clock")
				.json_body(json!({ "technicianId": 3, "loggedHours": 1.5 }));
			then.status(200).json_body(json!({ "type": "SUCCESS" }));
		})
		.await;
	let _scope = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/shops/404/scope");
			then.status(404);
		})
		.await;

	gateway
		.update_job_clock(9, &JobClock { technician_id: 3, logged_hours: 1.5 })
		.await
		.expect("Job clock update should succeed.");

	let err = gateway.remove_shop_scope(404).await.expect_err("Missing shop scope should fail.");

	assert!(matches!(err, Error::ScopeNotApplied { shop_id: 404 }));
	assert_eq!(err.to_string(), "Shop ID 404 not found or scope not applied");

	clock.assert_async().await;
}
