// crates.io
use axum::{
	Json,
	extract::{Path, Query, State},
};
// self
use crate::{
	_prelude::*,
	api::{
		AppState, AppointmentFilter, CannedJobFilter, CustomerSearch, EmployeeFilter,
		InspectionFilter, InventoryFilter, JobFilter, VehicleFilter,
	},
	gateway::CustomerHistory,
	model::{CannedJobIds, JobClock, OpenRepairOrder, Page, VehicleSummary},
	resource::Resource,
};

type Payload = Json<JsonMap<String, Value>>;
type JsonResult<T = Value> = Result<Json<T>>;

fn keyed(resource: Resource, content: Vec<Value>) -> Json<Value> {
	let mut body = JsonMap::new();

	body.insert(resource.list_key().into(), Value::Array(content));

	Json(Value::Object(body))
}

fn keyed_page(resource: Resource, page: Page<Value>) -> Json<Value> {
	let mut body = JsonMap::new();

	body.insert(resource.list_key().into(), Value::Array(page.content));
	body.insert("pageable".into(), page.pageable.unwrap_or_else(|| Value::Object(JsonMap::new())));

	Json(Value::Object(body))
}

/// `{"vehicles": [...]}`.
#[derive(Serialize)]
pub(super) struct VehicleList {
	vehicles: Vec<VehicleSummary>,
}

pub(super) async fn health() -> Json<Value> {
	Json(serde_json::json!({ "status": "ok" }))
}

pub(super) async fn list_shops(State(gateway): State<AppState>) -> JsonResult {
	Ok(Json(gateway.shops().await?))
}

pub(super) async fn get_shop(State(gateway): State<AppState>, Path(id): Path<i64>) -> JsonResult {
	Ok(Json(gateway.fetch(Resource::Shop, id).await?))
}

pub(super) async fn remove_shop_scope(
	State(gateway): State<AppState>,
	Path(id): Path<i64>,
) -> JsonResult {
	Ok(Json(gateway.remove_shop_scope(id).await?))
}

pub(super) async fn search_customers(
	State(gateway): State<AppState>,
	Query(filter): Query<CustomerSearch>,
) -> JsonResult {
	Ok(keyed(Resource::Customer, gateway.search_customers(&filter.search).await?))
}

pub(super) async fn get_customer(State(gateway): State<AppState>, Path(id): Path<i64>) -> JsonResult {
	Ok(Json(gateway.fetch(Resource::Customer, id).await?))
}

pub(super) async fn create_customer(
	State(gateway): State<AppState>,
	Json(payload): Payload,
) -> JsonResult {
	Ok(Json(gateway.create(Resource::Customer, payload).await?))
}

pub(super) async fn update_customer(
	State(gateway): State<AppState>,
	Path(id): Path<i64>,
	Json(payload): Payload,
) -> JsonResult {
	Ok(Json(gateway.update(Resource::Customer, id, payload).await?))
}

pub(super) async fn delete_customer(
	State(gateway): State<AppState>,
	Path(id): Path<i64>,
) -> JsonResult {
	Ok(Json(gateway.delete(Resource::Customer, id).await?))
}

pub(super) async fn customer_history(
	State(gateway): State<AppState>,
	Path(id): Path<i64>,
) -> JsonResult<CustomerHistory> {
	Ok(Json(gateway.customer_history(id).await?))
}

pub(super) async fn list_vehicles(
	State(gateway): State<AppState>,
	Query(filter): Query<VehicleFilter>,
) -> JsonResult<VehicleList> {
	Ok(Json(VehicleList { vehicles: gateway.list_vehicles(filter.customer_id).await? }))
}

pub(super) async fn get_vehicle(State(gateway): State<AppState>, Path(id): Path<i64>) -> JsonResult {
	Ok(Json(gateway.fetch(Resource::Vehicle, id).await?))
}

pub(super) async fn create_vehicle(
	State(gateway): State<AppState>,
	Json(payload): Payload,
) -> JsonResult {
	Ok(Json(gateway.create(Resource::Vehicle, payload).await?))
}

pub(super) async fn update_vehicle(
	State(gateway): State<AppState>,
	Path(id): Path<i64>,
	Json(payload): Payload,
) -> JsonResult {
	Ok(Json(gateway.update(Resource::Vehicle, id, payload).await?))
}

pub(super) async fn delete_vehicle(State(gateway): State<AppState>, Path(id): Path<i64>) -> JsonResult {
	Ok(Json(gateway.delete(Resource::Vehicle, id).await?))
}

pub(super) async fn open_repair_orders(
	State(gateway): State<AppState>,
) -> JsonResult<Vec<OpenRepairOrder>> {
	Ok(Json(gateway.open_repair_orders().await?))
}

pub(super) async fn get_repair_order(
	State(gateway): State<AppState>,
	Path(id): Path<i64>,
) -> JsonResult {
	Ok(Json(gateway.fetch(Resource::RepairOrder, id).await?))
}

pub(super) async fn create_repair_order(
	State(gateway): State<AppState>,
	Json(payload): Payload,
) -> JsonResult {
	Ok(Json(gateway.create(Resource::RepairOrder, payload).await?))
}

pub(super) async fn update_repair_order(
	State(gateway): State<AppState>,
	Path(id): Path<i64>,
	Json(payload): Payload,
) -> JsonResult {
	Ok(Json(gateway.update(Resource::RepairOrder, id, payload).await?))
}

pub(super) async fn delete_repair_order(
	State(gateway): State<AppState>,
	Path(id): Path<i64>,
) -> JsonResult {
	Ok(Json(gateway.delete(Resource::RepairOrder, id).await?))
}

pub(super) async fn add_canned_jobs(
	State(gateway): State<AppState>,
	Path(id): Path<i64>,
	Json(body): Json<CannedJobIds>,
) -> JsonResult {
	Ok(Json(gateway.add_canned_jobs(id, &body.job_ids).await?))
}

pub(super) async fn list_jobs(
	State(gateway): State<AppState>,
	Query(filter): Query<JobFilter>,
) -> JsonResult {
	Ok(keyed(Resource::Job, gateway.list_jobs(filter.repair_order_id).await?))
}

pub(super) async fn get_job(State(gateway): State<AppState>, Path(id): Path<i64>) -> JsonResult {
	Ok(Json(gateway.fetch(Resource::Job, id).await?))
}

pub(super) async fn update_job(
	State(gateway): State<AppState>,
	Path(id): Path<i64>,
	Json(payload): Payload,
) -> JsonResult {
	Ok(Json(gateway.update(Resource::Job, id, payload).await?))
}

pub(super) async fn delete_job(State(gateway): State<AppState>, Path(id): Path<i64>) -> JsonResult {
	Ok(Json(gateway.delete(Resource::Job, id).await?))
}

pub(super) async fn update_job_clock(
	State(gateway): State<AppState>,
	Path(id): Path<i64>,
	Json(clock): Json<JobClock>,
) -> JsonResult {
	Ok(Json(gateway.update_job_clock(id, &clock).await?))
}

pub(super) async fn list_employees(
	State(gateway): State<AppState>,
	Query(filter): Query<EmployeeFilter>,
) -> JsonResult {
	Ok(keyed(Resource::Employee, gateway.list(Resource::Employee, filter.into()).await?.content))
}

pub(super) async fn get_employee(State(gateway): State<AppState>, Path(id): Path<i64>) -> JsonResult {
	Ok(Json(gateway.fetch(Resource::Employee, id).await?))
}

pub(super) async fn list_appointments(
	State(gateway): State<AppState>,
	Query(filter): Query<AppointmentFilter>,
) -> JsonResult {
	let page = gateway.list(Resource::Appointment, filter.into()).await?;

	Ok(keyed(Resource::Appointment, page.content))
}

pub(super) async fn get_appointment(
	State(gateway): State<AppState>,
	Path(id): Path<i64>,
) -> JsonResult {
	Ok(Json(gateway.fetch(Resource::Appointment, id).await?))
}

pub(super) async fn create_appointment(
	State(gateway): State<AppState>,
	Json(payload): Payload,
) -> JsonResult {
	Ok(Json(gateway.create(Resource::Appointment, payload).await?))
}

pub(super) async fn update_appointment(
	State(gateway): State<AppState>,
	Path(id): Path<i64>,
	Json(payload): Payload,
) -> JsonResult {
	Ok(Json(gateway.update(Resource::Appointment, id, payload).await?))
}

pub(super) async fn delete_appointment(
	State(gateway): State<AppState>,
	Path(id): Path<i64>,
) -> JsonResult {
	Ok(Json(gateway.delete(Resource::Appointment, id).await?))
}

pub(super) async fn list_inventory(
	State(gateway): State<AppState>,
	Query(filter): Query<InventoryFilter>,
) -> JsonResult {
	Ok(keyed_page(Resource::Inventory, gateway.list(Resource::Inventory, filter.into()).await?))
}

pub(super) async fn list_inspections(
	State(gateway): State<AppState>,
	Query(filter): Query<InspectionFilter>,
) -> JsonResult {
	Ok(keyed_page(Resource::Inspection, gateway.list(Resource::Inspection, filter.into()).await?))
}

pub(super) async fn get_inspection(
	State(gateway): State<AppState>,
	Path(id): Path<i64>,
) -> JsonResult {
	Ok(Json(gateway.fetch(Resource::Inspection, id).await?))
}

pub(super) async fn update_labor(
	State(gateway): State<AppState>,
	Path(id): Path<i64>,
	Json(payload): Payload,
) -> JsonResult {
	Ok(Json(gateway.update(Resource::Labor, id, payload).await?))
}

pub(super) async fn list_canned_jobs(
	State(gateway): State<AppState>,
	Query(filter): Query<CannedJobFilter>,
) -> JsonResult {
	let page = gateway.list(Resource::CannedJob, filter.into()).await?;

	Ok(keyed(Resource::CannedJob, page.content))
}
