//! Inbound query filters.
//!
//! Every filter is camelCase on the wire and forwarded only when present. Paging defaults to
//! `size=100&page=0`. Comma-separated list parameters (`partNumbers`, `categories`, `rates`)
//! are expanded into repeated upstream pairs.

// self
use crate::{_prelude::*, gateway::DEFAULT_PAGE_SIZE, http::QueryPairs};

fn default_size() -> u32 {
	DEFAULT_PAGE_SIZE
}

fn default_true() -> bool {
	true
}

/// `GET /customers?search=`.
#[derive(Clone, Debug, Deserialize)]
pub struct CustomerSearch {
	/// Substring matched against customer names, emails, and phones.
	pub search: String,
}

/// `GET /vehicles?customerId=`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleFilter {
	/// Owning customer.
	pub customer_id: i64,
}

/// `GET /jobs?repairOrderId=`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFilter {
	/// Repair order the jobs belong to.
	pub repair_order_id: i64,
}

/// `GET /employees`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeFilter {
	/// Name search.
	pub search: Option<String>,
	/// Updated on or after (ISO 8601).
	pub updated_date_start: Option<String>,
	/// Updated on or before (ISO 8601).
	pub updated_date_end: Option<String>,
	/// Sort field.
	pub sort: Option<String>,
	/// `ASC` or `DESC`.
	pub sort_direction: Option<String>,
	/// Page size.
	#[serde(default = "default_size")]
	pub size: u32,
	/// Zero-based page.
	#[serde(default)]
	pub page: u32,
}
impl From<EmployeeFilter> for QueryPairs {
	fn from(filter: EmployeeFilter) -> Self {
		let mut query = QueryPairs::new();

		query
			.push_opt("search", filter.search)
			.push_opt("updatedDateStart", filter.updated_date_start)
			.push_opt("updatedDateEnd", filter.updated_date_end)
			.push_opt("sort", filter.sort)
			.push_opt("sortDirection", filter.sort_direction)
			.push("size", filter.size)
			.push("page", filter.page);

		query
	}
}

/// `GET /appointments`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentFilter {
	/// Customer filter.
	pub customer_id: Option<i64>,
	/// Vehicle filter.
	pub vehicle_id: Option<i64>,
	/// Starts on or after (ISO 8601).
	pub start: Option<String>,
	/// Ends on or before (ISO 8601).
	pub end: Option<String>,
	/// Updated on or after (ISO 8601).
	pub updated_date_start: Option<String>,
	/// Updated on or before (ISO 8601).
	pub updated_date_end: Option<String>,
	/// Whether deleted appointments are included; defaults to `true`.
	#[serde(default = "default_true")]
	pub include_deleted: bool,
	/// Sort field.
	pub sort: Option<String>,
	/// `ASC` or `DESC`.
	pub sort_direction: Option<String>,
	/// Page size.
	#[serde(default = "default_size")]
	pub size: u32,
	/// Zero-based page.
	#[serde(default)]
	pub page: u32,
}
impl From<AppointmentFilter> for QueryPairs {
	fn from(filter: AppointmentFilter) -> Self {
		let mut query = QueryPairs::new();

		query
			.push_opt("customerId", filter.customer_id)
			.push_opt("vehicleId", filter.vehicle_id)
			.push_opt("start", filter.start)
			.push_opt("end", filter.end)
			.push_opt("updatedDateStart", filter.updated_date_start)
			.push_opt("updatedDateEnd", filter.updated_date_end)
			.push("includeDeleted", filter.include_deleted)
			.push_opt("sort", filter.sort)
			.push_opt("sortDirection", filter.sort_direction)
			.push("size", filter.size)
			.push("page", filter.page);

		query
	}
}

/// `GET /inventory`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryFilter {
	/// Part type (1 = part, 2 = tire, 5 = battery).
	pub part_type_id: i64,
	/// Comma-separated exact part numbers.
	pub part_numbers: Option<String>,
	/// Tire width.
	pub width: Option<String>,
	/// Tire aspect ratio.
	pub ratio: Option<f64>,
	/// Tire rim diameter.
	pub diameter: Option<f64>,
	/// Concatenated tire size (`width/ratio/diameter`).
	pub tire_size: Option<String>,
	/// Sort fields.
	pub sort: Option<String>,
	/// `ASC` or `DESC`.
	pub sort_direction: Option<String>,
	/// Page size.
	#[serde(default = "default_size")]
	pub size: u32,
	/// Zero-based page.
	#[serde(default)]
	pub page: u32,
}
impl From<InventoryFilter> for QueryPairs {
	fn from(filter: InventoryFilter) -> Self {
		let mut query = QueryPairs::new();

		query
			.push("partTypeId", filter.part_type_id)
			.push_csv("partNumbers", filter.part_numbers.as_deref())
			.push_opt("width", filter.width)
			.push_opt("ratio", filter.ratio)
			.push_opt("diameter", filter.diameter)
			.push_opt("tireSize", filter.tire_size)
			.push_opt("sort", filter.sort)
			.push_opt("sortDirection", filter.sort_direction)
			.push("size", filter.size)
			.push("page", filter.page);

		query
	}
}

/// `GET /inspections`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionFilter {
	/// Inspected on or after (ISO 8601).
	pub start_date: Option<String>,
	/// Inspected on or before (ISO 8601).
	pub end_date: Option<String>,
	/// Vehicle filter.
	pub vehicle_id: Option<i64>,
	/// Repair order filter.
	pub repair_order_id: Option<i64>,
	/// Comma-separated sort fields.
	pub sort: Option<String>,
	/// `ASC` or `DESC`.
	pub sort_direction: Option<String>,
	/// Page size.
	#[serde(default = "default_size")]
	pub size: u32,
	/// Zero-based page.
	#[serde(default)]
	pub page: u32,
}
impl From<InspectionFilter> for QueryPairs {
	fn from(filter: InspectionFilter) -> Self {
		let mut query = QueryPairs::new();

		query
			.push_opt("startDate", filter.start_date)
			.push_opt("endDate", filter.end_date)
			.push_opt("vehicleId", filter.vehicle_id)
			.push_opt("repairOrderId", filter.repair_order_id)
			.push_opt("sort", filter.sort)
			.push_opt("sortDirection", filter.sort_direction)
			.push("size", filter.size)
			.push("page", filter.page);

		query
	}
}

/// `GET /canned-jobs`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CannedJobFilter {
	/// Name search.
	pub search: Option<String>,
	/// Comma-separated category codes.
	pub categories: Option<String>,
	/// Comma-separated labor rates.
	pub rates: Option<String>,
	/// Sort field.
	pub sort: Option<String>,
	/// `ASC` or `DESC`.
	pub sort_direction: Option<String>,
	/// Page size.
	#[serde(default = "default_size")]
	pub size: u32,
	/// Zero-based page.
	#[serde(default)]
	pub page: u32,
}
impl From<CannedJobFilter> for QueryPairs {
	fn from(filter: CannedJobFilter) -> Self {
		let mut query = QueryPairs::new();

		query
			.push_opt("search", filter.search)
			.push_csv("categories", filter.categories.as_deref())
			.push_csv("rates", filter.rates.as_deref())
			.push_opt("sort", filter.sort)
			.push_opt("sortDirection", filter.sort_direction)
			.push("size", filter.size)
			.push("page", filter.page);

		query
	}
}
