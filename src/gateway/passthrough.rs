//! Shop-scoped passthroughs: list, fetch, create, update, delete, and the per-resource extras.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	gateway::{DEFAULT_PAGE_SIZE, Gateway, require_found},
	http::{QueryPairs, UpstreamRequest},
	model::{JobClock, Page, Vehicle, VehicleSummary},
	resource::{Resource, UpdateMode},
};

/// Page size of the customer search.
const CUSTOMER_SEARCH_SIZE: u32 = 10;

impl Gateway {
	/// Raw shop list visible to the credentials, forwarded verbatim.
	pub async fn shops(&self) -> Result<Value> {
		self.send(UpstreamRequest::get(Resource::Shop.path()))
			.await?
			.error_for_status()?
			.value("shop list")
	}

	/// Lists `resource` with `shop=<shop_id>` followed by `filters`.
	pub async fn list(&self, resource: Resource, filters: QueryPairs) -> Result<Page<Value>> {
		let mut query = self.scoped_query();

		query.append(filters);

		self.send(UpstreamRequest::get(resource.path()).with_query(query))
			.await?
			.error_for_status()?
			.json("list page")
	}

	/// Substring customer search, capped at ten results.
	pub async fn search_customers(&self, search: &str) -> Result<Vec<Value>> {
		let mut filters = QueryPairs::new();

		filters.push("search", search).push("size", CUSTOMER_SEARCH_SIZE);

		Ok(self.list(Resource::Customer, filters).await?.content)
	}

	/// Vehicles owned by `customer_id`, reduced to their summary rows.
	pub async fn list_vehicles(&self, customer_id: i64) -> Result<Vec<VehicleSummary>> {
		let token = self.access_token().await?;

		Ok(self
			.customer_vehicles(&token, customer_id)
			.await?
			.into_iter()
			.map(VehicleSummary::from)
			.collect())
	}

	/// Jobs on `repair_order_id`.
	pub async fn list_jobs(&self, repair_order_id: i64) -> Result<Vec<Value>> {
		let mut filters = QueryPairs::new();

		filters.push("repairOrderId", repair_order_id).push("size", DEFAULT_PAGE_SIZE);

		Ok(self.list(Resource::Job, filters).await?.content)
	}

	/// Single entity, forwarded verbatim.
	pub async fn fetch(&self, resource: Resource, id: i64) -> Result<Value> {
		let token = self.access_token().await?;

		self.fetch_with(&token, resource, id).await
	}

	pub(crate) async fn fetch_with<T>(&self, token: &TokenSecret, resource: Resource, id: i64) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let mut request = UpstreamRequest::get(resource.entity_path(id));

		if resource.scopes_fetch() {
			request = request.with_query(self.scoped_query());
		}

		require_found(self.send_with(token, request).await?, resource, id)?.json(resource.path())
	}

	pub(crate) async fn customer_vehicles(&self, token: &TokenSecret, customer_id: i64) -> Result<Vec<Vehicle>> {
		let mut query = self.scoped_query();

		query.push("customerId", customer_id).push("size", DEFAULT_PAGE_SIZE);

		let page: Page<Vehicle> = self
			.send_with(token, UpstreamRequest::get(Resource::Vehicle.path()).with_query(query))
			.await?
			.error_for_status()?
			.json("vehicle page")?;

		Ok(page.content)
	}

	/// Creates an entity; the payload is stamped with `shopId`.
	pub async fn create(&self, resource: Resource, payload: JsonMap<String, Value>) -> Result<Value> {
		let body = self.stamp_shop(payload);

		self.send(UpstreamRequest::post(resource.path()).with_json(body))
			.await?
			.error_for_status()?
			.value(resource.path())
	}

	/// Partially updates an entity following the resource's [`UpdateMode`].
	///
	/// Verified resources are fetched first; a missing entity short-circuits with
	/// [`Error::NotFound`] and no PATCH is sent.
	pub async fn update(
		&self,
		resource: Resource,
		id: i64,
		payload: JsonMap<String, Value>,
	) -> Result<Value> {
		let token = self.access_token().await?;

		if resource.update_mode() == UpdateMode::Verified {
			self.ensure_exists(&token, resource, id).await?;
		}

		let body = if resource.stamps_shop_on_update() {
			self.stamp_shop(payload)
		} else {
			Value::Object(payload)
		};
		let response = self
			.send_with(&token, UpstreamRequest::patch(resource.entity_path(id)).with_json(body))
			.await?;

		require_found(response, resource, id)?.value(resource.path())
	}

	/// Deletes an entity, answering with a confirmation (or the upstream body for resources
	/// that echo it).
	pub async fn delete(&self, resource: Resource, id: i64) -> Result<Value> {
		let response =
			require_found(self.send(UpstreamRequest::delete(resource.entity_path(id))).await?, resource, id)?;

		if resource.echoes_delete() {
			return response.value(resource.path());
		}

		Ok(serde_json::json!({ "detail": format!("{} {id} deleted", resource.label()) }))
	}

	/// Removes the API scope from a shop.
	pub async fn remove_shop_scope(&self, shop_id: i64) -> Result<Value> {
		let path = format!("{}/scope", Resource::Shop.entity_path(shop_id));
		let response = self.send(UpstreamRequest::delete(path)).await?;

		if response.is_not_found() {
			return Err(Error::ScopeNotApplied { shop_id });
		}

		response.error_for_status()?;

		Ok(serde_json::json!({ "detail": format!("Scope removed for Shop ID {shop_id}") }))
	}

	/// Logs technician hours against a job.
	pub async fn update_job_clock(&self, job_id: i64, clock: &JobClock) -> Result<Value> {
		let path = format!("{}/job-clock", Resource::Job.entity_path(job_id));
		let body = serde_json::json!({
			"technicianId": clock.technician_id,
			"loggedHours": clock.logged_hours,
		});

		require_found(self.send(UpstreamRequest::put(path).with_json(body)).await?, Resource::Job, job_id)?
			.value("job clock")
	}

	/// Adds canned jobs to an existing repair order.
	pub async fn add_canned_jobs(&self, repair_order_id: i64, job_ids: &[i64]) -> Result<Value> {
		let token = self.access_token().await?;

		self.ensure_exists(&token, Resource::RepairOrder, repair_order_id).await?;

		let path = format!("{}/canned-jobs", Resource::RepairOrder.entity_path(repair_order_id));

		self.send_with(&token, UpstreamRequest::post(path).with_json(serde_json::json!(job_ids)))
			.await?
			.error_for_status()?
			.value("canned jobs")
	}

	async fn ensure_exists(&self, token: &TokenSecret, resource: Resource, id: i64) -> Result<()> {
		let response =
			self.send_with(token, UpstreamRequest::get(resource.entity_path(id))).await?;

		require_found(response, resource, id).map(|_| ())
	}

	fn stamp_shop(&self, mut payload: JsonMap<String, Value>) -> Value {
		payload.insert("shopId".into(), Value::from(self.shop_id));

		Value::Object(payload)
	}
}
