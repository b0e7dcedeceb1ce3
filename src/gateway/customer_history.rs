//! Customer service history: the customer, their vehicles, each vehicle's repair orders, and
//! each repair order's jobs.
//!
//! The customer and vehicle fetches are primary and fail the call. The nested repair order
//! and job lists fan out concurrently and degrade to empty lists on failure.

// crates.io
use futures::future;
// self
use crate::{
	_prelude::*,
	gateway::{DEFAULT_PAGE_SIZE, Gateway},
	http::UpstreamRequest,
	hydrate::Hydrator,
	model::{Customer, RepairOrder, Vehicle, VehicleSummary},
	resource::Resource,
};

/// Full service history of one customer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerHistory {
	/// Customer record, forwarded as upstream returned it.
	pub customer: Customer,
	/// Vehicles owned by the customer.
	pub vehicles: Vec<VehicleHistory>,
}

/// One vehicle and its repair orders.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleHistory {
	/// Summary row for the vehicle.
	#[serde(flatten)]
	pub vehicle: VehicleSummary,
	/// Repair orders on the vehicle; empty when the lookup failed.
	pub repair_orders: Vec<RepairOrderHistory>,
}

/// One repair order and its jobs.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairOrderHistory {
	/// Repair order, forwarded as upstream returned it.
	#[serde(flatten)]
	pub repair_order: RepairOrder,
	/// Jobs on the repair order; empty when the lookup failed.
	pub jobs: Vec<Value>,
}

impl Gateway {
	/// Assembles the service history of `customer_id`.
	pub async fn customer_history(&self, customer_id: i64) -> Result<CustomerHistory> {
		let token = self.access_token().await?;
		let customer: Customer = self.fetch_with(&token, Resource::Customer, customer_id).await?;
		let vehicles = self.customer_vehicles(&token, customer_id).await?;
		let hydrator = Hydrator::new(self.upstream(), &token);
		let vehicles =
			future::join_all(vehicles.into_iter().map(|vehicle| self.vehicle_history(hydrator, vehicle)))
				.await;

		Ok(CustomerHistory { customer, vehicles })
	}

	async fn vehicle_history(&self, hydrator: Hydrator<'_>, vehicle: Vehicle) -> VehicleHistory {
		let repair_orders = match vehicle.id {
			Some(vehicle_id) => {
				let mut query = self.scoped_query();

				query.push("vehicleId", vehicle_id).push("size", DEFAULT_PAGE_SIZE);

				hydrator
					.list_or_empty::<RepairOrder>(
						UpstreamRequest::get(Resource::RepairOrder.path()).with_query(query),
					)
					.await
			},
			None => Vec::new(),
		};
		let repair_orders = future::join_all(
			repair_orders.into_iter().map(|repair_order| self.repair_order_history(hydrator, repair_order)),
		)
		.await;

		VehicleHistory { vehicle: VehicleSummary::from(vehicle), repair_orders }
	}

	async fn repair_order_history(
		&self,
		hydrator: Hydrator<'_>,
		repair_order: RepairOrder,
	) -> RepairOrderHistory {
		let jobs = match repair_order.id {
			Some(repair_order_id) => {
				let mut query = self.scoped_query();

				query.push("repairOrderId", repair_order_id).push("size", DEFAULT_PAGE_SIZE);

				hydrator
					.list_or_empty::<Value>(UpstreamRequest::get(Resource::Job.path()).with_query(query))
					.await
			},
			None => Vec::new(),
		};

		RepairOrderHistory { repair_order, jobs }
	}
}
