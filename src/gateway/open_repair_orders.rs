//! Open repair orders with vehicle, customer, and technician names resolved.

// self
use crate::{
	_prelude::*,
	gateway::{DEFAULT_PAGE_SIZE, Gateway},
	http::UpstreamRequest,
	hydrate::{ForeignKeySpec, Hydrator},
	model::{
		Customer, Employee, OPEN_REPAIR_ORDER_STATUSES, OpenRepairOrder, Page, RepairOrder, Vehicle,
	},
	resource::Resource,
};

impl Gateway {
	/// Lists estimates and work-in-progress repair orders for the shop, hydrated.
	///
	/// Only the repair order list itself can fail the call; each related-entity lookup falls
	/// back to `Unknown` (or `Unassigned` for technicians) on its own.
	pub async fn open_repair_orders(&self) -> Result<Vec<OpenRepairOrder>> {
		let token = self.access_token().await?;
		let mut query = self.scoped_query();

		for status in OPEN_REPAIR_ORDER_STATUSES {
			query.push("repairOrderStatusId", status);
		}

		query.push("size", DEFAULT_PAGE_SIZE);

		let page: Page<RepairOrder> = self
			.send_with(&token, UpstreamRequest::get(Resource::RepairOrder.path()).with_query(query))
			.await?
			.error_for_status()?
			.json("repair order page")?;
		let lookups = open_repair_order_lookups();
		let hydrated = Hydrator::new(self.upstream(), &token).hydrate(page.content, &lookups).await;

		Ok(hydrated.into_iter().map(OpenRepairOrder::from).collect())
	}
}

fn open_repair_order_lookups() -> [ForeignKeySpec<RepairOrder>; 3] {
	[
		ForeignKeySpec::new::<Vehicle>(
			OpenRepairOrder::VEHICLE,
			Resource::Vehicle,
			|ro: &RepairOrder| ro.vehicle_id,
			OpenRepairOrder::UNKNOWN,
		),
		ForeignKeySpec::new::<Customer>(
			OpenRepairOrder::CUSTOMER,
			Resource::Customer,
			|ro: &RepairOrder| ro.customer_id,
			OpenRepairOrder::UNKNOWN,
		),
		ForeignKeySpec::new::<Employee>(
			OpenRepairOrder::TECHNICIAN,
			Resource::Employee,
			|ro: &RepairOrder| ro.technician_id,
			OpenRepairOrder::UNASSIGNED,
		),
	]
}
