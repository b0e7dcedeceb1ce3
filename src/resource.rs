//! Upstream resource catalogue.
//!
//! Each [`Resource`] carries its upstream path, the label used in error and delete messages,
//! the key list responses are wrapped under, and how updates are guarded.

// self
use crate::_prelude::*;

/// How a PATCH against a resource is sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateMode {
	/// GET the target first; a 404 short-circuits and the PATCH is never sent.
	Verified,
	/// PATCH straight away; an upstream 404 maps to not-found.
	Direct,
}

/// Upstream entity kinds the gateway forwards to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
	/// Shops visible to the client credentials.
	Shop,
	/// Shop customers.
	Customer,
	/// Customer vehicles.
	Vehicle,
	/// Repair orders.
	RepairOrder,
	/// Repair-order jobs.
	Job,
	/// Shop employees.
	Employee,
	/// Calendar appointments.
	Appointment,
	/// Inventory parts.
	Inventory,
	/// Digital vehicle inspections.
	Inspection,
	/// Labor lines.
	Labor,
	/// Canned (template) jobs.
	CannedJob,
}
impl Resource {
	/// Upstream collection path relative to the API root.
	pub const fn path(self) -> &'static str {
		match self {
			Self::Shop => "shops",
			Self::Customer => "customers",
			Self::Vehicle => "vehicles",
			Self::RepairOrder => "repair-orders",
			Self::Job => "jobs",
			Self::Employee => "employees",
			Self::Appointment => "appointments",
			Self::Inventory => "inventory",
			Self::Inspection => "inspections",
			Self::Labor => "labor",
			Self::CannedJob => "canned-jobs",
		}
	}

	/// Human-readable label (`Repair Order ID 5 not found`).
	pub const fn label(self) -> &'static str {
		match self {
			Self::Shop => "Shop",
			Self::Customer => "Customer",
			Self::Vehicle => "Vehicle",
			Self::RepairOrder => "Repair Order",
			Self::Job => "Job",
			Self::Employee => "Employee",
			Self::Appointment => "Appointment",
			Self::Inventory => "Inventory",
			Self::Inspection => "Inspection",
			Self::Labor => "Labor",
			Self::CannedJob => "Canned Job",
		}
	}

	/// Key the gateway wraps list content under.
	pub const fn list_key(self) -> &'static str {
		match self {
			Self::CannedJob => "cannedJobs",
			Self::RepairOrder => "repairOrders",
			_ => self.path(),
		}
	}

	/// Update discipline for this resource.
	pub const fn update_mode(self) -> UpdateMode {
		match self {
			Self::Customer | Self::Vehicle | Self::RepairOrder | Self::Job => UpdateMode::Verified,
			_ => UpdateMode::Direct,
		}
	}

	/// Whether update payloads carry the configured `shopId`.
	pub const fn stamps_shop_on_update(self) -> bool {
		matches!(self, Self::Customer | Self::Vehicle | Self::Appointment)
	}

	/// Whether single-entity GETs carry the `shop` query parameter.
	pub const fn scopes_fetch(self) -> bool {
		matches!(self, Self::Inspection)
	}

	/// Whether a successful delete forwards the upstream body instead of a confirmation.
	pub const fn echoes_delete(self) -> bool {
		matches!(self, Self::Appointment)
	}

	/// Path of a single entity: `<path>/<id>`.
	pub fn entity_path(self, id: i64) -> String {
		format!("{}/{id}", self.path())
	}

	/// Not-found error for `id`.
	pub fn not_found(self, id: i64) -> Error {
		Error::NotFound { entity: self.label(), id }
	}
}
impl Display for Resource {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.label())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn entity_paths_and_labels() {
		assert_eq!(Resource::RepairOrder.entity_path(5), "repair-orders/5");
		assert_eq!(Resource::RepairOrder.not_found(5).to_string(), "Repair Order ID 5 not found");
		assert_eq!(Resource::CannedJob.list_key(), "cannedJobs");
		assert_eq!(Resource::Employee.list_key(), "employees");
	}

	#[test]
	fn update_guards_follow_resource() {
		assert_eq!(Resource::Customer.update_mode(), UpdateMode::Verified);
		assert_eq!(Resource::Appointment.update_mode(), UpdateMode::Direct);
		assert!(Resource::Appointment.stamps_shop_on_update());
		assert!(!Resource::Job.stamps_shop_on_update());
	}
}
