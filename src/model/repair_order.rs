//! Repair orders and the hydrated open-order view.

// self
use crate::{_prelude::*, hydrate::HydratedRecord};

/// Status block nested in a repair order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairOrderStatus {
	/// Numeric status (1 = estimate, 2 = work in progress, ...).
	#[serde(default)]
	pub id: Option<i64>,
	/// Short status code.
	#[serde(default)]
	pub code: Option<String>,
	/// Display name.
	#[serde(default)]
	pub name: Option<String>,
}

/// Upstream repair order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairOrder {
	/// Repair order identifier.
	#[serde(default)]
	pub id: Option<i64>,
	/// Shop-facing repair order number.
	#[serde(default)]
	pub repair_order_number: Option<i64>,
	/// Vehicle being serviced.
	#[serde(default)]
	pub vehicle_id: Option<i64>,
	/// Owning customer.
	#[serde(default)]
	pub customer_id: Option<i64>,
	/// Assigned technician.
	#[serde(default)]
	pub technician_id: Option<i64>,
	/// Current status.
	#[serde(default)]
	pub repair_order_status: Option<RepairOrderStatus>,
	/// Last modification timestamp, forwarded as upstream formats it.
	#[serde(default)]
	pub updated_date: Option<String>,
	/// Remaining upstream fields, preserved verbatim.
	#[serde(flatten)]
	pub extra: JsonMap<String, Value>,
}

/// Status ids that count as open work: estimates and work in progress.
pub const OPEN_REPAIR_ORDER_STATUSES: [i64; 2] = [1, 2];

/// Open repair order with its related entities resolved to display strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenRepairOrder {
	/// Repair order identifier.
	pub id: Option<i64>,
	/// Repair order number.
	pub ro_number: Option<i64>,
	/// `"<year> <make> <model>"` or `Unknown`.
	pub vehicle: String,
	/// `"<first> <last>"` or `Unknown`.
	pub customer: String,
	/// Technician name or `Unassigned`.
	pub technician: String,
	/// Status name or `Unknown`.
	pub status: String,
	/// Last modification timestamp.
	pub last_updated: Option<String>,
}
impl OpenRepairOrder {
	/// Field names hydrated onto each open repair order.
	pub const VEHICLE: &'static str = "vehicle";
	/// See [`Self::VEHICLE`].
	pub const CUSTOMER: &'static str = "customer";
	/// See [`Self::VEHICLE`].
	pub const TECHNICIAN: &'static str = "technician";
	/// Fallback for unresolved vehicles, customers, and statuses.
	pub const UNKNOWN: &'static str = "Unknown";
	/// Fallback for repair orders without a resolvable technician.
	pub const UNASSIGNED: &'static str = "Unassigned";
}
impl From<HydratedRecord<RepairOrder>> for OpenRepairOrder {
	fn from(hydrated: HydratedRecord<RepairOrder>) -> Self {
		let HydratedRecord { record, mut display } = hydrated;
		let mut take = |field: &'static str, default: &'static str| {
			display.remove(field).unwrap_or_else(|| default.to_owned())
		};

		Self {
			id: record.id,
			ro_number: record.repair_order_number,
			vehicle: take(Self::VEHICLE, Self::UNKNOWN),
			customer: take(Self::CUSTOMER, Self::UNKNOWN),
			technician: take(Self::TECHNICIAN, Self::UNASSIGNED),
			status: record
				.repair_order_status
				.and_then(|status| status.name)
				.filter(|name| !name.trim().is_empty())
				.unwrap_or_else(|| Self::UNKNOWN.to_owned()),
			last_updated: record.updated_date,
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::http::decode_json;

	#[test]
	fn open_view_uses_status_name_and_defaults() {
		let record = decode_json::<RepairOrder>(
			br#"{"id":5,"repairOrderNumber":1001,"vehicleId":10,"repairOrderStatus":{"id":2,"name":"Work-in-Progress"},"updatedDate":"2025-01-01T00:00:00Z"}"#,
		)
		.expect("Repair order fixture should decode.");
		let mut display = BTreeMap::new();

		display.insert(OpenRepairOrder::VEHICLE, "2022 Ford Escape".to_owned());

		let open = OpenRepairOrder::from(HydratedRecord { record, display });

		assert_eq!(open.ro_number, Some(1001));
		assert_eq!(open.vehicle, "2022 Ford Escape");
		assert_eq!(open.customer, "Unknown");
		assert_eq!(open.technician, "Unassigned");
		assert_eq!(open.status, "Work-in-Progress");
		assert_eq!(open.last_updated.as_deref(), Some("2025-01-01T00:00:00Z"));
	}

	#[test]
	fn missing_status_is_unknown() {
		let open = OpenRepairOrder::from(HydratedRecord {
			record: RepairOrder::default(),
			display: BTreeMap::new(),
		});

		assert_eq!(open.status, "Unknown");
	}
}
