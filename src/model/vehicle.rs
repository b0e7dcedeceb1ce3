//! Vehicle records and the summary row returned by vehicle lists.

// self
use crate::{_prelude::*, hydrate::RelatedEntity, model::join_display};

/// Upstream vehicle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
	/// Vehicle identifier.
	#[serde(default)]
	pub id: Option<i64>,
	/// Owning customer.
	#[serde(default)]
	pub customer_id: Option<i64>,
	/// Model year.
	#[serde(default)]
	pub year: Option<i32>,
	/// Manufacturer (for example `Ford`).
	#[serde(default)]
	pub make: Option<String>,
	/// Model (for example `Escape`).
	#[serde(default)]
	pub model: Option<String>,
	/// Vehicle identification number.
	#[serde(default)]
	pub vin: Option<String>,
	/// License plate.
	#[serde(default)]
	pub license_plate: Option<String>,
	/// Remaining upstream fields, preserved verbatim.
	#[serde(flatten)]
	pub extra: JsonMap<String, Value>,
}
impl Vehicle {
	/// `"<year> <make> <model>"` with absent parts skipped.
	pub fn display_name(&self) -> Option<String> {
		let year = self.year.map(|year| year.to_string());

		join_display([year.as_deref(), self.make.as_deref(), self.model.as_deref()])
	}
}
impl RelatedEntity for Vehicle {
	const TARGET: &'static str = "vehicle";

	fn display(&self) -> Option<String> {
		self.display_name()
	}
}

/// Flattened vehicle row returned by the vehicle list and customer history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSummary {
	/// Vehicle identifier.
	pub vehicle_id: Option<i64>,
	/// Model year.
	pub year: Option<i32>,
	/// Manufacturer.
	pub make: Option<String>,
	/// Model.
	pub model: Option<String>,
	/// VIN, or `N/A`.
	pub vin: String,
	/// License plate, or `N/A`.
	pub license_plate: String,
}
impl VehicleSummary {
	const NOT_AVAILABLE: &'static str = "N/A";
}
impl From<Vehicle> for VehicleSummary {
	fn from(vehicle: Vehicle) -> Self {
		let or_na = |value: Option<String>| {
			value.filter(|v| !v.trim().is_empty()).unwrap_or_else(|| Self::NOT_AVAILABLE.into())
		};

		Self {
			vehicle_id: vehicle.id,
			year: vehicle.year,
			make: vehicle.make,
			model: vehicle.model,
			vin: or_na(vehicle.vin),
			license_plate: or_na(vehicle.license_plate),
		}
	}
}
