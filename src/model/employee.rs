//! Employee records; technicians resolve through these.

// self
use crate::{_prelude::*, hydrate::RelatedEntity, model::join_display};

/// Upstream employee; technicians and service writers are both employees.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
	/// Employee identifier.
	#[serde(default)]
	pub id: Option<i64>,
	/// Given name.
	#[serde(default)]
	pub first_name: Option<String>,
	/// Family name.
	#[serde(default)]
	pub last_name: Option<String>,
	/// Remaining upstream fields, preserved verbatim.
	#[serde(flatten)]
	pub extra: JsonMap<String, Value>,
}
impl RelatedEntity for Employee {
	const TARGET: &'static str = "employee";

	fn display(&self) -> Option<String> {
		join_display([self.first_name.as_deref(), self.last_name.as_deref()])
	}
}
