//! Customer records and their display name.

// self
use crate::{_prelude::*, hydrate::RelatedEntity, model::join_display};

/// Upstream customer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
	/// Customer identifier.
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
impl Customer {
	/// `"<first> <last>"` with absent parts skipped.
	pub fn display_name(&self) -> Option<String> {
		join_display([self.first_name.as_deref(), self.last_name.as_deref()])
	}
}
impl RelatedEntity for Customer {
	const TARGET: &'static str = "customer";

	fn display(&self) -> Option<String> {
		self.display_name()
	}
}
