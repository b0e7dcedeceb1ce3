//! Upstream list envelope.

// self
use crate::_prelude::*;

/// `{ content: [...], pageable: {...} }` wrapper returned by every upstream list endpoint.
///
/// `content` is required: an envelope without it is an unexpected upstream shape rather than
/// an empty page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
	/// Records on this page, in upstream order.
	pub content: Vec<T>,
	/// Upstream paging cursor, forwarded untouched.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub pageable: Option<Value>,
}
