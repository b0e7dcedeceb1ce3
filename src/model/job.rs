//! Job-specific request bodies.

// self
use crate::_prelude::*;

/// Body of `PUT jobs/<id>/job-clock`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobClock {
	/// Employee logging the time.
	pub technician_id: i64,
	/// Hours logged against the job by that employee.
	pub logged_hours: f64,
}

/// Body of `POST repair-orders/<id>/canned-jobs` as the gateway receives it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CannedJobIds {
	/// Canned job identifiers to add; sent upstream as a bare array.
	pub job_ids: Vec<i64>,
}
