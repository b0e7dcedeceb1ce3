//! Concurrent foreign-key hydration.
//!
//! A [`Hydrator`] resolves foreign keys on a page of records into display strings by issuing
//! one upstream lookup per `(record, key)` pair. Every lookup of the page runs concurrently and
//! each record assembles once its own lookups settle. A lookup that fails for any reason
//! (non-2xx, timeout, transport error, malformed body, empty projection) becomes a
//! [`HydrationMiss`]: it is logged and counted, and the field falls back to the lookup's default.
//! Hydration never fails the request and never reorders or de-duplicates records.

// crates.io
use futures::future;
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	error::JsonPathError,
	http::{self, UpstreamClient, UpstreamRequest},
	model::Page,
	obs::{self, CallKind, CallOutcome, CallSpan},
	resource::Resource,
};

type Projection = fn(&[u8]) -> Result<Option<String>, JsonPathError>;

/// Upstream entity that can be rendered as a single display string.
pub trait RelatedEntity: DeserializeOwned {
	/// Entity name reported in logs when a lookup for it degrades.
	const TARGET: &'static str;

	/// Display string for this entity, or `None` when every contributing field is empty.
	fn display(&self) -> Option<String>;
}

/// One foreign key to resolve on every record of type `P`.
pub struct ForeignKeySpec<P> {
	/// Output field the display string is stored under.
	pub field: &'static str,
	/// Entity kind the key points at.
	pub resource: Resource,
	/// Value used when the key is absent or the lookup misses.
	pub default: &'static str,
	target: &'static str,
	key: fn(&P) -> Option<i64>,
	project: Projection,
}
impl<P> ForeignKeySpec<P> {
	/// Describes a key read by `key` that resolves to `R` under `resource`.
	pub fn new<R>(
		field: &'static str,
		resource: Resource,
		key: fn(&P) -> Option<i64>,
		default: &'static str,
	) -> Self
	where
		R: RelatedEntity,
	{
		Self { field, resource, default, target: R::TARGET, key, project: project::<R> }
	}

	/// Foreign key value on `record`, if any.
	pub fn key_of(&self, record: &P) -> Option<i64> {
		(self.key)(record)
	}
}
impl<P> Debug for ForeignKeySpec<P> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ForeignKeySpec")
			.field("field", &self.field)
			.field("resource", &self.resource)
			.field("default", &self.default)
			.field("target", &self.target)
			.finish()
	}
}

fn project<R>(body: &[u8]) -> Result<Option<String>, JsonPathError>
where
	R: RelatedEntity,
{
	Ok(http::decode_json::<R>(body)?.display())
}

/// Why a single lookup fell back to its default.
#[derive(Debug, ThisError)]
pub enum HydrationMiss {
	/// The lookup never produced a response (timeout, network, URL).
	#[error("Lookup request failed: {0}.")]
	Request(#[source] Error),
	/// Upstream answered with a non-2xx status.
	#[error("Lookup returned HTTP {status}.")]
	Status {
		/// Upstream HTTP status code.
		status: u16,
	},
	/// The body did not match the expected entity shape.
	#[error("Lookup returned a malformed body.")]
	Decode(#[source] JsonPathError),
	/// The entity decoded but every display field was empty.
	#[error("Lookup resolved to an empty display value.")]
	Empty,
}

/// Record paired with the display strings resolved for it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HydratedRecord<P> {
	/// The original record, unchanged.
	#[serde(flatten)]
	pub record: P,
	/// Display string per [`ForeignKeySpec::field`].
	#[serde(flatten)]
	pub display: BTreeMap<&'static str, String>,
}

/// Resolves foreign keys for one request using an already-acquired bearer token.
#[derive(Clone, Copy, Debug)]
pub struct Hydrator<'a> {
	upstream: &'a UpstreamClient,
	token: &'a TokenSecret,
}
impl<'a> Hydrator<'a> {
	/// Creates a hydrator that issues lookups through `upstream` with `token`.
	pub fn new(upstream: &'a UpstreamClient, token: &'a TokenSecret) -> Self {
		Self { upstream, token }
	}

	/// Hydrates every record against every lookup, preserving input order.
	pub async fn hydrate<P>(
		&self,
		records: Vec<P>,
		lookups: &[ForeignKeySpec<P>],
	) -> Vec<HydratedRecord<P>> {
		let span = CallSpan::new(CallKind::Hydration, "hydrate");

		span.instrument(future::join_all(
			records.into_iter().map(|record| self.hydrate_record(record, lookups)),
		))
		.await
	}

	async fn hydrate_record<P>(&self, record: P, lookups: &[ForeignKeySpec<P>]) -> HydratedRecord<P> {
		let resolved =
			future::join_all(lookups.iter().map(|spec| self.resolve(&record, spec))).await;
		let display = lookups.iter().map(|spec| spec.field).zip(resolved).collect();

		HydratedRecord { record, display }
	}

	async fn resolve<P>(&self, record: &P, spec: &ForeignKeySpec<P>) -> String {
		let Some(id) = spec.key_of(record) else {
			return spec.default.to_owned();
		};

		match self.lookup(spec, id).await {
			Ok(display) => display,
			Err(miss) => {
				tracing::warn!(
					field = spec.field,
					target = spec.target,
					resource = spec.resource.path(),
					id,
					reason = %miss,
					"Hydration lookup degraded to default."
				);
				obs::record_call_outcome(CallKind::Hydration, CallOutcome::Degraded);

				spec.default.to_owned()
			},
		}
	}

	/// Fetches `spec.resource/<id>` and projects it into a display string.
	pub async fn lookup<P>(&self, spec: &ForeignKeySpec<P>, id: i64) -> Result<String, HydrationMiss> {
		let request = UpstreamRequest::get(spec.resource.entity_path(id));
		let response =
			self.upstream.send(request, self.token).await.map_err(HydrationMiss::Request)?;

		if !response.is_success() {
			return Err(HydrationMiss::Status { status: response.status.as_u16() });
		}

		let display = (spec.project)(&response.body)
			.map_err(HydrationMiss::Decode)?
			.ok_or(HydrationMiss::Empty)?;

		obs::record_call_outcome(CallKind::Hydration, CallOutcome::Success);

		Ok(display)
	}

	/// Fetches a nested list, returning its `content` or a miss.
	pub async fn list<T>(&self, request: UpstreamRequest) -> Result<Vec<T>, HydrationMiss>
	where
		T: DeserializeOwned,
	{
		let response =
			self.upstream.send(request, self.token).await.map_err(HydrationMiss::Request)?;

		if !response.is_success() {
			return Err(HydrationMiss::Status { status: response.status.as_u16() });
		}

		Ok(http::decode_json::<Page<T>>(&response.body).map_err(HydrationMiss::Decode)?.content)
	}

	/// Like [`Self::list`], but degrades a miss to an empty list.
	pub async fn list_or_empty<T>(&self, request: UpstreamRequest) -> Vec<T>
	where
		T: DeserializeOwned,
	{
		let path = request.path.clone();

		match self.list(request).await {
			Ok(items) => items,
			Err(miss) => {
				tracing::warn!(path = %path, reason = %miss, "Nested list lookup degraded to empty.");
				obs::record_call_outcome(CallKind::Hydration, CallOutcome::Degraded);

				Vec::new()
			},
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::model::{Customer, Vehicle};

	struct Row {
		vehicle_id: Option<i64>,
	}

	#[test]
	fn projections_decode_related_entities() {
		let spec = ForeignKeySpec::<Row>::new::<Vehicle>(
			"vehicle",
			Resource::Vehicle,
			|row| row.vehicle_id,
			"Unknown",
		);

		assert_eq!(
			(spec.project)(br#"{"year":2019,"make":"Honda","model":"Civic"}"#)
				.expect("Vehicle body should decode."),
			Some("2019 Honda Civic".to_owned())
		);
		assert_eq!(spec.key_of(&Row { vehicle_id: None }), None);
		assert_eq!(spec.key_of(&Row { vehicle_id: Some(0) }), Some(0));
		assert_eq!(spec.target, Vehicle::TARGET);
		assert!(format!("{spec:?}").contains("target: \"vehicle\""));
	}

	#[test]
	fn empty_projection_is_none() {
		assert_eq!(project::<Customer>(br#"{"firstName":"  ","lastName":null}"#).ok(), Some(None));
		assert!(project::<Customer>(b"not json").is_err());
	}

	#[test]
	fn hydrated_record_flattens_display_fields() {
		let mut display = BTreeMap::new();

		display.insert("vehicle", "Unknown".to_owned());

		let json = serde_json::to_value(HydratedRecord { record: serde_json::json!({ "id": 1 }), display })
			.expect("Hydrated record should serialize.");

		assert_eq!(json, serde_json::json!({ "id": 1, "vehicle": "Unknown" }));
	}
}
