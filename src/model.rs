//! Typed views of upstream entities and the reshaped payloads the gateway returns.
//!
//! Upstream entities keep the fields the gateway reads as explicit optional members and carry
//! everything else verbatim in a flattened `extra` map, so passthrough responses lose nothing.
//! A field that is present with the wrong JSON type is a decode error, distinct from an absent
//! field.

pub mod customer;
pub mod employee;
pub mod job;
pub mod page;
pub mod repair_order;
pub mod vehicle;

pub use customer::*;
pub use employee::*;
pub use job::*;
pub use page::*;
pub use repair_order::*;
pub use vehicle::*;

/// Joins the non-empty parts with single spaces, returning `None` when nothing remains.
pub(crate) fn join_display<'a, I>(parts: I) -> Option<String>
where
	I: IntoIterator<Item = Option<&'a str>>,
{
	let joined = parts
		.into_iter()
		.flatten()
		.map(str::trim)
		.filter(|part| !part.is_empty())
		.collect::<Vec<_>>()
		.join(" ");

	if joined.is_empty() { None } else { Some(joined) }
}
