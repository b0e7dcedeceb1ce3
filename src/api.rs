//! Inbound HTTP surface.
//!
//! [`router`] mounts one route per gateway operation on an axum [`Router`] whose state is the
//! shared [`Gateway`]. Handlers stay thin: extract, call the gateway, wrap the result. Failures
//! render through the [`IntoResponse`](axum::response::IntoResponse) impl in `error`.

mod error;
mod handlers;
mod query;

pub use query::*;

// crates.io
use axum::{
	Router,
	routing::{get, patch, post, put},
};
use tower_http::trace::TraceLayer;
// self
use crate::{_prelude::*, gateway::Gateway};

/// Shared handler state.
pub type AppState = Arc<Gateway>;

/// Builds the gateway router.
pub fn router(gateway: AppState) -> Router {
	Router::new()
		.route("/health", get(handlers::health))
		.route("/healthz", get(handlers::health))
		.route("/shops", get(handlers::list_shops))
		.route("/shops/:id", get(handlers::get_shop))
		.route("/shops/:id/scope", axum::routing::delete(handlers::remove_shop_scope))
		.route("/customers", get(handlers::search_customers).post(handlers::create_customer))
		.route(
			"/customers/:id",
			get(handlers::get_customer)
				.patch(handlers::update_customer)
				.delete(handlers::delete_customer),
		)
		.route("/customers/:id/history", get(handlers::customer_history))
		.route("/vehicles", get(handlers::list_vehicles).post(handlers::create_vehicle))
		.route(
			"/vehicles/:id",
			get(handlers::get_vehicle).patch(handlers::update_vehicle).delete(handlers::delete_vehicle),
		)
		.route("/repair-orders", post(handlers::create_repair_order))
		.route("/repair-orders/open", get(handlers::open_repair_orders))
		.route(
			"/repair-orders/:id",
			get(handlers::get_repair_order)
				.patch(handlers::update_repair_order)
				.delete(handlers::delete_repair_order),
		)
		.route("/repair-orders/:id/canned-jobs", post(handlers::add_canned_jobs))
		.route("/jobs", get(handlers::list_jobs))
		.route(
			"/jobs/:id",
			get(handlers::get_job).patch(handlers::update_job).delete(handlers::delete_job),
		)
		.route("/jobs/:id/job-clock", put(handlers::update_job_clock))
		.route("/employees", get(handlers::list_employees))
		.route("/employees/:id", get(handlers::get_employee))
		.route("/appointments", get(handlers::list_appointments).post(handlers::create_appointment))
		.route(
			"/appointments/:id",
			get(handlers::get_appointment)
				.patch(handlers::update_appointment)
				.delete(handlers::delete_appointment),
		)
		.route("/inventory", get(handlers::list_inventory))
		.route("/inspections", get(handlers::list_inspections))
		.route("/inspections/:id", get(handlers::get_inspection))
		.route("/labor/:id", patch(handlers::update_labor))
		.route("/canned-jobs", get(handlers::list_canned_jobs))
		.layer(TraceLayer::new_for_http())
		.with_state(gateway)
}
