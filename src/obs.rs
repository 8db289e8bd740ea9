//! Optional observability helpers for partner API calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `partner_api_client.call` with the
//!   `resource` and `verb` fields, plus one error event per classified failure carrying the
//!   endpoint identifier.
//! - Enable `metrics` to increment the `partner_api_client_call_total` counter for every
//!   attempt/success/failure, labeled by `resource` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

/// Outcomes recorded for every partner API call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// A call was started.
	Attempt,
	/// The call returned a 2xx response that decoded cleanly.
	Success,
	/// The call failed with a classified error.
	Failure,
}
impl CallOutcome {
	/// Stable label used in metrics.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Attempt => "attempt",
			Self::Success => "success",
			Self::Failure => "failure",
		}
	}
}
