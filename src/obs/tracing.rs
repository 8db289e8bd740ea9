// self
use crate::{_prelude::*, resource::Endpoint};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// A span builder wrapped around every partner API call.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the call's endpoint.
	pub fn new(endpoint: &Endpoint) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"partner_api_client.call",
				verb = endpoint.verb,
				path = endpoint.path.as_str(),
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = endpoint;

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Reports a classified call failure with its endpoint identifier (when tracing is enabled).
///
/// Every error surfaced by the client passes through here exactly once before being returned,
/// so failures are never silently swallowed and never double-reported.
pub fn report_call_failure(endpoint: &Endpoint, error: &Error) {
	#[cfg(feature = "tracing")]
	{
		tracing::error!(endpoint = %endpoint, error = %error, "Partner API call failed.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (endpoint, error);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::resource::Resource;

	#[test]
	fn call_span_noop_without_tracing() {
		let span = CallSpan::new(&Endpoint::list(Resource::Order));
		// Compile-time smoke test ensures the span builder exists even when tracing is disabled.
		let _ = format!("{span:?}");
	}

	#[cfg(feature = "tracing")]
	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = CallSpan::new(&Endpoint::create(Resource::Order));
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
