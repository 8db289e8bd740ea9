// self
use crate::{obs::CallOutcome, resource::Resource};

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_call_outcome(resource: Resource, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"partner_api_client_call_total",
			"resource" => resource.segment(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (resource, outcome);
	}
}
