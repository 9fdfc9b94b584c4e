// self
use crate::obs::{DispatchOp, DispatchOutcome, RegistryEvent};

/// Records a dispatch outcome via the global metrics recorder (when enabled).
pub fn record_dispatch_outcome(op: DispatchOp, outcome: DispatchOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"push_token_broker_dispatch_total",
			"op" => op.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (op, outcome);
	}
}

/// Records a registry event via the global metrics recorder and tracing subscriber (when
/// enabled).
pub fn record_registry_event(event: RegistryEvent) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("push_token_broker_registry_total", "event" => event.as_str())
			.increment(1);
	}

	crate::obs::trace_registry_event(event);
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recorders_are_noops_without_installed_backends() {
		record_dispatch_outcome(DispatchOp::Push, DispatchOutcome::Failure);
		record_registry_event(RegistryEvent::Evicted);
	}
}
