// self
use crate::{
	_prelude::*,
	obs::{DispatchOp, RegistryEvent},
};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub(crate) type InstrumentedDispatch<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub(crate) type InstrumentedDispatch<F> = F;

/// A span builder used by the dispatch facade.
#[derive(Clone, Debug)]
pub(crate) struct DispatchSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl DispatchSpan {
	/// Creates a new span tagged with the provided operation + stage.
	pub(crate) fn new(op: DispatchOp, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("push_token_broker.dispatch", op = op.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (op, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub(crate) fn instrument<Fut>(&self, fut: Fut) -> InstrumentedDispatch<Fut>
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

/// Emits a tracing event for a registry event (when enabled).
///
/// Evictions and expirations are logged at debug level; lookups and creations at trace level.
pub fn trace_registry_event(event: RegistryEvent) {
	#[cfg(feature = "tracing")]
	{
		match event {
			RegistryEvent::Evicted | RegistryEvent::Expired =>
				tracing::debug!(event = event.as_str(), "registry dropped a credential"),
			RegistryEvent::Hit | RegistryEvent::Miss | RegistryEvent::Created =>
				tracing::trace!(event = event.as_str(), "registry lookup"),
		}
	}

	#[cfg(not(feature = "tracing"))]
	{
		let _ = event;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = DispatchSpan::new(DispatchOp::Push, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}

	#[test]
	fn trace_registry_event_is_infallible() {
		trace_registry_event(RegistryEvent::Expired);
		trace_registry_event(RegistryEvent::Hit);
	}
}
