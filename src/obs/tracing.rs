// self
use crate::{
	_prelude::*,
	obs::{FlowKind, FlowOutcome},
};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// A span builder used by auth flows.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Creates a new span tagged with the provided flow kind + stage.
	pub fn new(kind: FlowKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("sso_exchange.flow", flow = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
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

/// Emits a debug event for a request about to be dispatched. Never pass secrets as `target`.
pub(crate) fn trace_dispatch(kind: FlowKind, target: &Url) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(flow = kind.as_str(), url = %target, "dispatching auth API request");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, target);
	}
}

/// Emits a debug event describing how a flow ended.
pub(crate) fn trace_outcome(kind: FlowKind, outcome: FlowOutcome, error: Option<&Error>) {
	#[cfg(feature = "tracing")]
	{
		match error {
			Some(e) => tracing::debug!(
				flow = kind.as_str(),
				outcome = outcome.as_str(),
				error = %e,
				"auth flow failed"
			),
			None => tracing::debug!(
				flow = kind.as_str(),
				outcome = outcome.as_str(),
				"auth flow finished"
			),
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, outcome, error);
	}
}
