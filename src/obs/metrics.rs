// self
use crate::obs::{FlowKind, FlowOutcome};

/// Counter incremented once per attempt, success, or failure of an auth API operation.
pub const FLOW_COUNTER: &str = "sso_exchange_flow_total";

/// Returns the `flow` and `outcome` labels attached to [`FLOW_COUNTER`].
pub fn flow_labels(kind: FlowKind, outcome: FlowOutcome) -> [(&'static str, &'static str); 2] {
	[("flow", kind.as_str()), ("outcome", outcome.as_str())]
}

/// Records a flow outcome via the global metrics recorder (when enabled).
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		let [(flow_key, flow), (outcome_key, outcome)] = flow_labels(kind, outcome);

		metrics::counter!(FLOW_COUNTER, flow_key => flow, outcome_key => outcome).increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}
