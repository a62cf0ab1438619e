//! Optional observability helpers for auth flows.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `sso_exchange.flow` with the `flow` and
//!   `stage` (call site) fields, plus debug events for dispatch and outcome.
//! - Enable `metrics` to increment the `sso_exchange_flow_total` counter for every
//!   attempt/success/failure, labeled by `flow` + `outcome`.

mod metrics;
mod tracing;

pub use self::{metrics::*, tracing::*};

// self
use crate::_prelude::*;

/// Auth API operations observed by the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Sign-in URL issuance (`/authenticate_url`).
	AuthenticationUrl,
	/// Provisional-to-service token exchange (`/token`).
	TokenExchange,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::AuthenticationUrl => "authentication_url",
			FlowKind::TokenExchange => "token_exchange",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a service operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure reported to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Records the final outcome of `result` and returns it unchanged.
pub(crate) fn finish<T>(kind: FlowKind, result: Result<T>) -> Result<T> {
	match &result {
		Ok(_) => {
			record_flow_outcome(kind, FlowOutcome::Success);
			trace_outcome(kind, FlowOutcome::Success, None);
		},
		Err(e) => {
			record_flow_outcome(kind, FlowOutcome::Failure);
			trace_outcome(kind, FlowOutcome::Failure, Some(e));
		},
	}

	result
}
