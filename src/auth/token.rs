//! Provisional and service token types plus the redacting secret wrapper they share.

pub mod provisional;
pub mod secret;
pub mod service;

// self
use crate::_prelude::*;

// `Duration::seconds_f64` panics once the value leaves the `i64` seconds range.
const MAX_EXPIRES_IN_SECS: f64 = 9.0e18;

/// Converts a seconds value into a [`Duration`], rejecting values that cannot be represented.
pub(crate) fn expires_in_from_secs(secs: f64) -> Option<Duration> {
	if !secs.is_finite() || secs.abs() >= MAX_EXPIRES_IN_SECS {
		return None;
	}

	Some(Duration::seconds_f64(secs))
}
