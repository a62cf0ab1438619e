//! Service tokens issued by the auth API's `/token` endpoint.

// crates.io
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	auth::token::{self, secret::TokenSecret},
	error::BodyError,
};

/// Access token issued by the auth API after validating a provisional token.
///
/// This crate never persists it; storing or discarding the value is up to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceToken {
	/// Service access token.
	pub access_token: TokenSecret,
	/// Lifetime reported by the auth API.
	pub expires_in: Option<Duration>,
	/// Token type reported by the auth API (typically `Bearer`).
	pub token_type: Option<String>,
}
impl ServiceToken {
	/// Creates a token with only the access token populated.
	pub fn new(access_token: impl Into<String>) -> Self {
		Self { access_token: TokenSecret::new(access_token), expires_in: None, token_type: None }
	}

	/// Sets the lifetime.
	pub fn with_expires_in(mut self, expires_in: Duration) -> Self {
		self.expires_in = Some(expires_in);

		self
	}

	/// Sets the token type.
	pub fn with_token_type(mut self, token_type: impl Into<String>) -> Self {
		self.token_type = Some(token_type.into());

		self
	}

	/// Validates a decoded `/token` response body.
	///
	/// The body must be a JSON object with a string `access_token`. `expires_in` (number of
	/// seconds) and `token_type` (string) are optional; values of any other type are ignored.
	pub fn from_json(body: &Value) -> Result<Self, BodyError> {
		if !body.is_object() {
			return Err(BodyError::NotAnObject);
		}

		let raw: RawServiceToken =
			serde_path_to_error::deserialize(body).map_err(BodyError::TokenMismatch)?;

		Ok(Self {
			access_token: raw.access_token,
			expires_in: raw
				.expires_in
				.as_ref()
				.and_then(Value::as_f64)
				.and_then(token::expires_in_from_secs),
			token_type: raw.token_type.as_ref().and_then(Value::as_str).map(ToOwned::to_owned),
		})
	}
}
impl TryFrom<&Value> for ServiceToken {
	type Error = BodyError;

	fn try_from(body: &Value) -> Result<Self, Self::Error> {
		Self::from_json(body)
	}
}

#[derive(Deserialize)]
struct RawServiceToken {
	access_token: TokenSecret,
	#[serde(default)]
	expires_in: Option<Value>,
	#[serde(default)]
	token_type: Option<Value>,
}
