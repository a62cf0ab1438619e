//! Provisional tokens parsed from identity-provider callback URLs.
//!
//! Providers disagree on where they put the token parameters: some append a query string
//! (`.../callback?access_token=...`), others a fragment (`.../callback#access_token=...`). The
//! parser rewrites the first `callback#` into `callback?` so both shapes go through the same
//! query-parameter parsing.

// crates.io
use oauth2::http::HeaderValue;
// self
use crate::{
	_prelude::*,
	auth::token::{self, secret::TokenSecret},
};

const CALLBACK_FRAGMENT_MARKER: &str = "callback#";
const CALLBACK_QUERY_MARKER: &str = "callback?";

/// Token handed back by the identity provider, not yet validated by the auth API.
///
/// Built synchronously from a callback URL and consumed by
/// [`AuthService::exchange`](crate::flows::AuthService::exchange).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProvisionalToken {
	/// Provider-issued access token, sent verbatim as the `Authorization` header.
	pub access_token: TokenSecret,
	/// Lifetime advertised by the provider, when present and numeric.
	pub expires_in: Option<Duration>,
	/// Scope string echoed by the provider.
	pub scope: Option<String>,
}
impl ProvisionalToken {
	/// Creates a token with only the access token populated.
	pub fn new(access_token: impl Into<String>) -> Self {
		Self { access_token: TokenSecret::new(access_token), expires_in: None, scope: None }
	}

	/// Sets the advertised lifetime.
	pub fn with_expires_in(mut self, expires_in: Duration) -> Self {
		self.expires_in = Some(expires_in);

		self
	}

	/// Sets the scope string.
	pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = Some(scope.into());

		self
	}

	/// Parses a callback URL into a provisional token.
	///
	/// Fails with [`Error::InvalidCallbackPayload`] when the URL carries no query component or no
	/// non-empty `access_token`, or when the decoded token cannot travel in an `Authorization`
	/// header (control characters such as CR/LF). A non-numeric `expires_in` is dropped rather than
	/// rejected.
	pub fn from_callback_url(url: &Url) -> Result<Self> {
		Self::parse_callback(url.as_str())
	}

	/// String form of [`ProvisionalToken::from_callback_url`].
	pub fn parse_callback(raw: &str) -> Result<Self> {
		let normalized = raw.replacen(CALLBACK_FRAGMENT_MARKER, CALLBACK_QUERY_MARKER, 1);
		let url = Url::parse(&normalized).map_err(|_| Error::InvalidCallbackPayload)?;

		if url.query().is_none() {
			return Err(Error::InvalidCallbackPayload);
		}

		let mut access_token = None;
		let mut expires_in = None;
		let mut scope = None;

		for (key, value) in url.query_pairs() {
			match key.as_ref() {
				"access_token" if access_token.is_none() => access_token = Some(value.into_owned()),
				"expires_in" if expires_in.is_none() => expires_in = Some(value.into_owned()),
				"scope" if scope.is_none() => scope = Some(value.into_owned()),
				_ => {},
			}
		}

		let access_token = access_token
			.map(TokenSecret::new)
			.filter(|secret| !secret.is_empty() && HeaderValue::from_str(secret.expose()).is_ok())
			.ok_or(Error::InvalidCallbackPayload)?;
		let expires_in = expires_in
			.and_then(|value| value.parse::<f64>().ok())
			.and_then(token::expires_in_from_secs);

		Ok(Self { access_token, expires_in, scope })
	}
}
impl FromStr for ProvisionalToken {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse_callback(s)
	}
}
impl TryFrom<&Url> for ProvisionalToken {
	type Error = Error;

	fn try_from(url: &Url) -> Result<Self, Self::Error> {
		Self::from_callback_url(url)
	}
}
