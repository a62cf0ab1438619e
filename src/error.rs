//! Error types shared by the callback parser, the token model, and the auth flows.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error reported by [`AuthService`](crate::flows::AuthService) operations.
///
/// Every variant is terminal for the invocation that produced it; nothing is retried.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration or request-construction problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout) passed through from the HTTP client.
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Callback URL is unparseable or lacks an `access_token` parameter.
	#[error("The callback URL cannot be parsed.")]
	InvalidCallbackPayload,
	/// Auth API answered with a non-2xx status.
	#[error("Auth API responded with unexpected status {0}.")]
	UnexpectedStatus(u16),
	/// Auth API answered 2xx with a body of the wrong shape.
	///
	/// The wrapped [`BodyError`] keeps the precise cause for diagnostics; callers matching on the
	/// coarse kind can ignore it.
	#[error("Auth API responded with an unexpected body.")]
	UnexpectedBody(#[source] BodyError),
}
impl Error {
	/// Returns the HTTP status carried by [`Error::UnexpectedStatus`].
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::UnexpectedStatus(code) => Some(*code),
			_ => None,
		}
	}
}

/// Reasons a 2xx response body was rejected.
#[derive(Debug, ThisError)]
pub enum BodyError {
	/// `/authenticate_url` body was not a JSON string.
	#[error("Expected a JSON string.")]
	NotAString,
	/// `/authenticate_url` body was a string but not an absolute URL.
	#[error("Response string is not a valid URL.")]
	InvalidUrl(#[source] url::ParseError),
	/// `/token` body was not a JSON object.
	#[error("Expected a JSON object.")]
	NotAnObject,
	/// `/token` object did not match the service token shape.
	#[error("Token payload does not match the expected fields.")]
	TokenMismatch(#[source] serde_path_to_error::Error<serde_json::Error>),
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed (for example, an invalid header value).
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Base URL cannot be parsed.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL uses a scheme other than `http` or `https`.
	#[error("Base URL must use http or https: {url}.")]
	UnsupportedScheme {
		/// URL that failed validation.
		url: String,
	},
	/// Base URL cannot carry path segments (for example, `mailto:` style URLs).
	#[error("Base URL cannot be used as a base for API endpoints: {url}.")]
	CannotBeABase {
		/// URL that failed validation.
		url: String,
	},
	/// API key contains characters that are not allowed in an HTTP header.
	#[error("API key is not a valid header value.")]
	InvalidApiKey,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
///
/// The original transport error is kept as the `source`, so callers can downcast it, e.g. to
/// [`reqwest::Error`] to check `is_connect()`.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the auth API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the auth API.")]
	Io(#[from] std::io::Error),
	/// HTTP client reported a failure it could only describe as text.
	#[error("HTTP client error occurred while calling the auth API: {message}.")]
	Other {
		/// Message supplied by the HTTP client.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Returns the original transport error, if it is of type `E`.
	pub fn downcast_ref<E>(&self) -> Option<&E>
	where
		E: 'static + std::error::Error,
	{
		match self {
			Self::Network { source } => source.downcast_ref::<E>(),
			_ => None,
		}
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn status_is_exposed_only_for_unexpected_status() {
		assert_eq!(Error::UnexpectedStatus(503).status(), Some(503));
		assert_eq!(Error::InvalidCallbackPayload.status(), None);
		assert_eq!(Error::UnexpectedBody(BodyError::NotAnObject).status(), None);
	}

	#[test]
	fn unexpected_body_keeps_fine_cause_as_source() {
		let err = Error::UnexpectedBody(BodyError::NotAString);
		let source = err.source().expect("UnexpectedBody should expose its cause.");

		assert_eq!(source.to_string(), "Expected a JSON string.");
	}

	#[test]
	fn transport_network_error_downcasts_to_original() {
		let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
		let err = TransportError::network(io);
		let inner = err
			.downcast_ref::<std::io::Error>()
			.expect("Network errors should downcast to the wrapped type.");

		assert_eq!(inner.kind(), std::io::ErrorKind::ConnectionRefused);

		let other = TransportError::Other { message: "boom".into() };

		assert!(other.downcast_ref::<std::io::Error>().is_none());
	}
}
