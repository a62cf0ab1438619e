//! Fixed configuration for [`AuthService`](crate::flows::AuthService): where the auth API lives and
//! which API key to send.

// crates.io
use oauth2::http::HeaderValue;
// self
use crate::{_prelude::*, env::Environment, error::ConfigError};

const AUTHENTICATE_URL_PATH: &str = "authenticate_url";
const TOKEN_PATH: &str = "token";

/// Validated, immutable service configuration.
///
/// Endpoint URLs are derived from the base URL once, when the configuration is built.
#[derive(Clone)]
pub struct AuthConfig {
	/// Environment the configuration was built for.
	pub environment: Environment,
	/// Auth API base URL (the environment's default unless overridden).
	pub base_url: Url,
	api_key: HeaderValue,
	authenticate_url_endpoint: Url,
	token_endpoint: Url,
}
impl AuthConfig {
	/// Starts a builder for the given environment.
	pub fn builder(environment: Environment) -> AuthConfigBuilder {
		AuthConfigBuilder::new(environment)
	}

	/// Shortcut for `AuthConfig::builder(environment).api_key(api_key).build()`.
	pub fn new(environment: Environment, api_key: impl Into<String>) -> Result<Self, ConfigError> {
		Self::builder(environment).api_key(api_key).build()
	}

	/// Value sent as the `X-Api-Key` header.
	pub fn api_key(&self) -> &HeaderValue {
		&self.api_key
	}

	/// `GET` endpoint returning the provider sign-in URL.
	pub fn authenticate_url_endpoint(&self) -> &Url {
		&self.authenticate_url_endpoint
	}

	/// `GET` endpoint exchanging a provisional token for a service token.
	pub fn token_endpoint(&self) -> &Url {
		&self.token_endpoint
	}
}
impl Debug for AuthConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthConfig")
			.field("environment", &self.environment)
			.field("base_url", &self.base_url.as_str())
			.field("api_key_set", &!self.api_key.is_empty())
			.finish()
	}
}

/// Builder for [`AuthConfig`] values.
#[derive(Debug)]
pub struct AuthConfigBuilder {
	/// Environment whose base URL is used unless [`AuthConfigBuilder::base_url`] overrides it.
	pub environment: Environment,
	/// Optional base URL override.
	pub base_url: Option<Url>,
	/// API key sent as `X-Api-Key`; empty by default.
	pub api_key: String,
}
impl AuthConfigBuilder {
	/// Creates a new builder seeded with the provided environment.
	pub fn new(environment: Environment) -> Self {
		Self { environment, base_url: None, api_key: String::new() }
	}

	/// Sets the API key.
	pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
		self.api_key = api_key.into();

		self
	}

	/// Overrides the environment's base URL (private deployments, mock servers).
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<AuthConfig, ConfigError> {
		let base_url = match self.base_url {
			Some(url) => url,
			None => self
				.environment
				.base_url()
				.map_err(|source| ConfigError::InvalidBaseUrl { source })?,
		};

		validate_base_url(&base_url)?;

		let api_key =
			HeaderValue::from_str(&self.api_key).map_err(|_| ConfigError::InvalidApiKey)?;
		let authenticate_url_endpoint = endpoint(&base_url, AUTHENTICATE_URL_PATH)?;
		let token_endpoint = endpoint(&base_url, TOKEN_PATH)?;

		Ok(AuthConfig {
			environment: self.environment,
			base_url,
			api_key,
			authenticate_url_endpoint,
			token_endpoint,
		})
	}
}

fn validate_base_url(url: &Url) -> Result<(), ConfigError> {
	if !matches!(url.scheme(), "http" | "https") {
		return Err(ConfigError::UnsupportedScheme { url: url.to_string() });
	}
	if url.cannot_be_a_base() {
		return Err(ConfigError::CannotBeABase { url: url.to_string() });
	}

	Ok(())
}

// Appends a path segment so a base like `.../cat/auth/v1` keeps its prefix.
fn endpoint(base: &Url, segment: &str) -> Result<Url, ConfigError> {
	let mut url = base.clone();

	url.set_query(None);
	url.set_fragment(None);
	url.path_segments_mut()
		.map_err(|_| ConfigError::CannotBeABase { url: base.to_string() })?
		.pop_if_empty()
		.push(segment);

	Ok(url)
}
