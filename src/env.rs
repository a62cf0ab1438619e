//! Deployment environments and the auth API base URL each one resolves to.

// self
use crate::_prelude::*;

/// Environment whose auth API the service talks to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
	/// Staging environment.
	Staging,
	/// Development environment.
	Dev,
	/// Production environment.
	#[default]
	Production,
	/// Quality assurance environment.
	Qa,
	/// Locally running auth API.
	Local,
}
impl Environment {
	/// Every environment, in declaration order.
	pub const ALL: [Environment; 5] = [
		Environment::Staging,
		Environment::Dev,
		Environment::Production,
		Environment::Qa,
		Environment::Local,
	];

	/// Returns the lowercase environment name.
	pub const fn as_str(self) -> &'static str {
		match self {
			Environment::Staging => "staging",
			Environment::Dev => "dev",
			Environment::Production => "production",
			Environment::Qa => "qa",
			Environment::Local => "local",
		}
	}

	/// Returns the auth API base URL for the environment.
	pub const fn base_url_str(self) -> &'static str {
		match self {
			Environment::Staging => "https://uptake-prod-staging.apigee.net/cat/auth/v1",
			Environment::Dev => "http://auth.services.symphony.dev.uptake.com/v1",
			Environment::Production => "https://uptake-prod-production.apigee.net/cat/auth/v1",
			Environment::Qa => "https://auth.services.qa2.qa.uptake.com/v1",
			Environment::Local => "http://localhost:10175",
		}
	}

	/// Parses [`Environment::base_url_str`].
	pub fn base_url(self) -> Result<Url, url::ParseError> {
		Url::parse(self.base_url_str())
	}
}
impl Display for Environment {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Environment {
	type Err = EnvironmentParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|env| env.as_str().eq_ignore_ascii_case(s))
			.ok_or_else(|| EnvironmentParseError { value: s.to_owned() })
	}
}

/// Raised when a string does not name a known [`Environment`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown environment `{value}`.")]
pub struct EnvironmentParseError {
	/// Rejected input.
	pub value: String,
}
