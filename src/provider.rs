//! SSO providers the auth API can federate with.

// self
use crate::_prelude::*;

/// Identity providers supported by the auth API's `connection` parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
	/// CAT Corporate Web Security.
	#[serde(rename = "cws")]
	Cws,
	/// OneLogin.
	#[serde(rename = "onelogin")]
	OneLogin,
}
impl Provider {
	/// Every provider, in declaration order.
	pub const ALL: [Provider; 2] = [Provider::Cws, Provider::OneLogin];

	/// Returns the wire value sent as the `connection` query parameter.
	pub const fn as_str(self) -> &'static str {
		match self {
			Provider::Cws => "cws",
			Provider::OneLogin => "onelogin",
		}
	}
}
impl Display for Provider {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Provider {
	type Err = ProviderParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|provider| provider.as_str() == s)
			.ok_or_else(|| ProviderParseError { value: s.to_owned() })
	}
}

/// Raised when a string does not name a known [`Provider`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown SSO provider `{value}`.")]
pub struct ProviderParseError {
	/// Rejected input.
	pub value: String,
}
