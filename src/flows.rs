//! The SSO flow controller and the listener it reports callback outcomes to.

pub mod authentication_url;
pub mod callback;

// self
use crate::{_prelude::*, auth::ServiceToken, config::AuthConfig, http::AuthHttpClient};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Service specialized for the crate's default reqwest transport.
pub type ReqwestAuthService = AuthService<ReqwestHttpClient>;

/// Receives the notifications produced by [`AuthService::process_callback`].
///
/// Each `process_callback` call produces exactly one terminal notification, [`resolved`] or
/// [`failed`]. When the callback parses, [`received_callback`] fires first, before the token
/// exchange starts; use it to dismiss the external browser or show progress.
///
/// # Threading
///
/// Methods run synchronously on whichever executor thread is polling the `process_callback`
/// future. They must not block; hand work off to your UI thread or a channel as needed.
///
/// [`resolved`]: AuthListener::resolved
/// [`failed`]: AuthListener::failed
/// [`received_callback`]: AuthListener::received_callback
pub trait AuthListener
where
	Self: Send + Sync,
{
	/// The callback URL parsed; the token exchange is about to start.
	fn received_callback(&self) {}

	/// The auth API issued a service token.
	fn resolved(&self, token: ServiceToken);

	/// The flow failed. See [`Error`] for the possible causes.
	fn failed(&self, error: Error);
}

/// Drives the SSO sign-in flow against one auth API deployment.
///
/// The service holds only read-only configuration, so one instance can serve any number of
/// concurrent calls. The listener is held weakly: once the caller drops it, notifications are
/// skipped.
pub struct AuthService<C>
where
	C: ?Sized + AuthHttpClient,
{
	/// HTTP client used for every auth API request.
	pub http_client: Arc<C>,
	/// Endpoints and API key.
	pub config: AuthConfig,
	listener: Option<Weak<dyn AuthListener>>,
}
impl<C> AuthService<C>
where
	C: ?Sized + AuthHttpClient,
{
	/// Creates a service that reuses the caller-provided transport.
	pub fn with_http_client(config: AuthConfig, http_client: impl Into<Arc<C>>) -> Self {
		Self { http_client: http_client.into(), config, listener: None }
	}

	/// Registers the listener for [`AuthService::process_callback`] notifications.
	///
	/// Only a weak reference is kept; the caller owns the listener's lifetime.
	pub fn with_listener<L>(mut self, listener: &Arc<L>) -> Self
	where
		L: 'static + AuthListener,
	{
		let listener: Weak<dyn AuthListener> = Arc::<L>::downgrade(listener);

		self.listener = Some(listener);

		self
	}

	/// Returns true while a listener is registered and still alive.
	pub fn has_listener(&self) -> bool {
		self.listener.as_ref().is_some_and(|listener| listener.strong_count() > 0)
	}

	fn notify(&self, f: impl FnOnce(&dyn AuthListener)) {
		if let Some(listener) = self.listener.as_ref().and_then(Weak::upgrade) {
			f(listener.as_ref());
		}
	}
}
#[cfg(feature = "reqwest")]
impl AuthService<ReqwestHttpClient> {
	/// Creates a service with its own reqwest transport (redirects disabled).
	pub fn new(config: AuthConfig) -> Result<Self> {
		Ok(Self::with_http_client(config, ReqwestHttpClient::new()?))
	}
}
impl<C> Clone for AuthService<C>
where
	C: ?Sized + AuthHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: Arc::clone(&self.http_client),
			config: self.config.clone(),
			listener: self.listener.clone(),
		}
	}
}
impl<C> Debug for AuthService<C>
where
	C: ?Sized + AuthHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthService")
			.field("config", &self.config)
			.field("listener_set", &self.has_listener())
			.finish()
	}
}
