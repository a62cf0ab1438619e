//! Client-side SSO sign-in for the auth API: fetch a provider's sign-in URL, parse the identity
//! provider's callback, and trade the provisional token it carries for a service token.
//!
//! The flow is driven by [`flows::AuthService`]:
//!
//! 1. [`AuthService::authentication_url`](flows::AuthService::authentication_url) asks the auth
//!    API where to send the user for a given [`provider::Provider`].
//! 2. Once the provider redirects back, [`AuthService::process_callback`](flows::AuthService::process_callback)
//!    parses the redirect into an [`auth::ProvisionalToken`], exchanges it at `/token`, and reports
//!    the outcome through an [`flows::AuthListener`].

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod env;
pub mod error;
pub mod flows;
pub mod http;
pub mod obs;
pub mod provider;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// crates.io
	use parking_lot::Mutex;
	// self
	use crate::{
		auth::ServiceToken,
		config::AuthConfig,
		env::Environment,
		flows::{AuthListener, AuthService},
		http::ReqwestHttpClient,
	};

	/// Service type alias used by reqwest-backed integration tests.
	pub type ReqwestTestService = AuthService<ReqwestHttpClient>;

	/// Single notification captured by [`RecordingListener`].
	#[derive(Debug)]
	pub enum Notification {
		/// `received_callback` fired.
		ReceivedCallback,
		/// `resolved` fired with the given token.
		Resolved(ServiceToken),
		/// `failed` fired with the given error.
		Failed(Error),
	}

	/// Listener that records every notification in arrival order.
	#[derive(Debug, Default)]
	pub struct RecordingListener {
		events: Mutex<Vec<Notification>>,
	}
	impl RecordingListener {
		/// Drains and returns the recorded notifications.
		pub fn take(&self) -> Vec<Notification> {
			std::mem::take(&mut *self.events.lock())
		}

		fn push(&self, event: Notification) {
			self.events.lock().push(event);
		}
	}
	impl AuthListener for RecordingListener {
		fn received_callback(&self) {
			self.push(Notification::ReceivedCallback);
		}

		fn resolved(&self, token: ServiceToken) {
			self.push(Notification::Resolved(token));
		}

		fn failed(&self, error: Error) {
			self.push(Notification::Failed(error));
		}
	}

	/// Builds a reqwest HTTP client that accepts `httpmock`'s self-signed certificates and never
	/// follows redirects, so mocked 3xx statuses surface as `UnexpectedStatus`.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.redirect(reqwest::redirect::Policy::none())
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Builds a reqwest-backed [`AuthService`] pointed at `base_url` (usually an `httpmock`
	/// server) with a fresh [`RecordingListener`].
	pub fn build_reqwest_test_service(
		base_url: &str,
		api_key: &str,
	) -> (ReqwestTestService, Arc<RecordingListener>) {
		let base_url = Url::parse(base_url).expect("Failed to parse mock server base URL.");
		let config = AuthConfig::builder(Environment::Local)
			.api_key(api_key)
			.base_url(base_url)
			.build()
			.expect("Failed to build test auth configuration.");
		let listener = Arc::new(RecordingListener::default());
		let service = AuthService::with_http_client(config, test_reqwest_http_client())
			.with_listener(&listener);

		(service, listener)
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::{Arc, Weak},
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::Duration;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use oauth2;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
#[cfg(all(feature = "test", not(feature = "reqwest")))] use parking_lot as _;
