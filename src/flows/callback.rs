//! Callback processing and the provisional-to-service token exchange (`GET {base}/token`).
//!
//! [`AuthService::process_callback`] walks one invocation through
//! `parse → received_callback → exchange → resolved | failed`, with exactly one terminal
//! notification. [`AuthService::exchange`] is the same exchange as a plain `Result` for callers
//! that drive the flow themselves.

// self
use crate::{
	_prelude::*,
	auth::{ProvisionalToken, ServiceToken},
	error::BodyError,
	flows::AuthService,
	http::{self, ApiResponse, AuthHttpClient},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

const KIND: FlowKind = FlowKind::TokenExchange;

impl<C> AuthService<C>
where
	C: ?Sized + AuthHttpClient,
{
	/// Parses a provider callback URL and exchanges its token, reporting through the listener.
	///
	/// Accepts anything string-like, including [`Url`]. On a parse failure the listener gets
	/// [`failed`](crate::flows::AuthListener::failed) with [`Error::InvalidCallbackPayload`] and no
	/// request is sent. Otherwise
	/// [`received_callback`](crate::flows::AuthListener::received_callback) fires, the token is
	/// exchanged, and the listener gets either `resolved` or `failed` with the same errors
	/// [`AuthService::exchange`] returns.
	///
	/// Dropping the returned future cancels the exchange; no notification follows a drop.
	pub async fn process_callback(&self, url: impl AsRef<str>) {
		let span = FlowSpan::new(KIND, "process_callback");
		let parsed = ProvisionalToken::parse_callback(url.as_ref());

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);
		span.instrument(async move {
			let result = match parsed {
				Ok(token) => {
					self.notify(|listener| listener.received_callback());
					self.request_service_token(&token).await
				},
				Err(e) => Err(e),
			};

			match obs::finish(KIND, result) {
				Ok(service_token) => self.notify(|listener| listener.resolved(service_token)),
				Err(e) => self.notify(|listener| listener.failed(e)),
			}
		})
		.await
	}

	/// Exchanges a provisional token for a service token.
	///
	/// Sends `Authorization: {access_token}` (verbatim) and `X-Api-Key` to `{base}/token`.
	///
	/// # Errors
	///
	/// - [`Error::UnexpectedStatus`] for a non-2xx response.
	/// - [`Error::UnexpectedBody`] when the body is not a JSON object or lacks a string
	///   `access_token`.
	/// - [`Error::Transport`] when the request never got a response.
	/// - [`Error::Config`] when the token cannot be sent as a header value.
	pub async fn exchange(&self, token: &ProvisionalToken) -> Result<ServiceToken> {
		let span = FlowSpan::new(KIND, "exchange");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span.instrument(self.request_service_token(token)).await;

		obs::finish(KIND, result)
	}

	async fn request_service_token(&self, token: &ProvisionalToken) -> Result<ServiceToken> {
		let endpoint = self.config.token_endpoint();

		obs::trace_dispatch(KIND, endpoint);

		let request =
			http::get_request(endpoint, self.config.api_key(), Some(token.access_token.expose()))?;
		let response = http::send(self.http_client.as_ref(), request).await?;

		service_token(response)
	}
}

fn service_token(response: ApiResponse) -> Result<ServiceToken> {
	if !response.is_success() {
		return Err(Error::UnexpectedStatus(response.status));
	}

	let body = response.body.ok_or(Error::UnexpectedBody(BodyError::NotAnObject))?;

	ServiceToken::from_json(&body).map_err(Error::UnexpectedBody)
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicUsize, Ordering};
	// crates.io
	use oauth2::{
		AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse,
		http::{Response, StatusCode},
	};
	use parking_lot::Mutex;
	use serde_json::json;
	// self
	use super::*;
	use crate::{config::AuthConfig, env::Environment, flows::AuthListener};

	#[derive(Debug, ThisError)]
	#[error("Fake transport cannot connect.")]
	struct CannotConnect;

	/// Serves one canned `/token` response and counts requests.
	#[derive(Clone)]
	struct CannedClient {
		status: u16,
		body: &'static str,
		calls: Arc<AtomicUsize>,
	}
	impl CannedClient {
		fn new(status: u16, body: &'static str) -> Self {
			Self { status, body, calls: Arc::default() }
		}
	}
	impl AuthHttpClient for CannedClient {
		type Handle = CannedClient;
		type TransportError = CannotConnect;

		fn handle(&self) -> Self::Handle {
			self.clone()
		}
	}
	impl<'c> AsyncHttpClient<'c> for CannedClient {
		type Error = HttpClientError<CannotConnect>;
		type Future =
			Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

		fn call(&'c self, _request: HttpRequest) -> Self::Future {
			self.calls.fetch_add(1, Ordering::SeqCst);

			let status = self.status;
			let body = self.body;

			Box::pin(async move {
				let mut response = Response::new(body.as_bytes().to_vec());

				*response.status_mut() =
					StatusCode::from_u16(status).expect("Canned status should be valid.");

				Ok(response)
			})
		}
	}

	#[derive(Default)]
	struct Events(Mutex<Vec<&'static str>>);
	impl AuthListener for Events {
		fn received_callback(&self) {
			self.0.lock().push("received");
		}

		fn resolved(&self, _token: ServiceToken) {
			self.0.lock().push("resolved");
		}

		fn failed(&self, _error: Error) {
			self.0.lock().push("failed");
		}
	}

	fn service(client: CannedClient) -> AuthService<CannedClient> {
		let config =
			AuthConfig::new(Environment::Local, "key").expect("Local configuration should build.");

		AuthService::with_http_client(config, client)
	}

	#[test]
	fn non_object_and_missing_fields_fold_into_unexpected_body() {
		let err = service_token(ApiResponse { status: 200, body: None })
			.expect_err("Missing body should fail.");

		assert!(matches!(err, Error::UnexpectedBody(BodyError::NotAnObject)));

		let err = service_token(ApiResponse { status: 200, body: Some(json!({ "token": "x" })) })
			.expect_err("Body without access_token should fail.");

		assert!(matches!(err, Error::UnexpectedBody(BodyError::TokenMismatch(_))));

		let err = service_token(ApiResponse { status: 401, body: Some(json!({})) })
			.expect_err("Non-2xx should fail.");

		assert!(matches!(err, Error::UnexpectedStatus(401)));
	}

	#[tokio::test]
	async fn invalid_callback_fails_without_network_call() {
		let client = CannedClient::new(200, "{\"access_token\":\"token\"}");
		let listener = Arc::new(Events::default());
		let service = service(client.clone()).with_listener(&listener);

		service.process_callback("scheme://example/callback#scope=ascope").await;

		assert_eq!(*listener.0.lock(), ["failed"]);
		assert_eq!(client.calls.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn header_unsafe_token_fails_before_received_callback() {
		let client = CannedClient::new(200, "{\"access_token\":\"token\"}");
		let listener = Arc::new(Events::default());
		let service = service(client.clone()).with_listener(&listener);

		service.process_callback("scheme://example/callback#access_token=a%0D%0Ab").await;

		assert_eq!(*listener.0.lock(), ["failed"]);
		assert_eq!(client.calls.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn received_callback_precedes_terminal_notification() {
		let client = CannedClient::new(200, "{\"access_token\":\"token\"}");
		let listener = Arc::new(Events::default());
		let service = service(client.clone()).with_listener(&listener);

		service.process_callback("scheme://example/callback#access_token=foo").await;

		assert_eq!(*listener.0.lock(), ["received", "resolved"]);
		assert_eq!(client.calls.load(Ordering::SeqCst), 1);

		let failing = service_for_status(503).with_listener(&listener);

		failing.process_callback("scheme://example/callback#access_token=foo").await;

		assert_eq!(*listener.0.lock(), ["received", "resolved", "received", "failed"]);
	}

	fn service_for_status(status: u16) -> AuthService<CannedClient> {
		service(CannedClient::new(status, ""))
	}

	#[tokio::test]
	async fn dropped_listener_is_skipped_silently() {
		let client = CannedClient::new(200, "{\"access_token\":\"token\"}");
		let listener = Arc::new(Events::default());
		let service = service(client.clone()).with_listener(&listener);

		assert!(service.has_listener());

		drop(listener);

		assert!(!service.has_listener());

		service.process_callback("scheme://example/callback#access_token=foo").await;

		assert_eq!(client.calls.load(Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn exchange_returns_result_directly() {
		let client = CannedClient::new(
			200,
			"{\"access_token\":\"svc\",\"expires_in\":42,\"token_type\":\"Bearer\"}",
		);
		let token = service(client)
			.exchange(&ProvisionalToken::new("foo"))
			.await
			.expect("Exchange should succeed.");

		assert_eq!(token.access_token.expose(), "svc");
		assert_eq!(token.expires_in, Some(Duration::seconds(42)));
		assert_eq!(token.token_type.as_deref(), Some("Bearer"));
	}
}
