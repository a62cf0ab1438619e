//! Sign-in URL issuance: `GET {base}/authenticate_url`.

// crates.io
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	error::BodyError,
	flows::AuthService,
	http::{self, ApiResponse, AuthHttpClient},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::Provider,
};

impl<C> AuthService<C>
where
	C: ?Sized + AuthHttpClient,
{
	/// Asks the auth API for the sign-in page of `provider`; send the user there next.
	///
	/// `client_id` and `callback` must match what is registered with the provider. `scope` is
	/// forwarded as-is.
	///
	/// # Errors
	///
	/// - [`Error::UnexpectedStatus`] for a non-2xx response.
	/// - [`Error::UnexpectedBody`] when the body is not a JSON string holding an absolute URL.
	/// - [`Error::Transport`] when the request never got a response.
	pub async fn authentication_url(
		&self,
		provider: Provider,
		client_id: &str,
		callback: &Url,
		scope: &str,
	) -> Result<Url> {
		const KIND: FlowKind = FlowKind::AuthenticationUrl;

		let span = FlowSpan::new(KIND, "authentication_url");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let mut url = self.config.authenticate_url_endpoint().clone();

				url.query_pairs_mut()
					.append_pair("clientId", client_id)
					.append_pair("callbackUri", callback.as_str())
					.append_pair("scope", scope)
					.append_pair("connection", provider.as_str());
				obs::trace_dispatch(KIND, &url);

				let request = http::get_request(&url, self.config.api_key(), None)?;
				let response = http::send(self.http_client.as_ref(), request).await?;

				sign_in_url(response)
			})
			.await;

		obs::finish(KIND, result)
	}
}

fn sign_in_url(response: ApiResponse) -> Result<Url> {
	if !response.is_success() {
		return Err(Error::UnexpectedStatus(response.status));
	}

	match response.body {
		Some(Value::String(raw)) =>
			Url::parse(&raw).map_err(|e| Error::UnexpectedBody(BodyError::InvalidUrl(e))),
		_ => Err(Error::UnexpectedBody(BodyError::NotAString)),
	}
}
