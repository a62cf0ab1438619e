//! Transport primitives for auth API calls.
//!
//! [`AuthHttpClient`] is the service's only dependency on an HTTP stack. It hands out
//! [`AsyncHttpClient`] handles, so any client that already speaks `oauth2`'s transport contract
//! can be plugged in. Responses are reduced to an [`ApiResponse`]: the status code plus a loosely
//! typed JSON body.

// crates.io
use oauth2::{
	AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse,
	http::{
		HeaderValue, Method, Request,
		header::{ACCEPT, AUTHORIZATION},
	},
};
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
};

const API_KEY_HEADER: &str = "x-api-key";

/// Abstraction over HTTP transports capable of issuing auth API requests.
///
/// Implementations must be `Send + Sync + 'static` so one transport can back many concurrent
/// operations, and the futures their handles return must be `Send` so service futures can move
/// between executor threads.
pub trait AuthHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// [`AsyncHttpClient`] handle used for a single request.
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Returns a handle for the next request.
	fn handle(&self) -> Self::Handle;
}

/// Status code and decoded body of an auth API response.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// Body decoded as JSON; `None` when the body is empty or not valid JSON.
	pub body: Option<Value>,
}
impl ApiResponse {
	/// Reduces a raw HTTP response.
	pub fn from_http(response: HttpResponse) -> Self {
		let status = response.status().as_u16();
		let body = serde_json::from_slice(response.body()).ok();

		Self { status, body }
	}

	/// Returns true for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Builds a `GET` request carrying the API key and, optionally, an `Authorization` value.
///
/// The `Authorization` value is sent verbatim (no `Bearer` prefix) and marked sensitive.
pub fn get_request(
	url: &Url,
	api_key: &HeaderValue,
	authorization: Option<&str>,
) -> Result<HttpRequest, ConfigError> {
	let mut builder = Request::builder()
		.method(Method::GET)
		.uri(url.as_str())
		.header(ACCEPT, HeaderValue::from_static("application/json"))
		.header(API_KEY_HEADER, api_key.clone());

	if let Some(token) = authorization {
		let mut value = HeaderValue::from_str(token).map_err(oauth2::http::Error::from)?;

		value.set_sensitive(true);
		builder = builder.header(AUTHORIZATION, value);
	}

	Ok(builder.body(Vec::new())?)
}

/// Sends `request` through `client` and reduces the result to an [`ApiResponse`].
pub async fn send<C>(client: &C, request: HttpRequest) -> Result<ApiResponse>
where
	C: ?Sized + AuthHttpClient,
{
	let handle = client.handle();
	let response = handle.call(request).await.map_err(map_transport_error)?;

	Ok(ApiResponse::from_http(response))
}

/// Classifies transport failures without altering the underlying error.
pub fn map_transport_error<E>(err: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Reqwest(inner) => TransportError::network(*inner).into(),
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(inner) => TransportError::Io(inner).into(),
		HttpClientError::Other(message) => TransportError::Other { message }.into(),
		_ => TransportError::Other { message: "unknown HTTP client failure".into() }.into(),
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// The auth API answers directly, so clients built by [`ReqwestHttpClient::new`] do not follow
/// redirects.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds a client that never follows redirects.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().redirect(reqwest::redirect::Policy::none()).build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl AuthHttpClient for ReqwestHttpClient {
	type Handle = ReqwestHandle;
	type TransportError = ReqwestError;

	fn handle(&self) -> Self::Handle {
		ReqwestHandle(self.0.clone())
	}
}

/// Handle returned by [`ReqwestHttpClient`]; owns a clone of the pooled client.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHandle(ReqwestClient);
#[cfg(feature = "reqwest")]
impl<'c> AsyncHttpClient<'c> for ReqwestHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = self.0.clone();

		Box::pin(async move {
			let response =
				client.execute(request.try_into().map_err(Box::new)?).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}
