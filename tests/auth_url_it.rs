// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use sso_exchange::{_preludet::*, error::BodyError, provider::Provider};

const API_KEY: &str = "apiKey";
const CLIENT_ID: &str = "clientID";
const SCOPE: &str = "scope";

fn callback() -> Url {
	Url::parse("http://callback.example").expect("Callback URL should parse.")
}

#[tokio::test]
async fn authentication_url_sends_wire_parameters() {
	let server = MockServer::start_async().await;
	let (service, _listener) = build_reqwest_test_service(&server.base_url(), API_KEY);
	let callback = callback();
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/authenticate_url")
				.header("x-api-key", API_KEY)
				.query_param("clientId", CLIENT_ID)
				.query_param("callbackUri", callback.as_str())
				.query_param("scope", SCOPE)
				.query_param("connection", "cws");
			then.status(200).json_body(json!("http://auth.example"));
		})
		.await;

	service
		.authentication_url(Provider::Cws, CLIENT_ID, &callback, SCOPE)
		.await
		.expect("Authentication URL request should succeed.");

	mock.assert_async().await;
}

#[tokio::test]
async fn authentication_url_returns_body_url() {
	let server = MockServer::start_async().await;
	let (service, _listener) = build_reqwest_test_service(&server.base_url(), "");
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/authenticate_url").query_param("connection", "onelogin");
			then.status(200).json_body(json!("http://auth.example"));
		})
		.await;
	let url = service
		.authentication_url(Provider::OneLogin, "", &callback(), "")
		.await
		.expect("Authentication URL request should succeed.");

	assert_eq!(url, Url::parse("http://auth.example").expect("Expected URL should parse."));

	mock.assert_async().await;
}

#[tokio::test]
async fn authentication_url_maps_server_failure_to_status() {
	let server = MockServer::start_async().await;
	let (service, _listener) = build_reqwest_test_service(&server.base_url(), "");
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/authenticate_url");
			then.status(500);
		})
		.await;
	let err = service
		.authentication_url(Provider::Cws, "", &callback(), "")
		.await
		.expect_err("A 500 response should fail.");

	assert!(matches!(err, Error::UnexpectedStatus(500)));

	mock.assert_async().await;
}

#[tokio::test]
async fn authentication_url_does_not_follow_redirects() {
	let server = MockServer::start_async().await;
	let (service, _listener) = build_reqwest_test_service(&server.base_url(), "");
	let redirect = server
		.mock_async(|when, then| {
			when.method(GET).path("/authenticate_url");
			then.status(302).header("location", server.url("/elsewhere"));
		})
		.await;
	let elsewhere = server
		.mock_async(|when, then| {
			when.method(GET).path("/elsewhere");
			then.status(200).json_body(json!("http://auth.example"));
		})
		.await;
	let err = service
		.authentication_url(Provider::Cws, "", &callback(), "")
		.await
		.expect_err("A redirect should surface as a status failure.");

	assert_eq!(err.status(), Some(302));

	redirect.assert_async().await;
	elsewhere.assert_calls_async(0).await;
}

#[tokio::test]
async fn authentication_url_rejects_unparseable_url() {
	let server = MockServer::start_async().await;
	let (service, _listener) = build_reqwest_test_service(&server.base_url(), "");
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/authenticate_url");
			then.status(200).json_body(json!("not a url???"));
		})
		.await;
	let err = service
		.authentication_url(Provider::Cws, "", &callback(), "")
		.await
		.expect_err("An unparseable URL should fail.");

	assert!(matches!(err, Error::UnexpectedBody(BodyError::InvalidUrl(_))));

	mock.assert_async().await;
}

#[tokio::test]
async fn authentication_url_rejects_non_string_body() {
	let server = MockServer::start_async().await;
	let (service, _listener) = build_reqwest_test_service(&server.base_url(), "");
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/authenticate_url");
			then.status(200).json_body(json!({ "url": "http://auth.example" }));
		})
		.await;
	let err = service
		.authentication_url(Provider::Cws, "", &callback(), "")
		.await
		.expect_err("An object body should fail.");

	assert!(matches!(err, Error::UnexpectedBody(BodyError::NotAString)));

	mock.assert_async().await;
}

#[tokio::test]
async fn repeated_calls_are_independent() {
	let server = MockServer::start_async().await;
	let (service, _listener) = build_reqwest_test_service(&server.base_url(), API_KEY);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/authenticate_url").query_param("clientId", CLIENT_ID);
			then.status(200).json_body(json!("http://auth.example/login"));
		})
		.await;
	let callback = callback();
	let (first, second) = tokio::join!(
		service.authentication_url(Provider::Cws, CLIENT_ID, &callback, SCOPE),
		service.authentication_url(Provider::Cws, CLIENT_ID, &callback, SCOPE),
	);
	let first = first.expect("First call should succeed.");
	let second = second.expect("Second call should succeed.");

	assert_eq!(first, second);
	assert_eq!(first.as_str(), "http://auth.example/login");

	mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn authentication_url_surfaces_connection_failures() {
	let (service, _listener) = build_reqwest_test_service("http://127.0.0.1:1", "");
	let err = service
		.authentication_url(Provider::Cws, "", &callback(), "")
		.await
		.expect_err("An unreachable host should fail.");

	match err {
		Error::Transport(inner) => {
			let source = inner
				.downcast_ref::<ReqwestError>()
				.expect("Transport errors should keep the reqwest error.");

			assert!(source.is_connect());
		},
		other => panic!("Unexpected error: {other:?}."),
	}
}
