//! Walks through an SSO sign-in against a locally running auth API.
//!
//! ```sh
//! cargo run --example sso_login -- 'myapp://sso/callback#access_token=...&expires_in=3600'
//! ```

// std
use std::sync::Arc;
// self
use sso_exchange::{
	auth::ServiceToken,
	config::AuthConfig,
	env::Environment,
	error::Error,
	flows::{AuthListener, ReqwestAuthService},
	provider::Provider,
	url::Url,
};

struct PrintingListener;
impl AuthListener for PrintingListener {
	fn received_callback(&self) {
		println!("Callback accepted; exchanging token.");
	}

	fn resolved(&self, token: ServiceToken) {
		println!(
			"Signed in: token={} type={:?} expires_in={:?}",
			token.access_token, token.token_type, token.expires_in
		);
	}

	fn failed(&self, error: Error) {
		eprintln!("Sign-in failed: {error}");
	}
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let config = AuthConfig::new(Environment::Local, "demo-api-key")?;
	let listener = Arc::new(PrintingListener);
	let service = ReqwestAuthService::new(config)?.with_listener(&listener);
	let callback = Url::parse("myapp://sso/callback")?;

	match service.authentication_url(Provider::OneLogin, "demo-client", &callback, "openid").await {
		Ok(url) => println!("Send the user to: {url}"),
		Err(e) => eprintln!("Could not fetch the sign-in URL: {e}"),
	}

	if let Some(redirect) = std::env::args().nth(1) {
		service.process_callback(redirect).await;
	}

	Ok(())
}
