#![cfg(feature = "reqwest")]

mod common;

// crates.io
use httpmock::prelude::*;
// self
use relax::{
	Client, Error, Feature, Modifiers, TransportSource,
	auth::{ClientCredentials, TokenError},
	error::TransportError,
};

fn credentials(server: &MockServer) -> ClientCredentials {
	ClientCredentials::new(common::CLIENT_ID, common::CLIENT_SECRET, server.url("/token"))
		.expect("Mock token endpoint should parse.")
		.with_scopes(["api.read"])
}

#[tokio::test]
async fn credential_client_authorizes_every_request() {
	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/token")
				.header("content-type", "application/x-www-form-urlencoded");
			then.status(200).header("content-type", "application/json").body(common::TOKEN_BODY);
		})
		.await;
	let resource_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/resource").header("authorization", "Bearer minted-token");
			then.status(200).body("secret stuff");
		})
		.await;
	let inspector = common::InspectingTransport::default();
	let client = Client::new(
		TransportSource::credentials_over(credentials(&server), inspector.clone()),
		[Feature::DefaultTimeout],
	)
	.expect("Credential client should build.");
	let url = server.url("/resource");

	for _ in 0..3 {
		let response = client.get(&url, Modifiers::new()).await.expect("Authorized get should succeed.");

		assert_eq!(response.body, b"secret stuff");
	}

	token_mock.assert_calls_async(1).await;
	resource_mock.assert_calls_async(3).await;

	let authorizations = inspector.authorizations();

	assert_eq!(inspector.calls(), 4);
	// The token request authenticates with HTTP Basic, the rest carry the bearer token.
	assert!(authorizations[0].as_deref().is_some_and(|value| value.starts_with("Basic ")));
	assert!(
		authorizations[1..]
			.iter()
			.all(|value| value.as_deref() == Some("Bearer minted-token"))
	);
}

#[tokio::test]
async fn rejected_credentials_surface_as_token_errors() {
	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(401)
				.header("content-type", "application/json")
				.body("{\"error\":\"invalid_client\"}");
		})
		.await;
	let resource_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/resource");
			then.status(200);
		})
		.await;
	let client = Client::new(
		TransportSource::credentials_over(credentials(&server), common::InspectingTransport::default()),
		[],
	)
	.expect("Credential client should build.");
	let err = client
		.get(&server.url("/resource"), Modifiers::new())
		.await
		.expect_err("Rejected credentials should fail the call.");

	match err {
		Error::Transport(TransportError::Token(TokenError::Rejected { error, .. })) =>
			assert_eq!(error, "invalid_client"),
		other => panic!("Unexpected error: {other:?}."),
	}

	token_mock.assert_calls_async(1).await;
	resource_mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn credentials_over_the_default_transport() {
	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(200).header("content-type", "application/json").body(common::TOKEN_BODY);
		})
		.await;
	let resource_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/resource").header("authorization", "Bearer minted-token");
			then.status(200);
		})
		.await;
	let client = Client::new(TransportSource::credentials(credentials(&server)), [])
		.expect("Credential client should build.");

	client.get(&server.url("/resource"), Modifiers::new()).await.expect("Get should succeed.");

	assert_eq!(client.credentials().map(|c| c.client_id.as_str()), Some(common::CLIENT_ID));

	token_mock.assert_async().await;
	resource_mock.assert_async().await;
}

#[tokio::test]
async fn default_credential_transport_does_not_follow_redirects() {
	let server = MockServer::start_async().await;
	let redirect_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(307).header("location", "/moved-token");
		})
		.await;
	let moved_mock = server
		.mock_async(|when, then| {
			when.path("/moved-token");
			then.status(200).header("content-type", "application/json").body(common::TOKEN_BODY);
		})
		.await;
	let client = Client::new(TransportSource::credentials(credentials(&server)), [])
		.expect("Credential client should build.");
	let err = client
		.get(&server.url("/resource"), Modifiers::new())
		.await
		.expect_err("A redirected token request should not be replayed.");

	assert!(matches!(err, Error::Transport(TransportError::Token(_))));

	redirect_mock.assert_calls_async(1).await;
	moved_mock.assert_calls_async(0).await;
}
