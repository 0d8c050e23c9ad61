//! Demonstrates a client that derives its transport from OAuth 2.0 client credentials and
//! reuses one access token across several rate-limited calls.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use relax::{Client, Feature, Modifiers, TransportSource, auth::ClientCredentials};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"bearer\",\"expires_in\":900}",
			);
		})
		.await;
	let resource_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/reports").header("authorization", "Bearer demo-access");
			then.status(200).body("[\"q1\",\"q2\"]");
		})
		.await;
	let credentials =
		ClientCredentials::new("demo-client", "super-secret", server.url("/token"))?
			.with_scopes(["reports.read"]);
	let client = Client::new(
		TransportSource::credentials(credentials),
		[Feature::DefaultTimeout, Feature::DefaultLimiter],
	)?;
	let url = server.url("/reports");

	for _ in 0..3 {
		let response = client.get(&url, Modifiers::new().use_limiter(true)).await?;

		println!("{} {}", response.status, String::from_utf8_lossy(&response.body));
	}

	token_mock.assert_async().await;
	resource_mock.assert_calls_async(3).await;

	Ok(())
}
