//! Demonstrates opt-in response caching: the first call reaches the server, the second is
//! answered from the cache, and an uncached call always goes out.

// std
use std::time::Duration;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use relax::{
	Client, Feature, Modifiers, TransportSource,
	client::CacheSettings,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/quote");
			then.status(200).body("stay relaxed");
		})
		.await;
	let client = Client::new(
		TransportSource::Default,
		[Feature::Cache(CacheSettings {
			default_expiration: Some(Duration::from_secs(30)),
			cleanup_interval: Some(Duration::from_secs(60)),
		})],
	)?;
	let url = server.url("/quote");
	let cached = Modifiers::new().use_cache(true);

	for label in ["network", "cache"] {
		let response = client.get(&url, cached).await?;

		println!("{label}: {}", String::from_utf8_lossy(&response.body));
	}

	client.get(&url, Modifiers::new()).await?;

	mock.assert_calls_async(2).await;

	Ok(())
}
