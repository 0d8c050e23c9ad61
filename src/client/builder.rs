//! Client construction from a transport source and an ordered list of features.

// self
use crate::{
	_prelude::*,
	cache::ResponseCache,
	client::{Client, TransportSource},
	limit::RateLimiter,
};

/// Response cache settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheSettings {
	/// Lifetime given to stored responses; `None` or zero keeps them until deleted.
	pub default_expiration: Option<Duration>,
	/// Minimum time between sweeps of expired entries; `None` or zero disables sweeping.
	pub cleanup_interval: Option<Duration>,
}
impl Default for CacheSettings {
	fn default() -> Self {
		Self {
			default_expiration: Some(ResponseCache::DEFAULT_EXPIRATION),
			cleanup_interval: Some(ResponseCache::DEFAULT_CLEANUP_INTERVAL),
		}
	}
}

/// Token bucket settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LimiterSettings {
	/// Permits added per second.
	pub rate: f64,
	/// Bucket capacity.
	pub burst: u32,
}
impl Default for LimiterSettings {
	fn default() -> Self {
		Self { rate: RateLimiter::DEFAULT_RATE, burst: RateLimiter::DEFAULT_BURST }
	}
}

/// Construction-time toggle. Later features override earlier ones for the same subsystem.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Feature {
	/// Bound every transport call by the given duration.
	Timeout(Duration),
	/// Bound every transport call by [`Feature::DEFAULT_TIMEOUT`].
	DefaultTimeout,
	/// Enable the response cache with the given settings.
	Cache(CacheSettings),
	/// Enable the response cache with [`CacheSettings::default`].
	DefaultCache,
	/// Enable the rate limiter with the given settings.
	Limiter(LimiterSettings),
	/// Enable the rate limiter with [`LimiterSettings::default`].
	DefaultLimiter,
}
impl Feature {
	/// Timeout applied by [`Feature::DefaultTimeout`].
	pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
}

/// Accumulates features before building a [`Client`].
#[derive(Clone, Debug, Default)]
pub struct ClientBuilder {
	/// Where the transport comes from.
	pub source: TransportSource,
	/// Transport call bound.
	pub timeout: Option<Duration>,
	/// Response cache settings; disabled when `None`.
	pub cache: Option<CacheSettings>,
	/// Rate limiter settings; disabled when `None`.
	pub limiter: Option<LimiterSettings>,
}
impl ClientBuilder {
	/// Creates a builder with every subsystem disabled.
	pub fn new(source: TransportSource) -> Self {
		Self { source, timeout: None, cache: None, limiter: None }
	}

	/// Bounds every transport call by `timeout`.
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Bounds every transport call by [`Feature::DEFAULT_TIMEOUT`].
	pub fn default_timeout(self) -> Self {
		self.timeout(Feature::DEFAULT_TIMEOUT)
	}

	/// Enables the response cache.
	pub fn cache(mut self, settings: CacheSettings) -> Self {
		self.cache = Some(settings);

		self
	}

	/// Enables the response cache with default settings.
	pub fn default_cache(self) -> Self {
		self.cache(CacheSettings::default())
	}

	/// Enables the rate limiter.
	pub fn limiter(mut self, settings: LimiterSettings) -> Self {
		self.limiter = Some(settings);

		self
	}

	/// Enables the rate limiter with default settings.
	pub fn default_limiter(self) -> Self {
		self.limiter(LimiterSettings::default())
	}

	/// Applies a single feature.
	pub fn feature(self, feature: Feature) -> Self {
		match feature {
			Feature::Timeout(timeout) => self.timeout(timeout),
			Feature::DefaultTimeout => self.default_timeout(),
			Feature::Cache(settings) => self.cache(settings),
			Feature::DefaultCache => self.default_cache(),
			Feature::Limiter(settings) => self.limiter(settings),
			Feature::DefaultLimiter => self.default_limiter(),
		}
	}

	/// Applies `features` in order.
	pub fn features(self, features: impl IntoIterator<Item = Feature>) -> Self {
		features.into_iter().fold(self, Self::feature)
	}

	/// Validates the settings and builds the client.
	pub fn build(self) -> Result<Client> {
		let limiter = self
			.limiter
			.map(|settings| RateLimiter::new(settings.rate, settings.burst))
			.transpose()?
			.map(Arc::new);
		let cache = self.cache.map(|settings| {
			Arc::new(ResponseCache::new(settings.default_expiration, settings.cleanup_interval))
		});
		let (transport, credentials) = self.source.into_parts()?;

		Ok(Client { transport, credentials, cache, limiter, timeout: self.timeout })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_preludet::RecordingTransport;

	#[test]
	fn later_features_override_earlier_ones() {
		let builder = ClientBuilder::new(TransportSource::transport(RecordingTransport::ok()))
			.features([
				Feature::Cache(CacheSettings { default_expiration: None, cleanup_interval: None }),
				Feature::DefaultCache,
				Feature::DefaultLimiter,
				Feature::Limiter(LimiterSettings { rate: 1., burst: 1 }),
			]);

		assert_eq!(builder.cache, Some(CacheSettings::default()));
		assert_eq!(builder.limiter, Some(LimiterSettings { rate: 1., burst: 1 }));
		assert_eq!(builder.timeout, None);
	}

	#[test]
	fn defaults_match_documented_values() {
		let client = ClientBuilder::new(TransportSource::transport(RecordingTransport::ok()))
			.default_timeout()
			.default_cache()
			.default_limiter()
			.build()
			.expect("Default features should build.");

		assert_eq!(client.timeout(), Some(Duration::from_secs(5)));
		assert_eq!(
			client.cache().and_then(|cache| cache.default_expiration()),
			Some(Duration::from_secs(300))
		);
		assert_eq!(client.limiter().map(|limiter| limiter.burst()), Some(10));
	}

	#[cfg(not(feature = "reqwest"))]
	#[test]
	fn default_source_needs_a_transport_stack() {
		let err = ClientBuilder::new(TransportSource::Default)
			.build()
			.expect_err("No default transport exists without reqwest.");

		assert!(matches!(err, Error::Config(crate::error::ConfigError::MissingTransport)));
	}
}
