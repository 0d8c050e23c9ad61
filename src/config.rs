//! Serializable client configuration.
//!
//! [`ClientConfig`] mirrors the builder's knobs in a form that can live in a JSON file. Every
//! section is optional; an empty object yields a client with no subsystems enabled.

// std
use std::collections::BTreeMap;
// self
use crate::{
	_prelude::*,
	auth::{AuthStyle, ClientCredentials, TokenSecret},
	client::{CacheSettings, ClientBuilder, LimiterSettings, TransportSource},
	error::ConfigError,
	http::HttpTransport,
};

/// Top-level client configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
	/// Transport call bound in milliseconds; absent or zero disables the timeout.
	pub timeout_ms: Option<u64>,
	/// Response cache section; the cache is disabled when absent.
	pub cache: Option<CacheConfig>,
	/// Rate limiter section; the limiter is disabled when absent.
	pub limiter: Option<LimiterConfig>,
	/// Client-credential section; the default transport is used unauthenticated when absent.
	pub credentials: Option<CredentialsConfig>,
}
impl ClientConfig {
	/// Parses a JSON document, reporting the path of the first offending field on failure.
	pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
		let mut deserializer = serde_json::Deserializer::from_str(json);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| ConfigError::InvalidConfig { source })
	}

	/// Converts the configuration into a builder over the default transport.
	pub fn into_builder(self) -> Result<ClientBuilder, ConfigError> {
		let source = match self.credentials.clone() {
			Some(credentials) => TransportSource::credentials(credentials.into_credentials()?),
			None => TransportSource::Default,
		};

		Ok(self.apply(ClientBuilder::new(source)))
	}

	/// Converts the configuration into a builder over `transport`.
	///
	/// When credentials are configured, `transport` carries both the token exchange and the
	/// authorized calls.
	pub fn into_builder_over(
		self,
		transport: impl HttpTransport,
	) -> Result<ClientBuilder, ConfigError> {
		let source = match self.credentials.clone() {
			Some(credentials) =>
				TransportSource::credentials_over(credentials.into_credentials()?, transport),
			None => TransportSource::transport(transport),
		};

		Ok(self.apply(ClientBuilder::new(source)))
	}

	fn apply(self, mut builder: ClientBuilder) -> ClientBuilder {
		builder.timeout = self.timeout_ms.filter(|ms| *ms > 0).map(Duration::from_millis);
		builder.cache = self.cache.map(CacheConfig::into_settings);
		builder.limiter = self.limiter.map(LimiterConfig::into_settings);

		builder
	}
}

/// Response cache section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
	/// Entry lifetime in seconds; zero keeps entries until deleted.
	pub default_expiration_secs: u64,
	/// Sweep interval in seconds; zero disables sweeping.
	pub cleanup_interval_secs: u64,
}
impl CacheConfig {
	fn into_settings(self) -> CacheSettings {
		CacheSettings {
			default_expiration: Some(Duration::from_secs(self.default_expiration_secs)),
			cleanup_interval: Some(Duration::from_secs(self.cleanup_interval_secs)),
		}
	}
}
impl Default for CacheConfig {
	fn default() -> Self {
		Self { default_expiration_secs: 300, cleanup_interval_secs: 600 }
	}
}

/// Rate limiter section.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimiterConfig {
	/// Permits added per second.
	pub rate: f64,
	/// Bucket capacity.
	pub burst: u32,
}
impl LimiterConfig {
	fn into_settings(self) -> LimiterSettings {
		LimiterSettings { rate: self.rate, burst: self.burst }
	}
}
impl Default for LimiterConfig {
	fn default() -> Self {
		let LimiterSettings { rate, burst } = LimiterSettings::default();

		Self { rate, burst }
	}
}

/// Client-credential section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialsConfig {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// Client secret; redacted in debug output.
	pub client_secret: TokenSecret,
	/// Token endpoint URL.
	pub token_url: String,
	/// Scopes requested with every exchange.
	#[serde(default)]
	pub scopes: Vec<String>,
	/// Additional form parameters sent with every exchange.
	#[serde(default)]
	pub extra_params: BTreeMap<String, String>,
	/// Client authentication style.
	#[serde(default)]
	pub auth_style: AuthStyle,
}
impl CredentialsConfig {
	/// Validates the section into [`ClientCredentials`].
	pub fn into_credentials(self) -> Result<ClientCredentials, ConfigError> {
		let credentials =
			ClientCredentials::new(self.client_id, self.client_secret.expose(), &self.token_url)?
				.with_scopes(self.scopes)
				.with_auth_style(self.auth_style);

		Ok(self
			.extra_params
			.into_iter()
			.fold(credentials, |credentials, (key, value)| credentials.with_extra_param(key, value)))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_preludet::RecordingTransport;

	#[test]
	fn empty_document_disables_everything() {
		let config = ClientConfig::from_json_str("{}").expect("Empty config should parse.");

		assert_eq!(config, ClientConfig::default());

		let client = config
			.into_builder_over(RecordingTransport::ok())
			.expect("Builder should convert.")
			.build()
			.expect("Empty config should build.");

		assert!(client.cache().is_none());
		assert!(client.limiter().is_none());
		assert!(client.timeout().is_none());
	}

	#[test]
	fn sections_fall_back_to_documented_defaults() {
		let config = ClientConfig::from_json_str(r#"{"timeout_ms":250,"cache":{},"limiter":{}}"#)
			.expect("Config should parse.");
		let builder =
			config.into_builder_over(RecordingTransport::ok()).expect("Builder should convert.");

		assert_eq!(builder.timeout, Some(Duration::from_millis(250)));
		assert_eq!(builder.cache, Some(CacheSettings::default()));
		assert_eq!(builder.limiter, Some(LimiterSettings::default()));
	}

	#[test]
	fn credentials_section_builds_credentials() {
		let config = ClientConfig::from_json_str(
			r#"{
				"credentials": {
					"client_id": "key",
					"client_secret": "secret",
					"token_url": "https://auth.example.com/token",
					"scopes": ["read"],
					"extra_params": {"audience": "api"},
					"auth_style": "body"
				}
			}"#,
		)
		.expect("Config should parse.");
		let credentials = config
			.credentials
			.expect("Credentials section should be present.")
			.into_credentials()
			.expect("Credentials should validate.");

		assert_eq!(credentials.client_secret.expose(), "secret");
		assert_eq!(credentials.scopes, ["read"]);
		assert_eq!(credentials.extra_params, [("audience".to_owned(), "api".to_owned())]);
		assert_eq!(credentials.auth_style, AuthStyle::Body);
	}

	#[test]
	fn errors_point_at_the_offending_field() {
		let err = ClientConfig::from_json_str(r#"{"limiter":{"burst":"ten"}}"#)
			.expect_err("A string burst should be rejected.");

		match err {
			ConfigError::InvalidConfig { source } =>
				assert!(source.path().to_string().ends_with("burst")),
			other => panic!("Unexpected config error: {other:?}."),
		}
	}

	#[test]
	fn invalid_token_urls_are_rejected() {
		let config = ClientConfig::from_json_str(
			r#"{"credentials":{"client_id":"k","client_secret":"s","token_url":"::"}}"#,
		)
		.expect("Config should parse.");
		let err = config
			.into_builder_over(RecordingTransport::ok())
			.expect_err("Token URL should be validated.");

		assert!(matches!(err, ConfigError::InvalidTokenUrl { .. }));
	}
}
