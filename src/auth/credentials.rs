//! Client-credential settings consumed by [`ClientCredentialsSource`](crate::auth::ClientCredentialsSource).

// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// How the client authenticates itself against the token endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStyle {
	#[default]
	/// HTTP Basic with `client_id`/`client_secret`.
	Header,
	/// Form POST body parameters for `client_id`/`client_secret`.
	Body,
}

/// OAuth 2.0 client-credential configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientCredentials {
	/// OAuth 2.0 client identifier (the API key).
	pub client_id: String,
	/// Client secret; redacted in debug output.
	pub client_secret: TokenSecret,
	/// Token endpoint the credentials are exchanged against.
	pub token_url: Url,
	/// Scopes requested with every exchange.
	pub scopes: Vec<String>,
	/// Additional form parameters sent with every exchange.
	pub extra_params: Vec<(String, String)>,
	/// Client authentication style for the token endpoint.
	pub auth_style: AuthStyle,
}
impl ClientCredentials {
	/// Creates credentials for the provided API key, secret, and token endpoint URL.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		token_url: impl AsRef<str>,
	) -> Result<Self, ConfigError> {
		let token_url = Url::parse(token_url.as_ref())
			.map_err(|source| ConfigError::InvalidTokenUrl { source })?;

		Ok(Self {
			client_id: client_id.into(),
			client_secret: TokenSecret::new(client_secret),
			token_url,
			scopes: Vec::new(),
			extra_params: Vec::new(),
			auth_style: AuthStyle::default(),
		})
	}

	/// Replaces the requested scopes.
	pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.scopes = scopes.into_iter().map(Into::into).collect();

		self
	}

	/// Appends an extra form parameter to every exchange.
	pub fn with_extra_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.extra_params.push((key.into(), value.into()));

		self
	}

	/// Overrides the client authentication style.
	pub fn with_auth_style(mut self, style: AuthStyle) -> Self {
		self.auth_style = style;

		self
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn rejects_unparsable_token_url() {
		let err = ClientCredentials::new("key", "secret", "not a url")
			.expect_err("Relative token URLs should be rejected.");

		assert!(matches!(err, ConfigError::InvalidTokenUrl { .. }));
	}

	#[test]
	fn debug_output_redacts_the_secret() {
		let credentials = ClientCredentials::new("key", "hunter2", "https://auth.example.com/token")
			.expect("Token URL fixture should parse.")
			.with_scopes(["read"]);
		let rendered = format!("{credentials:?}");

		assert!(rendered.contains("key"));
		assert!(!rendered.contains("hunter2"));
	}
}
