//! Redacted secrets and the access tokens issued by token sources.

// self
use crate::{_prelude::*, auth::TokenError};

/// Redacted secret wrapper keeping client secrets and access tokens out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Access token issued by a token endpoint.
#[derive(Clone)]
pub struct AccessToken {
	/// Token value; callers must avoid logging it.
	pub secret: TokenSecret,
	/// Token type as reported by the endpoint (`bearer`, `mac`, ...).
	pub token_type: String,
	/// Instant the token was received.
	pub issued_at: OffsetDateTime,
	/// Expiry instant, when the endpoint reported one.
	pub expires_at: Option<OffsetDateTime>,
}
impl AccessToken {
	/// Creates a token issued now without an expiry.
	pub fn new(secret: impl Into<String>, token_type: impl Into<String>) -> Self {
		Self {
			secret: TokenSecret::new(secret),
			token_type: token_type.into(),
			issued_at: OffsetDateTime::now_utc(),
			expires_at: None,
		}
	}

	/// Creates a bearer token issued now without an expiry.
	pub fn bearer(secret: impl Into<String>) -> Self {
		Self::new(secret, "Bearer")
	}

	/// Overrides the issued-at instant.
	pub fn issued_at(mut self, instant: OffsetDateTime) -> Self {
		self.issued_at = instant;

		self
	}

	/// Sets the expiry relative to the current issued-at instant.
	///
	/// Fails when the expiry instant cannot be represented.
	pub fn expires_in(mut self, lifetime: Duration) -> Result<Self, TokenError> {
		let expires_at = checked_offset(self.issued_at, lifetime)
			.ok_or(TokenError::ExpiresInOutOfRange)?;

		self.expires_at = Some(expires_at);

		Ok(self)
	}

	/// Returns `true` once the expiry instant has passed.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		self.expires_at.is_some_and(|expires_at| instant >= expires_at)
	}

	/// Returns `true` while the token stays valid for at least `leeway` past `instant`.
	///
	/// Tokens without an expiry are always fresh.
	pub fn is_fresh_at(&self, instant: OffsetDateTime, leeway: Duration) -> bool {
		self.expires_at.is_none_or(|expires_at| {
			checked_offset(instant, leeway).is_some_and(|deadline| deadline < expires_at)
		})
	}

	/// Canonical authorization scheme for the token type.
	pub fn scheme(&self) -> &str {
		let raw = self.token_type.as_str();

		if raw.is_empty() || raw.eq_ignore_ascii_case("bearer") {
			"Bearer"
		} else if raw.eq_ignore_ascii_case("mac") {
			"MAC"
		} else if raw.eq_ignore_ascii_case("basic") {
			"Basic"
		} else {
			raw
		}
	}

	/// Value for the `Authorization` header.
	pub fn authorization_value(&self) -> String {
		format!("{} {}", self.scheme(), self.secret.expose())
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("secret", &"<redacted>")
			.field("token_type", &self.token_type)
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}

fn checked_offset(instant: OffsetDateTime, offset: Duration) -> Option<OffsetDateTime> {
	time::Duration::try_from(offset).ok().and_then(|offset| instant.checked_add(offset))
}
