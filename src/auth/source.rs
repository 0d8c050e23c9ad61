//! Token sources that hand access tokens to the bearer transport.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ClientCredentials},
	error::ConfigError,
	http::HttpTransport,
	oauth::ClientCredentialsExchange,
	obs::{self, Operation, OperationSpan, Outcome},
};

/// Boxed future returned by [`TokenSource::token`].
pub type TokenFuture<'a> =
	Pin<Box<dyn Future<Output = Result<AccessToken, TokenError>> + 'a + Send>>;

/// Supplies access tokens, refreshing them as needed.
pub trait TokenSource
where
	Self: Send + Sync,
{
	/// Returns a token that is valid for the next outgoing request.
	fn token(&self) -> TokenFuture<'_>;
}

/// Failures raised while obtaining an access token.
#[derive(Debug, ThisError)]
pub enum TokenError {
	/// The token endpoint answered with an OAuth error response.
	#[error("Token endpoint rejected the client credentials: {error}.")]
	Rejected {
		/// OAuth error code (`invalid_client`, `unauthorized_client`, ...).
		error: String,
		/// Optional human-readable description supplied by the endpoint.
		description: Option<String>,
	},
	/// The token endpoint responded with JSON that could not be parsed.
	#[error("Token endpoint returned malformed JSON.")]
	MalformedResponse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// The token endpoint responded with something other than a token payload.
	#[error("Token endpoint returned an unexpected response: {message}.")]
	UnexpectedResponse {
		/// Description of the unexpected response.
		message: String,
	},
	/// The token endpoint reported a lifetime whose expiry instant cannot be represented.
	#[error("The expires_in value exceeds the supported range.")]
	ExpiresInOutOfRange,
	/// The issued token cannot be carried in an `Authorization` header.
	#[error("Access token contains characters that are not valid in a header value.")]
	InvalidHeaderValue,
	/// The token endpoint could not be reached.
	#[error("Token endpoint could not be reached.")]
	Transport(#[source] Box<TransportError>),
}

/// Source that always yields the same token.
#[derive(Clone, Debug)]
pub struct StaticTokenSource(AccessToken);
impl StaticTokenSource {
	/// Wraps a fixed token.
	pub fn new(token: AccessToken) -> Self {
		Self(token)
	}
}
impl TokenSource for StaticTokenSource {
	fn token(&self) -> TokenFuture<'_> {
		let token = self.0.clone();

		Box::pin(async move { Ok(token) })
	}
}

/// Client-credentials token source that reuses the current token until shortly before it
/// expires.
///
/// Only one exchange runs at a time; callers arriving while an exchange is in flight wait for it
/// and reuse its token instead of stampeding the token endpoint.
pub struct ClientCredentialsSource {
	exchange: ClientCredentialsExchange,
	current: AsyncMutex<Option<AccessToken>>,
	expiry_leeway: Duration,
}
impl ClientCredentialsSource {
	/// Tokens are refreshed this long before their reported expiry.
	pub const DEFAULT_EXPIRY_LEEWAY: Duration = Duration::from_secs(10);

	/// Creates a source that exchanges `credentials` over `transport`.
	pub fn new(
		credentials: &ClientCredentials,
		transport: Arc<dyn HttpTransport>,
	) -> Result<Self, ConfigError> {
		Ok(Self {
			exchange: ClientCredentialsExchange::new(credentials, transport)?,
			current: AsyncMutex::new(None),
			expiry_leeway: Self::DEFAULT_EXPIRY_LEEWAY,
		})
	}

	/// Overrides how long before expiry a token is considered stale.
	pub fn with_expiry_leeway(mut self, leeway: Duration) -> Self {
		self.expiry_leeway = leeway;

		self
	}

	async fn fetch(&self) -> Result<AccessToken, TokenError> {
		const OP: Operation = Operation::TokenExchange;

		let mut current = self.current.lock().await;

		if let Some(token) = current
			.as_ref()
			.filter(|token| token.is_fresh_at(OffsetDateTime::now_utc(), self.expiry_leeway))
		{
			return Ok(token.clone());
		}

		let span = OperationSpan::new(OP, "client_credentials");

		obs::record_operation_outcome(OP, Outcome::Attempt);

		let result = span.instrument(self.exchange.exchange()).await;

		obs::record_operation_result(OP, &result);

		let token = result?;

		*current = Some(token.clone());

		Ok(token)
	}
}
impl TokenSource for ClientCredentialsSource {
	fn token(&self) -> TokenFuture<'_> {
		Box::pin(self.fetch())
	}
}
impl Debug for ClientCredentialsSource {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientCredentialsSource")
			.field("exchange", &self.exchange)
			.field("expiry_leeway", &self.expiry_leeway)
			.finish()
	}
}
