//! Client-level error types shared by configuration, dispatch, and authentication.

// self
use crate::{_prelude::*, auth::TokenError};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem, including modifiers requesting an absent subsystem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The underlying HTTP call failed.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Waiting on the rate limiter failed.
	#[error(transparent)]
	LimiterWait(#[from] LimiterWaitError),
}

/// Configuration failures raised while building a client or issuing a request against it.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// The limiter modifier was requested on a client without a limiter.
	#[error("Limiter not defined.")]
	LimiterNotDefined,
	/// The cache modifier was requested on a client without a cache.
	#[error("Cache not defined.")]
	CacheNotDefined,
	/// Limiter settings cannot describe a token bucket.
	#[error("Limiter rate must be finite and positive and burst must be non-zero (rate: {rate}, burst: {burst}).")]
	InvalidLimiter {
		/// Requested permits per second.
		rate: f64,
		/// Requested bucket capacity.
		burst: u32,
	},
	/// Token endpoint URL cannot be parsed.
	#[error("Token endpoint URL is invalid.")]
	InvalidTokenUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// No transport is available for the selected source.
	#[error("No HTTP transport is available; enable the `reqwest` feature or supply a transport.")]
	MissingTransport,
	/// Serialized configuration could not be parsed.
	#[error("Client configuration is invalid.")]
	InvalidConfig {
		/// Structured parsing failure pointing at the offending field.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO, timeouts, credential exchange).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while sending the request.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while sending the request.")]
	Io(#[from] std::io::Error),
	/// The call did not complete within the client timeout or the call deadline.
	#[error("Request timed out after {after:?}.")]
	TimedOut {
		/// Bound that elapsed.
		after: Duration,
	},
	/// The credential-derived transport could not obtain an access token.
	#[error(transparent)]
	Token(#[from] TokenError),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Failures raised while waiting for a limiter permit.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum LimiterWaitError {
	/// More permits were requested than the bucket can ever hold.
	#[error("Requested {requested} permits but the limiter burst is {burst}.")]
	ExceedsBurst {
		/// Permits requested by the caller.
		requested: u32,
		/// Bucket capacity.
		burst: u32,
	},
	/// No permit became available before the call deadline.
	#[error("No limiter permit became available within {deadline:?}.")]
	DeadlineExceeded {
		/// Time budget that elapsed.
		deadline: Duration,
	},
}
