//! The decorated client, its construction, and per-call dispatch.
//!
//! A [`Client`] owns one transport plus the optional subsystems selected at construction time:
//! a [`ResponseCache`], a [`RateLimiter`], and a timeout. Every subsystem sits behind an `Arc`,
//! so cloning a client is cheap and clones share the same cache and token bucket.

pub mod builder;
pub mod modifiers;

mod dispatch;

pub use builder::*;
pub use modifiers::*;

// self
use crate::{
	_prelude::*,
	auth::{BearerTransport, ClientCredentials, ClientCredentialsSource},
	cache::ResponseCache,
	error::ConfigError,
	http::HttpTransport,
	limit::RateLimiter,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

/// Where a client's transport comes from. Exactly one source is used per client.
#[derive(Clone, Default)]
pub enum TransportSource {
	/// Wrap an existing transport.
	Transport(Arc<dyn HttpTransport>),
	/// Use a fresh [`ReqwestTransport`] (requires the `reqwest` feature).
	#[default]
	Default,
	/// Derive a transport that authorizes every request with client-credential tokens.
	Credentials {
		/// Credentials exchanged at the token endpoint.
		credentials: ClientCredentials,
		/// Transport used for the token exchange and the authorized calls; when absent, a
		/// [`ReqwestTransport`] that does not follow redirects.
		base: Option<Arc<dyn HttpTransport>>,
	},
}
impl TransportSource {
	/// Wraps `transport`.
	pub fn transport(transport: impl HttpTransport) -> Self {
		Self::Transport(Arc::new(transport))
	}

	/// Derives an authorizing transport over the default transport.
	pub fn credentials(credentials: ClientCredentials) -> Self {
		Self::Credentials { credentials, base: None }
	}

	/// Derives an authorizing transport over `base`.
	pub fn credentials_over(credentials: ClientCredentials, base: impl HttpTransport) -> Self {
		Self::Credentials { credentials, base: Some(Arc::new(base)) }
	}

	fn into_parts(self) -> Result<(Arc<dyn HttpTransport>, Option<ClientCredentials>), ConfigError> {
		match self {
			Self::Transport(transport) => Ok((transport, None)),
			Self::Default => Ok((default_transport(true)?, None)),
			Self::Credentials { credentials, base } => {
				let base = match base {
					Some(base) => base,
					// Token endpoints answer directly; a redirected POST must not be replayed.
					None => default_transport(false)?,
				};
				let source = ClientCredentialsSource::new(&credentials, base.clone())?;
				let transport = BearerTransport::new(base, Arc::new(source));

				Ok((Arc::new(transport), Some(credentials)))
			},
		}
	}
}
impl Debug for TransportSource {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Transport(_) => f.write_str("Transport(..)"),
			Self::Default => f.write_str("Default"),
			Self::Credentials { credentials, base } => f
				.debug_struct("Credentials")
				.field("credentials", credentials)
				.field("base", &base.as_ref().map(|_| ".."))
				.finish(),
		}
	}
}

#[cfg(feature = "reqwest")]
fn default_transport(follow_redirects: bool) -> Result<Arc<dyn HttpTransport>, ConfigError> {
	let mut builder = ReqwestClient::builder();

	if !follow_redirects {
		builder = builder.redirect(reqwest::redirect::Policy::none());
	}

	Ok(Arc::new(ReqwestTransport::with_client(builder.build()?)))
}
#[cfg(not(feature = "reqwest"))]
fn default_transport(_follow_redirects: bool) -> Result<Arc<dyn HttpTransport>, ConfigError> {
	Err(ConfigError::MissingTransport)
}

/// HTTP client decorated with the subsystems chosen at construction.
///
/// Read-only after construction and safe to share across tasks.
#[derive(Clone)]
pub struct Client {
	transport: Arc<dyn HttpTransport>,
	credentials: Option<ClientCredentials>,
	cache: Option<Arc<ResponseCache>>,
	limiter: Option<Arc<RateLimiter>>,
	timeout: Option<Duration>,
}
impl Client {
	/// Builds a client from `source`, applying `features` in order.
	///
	/// ```no_run
	/// use relax::{Client, Feature, TransportSource};
	///
	/// let client = Client::new(TransportSource::Default, [Feature::DefaultCache, Feature::DefaultLimiter])?;
	///
	/// assert!(client.cache().is_some());
	/// # Ok::<(), relax::Error>(())
	/// ```
	pub fn new(source: TransportSource, features: impl IntoIterator<Item = Feature>) -> Result<Self> {
		ClientBuilder::new(source).features(features).build()
	}

	/// Starts a [`ClientBuilder`] over `source`.
	pub fn builder(source: TransportSource) -> ClientBuilder {
		ClientBuilder::new(source)
	}

	/// Transport every call goes through.
	pub fn transport(&self) -> &Arc<dyn HttpTransport> {
		&self.transport
	}

	/// Credentials the transport was derived from, if any.
	pub fn credentials(&self) -> Option<&ClientCredentials> {
		self.credentials.as_ref()
	}

	/// Response cache, when enabled.
	pub fn cache(&self) -> Option<&Arc<ResponseCache>> {
		self.cache.as_ref()
	}

	/// Rate limiter, when enabled.
	pub fn limiter(&self) -> Option<&Arc<RateLimiter>> {
		self.limiter.as_ref()
	}

	/// Bound applied to every transport call, when enabled.
	pub fn timeout(&self) -> Option<Duration> {
		self.timeout
	}
}
impl Debug for Client {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("credentials", &self.credentials)
			.field("cache", &self.cache)
			.field("limiter", &self.limiter)
			.field("timeout", &self.timeout)
			.finish_non_exhaustive()
	}
}
