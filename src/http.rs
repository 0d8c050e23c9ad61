//! Transport primitives for outbound calls.
//!
//! [`HttpTransport`] is the client's only dependency on an HTTP stack. Requests are
//! [`HttpRequest`] values (`http::Request<Vec<u8>>`) and every transport hands back a fully
//! buffered [`Response`], which is what lets the response cache keep and replay responses.
//! [`ReqwestTransport`] is the default implementation; tests and downstream crates can supply
//! their own.

pub use oauth2::{HttpRequest, http};

// std
use std::ops::Deref;
// crates.io
use oauth2::http::{HeaderMap, StatusCode};
// self
use crate::_prelude::*;

/// Boxed future returned by [`HttpTransport::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<Response, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of a single request/response exchange.
///
/// Implementations must be `Send + Sync + 'static` so one transport can sit behind an
/// `Arc<dyn HttpTransport>` shared by cloned clients, and the returned future must be `Send` so
/// callers can drive it from any executor thread.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and buffers the full response.
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_>;
}

/// Buffered HTTP response returned by transports and replayed by the response cache.
///
/// Additional fields may be added in future releases, so downstream code should construct
/// values through [`Response::new`] rather than struct literals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
	/// Status code returned by the server.
	pub status: StatusCode,
	/// Response headers.
	pub headers: HeaderMap,
	/// Response body bytes.
	pub body: Vec<u8>,
}
impl Response {
	/// Creates a response without headers.
	pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
		Self { status, headers: HeaderMap::new(), body: body.into() }
	}

	/// Replaces the header map.
	pub fn with_headers(mut self, headers: HeaderMap) -> Self {
		self.headers = headers;

		self
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		self.status.is_success()
	}

	/// Converts the response into the `http` representation consumed by `oauth2`.
	pub(crate) fn into_http(self) -> oauth2::HttpResponse {
		let mut response = oauth2::HttpResponse::new(self.body);

		*response.status_mut() = self.status;
		*response.headers_mut() = self.headers;

		response
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Token endpoints return results directly, so a custom [`ReqwestClient`] used for
/// credential-derived clients should not follow redirects on POST.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	async fn send(&self, request: HttpRequest) -> Result<Response, TransportError> {
		let response = self.0.execute(request.try_into()?).await?;
		let status = response.status();
		let headers = response.headers().to_owned();
		let body = response.bytes().await?.to_vec();

		Ok(Response { status, headers, body })
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
		Box::pin(self.send(request))
	}
}
