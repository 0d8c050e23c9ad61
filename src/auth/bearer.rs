//! Transport decorator that authorizes every request with a token from a [`TokenSource`].

// crates.io
use oauth2::http::{HeaderValue, header::AUTHORIZATION};
// self
use crate::{
	_prelude::*,
	auth::{TokenError, TokenSource},
	http::{HttpRequest, HttpTransport, Response, TransportFuture},
};

/// Wraps an inner transport and sets `Authorization: <scheme> <token>` on each request,
/// replacing any value the caller supplied.
pub struct BearerTransport {
	inner: Arc<dyn HttpTransport>,
	source: Arc<dyn TokenSource>,
}
impl BearerTransport {
	/// Creates a decorator over `inner` that draws tokens from `source`.
	pub fn new(inner: Arc<dyn HttpTransport>, source: Arc<dyn TokenSource>) -> Self {
		Self { inner, source }
	}

	async fn send(&self, mut request: HttpRequest) -> Result<Response, TransportError> {
		let token = self.source.token().await?;
		let mut value = HeaderValue::from_str(&token.authorization_value())
			.map_err(|_| TokenError::InvalidHeaderValue)?;

		value.set_sensitive(true);
		request.headers_mut().insert(AUTHORIZATION, value);

		self.inner.execute(request).await
	}
}
impl HttpTransport for BearerTransport {
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
		Box::pin(self.send(request))
	}
}
impl Debug for BearerTransport {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("BearerTransport(..)")
	}
}
