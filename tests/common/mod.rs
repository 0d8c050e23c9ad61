//! Shared helpers for integration tests.

#![allow(dead_code)]

// std
use std::sync::{
	Arc,
	atomic::{AtomicUsize, Ordering},
};
// self
use relax::{
	Client, Feature, TransportSource,
	http::{HttpRequest, HttpTransport, ReqwestTransport, TransportFuture},
};

pub const CLIENT_ID: &str = "relax-client";
pub const CLIENT_SECRET: &str = "relax-secret";
pub const TOKEN_BODY: &str =
	"{\"access_token\":\"minted-token\",\"token_type\":\"bearer\",\"expires_in\":3600}";

/// Builds a client over the process-default reqwest transport.
pub fn default_client(features: impl IntoIterator<Item = Feature>) -> Client {
	Client::new(TransportSource::Default, features).expect("Default client should build.")
}

/// Reqwest-backed transport that counts and remembers the requests it forwards.
#[derive(Clone, Default)]
pub struct InspectingTransport {
	inner: ReqwestTransport,
	calls: Arc<AtomicUsize>,
	authorizations: Arc<parking_lot::Mutex<Vec<Option<String>>>>,
}
impl InspectingTransport {
	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	/// `Authorization` header seen on each forwarded request, in order.
	pub fn authorizations(&self) -> Vec<Option<String>> {
		self.authorizations.lock().clone()
	}
}
impl HttpTransport for InspectingTransport {
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
		let authorization = request
			.headers()
			.get("authorization")
			.and_then(|value| value.to_str().ok())
			.map(ToOwned::to_owned);

		self.calls.fetch_add(1, Ordering::SeqCst);
		self.authorizations.lock().push(authorization);

		self.inner.execute(request)
	}
}
