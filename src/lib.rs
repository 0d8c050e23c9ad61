//! An HTTP client decorator that layers opt-in response caching, token-bucket rate limiting,
//! request timeouts, and OAuth 2.0 client-credential authentication over any transport.
//!
//! Build a [`Client`] once from a [`TransportSource`] and a set of [`Feature`]s, then pick the
//! behaviors each call should use through [`Modifiers`]. Asking for a subsystem the client was
//! not built with is an error rather than a silent no-op.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod limit;
pub mod obs;

mod oauth;

#[cfg(test)]
mod _preludet {
	//! Shared fakes for unit tests.

	// crates.io
	use oauth2::http::{HeaderMap, Method, StatusCode};
	// self
	use crate::{
		_prelude::*,
		http::{HttpRequest, HttpTransport, Response, TransportFuture},
	};

	type Responder = dyn Fn(&HttpRequest) -> Result<Response, TransportError> + Send + Sync;

	/// Snapshot of a request seen by [`RecordingTransport`].
	#[derive(Clone, Debug)]
	pub struct RecordedRequest {
		pub method: Method,
		pub uri: String,
		pub headers: HeaderMap,
		pub body: Vec<u8>,
	}

	/// In-process transport that records every request and answers from a closure.
	#[derive(Clone)]
	pub struct RecordingTransport {
		responder: Arc<Responder>,
		delay: Option<Duration>,
		requests: Arc<Mutex<Vec<RecordedRequest>>>,
	}
	impl RecordingTransport {
		pub fn responding<F>(responder: F) -> Self
		where
			F: 'static + Fn(&HttpRequest) -> Result<Response, TransportError> + Send + Sync,
		{
			Self { responder: Arc::new(responder), delay: None, requests: Default::default() }
		}

		/// Answers every request with `200 OK` and the request URI as the body.
		pub fn ok() -> Self {
			Self::responding(|request| Ok(Response::new(StatusCode::OK, request.uri().to_string())))
		}

		pub fn failing() -> Self {
			Self::responding(|_| {
				Err(TransportError::network(std::io::Error::new(
					std::io::ErrorKind::ConnectionRefused,
					"connection refused",
				)))
			})
		}

		/// Sleeps for `delay` before answering.
		pub fn with_delay(mut self, delay: Duration) -> Self {
			self.delay = Some(delay);

			self
		}

		pub fn calls(&self) -> usize {
			self.requests.lock().len()
		}

		pub fn requests(&self) -> Vec<RecordedRequest> {
			self.requests.lock().clone()
		}

		async fn answer(&self, request: HttpRequest) -> Result<Response, TransportError> {
			self.requests.lock().push(RecordedRequest {
				method: request.method().clone(),
				uri: request.uri().to_string(),
				headers: request.headers().clone(),
				body: request.body().clone(),
			});

			if let Some(delay) = self.delay {
				tokio::time::sleep(delay).await;
			}

			(self.responder)(&request)
		}
	}
	impl HttpTransport for RecordingTransport {
		fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
			Box::pin(self.answer(request))
		}
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
		time::{Duration, Instant},
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, LimiterWaitError, Result, TransportError};
}

pub use client::{Client, ClientBuilder, Feature, Modifier, Modifiers, TransportSource};
pub use error::{Error, Result};

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
