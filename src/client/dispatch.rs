// crates.io
use oauth2::http::{Method, Request};
// self
use crate::{
	_prelude::*,
	client::{Client, Modifiers},
	error::ConfigError,
	http::{HttpRequest, Response},
	limit::RateLimiter,
	obs::{self, Operation, OperationSpan, Outcome},
};

impl Client {
	/// Sends `request` through the limiter (when requested) and the transport.
	///
	/// The response is returned as-is: no status interpretation, no retry, and no cache
	/// involvement even when `use_cache` is set.
	pub async fn execute(&self, request: HttpRequest, modifiers: Modifiers) -> Result<Response> {
		const OP: Operation = Operation::Execute;

		let span = OperationSpan::new(OP, "execute");

		obs::record_operation_outcome(OP, Outcome::Attempt);

		let result = span.instrument(self.dispatch(request, modifiers)).await;

		obs::record_operation_result(OP, &result);

		result
	}

	/// Issues a GET for `url`, serving it from and storing it into the cache when requested.
	///
	/// The cache key is `url` verbatim. A cache hit never waits on the limiter. Only successful
	/// dispatches are stored, whatever their status code.
	pub async fn get(&self, url: &str, modifiers: Modifiers) -> Result<Response> {
		const OP: Operation = Operation::Get;

		let span = OperationSpan::new(OP, "get");

		obs::record_operation_outcome(OP, Outcome::Attempt);

		let result = span.instrument(self.cached_get(url, modifiers)).await;

		obs::record_operation_result(OP, &result);

		result
	}

	async fn dispatch(&self, request: HttpRequest, modifiers: Modifiers) -> Result<Response> {
		let started = Instant::now();

		if modifiers.use_limiter {
			let limiter = self.limiter.as_deref().ok_or(ConfigError::LimiterNotDefined)?;

			acquire(limiter, modifiers.deadline).await?;
		}

		let remaining = modifiers.deadline.map(|deadline| deadline.saturating_sub(started.elapsed()));
		let bound = match (self.timeout, remaining) {
			(Some(timeout), Some(remaining)) => Some(timeout.min(remaining)),
			(timeout, remaining) => timeout.or(remaining),
		};
		let call = self.transport.execute(request);
		let response = match bound {
			Some(after) => tokio::time::timeout(after, call)
				.await
				.map_err(|_| TransportError::TimedOut { after })??,
			None => call.await?,
		};

		Ok(response)
	}

	async fn cached_get(&self, url: &str, modifiers: Modifiers) -> Result<Response> {
		// A missing limiter is reported even when a cache hit would skip it.
		if modifiers.use_limiter && self.limiter.is_none() {
			return Err(ConfigError::LimiterNotDefined.into());
		}

		let cache = if modifiers.use_cache {
			Some(self.cache.as_deref().ok_or(ConfigError::CacheNotDefined)?)
		} else {
			None
		};

		if let Some(cache) = cache {
			let hit = cache.get(url);

			obs::record_cache_lookup(hit.is_some());

			if let Some(response) = hit {
				return Ok(response);
			}
		}

		let request =
			Request::builder().method(Method::GET).uri(url).body(Vec::new()).map_err(ConfigError::from)?;
		let response = self.execute(request, modifiers.use_cache(false)).await?;

		if let Some(cache) = cache {
			cache.set_default(url, response.clone());
		}

		Ok(response)
	}
}

async fn acquire(limiter: &RateLimiter, deadline: Option<Duration>) -> Result<(), LimiterWaitError> {
	let started = Instant::now();

	match deadline {
		Some(deadline) => tokio::time::timeout(deadline, limiter.wait())
			.await
			.map_err(|_| LimiterWaitError::DeadlineExceeded { deadline })??,
		None => limiter.wait().await?,
	}

	obs::record_limiter_wait(started.elapsed());

	Ok(())
}
