//! Token-bucket rate limiter shared by every call that opts into limiting.

// std
use std::num::NonZeroU32;
// crates.io
use governor::{DefaultDirectRateLimiter, Quota};
// self
use crate::{_prelude::*, error::ConfigError};

/// Token bucket that refills `rate` permits per second up to `burst` stored permits.
pub struct RateLimiter {
	inner: DefaultDirectRateLimiter,
	rate: f64,
	burst: NonZeroU32,
}
impl RateLimiter {
	/// Default refill rate, in permits per second.
	pub const DEFAULT_RATE: f64 = 10.;
	/// Default bucket capacity.
	pub const DEFAULT_BURST: u32 = 10;

	/// Creates a full bucket.
	///
	/// `rate` must be finite and positive and `burst` non-zero.
	pub fn new(rate: f64, burst: u32) -> Result<Self, ConfigError> {
		let invalid = || ConfigError::InvalidLimiter { rate, burst };

		if !rate.is_finite() || rate <= 0. {
			return Err(invalid());
		}

		let burst_capacity = NonZeroU32::new(burst).ok_or_else(invalid)?;
		let period = Duration::try_from_secs_f64(rate.recip()).map_err(|_| invalid())?;
		let quota = Quota::with_period(period).ok_or_else(invalid)?.allow_burst(burst_capacity);

		Ok(Self { inner: DefaultDirectRateLimiter::direct(quota), rate, burst: burst_capacity })
	}

	/// Refill rate, in permits per second.
	pub fn rate(&self) -> f64 {
		self.rate
	}

	/// Bucket capacity.
	pub fn burst(&self) -> u32 {
		self.burst.get()
	}

	/// Waits until one permit is available and consumes it.
	pub async fn wait(&self) -> Result<(), LimiterWaitError> {
		self.wait_n(1).await
	}

	/// Waits until `n` permits are available and consumes them.
	///
	/// Fails immediately when `n` exceeds the burst, since such a request can never be granted.
	pub async fn wait_n(&self, n: u32) -> Result<(), LimiterWaitError> {
		let Some(permits) = NonZeroU32::new(n) else {
			return Ok(());
		};

		self.inner
			.until_n_ready(permits)
			.await
			.map_err(|_| LimiterWaitError::ExceedsBurst { requested: n, burst: self.burst() })
	}

	/// Consumes one permit if one is available right now.
	pub fn try_acquire(&self) -> bool {
		self.inner.check().is_ok()
	}
}
impl Default for RateLimiter {
	fn default() -> Self {
		let burst = NonZeroU32::new(Self::DEFAULT_BURST).unwrap_or(NonZeroU32::MIN);

		Self {
			inner: DefaultDirectRateLimiter::direct(Quota::per_second(burst)),
			rate: Self::DEFAULT_RATE,
			burst,
		}
	}
}
impl Debug for RateLimiter {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RateLimiter").field("rate", &self.rate).field("burst", &self.burst).finish()
	}
}
