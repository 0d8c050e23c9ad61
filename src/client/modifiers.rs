//! Per-call behavior selection.

// self
use crate::_prelude::*;

/// Behaviors a single call opts into. Everything is off by default.
///
/// ```
/// use relax::{Modifier, Modifiers};
///
/// let chained = Modifiers::new().use_cache(true).use_limiter(true);
/// let listed = Modifiers::from_iter([Modifier::UseCache(true), Modifier::UseLimiter(true)]);
///
/// assert_eq!(chained, listed);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
	/// Serve from and store into the response cache (only honored by `get`).
	pub use_cache: bool,
	/// Wait for a rate limiter permit before sending.
	pub use_limiter: bool,
	/// Upper bound on the whole call, covering the limiter wait and the transport call.
	pub deadline: Option<Duration>,
}
impl Modifiers {
	/// Creates an empty modifier set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets whether the response cache is used.
	pub fn use_cache(mut self, enabled: bool) -> Self {
		self.use_cache = enabled;

		self
	}

	/// Sets whether the rate limiter is used.
	pub fn use_limiter(mut self, enabled: bool) -> Self {
		self.use_limiter = enabled;

		self
	}

	/// Bounds the whole call by `deadline`.
	pub fn deadline(mut self, deadline: Duration) -> Self {
		self.deadline = Some(deadline);

		self
	}

	/// Applies one modifier, overriding any earlier value for the same flag.
	pub fn apply(&mut self, modifier: Modifier) {
		match modifier {
			Modifier::UseCache(enabled) => self.use_cache = enabled,
			Modifier::UseLimiter(enabled) => self.use_limiter = enabled,
			Modifier::Deadline(deadline) => self.deadline = deadline,
		}
	}
}
impl From<Modifier> for Modifiers {
	fn from(modifier: Modifier) -> Self {
		Self::from_iter([modifier])
	}
}
impl FromIterator<Modifier> for Modifiers {
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = Modifier>,
	{
		let mut modifiers = Self::default();

		modifiers.extend(iter);

		modifiers
	}
}
impl Extend<Modifier> for Modifiers {
	fn extend<I>(&mut self, iter: I)
	where
		I: IntoIterator<Item = Modifier>,
	{
		iter.into_iter().for_each(|modifier| self.apply(modifier));
	}
}

/// A single per-call toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Modifier {
	/// Toggle the response cache.
	UseCache(bool),
	/// Toggle the rate limiter.
	UseLimiter(bool),
	/// Set or clear the call deadline.
	Deadline(Option<Duration>),
}
