//! Thread-safe expiring response store keyed by request URL.
//!
//! Expired entries are never returned by [`ResponseCache::get`]. They are physically removed
//! by [`ResponseCache::delete_expired`] or lazily on writes once the cleanup interval has
//! elapsed since the previous sweep.

// self
use crate::{_prelude::*, http::Response};

/// Lifetime applied to an entry when it is stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Expiration {
	#[default]
	/// Use the cache's default expiration.
	Default,
	/// Keep the entry until it is deleted or flushed.
	Never,
	/// Expire the entry after the given duration.
	After(Duration),
}

#[derive(Clone, Debug)]
struct CacheEntry {
	response: Response,
	expires_at: Option<Instant>,
}
impl CacheEntry {
	fn is_expired_at(&self, now: Instant) -> bool {
		self.expires_at.is_some_and(|at| now >= at)
	}
}

/// Expiring key/value store holding responses by their literal request URL.
#[derive(Debug)]
pub struct ResponseCache {
	entries: RwLock<HashMap<String, CacheEntry>>,
	default_expiration: Option<Duration>,
	cleanup_interval: Option<Duration>,
	last_sweep: Mutex<Instant>,
}
impl ResponseCache {
	/// Default entry lifetime used by [`ResponseCache::default`].
	pub const DEFAULT_EXPIRATION: Duration = Duration::from_secs(5 * 60);
	/// Default sweep interval used by [`ResponseCache::default`].
	pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(10 * 60);

	/// Creates an empty cache.
	///
	/// A missing or zero `default_expiration` keeps entries forever; a missing or zero
	/// `cleanup_interval` disables lazy sweeping.
	pub fn new(default_expiration: Option<Duration>, cleanup_interval: Option<Duration>) -> Self {
		Self {
			entries: Default::default(),
			default_expiration: default_expiration.filter(|d| !d.is_zero()),
			cleanup_interval: cleanup_interval.filter(|d| !d.is_zero()),
			last_sweep: Mutex::new(Instant::now()),
		}
	}

	/// Lifetime applied by [`Expiration::Default`].
	pub fn default_expiration(&self) -> Option<Duration> {
		self.default_expiration
	}

	/// Returns the live response stored under `key`.
	pub fn get(&self, key: &str) -> Option<Response> {
		let now = Instant::now();

		self.entries
			.read()
			.get(key)
			.filter(|entry| !entry.is_expired_at(now))
			.map(|entry| entry.response.clone())
	}

	/// Stores `response` under `key`, replacing any previous entry.
	pub fn set(&self, key: impl Into<String>, response: Response, expiration: Expiration) {
		let now = Instant::now();
		let lifetime = match expiration {
			Expiration::Default => self.default_expiration,
			Expiration::Never => None,
			Expiration::After(lifetime) => Some(lifetime),
		};
		let entry =
			CacheEntry { response, expires_at: lifetime.and_then(|lifetime| now.checked_add(lifetime)) };

		self.sweep_if_due(now);
		self.entries.write().insert(key.into(), entry);
	}

	/// Stores `response` under `key` with the default expiration.
	pub fn set_default(&self, key: impl Into<String>, response: Response) {
		self.set(key, response, Expiration::Default);
	}

	/// Removes the entry stored under `key`, returning it if it was still live.
	pub fn delete(&self, key: &str) -> Option<Response> {
		let now = Instant::now();

		self.entries
			.write()
			.remove(key)
			.filter(|entry| !entry.is_expired_at(now))
			.map(|entry| entry.response)
	}

	/// Removes every expired entry and returns how many were dropped.
	pub fn delete_expired(&self) -> usize {
		let now = Instant::now();
		let mut entries = self.entries.write();
		let before = entries.len();

		entries.retain(|_, entry| !entry.is_expired_at(now));

		before - entries.len()
	}

	/// Removes every entry.
	pub fn flush(&self) {
		self.entries.write().clear();
	}

	/// Number of live entries.
	pub fn len(&self) -> usize {
		let now = Instant::now();

		self.entries.read().values().filter(|entry| !entry.is_expired_at(now)).count()
	}

	/// Returns `true` when no live entry remains.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn sweep_if_due(&self, now: Instant) {
		let Some(interval) = self.cleanup_interval else {
			return;
		};

		{
			let mut last_sweep = self.last_sweep.lock();

			if now.saturating_duration_since(*last_sweep) < interval {
				return;
			}

			*last_sweep = now;
		}

		self.entries.write().retain(|_, entry| !entry.is_expired_at(now));
	}
}
impl Default for ResponseCache {
	fn default() -> Self {
		Self::new(Some(Self::DEFAULT_EXPIRATION), Some(Self::DEFAULT_CLEANUP_INTERVAL))
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::thread;
	// crates.io
	use oauth2::http::StatusCode;
	// self
	use super::*;

	fn response(body: &str) -> Response {
		Response::new(StatusCode::OK, body)
	}

	#[test]
	fn keys_are_literal_urls() {
		let cache = ResponseCache::default();

		cache.set_default("http://x/a", response("a"));

		assert_eq!(cache.get("http://x/a").map(|r| r.body), Some(b"a".to_vec()));
		assert!(cache.get("http://x/a/").is_none());
		assert!(cache.get("HTTP://x/a").is_none());
		assert!(cache.get("http://x/b").is_none());
	}

	#[test]
	fn expired_entries_are_invisible() {
		let cache = ResponseCache::new(Some(Duration::from_millis(20)), None);

		cache.set_default("short", response("short"));
		cache.set("pinned", response("pinned"), Expiration::Never);

		assert_eq!(cache.len(), 2);

		thread::sleep(Duration::from_millis(40));

		assert!(cache.get("short").is_none());
		assert!(cache.get("pinned").is_some());
		assert_eq!(cache.len(), 1);
		assert_eq!(cache.delete_expired(), 1);
	}

	#[test]
	fn zero_default_expiration_never_expires() {
		let cache = ResponseCache::new(Some(Duration::ZERO), None);

		cache.set_default("key", response("value"));

		assert_eq!(cache.default_expiration(), None);

		thread::sleep(Duration::from_millis(5));

		assert!(cache.get("key").is_some());
	}

	#[test]
	fn writes_sweep_once_the_cleanup_interval_elapses() {
		let cache =
			ResponseCache::new(Some(Duration::from_millis(10)), Some(Duration::from_millis(10)));

		cache.set_default("stale", response("stale"));
		thread::sleep(Duration::from_millis(30));
		cache.set("fresh", response("fresh"), Expiration::Never);

		let entries = cache.entries.read();

		assert!(!entries.contains_key("stale"));
		assert!(entries.contains_key("fresh"));
	}

	#[test]
	fn delete_and_flush_remove_entries() {
		let cache = ResponseCache::default();

		cache.set_default("a", response("a"));
		cache.set_default("b", response("b"));

		assert_eq!(cache.delete("a").map(|r| r.body), Some(b"a".to_vec()));
		assert!(cache.delete("a").is_none());

		cache.flush();

		assert!(cache.is_empty());
	}
}
