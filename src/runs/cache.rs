use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use chrono::{DateTime, Utc};

/// Key/value map whose entries expire at a fixed instant.
///
/// Time is passed in by the caller so expiry is deterministic under test.
/// Nothing is evicted except on expiry.
#[derive(Debug)]
pub struct TtlCache<K, V> {
	entries: HashMap<K, (V, DateTime<Utc>)>,
}

impl<K, V> Default for TtlCache<K, V> {
	fn default() -> Self {
		Self {
			entries: HashMap::new(),
		}
	}
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
	/// An empty cache.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns a live entry, dropping it if it has expired.
	pub fn get<Q>(&mut self, key: &Q, now: DateTime<Utc>) -> Option<V>
	where
		K: Borrow<Q>,
		Q: Hash + Eq + ?Sized,
	{
		let expired = match self.entries.get(key) {
			Some((value, expires_at)) if now < *expires_at => return Some(value.clone()),
			Some(_) => true,
			None => false,
		};
		if expired {
			self.entries.remove(key);
		}
		None
	}

	/// Stores `value` until `expires_at`, replacing any previous entry.
	pub fn insert(&mut self, key: K, value: V, expires_at: DateTime<Utc>) {
		self.entries.insert(key, (value, expires_at));
	}

	/// Drops every entry that has expired by `now`.
	pub fn purge_expired(&mut self, now: DateTime<Utc>) {
		self.entries.retain(|_, (_, expires_at)| now < *expires_at);
	}

	/// Number of stored entries, expired or not.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// True when nothing is stored.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use chrono::TimeDelta;

	use super::*;

	#[test]
	fn entry_lives_until_expiry() {
		let t0 = Utc::now();
		let mut cache = TtlCache::new();
		cache.insert("octo/demo".to_string(), 3, t0 + TimeDelta::seconds(60));

		assert_eq!(cache.get("octo/demo", t0), Some(3));
		assert_eq!(cache.get("octo/demo", t0 + TimeDelta::seconds(59)), Some(3));
		assert_eq!(cache.get("octo/demo", t0 + TimeDelta::seconds(60)), None);
		assert!(cache.is_empty());
	}

	#[test]
	fn purge_keeps_live_entries() {
		let t0 = Utc::now();
		let mut cache = TtlCache::new();
		cache.insert("a", 1, t0 + TimeDelta::seconds(10));
		cache.insert("b", 2, t0 + TimeDelta::seconds(90));

		cache.purge_expired(t0 + TimeDelta::seconds(30));
		assert_eq!(cache.len(), 1);
		assert_eq!(cache.get("b", t0 + TimeDelta::seconds(30)), Some(2));
	}
}
