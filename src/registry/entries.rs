//! Entry list plus eviction ordering, always accessed under the registry lock.

// std
use std::num::NonZeroUsize;
// crates.io
use lru::LruCache;
// self
use crate::{_prelude::*, auth::Credential};

/// Resident credential with its bookkeeping.
#[derive(Debug)]
pub(crate) struct Slot {
	pub(crate) credential: Arc<Credential>,
	pub(crate) inserted_at: OffsetDateTime,
	pub(crate) last_access: OffsetDateTime,
}
impl Slot {
	pub(crate) fn is_expired_at(&self, instant: OffsetDateTime, max_age: Duration) -> bool {
		instant - self.inserted_at >= max_age
	}
}

/// Outcome of a lookup that may mutate bookkeeping.
#[derive(Debug)]
pub(crate) enum Lookup {
	Hit(Arc<Credential>),
	Expired,
	Missing,
}

/// Capacity-bound recency list; the tail (least recently promoted slot) is the next victim.
///
/// `push` places a slot at the head, so insertion order is preserved unless a lookup promotes.
pub(crate) struct Entries<K> {
	slots: LruCache<K, Slot>,
}
impl<K> Entries<K>
where
	K: Clone + Eq + Hash,
{
	pub(crate) fn new(max_size: usize) -> Self {
		let capacity = NonZeroUsize::new(max_size).unwrap_or(NonZeroUsize::MIN);

		Self { slots: LruCache::new(capacity) }
	}

	pub(crate) fn len(&self) -> usize {
		self.slots.len()
	}

	pub(crate) fn peek(&self, key: &K) -> Option<&Slot> {
		self.slots.peek(key)
	}

	/// Resolves `key`, dropping it when expired and promoting it to the head when `touch` is set.
	pub(crate) fn lookup(
		&mut self,
		key: &K,
		now: OffsetDateTime,
		max_age: Duration,
		touch: bool,
	) -> Lookup {
		let Some(slot) = self.slots.peek(key) else {
			return Lookup::Missing;
		};

		if slot.is_expired_at(now, max_age) {
			self.slots.pop(key);

			return Lookup::Expired;
		}
		if !touch {
			return Lookup::Hit(Arc::clone(&slot.credential));
		}

		match self.slots.get_mut(key) {
			Some(slot) => {
				slot.last_access = now;

				Lookup::Hit(Arc::clone(&slot.credential))
			},
			None => Lookup::Missing,
		}
	}

	/// Inserts or replaces `key` at the head; returns the tail slot evicted to make room, if any.
	///
	/// Replacing a resident key never evicts.
	pub(crate) fn insert(
		&mut self,
		key: K,
		credential: Arc<Credential>,
		now: OffsetDateTime,
	) -> Option<(K, Slot)> {
		let replacing = self.slots.contains(&key);
		let displaced =
			self.slots.push(key, Slot { credential, inserted_at: now, last_access: now });

		// On replacement `push` hands back the previous slot for the same key.
		if replacing { None } else { displaced }
	}

	pub(crate) fn remove(&mut self, key: &K) -> Option<Slot> {
		self.slots.pop(key)
	}

	/// Removes every entry that outlived `max_age`; returns how many were dropped.
	pub(crate) fn purge_expired(&mut self, now: OffsetDateTime, max_age: Duration) -> usize {
		let expired = self
			.slots
			.iter()
			.filter(|(_, slot)| slot.is_expired_at(now, max_age))
			.map(|(key, _)| key.clone())
			.collect::<Vec<_>>();

		for key in &expired {
			self.slots.pop(key);
		}

		expired.len()
	}

	pub(crate) fn clear(&mut self) {
		self.slots.clear();
	}

	#[cfg(test)]
	fn next_victim(&self) -> Option<&K> {
		self.slots.peek_lru().map(|(key, _)| key)
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;
	use crate::_preludet::credential_fixture;

	const MAX_AGE: Duration = Duration::minutes(10);

	fn shared(key_id: &str) -> Arc<Credential> {
		Arc::new(credential_fixture(key_id, &format!("bearer-{key_id}")))
	}

	#[test]
	fn replacement_moves_key_to_the_head() {
		let now = macros::datetime!(2025-01-01 00:00 UTC);
		let mut entries = Entries::new(3);

		entries.insert("a", shared("A"), now);
		entries.insert("b", shared("B"), now);

		assert_eq!(entries.next_victim(), Some(&"a"));
		assert!(entries.insert("a", shared("A2"), now).is_none());
		assert_eq!(entries.next_victim(), Some(&"b"));

		entries.remove(&"b");

		assert_eq!(entries.len(), 1);
		assert_eq!(entries.next_victim(), Some(&"a"));
	}

	#[test]
	fn replacement_at_capacity_evicts_nothing() {
		let now = macros::datetime!(2025-01-01 00:00 UTC);
		let mut entries = Entries::new(2);

		entries.insert("a", shared("A"), now);
		entries.insert("b", shared("B"), now);

		assert!(entries.insert("b", shared("B2"), now).is_none());
		assert_eq!(entries.len(), 2);
		assert!(entries.peek(&"a").is_some());
	}

	#[test]
	fn touch_promotes_entry() {
		let now = macros::datetime!(2025-01-01 00:00 UTC);
		let mut entries = Entries::new(2);

		entries.insert("a", shared("A"), now);
		entries.insert("b", shared("B"), now);

		assert!(matches!(entries.lookup(&"a", now, MAX_AGE, true), Lookup::Hit(_)));

		let (victim, _) = entries
			.insert("c", shared("C"), now)
			.expect("Inserting past capacity should evict an entry.");

		assert_eq!(victim, "b");
	}

	#[test]
	fn untouched_lookup_keeps_insertion_order() {
		let now = macros::datetime!(2025-01-01 00:00 UTC);
		let mut entries = Entries::new(2);

		entries.insert("a", shared("A"), now);
		entries.insert("b", shared("B"), now);

		assert!(matches!(entries.lookup(&"a", now, MAX_AGE, false), Lookup::Hit(_)));

		let (victim, _) = entries
			.insert("c", shared("C"), now)
			.expect("Inserting past capacity should evict an entry.");

		assert_eq!(victim, "a");
		assert_eq!(entries.len(), 2);
	}

	#[test]
	fn expired_lookup_removes_the_slot() {
		let start = macros::datetime!(2025-01-01 00:00 UTC);
		let mut entries = Entries::new(2);

		entries.insert("a", shared("A"), start);

		assert!(matches!(entries.lookup(&"a", start + MAX_AGE, MAX_AGE, true), Lookup::Expired));
		assert_eq!(entries.len(), 0);
		assert!(entries.next_victim().is_none());
		assert!(matches!(entries.lookup(&"a", start, MAX_AGE, true), Lookup::Missing));
	}

	#[test]
	fn purge_keeps_live_slots() {
		let start = macros::datetime!(2025-01-01 00:00 UTC);
		let mut entries = Entries::new(4);

		entries.insert("old", shared("OLD"), start);
		entries.insert("fresh", shared("FRESH"), start + Duration::minutes(5));

		assert_eq!(entries.purge_expired(start + Duration::minutes(11), MAX_AGE), 1);
		assert!(entries.peek(&"fresh").is_some());

		entries.clear();

		assert_eq!(entries.len(), 0);
	}
}
