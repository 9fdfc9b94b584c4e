//! Bounded, time-aware credential registry.
//!
//! [`Registry`] maps caller keys to shared [`Credential`]s. Every entry lives at most
//! [`RegistryConfig::max_age`] from its last `put`, and the registry never holds more than
//! [`RegistryConfig::max_size`] entries: an insert that would overflow first evicts exactly one
//! victim chosen by the configured [`EvictionPolicy`]. Expired entries are dropped lazily by the
//! next `get`/`put` that touches them, or in bulk by [`Registry::purge_expired`].
//!
//! A single `RwLock` guards the [`lru::LruCache`] holding the entries and their eviction order,
//! so each operation is atomic for its key and the last `put` to complete wins. Plain lookups
//! never create credentials; [`Registry::get_or_create`] is the explicit provisioning path that
//! consults the [`Factory`], serialized per key so concurrent misses invoke it once.

mod config;
mod entries;
mod factory;
mod metrics;

pub use config::*;
pub use factory::*;
pub use metrics::RegistryMetrics;

// self
use crate::{
	_prelude::*,
	auth::Credential,
	obs::RegistryEvent,
	registry::entries::{Entries, Lookup},
};

/// Point-in-time view of a resident entry.
#[derive(Clone, Debug)]
pub struct EntryInfo {
	/// Shared credential held by the entry.
	pub credential: Arc<Credential>,
	/// Instant of the last `put` for the key.
	pub inserted_at: OffsetDateTime,
	/// Instant of the last `put` or LRU lookup for the key.
	pub last_access: OffsetDateTime,
}

/// Concurrent bounded cache of credentials keyed by `K`.
pub struct Registry<K> {
	config: RegistryConfig,
	factory: Factory<K>,
	entries: RwLock<Entries<K>>,
	factory_guards: Mutex<HashMap<K, Arc<Mutex<()>>>>,
	metrics: RegistryMetrics,
}
impl<K> Registry<K>
where
	K: Clone + Eq + Hash,
{
	/// Creates an empty registry with the default factory.
	pub fn new(config: RegistryConfig) -> Self {
		let entries = RwLock::new(Entries::new(config.max_size));

		Self {
			config,
			factory: Factory::default(),
			entries,
			factory_guards: Default::default(),
			metrics: Default::default(),
		}
	}

	/// Replaces the factory consulted by [`Registry::get_or_create`].
	pub fn with_factory(mut self, factory: Factory<K>) -> Self {
		self.factory = factory;

		self
	}

	/// Configuration the registry was built with.
	pub fn config(&self) -> &RegistryConfig {
		&self.config
	}

	/// Activity counters.
	pub fn metrics(&self) -> &RegistryMetrics {
		&self.metrics
	}

	/// Returns the live credential for `key` using the current clock.
	pub fn get(&self, key: &K) -> Option<Arc<Credential>> {
		self.get_at(key, OffsetDateTime::now_utc())
	}

	/// Returns the live credential for `key` as observed at `now`.
	///
	/// Expired entries are removed and reported as a miss. Under
	/// [`EvictionPolicy::LeastRecentlyUsed`] a hit moves the entry to the back of the eviction
	/// order.
	pub fn get_at(&self, key: &K, now: OffsetDateTime) -> Option<Arc<Credential>> {
		let found = self.resolve(key, now);

		self.metrics.record(if found.is_some() { RegistryEvent::Hit } else { RegistryEvent::Miss });

		found
	}

	/// Inserts or replaces the credential for `key` using the current clock.
	pub fn put(&self, key: K, credential: impl Into<Arc<Credential>>) {
		self.put_at(key, credential, OffsetDateTime::now_utc());
	}

	/// Inserts or replaces the credential for `key`, stamping the entry with `now`.
	pub fn put_at(&self, key: K, credential: impl Into<Arc<Credential>>, now: OffsetDateTime) {
		let evicted = self.entries.write().insert(key, credential.into(), now);

		if evicted.is_some() {
			self.metrics.record(RegistryEvent::Evicted);
		}
	}

	/// Removes the entry for `key`, returning its credential if one was resident.
	pub fn remove(&self, key: &K) -> Option<Arc<Credential>> {
		self.entries.write().remove(key).map(|slot| slot.credential)
	}

	/// Returns the live credential or asks the factory for one using the current clock.
	pub fn get_or_create(&self, key: &K) -> Option<Arc<Credential>> {
		self.get_or_create_at(key, OffsetDateTime::now_utc())
	}

	/// Returns the live credential for `key`, or invokes the factory and inserts its result.
	///
	/// Concurrent callers missing on the same key wait on a per-key guard and observe the
	/// credential inserted by the first one, so the factory runs once per miss. Returns `None`
	/// when the factory declines.
	pub fn get_or_create_at(&self, key: &K, now: OffsetDateTime) -> Option<Arc<Credential>> {
		if let Some(found) = self.get_at(key, now) {
			return Some(found);
		}

		let guard = self.factory_guard(key);
		let created = {
			let _singleflight = guard.lock();

			match self.resolve(key, now) {
				Some(found) => Some(found),
				None => self.factory.create(key).map(|credential| {
					let credential = Arc::new(credential);

					self.metrics.record(RegistryEvent::Created);
					self.put_at(key.clone(), Arc::clone(&credential), now);

					credential
				}),
			}
		};

		self.release_factory_guard(key, guard);

		created
	}

	/// Returns `true` if `key` has a resident entry that is live at the current clock.
	pub fn contains_key(&self, key: &K) -> bool {
		let now = OffsetDateTime::now_utc();

		self.entries
			.read()
			.peek(key)
			.is_some_and(|slot| !slot.is_expired_at(now, self.config.max_age))
	}

	/// Bookkeeping snapshot for `key`, including expired entries not yet purged.
	pub fn entry_info(&self, key: &K) -> Option<EntryInfo> {
		self.entries.read().peek(key).map(|slot| EntryInfo {
			credential: Arc::clone(&slot.credential),
			inserted_at: slot.inserted_at,
			last_access: slot.last_access,
		})
	}

	/// Number of resident entries, including expired entries not yet purged.
	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	/// Returns `true` if no entries are resident.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Drops every entry that outlived `max_age` at the current clock.
	pub fn purge_expired(&self) -> usize {
		self.purge_expired_at(OffsetDateTime::now_utc())
	}

	/// Drops every entry that outlived `max_age` at `now`; returns how many were removed.
	pub fn purge_expired_at(&self, now: OffsetDateTime) -> usize {
		let purged = self.entries.write().purge_expired(now, self.config.max_age);

		for _ in 0..purged {
			self.metrics.record(RegistryEvent::Expired);
		}

		purged
	}

	/// Removes every entry.
	pub fn clear(&self) {
		self.entries.write().clear();
	}

	fn resolve(&self, key: &K, now: OffsetDateTime) -> Option<Arc<Credential>> {
		let max_age = self.config.max_age;
		let touch = match self.config.eviction {
			EvictionPolicy::LeastRecentlyUsed => true,
			EvictionPolicy::InsertionOrder => {
				let entries = self.entries.read();
				let slot = entries.peek(key)?;

				if !slot.is_expired_at(now, max_age) {
					return Some(Arc::clone(&slot.credential));
				}

				// Expired; the write path below drops it.
				false
			},
		};
		let lookup = self.entries.write().lookup(key, now, max_age, touch);

		match lookup {
			Lookup::Hit(credential) => Some(credential),
			Lookup::Expired => {
				self.metrics.record(RegistryEvent::Expired);

				None
			},
			Lookup::Missing => None,
		}
	}

	fn factory_guard(&self, key: &K) -> Arc<Mutex<()>> {
		let mut guards = self.factory_guards.lock();

		guards.entry(key.clone()).or_insert_with(|| Arc::new(Mutex::new(()))).clone()
	}

	fn release_factory_guard(&self, key: &K, guard: Arc<Mutex<()>>) {
		let mut guards = self.factory_guards.lock();

		// The map and `guard` hold the only references once no other caller is waiting.
		if guards.get(key).is_some_and(|current| Arc::ptr_eq(current, &guard))
			&& Arc::strong_count(&guard) == 2
		{
			guards.remove(key);
		}
	}
}
impl<K> Default for Registry<K>
where
	K: Clone + Eq + Hash,
{
	fn default() -> Self {
		Self::new(RegistryConfig::default())
	}
}
impl<K> Debug for Registry<K> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Registry")
			.field("config", &self.config)
			.field("factory", &self.factory)
			.field("metrics", &self.metrics)
			.finish()
	}
}
