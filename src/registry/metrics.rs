// std
use std::sync::atomic::{AtomicU64, Ordering};
// self
use crate::obs::{self, RegistryEvent};

/// Thread-safe counters for registry activity.
#[derive(Debug, Default)]
pub struct RegistryMetrics {
	hits: AtomicU64,
	misses: AtomicU64,
	expirations: AtomicU64,
	evictions: AtomicU64,
	created: AtomicU64,
}
impl RegistryMetrics {
	/// Returns the number of lookups that found a live credential.
	pub fn hits(&self) -> u64 {
		self.hits.load(Ordering::Relaxed)
	}

	/// Returns the number of lookups that found nothing usable (including expired entries).
	pub fn misses(&self) -> u64 {
		self.misses.load(Ordering::Relaxed)
	}

	/// Returns the number of entries dropped because they outlived `max_age`.
	pub fn expirations(&self) -> u64 {
		self.expirations.load(Ordering::Relaxed)
	}

	/// Returns the number of entries dropped to respect `max_size`.
	pub fn evictions(&self) -> u64 {
		self.evictions.load(Ordering::Relaxed)
	}

	/// Returns the number of credentials produced by the factory.
	pub fn created(&self) -> u64 {
		self.created.load(Ordering::Relaxed)
	}

	pub(crate) fn record(&self, event: RegistryEvent) {
		let counter = match event {
			RegistryEvent::Hit => &self.hits,
			RegistryEvent::Miss => &self.misses,
			RegistryEvent::Expired => &self.expirations,
			RegistryEvent::Evicted => &self.evictions,
			RegistryEvent::Created => &self.created,
		};

		counter.fetch_add(1, Ordering::Relaxed);
		obs::record_registry_event(event);
	}
}
