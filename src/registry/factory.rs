//! On-miss credential creation hook.

// self
use crate::{_prelude::*, auth::Credential};

type FactoryFn<K> = dyn Fn(&K) -> Option<Credential> + Send + Sync;

/// Pluggable function that synthesizes a credential for a key missing from the registry.
///
/// Returning `None` declines creation; the registry then reports a miss. The default factory
/// yields [`Credential::unsigned`] for every key.
pub struct Factory<K>(Arc<FactoryFn<K>>);
impl<K> Factory<K> {
	/// Wraps a creation function.
	pub fn new<F>(f: F) -> Self
	where
		F: 'static + Fn(&K) -> Option<Credential> + Send + Sync,
	{
		Self(Arc::new(f))
	}

	/// Factory that never creates credentials, leaving provisioning to explicit `put` calls.
	pub fn declining() -> Self {
		Self::new(|_| None)
	}

	/// Invokes the factory for `key`.
	pub fn create(&self, key: &K) -> Option<Credential> {
		(self.0)(key)
	}
}
impl<K> Clone for Factory<K> {
	fn clone(&self) -> Self {
		Self(Arc::clone(&self.0))
	}
}
impl<K> Default for Factory<K> {
	fn default() -> Self {
		Self::new(|_| Some(Credential::unsigned()))
	}
}
impl<K> Debug for Factory<K> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("Factory(..)")
	}
}
