//! Registry bounds and eviction policy.

// self
use crate::{_prelude::*, error::ConfigError};

/// Order used to pick the victim when an insert would exceed `max_size`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionPolicy {
	/// Evict the entry whose last `get` or `put` is the oldest.
	#[default]
	LeastRecentlyUsed,
	/// Evict the entry whose last `put` is the oldest; lookups do not reorder entries.
	InsertionOrder,
}
impl EvictionPolicy {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			EvictionPolicy::LeastRecentlyUsed => "least_recently_used",
			EvictionPolicy::InsertionOrder => "insertion_order",
		}
	}
}
impl Display for EvictionPolicy {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Validated registry configuration.
///
/// Deserialization goes through [`RegistryConfigBuilder`], so omitted fields take their defaults
/// and invalid bounds are rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RegistryConfigBuilder")]
pub struct RegistryConfig {
	/// Upper bound on resident entries.
	pub max_size: usize,
	/// Time-to-live per entry, measured from its last `put`.
	pub max_age: Duration,
	/// Victim selection order for size eviction.
	pub eviction: EvictionPolicy,
}
impl RegistryConfig {
	/// Default upper bound on resident entries.
	pub const DEFAULT_MAX_SIZE: usize = 64;
	/// Default time-to-live per entry.
	pub const DEFAULT_MAX_AGE: Duration = Duration::minutes(10);

	/// Returns a builder seeded with the defaults.
	pub fn builder() -> RegistryConfigBuilder {
		RegistryConfigBuilder::default()
	}
}
impl Default for RegistryConfig {
	fn default() -> Self {
		Self {
			max_size: Self::DEFAULT_MAX_SIZE,
			max_age: Self::DEFAULT_MAX_AGE,
			eviction: EvictionPolicy::default(),
		}
	}
}
impl TryFrom<RegistryConfigBuilder> for RegistryConfig {
	type Error = ConfigError;

	fn try_from(builder: RegistryConfigBuilder) -> Result<Self, Self::Error> {
		builder.build()
	}
}

/// Builder for [`RegistryConfig`] values.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RegistryConfigBuilder {
	/// Upper bound on resident entries.
	pub max_size: usize,
	/// Time-to-live per entry.
	pub max_age: Duration,
	/// Victim selection order for size eviction.
	pub eviction: EvictionPolicy,
}
impl RegistryConfigBuilder {
	/// Sets the upper bound on resident entries.
	pub fn max_size(mut self, max_size: usize) -> Self {
		self.max_size = max_size;

		self
	}

	/// Sets the time-to-live per entry.
	pub fn max_age(mut self, max_age: Duration) -> Self {
		self.max_age = max_age;

		self
	}

	/// Sets the eviction policy.
	pub fn eviction(mut self, eviction: EvictionPolicy) -> Self {
		self.eviction = eviction;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<RegistryConfig, ConfigError> {
		if self.max_size == 0 {
			return Err(ConfigError::ZeroCapacity);
		}
		if !self.max_age.is_positive() {
			return Err(ConfigError::NonPositiveMaxAge { max_age: self.max_age });
		}

		Ok(RegistryConfig { max_size: self.max_size, max_age: self.max_age, eviction: self.eviction })
	}
}
impl Default for RegistryConfigBuilder {
	fn default() -> Self {
		let defaults = RegistryConfig::default();

		Self { max_size: defaults.max_size, max_age: defaults.max_age, eviction: defaults.eviction }
	}
}
