//! Immutable push credential and its builder.

// self
use crate::{
	_prelude::*,
	auth::{IssuerId, KeyId, secret::BearerSecret},
};

/// Errors produced by [`CredentialBuilder`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum CredentialBuilderError {
	/// Issued when no signing key id was provided.
	#[error("Signing key id is required.")]
	MissingKeyId,
	/// Issued when no issuer was provided.
	#[error("Issuer is required.")]
	MissingIssuer,
	/// Issued when the bearer value is absent or empty.
	#[error("Bearer value is required.")]
	MissingBearer,
}

/// Short-lived signed credential authorizing requests to a push service.
///
/// Fields are private; a credential can only be produced by [`CredentialBuilder`] or a registry
/// [`Factory`](crate::registry::Factory) and never changes afterwards. The registry hands out
/// `Arc<Credential>` views.
#[derive(Clone)]
pub struct Credential {
	key_id: KeyId,
	issuer: IssuerId,
	bearer: BearerSecret,
	issued_at: OffsetDateTime,
	fingerprint_cache: OnceLock<String>,
}
impl Credential {
	/// Returns a builder for constructing credentials.
	pub fn builder() -> CredentialBuilder {
		CredentialBuilder::default()
	}

	/// Credential without key id, issuer, or bearer, stamped with the current clock.
	///
	/// Produced by the default registry factory.
	pub fn unsigned() -> Self {
		Self {
			key_id: KeyId::unset(),
			issuer: IssuerId::unset(),
			bearer: BearerSecret::new(String::new()),
			issued_at: OffsetDateTime::now_utc(),
			fingerprint_cache: OnceLock::new(),
		}
	}

	/// Signing key identifier.
	pub fn key_id(&self) -> &KeyId {
		&self.key_id
	}

	/// Identity that issued the credential.
	pub fn issuer(&self) -> &IssuerId {
		&self.issuer
	}

	/// Signed bearer material; callers must avoid logging the exposed value.
	pub fn bearer(&self) -> &BearerSecret {
		&self.bearer
	}

	/// Instant the credential was created.
	pub fn issued_at(&self) -> OffsetDateTime {
		self.issued_at
	}

	/// Returns `true` for credentials produced by [`Credential::unsigned`].
	pub fn is_unsigned(&self) -> bool {
		self.bearer.is_empty()
	}

	/// Age of the credential at the provided instant (negative if issued in the future).
	pub fn age_at(&self, instant: OffsetDateTime) -> Duration {
		instant - self.issued_at
	}

	/// Returns `true` once the credential is at least `ttl` old at the provided instant.
	pub fn is_expired_at(&self, instant: OffsetDateTime, ttl: Duration) -> bool {
		self.age_at(instant) >= ttl
	}

	/// Compares credentials by signing key id, the only identity used for caching.
	pub fn same_key(&self, other: &Self) -> bool {
		self.key_id == other.key_id
	}

	/// Stable, loggable digest of the bearer value, cached after the first call.
	pub fn fingerprint(&self) -> &str {
		self.fingerprint_cache.get_or_init(|| self.bearer.fingerprint())
	}
}
impl Debug for Credential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credential")
			.field("key_id", &self.key_id)
			.field("issuer", &self.issuer)
			.field("bearer", &"<redacted>")
			.field("issued_at", &self.issued_at)
			.finish()
	}
}

/// Builder for [`Credential`].
#[derive(Clone, Debug, Default)]
pub struct CredentialBuilder {
	key_id: Option<KeyId>,
	issuer: Option<IssuerId>,
	bearer: Option<BearerSecret>,
	issued_at: Option<OffsetDateTime>,
}
impl CredentialBuilder {
	/// Sets the signing key identifier.
	pub fn key_id(mut self, key_id: KeyId) -> Self {
		self.key_id = Some(key_id);

		self
	}

	/// Sets the issuing identity.
	pub fn issuer(mut self, issuer: IssuerId) -> Self {
		self.issuer = Some(issuer);

		self
	}

	/// Provides the signed bearer value.
	pub fn bearer(mut self, bearer: impl Into<String>) -> Self {
		self.bearer = Some(BearerSecret::new(bearer));

		self
	}

	/// Sets the creation instant.
	pub fn issued_at(mut self, instant: OffsetDateTime) -> Self {
		self.issued_at = Some(instant);

		self
	}

	/// Convenience helper that stamps `issued_at` with the current clock.
	pub fn issued_now(self) -> Self {
		self.issued_at(OffsetDateTime::now_utc())
	}

	/// Consumes the builder and produces a [`Credential`].
	pub fn build(self) -> Result<Credential, CredentialBuilderError> {
		let key_id = self.key_id.ok_or(CredentialBuilderError::MissingKeyId)?;
		let issuer = self.issuer.ok_or(CredentialBuilderError::MissingIssuer)?;
		let bearer = self
			.bearer
			.filter(|bearer| !bearer.is_empty())
			.ok_or(CredentialBuilderError::MissingBearer)?;

		Ok(Credential {
			key_id,
			issuer,
			bearer,
			issued_at: self.issued_at.unwrap_or_else(OffsetDateTime::now_utc),
			fingerprint_cache: OnceLock::new(),
		})
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	fn key(value: &str) -> KeyId {
		KeyId::new(value).expect("Key id fixture should be valid.")
	}

	fn issuer() -> IssuerId {
		IssuerId::new("TEAM123456").expect("Issuer fixture should be valid.")
	}

	#[test]
	fn builder_requires_every_component() {
		assert_eq!(
			Credential::builder().issuer(issuer()).bearer("jwt").build().map(|_| ()),
			Err(CredentialBuilderError::MissingKeyId)
		);
		assert_eq!(
			Credential::builder().key_id(key("KEY1")).bearer("jwt").build().map(|_| ()),
			Err(CredentialBuilderError::MissingIssuer)
		);
		assert_eq!(
			Credential::builder().key_id(key("KEY1")).issuer(issuer()).bearer("").build().map(|_| ()),
			Err(CredentialBuilderError::MissingBearer)
		);
	}

	#[test]
	fn expiry_is_measured_from_issued_at() {
		let credential = Credential::builder()
			.key_id(key("KEY1"))
			.issuer(issuer())
			.bearer("jwt")
			.issued_at(macros::datetime!(2025-01-01 00:00 UTC))
			.build()
			.expect("Credential builder should succeed.");
		let ttl = Duration::minutes(50);

		assert_eq!(credential.age_at(macros::datetime!(2025-01-01 00:10 UTC)), Duration::minutes(10));
		assert!(!credential.is_expired_at(macros::datetime!(2025-01-01 00:49 UTC), ttl));
		assert!(credential.is_expired_at(macros::datetime!(2025-01-01 00:50 UTC), ttl));
	}

	#[test]
	fn identity_is_by_key_id() {
		let first = Credential::builder()
			.key_id(key("KEY1"))
			.issuer(issuer())
			.bearer("jwt-a")
			.build()
			.expect("First credential should build.");
		let rotated = Credential::builder()
			.key_id(key("KEY1"))
			.issuer(issuer())
			.bearer("jwt-b")
			.build()
			.expect("Rotated credential should build.");
		let other = Credential::builder()
			.key_id(key("KEY2"))
			.issuer(issuer())
			.bearer("jwt-a")
			.build()
			.expect("Other credential should build.");

		assert!(first.same_key(&rotated));
		assert!(!first.same_key(&other));
		assert_ne!(first.fingerprint(), rotated.fingerprint());
		assert_eq!(first.fingerprint(), other.fingerprint());
	}

	#[test]
	fn debug_output_redacts_bearer() {
		let credential = Credential::builder()
			.key_id(key("KEY1"))
			.issuer(issuer())
			.bearer("very-secret-jwt")
			.build()
			.expect("Credential builder should succeed.");
		let rendered = format!("{credential:?}");

		assert!(rendered.contains("<redacted>"));
		assert!(!rendered.contains("very-secret-jwt"));
	}

	#[test]
	fn unsigned_credentials_have_no_material() {
		let credential = Credential::unsigned();

		assert!(credential.is_unsigned());
		assert!(credential.key_id().is_unset());
		assert!(credential.issuer().is_unset());
	}
}
