//! Redacted wrapper for signed bearer material.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD_NO_PAD};
use sha2::{Digest, Sha256};
// self
use crate::_prelude::*;

/// Signed bearer value (for example a provider JWT) that never appears in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerSecret(String);
impl BearerSecret {
	/// Wraps a new bearer string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner bearer value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns `true` when no bearer material is present.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Base64 (no padding) SHA-256 digest of the bearer, safe to log.
	pub fn fingerprint(&self) -> String {
		STANDARD_NO_PAD.encode(Sha256::digest(self.0.as_bytes()))
	}
}
impl AsRef<str> for BearerSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for BearerSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("BearerSecret").field(&"<redacted>").finish()
	}
}
impl Display for BearerSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let secret = BearerSecret::new("eyJhbGciOiJFUzI1NiJ9.payload.signature");

		assert_eq!(format!("{secret:?}"), "BearerSecret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");
	}

	#[test]
	fn fingerprint_is_stable_and_hides_the_value() {
		let secret = BearerSecret::new("bearer-a");
		let fingerprint = secret.fingerprint();

		assert_eq!(fingerprint, BearerSecret::new("bearer-a").fingerprint());
		assert_ne!(fingerprint, BearerSecret::new("bearer-b").fingerprint());
		assert!(!fingerprint.contains("bearer-a"));
		// 32-byte digest, base64 without padding.
		assert_eq!(fingerprint.len(), 43);
	}
}
