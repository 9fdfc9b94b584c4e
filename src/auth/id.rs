//! Strongly typed identifiers carried by push credentials.
//!
//! Only the shape is validated: non-empty, no whitespace, at most 128 bytes. Providers differ in
//! their exact formats, so APNs-style 10-character ids are not enforced.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new identifier after validation.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				let view = value.as_ref();

				validate_view($kind, view)?;

				Ok(Self(view.to_owned()))
			}

			/// Placeholder used by unsigned credentials; never passes validation.
			pub(crate) fn unset() -> Self {
				Self(String::new())
			}

			/// Returns `true` for the placeholder produced by unsigned credentials.
			pub fn is_unset(&self) -> bool {
				self.0.is_empty()
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				validate_view($kind, &value)?;

				Ok(Self(value))
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
	};
}

const IDENTIFIER_MAX_LEN: usize = 128;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (key, issuer).
		kind: &'static str,
	},
	/// The identifier contains whitespace characters.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Kind of identifier (key, issuer).
		kind: &'static str,
	},
	/// The identifier exceeded the allowed character count.
	#[error("{kind} identifier exceeds {max} characters.")]
	TooLong {
		/// Kind of identifier (key, issuer).
		kind: &'static str,
		/// Maximum permitted character count.
		max: usize,
	},
}

def_id! {
	KeyId,
	"Id of the signing key behind a provider token, such as the 10-character APNs key id placed \
	in the JWT `kid` header.",
	"Key"
}
def_id! {
	IssuerId,
	"Account that signed a provider token, such as the APNs team id carried in the JWT `iss` \
	claim.",
	"Issuer"
}

fn validate_view(kind: &'static str, view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace { kind });
	}
	if view.len() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { kind, max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn identifiers_reject_whitespace_and_empty_values() {
		assert!(KeyId::new(" ABC123DEFG").is_err(), "Leading whitespace must be rejected.");
		assert!(KeyId::new("ABC123DEFG ").is_err(), "Trailing whitespace must be rejected.");
		assert_eq!(IssuerId::new(""), Err(IdentifierError::Empty { kind: "Issuer" }));

		let key = KeyId::new("ABC123DEFG").expect("Key id fixture should be considered valid.");

		assert_eq!(key.as_ref(), "ABC123DEFG");
		assert_eq!(format!("{key:?}"), "Key(ABC123DEFG)");
	}

	#[test]
	fn apns_key_and_team_ids_are_accepted() {
		let key = KeyId::new("2X9R4HXF34").expect("APNs key id should be valid.");
		let team = IssuerId::new("DEF123GHIJ").expect("APNs team id should be valid.");

		assert_eq!(key.len(), 10);
		assert_eq!(team.to_string(), "DEF123GHIJ");
		assert_eq!(
			"2X9R4HXF34 ".parse::<KeyId>(),
			Err(IdentifierError::ContainsWhitespace { kind: "Key" })
		);
	}

	#[test]
	fn serde_enforces_validation() {
		let key: KeyId = serde_json::from_str("\"2X9R4HXF34\"")
			.expect("Key id should deserialize successfully.");

		assert_eq!(key.as_ref(), "2X9R4HXF34");
		assert!(serde_json::from_str::<KeyId>("\"with space\"").is_err());
		assert!(serde_json::from_str::<IssuerId>("\"\"").is_err());
	}

	#[test]
	fn length_limit_is_inclusive() {
		let exact = "a".repeat(IDENTIFIER_MAX_LEN);

		IssuerId::new(&exact).expect("Exact length should succeed.");

		let too_long = "a".repeat(IDENTIFIER_MAX_LEN + 1);

		assert_eq!(
			IssuerId::new(&too_long),
			Err(IdentifierError::TooLong { kind: "Issuer", max: IDENTIFIER_MAX_LEN })
		);
	}

	#[test]
	fn unset_placeholder_is_distinguishable() {
		assert!(KeyId::unset().is_unset());
		assert!(!KeyId::new("KEY").expect("Key id fixture should be valid.").is_unset());
	}
}
