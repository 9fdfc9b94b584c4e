//! Error types shared by the registry and the dispatch facade.
//!
//! Transport failures are owned by each [`PushClient`](crate::dispatch::PushClient)
//! implementation and travel through [`Error::Transport`] untouched.

// self
use crate::_prelude::*;

/// Canonical dispatch error exposed by public APIs.
///
/// `E` is the push client's own error type; it is carried as-is in [`Error::Transport`] so callers
/// can match on the transport's failure without downcasting.
#[derive(Debug, ThisError)]
pub enum Error<E> {
	/// No live credential is registered for the requested key.
	#[error("No credential is registered for the requested key.")]
	CredentialNotFound,
	/// The cancellation token fired before the push client completed.
	#[error("Push was cancelled before the client completed.")]
	Cancelled,
	/// Failure reported by the push client.
	#[error(transparent)]
	Transport(E),
}
impl<E> Error<E> {
	/// Returns `true` for [`Error::CredentialNotFound`].
	pub fn is_credential_not_found(&self) -> bool {
		matches!(self, Self::CredentialNotFound)
	}

	/// Returns `true` for [`Error::Cancelled`].
	pub fn is_cancelled(&self) -> bool {
		matches!(self, Self::Cancelled)
	}

	/// Borrows the push client's error, if this is a transport failure.
	pub fn transport(&self) -> Option<&E> {
		match self {
			Self::Transport(inner) => Some(inner),
			_ => None,
		}
	}

	/// Consumes the error and returns the push client's error, if any.
	pub fn into_transport(self) -> Option<E> {
		match self {
			Self::Transport(inner) => Some(inner),
			_ => None,
		}
	}
}

/// Configuration and validation failures raised while building a registry.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ConfigError {
	/// The registry must be able to hold at least one credential.
	#[error("Registry max_size must be at least 1.")]
	ZeroCapacity,
	/// Entries must live for a positive duration.
	#[error("Registry max_age must be positive, got {max_age}.")]
	NonPositiveMaxAge {
		/// Rejected duration.
		max_age: Duration,
	},
}

#[cfg(test)]
mod tests {
	// std
	use std::io::{Error as IoError, ErrorKind};
	// self
	use super::*;

	#[test]
	fn transport_errors_pass_through_unchanged() {
		let error = Error::Transport(IoError::new(ErrorKind::ConnectionReset, "stream reset by APNs"));

		assert_eq!(error.to_string(), "stream reset by APNs");
		assert!(!error.is_cancelled());
		assert!(!error.is_credential_not_found());
		assert_eq!(error.transport().map(IoError::kind), Some(ErrorKind::ConnectionReset));
		assert!(matches!(error.into_transport(), Some(inner) if inner.kind() == ErrorKind::ConnectionReset));
	}

	#[test]
	fn dispatch_variants_are_distinguishable() {
		let cancelled = <Error<IoError>>::Cancelled;
		let missing = <Error<IoError>>::CredentialNotFound;

		assert!(cancelled.is_cancelled());
		assert!(missing.is_credential_not_found());
		assert!(cancelled.transport().is_none());
		assert!(missing.into_transport().is_none());
	}

	#[test]
	fn config_errors_render_the_rejected_value() {
		let error = ConfigError::NonPositiveMaxAge { max_age: Duration::ZERO };

		assert_eq!(error.to_string(), "Registry max_age must be positive, got 0s.");
		assert_eq!(ConfigError::ZeroCapacity.to_string(), "Registry max_size must be at least 1.");
	}
}
