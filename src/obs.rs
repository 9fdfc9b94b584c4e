//! Optional observability helpers for dispatch and registry activity.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to wrap pushes in spans named `push_token_broker.dispatch` with the `op`
//!   and `stage` fields, and to emit debug events when the registry evicts or expires entries.
//! - Enable `metrics` to increment `push_token_broker_dispatch_total` (labeled by `op` +
//!   `outcome`) and `push_token_broker_registry_total` (labeled by `event`).

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Dispatch operations observed by the facade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DispatchOp {
	/// Push without a cancellation token.
	Push,
	/// Push raced against a cancellation token.
	PushWithCancellation,
}
impl DispatchOp {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			DispatchOp::Push => "push",
			DispatchOp::PushWithCancellation => "push_with_cancellation",
		}
	}
}
impl Display for DispatchOp {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each push.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DispatchOutcome {
	/// Entry to a dispatch helper.
	Attempt,
	/// The push client returned a response.
	Success,
	/// No credential was registered for the key.
	CredentialNotFound,
	/// The cancellation token fired first.
	Cancelled,
	/// The push client returned an error.
	Failure,
}
impl DispatchOutcome {
	/// Classifies a finished dispatch.
	pub fn of<T, E>(result: &Result<T, Error<E>>) -> Self {
		match result {
			Ok(_) => DispatchOutcome::Success,
			Err(Error::CredentialNotFound) => DispatchOutcome::CredentialNotFound,
			Err(Error::Cancelled) => DispatchOutcome::Cancelled,
			Err(Error::Transport(_)) => DispatchOutcome::Failure,
		}
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			DispatchOutcome::Attempt => "attempt",
			DispatchOutcome::Success => "success",
			DispatchOutcome::CredentialNotFound => "credential_not_found",
			DispatchOutcome::Cancelled => "cancelled",
			DispatchOutcome::Failure => "failure",
		}
	}
}
impl Display for DispatchOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Registry events counted by [`RegistryMetrics`](crate::registry::RegistryMetrics).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegistryEvent {
	/// Lookup returned a live credential.
	Hit,
	/// Lookup found nothing usable.
	Miss,
	/// An entry was dropped for outliving `max_age`.
	Expired,
	/// An entry was dropped to respect `max_size`.
	Evicted,
	/// The factory produced a credential.
	Created,
}
impl RegistryEvent {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RegistryEvent::Hit => "hit",
			RegistryEvent::Miss => "miss",
			RegistryEvent::Expired => "expired",
			RegistryEvent::Evicted => "evicted",
			RegistryEvent::Created => "created",
		}
	}
}
impl Display for RegistryEvent {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_preludet::TestRejection;

	#[test]
	fn outcomes_follow_error_variants() {
		let ok: Result<(), Error<TestRejection>> = Ok(());
		let missing: Result<(), Error<TestRejection>> = Err(Error::CredentialNotFound);
		let cancelled: Result<(), Error<TestRejection>> = Err(Error::Cancelled);
		let failed: Result<(), Error<TestRejection>> =
			Err(Error::Transport(TestRejection { status: 410, reason: "Unregistered".into() }));

		assert_eq!(DispatchOutcome::of(&ok), DispatchOutcome::Success);
		assert_eq!(DispatchOutcome::of(&missing).as_str(), "credential_not_found");
		assert_eq!(DispatchOutcome::of(&cancelled), DispatchOutcome::Cancelled);
		assert_eq!(DispatchOutcome::of(&failed), DispatchOutcome::Failure);
	}
}
