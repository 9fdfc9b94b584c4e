//! Concurrency-safe push credential registry: a bounded LRU/TTL token cache with pluggable
//! factories, plus a cancellable dispatch facade that hands cached credentials to any push client.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod dispatch;
pub mod error;
pub mod obs;
pub mod registry;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for tests; enabled via `cfg(test)` or the `test` crate
	//! feature.

	pub use crate::_prelude::*;

	// std
	use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
	// self
	use crate::{
		auth::{Credential, IssuerId, KeyId},
		dispatch::{PushClient, SendFuture},
	};

	/// Notification payload understood by [`RecordingClient`].
	#[derive(Clone, Debug, PartialEq, Eq)]
	pub struct TestNotification {
		/// Device token the notification is addressed to.
		pub device_token: String,
		/// Raw JSON payload.
		pub payload: String,
	}
	impl TestNotification {
		/// Creates a notification for the provided device.
		pub fn new(device_token: impl Into<String>, payload: impl Into<String>) -> Self {
			Self { device_token: device_token.into(), payload: payload.into() }
		}
	}

	/// Response produced by [`RecordingClient`] for accepted notifications.
	#[derive(Clone, Debug, PartialEq, Eq)]
	pub struct TestResponse {
		/// Status code reported by the fake push service.
		pub status: u16,
		/// Key id of the credential that authorized the send.
		pub key_id: String,
		/// Device token the notification was delivered to.
		pub device_token: String,
	}

	/// Rejection reported by [`RecordingClient`] in [`TestClientMode::Reject`].
	#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
	#[error("Push service rejected the notification with status {status}: {reason}.")]
	pub struct TestRejection {
		/// Status code reported by the fake push service.
		pub status: u16,
		/// Reason string reported by the fake push service.
		pub reason: String,
	}

	/// Behavior of [`RecordingClient::send`].
	#[derive(Clone, Debug)]
	pub enum TestClientMode {
		/// Accept every notification with status 200.
		Accept,
		/// Reject every notification with the given status and reason.
		Reject {
			/// Status code reported by the fake push service.
			status: u16,
			/// Reason string reported by the fake push service.
			reason: String,
		},
		/// Never complete; only cancellation can end the call.
		Stall,
	}

	/// [`PushClient`] double that records every invocation.
	#[derive(Debug)]
	pub struct RecordingClient {
		mode: TestClientMode,
		calls: AtomicUsize,
		saw_cancellation_token: AtomicBool,
		bearers: Mutex<Vec<String>>,
	}
	impl RecordingClient {
		/// Creates a client with the provided behavior.
		pub fn new(mode: TestClientMode) -> Self {
			Self {
				mode,
				calls: AtomicUsize::new(0),
				saw_cancellation_token: AtomicBool::new(false),
				bearers: Mutex::new(Vec::new()),
			}
		}

		/// Number of times [`PushClient::send`] was invoked.
		pub fn calls(&self) -> usize {
			self.calls.load(Ordering::SeqCst)
		}

		/// Returns `true` if any invocation carried a cancellation token.
		pub fn saw_cancellation_token(&self) -> bool {
			self.saw_cancellation_token.load(Ordering::SeqCst)
		}

		/// Bearer values observed so far, in call order.
		pub fn bearers(&self) -> Vec<String> {
			self.bearers.lock().clone()
		}
	}
	impl PushClient for RecordingClient {
		type Error = TestRejection;
		type Notification = TestNotification;
		type Response = TestResponse;

		fn send<'a>(
			&'a self,
			cancel: Option<&'a CancellationToken>,
			credential: &'a Credential,
			notification: Self::Notification,
		) -> SendFuture<'a, Self::Response, Self::Error> {
			self.calls.fetch_add(1, Ordering::SeqCst);

			if cancel.is_some() {
				self.saw_cancellation_token.store(true, Ordering::SeqCst);
			}

			self.bearers.lock().push(credential.bearer().expose().to_owned());

			let key_id = credential.key_id().to_string();

			Box::pin(async move {
				match &self.mode {
					TestClientMode::Accept => Ok(TestResponse {
						status: 200,
						key_id,
						device_token: notification.device_token,
					}),
					TestClientMode::Reject { status, reason } =>
						Err(TestRejection { status: *status, reason: reason.clone() }),
					TestClientMode::Stall => std::future::pending().await,
				}
			})
		}
	}

	/// Builds a credential fixture for the provided key id.
	pub fn credential_fixture(key_id: &str, bearer: &str) -> Credential {
		Credential::builder()
			.key_id(KeyId::new(key_id).expect("Key id fixture should be valid."))
			.issuer(IssuerId::new("TEAM123456").expect("Issuer fixture should be valid."))
			.bearer(bearer)
			.build()
			.expect("Credential fixture should build successfully.")
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		hash::Hash,
		pin::Pin,
		str::FromStr,
		sync::{Arc, OnceLock},
	};

	pub use parking_lot::{Mutex, RwLock};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use tokio_util::sync::CancellationToken;

	pub use crate::error::Error;
}

pub use tokio_util::sync::CancellationToken;
#[cfg(test)] use {color_eyre as _, serde_json as _};
