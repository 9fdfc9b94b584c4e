//! Dispatch facade that resolves credentials and forwards notifications to a push client.

mod client;

pub use client::*;

// self
use crate::{
	_prelude::*,
	auth::Credential,
	obs::{self, DispatchOp, DispatchOutcome, DispatchSpan},
	registry::Registry,
};

/// Resolves a key to a cached [`Credential`] and hands the notification to a [`PushClient`].
///
/// The dispatcher never provisions credentials: a key missing from the registry fails with
/// [`Error::CredentialNotFound`] before the client is contacted. Populate the registry through
/// [`Registry::put`] or [`Registry::get_or_create`] instead. Client errors are returned as
/// [`Error::Transport`] without retries.
pub struct Dispatcher<K, C>
where
	C: ?Sized + PushClient,
{
	registry: Arc<Registry<K>>,
	client: Arc<C>,
}
impl<K, C> Dispatcher<K, C>
where
	K: Clone + Eq + Hash + Send + Sync,
	C: ?Sized + PushClient,
{
	/// Creates a dispatcher over a shared registry and client.
	pub fn new(registry: impl Into<Arc<Registry<K>>>, client: impl Into<Arc<C>>) -> Self {
		Self { registry: registry.into(), client: client.into() }
	}

	/// Registry consulted for every push.
	pub fn registry(&self) -> &Arc<Registry<K>> {
		&self.registry
	}

	/// Client used to deliver notifications.
	pub fn client(&self) -> &Arc<C> {
		&self.client
	}

	/// Sends `notification` with the credential registered for `key`, waiting for the client
	/// without a cancellation token.
	pub async fn push(
		&self,
		key: &K,
		notification: C::Notification,
	) -> Result<C::Response, Error<C::Error>> {
		const OP: DispatchOp = DispatchOp::Push;

		let span = DispatchSpan::new(OP, "push");

		obs::record_dispatch_outcome(OP, DispatchOutcome::Attempt);

		let result = span
			.instrument(async move {
				let credential = self.resolve(key)?;

				self.client.send(None, &credential, notification).await.map_err(Error::Transport)
			})
			.await;

		obs::record_dispatch_outcome(OP, DispatchOutcome::of(&result));

		result
	}

	/// Sends `notification` like [`Dispatcher::push`], aborting with [`Error::Cancelled`] as soon
	/// as `cancel` fires.
	///
	/// A missing credential is reported before the token is consulted. An already-cancelled
	/// token returns immediately without invoking the client.
	pub async fn push_with_cancellation(
		&self,
		cancel: &CancellationToken,
		key: &K,
		notification: C::Notification,
	) -> Result<C::Response, Error<C::Error>> {
		const OP: DispatchOp = DispatchOp::PushWithCancellation;

		let span = DispatchSpan::new(OP, "push_with_cancellation");

		obs::record_dispatch_outcome(OP, DispatchOutcome::Attempt);

		let result = span
			.instrument(async move {
				let credential = self.resolve(key)?;

				if cancel.is_cancelled() {
					return Err(Error::Cancelled);
				}

				match cancel
					.run_until_cancelled(self.client.send(Some(cancel), &credential, notification))
					.await
				{
					Some(sent) => sent.map_err(Error::Transport),
					None => Err(Error::Cancelled),
				}
			})
			.await;

		obs::record_dispatch_outcome(OP, DispatchOutcome::of(&result));

		result
	}

	fn resolve(&self, key: &K) -> Result<Arc<Credential>, Error<C::Error>> {
		self.registry.get(key).ok_or(Error::CredentialNotFound)
	}
}
impl<K, C> Clone for Dispatcher<K, C>
where
	C: ?Sized + PushClient,
{
	fn clone(&self) -> Self {
		Self { registry: Arc::clone(&self.registry), client: Arc::clone(&self.client) }
	}
}
impl<K, C> Debug for Dispatcher<K, C>
where
	C: ?Sized + PushClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Dispatcher").field("registry", &self.registry).finish()
	}
}
