//! Push client seam used by the dispatch facade.

// self
use crate::{_prelude::*, auth::Credential};

/// Boxed future returned by [`PushClient::send`].
pub type SendFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + 'a + Send>>;

/// Transport capable of delivering one notification with a given credential.
///
/// This is the dispatch facade's only dependency on the outside world: wire format, endpoint,
/// TLS, and connection pooling all live behind the implementation. The facade passes
/// `Some(token)` whenever the caller supplied a cancellation token so implementations can abort
/// in-flight I/O; it also races the returned future against that token, so an implementation
/// that ignores it still cannot delay a cancelled push.
pub trait PushClient
where
	Self: 'static + Send + Sync,
{
	/// Outbound request type.
	type Notification: Send;
	/// Successful response type.
	type Response: Send;
	/// Error reported by the transport; surfaced unchanged in
	/// [`Error::Transport`](crate::error::Error::Transport).
	type Error: 'static + Send + Sync + StdError;

	/// Sends `notification`, authorized by `credential`.
	fn send<'a>(
		&'a self,
		cancel: Option<&'a CancellationToken>,
		credential: &'a Credential,
		notification: Self::Notification,
	) -> SendFuture<'a, Self::Response, Self::Error>;
}
