//! Demonstrates wiring a custom push client into the dispatcher.
//!
//! 1. Implement [`PushClient`] for a transport that signs requests with the resolved credential.
//! 2. Build a [`Registry`] with a [`Factory`] that mints credentials for known teams.
//! 3. Provision credentials explicitly, then hand the registry and client to a [`Dispatcher`].
//! 4. Observe how missing credentials, transport rejections, and cancellation are reported.

// std
use std::{
	fmt::{Display, Formatter, Result as FmtResult},
	sync::Arc,
	time::Duration as StdDuration,
};
// crates.io
use color_eyre::Result;
use time::Duration;
// self
use push_token_broker::{
	CancellationToken,
	auth::{Credential, IssuerId, KeyId},
	dispatch::{Dispatcher, PushClient, SendFuture},
	error::Error,
	registry::{EvictionPolicy, Factory, Registry, RegistryConfig},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let factory = Factory::new(|team: &String| {
		if team.as_str() == "unknown-team" {
			return None;
		}

		Credential::builder()
			.key_id(KeyId::new(format!("{}-KEY", team.to_uppercase())).ok()?)
			.issuer(IssuerId::new("TEAM123456").ok()?)
			.bearer(format!("signed-for-{team}"))
			.build()
			.ok()
	});
	let config = RegistryConfig::builder()
		.max_size(16)
		.max_age(Duration::minutes(50))
		.eviction(EvictionPolicy::LeastRecentlyUsed)
		.build()?;
	let registry = Arc::new(Registry::new(config).with_factory(factory));
	let dispatcher: Dispatcher<String, DemoClient> =
		Dispatcher::new(Arc::clone(&registry), DemoClient);
	let team = "acme".to_owned();

	if registry.get_or_create(&team).is_none() {
		println!("The factory declined to provision a credential for {team}.");
	}

	let response = dispatcher.push(&team, DemoNotification::new("device-7f3a", "hello")).await?;

	println!("Delivered with status {} using key {}.", response.status, response.key_id);

	match dispatcher.push(&"unknown-team".to_owned(), DemoNotification::new("device-1", "hi")).await
	{
		Ok(_) => println!("Push unexpectedly found a credential."),
		Err(e) => println!("Dispatcher refused to push: {e}"),
	}

	match dispatcher.push(&team, DemoNotification::new("", "no device")).await {
		Ok(_) => println!("Push service unexpectedly accepted an empty device token."),
		Err(Error::Transport(e)) => println!("Push service rejected the request: {e}"),
		Err(e) => println!("Unexpected dispatch failure: {e}"),
	}

	let cancel = CancellationToken::new();
	let trigger = cancel.clone();

	tokio::spawn(async move {
		tokio::time::sleep(StdDuration::from_millis(50)).await;
		trigger.cancel();
	});

	match dispatcher
		.push_with_cancellation(&cancel, &team, DemoNotification::new("device-slow", "stalled"))
		.await
	{
		Ok(_) => println!("Slow push completed before cancellation."),
		Err(e) => println!("Slow push aborted: {e}"),
	}

	println!(
		"Registry holds {} credential(s); hits={}, misses={}, created={}.",
		registry.len(),
		registry.metrics().hits(),
		registry.metrics().misses(),
		registry.metrics().created(),
	);

	Ok(())
}

#[derive(Debug)]
struct DemoNotification {
	device_token: String,
	body: String,
}
impl DemoNotification {
	fn new(device_token: impl Into<String>, body: impl Into<String>) -> Self {
		Self { device_token: device_token.into(), body: body.into() }
	}
}

#[derive(Debug)]
struct DemoResponse {
	status: u16,
	key_id: String,
}

#[derive(Debug)]
enum DemoError {
	BadDeviceToken,
}
impl Display for DemoError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::BadDeviceToken => write!(f, "400 BadDeviceToken"),
		}
	}
}
impl std::error::Error for DemoError {}

#[derive(Debug)]
struct DemoClient;
impl PushClient for DemoClient {
	type Error = DemoError;
	type Notification = DemoNotification;
	type Response = DemoResponse;

	fn send<'a>(
		&'a self,
		cancel: Option<&'a CancellationToken>,
		credential: &'a Credential,
		notification: Self::Notification,
	) -> SendFuture<'a, Self::Response, Self::Error> {
		Box::pin(async move {
			if notification.device_token.is_empty() {
				return Err(DemoError::BadDeviceToken);
			}

			// Stalled upstream; only the caller's token ends this request.
			if notification.device_token == "device-slow" {
				match cancel {
					Some(cancel) => cancel.cancelled().await,
					None => tokio::time::sleep(StdDuration::from_secs(3600)).await,
				}
			}

			println!(
				"POST /3/device/{} ({} bytes) authorization: bearer <{}>",
				notification.device_token,
				notification.body.len(),
				credential.fingerprint(),
			);

			Ok(DemoResponse { status: 200, key_id: credential.key_id().to_string() })
		})
	}
}
