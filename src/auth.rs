//! Credential identifiers, redacted bearer material, and the immutable credential model.

pub mod credential;
pub mod id;
pub mod secret;

pub use credential::*;
pub use id::*;
pub use secret::*;
