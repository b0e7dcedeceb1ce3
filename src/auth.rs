//! Client-credentials authentication: redacted secrets, cached credentials, and the token
//! provider every outbound call goes through.

pub mod clock;
pub mod credential;
pub mod provider;
pub mod secret;

pub use clock::*;
pub use credential::*;
pub use provider::*;
pub use secret::*;
