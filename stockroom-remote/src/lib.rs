//! Remote product source for the stockroom listing.
//!
//! Implements [`stockroom_core::ProductSource`] over HTTP: a single read
//! endpoint returning a JSON product array, with a fixed simulated delay
//! imposed after the payload is ready.

pub mod loader;

pub use loader::{RemoteLoader, DEFAULT_DELAY, ENDPOINT_ENV};
