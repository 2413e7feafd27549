//! Nullable infrastructure for deterministic testing.
//!
//! The node is reached only through the `Transport` trait. This crate
//! provides a transport that:
//! - Returns scripted responses per action
//! - Records every call for assertions
//! - Never touches the network
//!
//! Usage: build a `NodeClient` over a [`NullTransport`] in tests.

pub mod transport;

pub use transport::NullTransport;
