//! Shared utilities for the Contentos chain client.

pub mod logging;

pub use logging::{init_tracing, init_tracing_with, LogFormat};
