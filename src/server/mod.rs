//! Server module for building the HTTP application
//!
//! This module provides a `ServerBuilder` that wires the facade and token
//! keys into a `ServerHost` and exposes it over REST.

pub mod builder;
pub mod exposure;
pub mod host;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
pub use host::ServerHost;
