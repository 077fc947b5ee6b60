//! HTTP middleware for request processing.
//!
//! Provides session attachment and observability middleware.

pub mod session;
pub mod tracing;
