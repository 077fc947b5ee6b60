//! Infrastructure layer: concrete backends for domain storage traits.
//!
//! - [`session`] - Redis and in-memory session stores

pub mod session;
