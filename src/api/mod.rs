//! HTTP API layer for the submission and image endpoints.
//!
//! # Modules
//!
//! - [`dto`] - Form extraction and response types
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Session and tracing middleware
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
