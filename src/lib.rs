//! Client library for the LMS server REST API.
//!
//! This crate wraps the remote learning-management API (organizations,
//! users, courses, groups, workgroups, gradebooks) behind an
//! [`ApiClient`]. Every operation is a single request/response: build a
//! URL, optionally serialize a JSON payload, issue the call, map the JSON
//! body into a caller-supplied target shape.
//!
//! Responses are mapped through the generic [`json`] layer: a
//! [`JsonObject`] exposes every key of the payload through typed accessor
//! helpers, and any type implementing [`FromJson`] can be used as the
//! target shape for an operation. The [`models`] module provides shapes
//! with convenience accessors for the known resources.
//!
//! Failures surface as a single normalized [`ApiError`] carrying the HTTP
//! status code and a human-readable message resolved from a per-operation
//! message registry. There is no retry or backoff; resilience is left to
//! the calling application.

pub mod client;
pub mod config;
pub mod error;
pub mod json;
pub mod models;
pub mod resources;

pub use client::ApiClient;
pub use config::{ApiConfig, ApiPrefixes};
pub use error::{ApiError, ErrorMessages};
pub use json::{FromJson, JsonObject};
