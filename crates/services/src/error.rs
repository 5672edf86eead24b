//! Shared error types for the services crate.

use thiserror::Error;

/// The gateway's single failure value.
///
/// Every transport and parse failure at the remote boundary collapses into
/// this value; it is a branch point for demo-mode degradation, never an
/// unwinding fault. Its display text is the user-facing demo-mode notice.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Connection failed - using demo mode")]
pub struct ApiError;

/// Raised when an API base URL cannot be parsed at construction time.
#[derive(Debug, Error)]
#[error("invalid API base url: {0}")]
pub struct InvalidBaseUrl(#[from] url::ParseError);
