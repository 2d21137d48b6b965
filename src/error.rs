//! Error types for client configuration.
//!
//! This module contains the error type returned when a client is configured
//! with values that can never produce a valid request.
//!
//! # Error Handling
//!
//! Configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use gql_request::{ConfigError, Endpoint};
//!
//! let result = Endpoint::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyEndpoint)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring a client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Endpoint URL cannot be empty.
    #[error("Endpoint URL cannot be empty. Please provide the URL of a GraphQL endpoint.")]
    EmptyEndpoint,

    /// Endpoint URL is invalid.
    #[error("Invalid endpoint URL '{url}'. Expected an absolute http or https URL (e.g., 'https://api.example.com/graphql').")]
    InvalidEndpoint {
        /// The invalid URL that was provided.
        url: String,
    },
}
