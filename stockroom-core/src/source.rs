//! The seam between the view and whatever provides product collections.
//!
//! `stockroom-remote` implements [`ProductSource`] over HTTP; tests swap
//! in fakes. Failures stay inside the fetch boundary: callers only ever
//! see a `FetchError`, log it, and fall back to the previously held
//! collection.

use async_trait::async_trait;
use thiserror::Error;

use crate::product::Product;

/// Errors a product source can produce.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (connect, DNS, read).
    #[error("network error: {source}")]
    Network {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The endpoint answered, but not with a 2xx.
    #[error("unexpected status {status} from product endpoint")]
    Status { status: u16 },

    /// The response body was not a valid product array.
    #[error("malformed product payload: {source}")]
    MalformedPayload {
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn network(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Network {
            source: Box::new(source),
        }
    }

    pub fn status(status: u16) -> Self {
        Self::Status { status }
    }

    pub fn malformed(source: serde_json::Error) -> Self {
        Self::MalformedPayload { source }
    }
}

/// An asynchronous provider of complete product collections.
///
/// A single read operation, no pagination: each fetch yields the whole
/// collection, which the store then holds wholesale.
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Product>, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FetchError::status(503);
        assert_eq!(err.to_string(), "unexpected status 503 from product endpoint");

        let json_err = serde_json::from_str::<Vec<Product>>("{not json").unwrap_err();
        let err = FetchError::malformed(json_err);
        assert!(err.to_string().starts_with("malformed product payload"));
    }
}
