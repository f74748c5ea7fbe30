use thiserror::Error;

/// Failures an operation against the remote collection can report.
///
/// `Transport`, `Status` and `Body` are all "the HTTP call failed" from the
/// store's point of view; `InvalidArgument` is a local precondition failure
/// that never reaches the network.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("server returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("malformed response body: {0}")]
    Body(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl ApiError {
    /// True for any failed HTTP call: connectivity failure, non-2xx
    /// response, or an unparseable body.
    pub fn is_network_or_server(&self) -> bool {
        !matches!(self, ApiError::InvalidArgument(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_splits_local_from_remote() {
        assert!(ApiError::Transport("connection refused".into()).is_network_or_server());
        assert!(ApiError::Status {
            status: 500,
            url: "http://x/api/todos".into()
        }
        .is_network_or_server());
        assert!(ApiError::Body("EOF".into()).is_network_or_server());
        assert!(!ApiError::InvalidArgument("missing id".into()).is_network_or_server());
    }
}
