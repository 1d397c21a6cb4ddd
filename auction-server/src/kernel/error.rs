use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum ServiceError {
    /// The request contained invalid parameters
    BadParameters(String),
    /// The auction was not found
    AuctionNotFound,
    /// Internal error occurred during processing the request
    TemporarilyUnavailable,
}

impl ServiceError {
    /// Whether the failure is on the server side rather than the caller's.
    pub fn is_server_error(&self) -> bool {
        matches!(self, ServiceError::TemporarilyUnavailable)
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::BadParameters(msg) => write!(f, "Bad parameters: {}", msg),
            ServiceError::AuctionNotFound => {
                write!(f, "Auction with the specified id was not found")
            }
            ServiceError::TemporarilyUnavailable => {
                write!(f, "This service is temporarily unavailable")
            }
        }
    }
}

impl std::error::Error for ServiceError {}
