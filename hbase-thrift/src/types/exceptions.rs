//! Exceptions declared by the service, carried as structs on the wire.

use hbase_thrift_derive::ThriftStruct;
use thiserror::Error;

/// A general I/O failure reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Default, Error, ThriftStruct)]
#[error("TIOError: {}", .message.as_deref().unwrap_or("<no message>"))]
pub struct TIOError {
    /// Server-side message.
    #[thrift(id = 1)]
    pub message: Option<String>,
}

impl TIOError {
    /// Creates an error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

/// An invalid argument was passed to the server, for example an unknown
/// scanner id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Error, ThriftStruct)]
#[error("TIllegalArgument: {}", .message.as_deref().unwrap_or("<no message>"))]
pub struct TIllegalArgument {
    /// Server-side message.
    #[thrift(id = 1)]
    pub message: Option<String>,
}

impl TIllegalArgument {
    /// Creates an error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbase_thrift_core::ThriftValue;

    #[test]
    fn test_display() {
        assert_eq!(
            TIOError::new("region offline").to_string(),
            "TIOError: region offline"
        );
        assert_eq!(
            TIllegalArgument::default().to_string(),
            "TIllegalArgument: <no message>"
        );
    }

    #[test]
    fn test_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(TIOError::new("x"));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_round_trip() {
        let err = TIllegalArgument::new("Invalid scanner Id");
        let bytes = err.to_bytes().unwrap();
        assert_eq!(TIllegalArgument::from_bytes(&bytes).unwrap(), err);
    }
}
