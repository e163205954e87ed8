//! Visibility labels attached to reads and writes.

use hbase_thrift_derive::ThriftStruct;

/// Visibility labels a read is authorized for.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
pub struct TAuthorization {
    /// Authorized labels.
    #[thrift(id = 1)]
    pub labels: Option<Vec<String>>,
}

impl TAuthorization {
    /// Creates an authorization for the given labels.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: Some(labels.into_iter().map(Into::into).collect()),
        }
    }
}

/// Visibility expression attached to written cells.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
pub struct TCellVisibility {
    /// Boolean label expression, for example `secret&!public`.
    #[thrift(id = 1)]
    pub expression: Option<String>,
}

impl TCellVisibility {
    /// Creates a visibility from an expression.
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: Some(expression.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbase_thrift_core::{ThriftError, ThriftValue};

    #[test]
    fn test_labels_round_trip() {
        let auth = TAuthorization::new(["secret", "team"]);
        let bytes = auth.to_bytes().unwrap();
        assert_eq!(&bytes[..4], &[15, 0, 1, 11]);
        assert_eq!(TAuthorization::from_bytes(&bytes).unwrap(), auth);
    }

    #[test]
    fn test_empty_authorization_is_stop_only() {
        assert_eq!(TAuthorization::default().to_bytes().unwrap(), vec![0]);
    }

    #[test]
    fn test_expression_must_be_utf8() {
        let bytes = [11, 0, 1, 0, 0, 0, 1, 0xFF, 0];
        let err = TCellVisibility::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err.root_cause(), ThriftError::Protocol(_)));
        assert_eq!(err.field_path(), vec![("TCellVisibility", "expression")]);
    }
}
