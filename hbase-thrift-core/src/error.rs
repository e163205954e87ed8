//! Error types for Thrift encoding and decoding.

use std::io;
use thiserror::Error;

/// The main error type for codec operations.
#[derive(Debug, Error)]
pub enum ThriftError {
    /// The underlying stream ran out of bytes or could not be read/written.
    #[error("transport error: {0}")]
    Transport(String),

    /// The stream carried data that violates the binary protocol.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Struct nesting or skip recursion went deeper than the configured limit.
    #[error("protocol error: depth limit of {limit} exceeded")]
    DepthLimit {
        /// The configured recursion limit.
        limit: usize,
    },

    /// A required field was absent after a struct was fully read.
    #[error("required field {field} is not set in {struct_name}")]
    MissingRequiredField {
        /// Wire name of the struct being decoded.
        struct_name: &'static str,
        /// Wire name of the missing field.
        field: &'static str,
    },

    /// A union did not carry exactly one member.
    #[error("{union_name} union: exactly one field must be set ({count} set)")]
    UnionFieldCount {
        /// Wire name of the union.
        union_name: &'static str,
        /// Number of members that were set.
        count: usize,
    },

    /// An error raised while reading or writing a specific field.
    #[error("{struct_name}.{field} ({id}) field error: {source}")]
    Field {
        /// Wire name of the enclosing struct.
        struct_name: &'static str,
        /// Wire name of the field.
        field: &'static str,
        /// Field id.
        id: i16,
        /// The underlying error.
        #[source]
        source: Box<ThriftError>,
    },

    /// Configuration errors (invalid limits, unreadable config sources).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// I/O errors from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ThriftError {
    /// Wraps this error with the struct and field it occurred in.
    pub fn in_field(self, struct_name: &'static str, field: &'static str, id: i16) -> Self {
        Self::Field {
            struct_name,
            field,
            id,
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, stripping field context wrappers.
    pub fn root_cause(&self) -> &ThriftError {
        let mut current = self;
        while let Self::Field { source, .. } = current {
            current = source;
        }
        current
    }

    /// Returns the chain of `struct.field` locations from outermost to innermost.
    pub fn field_path(&self) -> Vec<(&'static str, &'static str)> {
        let mut path = Vec::new();
        let mut current = self;
        while let Self::Field {
            struct_name,
            field,
            source,
            ..
        } = current
        {
            path.push((*struct_name, *field));
            current = source;
        }
        path
    }
}

/// A specialized `Result` type for codec operations.
pub type Result<T> = std::result::Result<T, ThriftError>;
