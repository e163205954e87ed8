//! Core types for the Thrift binary struct codec.
//!
//! This crate provides the wire-level pieces every record type builds on:
//!
//! - [`protocol`]: the [`TInputProtocol`]/[`TOutputProtocol`] traits and the
//!   binary protocol implementation.
//! - [`serialization`]: schema tables ([`FieldSpec`], [`ThriftStruct`]), the
//!   generic engine ([`read_struct`], [`write_struct`]) and value codecs.
//! - [`thrift_enum!`]: enumerated scalars carried as `i32` codes.
//! - [`GenericStruct`]: schema-less decoding of any struct.
//!
//! Record types normally get their schema table from the derive macros in
//! `hbase-thrift-derive` rather than implementing [`ThriftStruct`] by hand.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod protocol;
pub mod serialization;

pub use config::{ProtocolConfig, ProtocolConfigBuilder};
pub use error::{Result, ThriftError};
pub use protocol::{
    TBinaryInputProtocol, TBinaryOutputProtocol, TFieldIdentifier, TInputProtocol,
    TListIdentifier, TMapIdentifier, TOutputProtocol, TSetIdentifier, TType,
};
pub use serialization::{
    read_struct, read_union, write_struct, write_union, FieldSpec, GenericStruct, Requiredness,
    TValue, ThriftStruct, ThriftUnion, ThriftValue, VariantSpec,
};

#[cfg(feature = "serde")]
pub use config::FileConfig;
