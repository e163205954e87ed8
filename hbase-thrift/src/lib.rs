//! Record types of the [HBase](https://hbase.apache.org/) Thrift2 interface,
//! encoded with the Thrift binary protocol.
//!
//! Every record implements [`ThriftValue`], so encoding and decoding are one
//! call each:
//!
//! ```rust
//! use hbase_thrift::{TColumnValue, TPut, ThriftValue};
//!
//! let put = TPut::new("row1", vec![TColumnValue::new("cf", "q", "v1")]);
//! let bytes = put.to_bytes()?;
//! let decoded = TPut::from_bytes(&bytes)?;
//! assert_eq!(decoded, put);
//! # Ok::<(), hbase_thrift::ThriftError>(())
//! ```
//!
//! # Records
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TGet`] | Reads one row |
//! | [`TPut`] | Writes cells to one row |
//! | [`TDelete`] | Deletes cells, families or a whole row |
//! | [`TIncrement`] / [`TAppend`] | Read-modify-write on cells |
//! | [`TScan`] | Describes a range scan |
//! | [`TMutation`] | Either a put or a delete, inside [`TRowMutations`] |
//! | [`TResult`] | Cells returned for one row |
//! | [`THRegionLocation`] | Region and the server hosting it |
//! | [`TIOError`] / [`TIllegalArgument`] | Exceptions raised by the service |
//!
//! The [`service`] module holds the argument and result records of every
//! `THBaseService` method.
//!
//! # Compatibility
//!
//! Decoding skips fields with unknown ids, so records written by newer peers
//! decode cleanly. Enum codes outside the known set are kept as-is and
//! written back unchanged.
//!
//! # Limits
//!
//! Decoding limits (container sizes, nesting depth) come from
//! [`ProtocolConfig`]; pass one to [`ThriftValue::from_bytes_with_config`]
//! to override the defaults.

#![warn(missing_docs)]

pub mod service;
pub mod types;

pub use hbase_thrift_core as core;
pub use hbase_thrift_core::{ProtocolConfig, Result, ThriftError, ThriftStruct, ThriftValue};
pub use types::{
    Attributes, TAppend, TAuthorization, TCellVisibility, TColumn, TColumnIncrement,
    TColumnValue, TCompareOp, TDelete, TDeleteType, TDurability, TGet, THRegionInfo,
    THRegionLocation, TIOError, TIllegalArgument, TIncrement, TMutation, TPut, TResult,
    TRowMutations, TScan, TServerName, TTimeRange,
};
