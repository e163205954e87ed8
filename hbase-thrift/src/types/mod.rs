//! Record types of the HBase Thrift2 interface.
//!
//! Every record implements [`ThriftValue`](hbase_thrift_core::ThriftValue),
//! so it can be encoded with `to_bytes()` and decoded with `from_bytes()`.
//! Optional fields are `Option`s; fields with a documented default (such as
//! [`TColumnIncrement::amount`]) are plain values that are left off the wire
//! while they hold that default.

mod column;
mod enums;
mod exceptions;
mod operations;
mod region;
mod security;

use bytes::Bytes;
use std::collections::BTreeMap;

/// Per-operation attributes, keyed by name.
///
/// A sorted map keeps the encoding deterministic.
pub type Attributes = BTreeMap<String, Bytes>;

pub use column::{TColumn, TColumnIncrement, TColumnValue, TResult, TTimeRange};
pub use enums::{TCompareOp, TDeleteType, TDurability};
pub use exceptions::{TIOError, TIllegalArgument};
pub use operations::{TAppend, TDelete, TGet, TIncrement, TMutation, TPut, TRowMutations, TScan};
pub use region::{THRegionInfo, THRegionLocation, TServerName};
pub use security::{TAuthorization, TCellVisibility};
