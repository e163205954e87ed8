//! Derive macros emitting Thrift schema tables.
//!
//! This crate provides two derive macros:
//!
//! - [`ThriftStruct`]: generates the `ThriftStruct` schema table and the
//!   `ThriftValue` codec for a record with named fields.
//! - [`ThriftUnion`]: generates the `ThriftUnion` member table and the
//!   `ThriftValue` codec for an enum whose variants each hold one value.
//!
//! Generated code refers to `::hbase_thrift_core`, which must be a dependency
//! of the crate using the derives.
//!
//! # Example
//!
//! ```ignore
//! use bytes::Bytes;
//! use hbase_thrift_derive::ThriftStruct;
//!
//! #[derive(Debug, Default, ThriftStruct)]
//! #[thrift(name = "TColumn")]
//! struct TColumn {
//!     #[thrift(id = 1, required)]
//!     family: Bytes,
//!     #[thrift(id = 2)]
//!     qualifier: Option<Bytes>,
//!     #[thrift(id = 3)]
//!     timestamp: Option<i64>,
//! }
//! ```

extern crate proc_macro;

mod attrs;
mod thrift_struct;
mod thrift_union;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `ThriftStruct` and `ThriftValue` for a struct.
///
/// # Attributes
///
/// ## Struct-level
/// - `#[thrift(name = "...")]`: the wire name (defaults to the Rust name).
///
/// ## Field-level
/// - `#[thrift(id = N)]`: **required**. The field id.
/// - `#[thrift(required)]`: decoding fails if the field is absent.
/// - `#[thrift(default = <expr>)]`: the field is written only when it differs
///   from `<expr>`. The struct's `Default` impl must produce the same value.
/// - `#[thrift(rename = "...")]`: overrides the wire name (defaults to the
///   lowerCamelCase form of the Rust name).
///
/// `Option<T>` fields are optional. Plain fields without `required` or
/// `default` are always written and fall back to `Default` when absent.
#[proc_macro_derive(ThriftStruct, attributes(thrift))]
pub fn derive_thrift_struct(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    thrift_struct::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derives `ThriftUnion` and `ThriftValue` for an enum.
///
/// # Attributes
///
/// ## Enum-level
/// - `#[thrift(name = "...")]`: the wire name (defaults to the Rust name).
///
/// ## Variant-level
/// - `#[thrift(id = N)]`: **required**. The member's field id.
/// - `#[thrift(rename = "...")]`: overrides the wire name.
#[proc_macro_derive(ThriftUnion, attributes(thrift))]
pub fn derive_thrift_union(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    thrift_union::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
