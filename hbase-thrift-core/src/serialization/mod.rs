//! Schema-driven serialization for Thrift structs and unions.

pub mod codec;
mod enums;
pub mod generic;
pub mod schema;
mod value;

pub use codec::{read_struct, read_union, write_struct, write_union};
pub use generic::{GenericStruct, TValue};
pub use schema::{FieldSpec, Requiredness, ThriftStruct, ThriftUnion, VariantSpec};
pub use value::ThriftValue;
