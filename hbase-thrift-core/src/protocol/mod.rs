//! Thrift protocol abstraction.
//!
//! [`TInputProtocol`] and [`TOutputProtocol`] are the stream primitives the
//! struct codec is written against. They are object safe so that schema
//! tables can hold plain function pointers taking `&mut dyn` protocols.
//! [`binary`] provides the Apache Thrift binary protocol implementation.

pub mod binary;

use std::fmt;

use crate::error::{Result, ThriftError};

pub use binary::{TBinaryInputProtocol, TBinaryOutputProtocol};

/// Wire type tag identifying how the next value is framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TType {
    /// End of a struct's field list.
    Stop = 0,
    /// No value.
    Void = 1,
    /// One byte boolean.
    Bool = 2,
    /// Signed 8-bit integer.
    I08 = 3,
    /// IEEE-754 double.
    Double = 4,
    /// Signed 16-bit integer.
    I16 = 6,
    /// Signed 32-bit integer.
    I32 = 8,
    /// Signed 64-bit integer.
    I64 = 10,
    /// Length-prefixed bytes (string or binary).
    String = 11,
    /// Nested struct.
    Struct = 12,
    /// Map.
    Map = 13,
    /// Set.
    Set = 14,
    /// List.
    List = 15,
}

impl TType {
    /// Creates a `TType` from its wire representation.
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Stop),
            1 => Ok(Self::Void),
            2 => Ok(Self::Bool),
            3 => Ok(Self::I08),
            4 => Ok(Self::Double),
            6 => Ok(Self::I16),
            8 => Ok(Self::I32),
            10 => Ok(Self::I64),
            11 => Ok(Self::String),
            12 => Ok(Self::Struct),
            13 => Ok(Self::Map),
            14 => Ok(Self::Set),
            15 => Ok(Self::List),
            other => Err(ThriftError::Protocol(format!(
                "unknown wire type tag: {other}"
            ))),
        }
    }

    /// Returns the wire representation.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns the fewest bytes one value of this type occupies on the wire.
    ///
    /// Container readers multiply a declared count by this to reject counts
    /// the remaining input cannot hold.
    pub fn min_wire_size(self) -> usize {
        match self {
            Self::Stop | Self::Void | Self::Bool | Self::I08 => 1,
            Self::I16 => 2,
            Self::I32 | Self::String => 4,
            Self::I64 | Self::Double => 8,
            // a lone stop byte
            Self::Struct => 1,
            // element type and count
            Self::List | Self::Set => 5,
            // key type, value type and count
            Self::Map => 6,
        }
    }
}

impl fmt::Display for TType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Stop => "STOP",
            Self::Void => "VOID",
            Self::Bool => "BOOL",
            Self::I08 => "BYTE",
            Self::Double => "DOUBLE",
            Self::I16 => "I16",
            Self::I32 => "I32",
            Self::I64 => "I64",
            Self::String => "STRING",
            Self::Struct => "STRUCT",
            Self::Map => "MAP",
            Self::Set => "SET",
            Self::List => "LIST",
        };
        f.write_str(name)
    }
}

/// Header of a field read from the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TFieldIdentifier {
    /// Wire type of the field value; [`TType::Stop`] ends the struct.
    pub field_type: TType,
    /// Field id; zero for the stop marker.
    pub id: i16,
}

impl TFieldIdentifier {
    /// Returns true if this header is the struct's stop marker.
    pub fn is_stop(&self) -> bool {
        self.field_type == TType::Stop
    }
}

/// Header of a list read from the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TListIdentifier {
    /// Declared element type.
    pub element_type: TType,
    /// Declared element count.
    pub size: usize,
}

/// Header of a set read from the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TSetIdentifier {
    /// Declared element type.
    pub element_type: TType,
    /// Declared element count.
    pub size: usize,
}

/// Header of a map read from the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TMapIdentifier {
    /// Declared key type.
    pub key_type: TType,
    /// Declared value type.
    pub value_type: TType,
    /// Declared pair count.
    pub size: usize,
}

/// Reads Thrift primitives and framing from a stream.
pub trait TInputProtocol {
    /// Consumes the start of a struct.
    fn read_struct_begin(&mut self) -> Result<()>;

    /// Consumes the end of a struct.
    fn read_struct_end(&mut self) -> Result<()>;

    /// Reads the next field header (or the stop marker).
    fn read_field_begin(&mut self) -> Result<TFieldIdentifier>;

    /// Consumes the end of a field.
    fn read_field_end(&mut self) -> Result<()>;

    /// Reads a boolean.
    fn read_bool(&mut self) -> Result<bool>;

    /// Reads a signed byte.
    fn read_i8(&mut self) -> Result<i8>;

    /// Reads a 16-bit signed integer.
    fn read_i16(&mut self) -> Result<i16>;

    /// Reads a 32-bit signed integer.
    fn read_i32(&mut self) -> Result<i32>;

    /// Reads a 64-bit signed integer.
    fn read_i64(&mut self) -> Result<i64>;

    /// Reads a double.
    fn read_double(&mut self) -> Result<f64>;

    /// Reads a length-prefixed byte sequence.
    fn read_binary(&mut self) -> Result<bytes::Bytes>;

    /// Reads a length-prefixed UTF-8 string.
    fn read_string(&mut self) -> Result<String>;

    /// Reads a list header.
    fn read_list_begin(&mut self) -> Result<TListIdentifier>;

    /// Consumes the end of a list.
    fn read_list_end(&mut self) -> Result<()>;

    /// Reads a set header.
    fn read_set_begin(&mut self) -> Result<TSetIdentifier>;

    /// Consumes the end of a set.
    fn read_set_end(&mut self) -> Result<()>;

    /// Reads a map header.
    fn read_map_begin(&mut self) -> Result<TMapIdentifier>;

    /// Consumes the end of a map.
    fn read_map_end(&mut self) -> Result<()>;

    /// Maximum nesting depth used by [`TInputProtocol::skip`].
    fn recursion_limit(&self) -> usize;

    /// Consumes and discards one value of the given wire type.
    fn skip(&mut self, field_type: TType) -> Result<()> {
        let limit = self.recursion_limit();
        self.skip_till_depth(field_type, limit)
    }

    /// Consumes and discards one value, allowing at most `depth` levels of
    /// nesting below it.
    fn skip_till_depth(&mut self, field_type: TType, depth: usize) -> Result<()> {
        if depth == 0 {
            return Err(ThriftError::DepthLimit {
                limit: self.recursion_limit(),
            });
        }

        match field_type {
            TType::Bool => self.read_bool().map(drop),
            TType::I08 => self.read_i8().map(drop),
            TType::I16 => self.read_i16().map(drop),
            TType::I32 => self.read_i32().map(drop),
            TType::I64 => self.read_i64().map(drop),
            TType::Double => self.read_double().map(drop),
            // Binary payloads are not required to be UTF-8.
            TType::String => self.read_binary().map(drop),
            TType::Struct => {
                self.read_struct_begin()?;
                loop {
                    let field = self.read_field_begin()?;
                    if field.is_stop() {
                        break;
                    }
                    self.skip_till_depth(field.field_type, depth - 1)?;
                    self.read_field_end()?;
                }
                self.read_struct_end()
            }
            TType::List => {
                let list = self.read_list_begin()?;
                for _ in 0..list.size {
                    self.skip_till_depth(list.element_type, depth - 1)?;
                }
                self.read_list_end()
            }
            TType::Set => {
                let set = self.read_set_begin()?;
                for _ in 0..set.size {
                    self.skip_till_depth(set.element_type, depth - 1)?;
                }
                self.read_set_end()
            }
            TType::Map => {
                let map = self.read_map_begin()?;
                for _ in 0..map.size {
                    self.skip_till_depth(map.key_type, depth - 1)?;
                    self.skip_till_depth(map.value_type, depth - 1)?;
                }
                self.read_map_end()
            }
            TType::Stop | TType::Void => Err(ThriftError::Protocol(format!(
                "cannot skip value of type {field_type}"
            ))),
        }
    }
}

/// Writes Thrift primitives and framing to a stream.
pub trait TOutputProtocol {
    /// Starts a struct with the given wire name.
    fn write_struct_begin(&mut self, name: &str) -> Result<()>;

    /// Ends a struct.
    fn write_struct_end(&mut self) -> Result<()>;

    /// Writes a field header.
    fn write_field_begin(&mut self, name: &str, field_type: TType, id: i16) -> Result<()>;

    /// Ends a field.
    fn write_field_end(&mut self) -> Result<()>;

    /// Writes the stop marker terminating a struct's fields.
    fn write_field_stop(&mut self) -> Result<()>;

    /// Writes a boolean.
    fn write_bool(&mut self, value: bool) -> Result<()>;

    /// Writes a signed byte.
    fn write_i8(&mut self, value: i8) -> Result<()>;

    /// Writes a 16-bit signed integer.
    fn write_i16(&mut self, value: i16) -> Result<()>;

    /// Writes a 32-bit signed integer.
    fn write_i32(&mut self, value: i32) -> Result<()>;

    /// Writes a 64-bit signed integer.
    fn write_i64(&mut self, value: i64) -> Result<()>;

    /// Writes a double.
    fn write_double(&mut self, value: f64) -> Result<()>;

    /// Writes a length-prefixed byte sequence.
    fn write_binary(&mut self, value: &[u8]) -> Result<()>;

    /// Writes a length-prefixed UTF-8 string.
    fn write_string(&mut self, value: &str) -> Result<()> {
        self.write_binary(value.as_bytes())
    }

    /// Writes a list header.
    fn write_list_begin(&mut self, element_type: TType, size: usize) -> Result<()>;

    /// Ends a list.
    fn write_list_end(&mut self) -> Result<()>;

    /// Writes a set header.
    fn write_set_begin(&mut self, element_type: TType, size: usize) -> Result<()>;

    /// Ends a set.
    fn write_set_end(&mut self) -> Result<()>;

    /// Writes a map header.
    fn write_map_begin(&mut self, key_type: TType, value_type: TType, size: usize) -> Result<()>;

    /// Ends a map.
    fn write_map_end(&mut self) -> Result<()>;
}
