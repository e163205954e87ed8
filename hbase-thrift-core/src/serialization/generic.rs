//! Schema-less access to binary-encoded structs.

use bytes::Bytes;
use std::collections::BTreeMap;

use crate::error::{Result, ThriftError};
use crate::protocol::{TInputProtocol, TOutputProtocol, TType};
use crate::serialization::value::{initial_capacity, ThriftValue};

/// A single decoded value of any wire type.
#[derive(Debug, Clone, PartialEq)]
pub enum TValue {
    /// BOOL
    Bool(bool),
    /// BYTE
    I8(i8),
    /// I16
    I16(i16),
    /// I32 (also enumerated scalars)
    I32(i32),
    /// I64
    I64(i64),
    /// DOUBLE
    Double(f64),
    /// STRING; strings and binary are indistinguishable on the wire.
    Binary(Bytes),
    /// Nested STRUCT (or union).
    Struct(GenericStruct),
    /// LIST with its declared element type.
    List {
        /// Declared element type, kept so empty lists re-encode identically.
        element_type: TType,
        /// Elements in wire order.
        elements: Vec<TValue>,
    },
    /// SET with its declared element type.
    Set {
        /// Declared element type.
        element_type: TType,
        /// Elements in wire order.
        elements: Vec<TValue>,
    },
    /// MAP with its declared key and value types.
    Map {
        /// Declared key type.
        key_type: TType,
        /// Declared value type.
        value_type: TType,
        /// Entries in wire order.
        entries: Vec<(TValue, TValue)>,
    },
}

impl TValue {
    /// Returns the wire type of this value.
    pub fn ttype(&self) -> TType {
        match self {
            Self::Bool(_) => TType::Bool,
            Self::I8(_) => TType::I08,
            Self::I16(_) => TType::I16,
            Self::I32(_) => TType::I32,
            Self::I64(_) => TType::I64,
            Self::Double(_) => TType::Double,
            Self::Binary(_) => TType::String,
            Self::Struct(_) => TType::Struct,
            Self::List { .. } => TType::List,
            Self::Set { .. } => TType::Set,
            Self::Map { .. } => TType::Map,
        }
    }

    /// Reads one value of the given wire type.
    pub fn read(input: &mut dyn TInputProtocol, ttype: TType) -> Result<Self> {
        let limit = input.recursion_limit();
        Self::read_till_depth(input, ttype, limit)
    }

    fn read_till_depth(input: &mut dyn TInputProtocol, ttype: TType, depth: usize) -> Result<Self> {
        if depth == 0 {
            return Err(ThriftError::DepthLimit {
                limit: input.recursion_limit(),
            });
        }

        let value = match ttype {
            TType::Bool => Self::Bool(input.read_bool()?),
            TType::I08 => Self::I8(input.read_i8()?),
            TType::I16 => Self::I16(input.read_i16()?),
            TType::I32 => Self::I32(input.read_i32()?),
            TType::I64 => Self::I64(input.read_i64()?),
            TType::Double => Self::Double(input.read_double()?),
            TType::String => Self::Binary(input.read_binary()?),
            TType::Struct => Self::Struct(GenericStruct::read_till_depth(input, depth - 1)?),
            TType::List => {
                let list = input.read_list_begin()?;
                let mut elements = Vec::with_capacity(initial_capacity::<TValue>(list.size));
                for _ in 0..list.size {
                    elements.push(Self::read_till_depth(input, list.element_type, depth - 1)?);
                }
                input.read_list_end()?;
                Self::List {
                    element_type: list.element_type,
                    elements,
                }
            }
            TType::Set => {
                let set = input.read_set_begin()?;
                let mut elements = Vec::with_capacity(initial_capacity::<TValue>(set.size));
                for _ in 0..set.size {
                    elements.push(Self::read_till_depth(input, set.element_type, depth - 1)?);
                }
                input.read_set_end()?;
                Self::Set {
                    element_type: set.element_type,
                    elements,
                }
            }
            TType::Map => {
                let map = input.read_map_begin()?;
                let mut entries =
                    Vec::with_capacity(initial_capacity::<(TValue, TValue)>(map.size));
                for _ in 0..map.size {
                    let key = Self::read_till_depth(input, map.key_type, depth - 1)?;
                    let value = Self::read_till_depth(input, map.value_type, depth - 1)?;
                    entries.push((key, value));
                }
                input.read_map_end()?;
                Self::Map {
                    key_type: map.key_type,
                    value_type: map.value_type,
                    entries,
                }
            }
            TType::Stop | TType::Void => {
                return Err(ThriftError::Protocol(format!(
                    "cannot read value of type {ttype}"
                )))
            }
        };
        Ok(value)
    }

    /// Writes this value (without a field header).
    pub fn write(&self, output: &mut dyn TOutputProtocol) -> Result<()> {
        match self {
            Self::Bool(v) => output.write_bool(*v),
            Self::I8(v) => output.write_i8(*v),
            Self::I16(v) => output.write_i16(*v),
            Self::I32(v) => output.write_i32(*v),
            Self::I64(v) => output.write_i64(*v),
            Self::Double(v) => output.write_double(*v),
            Self::Binary(v) => output.write_binary(v),
            Self::Struct(v) => v.write_value(output),
            Self::List {
                element_type,
                elements,
            } => {
                output.write_list_begin(*element_type, elements.len())?;
                for element in elements {
                    check_declared(*element_type, element)?;
                    element.write(output)?;
                }
                output.write_list_end()
            }
            Self::Set {
                element_type,
                elements,
            } => {
                output.write_set_begin(*element_type, elements.len())?;
                for element in elements {
                    check_declared(*element_type, element)?;
                    element.write(output)?;
                }
                output.write_set_end()
            }
            Self::Map {
                key_type,
                value_type,
                entries,
            } => {
                output.write_map_begin(*key_type, *value_type, entries.len())?;
                for (key, value) in entries {
                    check_declared(*key_type, key)?;
                    check_declared(*value_type, value)?;
                    key.write(output)?;
                    value.write(output)?;
                }
                output.write_map_end()
            }
        }
    }

    /// Returns the boolean payload, if this is a BOOL.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the integer payload widened to `i64`, if this is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I8(v) => Some(i64::from(*v)),
            Self::I16(v) => Some(i64::from(*v)),
            Self::I32(v) => Some(i64::from(*v)),
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the bytes payload, if this is a STRING.
    pub fn as_binary(&self) -> Option<&Bytes> {
        match self {
            Self::Binary(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the nested struct, if this is a STRUCT.
    pub fn as_struct(&self) -> Option<&GenericStruct> {
        match self {
            Self::Struct(v) => Some(v),
            _ => None,
        }
    }
}

fn check_declared(declared: TType, value: &TValue) -> Result<()> {
    if value.ttype() == declared {
        Ok(())
    } else {
        Err(ThriftError::Protocol(format!(
            "container declares {declared} but holds {}",
            value.ttype()
        )))
    }
}

/// Any struct decoded without a schema, keyed by field id.
///
/// Useful for inspecting payloads and for checking that records tolerate
/// fields they do not know about.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenericStruct {
    fields: BTreeMap<i16, TValue>,
}

impl GenericStruct {
    /// Creates an empty struct.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a field, returning the struct for chaining.
    pub fn with_field(mut self, id: i16, value: TValue) -> Self {
        self.fields.insert(id, value);
        self
    }

    /// Adds or replaces a field.
    pub fn insert(&mut self, id: i16, value: TValue) -> Option<TValue> {
        self.fields.insert(id, value)
    }

    /// Returns the field with the given id.
    pub fn field(&self, id: i16) -> Option<&TValue> {
        self.fields.get(&id)
    }

    /// Removes and returns the field with the given id.
    pub fn remove(&mut self, id: i16) -> Option<TValue> {
        self.fields.remove(&id)
    }

    /// Returns true if a field with the given id is present.
    pub fn has_field(&self, id: i16) -> bool {
        self.fields.contains_key(&id)
    }

    /// Returns the number of fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the struct carries no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over `(id, value)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (i16, &TValue)> {
        self.fields.iter().map(|(id, value)| (*id, value))
    }

    fn read_till_depth(input: &mut dyn TInputProtocol, depth: usize) -> Result<Self> {
        let mut fields = BTreeMap::new();
        input.read_struct_begin()?;
        loop {
            let header = input.read_field_begin()?;
            if header.is_stop() {
                break;
            }
            let value = TValue::read_till_depth(input, header.field_type, depth)?;
            fields.insert(header.id, value);
            input.read_field_end()?;
        }
        input.read_struct_end()?;
        Ok(Self { fields })
    }
}

impl ThriftValue for GenericStruct {
    const TTYPE: TType = TType::Struct;

    fn read_value(input: &mut dyn TInputProtocol) -> Result<Self> {
        let limit = input.recursion_limit();
        Self::read_till_depth(input, limit)
    }

    fn write_value(&self, output: &mut dyn TOutputProtocol) -> Result<()> {
        output.write_struct_begin("")?;
        for (id, value) in &self.fields {
            output.write_field_begin("", value.ttype(), *id)?;
            value.write(output)?;
            output.write_field_end()?;
        }
        output.write_field_stop()?;
        output.write_struct_end()
    }
}
