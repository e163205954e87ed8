//! Value codecs for primitives and containers.

use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::Hash;

use crate::config::ProtocolConfig;
use crate::error::Result;
use crate::protocol::{
    TBinaryInputProtocol, TBinaryOutputProtocol, TInputProtocol, TOutputProtocol, TType,
};

/// Upper bound, in bytes, on what a container reserves up front.
const MAX_PREALLOCATION_BYTES: usize = 64 * 1024;

/// Capacity to reserve for `declared` elements of type `T`.
///
/// A declared count is only a claim until the elements decode, so the
/// reservation is capped and the collection grows as elements arrive.
pub(crate) fn initial_capacity<T>(declared: usize) -> usize {
    declared.min(MAX_PREALLOCATION_BYTES / std::mem::size_of::<T>().max(1))
}

/// Trait for types with a Thrift wire representation.
///
/// Records and unions get their implementation from the derive macros; the
/// primitives, `Bytes`, `String` and the standard containers are covered here.
pub trait ThriftValue: Sized {
    /// Wire type tag written in field and container headers.
    const TTYPE: TType;

    /// Reads one value from the given input.
    fn read_value(input: &mut dyn TInputProtocol) -> Result<Self>;

    /// Writes this value to the given output.
    fn write_value(&self, output: &mut dyn TOutputProtocol) -> Result<()>;

    /// Convenience method: encodes this value with the binary protocol.
    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut output = TBinaryOutputProtocol::new();
        self.write_value(&mut output)?;
        Ok(output.into_bytes())
    }

    /// Convenience method: decodes a value from binary protocol bytes.
    fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut input = TBinaryInputProtocol::new(data);
        Self::read_value(&mut input)
    }

    /// Decodes a value from binary protocol bytes with explicit limits.
    fn from_bytes_with_config(data: &[u8], config: ProtocolConfig) -> Result<Self> {
        let mut input = TBinaryInputProtocol::with_config(data, config);
        Self::read_value(&mut input)
    }
}

impl ThriftValue for bool {
    const TTYPE: TType = TType::Bool;

    fn read_value(input: &mut dyn TInputProtocol) -> Result<Self> {
        input.read_bool()
    }

    fn write_value(&self, output: &mut dyn TOutputProtocol) -> Result<()> {
        output.write_bool(*self)
    }
}

impl ThriftValue for i8 {
    const TTYPE: TType = TType::I08;

    fn read_value(input: &mut dyn TInputProtocol) -> Result<Self> {
        input.read_i8()
    }

    fn write_value(&self, output: &mut dyn TOutputProtocol) -> Result<()> {
        output.write_i8(*self)
    }
}

impl ThriftValue for i16 {
    const TTYPE: TType = TType::I16;

    fn read_value(input: &mut dyn TInputProtocol) -> Result<Self> {
        input.read_i16()
    }

    fn write_value(&self, output: &mut dyn TOutputProtocol) -> Result<()> {
        output.write_i16(*self)
    }
}

impl ThriftValue for i32 {
    const TTYPE: TType = TType::I32;

    fn read_value(input: &mut dyn TInputProtocol) -> Result<Self> {
        input.read_i32()
    }

    fn write_value(&self, output: &mut dyn TOutputProtocol) -> Result<()> {
        output.write_i32(*self)
    }
}

impl ThriftValue for i64 {
    const TTYPE: TType = TType::I64;

    fn read_value(input: &mut dyn TInputProtocol) -> Result<Self> {
        input.read_i64()
    }

    fn write_value(&self, output: &mut dyn TOutputProtocol) -> Result<()> {
        output.write_i64(*self)
    }
}

impl ThriftValue for f64 {
    const TTYPE: TType = TType::Double;

    fn read_value(input: &mut dyn TInputProtocol) -> Result<Self> {
        input.read_double()
    }

    fn write_value(&self, output: &mut dyn TOutputProtocol) -> Result<()> {
        output.write_double(*self)
    }
}

impl ThriftValue for String {
    const TTYPE: TType = TType::String;

    fn read_value(input: &mut dyn TInputProtocol) -> Result<Self> {
        input.read_string()
    }

    fn write_value(&self, output: &mut dyn TOutputProtocol) -> Result<()> {
        output.write_string(self)
    }
}

/// Binary fields; shares the STRING wire type but skips UTF-8 validation.
impl ThriftValue for Bytes {
    const TTYPE: TType = TType::String;

    fn read_value(input: &mut dyn TInputProtocol) -> Result<Self> {
        input.read_binary()
    }

    fn write_value(&self, output: &mut dyn TOutputProtocol) -> Result<()> {
        output.write_binary(self)
    }
}

// ============================================================================
// Containers
// ============================================================================

impl<T: ThriftValue> ThriftValue for Vec<T> {
    const TTYPE: TType = TType::List;

    fn read_value(input: &mut dyn TInputProtocol) -> Result<Self> {
        let list = input.read_list_begin()?;
        let mut elements = Vec::with_capacity(initial_capacity::<T>(list.size));
        for _ in 0..list.size {
            elements.push(T::read_value(input)?);
        }
        input.read_list_end()?;
        Ok(elements)
    }

    fn write_value(&self, output: &mut dyn TOutputProtocol) -> Result<()> {
        output.write_list_begin(T::TTYPE, self.len())?;
        for element in self {
            element.write_value(output)?;
        }
        output.write_list_end()
    }
}

impl<T: ThriftValue + Ord> ThriftValue for BTreeSet<T> {
    const TTYPE: TType = TType::Set;

    fn read_value(input: &mut dyn TInputProtocol) -> Result<Self> {
        let set = input.read_set_begin()?;
        let mut elements = BTreeSet::new();
        for _ in 0..set.size {
            elements.insert(T::read_value(input)?);
        }
        input.read_set_end()?;
        Ok(elements)
    }

    fn write_value(&self, output: &mut dyn TOutputProtocol) -> Result<()> {
        output.write_set_begin(T::TTYPE, self.len())?;
        for element in self {
            element.write_value(output)?;
        }
        output.write_set_end()
    }
}

impl<T: ThriftValue + Eq + Hash> ThriftValue for HashSet<T> {
    const TTYPE: TType = TType::Set;

    fn read_value(input: &mut dyn TInputProtocol) -> Result<Self> {
        let set = input.read_set_begin()?;
        let mut elements = HashSet::with_capacity(initial_capacity::<T>(set.size));
        for _ in 0..set.size {
            elements.insert(T::read_value(input)?);
        }
        input.read_set_end()?;
        Ok(elements)
    }

    fn write_value(&self, output: &mut dyn TOutputProtocol) -> Result<()> {
        output.write_set_begin(T::TTYPE, self.len())?;
        for element in self {
            element.write_value(output)?;
        }
        output.write_set_end()
    }
}

impl<K: ThriftValue + Ord, V: ThriftValue> ThriftValue for BTreeMap<K, V> {
    const TTYPE: TType = TType::Map;

    fn read_value(input: &mut dyn TInputProtocol) -> Result<Self> {
        let map = input.read_map_begin()?;
        let mut entries = BTreeMap::new();
        for _ in 0..map.size {
            let key = K::read_value(input)?;
            let value = V::read_value(input)?;
            entries.insert(key, value);
        }
        input.read_map_end()?;
        Ok(entries)
    }

    fn write_value(&self, output: &mut dyn TOutputProtocol) -> Result<()> {
        output.write_map_begin(K::TTYPE, V::TTYPE, self.len())?;
        for (key, value) in self {
            key.write_value(output)?;
            value.write_value(output)?;
        }
        output.write_map_end()
    }
}

impl<K: ThriftValue + Eq + Hash, V: ThriftValue> ThriftValue for HashMap<K, V> {
    const TTYPE: TType = TType::Map;

    fn read_value(input: &mut dyn TInputProtocol) -> Result<Self> {
        let map = input.read_map_begin()?;
        let mut entries = HashMap::with_capacity(initial_capacity::<(K, V)>(map.size));
        for _ in 0..map.size {
            let key = K::read_value(input)?;
            let value = V::read_value(input)?;
            entries.insert(key, value);
        }
        input.read_map_end()?;
        Ok(entries)
    }

    fn write_value(&self, output: &mut dyn TOutputProtocol) -> Result<()> {
        output.write_map_begin(K::TTYPE, V::TTYPE, self.len())?;
        for (key, value) in self {
            key.write_value(output)?;
            value.write_value(output)?;
        }
        output.write_map_end()
    }
}

impl<T: ThriftValue> ThriftValue for Box<T> {
    const TTYPE: TType = T::TTYPE;

    fn read_value(input: &mut dyn TInputProtocol) -> Result<Self> {
        T::read_value(input).map(Box::new)
    }

    fn write_value(&self, output: &mut dyn TOutputProtocol) -> Result<()> {
        (**self).write_value(output)
    }
}
