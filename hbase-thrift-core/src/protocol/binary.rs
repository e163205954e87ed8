//! Apache Thrift binary protocol.
//!
//! All multi-byte integers are big-endian and fixed width. Strings and binary
//! values are an `i32` length followed by the raw bytes. Struct and field
//! names are not transmitted.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::io::Cursor;

use super::{
    TFieldIdentifier, TInputProtocol, TListIdentifier, TMapIdentifier, TOutputProtocol,
    TSetIdentifier, TType,
};
use crate::config::ProtocolConfig;
use crate::error::{Result, ThriftError};

/// A buffer-based binary protocol reader.
#[derive(Debug)]
pub struct TBinaryInputProtocol<'a> {
    cursor: Cursor<&'a [u8]>,
    config: ProtocolConfig,
    depth: usize,
}

impl<'a> TBinaryInputProtocol<'a> {
    /// Creates a reader over the given bytes with default limits.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_config(data, ProtocolConfig::default())
    }

    /// Creates a reader over the given bytes with explicit limits.
    pub fn with_config(data: &'a [u8], config: ProtocolConfig) -> Self {
        Self {
            cursor: Cursor::new(data),
            config,
            depth: 0,
        }
    }

    /// Returns the number of bytes remaining to be read.
    pub fn remaining(&self) -> usize {
        self.cursor.remaining()
    }

    /// Returns the current position in the buffer.
    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    /// Returns the limits this reader enforces.
    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    fn ensure_remaining(&self, n: usize) -> Result<()> {
        if self.cursor.remaining() < n {
            Err(ThriftError::Transport(format!(
                "insufficient data: need {} bytes, have {}",
                n,
                self.cursor.remaining()
            )))
        } else {
            Ok(())
        }
    }

    fn read_u8(&mut self) -> Result<u8> {
        self.ensure_remaining(1)?;
        Ok(self.cursor.get_u8())
    }

    fn read_type(&mut self) -> Result<TType> {
        TType::from_u8(self.read_u8()?)
    }

    fn read_length(&mut self, what: &str, limit: usize) -> Result<usize> {
        let len = self.read_i32()?;
        if len < 0 {
            return Err(ThriftError::Protocol(format!("negative {what} size: {len}")));
        }
        let len = len as usize;
        if len > limit {
            return Err(ThriftError::Protocol(format!(
                "{what} size {len} exceeds limit {limit}"
            )));
        }
        Ok(len)
    }

    /// Reads a container count and rejects counts the remaining input cannot
    /// possibly hold, before anything is allocated for them.
    fn read_container_size(&mut self, what: &str, min_entry_bytes: usize) -> Result<usize> {
        let size = self.read_length(what, self.config.max_container_size())?;
        let needed = size.saturating_mul(min_entry_bytes);
        if needed > self.cursor.remaining() {
            return Err(ThriftError::Transport(format!(
                "{what} declares {size} entries but only {} bytes remain",
                self.cursor.remaining()
            )));
        }
        Ok(size)
    }
}

impl TInputProtocol for TBinaryInputProtocol<'_> {
    fn read_struct_begin(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.config.recursion_limit() {
            return Err(ThriftError::DepthLimit {
                limit: self.config.recursion_limit(),
            });
        }
        Ok(())
    }

    fn read_struct_end(&mut self) -> Result<()> {
        self.depth = self.depth.saturating_sub(1);
        Ok(())
    }

    fn read_field_begin(&mut self) -> Result<TFieldIdentifier> {
        let field_type = self.read_type()?;
        if field_type == TType::Stop {
            return Ok(TFieldIdentifier { field_type, id: 0 });
        }
        let id = self.read_i16()?;
        Ok(TFieldIdentifier { field_type, id })
    }

    fn read_field_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    fn read_i8(&mut self) -> Result<i8> {
        self.ensure_remaining(1)?;
        Ok(self.cursor.get_i8())
    }

    fn read_i16(&mut self) -> Result<i16> {
        self.ensure_remaining(2)?;
        Ok(self.cursor.get_i16())
    }

    fn read_i32(&mut self) -> Result<i32> {
        self.ensure_remaining(4)?;
        Ok(self.cursor.get_i32())
    }

    fn read_i64(&mut self) -> Result<i64> {
        self.ensure_remaining(8)?;
        Ok(self.cursor.get_i64())
    }

    fn read_double(&mut self) -> Result<f64> {
        self.ensure_remaining(8)?;
        Ok(self.cursor.get_f64())
    }

    fn read_binary(&mut self) -> Result<Bytes> {
        let len = self.read_length("string", self.config.max_string_size())?;
        self.ensure_remaining(len)?;
        Ok(self.cursor.copy_to_bytes(len))
    }

    fn read_string(&mut self) -> Result<String> {
        let bytes = self.read_binary()?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| ThriftError::Protocol(format!("invalid UTF-8 string: {e}")))
    }

    fn read_list_begin(&mut self) -> Result<TListIdentifier> {
        let element_type = self.read_type()?;
        let size = self.read_container_size("list", element_type.min_wire_size())?;
        Ok(TListIdentifier { element_type, size })
    }

    fn read_list_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn read_set_begin(&mut self) -> Result<TSetIdentifier> {
        let element_type = self.read_type()?;
        let size = self.read_container_size("set", element_type.min_wire_size())?;
        Ok(TSetIdentifier { element_type, size })
    }

    fn read_set_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn read_map_begin(&mut self) -> Result<TMapIdentifier> {
        let key_type = self.read_type()?;
        let value_type = self.read_type()?;
        let size =
            self.read_container_size("map", key_type.min_wire_size() + value_type.min_wire_size())?;
        Ok(TMapIdentifier {
            key_type,
            value_type,
            size,
        })
    }

    fn read_map_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn recursion_limit(&self) -> usize {
        self.config.recursion_limit()
    }
}

/// A buffer-based binary protocol writer.
#[derive(Debug)]
pub struct TBinaryOutputProtocol {
    buffer: BytesMut,
}

impl TBinaryOutputProtocol {
    /// Creates a writer with default capacity.
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::with_capacity(256),
        }
    }

    /// Creates a writer with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity),
        }
    }

    /// Returns the written bytes as a slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Consumes the writer and returns the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer.to_vec()
    }

    /// Consumes the writer and returns the written bytes without copying.
    pub fn freeze(self) -> Bytes {
        self.buffer.freeze()
    }

    /// Returns the number of bytes written.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if no bytes have been written.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Clears the buffer, removing all written data.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    fn write_length(&mut self, what: &str, len: usize) -> Result<()> {
        let len = i32::try_from(len).map_err(|_| {
            ThriftError::Protocol(format!("{what} size {len} does not fit in an i32"))
        })?;
        self.buffer.put_i32(len);
        Ok(())
    }
}

impl Default for TBinaryOutputProtocol {
    fn default() -> Self {
        Self::new()
    }
}

impl TOutputProtocol for TBinaryOutputProtocol {
    fn write_struct_begin(&mut self, _name: &str) -> Result<()> {
        Ok(())
    }

    fn write_struct_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_field_begin(&mut self, _name: &str, field_type: TType, id: i16) -> Result<()> {
        self.buffer.put_u8(field_type.as_u8());
        self.buffer.put_i16(id);
        Ok(())
    }

    fn write_field_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_field_stop(&mut self) -> Result<()> {
        self.buffer.put_u8(TType::Stop.as_u8());
        Ok(())
    }

    fn write_bool(&mut self, value: bool) -> Result<()> {
        self.buffer.put_u8(u8::from(value));
        Ok(())
    }

    fn write_i8(&mut self, value: i8) -> Result<()> {
        self.buffer.put_i8(value);
        Ok(())
    }

    fn write_i16(&mut self, value: i16) -> Result<()> {
        self.buffer.put_i16(value);
        Ok(())
    }

    fn write_i32(&mut self, value: i32) -> Result<()> {
        self.buffer.put_i32(value);
        Ok(())
    }

    fn write_i64(&mut self, value: i64) -> Result<()> {
        self.buffer.put_i64(value);
        Ok(())
    }

    fn write_double(&mut self, value: f64) -> Result<()> {
        self.buffer.put_f64(value);
        Ok(())
    }

    fn write_binary(&mut self, value: &[u8]) -> Result<()> {
        self.write_length("string", value.len())?;
        self.buffer.put_slice(value);
        Ok(())
    }

    fn write_list_begin(&mut self, element_type: TType, size: usize) -> Result<()> {
        self.buffer.put_u8(element_type.as_u8());
        self.write_length("list", size)
    }

    fn write_list_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_set_begin(&mut self, element_type: TType, size: usize) -> Result<()> {
        self.buffer.put_u8(element_type.as_u8());
        self.write_length("set", size)
    }

    fn write_set_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_map_begin(&mut self, key_type: TType, value_type: TType, size: usize) -> Result<()> {
        self.buffer.put_u8(key_type.as_u8());
        self.buffer.put_u8(value_type.as_u8());
        self.write_length("map", size)
    }

    fn write_map_end(&mut self) -> Result<()> {
        Ok(())
    }
}
