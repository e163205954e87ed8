//! Generic struct and union engine driven by schema tables.

use tracing::{debug, trace};

use crate::error::{Result, ThriftError};
use crate::protocol::{TInputProtocol, TOutputProtocol};
use crate::serialization::schema::{ThriftStruct, ThriftUnion};

/// Decodes a record of type `T` from the input.
///
/// Fields are dispatched by id to the reader of their declared type; ids not
/// in the schema are skipped. After the struct end every required field must
/// have been seen.
pub fn read_struct<T: ThriftStruct>(input: &mut dyn TInputProtocol) -> Result<T> {
    let fields = T::fields();
    let mut value = T::default();
    let mut seen = vec![false; fields.len()];

    input.read_struct_begin()?;
    loop {
        let header = input.read_field_begin()?;
        if header.is_stop() {
            break;
        }

        match fields.binary_search_by_key(&header.id, |spec| spec.id) {
            Ok(index) => {
                let spec = &fields[index];
                (spec.read)(&mut value, input)
                    .map_err(|e| e.in_field(T::NAME, spec.name, spec.id))?;
                seen[index] = true;
            }
            Err(_) => {
                trace!(
                    struct_name = T::NAME,
                    field_id = header.id,
                    field_type = %header.field_type,
                    "skipping unknown field"
                );
                input.skip(header.field_type)?;
            }
        }
        input.read_field_end()?;
    }
    input.read_struct_end()?;

    for (spec, present) in fields.iter().zip(&seen) {
        if spec.requiredness.is_required() && !present {
            debug!(
                struct_name = T::NAME,
                field = spec.name,
                field_id = spec.id,
                "required field missing"
            );
            return Err(ThriftError::MissingRequiredField {
                struct_name: T::NAME,
                field: spec.name,
            });
        }
    }

    Ok(value)
}

/// Encodes a record of type `T` to the output.
///
/// Fields are emitted in ascending id order; optional and defaulted fields
/// are omitted when unset or equal to their default.
pub fn write_struct<T: ThriftStruct>(value: &T, output: &mut dyn TOutputProtocol) -> Result<()> {
    output.write_struct_begin(T::NAME)?;
    for spec in T::fields() {
        if !spec.should_write(value) {
            continue;
        }
        output.write_field_begin(spec.name, spec.field_type, spec.id)?;
        (spec.write)(value, output).map_err(|e| e.in_field(T::NAME, spec.name, spec.id))?;
        output.write_field_end()?;
    }
    output.write_field_stop()?;
    output.write_struct_end()
}

/// Decodes a union of type `T` from the input.
///
/// Exactly one known member must be present. Unknown ids are skipped and do
/// not count towards the member total.
///
/// Generated Thrift readers accept zero or several members and leave the
/// check to encoding. Here a union is a Rust enum, which cannot hold zero or
/// two members, so both cases fail with [`ThriftError::UnionFieldCount`]
/// instead of decoding to an empty value or keeping the last member.
pub fn read_union<T: ThriftUnion>(input: &mut dyn TInputProtocol) -> Result<T> {
    let variants = T::variants();
    let mut result: Option<T> = None;
    let mut count = 0usize;

    input.read_struct_begin()?;
    loop {
        let header = input.read_field_begin()?;
        if header.is_stop() {
            break;
        }

        match variants.iter().find(|spec| spec.id == header.id) {
            Some(spec) => {
                let member =
                    (spec.read)(input).map_err(|e| e.in_field(T::NAME, spec.name, spec.id))?;
                count += 1;
                result = Some(member);
            }
            None => {
                trace!(
                    union_name = T::NAME,
                    field_id = header.id,
                    field_type = %header.field_type,
                    "skipping unknown union member"
                );
                input.skip(header.field_type)?;
            }
        }
        input.read_field_end()?;
    }
    input.read_struct_end()?;

    match result {
        Some(value) if count == 1 => Ok(value),
        _ => {
            debug!(union_name = T::NAME, count, "union member count violation");
            Err(ThriftError::UnionFieldCount {
                union_name: T::NAME,
                count,
            })
        }
    }
}

/// Encodes a union of type `T` to the output.
///
/// Fails before writing anything unless exactly one member is set.
pub fn write_union<T: ThriftUnion>(value: &T, output: &mut dyn TOutputProtocol) -> Result<()> {
    let variants = T::variants();
    let count = variants.iter().filter(|spec| (spec.is_set)(value)).count();
    if count != 1 {
        debug!(union_name = T::NAME, count, "union member count violation");
        return Err(ThriftError::UnionFieldCount {
            union_name: T::NAME,
            count,
        });
    }

    output.write_struct_begin(T::NAME)?;
    for spec in variants.iter().filter(|spec| (spec.is_set)(value)) {
        output.write_field_begin(spec.name, spec.field_type, spec.id)?;
        (spec.write)(value, output).map_err(|e| e.in_field(T::NAME, spec.name, spec.id))?;
        output.write_field_end()?;
    }
    output.write_field_stop()?;
    output.write_struct_end()
}
