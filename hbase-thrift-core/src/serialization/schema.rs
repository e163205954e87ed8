//! Per-type schema tables.
//!
//! A record type describes itself once as a static slice of [`FieldSpec`]
//! entries. The generic engine in [`crate::serialization::codec`] walks that
//! table to decode, encode and validate, so record types carry no hand-written
//! codec logic of their own.

use std::fmt;

use crate::error::Result;
use crate::protocol::{TInputProtocol, TOutputProtocol, TType};

/// How a field participates in encoding and required-field validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Requiredness {
    /// Always written; absence on decode is an error.
    Required,
    /// Written only when present; absence on decode leaves the field unset.
    Optional,
    /// Written only when it differs from its documented default.
    Defaulted,
    /// Always written; absence on decode leaves the type's default value.
    Default,
}

impl Requiredness {
    /// Returns true if decoding must see this field.
    pub fn is_required(self) -> bool {
        self == Self::Required
    }
}

/// Schema entry describing one field of a record type `T`.
pub struct FieldSpec<T> {
    /// Wire name of the field (only used for diagnostics).
    pub name: &'static str,
    /// Field id on the wire.
    pub id: i16,
    /// Declared wire type of the field value.
    pub field_type: TType,
    /// Requiredness of the field.
    pub requiredness: Requiredness,
    /// Reads the field value into the record.
    pub read: fn(&mut T, &mut dyn TInputProtocol) -> Result<()>,
    /// Writes the field value from the record.
    pub write: fn(&T, &mut dyn TOutputProtocol) -> Result<()>,
    /// Returns true if the field should be emitted.
    ///
    /// For optional fields this is "is present", for defaulted fields
    /// "differs from the default". Required and default-requiredness fields
    /// are emitted regardless.
    pub is_set: fn(&T) -> bool,
}

impl<T> FieldSpec<T> {
    /// Returns true if the encoder must emit this field for `value`.
    pub fn should_write(&self, value: &T) -> bool {
        match self.requiredness {
            Requiredness::Required | Requiredness::Default => true,
            Requiredness::Optional | Requiredness::Defaulted => (self.is_set)(value),
        }
    }
}

impl<T> fmt::Debug for FieldSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("field_type", &self.field_type)
            .field("requiredness", &self.requiredness)
            .finish()
    }
}

/// A record type described by a static schema table.
///
/// `fields()` must be sorted by ascending id with no duplicate ids. The derive
/// macro guarantees both; hand-written tables are checked by
/// [`validate_fields`] in tests.
pub trait ThriftStruct: Default + Sized + 'static {
    /// Wire name of the record.
    const NAME: &'static str;

    /// The record's schema table.
    fn fields() -> &'static [FieldSpec<Self>];

    /// Looks up a field spec by id.
    fn field_by_id(id: i16) -> Option<&'static FieldSpec<Self>> {
        let fields = Self::fields();
        fields
            .binary_search_by_key(&id, |spec| spec.id)
            .ok()
            .map(|index| &fields[index])
    }
}

/// Schema entry describing one member of a union type `T`.
pub struct VariantSpec<T> {
    /// Wire name of the member.
    pub name: &'static str,
    /// Field id on the wire.
    pub id: i16,
    /// Declared wire type of the member value.
    pub field_type: TType,
    /// Reads the member value and builds the union.
    pub read: fn(&mut dyn TInputProtocol) -> Result<T>,
    /// Writes the member value if this member is the one held.
    pub write: fn(&T, &mut dyn TOutputProtocol) -> Result<()>,
    /// Returns true if this member is held.
    pub is_set: fn(&T) -> bool,
}

impl<T> fmt::Debug for VariantSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantSpec")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("field_type", &self.field_type)
            .finish()
    }
}

/// A union type described by a static member table.
pub trait ThriftUnion: Sized + 'static {
    /// Wire name of the union.
    const NAME: &'static str;

    /// The union's member table, sorted by ascending id.
    fn variants() -> &'static [VariantSpec<Self>];
}

/// Checks that a field table is sorted by id without duplicates.
pub fn validate_fields<T>(fields: &[FieldSpec<T>]) -> bool {
    fields.windows(2).all(|pair| pair[0].id < pair[1].id)
}
