//! Cell-level records: columns, values, increments and results.

use bytes::Bytes;
use hbase_thrift_derive::ThriftStruct;

/// Half-open timestamp range `[min_stamp, max_stamp)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ThriftStruct)]
pub struct TTimeRange {
    /// Inclusive lower bound.
    #[thrift(id = 1, required)]
    pub min_stamp: i64,
    /// Exclusive upper bound.
    #[thrift(id = 2, required)]
    pub max_stamp: i64,
}

impl TTimeRange {
    /// Creates a range covering `[min_stamp, max_stamp)`.
    pub fn new(min_stamp: i64, max_stamp: i64) -> Self {
        Self {
            min_stamp,
            max_stamp,
        }
    }
}

/// Addresses a column family, optionally narrowed to one qualifier and one
/// timestamp.
///
/// Without a qualifier the whole family is addressed.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
pub struct TColumn {
    /// Column family.
    #[thrift(id = 1, required)]
    pub family: Bytes,
    /// Column qualifier.
    #[thrift(id = 2)]
    pub qualifier: Option<Bytes>,
    /// Cell timestamp.
    #[thrift(id = 3)]
    pub timestamp: Option<i64>,
}

impl TColumn {
    /// Creates a column addressing a whole family.
    pub fn new(family: impl Into<Bytes>) -> Self {
        Self {
            family: family.into(),
            ..Self::default()
        }
    }

    /// Narrows the column to a qualifier.
    pub fn with_qualifier(mut self, qualifier: impl Into<Bytes>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }

    /// Narrows the column to a timestamp.
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// A single cell: family, qualifier and value, with optional timestamp and
/// tags.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
pub struct TColumnValue {
    /// Column family.
    #[thrift(id = 1, required)]
    pub family: Bytes,
    /// Column qualifier.
    #[thrift(id = 2, required)]
    pub qualifier: Bytes,
    /// Cell value.
    #[thrift(id = 3, required)]
    pub value: Bytes,
    /// Cell timestamp; the server assigns one when absent.
    #[thrift(id = 4)]
    pub timestamp: Option<i64>,
    /// Serialized cell tags.
    #[thrift(id = 5)]
    pub tags: Option<Bytes>,
}

impl TColumnValue {
    /// Creates a cell without timestamp or tags.
    pub fn new(
        family: impl Into<Bytes>,
        qualifier: impl Into<Bytes>,
        value: impl Into<Bytes>,
    ) -> Self {
        Self {
            family: family.into(),
            qualifier: qualifier.into(),
            value: value.into(),
            timestamp: None,
            tags: None,
        }
    }

    /// Sets the cell timestamp.
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Amount to add to one counter column.
#[derive(Debug, Clone, PartialEq, Eq, ThriftStruct)]
pub struct TColumnIncrement {
    /// Column family.
    #[thrift(id = 1, required)]
    pub family: Bytes,
    /// Column qualifier.
    #[thrift(id = 2, required)]
    pub qualifier: Bytes,
    /// Increment amount; only written when it is not 1.
    #[thrift(id = 3, default = 1)]
    pub amount: i64,
}

impl Default for TColumnIncrement {
    fn default() -> Self {
        Self {
            family: Bytes::new(),
            qualifier: Bytes::new(),
            amount: 1,
        }
    }
}

impl TColumnIncrement {
    /// Creates an increment by one.
    pub fn new(family: impl Into<Bytes>, qualifier: impl Into<Bytes>) -> Self {
        Self {
            family: family.into(),
            qualifier: qualifier.into(),
            amount: 1,
        }
    }

    /// Sets the increment amount.
    pub fn with_amount(mut self, amount: i64) -> Self {
        self.amount = amount;
        self
    }
}

/// Cells returned for one row.
///
/// An empty result has no row and no column values.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
pub struct TResult {
    /// Row key, absent for an empty result.
    #[thrift(id = 1)]
    pub row: Option<Bytes>,
    /// Cells of the row.
    #[thrift(id = 2, required)]
    pub column_values: Vec<TColumnValue>,
}

impl TResult {
    /// Returns true if the result carries no cells.
    pub fn is_empty(&self) -> bool {
        self.column_values.is_empty()
    }

    /// Returns the value of the first cell matching family and qualifier.
    pub fn value(&self, family: &[u8], qualifier: &[u8]) -> Option<&Bytes> {
        self.column_values
            .iter()
            .find(|cell| cell.family == family && cell.qualifier == qualifier)
            .map(|cell| &cell.value)
    }
}
