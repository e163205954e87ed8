//! Read and write operations against a single table.

use bytes::Bytes;
use hbase_thrift_derive::{ThriftStruct, ThriftUnion};

use super::column::{TColumn, TColumnIncrement, TColumnValue, TTimeRange};
use super::enums::{TDeleteType, TDurability};
use super::security::{TAuthorization, TCellVisibility};
use super::Attributes;

/// Reads one row.
///
/// Without columns every column of the row is returned. A timestamp and a
/// time range are mutually exclusive; the server rejects requests carrying
/// both.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
pub struct TGet {
    /// Row key.
    #[thrift(id = 1, required)]
    pub row: Bytes,
    /// Columns to return.
    #[thrift(id = 2)]
    pub columns: Option<Vec<TColumn>>,
    /// Exact timestamp to return.
    #[thrift(id = 3)]
    pub timestamp: Option<i64>,
    /// Timestamp range to return.
    #[thrift(id = 4)]
    pub time_range: Option<TTimeRange>,
    /// Maximum versions per column.
    #[thrift(id = 5)]
    pub max_versions: Option<i32>,
    /// Server-side filter in filter language.
    #[thrift(id = 6)]
    pub filter_string: Option<Bytes>,
    /// Operation attributes.
    #[thrift(id = 7)]
    pub attributes: Option<Attributes>,
    /// Visibility labels the read is authorized for.
    #[thrift(id = 8)]
    pub authorizations: Option<TAuthorization>,
}

impl TGet {
    /// Creates a get for a whole row.
    pub fn new(row: impl Into<Bytes>) -> Self {
        Self {
            row: row.into(),
            ..Self::default()
        }
    }

    /// Adds a column to the request.
    pub fn add_column(mut self, column: TColumn) -> Self {
        self.columns.get_or_insert_with(Vec::new).push(column);
        self
    }

    /// Restricts the versions to a time range.
    pub fn with_time_range(mut self, time_range: TTimeRange) -> Self {
        self.time_range = Some(time_range);
        self
    }

    /// Limits the number of versions returned per column.
    pub fn with_max_versions(mut self, max_versions: i32) -> Self {
        self.max_versions = Some(max_versions);
        self
    }
}

/// Writes cells to one row.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
pub struct TPut {
    /// Row key.
    #[thrift(id = 1, required)]
    pub row: Bytes,
    /// Cells to write.
    #[thrift(id = 2, required)]
    pub column_values: Vec<TColumnValue>,
    /// Timestamp applied to cells that carry none.
    #[thrift(id = 3)]
    pub timestamp: Option<i64>,
    /// Operation attributes.
    #[thrift(id = 5)]
    pub attributes: Option<Attributes>,
    /// Write-ahead-log policy.
    #[thrift(id = 6)]
    pub durability: Option<TDurability>,
    /// Visibility expression for the written cells.
    #[thrift(id = 7)]
    pub cell_visibility: Option<TCellVisibility>,
}

impl TPut {
    /// Creates a put writing the given cells.
    pub fn new(row: impl Into<Bytes>, column_values: Vec<TColumnValue>) -> Self {
        Self {
            row: row.into(),
            column_values,
            ..Self::default()
        }
    }

    /// Sets the write-ahead-log policy.
    pub fn with_durability(mut self, durability: TDurability) -> Self {
        self.durability = Some(durability);
        self
    }
}

/// Deletes cells, columns, families or a whole row.
///
/// Without columns the whole row is deleted. The delete type decides whether
/// a column without timestamp loses its latest version or all of them.
#[derive(Debug, Clone, PartialEq, Eq, ThriftStruct)]
pub struct TDelete {
    /// Row key.
    #[thrift(id = 1, required)]
    pub row: Bytes,
    /// Columns or families to delete.
    #[thrift(id = 2)]
    pub columns: Option<Vec<TColumn>>,
    /// Delete versions up to this timestamp.
    #[thrift(id = 3)]
    pub timestamp: Option<i64>,
    /// Delete semantics; only written when it is not `DELETE_COLUMNS`.
    #[thrift(id = 4, default = TDeleteType::DELETE_COLUMNS)]
    pub delete_type: TDeleteType,
    /// Operation attributes.
    #[thrift(id = 6)]
    pub attributes: Option<Attributes>,
    /// Write-ahead-log policy.
    #[thrift(id = 7)]
    pub durability: Option<TDurability>,
}

impl Default for TDelete {
    fn default() -> Self {
        Self {
            row: Bytes::new(),
            columns: None,
            timestamp: None,
            delete_type: TDeleteType::DELETE_COLUMNS,
            attributes: None,
            durability: None,
        }
    }
}

impl TDelete {
    /// Creates a delete of a whole row.
    pub fn new(row: impl Into<Bytes>) -> Self {
        Self {
            row: row.into(),
            ..Self::default()
        }
    }

    /// Adds a column or family to delete.
    pub fn add_column(mut self, column: TColumn) -> Self {
        self.columns.get_or_insert_with(Vec::new).push(column);
        self
    }

    /// Sets the delete semantics.
    pub fn with_delete_type(mut self, delete_type: TDeleteType) -> Self {
        self.delete_type = delete_type;
        self
    }
}

/// Atomically increments counter columns of one row.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
pub struct TIncrement {
    /// Row key.
    #[thrift(id = 1, required)]
    pub row: Bytes,
    /// Counters to increment.
    #[thrift(id = 2, required)]
    pub columns: Vec<TColumnIncrement>,
    /// Operation attributes.
    #[thrift(id = 4)]
    pub attributes: Option<Attributes>,
    /// Write-ahead-log policy.
    #[thrift(id = 5)]
    pub durability: Option<TDurability>,
    /// Visibility expression for the written cells.
    #[thrift(id = 6)]
    pub cell_visibility: Option<TCellVisibility>,
}

impl TIncrement {
    /// Creates an increment of the given counters.
    pub fn new(row: impl Into<Bytes>, columns: Vec<TColumnIncrement>) -> Self {
        Self {
            row: row.into(),
            columns,
            ..Self::default()
        }
    }
}

/// Atomically appends to cell values of one row.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
pub struct TAppend {
    /// Row key.
    #[thrift(id = 1, required)]
    pub row: Bytes,
    /// Values to append.
    #[thrift(id = 2, required)]
    pub columns: Vec<TColumnValue>,
    /// Operation attributes.
    #[thrift(id = 3)]
    pub attributes: Option<Attributes>,
    /// Write-ahead-log policy.
    #[thrift(id = 4)]
    pub durability: Option<TDurability>,
    /// Visibility expression for the written cells.
    #[thrift(id = 5)]
    pub cell_visibility: Option<TCellVisibility>,
}

impl TAppend {
    /// Creates an append of the given values.
    pub fn new(row: impl Into<Bytes>, columns: Vec<TColumnValue>) -> Self {
        Self {
            row: row.into(),
            columns,
            ..Self::default()
        }
    }
}

/// Scans a range of rows.
///
/// Every field is optional; a default scan reads the whole table.
#[derive(Debug, Clone, PartialEq, Eq, ThriftStruct)]
pub struct TScan {
    /// First row (inclusive).
    #[thrift(id = 1)]
    pub start_row: Option<Bytes>,
    /// Last row (exclusive).
    #[thrift(id = 2)]
    pub stop_row: Option<Bytes>,
    /// Columns to return.
    #[thrift(id = 3)]
    pub columns: Option<Vec<TColumn>>,
    /// Rows fetched per server round trip.
    #[thrift(id = 4)]
    pub caching: Option<i32>,
    /// Maximum versions per column; only written when it is not 1.
    #[thrift(id = 5, default = 1)]
    pub max_versions: i32,
    /// Timestamp range to return.
    #[thrift(id = 6)]
    pub time_range: Option<TTimeRange>,
    /// Server-side filter in filter language.
    #[thrift(id = 7)]
    pub filter_string: Option<Bytes>,
    /// Maximum cells per result.
    #[thrift(id = 8)]
    pub batch_size: Option<i32>,
    /// Operation attributes.
    #[thrift(id = 9)]
    pub attributes: Option<Attributes>,
    /// Visibility labels the scan is authorized for.
    #[thrift(id = 10)]
    pub authorizations: Option<TAuthorization>,
    /// Scan in reverse row order.
    #[thrift(id = 11)]
    pub reversed: Option<bool>,
    /// Whether scanned blocks go into the block cache.
    #[thrift(id = 12)]
    pub cache_blocks: Option<bool>,
}

impl Default for TScan {
    fn default() -> Self {
        Self {
            start_row: None,
            stop_row: None,
            columns: None,
            caching: None,
            max_versions: 1,
            time_range: None,
            filter_string: None,
            batch_size: None,
            attributes: None,
            authorizations: None,
            reversed: None,
            cache_blocks: None,
        }
    }
}

impl TScan {
    /// Creates a scan over the whole table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row range `[start_row, stop_row)`.
    pub fn with_range(mut self, start_row: impl Into<Bytes>, stop_row: impl Into<Bytes>) -> Self {
        self.start_row = Some(start_row.into());
        self.stop_row = Some(stop_row.into());
        self
    }

    /// Adds a column to return.
    pub fn add_column(mut self, column: TColumn) -> Self {
        self.columns.get_or_insert_with(Vec::new).push(column);
        self
    }

    /// Sets the number of rows fetched per round trip.
    pub fn with_caching(mut self, caching: i32) -> Self {
        self.caching = Some(caching);
        self
    }

    /// Sets the filter expression.
    pub fn with_filter(mut self, filter: impl Into<Bytes>) -> Self {
        self.filter_string = Some(filter.into());
        self
    }
}

/// One mutation of a row: either a put or a delete.
#[derive(Debug, Clone, PartialEq, Eq, ThriftUnion)]
pub enum TMutation {
    /// Write cells.
    #[thrift(id = 1)]
    Put(TPut),
    /// Delete cells.
    #[thrift(id = 2)]
    DeleteSingle(TDelete),
}

impl From<TPut> for TMutation {
    fn from(put: TPut) -> Self {
        Self::Put(put)
    }
}

impl From<TDelete> for TMutation {
    fn from(delete: TDelete) -> Self {
        Self::DeleteSingle(delete)
    }
}

/// Mutations applied atomically to one row.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
pub struct TRowMutations {
    /// Row key.
    #[thrift(id = 1, required)]
    pub row: Bytes,
    /// Mutations in application order.
    #[thrift(id = 2, required)]
    pub mutations: Vec<TMutation>,
}

impl TRowMutations {
    /// Creates a batch of mutations for a row.
    pub fn new(row: impl Into<Bytes>, mutations: Vec<TMutation>) -> Self {
        Self {
            row: row.into(),
            mutations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbase_thrift_core::{ThriftError, ThriftStruct, ThriftValue};

    #[test]
    fn test_get_builder() {
        let get = TGet::new("row1")
            .add_column(TColumn::new("cf").with_qualifier("q"))
            .with_max_versions(3);
        assert_eq!(get.columns.as_ref().map(Vec::len), Some(1));
        let decoded = TGet::from_bytes(&get.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded, get);
        assert_eq!(decoded.timestamp, None);
        assert_eq!(decoded.attributes, None);
    }

    #[test]
    fn test_get_attributes_encoded_as_string_map() {
        let mut attributes = Attributes::new();
        attributes.insert("trace".to_string(), Bytes::from_static(b"on"));
        let get = TGet {
            attributes: Some(attributes),
            ..TGet::new("r")
        };
        let bytes = get.to_bytes().unwrap();
        let header = [13, 0, 7, 11, 11, 0, 0, 0, 1];
        assert!(bytes.windows(header.len()).any(|w| w == header));
        assert_eq!(TGet::from_bytes(&bytes).unwrap(), get);
    }

    #[test]
    fn test_delete_type_default_suppressed() {
        let delete = TDelete::new("row");
        let bytes = delete.to_bytes().unwrap();
        assert_eq!(bytes, vec![11, 0, 1, 0, 0, 0, 3, b'r', b'o', b'w', 0]);
        assert_eq!(
            TDelete::from_bytes(&bytes).unwrap().delete_type,
            TDeleteType::DELETE_COLUMNS
        );

        let single = delete.with_delete_type(TDeleteType::DELETE_COLUMN);
        let bytes = single.to_bytes().unwrap();
        assert!(bytes.ends_with(&[8, 0, 4, 0, 0, 0, 0, 0]));
        assert_eq!(
            TDelete::from_bytes(&bytes).unwrap().delete_type,
            TDeleteType::DELETE_COLUMN
        );
    }

    #[test]
    fn test_scan_max_versions_default() {
        let scan = TScan::new();
        assert_eq!(scan.max_versions, 1);
        assert_eq!(scan.to_bytes().unwrap(), vec![0]);

        let decoded = TScan::from_bytes(&[0]).unwrap();
        assert_eq!(decoded.max_versions, 1);
        assert_eq!(decoded, scan);
    }

    #[test]
    fn test_scan_field_ids() {
        let ids: Vec<i16> = TScan::fields().iter().map(|f| f.id).collect();
        assert_eq!(ids, (1..=12).collect::<Vec<i16>>());
        assert_eq!(TScan::fields()[4].name, "maxVersions");
        assert_eq!(TScan::fields()[11].name, "cacheBlocks");
    }

    #[test]
    fn test_put_durability_unknown_code_passes_through() {
        let put = TPut::new("r", vec![TColumnValue::new("cf", "q", "v")])
            .with_durability(TDurability(42));
        let bytes = put.to_bytes().unwrap();
        let decoded = TPut::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.durability, Some(TDurability(42)));
        assert_eq!(decoded.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn test_put_requires_column_values() {
        let bytes = [11, 0, 1, 0, 0, 0, 1, b'r', 0];
        let err = TPut::from_bytes(&bytes).unwrap_err();
        assert!(matches!(
            err,
            ThriftError::MissingRequiredField {
                struct_name: "TPut",
                field: "columnValues"
            }
        ));
    }

    #[test]
    fn test_mutation_encoding() {
        let mutation = TMutation::from(TDelete::new("r"));
        let bytes = mutation.to_bytes().unwrap();
        assert_eq!(
            bytes,
            vec![12, 0, 2, 11, 0, 1, 0, 0, 0, 1, b'r', 0, 0]
        );
        assert_eq!(TMutation::from_bytes(&bytes).unwrap(), mutation);
    }

    #[test]
    fn test_row_mutations_round_trip() {
        let mutations = TRowMutations::new(
            "row",
            vec![
                TPut::new("row", vec![TColumnValue::new("cf", "a", "1")]).into(),
                TDelete::new("row")
                    .add_column(TColumn::new("cf").with_qualifier("b"))
                    .into(),
            ],
        );
        let bytes = mutations.to_bytes().unwrap();
        assert_eq!(TRowMutations::from_bytes(&bytes).unwrap(), mutations);
    }

    #[test]
    fn test_increment_and_append_round_trip() {
        let increment = TIncrement::new(
            "row",
            vec![TColumnIncrement::new("cf", "hits").with_amount(10)],
        );
        assert_eq!(
            TIncrement::from_bytes(&increment.to_bytes().unwrap()).unwrap(),
            increment
        );

        let append = TAppend {
            cell_visibility: Some(TCellVisibility::new("public")),
            ..TAppend::new("row", vec![TColumnValue::new("cf", "log", ";x")])
        };
        assert_eq!(
            TAppend::from_bytes(&append.to_bytes().unwrap()).unwrap(),
            append
        );
    }
}
