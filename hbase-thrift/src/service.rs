//! Argument and result records of the `THBaseService` methods.
//!
//! Each method `m` has an `*Args` record (wire name `m_args`) carrying the
//! call parameters and a `*Result` record (wire name `m_result`) carrying
//! either the return value at field id 0 or one of the declared exceptions.
//! Message envelopes and transports are outside this crate; these records are
//! the payloads that travel inside them.
//!
//! | Method | Returns | Exceptions |
//! |--------|---------|------------|
//! | `exists` | `bool` | `io` |
//! | `get` | [`TResult`] | `io` |
//! | `getMultiple` | `list<TResult>` | `io` |
//! | `put` | | `io` |
//! | `checkAndPut` | `bool` | `io` |
//! | `putMultiple` | | `io` |
//! | `deleteSingle` | | `io` |
//! | `deleteMultiple` | `list<TDelete>` | `io` |
//! | `checkAndDelete` | `bool` | `io` |
//! | `increment` | [`TResult`] | `io` |
//! | `append` | [`TResult`] | `io` |
//! | `openScanner` | `i32` | `io` |
//! | `getScannerRows` | `list<TResult>` | `io`, `ia` |
//! | `closeScanner` | | `io`, `ia` |
//! | `mutateRow` | | `io` |
//! | `getScannerResults` | `list<TResult>` | `io` |
//! | `getRegionLocation` | [`THRegionLocation`] | `io` |
//! | `getAllRegionLocations` | `list<THRegionLocation>` | `io` |
//! | `checkAndMutate` | `bool` | `io` |

use bytes::Bytes;
use hbase_thrift_derive::ThriftStruct;

use crate::types::{
    TAppend, TCompareOp, TDelete, TGet, THRegionLocation, TIOError, TIllegalArgument, TIncrement,
    TPut, TResult, TRowMutations, TScan,
};

/// Arguments of `exists`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "exists_args")]
pub struct ExistsArgs {
    /// Table name.
    #[thrift(id = 1, required)]
    pub table: Bytes,
    /// Row to test.
    #[thrift(id = 2, required)]
    pub tget: TGet,
}

/// Result of `exists`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "exists_result")]
pub struct ExistsResult {
    /// True if the row has any of the requested cells.
    #[thrift(id = 0)]
    pub success: Option<bool>,
    /// Server I/O failure.
    #[thrift(id = 1)]
    pub io: Option<TIOError>,
}

/// Arguments of `get`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "get_args")]
pub struct GetArgs {
    /// Table name.
    #[thrift(id = 1, required)]
    pub table: Bytes,
    /// Row to read.
    #[thrift(id = 2, required)]
    pub tget: TGet,
}

/// Result of `get`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "get_result")]
pub struct GetResult {
    /// The row's cells.
    #[thrift(id = 0)]
    pub success: Option<TResult>,
    /// Server I/O failure.
    #[thrift(id = 1)]
    pub io: Option<TIOError>,
}

/// Arguments of `getMultiple`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "getMultiple_args")]
pub struct GetMultipleArgs {
    /// Table name.
    #[thrift(id = 1, required)]
    pub table: Bytes,
    /// Rows to read.
    #[thrift(id = 2, required)]
    pub tgets: Vec<TGet>,
}

/// Result of `getMultiple`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "getMultiple_result")]
pub struct GetMultipleResult {
    /// One result per requested row, in request order.
    #[thrift(id = 0)]
    pub success: Option<Vec<TResult>>,
    /// Server I/O failure.
    #[thrift(id = 1)]
    pub io: Option<TIOError>,
}

/// Arguments of `put`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "put_args")]
pub struct PutArgs {
    /// Table name.
    #[thrift(id = 1, required)]
    pub table: Bytes,
    /// Cells to write.
    #[thrift(id = 2, required)]
    pub tput: TPut,
}

/// Result of `put`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "put_result")]
pub struct PutResult {
    /// Server I/O failure.
    #[thrift(id = 1)]
    pub io: Option<TIOError>,
}

/// Arguments of `checkAndPut`.
///
/// The put is applied only if the checked cell holds `value`; an empty value
/// checks for the cell's absence.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "checkAndPut_args")]
pub struct CheckAndPutArgs {
    /// Table name.
    #[thrift(id = 1, required)]
    pub table: Bytes,
    /// Row to check.
    #[thrift(id = 2, required)]
    pub row: Bytes,
    /// Family of the checked cell.
    #[thrift(id = 3, required)]
    pub family: Bytes,
    /// Qualifier of the checked cell.
    #[thrift(id = 4, required)]
    pub qualifier: Bytes,
    /// Expected value.
    #[thrift(id = 5)]
    pub value: Bytes,
    /// Put applied when the check passes.
    #[thrift(id = 6, required)]
    pub tput: TPut,
}

/// Result of `checkAndPut`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "checkAndPut_result")]
pub struct CheckAndPutResult {
    /// True if the put was applied.
    #[thrift(id = 0)]
    pub success: Option<bool>,
    /// Server I/O failure.
    #[thrift(id = 1)]
    pub io: Option<TIOError>,
}

/// Arguments of `putMultiple`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "putMultiple_args")]
pub struct PutMultipleArgs {
    /// Table name.
    #[thrift(id = 1, required)]
    pub table: Bytes,
    /// Puts to apply.
    #[thrift(id = 2, required)]
    pub tputs: Vec<TPut>,
}

/// Result of `putMultiple`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "putMultiple_result")]
pub struct PutMultipleResult {
    /// Server I/O failure.
    #[thrift(id = 1)]
    pub io: Option<TIOError>,
}

/// Arguments of `deleteSingle`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "deleteSingle_args")]
pub struct DeleteSingleArgs {
    /// Table name.
    #[thrift(id = 1, required)]
    pub table: Bytes,
    /// Delete to apply.
    #[thrift(id = 2, required)]
    pub tdelete: TDelete,
}

/// Result of `deleteSingle`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "deleteSingle_result")]
pub struct DeleteSingleResult {
    /// Server I/O failure.
    #[thrift(id = 1)]
    pub io: Option<TIOError>,
}

/// Arguments of `deleteMultiple`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "deleteMultiple_args")]
pub struct DeleteMultipleArgs {
    /// Table name.
    #[thrift(id = 1, required)]
    pub table: Bytes,
    /// Deletes to apply.
    #[thrift(id = 2, required)]
    pub tdeletes: Vec<TDelete>,
}

/// Result of `deleteMultiple`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "deleteMultiple_result")]
pub struct DeleteMultipleResult {
    /// Deletes that could not be applied.
    #[thrift(id = 0)]
    pub success: Option<Vec<TDelete>>,
    /// Server I/O failure.
    #[thrift(id = 1)]
    pub io: Option<TIOError>,
}

/// Arguments of `checkAndDelete`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "checkAndDelete_args")]
pub struct CheckAndDeleteArgs {
    /// Table name.
    #[thrift(id = 1, required)]
    pub table: Bytes,
    /// Row to check.
    #[thrift(id = 2, required)]
    pub row: Bytes,
    /// Family of the checked cell.
    #[thrift(id = 3, required)]
    pub family: Bytes,
    /// Qualifier of the checked cell.
    #[thrift(id = 4, required)]
    pub qualifier: Bytes,
    /// Expected value; empty checks for absence.
    #[thrift(id = 5)]
    pub value: Bytes,
    /// Delete applied when the check passes.
    #[thrift(id = 6, required)]
    pub tdelete: TDelete,
}

/// Result of `checkAndDelete`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "checkAndDelete_result")]
pub struct CheckAndDeleteResult {
    /// True if the delete was applied.
    #[thrift(id = 0)]
    pub success: Option<bool>,
    /// Server I/O failure.
    #[thrift(id = 1)]
    pub io: Option<TIOError>,
}

/// Arguments of `increment`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "increment_args")]
pub struct IncrementArgs {
    /// Table name.
    #[thrift(id = 1, required)]
    pub table: Bytes,
    /// Counters to increment.
    #[thrift(id = 2, required)]
    pub tincrement: TIncrement,
}

/// Result of `increment`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "increment_result")]
pub struct IncrementResult {
    /// Counter values after the increment.
    #[thrift(id = 0)]
    pub success: Option<TResult>,
    /// Server I/O failure.
    #[thrift(id = 1)]
    pub io: Option<TIOError>,
}

/// Arguments of `append`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "append_args")]
pub struct AppendArgs {
    /// Table name.
    #[thrift(id = 1, required)]
    pub table: Bytes,
    /// Values to append.
    #[thrift(id = 2, required)]
    pub tappend: TAppend,
}

/// Result of `append`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "append_result")]
pub struct AppendResult {
    /// Cell values after the append.
    #[thrift(id = 0)]
    pub success: Option<TResult>,
    /// Server I/O failure.
    #[thrift(id = 1)]
    pub io: Option<TIOError>,
}

/// Arguments of `openScanner`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "openScanner_args")]
pub struct OpenScannerArgs {
    /// Table name.
    #[thrift(id = 1, required)]
    pub table: Bytes,
    /// Scan specification.
    #[thrift(id = 2, required)]
    pub tscan: TScan,
}

/// Result of `openScanner`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "openScanner_result")]
pub struct OpenScannerResult {
    /// Id of the opened scanner.
    #[thrift(id = 0)]
    pub success: Option<i32>,
    /// Server I/O failure.
    #[thrift(id = 1)]
    pub io: Option<TIOError>,
}

/// Arguments of `getScannerRows`.
#[derive(Debug, Clone, PartialEq, Eq, ThriftStruct)]
#[thrift(name = "getScannerRows_args")]
pub struct GetScannerRowsArgs {
    /// Scanner id returned by `openScanner`.
    #[thrift(id = 1, required)]
    pub scanner_id: i32,
    /// Number of rows to fetch; 1 unless set.
    #[thrift(id = 2)]
    pub num_rows: i32,
}

impl Default for GetScannerRowsArgs {
    fn default() -> Self {
        Self {
            scanner_id: 0,
            num_rows: 1,
        }
    }
}

/// Result of `getScannerRows`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "getScannerRows_result")]
pub struct GetScannerRowsResult {
    /// Fetched rows; empty once the scanner is exhausted.
    #[thrift(id = 0)]
    pub success: Option<Vec<TResult>>,
    /// Server I/O failure.
    #[thrift(id = 1)]
    pub io: Option<TIOError>,
    /// The scanner id was invalid.
    #[thrift(id = 2)]
    pub ia: Option<TIllegalArgument>,
}

/// Arguments of `closeScanner`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "closeScanner_args")]
pub struct CloseScannerArgs {
    /// Scanner id returned by `openScanner`.
    #[thrift(id = 1, required)]
    pub scanner_id: i32,
}

/// Result of `closeScanner`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "closeScanner_result")]
pub struct CloseScannerResult {
    /// Server I/O failure.
    #[thrift(id = 1)]
    pub io: Option<TIOError>,
    /// The scanner id was invalid.
    #[thrift(id = 2)]
    pub ia: Option<TIllegalArgument>,
}

/// Arguments of `mutateRow`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "mutateRow_args")]
pub struct MutateRowArgs {
    /// Table name.
    #[thrift(id = 1, required)]
    pub table: Bytes,
    /// Mutations to apply atomically.
    #[thrift(id = 2, required)]
    pub trow_mutations: TRowMutations,
}

/// Result of `mutateRow`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "mutateRow_result")]
pub struct MutateRowResult {
    /// Server I/O failure.
    #[thrift(id = 1)]
    pub io: Option<TIOError>,
}

/// Arguments of `getScannerResults`.
#[derive(Debug, Clone, PartialEq, Eq, ThriftStruct)]
#[thrift(name = "getScannerResults_args")]
pub struct GetScannerResultsArgs {
    /// Table name.
    #[thrift(id = 1, required)]
    pub table: Bytes,
    /// Scan specification.
    #[thrift(id = 2, required)]
    pub tscan: TScan,
    /// Number of rows to return; 1 unless set.
    #[thrift(id = 3)]
    pub num_rows: i32,
}

impl Default for GetScannerResultsArgs {
    fn default() -> Self {
        Self {
            table: Bytes::new(),
            tscan: TScan::default(),
            num_rows: 1,
        }
    }
}

/// Result of `getScannerResults`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "getScannerResults_result")]
pub struct GetScannerResultsResult {
    /// Scanned rows.
    #[thrift(id = 0)]
    pub success: Option<Vec<TResult>>,
    /// Server I/O failure.
    #[thrift(id = 1)]
    pub io: Option<TIOError>,
}

/// Arguments of `getRegionLocation`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "getRegionLocation_args")]
pub struct GetRegionLocationArgs {
    /// Table name.
    #[thrift(id = 1, required)]
    pub table: Bytes,
    /// Row whose region is looked up.
    #[thrift(id = 2, required)]
    pub row: Bytes,
    /// Bypass the server's location cache.
    #[thrift(id = 3)]
    pub reload: bool,
}

/// Result of `getRegionLocation`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "getRegionLocation_result")]
pub struct GetRegionLocationResult {
    /// Location of the region holding the row.
    #[thrift(id = 0)]
    pub success: Option<THRegionLocation>,
    /// Server I/O failure.
    #[thrift(id = 1)]
    pub io: Option<TIOError>,
}

/// Arguments of `getAllRegionLocations`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "getAllRegionLocations_args")]
pub struct GetAllRegionLocationsArgs {
    /// Table name.
    #[thrift(id = 1, required)]
    pub table: Bytes,
}

/// Result of `getAllRegionLocations`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "getAllRegionLocations_result")]
pub struct GetAllRegionLocationsResult {
    /// Locations of every region of the table.
    #[thrift(id = 0)]
    pub success: Option<Vec<THRegionLocation>>,
    /// Server I/O failure.
    #[thrift(id = 1)]
    pub io: Option<TIOError>,
}

/// Arguments of `checkAndMutate`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "checkAndMutate_args")]
pub struct CheckAndMutateArgs {
    /// Table name.
    #[thrift(id = 1, required)]
    pub table: Bytes,
    /// Row to check.
    #[thrift(id = 2, required)]
    pub row: Bytes,
    /// Family of the checked cell.
    #[thrift(id = 3, required)]
    pub family: Bytes,
    /// Qualifier of the checked cell.
    #[thrift(id = 4, required)]
    pub qualifier: Bytes,
    /// Comparison applied between `value` and the stored cell.
    #[thrift(id = 5, required)]
    pub compare_op: TCompareOp,
    /// Value compared against; empty checks for absence.
    #[thrift(id = 6)]
    pub value: Bytes,
    /// Mutations applied when the check passes.
    #[thrift(id = 7, required)]
    pub row_mutations: TRowMutations,
}

/// Result of `checkAndMutate`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
#[thrift(name = "checkAndMutate_result")]
pub struct CheckAndMutateResult {
    /// True if the mutations were applied.
    #[thrift(id = 0)]
    pub success: Option<bool>,
    /// Server I/O failure.
    #[thrift(id = 1)]
    pub io: Option<TIOError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TColumnValue, TMutation};
    use hbase_thrift_core::{ThriftError, ThriftStruct, ThriftValue};

    #[test]
    fn test_wire_names() {
        assert_eq!(ExistsArgs::NAME, "exists_args");
        assert_eq!(GetMultipleResult::NAME, "getMultiple_result");
        assert_eq!(CheckAndMutateArgs::NAME, "checkAndMutate_args");
        assert_eq!(MutateRowArgs::fields()[1].name, "trowMutations");
        assert_eq!(GetScannerRowsArgs::fields()[0].name, "scannerId");
    }

    #[test]
    fn test_default_requiredness_args_always_written() {
        let args = GetScannerRowsArgs {
            scanner_id: 7,
            num_rows: 0,
        };
        let bytes = args.to_bytes().unwrap();
        assert_eq!(
            bytes,
            vec![8, 0, 1, 0, 0, 0, 7, 8, 0, 2, 0, 0, 0, 0, 0]
        );
        assert_eq!(GetScannerRowsArgs::from_bytes(&bytes).unwrap(), args);
    }

    #[test]
    fn test_default_requiredness_absent_decodes_to_default() {
        let bytes = [8, 0, 1, 0, 0, 0, 7, 0];
        let args = GetScannerRowsArgs::from_bytes(&bytes).unwrap();
        assert_eq!(args.scanner_id, 7);
        assert_eq!(args.num_rows, 1);
    }

    #[test]
    fn test_scanner_args_fetch_one_row_by_default() {
        assert_eq!(GetScannerRowsArgs::default().num_rows, 1);
        assert_eq!(GetScannerResultsArgs::default().num_rows, 1);

        let args = GetScannerResultsArgs {
            table: Bytes::from_static(b"t"),
            ..GetScannerResultsArgs::default()
        };
        let bytes = args.to_bytes().unwrap();
        assert!(bytes.ends_with(&[8, 0, 3, 0, 0, 0, 1, 0]));
        assert_eq!(GetScannerResultsArgs::from_bytes(&bytes).unwrap(), args);
    }

    #[test]
    fn test_success_at_field_zero() {
        let result = OpenScannerResult {
            success: Some(12),
            io: None,
        };
        let bytes = result.to_bytes().unwrap();
        assert_eq!(bytes, vec![8, 0, 0, 0, 0, 0, 12, 0]);
    }

    #[test]
    fn test_void_result_carries_exception() {
        let result = CloseScannerResult {
            io: None,
            ia: Some(TIllegalArgument::new("Invalid scanner Id")),
        };
        let decoded = CloseScannerResult::from_bytes(&result.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded, result);
        assert_eq!(decoded.io, None);
    }

    #[test]
    fn test_check_and_mutate_round_trip() {
        let args = CheckAndMutateArgs {
            table: Bytes::from_static(b"t"),
            row: Bytes::from_static(b"r"),
            family: Bytes::from_static(b"cf"),
            qualifier: Bytes::from_static(b"q"),
            compare_op: TCompareOp::GREATER,
            value: Bytes::from_static(b"5"),
            row_mutations: TRowMutations::new(
                "r",
                vec![TMutation::Put(TPut::new(
                    "r",
                    vec![TColumnValue::new("cf", "q", "6")],
                ))],
            ),
        };
        let bytes = args.to_bytes().unwrap();
        assert_eq!(CheckAndMutateArgs::from_bytes(&bytes).unwrap(), args);
    }

    #[test]
    fn test_check_and_mutate_requires_compare_op() {
        let args = CheckAndMutateArgs {
            table: Bytes::from_static(b"t"),
            row: Bytes::from_static(b"r"),
            family: Bytes::from_static(b"cf"),
            qualifier: Bytes::from_static(b"q"),
            compare_op: TCompareOp::EQUAL,
            row_mutations: TRowMutations::new("r", Vec::new()),
            ..CheckAndMutateArgs::default()
        };
        let bytes = args.to_bytes().unwrap();
        // drop the compareOp field: type byte, id, then four bytes of value
        let header = [8, 0, 5, 0, 0, 0, 2];
        let start = bytes
            .windows(header.len())
            .position(|w| w == header)
            .unwrap();
        let mut stripped = bytes[..start].to_vec();
        stripped.extend_from_slice(&bytes[start + header.len()..]);

        let err = CheckAndMutateArgs::from_bytes(&stripped).unwrap_err();
        assert!(matches!(
            err,
            ThriftError::MissingRequiredField {
                field: "compareOp",
                ..
            }
        ));
    }
}
