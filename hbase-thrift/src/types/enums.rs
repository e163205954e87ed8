//! Enumerated scalars of the HBase Thrift2 interface.

use hbase_thrift_core::thrift_enum;

thrift_enum! {
    /// Which cells of a column a delete removes.
    pub struct TDeleteType {
        /// Only the latest (or the given) version of the column.
        DELETE_COLUMN = 0,
        /// All versions of the column.
        DELETE_COLUMNS = 1,
    }
}

thrift_enum! {
    /// Write-ahead-log policy for a mutation.
    ///
    /// Leaving the field unset uses the table's configured default.
    pub struct TDurability {
        /// Do not write the mutation to the WAL.
        SKIP_WAL = 1,
        /// Write to the WAL asynchronously.
        ASYNC_WAL = 2,
        /// Write to the WAL synchronously.
        SYNC_WAL = 3,
        /// Write to the WAL synchronously and force it to disk.
        FSYNC_WAL = 4,
    }
}

thrift_enum! {
    /// Comparison operator for check-and-mutate.
    pub struct TCompareOp {
        /// Less than.
        LESS = 0,
        /// Less than or equal.
        LESS_OR_EQUAL = 1,
        /// Equal.
        EQUAL = 2,
        /// Not equal.
        NOT_EQUAL = 3,
        /// Greater than or equal.
        GREATER_OR_EQUAL = 4,
        /// Greater than.
        GREATER = 5,
        /// No operation.
        NO_OP = 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbase_thrift_core::ThriftValue;

    #[test]
    fn test_codes() {
        assert_eq!(TDeleteType::DELETE_COLUMN.0, 0);
        assert_eq!(TDeleteType::DELETE_COLUMNS.0, 1);
        assert_eq!(TDurability::SKIP_WAL.0, 1);
        assert_eq!(TDurability::FSYNC_WAL.0, 4);
        assert_eq!(TCompareOp::GREATER_OR_EQUAL.0, 4);
        assert_eq!(TCompareOp::NO_OP.0, 6);
        assert_eq!(TCompareOp::VARIANTS.len(), 7);
    }

    #[test]
    fn test_durability_has_no_zero_code() {
        assert!(!TDurability(0).is_known());
        assert_eq!(TDurability(0).to_string(), "TDurability(0)");
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(
            "LESS_OR_EQUAL".parse::<TCompareOp>().unwrap(),
            TCompareOp::LESS_OR_EQUAL
        );
        assert_eq!(
            "ASYNC_WAL".parse::<TDurability>().unwrap(),
            TDurability::ASYNC_WAL
        );
        assert!("DELETE_FAMILY".parse::<TDeleteType>().is_err());
    }

    #[test]
    fn test_out_of_range_code_round_trips() {
        let bytes = [0x7F, 0, 0, 0];
        let decoded = TCompareOp::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.0, 0x7F00_0000);
        assert_eq!(decoded.name(), None);
        assert_eq!(decoded.to_bytes().unwrap(), bytes.to_vec());
    }
}
