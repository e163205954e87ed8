//! Region metadata returned by location lookups.

use bytes::Bytes;
use hbase_thrift_derive::ThriftStruct;

/// Descriptor of one region of a table.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
pub struct THRegionInfo {
    /// Region id.
    #[thrift(id = 1, required)]
    pub region_id: i64,
    /// Name of the table the region belongs to.
    #[thrift(id = 2, required)]
    pub table_name: Bytes,
    /// First row key of the region (inclusive).
    #[thrift(id = 3)]
    pub start_key: Option<Bytes>,
    /// Last row key of the region (exclusive).
    #[thrift(id = 4)]
    pub end_key: Option<Bytes>,
    /// Whether the region is offline.
    #[thrift(id = 5)]
    pub offline: Option<bool>,
    /// Whether the region has been split.
    #[thrift(id = 6)]
    pub split: Option<bool>,
    /// Replica id.
    #[thrift(id = 7)]
    pub replica_id: Option<i32>,
}

/// Address of a region server.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
pub struct TServerName {
    /// Host name.
    #[thrift(id = 1, required)]
    pub host_name: String,
    /// RPC port.
    #[thrift(id = 2)]
    pub port: Option<i32>,
    /// Server start code.
    #[thrift(id = 3)]
    pub start_code: Option<i64>,
}

impl TServerName {
    /// Creates a server name with a host and port.
    pub fn new(host_name: impl Into<String>, port: i32) -> Self {
        Self {
            host_name: host_name.into(),
            port: Some(port),
            start_code: None,
        }
    }
}

/// A region together with the server hosting it.
#[derive(Debug, Clone, PartialEq, Eq, Default, ThriftStruct)]
pub struct THRegionLocation {
    /// Hosting server.
    #[thrift(id = 1, required)]
    pub server_name: TServerName,
    /// Region descriptor.
    #[thrift(id = 2, required)]
    pub region_info: THRegionInfo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbase_thrift_core::{ThriftError, ThriftStruct, ThriftValue};

    fn location() -> THRegionLocation {
        THRegionLocation {
            server_name: TServerName::new("rs1.example.com", 16020),
            region_info: THRegionInfo {
                region_id: 1_700_000_000_000,
                table_name: Bytes::from_static(b"users"),
                start_key: Some(Bytes::from_static(b"a")),
                end_key: Some(Bytes::new()),
                offline: Some(false),
                split: None,
                replica_id: Some(0),
            },
        }
    }

    #[test]
    fn test_location_round_trip() {
        let value = location();
        let bytes = value.to_bytes().unwrap();
        assert_eq!(THRegionLocation::from_bytes(&bytes).unwrap(), value);
    }

    #[test]
    fn test_empty_end_key_is_present() {
        let bytes = location().to_bytes().unwrap();
        let decoded = THRegionLocation::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.region_info.end_key, Some(Bytes::new()));
        assert_eq!(decoded.region_info.split, None);
    }

    #[test]
    fn test_missing_host_name_reported_with_path() {
        // serverName present but empty, regionInfo missing entirely
        let bytes = [12, 0, 1, 0, 0];
        let err = THRegionLocation::from_bytes(&bytes).unwrap_err();
        assert_eq!(
            err.field_path(),
            vec![("THRegionLocation", "serverName")]
        );
        assert!(matches!(
            err.root_cause(),
            ThriftError::MissingRequiredField {
                struct_name: "TServerName",
                field: "hostName"
            }
        ));
    }

    #[test]
    fn test_wire_names() {
        let names: Vec<&str> = THRegionInfo::fields().iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            vec![
                "regionId",
                "tableName",
                "startKey",
                "endKey",
                "offline",
                "split",
                "replicaId"
            ]
        );
    }
}
