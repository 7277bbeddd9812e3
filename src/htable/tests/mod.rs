pub mod basic;
pub mod codecs;

use super::*;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use crate::config::ProvisionConfig;
use crate::metadata::{ColumnFamilyMapping, CubeDesc, CubeInstance, Segment};

pub const TABLE_NAME: &str = "KYLIN_6F2A9C01BD";

pub fn test_families() -> Vec<ColumnFamilyMapping> {
    vec![
        ColumnFamilyMapping::new("F1", false),
        ColumnFamilyMapping::new("F2", true),
    ]
}

pub fn test_segment(families: Vec<ColumnFamilyMapping>) -> Segment {
    let cube = Arc::new(CubeInstance {
        name: "sales_cube".to_string(),
        owner: "ADMIN".to_string(),
        descriptor: CubeDesc {
            column_families: families,
        },
    });
    Segment::new("20240101000000_20240201000000", TABLE_NAME, cube)
}

pub fn test_config() -> ProvisionConfig {
    ProvisionConfig {
        owner: Some("data-team@example.com".to_string()),
        compression_codec: "snappy".to_string(),
        ..ProvisionConfig::default()
    }
}

pub fn fixed_clock() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

pub fn test_provisioner(cluster: MemoryCluster, config: ProvisionConfig) -> TableProvisioner<MemoryCluster> {
    TableProvisioner::new(cluster, config).with_clock(fixed_clock)
}
