//! Provisioning of the wide-column tables that back cube segments

pub mod build_info;
pub mod config;
pub mod htable;
pub mod metadata;

pub use build_info::BuildInfo;
pub use config::{ConfigError, ProvisionConfig};
pub use htable::{ProvisionError, TableProvisioner};
pub use metadata::{ColumnFamilyMapping, CubeDesc, CubeInstance, Segment};
