//! Wide-column table provisioning for cube segments

mod admin;
mod coprocessor;
mod descriptor;
mod memory;
mod provisioner;

#[cfg(test)]
mod tests;

pub use admin::{AdminClient, AdminGuard, Connector};
pub use coprocessor::{CoprocessorDeployer, JarCoprocessorDeployer, NoopDeployer, ENDPOINT_PRIORITY};
pub use descriptor::{
    BloomType, Compression, CoprocessorSpec, DataBlockEncoding, FamilyDescriptor, TableDescriptor,
    DISABLED_SPLIT_POLICY, SECURE_BULK_LOAD_ENDPOINT, SPLIT_POLICY, tags,
};
pub use memory::{AdminOp, ClusterStats, MemoryAdmin, MemoryCluster};
pub use provisioner::{TableProvisioner, DEFAULT_LOG_TARGET};

/// Failures reported by the cluster's administrative endpoint
#[derive(thiserror::Error, Debug)]
pub enum AdminError {
    #[error("Connection failed: {0}")]
    Connection(String),
    #[error("Admin call failed: {0}")]
    Rpc(String),
    #[error("Table already exists: {0}")]
    TableExists(String),
    #[error("Admin handle already closed")]
    Closed,
}

#[derive(thiserror::Error, Debug)]
pub enum ProvisionError {
    #[error("HBase table {0} exists!")]
    AlreadyExists(String),
    #[error("Failed to create table {table}: {source}")]
    CreationFailed {
        table: String,
        #[source]
        source: AdminError,
    },
    #[error("table {0} created, but is not available due to some reasons")]
    NotAvailable(String),
    #[error(transparent)]
    Admin(#[from] AdminError),
}
