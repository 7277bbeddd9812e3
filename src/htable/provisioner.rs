use chrono::{DateTime, Utc};
use log::{error, info};

use crate::build_info::BuildInfo;
use crate::config::ProvisionConfig;
use crate::metadata::{ColumnFamilyMapping, Segment};

use super::{
    AdminClient, AdminGuard, BloomType, Compression, Connector, CoprocessorDeployer,
    CoprocessorSpec, DataBlockEncoding, FamilyDescriptor, NoopDeployer, ProvisionError,
    TableDescriptor, DISABLED_SPLIT_POLICY, SECURE_BULK_LOAD_ENDPOINT, SPLIT_POLICY, tags,
};

pub const DEFAULT_LOG_TARGET: &str = "cube_htable::provisioner";

/// Creates the physical table backing a cube segment.
///
/// Creation is not idempotent: a table that already exists is a hard
/// failure and is never dropped or overwritten. Two provisioners racing on
/// the same table name are not coordinated here, so callers must run at most
/// one provisioning attempt per segment.
pub struct TableProvisioner<C: Connector, D: CoprocessorDeployer = NoopDeployer> {
    connector: C,
    deployer: D,
    config: ProvisionConfig,
    build_info: BuildInfo,
    clock: fn() -> DateTime<Utc>,
    log_target: String,
}

impl<C: Connector> TableProvisioner<C, NoopDeployer> {
    pub fn new(connector: C, config: ProvisionConfig) -> Self {
        Self {
            connector,
            deployer: NoopDeployer,
            config,
            build_info: BuildInfo::default(),
            clock: Utc::now,
            log_target: DEFAULT_LOG_TARGET.to_string(),
        }
    }
}

impl<C: Connector, D: CoprocessorDeployer> TableProvisioner<C, D> {
    pub fn with_deployer<E: CoprocessorDeployer>(self, deployer: E) -> TableProvisioner<C, E> {
        TableProvisioner {
            connector: self.connector,
            deployer,
            config: self.config,
            build_info: self.build_info,
            clock: self.clock,
            log_target: self.log_target,
        }
    }

    pub fn with_build_info(mut self, build_info: BuildInfo) -> Self {
        self.build_info = build_info;
        self
    }

    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_log_target(mut self, target: impl Into<String>) -> Self {
        self.log_target = target.into();
        self
    }

    /// Creates and verifies the table for `segment`, pre-split at `split_keys`.
    pub fn create_table(&self, segment: &Segment, split_keys: &[Vec<u8>]) -> Result<(), ProvisionError> {
        let target = self.log_target.as_str();
        let table_name = segment.storage_location();

        let admin = self.connector.connect().map_err(|e| {
            error!(target: target, "Failed to create HTable {}: {}", table_name, e);
            ProvisionError::from(e)
        })?;
        let mut admin = AdminGuard::new(admin, target);

        let result = self.provision(&mut *admin, segment, split_keys);
        if let Err(e) = &result {
            error!(target: target, "Failed to create HTable {}: {}", table_name, e);
        }
        result
    }

    fn provision(
        &self,
        admin: &mut C::Admin,
        segment: &Segment,
        split_keys: &[Vec<u8>],
    ) -> Result<(), ProvisionError> {
        let target = self.log_target.as_str();
        let mut descriptor = self.describe(segment);
        let table_name = descriptor.name().to_string();

        if admin.table_exists(&table_name)? {
            return Err(ProvisionError::AlreadyExists(table_name));
        }

        self.deployer.deploy(&mut descriptor, target)?;

        admin
            .create_table(&descriptor, split_keys)
            .map_err(|source| ProvisionError::CreationFailed {
                table: table_name.clone(),
                source,
            })?;

        if !admin.is_table_available(&table_name)? {
            return Err(ProvisionError::NotAvailable(table_name));
        }

        info!(target: target, "create hbase table {} done.", table_name);
        Ok(())
    }

    /// Builds the full schema for `segment`, before any coprocessor deployment.
    pub fn describe(&self, segment: &Segment) -> TableDescriptor {
        let cube = segment.cube();
        let mut descriptor = TableDescriptor::new(segment.storage_location());

        // region count comes from the split keys, never from automatic splits
        descriptor.set_value(SPLIT_POLICY, DISABLED_SPLIT_POLICY);
        descriptor.set_value(tags::HOST, self.config.metadata_url_prefix.as_str());
        descriptor.set_value(
            tags::CREATION_TIME,
            (self.clock)().timestamp_millis().to_string(),
        );

        if let Some(owner) = self.config.owner.as_deref().filter(|o| !o.is_empty()) {
            descriptor.set_value(tags::HOST_OWNER, owner);
        }
        if let Some(commit) = self.build_info.commit() {
            descriptor.set_value(tags::GIT_TAG, commit);
        }

        descriptor.set_value(tags::USER, cube.owner.as_str());
        descriptor.set_value(tags::SEGMENT, segment.to_string());

        if self.connector.is_security_enabled() {
            descriptor.add_coprocessor(CoprocessorSpec {
                class_name: SECURE_BULK_LOAD_ENDPOINT.to_string(),
                jar_path: None,
                priority: None,
            });
        }

        for mapping in &cube.descriptor.column_families {
            descriptor.add_family(self.family_descriptor(mapping));
        }

        descriptor
    }

    pub fn family_descriptor(&self, mapping: &ColumnFamilyMapping) -> FamilyDescriptor {
        let target = self.log_target.as_str();
        let mut family = FamilyDescriptor::new(mapping.name.as_str());
        family.max_versions = 1;

        family.block_size = if mapping.memory_hungry {
            self.config.default_block_size
        } else {
            self.config.small_family_block_size
        };

        family.compression = Compression::from_codec_name(&self.config.compression_codec);
        match family.compression {
            Compression::None => {
                info!(target: target, "hbase will not use any compression algorithm to compress data")
            }
            codec => info!(target: target, "hbase will use {} to compress data", codec),
        }

        family.encoding = match DataBlockEncoding::parse(&self.config.encoding) {
            Some(encoding) => encoding,
            None => {
                info!(
                    target: target,
                    "unknown encoding '{}', hbase will not use any encoding", self.config.encoding
                );
                DataBlockEncoding::None
            }
        };

        family.in_memory = false;
        family.bloom_filter = BloomType::None;
        family
    }
}
