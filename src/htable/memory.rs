use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::{AdminClient, AdminError, Connector, TableDescriptor};

/// Admin operations that can be made to fail on a `MemoryCluster`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminOp {
    Connect,
    TableExists,
    CreateTable,
    IsTableAvailable,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClusterStats {
    pub connections_opened: usize,
    pub connections_closed: usize,
    /// Every `close` call, including ones on an already closed handle
    pub close_attempts: usize,
    pub create_calls: usize,
}

struct StoredTable {
    descriptor: TableDescriptor,
    split_keys: Vec<Vec<u8>>,
}

#[derive(Default)]
struct ClusterState {
    tables: BTreeMap<String, StoredTable>,
    stats: ClusterStats,
    failing: Option<(AdminOp, String)>,
    report_unavailable: bool,
}

/// A cluster that keeps table schemas in process memory
#[derive(Clone, Default)]
pub struct MemoryCluster {
    state: Arc<Mutex<ClusterState>>,
    security_enabled: bool,
}

impl MemoryCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_security(mut self, enabled: bool) -> Self {
        self.security_enabled = enabled;
        self
    }

    /// Makes every subsequent `op` fail with `message`
    pub fn fail_on(&self, op: AdminOp, message: impl Into<String>) {
        self.state.lock().failing = Some((op, message.into()));
    }

    /// Makes availability checks report tables as not yet serving
    pub fn report_unavailable(&self, unavailable: bool) {
        self.state.lock().report_unavailable = unavailable;
    }

    /// Registers a table as already present
    pub fn insert_table(&self, descriptor: TableDescriptor) {
        let name = descriptor.name().to_string();
        self.state.lock().tables.insert(
            name,
            StoredTable {
                descriptor,
                split_keys: Vec::new(),
            },
        );
    }

    pub fn table(&self, name: &str) -> Option<TableDescriptor> {
        self.state.lock().tables.get(name).map(|t| t.descriptor.clone())
    }

    pub fn split_keys(&self, name: &str) -> Option<Vec<Vec<u8>>> {
        self.state.lock().tables.get(name).map(|t| t.split_keys.clone())
    }

    pub fn table_names(&self) -> Vec<String> {
        self.state.lock().tables.keys().cloned().collect()
    }

    pub fn stats(&self) -> ClusterStats {
        self.state.lock().stats.clone()
    }
}

impl ClusterState {
    fn check(&self, op: AdminOp) -> Result<(), AdminError> {
        match &self.failing {
            Some((failing, message)) if *failing == op => Err(match op {
                AdminOp::Connect => AdminError::Connection(message.clone()),
                _ => AdminError::Rpc(message.clone()),
            }),
            _ => Ok(()),
        }
    }
}

impl Connector for MemoryCluster {
    type Admin = MemoryAdmin;

    fn connect(&self) -> Result<MemoryAdmin, AdminError> {
        let mut state = self.state.lock();
        state.check(AdminOp::Connect)?;
        state.stats.connections_opened += 1;

        Ok(MemoryAdmin {
            state: Arc::clone(&self.state),
            closed: false,
        })
    }

    fn is_security_enabled(&self) -> bool {
        self.security_enabled
    }
}

pub struct MemoryAdmin {
    state: Arc<Mutex<ClusterState>>,
    closed: bool,
}

impl MemoryAdmin {
    fn ensure_open(&self) -> Result<(), AdminError> {
        if self.closed {
            return Err(AdminError::Closed);
        }
        Ok(())
    }
}

impl AdminClient for MemoryAdmin {
    fn table_exists(&mut self, name: &str) -> Result<bool, AdminError> {
        self.ensure_open()?;
        let state = self.state.lock();
        state.check(AdminOp::TableExists)?;
        Ok(state.tables.contains_key(name))
    }

    fn create_table(
        &mut self,
        descriptor: &TableDescriptor,
        split_keys: &[Vec<u8>],
    ) -> Result<(), AdminError> {
        self.ensure_open()?;
        let mut state = self.state.lock();
        state.stats.create_calls += 1;
        state.check(AdminOp::CreateTable)?;

        if state.tables.contains_key(descriptor.name()) {
            return Err(AdminError::TableExists(descriptor.name().to_string()));
        }

        state.tables.insert(
            descriptor.name().to_string(),
            StoredTable {
                descriptor: descriptor.clone(),
                split_keys: split_keys.to_vec(),
            },
        );
        Ok(())
    }

    fn is_table_available(&mut self, name: &str) -> Result<bool, AdminError> {
        self.ensure_open()?;
        let state = self.state.lock();
        state.check(AdminOp::IsTableAvailable)?;
        Ok(state.tables.contains_key(name) && !state.report_unavailable)
    }

    fn close(&mut self) -> Result<(), AdminError> {
        self.state.lock().stats.close_attempts += 1;
        self.ensure_open()?;
        self.closed = true;
        self.state.lock().stats.connections_closed += 1;
        Ok(())
    }
}
