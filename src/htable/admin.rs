use std::ops::{Deref, DerefMut};

use log::{debug, warn};

use super::{AdminError, TableDescriptor};

/// Administrative handle on a storage cluster
pub trait AdminClient {
    fn table_exists(&mut self, name: &str) -> Result<bool, AdminError>;

    fn create_table(
        &mut self,
        descriptor: &TableDescriptor,
        split_keys: &[Vec<u8>],
    ) -> Result<(), AdminError>;

    fn is_table_available(&mut self, name: &str) -> Result<bool, AdminError>;

    fn close(&mut self) -> Result<(), AdminError>;
}

/// Opens admin handles against one cluster
pub trait Connector {
    type Admin: AdminClient;

    fn connect(&self) -> Result<Self::Admin, AdminError>;

    /// Whether the cluster runs with authentication enabled
    fn is_security_enabled(&self) -> bool;
}

/// Owns an admin handle and closes it exactly once when dropped.
pub struct AdminGuard<'a, A: AdminClient> {
    admin: A,
    log_target: &'a str,
}

impl<'a, A: AdminClient> AdminGuard<'a, A> {
    pub fn new(admin: A, log_target: &'a str) -> Self {
        Self { admin, log_target }
    }
}

impl<A: AdminClient> Deref for AdminGuard<'_, A> {
    type Target = A;

    fn deref(&self) -> &A {
        &self.admin
    }
}

impl<A: AdminClient> DerefMut for AdminGuard<'_, A> {
    fn deref_mut(&mut self) -> &mut A {
        &mut self.admin
    }
}

impl<A: AdminClient> Drop for AdminGuard<'_, A> {
    fn drop(&mut self) {
        match self.admin.close() {
            Ok(()) => debug!(target: self.log_target, "admin connection closed"),
            Err(e) => warn!(target: self.log_target, "failed to close admin connection: {}", e),
        }
    }
}
