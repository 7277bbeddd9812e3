use log::{debug, info};

use crate::config::ProvisionConfig;

use super::{AdminError, CoprocessorSpec, TableDescriptor};

/// Priority the cube endpoint is registered with
pub const ENDPOINT_PRIORITY: u32 = 1001;

/// Attaches server-side extensions to a table before it is created.
/// `log_target` is the provisioner's log target.
pub trait CoprocessorDeployer {
    fn deploy(&self, descriptor: &mut TableDescriptor, log_target: &str) -> Result<(), AdminError>;
}

pub struct NoopDeployer;

impl CoprocessorDeployer for NoopDeployer {
    fn deploy(&self, _descriptor: &mut TableDescriptor, _log_target: &str) -> Result<(), AdminError> {
        Ok(())
    }
}

/// Registers the cube query endpoint, loaded from a jar on shared storage.
#[derive(Clone, Debug)]
pub struct JarCoprocessorDeployer {
    class_name: String,
    jar_path: Option<String>,
}

impl JarCoprocessorDeployer {
    pub fn new(class_name: impl Into<String>, jar_path: Option<String>) -> Self {
        Self {
            class_name: class_name.into(),
            jar_path,
        }
    }

    pub fn from_config(config: &ProvisionConfig) -> Self {
        Self::new(config.coprocessor_class.clone(), config.coprocessor_jar.clone())
    }
}

impl CoprocessorDeployer for JarCoprocessorDeployer {
    fn deploy(&self, descriptor: &mut TableDescriptor, log_target: &str) -> Result<(), AdminError> {
        let Some(jar) = &self.jar_path else {
            debug!(
                target: log_target,
                "no coprocessor jar configured, skipping endpoint for {}", descriptor.name()
            );
            return Ok(());
        };

        info!(
            target: log_target,
            "adding coprocessor {} from {} on {}", self.class_name, jar, descriptor.name()
        );
        descriptor.add_coprocessor(CoprocessorSpec {
            class_name: self.class_name.clone(),
            jar_path: Some(jar.clone()),
            priority: Some(ENDPOINT_PRIORITY),
        });
        Ok(())
    }
}
