//! Cluster-wide provisioning defaults

use std::collections::HashMap;
use std::io;
use std::path::Path;

pub const METADATA_URL: &str = "kylin.metadata.url";
pub const OWNER: &str = "kylin.owner";
pub const DEFAULT_BLOCK_SIZE: &str = "kylin.hbase.default.block.size";
pub const SMALL_FAMILY_BLOCK_SIZE: &str = "kylin.hbase.small.family.block.size";
pub const COMPRESSION_CODEC: &str = "kylin.hbase.default.compression.codec";
pub const ENCODING: &str = "kylin.hbase.default.encoding";
pub const COPROCESSOR_JAR: &str = "kylin.storage.hbase.coprocessor-local-jar";
pub const COPROCESSOR_CLASS: &str = "kylin.storage.hbase.coprocessor-class";

pub const DEFAULT_COPROCESSOR_CLASS: &str =
    "org.apache.kylin.storage.hbase.cube.v2.coprocessor.endpoint.CubeVisitService";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
    #[error("Malformed line {0}: {1}")]
    MalformedLine(usize, String),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

#[derive(Clone, Debug)]
pub struct ProvisionConfig {
    pub metadata_url_prefix: String,
    pub owner: Option<String>,
    /// Block size for memory-hungry families
    pub default_block_size: u32,
    pub small_family_block_size: u32,
    pub compression_codec: String,
    pub encoding: String,
    pub coprocessor_jar: Option<String>,
    pub coprocessor_class: String,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            metadata_url_prefix: "kylin_metadata".to_string(),
            owner: None,
            default_block_size: 1_048_576,
            small_family_block_size: 65_536,
            compression_codec: "none".to_string(),
            encoding: "FAST_DIFF".to_string(),
            coprocessor_jar: None,
            coprocessor_class: DEFAULT_COPROCESSOR_CLASS.to_string(),
        }
    }
}

impl ProvisionConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_properties(&text)
    }

    /// Builds a config from `key=value` properties text. Keys that are not
    /// provisioning settings are ignored; absent keys keep their defaults.
    pub fn from_properties(text: &str) -> Result<Self, ConfigError> {
        let props = parse_properties(text)?;
        let mut config = Self::default();

        if let Some(url) = props.get(METADATA_URL) {
            // kylin_metadata@hbase -> kylin_metadata
            let prefix = url.split('@').next().unwrap_or(url).trim();
            if !prefix.is_empty() {
                config.metadata_url_prefix = prefix.to_string();
            }
        }
        if let Some(owner) = props.get(OWNER) {
            config.owner = Some(owner.clone()).filter(|o| !o.is_empty());
        }
        if let Some(value) = props.get(DEFAULT_BLOCK_SIZE) {
            config.default_block_size = parse_size(DEFAULT_BLOCK_SIZE, value)?;
        }
        if let Some(value) = props.get(SMALL_FAMILY_BLOCK_SIZE) {
            config.small_family_block_size = parse_size(SMALL_FAMILY_BLOCK_SIZE, value)?;
        }
        if let Some(codec) = props.get(COMPRESSION_CODEC) {
            config.compression_codec = codec.clone();
        }
        if let Some(encoding) = props.get(ENCODING) {
            config.encoding = encoding.clone();
        }
        if let Some(jar) = props.get(COPROCESSOR_JAR) {
            config.coprocessor_jar = Some(jar.clone()).filter(|j| !j.is_empty());
        }
        if let Some(class) = props.get(COPROCESSOR_CLASS) {
            if !class.is_empty() {
                config.coprocessor_class = class.clone();
            }
        }

        Ok(config)
    }
}

fn parse_size(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse::<u32>().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_properties(text: &str) -> Result<HashMap<String, String>, ConfigError> {
    let mut props = HashMap::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        // the first separator wins, as in `a:b=c` -> (`a`, `b=c`)
        let sep = line
            .find(['=', ':'])
            .ok_or_else(|| ConfigError::MalformedLine(idx + 1, raw.to_string()))?;
        let (key, value) = (&line[..sep], &line[sep + 1..]);
        props.insert(key.trim().to_string(), value.trim().to_string());
    }

    Ok(props)
}
