use std::collections::BTreeMap;
use std::fmt;

pub const SPLIT_POLICY: &str = "SPLIT_POLICY";
pub const DISABLED_SPLIT_POLICY: &str = "org.apache.hadoop.hbase.regionserver.DisabledRegionSplitPolicy";
pub const SECURE_BULK_LOAD_ENDPOINT: &str = "org.apache.hadoop.hbase.security.access.SecureBulkLoadEndpoint";

/// Tag keys written onto every provisioned table
pub mod tags {
    pub const HOST: &str = "KYLIN_HOST";
    pub const CREATION_TIME: &str = "KYLIN_HTABLE_CREATION_TIME";
    pub const HOST_OWNER: &str = "KYLIN_HOST_OWNER";
    pub const GIT_TAG: &str = "KYLIN_HTABLE_GIT_TAG";
    pub const USER: &str = "KYLIN_USER";
    pub const SEGMENT: &str = "SEGMENT";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compression {
    None,
    Snappy,
    Lzo,
    Gz,
    Lz4,
}

/// Codec names accepted in configuration, matched after lowercasing
const CODEC_NAMES: &[(&str, Compression)] = &[
    ("snappy", Compression::Snappy),
    ("lzo", Compression::Lzo),
    ("gz", Compression::Gz),
    ("gzip", Compression::Gz),
    ("lz4", Compression::Lz4),
];

impl Compression {
    /// Maps a configured codec name onto an algorithm. Unrecognized names,
    /// including the empty string, select `Compression::None`.
    pub fn from_codec_name(name: &str) -> Self {
        let name = name.to_lowercase();
        CODEC_NAMES
            .iter()
            .find(|(codec, _)| *codec == name)
            .map(|(_, compression)| *compression)
            .unwrap_or(Compression::None)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Compression::None => "NONE",
            Compression::Snappy => "SNAPPY",
            Compression::Lzo => "LZO",
            Compression::Gz => "GZ",
            Compression::Lz4 => "LZ4",
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataBlockEncoding {
    None,
    Prefix,
    Diff,
    FastDiff,
    PrefixTree,
    RowIndexV1,
}

const ENCODING_NAMES: &[(&str, DataBlockEncoding)] = &[
    ("NONE", DataBlockEncoding::None),
    ("PREFIX", DataBlockEncoding::Prefix),
    ("DIFF", DataBlockEncoding::Diff),
    ("FAST_DIFF", DataBlockEncoding::FastDiff),
    ("PREFIX_TREE", DataBlockEncoding::PrefixTree),
    ("ROW_INDEX_V1", DataBlockEncoding::RowIndexV1),
];

impl DataBlockEncoding {
    /// Exact, case-sensitive lookup of an encoding by its cluster name.
    pub fn parse(name: &str) -> Option<Self> {
        ENCODING_NAMES
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, encoding)| *encoding)
    }

    pub fn as_str(&self) -> &'static str {
        ENCODING_NAMES
            .iter()
            .find(|(_, encoding)| encoding == self)
            .map(|(name, _)| *name)
            .unwrap_or("NONE")
    }
}

impl fmt::Display for DataBlockEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BloomType {
    None,
    Row,
    RowCol,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FamilyDescriptor {
    pub name: String,
    pub max_versions: u32,
    pub block_size: u32,
    pub compression: Compression,
    pub encoding: DataBlockEncoding,
    pub in_memory: bool,
    pub bloom_filter: BloomType,
}

impl FamilyDescriptor {
    /// Cluster defaults for a freshly declared family
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_versions: 1,
            block_size: 65_536,
            compression: Compression::None,
            encoding: DataBlockEncoding::None,
            in_memory: false,
            bloom_filter: BloomType::Row,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CoprocessorSpec {
    pub class_name: String,
    pub jar_path: Option<String>,
    pub priority: Option<u32>,
}

/// Schema of a table about to be created
#[derive(Clone, Debug, PartialEq)]
pub struct TableDescriptor {
    name: String,
    values: BTreeMap<String, String>,
    coprocessors: Vec<CoprocessorSpec>,
    families: Vec<FamilyDescriptor>,
}

impl TableDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: BTreeMap::new(),
            coprocessors: Vec::new(),
            families: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    pub fn split_policy(&self) -> Option<&str> {
        self.value(SPLIT_POLICY)
    }

    /// Registers a coprocessor class. A class already attached is left as is.
    pub fn add_coprocessor(&mut self, spec: CoprocessorSpec) {
        if !self.has_coprocessor(&spec.class_name) {
            self.coprocessors.push(spec);
        }
    }

    pub fn has_coprocessor(&self, class_name: &str) -> bool {
        self.coprocessors.iter().any(|c| c.class_name == class_name)
    }

    pub fn coprocessors(&self) -> &[CoprocessorSpec] {
        &self.coprocessors
    }

    pub fn add_family(&mut self, family: FamilyDescriptor) {
        self.families.push(family);
    }

    pub fn families(&self) -> &[FamilyDescriptor] {
        &self.families
    }

    pub fn family(&self, name: &str) -> Option<&FamilyDescriptor> {
        self.families.iter().find(|f| f.name == name)
    }
}

impl fmt::Display for TableDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "table '{}'", self.name)?;
        for (key, value) in &self.values {
            writeln!(f, "  {} => {}", key, value)?;
        }
        for cp in &self.coprocessors {
            match (&cp.jar_path, cp.priority) {
                (Some(jar), Some(priority)) => {
                    writeln!(f, "  coprocessor {} ({}|{})", cp.class_name, jar, priority)?
                }
                _ => writeln!(f, "  coprocessor {}", cp.class_name)?,
            }
        }
        for family in &self.families {
            writeln!(
                f,
                "  family '{}' versions={} blocksize={} compression={} encoding={} in_memory={} bloom={:?}",
                family.name,
                family.max_versions,
                family.block_size,
                family.compression,
                family.encoding,
                family.in_memory,
                family.bloom_filter,
            )?;
        }
        Ok(())
    }
}
