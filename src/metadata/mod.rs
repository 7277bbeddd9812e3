//! Cube metadata consumed while provisioning segment tables

use std::fmt;
use std::sync::Arc;

/// A column family as declared by the cube's storage mapping
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnFamilyMapping {
    pub name: String,
    pub memory_hungry: bool,
}

impl ColumnFamilyMapping {
    pub fn new(name: impl Into<String>, memory_hungry: bool) -> Self {
        Self {
            name: name.into(),
            memory_hungry,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct CubeDesc {
    pub column_families: Vec<ColumnFamilyMapping>,
}

#[derive(Clone, Debug)]
pub struct CubeInstance {
    pub name: String,
    pub owner: String,
    pub descriptor: CubeDesc,
}

/// One bounded slice of a cube, stored in exactly one physical table
#[derive(Clone, Debug)]
pub struct Segment {
    pub name: String,
    pub storage_location: String,
    pub cube: Arc<CubeInstance>,
}

impl Segment {
    pub fn new(
        name: impl Into<String>,
        storage_location: impl Into<String>,
        cube: Arc<CubeInstance>,
    ) -> Self {
        Self {
            name: name.into(),
            storage_location: storage_location.into(),
            cube,
        }
    }

    pub fn storage_location(&self) -> &str {
        &self.storage_location
    }

    pub fn cube(&self) -> &CubeInstance {
        &self.cube
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.cube.name, self.name)
    }
}
