use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{BumpError, Result};

/// Location of the manifest relative to the package directory
pub const MANIFEST_FILE: &str = "package.json";

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<serde_json::Value>,
}

/// The fields of `package.json` we need
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    name: Option<String>,
    version: String,
}

impl Manifest {
    /// Read `package.json` from `dir`
    pub fn load(dir: &Path) -> Result<Manifest> {
        let path = dir.join(MANIFEST_FILE);
        info!("Reading package.json from {} ...", path.display());
        if !path.exists() {
            return Err(BumpError::ManifestNotFound(path));
        }

        let raw: RawManifest = serde_json::from_str(&fs::read_to_string(&path)?)?;
        let version = match raw.version {
            Some(serde_json::Value::String(version)) => version,
            Some(other) => {
                return Err(BumpError::manifest(format!(
                    "version field in {} is not a string: {}",
                    path.display(),
                    other
                )))
            }
            None => {
                return Err(BumpError::manifest(format!(
                    "{} has no version field",
                    path.display()
                )))
            }
        };

        Ok(Manifest {
            name: raw.name,
            version,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}
