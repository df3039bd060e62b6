//! Availability sources: the lookups that produce the full data set.

use efa_common::{Error, Result, VersionedAvailability};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Produces the complete versioned availability mapping.
///
/// Implementations are expected to be deterministic for the life of the
/// process; the provider calls `load` at most once after a success.
pub trait AvailabilitySource: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    fn load(&self) -> Result<VersionedAvailability>;
}

/// Reads the precomputed JSON document from disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    name: String,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("file:{}", path.display());
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AvailabilitySource for JsonFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<VersionedAvailability> {
        debug!(path = %self.path.display(), "reading availability data");
        let content = std::fs::read_to_string(&self.path).map_err(|e| Error::LookupFailed {
            source_name: self.name.clone(),
            reason: e.to_string(),
        })?;
        VersionedAvailability::from_json(&content)
    }
}

/// Serves a fixed in-memory value.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    data: VersionedAvailability,
}

impl StaticSource {
    pub fn new(data: VersionedAvailability) -> Self {
        Self { data }
    }
}

impl AvailabilitySource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn load(&self) -> Result<VersionedAvailability> {
        Ok(self.data.clone())
    }
}

/// Wraps a closure as a source.
pub struct FnSource<F> {
    name: String,
    f: F,
}

impl<F> FnSource<F>
where
    F: Fn() -> Result<VersionedAvailability> + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> AvailabilitySource for FnSource<F>
where
    F: Fn() -> Result<VersionedAvailability> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<VersionedAvailability> {
        (self.f)()
    }
}
