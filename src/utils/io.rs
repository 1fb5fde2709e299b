use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use crate::error::Result;

/// Write `artifact` to `path` with bincode, creating parent directories.
pub fn save_artifact<T: Serialize>(path: &Path, artifact: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let data = bincode::serialize(artifact)?;
    std::fs::write(path, data)?;
    Ok(())
}

pub fn load_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = std::fs::read(path)?;
    let artifact = bincode::deserialize(&data)?;
    Ok(artifact)
}
