use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically write `data` to `path` using a tempfile in the same directory.
/// Readers never observe a half-written record.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Create a directory and all parents, idempotent.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

pub fn write_yaml<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let data = serde_yaml::to_string(value)?;
    atomic_write(path, data.as_bytes())
}

/// Read a YAML list, treating a missing or blank file as empty.
pub fn read_yaml_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_yaml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn atomic_write_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/record.yaml");
        atomic_write(&path, b"id: c1").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "id: c1");
    }

    #[test]
    fn missing_list_reads_empty() {
        let dir = TempDir::new().unwrap();
        let items: Vec<String> = read_yaml_list(&dir.path().join("nope.yaml")).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn list_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.yaml");
        write_yaml(&path, &vec!["a".to_string(), "b".to_string()]).unwrap();
        let items: Vec<String> = read_yaml_list(&path).unwrap();
        assert_eq!(items, vec!["a", "b"]);
    }
}
