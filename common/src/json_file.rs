//! Helpers for reading & writing the pretty-printed JSON record files

use std::{
    fs,
    io::{ErrorKind, Write},
    path::Path,
};

use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;

use crate::errors::StoreError;

/// Reads and parses the JSON file at `path`, returning the default value if
/// the file does not exist
pub(crate) fn read_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T, StoreError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(StoreError::ReadFile(format!("{}: {}", path.display(), e))),
    };

    serde_json::from_str(&contents)
        .map_err(|e| StoreError::Serde(format!("{}: {}", path.display(), e)))
}

/// Serializes `value` as pretty JSON into the file at `path`, creating any
/// missing parent directories.
///
/// The contents are written to a temporary file in the same directory, which
/// then replaces `path`, so an interrupted write leaves the previous file intact.
pub(crate) fn write_pretty<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent)
                .map_err(|e| StoreError::WriteFile(format!("{}: {}", parent.display(), e)))?;
            parent
        }
        None => Path::new("."),
    };

    let mut contents =
        serde_json::to_string_pretty(value).map_err(|e| StoreError::Serde(e.to_string()))?;
    contents.push('\n');

    let mut file = NamedTempFile::new_in(dir)
        .map_err(|e| StoreError::WriteFile(format!("{}: {}", dir.display(), e)))?;
    file.write_all(contents.as_bytes())
        .and_then(|()| file.as_file().sync_all())
        .map_err(|e| StoreError::WriteFile(format!("{}: {}", path.display(), e)))?;
    file.persist(path)
        .map_err(|e| StoreError::WriteFile(format!("{}: {}", path.display(), e.error)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeMap, fs};

    use tempfile::TempDir;

    use super::{read_or_default, write_pretty};

    #[test]
    fn test_overwrite_leaves_only_the_target() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records").join("rinkeby.json");

        let first = BTreeMap::from([("a".to_string(), 1u64)]);
        write_pretty(&path, &first).unwrap();
        let second = BTreeMap::from([("b".to_string(), 2u64)]);
        write_pretty(&path, &second).unwrap();

        let read: BTreeMap<String, u64> = read_or_default(&path).unwrap();
        assert_eq!(read, second);
        assert!(fs::read_to_string(&path).unwrap().ends_with("}\n"));

        let entries: Vec<_> = fs::read_dir(path.parent().unwrap()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_missing_file_reads_default() {
        let dir = TempDir::new().unwrap();
        let read: BTreeMap<String, u64> = read_or_default(&dir.path().join("none.json")).unwrap();
        assert!(read.is_empty());
    }
}
