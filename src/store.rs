//! Persistence for the project descriptor.
//!
//! The build core never touches `project.json` directly; it goes through a
//! [`ConfigStore`] handle so tests can swap in a [`MemoryStore`] or a store
//! rooted in a temp directory.

use crate::config::{DESCRIPTOR_FILE, ProjectDescriptor};
use crate::error::BuildError;
use serde::Serialize;
use std::cell::RefCell;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub trait ConfigStore {
    /// Reads and validates the descriptor.
    fn load(&self) -> Result<ProjectDescriptor, BuildError>;

    /// Replaces the stored descriptor with `descriptor` in full.
    fn save(&self, descriptor: &ProjectDescriptor) -> Result<(), BuildError>;
}

/// `project.json` on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store for `<root>/project.json`.
    pub fn in_project(root: &Path) -> Self {
        Self::new(root.join(DESCRIPTOR_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

impl ConfigStore for FileStore {
    fn load(&self) -> Result<ProjectDescriptor, BuildError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(BuildError::ConfigNotFound(self.path.clone()));
            }
            Err(e) => return Err(BuildError::Io(e)),
        };

        serde_json::from_str(&content).map_err(|e| BuildError::ConfigMalformed {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    fn save(&self, descriptor: &ProjectDescriptor) -> Result<(), BuildError> {
        let mut content = to_pretty_json(descriptor)?;
        content.push('\n');

        // A symlinked descriptor is rewritten at its target so the link
        // survives the rename below.
        let target = match fs::canonicalize(&self.path) {
            Ok(resolved) => resolved,
            Err(e) if e.kind() == io::ErrorKind::NotFound => self.path.clone(),
            Err(e) => return Err(BuildError::Io(e)),
        };

        // Write next to the target and rename over it, so a crash mid-write
        // leaves the previous descriptor intact.
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        if let Ok(existing) = fs::metadata(&target) {
            tmp.as_file().set_permissions(existing.permissions())?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&target).map_err(|e| BuildError::Io(e.error))?;
        Ok(())
    }
}

/// In-memory descriptor, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    descriptor: RefCell<Option<ProjectDescriptor>>,
    saves: RefCell<usize>,
}

impl MemoryStore {
    pub fn new(descriptor: ProjectDescriptor) -> Self {
        Self {
            descriptor: RefCell::new(Some(descriptor)),
            saves: RefCell::new(0),
        }
    }

    /// A store with nothing in it; `load` reports `ConfigNotFound`.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<ProjectDescriptor> {
        self.descriptor.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl ConfigStore for MemoryStore {
    fn load(&self) -> Result<ProjectDescriptor, BuildError> {
        self.descriptor
            .borrow()
            .clone()
            .ok_or_else(|| BuildError::ConfigNotFound(PathBuf::from(DESCRIPTOR_FILE)))
    }

    fn save(&self, descriptor: &ProjectDescriptor) -> Result<(), BuildError> {
        *self.descriptor.borrow_mut() = Some(descriptor.clone());
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}

/// Pretty JSON with 4-space indentation, the layout `project.json` ships with.
pub fn to_pretty_json(descriptor: &ProjectDescriptor) -> Result<String, BuildError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    descriptor
        .serialize(&mut ser)
        .map_err(|e| BuildError::Io(io::Error::other(e)))?;
    String::from_utf8(buf).map_err(|e| BuildError::Io(io::Error::other(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DESCRIPTOR: &str = r#"{
    "buildpath": "./build/output",
    "includepaths": ["./include/*", "./vendor"],
    "srcpath": "./src/main",
    "version": "1.0",
    "type": "elf",
    "name": "demo"
}"#;

    #[test]
    fn test_load_missing_file_is_config_not_found() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::in_project(dir.path());
        assert!(matches!(store.load(), Err(BuildError::ConfigNotFound(_))));
    }

    #[test]
    fn test_load_invalid_json_is_malformed() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(DESCRIPTOR_FILE), "{ not json").unwrap();
        let store = FileStore::in_project(dir.path());
        assert!(matches!(
            store.load(),
            Err(BuildError::ConfigMalformed { .. })
        ));
    }

    #[test]
    fn test_load_missing_version_is_malformed() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(DESCRIPTOR_FILE),
            r#"{"buildpath": "b", "srcpath": "s", "type": "elf"}"#,
        )
        .unwrap();
        let err = FileStore::in_project(dir.path()).load().unwrap_err();
        match err {
            BuildError::ConfigMalformed { reason, .. } => assert!(reason.contains("version")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_null_optional_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DESCRIPTOR_FILE);
        let content = r#"{"buildpath": "b", "srcpath": "s", "type": "elf", "version": "1.0", "flags": null}"#;
        fs::write(&path, content).unwrap();

        let err = FileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, BuildError::ConfigMalformed { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DESCRIPTOR_FILE);
        fs::write(&path, DESCRIPTOR).unwrap();
        let store = FileStore::new(&path);

        let loaded = store.load().unwrap();
        store.save(&loaded).unwrap();
        let reloaded = store.load().unwrap();
        assert_eq!(loaded, reloaded);
        assert_eq!(reloaded.extra["name"], "demo");

        let before: serde_json::Value = serde_json::from_str(DESCRIPTOR).unwrap();
        let after: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_save_overwrites_whole_file() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::in_project(dir.path());
        fs::write(store.path(), DESCRIPTOR).unwrap();

        let mut desc = store.load().unwrap();
        desc.version = "1.1".to_string();
        store.save(&desc).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert!(content.contains("\"version\": \"1.1\""));
        assert!(content.starts_with("{\n    \""));
        assert!(content.ends_with("}\n"));
        assert_eq!(store.load().unwrap().version, "1.1");
    }

    #[cfg(unix)]
    #[test]
    fn test_save_keeps_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = FileStore::in_project(dir.path());
        fs::write(store.path(), DESCRIPTOR).unwrap();
        fs::set_permissions(store.path(), fs::Permissions::from_mode(0o644)).unwrap();

        let mut desc = store.load().unwrap();
        desc.version = "1.1".to_string();
        store.save(&desc).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_through_symlink_updates_target() {
        let dir = TempDir::new().unwrap();
        let shared = dir.path().join("shared.json");
        fs::write(&shared, DESCRIPTOR).unwrap();
        let link = dir.path().join(DESCRIPTOR_FILE);
        std::os::unix::fs::symlink(&shared, &link).unwrap();

        let store = FileStore::new(&link);
        let mut desc = store.load().unwrap();
        desc.version = "1.1".to_string();
        store.save(&desc).unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert!(fs::read_to_string(&shared).unwrap().contains("\"version\": \"1.1\""));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::empty();
        assert!(matches!(store.load(), Err(BuildError::ConfigNotFound(_))));

        let desc = ProjectDescriptor::scaffold(false);
        store.save(&desc).unwrap();
        assert_eq!(store.load().unwrap(), desc);
        assert_eq!(store.save_count(), 1);
    }
}
