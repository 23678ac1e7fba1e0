//! Config file storage in the WireGuard config directory
//!
//! Plain I/O over `<prefix><tag>-template.conf` and `<prefix><tag>.conf`.
//! Permission failures surface as [`Error::PermissionDenied`].
//!
//! Lines are handled as bytes so user configs with non-UTF-8 content pass
//! through a merge unchanged.

use std::path::{Path, PathBuf};

use tdemon_core::prelude::*;
use tdemon_core::Environment;

/// Reads and writes template and merged config files under one directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    root: PathBuf,
    prefix: String,
}

impl ConfigStore {
    pub fn new(root: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            prefix: prefix.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// e.g. `/etc/wireguard/julo-prod-template.conf`
    pub fn template_path(&self, env: Environment) -> PathBuf {
        self.root
            .join(format!("{}-template.conf", env.interface_name(&self.prefix)))
    }

    /// e.g. `/etc/wireguard/julo-prod.conf`
    pub fn config_path(&self, env: Environment) -> PathBuf {
        self.root
            .join(format!("{}.conf", env.interface_name(&self.prefix)))
    }

    pub fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    pub fn read(&self, path: &Path) -> Result<Vec<u8>> {
        std::fs::read(path).map_err(|e| Error::from_io("read", path, e))
    }

    pub fn read_to_string(&self, path: &Path) -> Result<String> {
        String::from_utf8(self.read(path)?)
            .map_err(|e| Error::file_access(path, e.to_string()))
    }

    /// Read a file as raw lines with `\n` / `\r\n` terminators stripped
    pub fn read_lines(&self, path: &Path) -> Result<Vec<Vec<u8>>> {
        Ok(split_lines(&self.read(path)?))
    }

    /// Overwrite `path` with `contents`
    pub fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
        std::fs::write(path, contents).map_err(|e| Error::from_io("write", path, e))?;
        debug!("Wrote {}", path.display());
        Ok(())
    }

    /// Overwrite `path` with each line followed by a newline
    pub fn write_lines<S: AsRef<[u8]>>(&self, path: &Path, lines: &[S]) -> Result<()> {
        let mut contents = Vec::new();
        for line in lines {
            contents.extend_from_slice(line.as_ref());
            contents.push(b'\n');
        }
        self.write(path, contents)
    }

    /// Create the config directory if it does not exist
    pub fn ensure_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root).map_err(|e| Error::from_io("create", &self.root, e))
    }
}

fn split_lines(bytes: &[u8]) -> Vec<Vec<u8>> {
    let mut lines: Vec<Vec<u8>> = bytes
        .split(|b| *b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line).to_vec())
        .collect();
    // A trailing newline (or an empty file) leaves one empty piece
    if bytes.is_empty() || bytes.ends_with(b"\n") {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_paths_follow_naming_convention() {
        let store = ConfigStore::new("/etc/wireguard", "julo-");
        assert_eq!(
            store.template_path(Environment::Production),
            PathBuf::from("/etc/wireguard/julo-prod-template.conf")
        );
        assert_eq!(
            store.config_path(Environment::NonProduction),
            PathBuf::from("/etc/wireguard/julo-nonprod.conf")
        );
    }

    #[test]
    fn test_write_lines_then_read_lines() {
        let temp = tempdir().unwrap();
        let store = ConfigStore::new(temp.path(), "julo-");
        let path = store.config_path(Environment::Production);

        store.write_lines(&path, &["[Interface]", "MTU = 1200"]).unwrap();

        assert_eq!(store.read_to_string(&path).unwrap(), "[Interface]\nMTU = 1200\n");
        assert_eq!(
            store.read_lines(&path).unwrap(),
            vec![b"[Interface]".to_vec(), b"MTU = 1200".to_vec()]
        );
    }

    #[test]
    fn test_non_utf8_lines_round_trip() {
        let temp = tempdir().unwrap();
        let store = ConfigStore::new(temp.path(), "julo-");
        let path = temp.path().join("latin1.conf");
        let contents = b"# caf\xe9\r\n[Interface]\nMTU = 1200".to_vec();
        std::fs::write(&path, &contents).unwrap();

        let lines = store.read_lines(&path).unwrap();
        assert_eq!(
            lines,
            vec![b"# caf\xe9".to_vec(), b"[Interface]".to_vec(), b"MTU = 1200".to_vec()]
        );

        let out = temp.path().join("out.conf");
        store.write_lines(&out, &lines).unwrap();
        assert_eq!(std::fs::read(&out).unwrap(), b"# caf\xe9\n[Interface]\nMTU = 1200\n");
    }

    #[test]
    fn test_split_lines_edges() {
        assert!(split_lines(b"").is_empty());
        assert_eq!(split_lines(b"\n"), vec![Vec::<u8>::new()]);
        assert_eq!(split_lines(b"a\n\nb\n"), vec![b"a".to_vec(), Vec::new(), b"b".to_vec()]);
    }

    #[test]
    fn test_write_overwrites() {
        let temp = tempdir().unwrap();
        let store = ConfigStore::new(temp.path(), "julo-");
        let path = store.config_path(Environment::Production);

        store.write(&path, "old contents that are longer\n").unwrap();
        store.write(&path, "new\n").unwrap();

        assert_eq!(store.read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn test_missing_file_is_file_access_error() {
        let temp = tempdir().unwrap();
        let store = ConfigStore::new(temp.path(), "julo-");
        let path = store.config_path(Environment::Production);

        assert!(!store.exists(&path));
        let err = store.read_lines(&path).unwrap_err();
        assert!(matches!(err, Error::FileAccess { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_file_reports_read_permission() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().unwrap();
        let store = ConfigStore::new(temp.path(), "julo-");
        let path = temp.path().join("locked.conf");
        std::fs::write(&path, "x").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores file modes
        if std::fs::read(&path).is_ok() {
            return;
        }

        let err = store.read_lines(&path).unwrap_err();
        assert!(matches!(err, Error::PermissionDenied { operation: "read", .. }));
        assert!(err.to_string().contains("permissions to read"));
    }

    #[test]
    fn test_ensure_dir_creates_nested() {
        let temp = tempdir().unwrap();
        let store = ConfigStore::new(temp.path().join("a").join("b"), "julo-");
        store.ensure_dir().unwrap();
        assert!(store.root().is_dir());
    }
}
