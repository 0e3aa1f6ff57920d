//! Production environment implementations for the demo binary.

use reflow_core::environment::{KeyValueStore, TitleSink};
use std::io::Write;
use std::path::PathBuf;

/// Key-value store backed by one file per key under a data directory.
///
/// Writes are fire-and-forget: failures are logged here and never
/// surfaced to the reducer.
#[derive(Debug, Clone)]
pub struct FsKeyValueStore {
    root: PathBuf,
}

impl FsKeyValueStore {
    /// Creates a store rooted at the given directory
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FsKeyValueStore {
    fn read(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(value) => Some(value),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => None,
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "failed to read entry");
                None
            },
        }
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(error) = std::fs::create_dir_all(&self.root) {
            tracing::warn!(path = %self.root.display(), %error, "failed to create data dir");
            return;
        }

        let path = self.path_for(key);
        if let Err(error) = std::fs::write(&path, value) {
            tracing::warn!(path = %path.display(), %error, "failed to write entry");
        }
    }
}

/// Title sink that sets the terminal window title via OSC 0
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalTitle;

impl TitleSink for TerminalTitle {
    fn set_title(&self, title: &str) {
        let mut stdout = std::io::stdout();
        let _ = write!(stdout, "\x1b]0;{title}\x07");
        let _ = stdout.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!("todo-demo-test-{}", std::process::id()));
        let store = FsKeyValueStore::new(&dir);

        assert_eq!(store.read("todos"), None);

        store.write("todos", "[]");
        assert_eq!(store.read("todos"), Some("[]".to_string()));

        store.write("todos", r#"[{"id":1,"text":"x","completed":false}]"#);
        assert_eq!(
            store.read("todos"),
            Some(r#"[{"id":1,"text":"x","completed":false}]"#.to_string())
        );

        let _ = std::fs::remove_dir_all(&dir);
    }
}
