use std::path::{Path, PathBuf};

/// Unique store path in the temp dir, removed again when dropped.
pub struct TempDataPath(PathBuf);

impl TempDataPath {
    pub fn new(label: &str) -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("weekly_timetable_{label}_{}_{}.json", std::process::id(), nanos));
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for TempDataPath {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}
