use std::path::{Path, PathBuf};

/// Name of the per-trip data directory
pub const DATA_DIR_NAME: &str = ".trip";

/// Walk up from `start` looking for an existing `.trip/` directory.
pub fn discover_data_dir(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(DATA_DIR_NAME);
        if candidate.is_dir() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// The data directory to use when starting from `start`: the nearest
/// existing `.trip/` above it, else a new one directly under `start`.
pub fn resolve_data_dir(start: &Path) -> PathBuf {
    discover_data_dir(start).unwrap_or_else(|| start.join(DATA_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn discovers_from_subdirectory() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join(".trip")).unwrap();
        let sub = tmp.path().join("photos/day1");
        fs::create_dir_all(&sub).unwrap();
        assert_eq!(discover_data_dir(&sub), Some(tmp.path().join(".trip")));
    }

    #[test]
    fn falls_back_to_start_directory() {
        let tmp = TempDir::new().unwrap();
        let sub = tmp.path().join("plans");
        fs::create_dir_all(&sub).unwrap();
        // A .trip further up the real filesystem would be found first; the
        // temp dir is assumed to have none above it.
        if discover_data_dir(&sub).is_none() {
            assert_eq!(resolve_data_dir(&sub), sub.join(".trip"));
        }
    }
}
