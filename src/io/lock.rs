use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Advisory lock serializing store writes between a running TUI and
/// CLI invocations against the same data directory.
///
/// Uses flock on Unix. The lock file itself is left in place; removing it
/// while another process waits on it would split the lock in two.
pub struct FileLock {
    _file: File,
}

#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("could not create lock file at {path}: {source}")]
    CreateError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not acquire lock on {path}: another trip process is writing")]
    Timeout { path: PathBuf },
}

pub fn lock_path(dir: &Path) -> PathBuf {
    dir.join(".lock")
}

impl FileLock {
    /// Acquire the lock for `dir`, waiting up to `timeout`.
    pub fn acquire(dir: &Path, timeout: Duration) -> Result<Self, LockError> {
        let path = lock_path(dir);
        let create_err = |source| LockError::CreateError {
            path: path.clone(),
            source,
        };
        fs::create_dir_all(dir).map_err(create_err)?;
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .map_err(create_err)?;

        let start = Instant::now();
        loop {
            match try_lock(&file) {
                Ok(()) => return Ok(FileLock { _file: file }),
                Err(_) if start.elapsed() < timeout => {
                    std::thread::sleep(Duration::from_millis(10));
                }
                Err(_) => return Err(LockError::Timeout { path }),
            }
        }
    }

    /// Acquire with the default 5 second timeout
    pub fn acquire_default(dir: &Path) -> Result<Self, LockError> {
        Self::acquire(dir, Duration::from_secs(5))
    }
}

#[cfg(unix)]
fn try_lock(file: &File) -> Result<(), std::io::Error> {
    use std::os::unix::io::AsRawFd;
    let fd = file.as_raw_fd();
    let result = unsafe { libc::flock(fd, libc::LOCK_EX | libc::LOCK_NB) };
    if result == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn try_lock(_file: &File) -> Result<(), std::io::Error> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn acquire_release_acquire() {
        let tmp = TempDir::new().unwrap();
        let lock = FileLock::acquire_default(tmp.path());
        assert!(lock.is_ok());
        drop(lock);
        assert!(FileLock::acquire_default(tmp.path()).is_ok());
    }

    #[test]
    fn creates_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(".trip");
        let _lock = FileLock::acquire_default(&dir).unwrap();
        assert!(lock_path(&dir).exists());
    }

    #[cfg(unix)]
    #[test]
    fn contention_times_out() {
        let tmp = TempDir::new().unwrap();
        let _held = FileLock::acquire_default(tmp.path()).unwrap();
        let second = FileLock::acquire(tmp.path(), Duration::from_millis(50));
        assert!(matches!(second, Err(LockError::Timeout { .. })));
    }
}
