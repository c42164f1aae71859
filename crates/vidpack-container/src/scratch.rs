use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{ContainerError, Result};
use crate::layout::parse_frame_index;

/// Exclusive, scoped ownership of a frame working directory.
///
/// Acquiring takes a sibling lock file (`<dir>.lock`, holding the owner's
/// pid) so two runs cannot interleave frames in the same directory, then
/// clears stale frame files. A lock whose owner is no longer running is taken
/// over, so a killed run does not block the directory.
/// Dropping removes the frame files and the directory (unless frames are
/// kept) and always releases the lock, on success and error paths alike.
///
/// Only files named like frames are ever deleted. A directory holding
/// anything else is refused rather than wiped.
pub struct ScratchDir {
    path: PathBuf,
    lock: Option<PathBuf>,
    keep: bool,
    temp: Option<tempfile::TempDir>,
}

impl ScratchDir {
    /// Take exclusive ownership of `path`, creating it if needed.
    pub fn acquire(path: impl AsRef<Path>, keep: bool) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ContainerError::io(parent, e))?;
        }

        let lock = lock_path(&path);
        take_lock(&path, &lock)?;

        // From here on Drop releases the lock, including when reset fails.
        let scratch = Self {
            path,
            lock: Some(lock),
            keep,
            temp: None,
        };
        scratch.reset()?;
        debug!(path = %scratch.path.display(), keep, "acquired scratch directory");
        Ok(scratch)
    }

    /// Create a fresh, isolated directory under the system temp dir.
    pub fn temporary(keep: bool) -> Result<Self> {
        let temp = tempfile::Builder::new()
            .prefix("vidpack-")
            .tempdir()
            .map_err(|e| ContainerError::io(std::env::temp_dir(), e))?;

        let scratch = if keep {
            Self {
                path: temp.keep(),
                lock: None,
                keep,
                temp: None,
            }
        } else {
            Self {
                path: temp.path().to_path_buf(),
                lock: None,
                keep,
                temp: Some(temp),
            }
        };
        debug!(path = %scratch.path.display(), keep, "created temporary scratch directory");
        Ok(scratch)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether frame files survive the drop.
    pub fn keeps_frames(&self) -> bool {
        self.keep
    }

    /// Remove all frame files, creating the directory if it is missing.
    pub fn reset(&self) -> Result<()> {
        match std::fs::symlink_metadata(&self.path) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(ContainerError::io(
                    &self.path,
                    std::io::Error::new(ErrorKind::AlreadyExists, "not a directory"),
                ))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return std::fs::create_dir_all(&self.path)
                    .map_err(|e| ContainerError::io(&self.path, e));
            }
            Err(err) => return Err(ContainerError::io(&self.path, err)),
        }

        let entries = std::fs::read_dir(&self.path).map_err(|e| ContainerError::io(&self.path, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| ContainerError::io(&self.path, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if !is_file || parse_frame_index(&name).is_none() {
                return Err(ContainerError::ScratchNotEmpty {
                    path: self.path.clone(),
                    entry: name,
                });
            }
            std::fs::remove_file(entry.path()).map_err(|e| ContainerError::io(entry.path(), e))?;
        }
        Ok(())
    }

    fn clear_frames(&self) {
        let Ok(entries) = std::fs::read_dir(&self.path) else {
            return;
        };
        for entry in entries.flatten() {
            let name = entry.file_name();
            if parse_frame_index(&name.to_string_lossy()).is_some() {
                if let Err(err) = std::fs::remove_file(entry.path()) {
                    warn!(path = %entry.path().display(), %err, "failed removing frame");
                }
            }
        }
        let _ = std::fs::remove_dir(&self.path);
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if !self.keep && self.temp.is_none() {
            self.clear_frames();
        }
        if let Some(lock) = self.lock.take() {
            if let Err(err) = std::fs::remove_file(&lock) {
                warn!(path = %lock.display(), %err, "failed releasing scratch lock");
            }
        }
        debug!(path = %self.path.display(), kept = self.keep, "released scratch directory");
    }
}

impl std::fmt::Debug for ScratchDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScratchDir")
            .field("path", &self.path)
            .field("keep", &self.keep)
            .field("locked", &self.lock.is_some())
            .finish()
    }
}

/// Create `lock` holding this process id, taking over a lock whose owner has died.
fn take_lock(path: &Path, lock: &Path) -> Result<()> {
    match write_lock(lock) {
        Err(err) if err.kind() == ErrorKind::AlreadyExists => {}
        other => return other.map_err(|e| ContainerError::io(lock, e)),
    }

    let owner = std::fs::read_to_string(lock)
        .ok()
        .and_then(|text| text.trim().parse::<u32>().ok());
    match owner {
        Some(pid) if !process_alive(pid) => {
            warn!(lock = %lock.display(), pid, "taking over scratch lock left by a dead process");
            std::fs::remove_file(lock).map_err(|e| ContainerError::io(lock, e))?;
            write_lock(lock).map_err(|err| match err.kind() {
                ErrorKind::AlreadyExists => ContainerError::ScratchBusy {
                    path: path.to_path_buf(),
                    lock: lock.to_path_buf(),
                },
                _ => ContainerError::io(lock, err),
            })
        }
        _ => Err(ContainerError::ScratchBusy {
            path: path.to_path_buf(),
            lock: lock.to_path_buf(),
        }),
    }
}

fn write_lock(lock: &Path) -> std::io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(lock)?;
    if let Err(err) = writeln!(file, "{}", std::process::id()) {
        let _ = std::fs::remove_file(lock);
        return Err(err);
    }
    Ok(())
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    let Ok(pid) = libc::pid_t::try_from(pid) else {
        return false;
    };
    if pid <= 0 {
        return false;
    }
    // SAFETY: signal 0 only checks that the process exists.
    if unsafe { libc::kill(pid, 0) } == 0 {
        return true;
    }
    std::io::Error::last_os_error().raw_os_error() == Some(libc::EPERM)
}

#[cfg(not(unix))]
fn process_alive(_pid: u32) -> bool {
    true
}

/// Sibling lock file guarding `path`: `/x/frames` and `/x/frames/` both map to `/x/frames.lock`.
pub fn lock_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "scratch".into());
    name.push(".lock");
    path.with_file_name(name)
}
