use anyhow::{anyhow, Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

pub const LOCK_FILE_NAME: &str = "vaultren.lock";
const STALE_LOCK_TIMEOUT_SECS: u64 = 300;

/// Held for the length of a batch rename so a second run cannot start
/// while one is still moving files. The file holds `pid:timestamp`.
#[derive(Debug)]
pub struct BatchLock {
    path: PathBuf,
    owner: LockOwner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LockOwner {
    pid: u32,
    timestamp: u64,
}

impl LockOwner {
    fn current() -> Self {
        Self {
            pid: process::id(),
            timestamp: unix_now(),
        }
    }

    fn parse(content: &str) -> Option<Self> {
        let (pid, timestamp) = content.trim().split_once(':')?;
        Some(Self {
            pid: pid.parse().ok()?,
            timestamp: timestamp.parse().ok()?,
        })
    }

    fn is_stale(&self) -> bool {
        unix_now().saturating_sub(self.timestamp) > STALE_LOCK_TIMEOUT_SECS
    }

    fn render(&self) -> String {
        format!("{}:{}", self.pid, self.timestamp)
    }
}

impl BatchLock {
    pub fn acquire(vaultren_dir: &Path) -> Result<Self> {
        let path = vaultren_dir.join(LOCK_FILE_NAME);

        if path.exists() {
            let content = fs::read_to_string(&path).context("Failed to read lock file")?;
            match LockOwner::parse(&content) {
                Some(holder) if !holder.is_stale() && is_process_running(holder.pid) => {
                    return Err(anyhow!(
                        "Another batch rename is already running (PID: {}). \
                        If this is incorrect, remove the lock file at: {}",
                        holder.pid,
                        path.display()
                    ));
                },
                _ => {
                    tracing::debug!(path = %path.display(), "removing abandoned lock");
                    fs::remove_file(&path).context("Failed to remove abandoned lock file")?;
                },
            }
        }

        fs::create_dir_all(vaultren_dir).context("Failed to create .vaultren directory")?;

        let owner = LockOwner::current();
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .context("Failed to create lock file")?;
        file.write_all(owner.render().as_bytes())
            .context("Failed to write lock file")?;

        Ok(Self { path, owner })
    }

    pub fn release(self) -> Result<()> {
        self.remove_if_owned()
    }

    fn remove_if_owned(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let content = fs::read_to_string(&self.path).context("Failed to read lock file")?;
        if LockOwner::parse(&content) == Some(self.owner) {
            fs::remove_file(&self.path).context("Failed to remove lock file")?;
        }
        Ok(())
    }
}

impl Drop for BatchLock {
    fn drop(&mut self) {
        let _ = self.remove_if_owned();
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(unix)]
fn is_process_running(pid: u32) -> bool {
    // Signal 0 only checks that the process exists
    #[allow(clippy::cast_possible_wrap)]
    unsafe {
        libc::kill(pid as libc::pid_t, 0) == 0
    }
}

#[cfg(windows)]
fn is_process_running(pid: u32) -> bool {
    use winapi::um::handleapi::CloseHandle;
    use winapi::um::processthreadsapi::OpenProcess;
    use winapi::um::winnt::PROCESS_QUERY_INFORMATION;

    unsafe {
        let handle = OpenProcess(PROCESS_QUERY_INFORMATION, 0, pid);
        if handle.is_null() {
            false
        } else {
            CloseHandle(handle);
            true
        }
    }
}

#[cfg(not(any(unix, windows)))]
fn is_process_running(_pid: u32) -> bool {
    false
}
