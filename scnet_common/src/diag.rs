//! Diagnostic path and identity helpers.
//!
//! Small OS-facing services used by operator-facing reporting: the dump
//! directory for automatic diagnostic files, the OS thread id for log
//! attribution, and a fallback renderer for numeric link error codes.

use crate::consts::HOST_SERVICE_NAME;
use std::path::PathBuf;
use tracing::warn;

/// Writable directory for automatic diagnostic dump files.
///
/// `/tmp/scnet/` on unix, `%TEMP%\scnet\` elsewhere. Failure to create the
/// directory is logged, not fatal: the bare temp directory is returned as a
/// fallback so callers can always write somewhere.
pub fn dump_dir() -> PathBuf {
    let base = std::env::temp_dir();
    let dir = base.join(HOST_SERVICE_NAME);
    match std::fs::create_dir_all(&dir) {
        Ok(()) => dir,
        Err(e) => {
            warn!("Unable to create dump dir {:?}: {}", dir, e);
            base
        }
    }
}

/// OS thread id of the calling thread.
#[cfg(target_os = "linux")]
pub fn thread_id() -> u64 {
    // SAFETY: gettid has no preconditions and cannot fail.
    (unsafe { libc::syscall(libc::SYS_gettid) }) as u64
}

/// OS thread id of the calling thread.
#[cfg(not(target_os = "linux"))]
pub fn thread_id() -> u64 {
    use std::hash::{DefaultHasher, Hash, Hasher};
    let mut hasher = DefaultHasher::new();
    std::thread::current().id().hash(&mut hasher);
    hasher.finish()
}

/// Version string of the host driver library.
pub fn driver_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Render a numeric link error code when no message is available.
pub fn describe_code(code: u32) -> String {
    format!("Error: {code:#x}")
}
