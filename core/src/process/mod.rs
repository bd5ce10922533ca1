//! Parent process identification
//!
//! This module answers a single question: which process spawned the caller?
//!
//! ## Platform Support
//!
//! - **Unix**: direct pass-through to `getppid(2)`
//! - **Windows**: there is no native "get my parent" call, so the answer is
//!   recovered from a Toolhelp32 process snapshot (see [`snapshot`])
//!
//! Exactly one backend is compiled into a given build. Neither backend caches
//! anything; every call asks the OS again.
//!
//! ## Failure
//!
//! Failure is reported through the [`INVALID_PROCESS_ID`] sentinel rather than
//! an error channel, so callers can keep using plain comparisons. Treat the
//! sentinel as "parent unknown" and do not retry.

pub mod snapshot;

#[cfg(unix)]
pub mod unix;

#[cfg(unix)]
pub use unix::get_parent_process_id;

#[cfg(windows)]
pub mod windows;

#[cfg(windows)]
pub use windows::get_parent_process_id;

#[cfg(not(any(unix, windows)))]
compile_error!("Unsupported platform: no parent process backend");

/// OS-assigned process identifier
///
/// Identifiers are reused once a process exits, so a value is only meaningful
/// for a short window around the moment it was read.
pub type ProcessId = u32;

/// Sentinel returned when the parent cannot be determined (`-1` as `u32`)
pub const INVALID_PROCESS_ID: ProcessId = ProcessId::MAX;

/// Identifier of the calling process
pub fn current_process_id() -> ProcessId {
    std::process::id()
}

/// Typed variant of [`get_parent_process_id`] mapping the sentinel to `None`
pub fn parent_process_id() -> Option<ProcessId> {
    match get_parent_process_id() {
        INVALID_PROCESS_ID => None,
        pid => Some(pid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_differs_from_self() {
        let ppid = get_parent_process_id();
        assert_ne!(ppid, INVALID_PROCESS_ID);
        assert_ne!(ppid, current_process_id());
    }

    #[test]
    fn test_consecutive_calls_agree() {
        assert_eq!(get_parent_process_id(), get_parent_process_id());
        assert_eq!(parent_process_id(), Some(get_parent_process_id()));
    }

    #[test]
    fn test_concurrent_calls_agree() {
        let expected = get_parent_process_id();
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(get_parent_process_id))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
