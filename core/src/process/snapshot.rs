//! Parent lookup by scanning a point-in-time process snapshot
//!
//! Platforms without a native parent query (Windows) can still enumerate every
//! running process together with the identifier of its parent. The scan below
//! walks such an enumeration until it finds the caller's own entry.
//!
//! The OS calls are behind [`ProcessSnapshotApi`] so the scan, and in
//! particular its handle bookkeeping, is the same code on every platform.
//!
//! ## Handle lifetime
//!
//! - Snapshot creation fails: nothing was acquired, nothing is released
//! - First read fails, no entry matches, or an entry matches: the snapshot is
//!   released exactly once, by [`SnapshotGuard`]

use super::{ProcessId, INVALID_PROCESS_ID};

/// One row of a process snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessEntry {
    /// Identifier of the enumerated process
    pub pid: ProcessId,
    /// Identifier the OS recorded as its parent
    pub parent_pid: ProcessId,
}

/// OS primitives needed to enumerate processes
///
/// Iteration order is whatever the OS provides and may differ between calls.
pub trait ProcessSnapshotApi {
    /// An open snapshot; owns the OS resource until passed to `close`
    type Handle;

    /// Take a snapshot of all running processes, `None` if the OS refuses
    fn create_snapshot(&self) -> Option<Self::Handle>;

    /// Read the first entry of the snapshot
    fn first(&self, handle: &mut Self::Handle) -> Option<ProcessEntry>;

    /// Read the entry after the last one returned, `None` once exhausted
    fn next(&self, handle: &mut Self::Handle) -> Option<ProcessEntry>;

    /// Release the snapshot
    fn close(&self, handle: &mut Self::Handle);

    /// Identifier of the calling process
    fn current_process_id(&self) -> ProcessId;
}

/// Releases a snapshot when dropped
pub struct SnapshotGuard<'a, A: ProcessSnapshotApi> {
    api: &'a A,
    handle: A::Handle,
}

impl<'a, A: ProcessSnapshotApi> SnapshotGuard<'a, A> {
    /// Take ownership of an open snapshot
    pub fn new(api: &'a A, handle: A::Handle) -> Self {
        Self { api, handle }
    }

    fn first(&mut self) -> Option<ProcessEntry> {
        self.api.first(&mut self.handle)
    }

    fn next(&mut self) -> Option<ProcessEntry> {
        self.api.next(&mut self.handle)
    }
}

impl<A: ProcessSnapshotApi> Drop for SnapshotGuard<'_, A> {
    fn drop(&mut self) {
        self.api.close(&mut self.handle);
    }
}

/// Find the caller's parent by scanning a fresh snapshot
///
/// Returns [`INVALID_PROCESS_ID`] if the snapshot cannot be taken, cannot be
/// read, or does not contain the caller. Stops at the first matching entry.
pub fn find_parent_process_id<A: ProcessSnapshotApi>(api: &A) -> ProcessId {
    let mut ppid = INVALID_PROCESS_ID;

    let Some(handle) = api.create_snapshot() else {
        return ppid;
    };
    let mut snapshot = SnapshotGuard::new(api, handle);

    let pid = api.current_process_id();
    let mut entry = snapshot.first();
    while let Some(current) = entry {
        if current.pid == pid {
            ppid = current.parent_pid;
            break;
        }
        entry = snapshot.next();
    }

    ppid
}
