//! Windows parent lookup over Toolhelp32 snapshots
//!
//! Windows has no `getppid`. Every `PROCESSENTRY32W` returned by a
//! `TH32CS_SNAPPROCESS` snapshot carries `th32ParentProcessID`, so the parent
//! is read from the caller's own row.

// Allow unsafe code for this module since the Toolhelp32 API is raw FFI
#![allow(unsafe_code)]

use super::snapshot::{find_parent_process_id, ProcessEntry, ProcessSnapshotApi};
use super::ProcessId;
use windows_sys::Win32::Foundation::{CloseHandle, HANDLE, INVALID_HANDLE_VALUE};
use windows_sys::Win32::System::Diagnostics::ToolHelp::{
    CreateToolhelp32Snapshot, Process32FirstW, Process32NextW, PROCESSENTRY32W,
    TH32CS_SNAPPROCESS,
};
use windows_sys::Win32::System::Threading::GetCurrentProcessId;

/// Toolhelp32-backed [`ProcessSnapshotApi`]
#[derive(Debug, Default, Clone, Copy)]
pub struct Toolhelp;

/// An open `TH32CS_SNAPPROCESS` snapshot and its read buffer
pub struct ToolhelpSnapshot {
    handle: HANDLE,
    entry: PROCESSENTRY32W,
}

impl ToolhelpSnapshot {
    fn current(&self) -> ProcessEntry {
        ProcessEntry {
            pid: self.entry.th32ProcessID,
            parent_pid: self.entry.th32ParentProcessID,
        }
    }
}

impl ProcessSnapshotApi for Toolhelp {
    type Handle = ToolhelpSnapshot;

    fn create_snapshot(&self) -> Option<ToolhelpSnapshot> {
        // Safety: no pointers are passed; the returned handle is checked below
        let handle = unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0) };
        if handle == INVALID_HANDLE_VALUE {
            return None;
        }

        // Safety: PROCESSENTRY32W is plain data, all-zero is a valid value
        let mut entry: PROCESSENTRY32W = unsafe { std::mem::zeroed() };
        entry.dwSize = std::mem::size_of::<PROCESSENTRY32W>() as u32;

        Some(ToolhelpSnapshot { handle, entry })
    }

    fn first(&self, snapshot: &mut ToolhelpSnapshot) -> Option<ProcessEntry> {
        // Safety: the handle is open and `entry.dwSize` is initialised
        let ok = unsafe { Process32FirstW(snapshot.handle, &mut snapshot.entry) };
        (ok != 0).then(|| snapshot.current())
    }

    fn next(&self, snapshot: &mut ToolhelpSnapshot) -> Option<ProcessEntry> {
        // Safety: as for `first`
        let ok = unsafe { Process32NextW(snapshot.handle, &mut snapshot.entry) };
        (ok != 0).then(|| snapshot.current())
    }

    fn close(&self, snapshot: &mut ToolhelpSnapshot) {
        // Safety: the guard calls this exactly once per successfully opened handle
        unsafe {
            CloseHandle(snapshot.handle);
        }
    }

    fn current_process_id(&self) -> ProcessId {
        // Safety: no arguments, cannot fail
        unsafe { GetCurrentProcessId() }
    }
}

/// Return the parent process identifier of the caller
///
/// Returns [`super::INVALID_PROCESS_ID`] when the snapshot cannot be taken or
/// does not list the caller. Whatever the OS currently records as the parent is
/// reported, even if that process has since exited.
pub fn get_parent_process_id() -> ProcessId {
    find_parent_process_id(&Toolhelp)
}
