//! Unix parent lookup: the native `getppid(2)` facility, unchanged

use super::ProcessId;

/// Return the parent process identifier of the caller
///
/// `getppid` cannot fail, so the sentinel is never produced here. After the
/// original parent exits the kernel reports whichever process adopted us.
pub fn get_parent_process_id() -> ProcessId {
    nix::unistd::getppid().as_raw() as ProcessId
}
