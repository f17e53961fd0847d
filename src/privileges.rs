//! Privilege checks

/// Privilege helper for the current process
pub struct PrivilegeHelper;

impl PrivilegeHelper {
    /// Check if the process runs with an effective uid of root
    pub fn is_root() -> bool {
        // SAFETY: geteuid has no preconditions and cannot fail
        unsafe { libc::geteuid() == 0 }
    }

    /// Whether destructive zfs commands can be issued.
    ///
    /// `zfs destroy` needs root unless delegated permissions are set up, so
    /// non-root runs fall back to simulation.
    pub fn can_destroy() -> bool {
        Self::is_root()
    }
}
