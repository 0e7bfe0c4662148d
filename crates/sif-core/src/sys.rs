//! Host properties used as defaults.

/// Page size assumed when the host cannot be queried.
pub const FALLBACK_PAGE_SIZE: usize = 4096;

/// Memory page size of the running host.
///
/// Data objects are aligned to this boundary unless told otherwise.
pub fn page_size() -> usize {
    #[cfg(unix)]
    {
        // SAFETY: sysconf(3) takes no pointers and only reads a system
        // configuration value.
        #[allow(unsafe_code)]
        let n = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
        if n > 0 {
            return n as usize;
        }
    }

    FALLBACK_PAGE_SIZE
}
