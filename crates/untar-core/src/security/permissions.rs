//! Permission bits applied to extracted entries.

/// Mask of the permission bits kept from an entry's mode.
///
/// Setuid, setgid and sticky bits are never carried over.
pub const PERMISSION_MASK: u32 = 0o777;

/// Returns the permission bits of a raw tar mode.
///
/// # Examples
///
/// ```
/// use untar_core::security::sanitize_permissions;
///
/// assert_eq!(sanitize_permissions(0o104_755), 0o755);
/// assert_eq!(sanitize_permissions(0o4755), 0o755);
/// ```
#[inline]
#[must_use]
pub const fn sanitize_permissions(mode: u32) -> u32 {
    mode & PERMISSION_MASK
}

/// Returns the permission bits for a directory implied by a file entry.
///
/// The file's permission bits are used, with the search bit added for every
/// class that may read, so `0o644` becomes `0o755`.
#[inline]
#[must_use]
pub const fn implied_dir_permissions(file_mode: u32) -> u32 {
    let perm = sanitize_permissions(file_mode);
    perm | ((perm & 0o444) >> 2)
}

/// Returns `true` if any execute bit is set.
#[inline]
#[must_use]
pub const fn is_executable(mode: u32) -> bool {
    mode & 0o111 != 0
}
