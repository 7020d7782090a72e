//! Lexical path rules for the platforms entry names are checked against.
//!
//! Nothing in this module touches the filesystem. Paths are handled as
//! strings so that Windows rules can be applied (and tested) on Unix hosts
//! and vice versa.

/// How volume qualifiers are recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolumeStyle {
    /// No volumes: every path lives in a single tree rooted at `/`.
    None,
    /// Drive letters (`C:`), UNC shares (`\\host\share`) and device
    /// namespaces (`\\.\dev`, `\\?\dev`).
    Windows,
}

/// Path syntax of a platform: its native separator and volume rules.
///
/// # Examples
///
/// ```
/// use untar_core::security::PathSyntax;
///
/// assert_eq!(PathSyntax::UNIX.clean("a//b/./c/.."), "a/b");
/// assert_eq!(PathSyntax::WINDOWS.clean("a/b\\..\\c"), "a\\c");
/// assert!(PathSyntax::WINDOWS.is_absolute("C:\\Windows"));
/// assert!(!PathSyntax::WINDOWS.is_absolute("C:Windows"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathSyntax {
    separator: char,
    volumes: VolumeStyle,
}

impl PathSyntax {
    /// Slash-separated paths without volumes.
    pub const UNIX: Self = Self {
        separator: '/',
        volumes: VolumeStyle::None,
    };

    /// Backslash-separated paths with drive letters and UNC names. Forward
    /// slashes are accepted as separators too.
    pub const WINDOWS: Self = Self {
        separator: '\\',
        volumes: VolumeStyle::Windows,
    };

    /// The syntax of the platform this crate was compiled for.
    #[cfg(windows)]
    pub const HOST: Self = Self::WINDOWS;

    /// The syntax of the platform this crate was compiled for.
    #[cfg(not(windows))]
    pub const HOST: Self = Self::UNIX;

    /// Builds a syntax from a separator and a volume detection strategy.
    #[must_use]
    pub const fn new(separator: char, volumes: VolumeStyle) -> Self {
        Self { separator, volumes }
    }

    /// Returns the native separator.
    #[inline]
    #[must_use]
    pub const fn separator(&self) -> char {
        self.separator
    }

    /// Returns the volume detection strategy.
    #[inline]
    #[must_use]
    pub const fn volumes(&self) -> VolumeStyle {
        self.volumes
    }

    /// Returns `true` if `c` separates path components.
    #[inline]
    #[must_use]
    pub fn is_separator(&self, c: char) -> bool {
        c == self.separator || (self.volumes == VolumeStyle::Windows && c == '/')
    }

    /// Returns the byte length of the leading volume name, `0` if there is
    /// none.
    #[must_use]
    pub fn volume_name_len(&self, path: &str) -> usize {
        match self.volumes {
            VolumeStyle::None => 0,
            VolumeStyle::Windows => windows_volume_len(path),
        }
    }

    /// Returns `true` if `path` is absolute under this syntax.
    ///
    /// On Windows a drive letter alone (`C:foo`) or a leading separator
    /// alone (`\foo`) does not make a path absolute.
    #[must_use]
    pub fn is_absolute(&self, path: &str) -> bool {
        match self.volumes {
            VolumeStyle::None => path.starts_with(self.separator),
            VolumeStyle::Windows => {
                let len = self.volume_name_len(path);
                if len == 0 {
                    return false;
                }
                if self.starts_with_two_separators(path) {
                    return true;
                }
                path[len..].starts_with(|c| self.is_separator(c))
            }
        }
    }

    /// Replaces each `/` with the native separator.
    #[must_use]
    pub fn from_slash(&self, path: &str) -> String {
        if self.separator == '/' {
            path.to_owned()
        } else {
            path.replace('/', &self.separator.to_string())
        }
    }

    /// Returns the shortest path equivalent to `path` by purely lexical
    /// processing.
    ///
    /// Repeated separators collapse, `.` components are dropped, and each
    /// `name/..` pair is removed. Leading `..` components survive in relative
    /// paths and are dropped directly after a root. An empty result becomes
    /// `.`. The output uses the native separator.
    #[must_use]
    pub fn clean(&self, path: &str) -> String {
        let vol_len = self.volume_name_len(path);
        let (volume, rest) = path.split_at(vol_len);
        let volume = self.from_slash(volume);

        if rest.is_empty() {
            // UNC and device roots are complete paths on their own.
            if vol_len > 1 && !volume.ends_with(':') {
                return volume;
            }
            return volume + ".";
        }

        let rooted = rest.starts_with(|c| self.is_separator(c));
        let mut parts: Vec<&str> = Vec::new();
        for part in rest.split(|c| self.is_separator(c)) {
            match part {
                "" | "." => {}
                ".." => {
                    if parts.last().is_some_and(|last| *last != "..") {
                        parts.pop();
                    } else if !rooted {
                        parts.push("..");
                    }
                }
                name => parts.push(name),
            }
        }

        let mut cleaned = volume;
        if rooted {
            cleaned.push(self.separator);
        }
        cleaned.push_str(&parts.join(&self.separator.to_string()));
        if !rooted && parts.is_empty() {
            cleaned.push('.');
        }
        cleaned
    }

    /// Returns `true` if a cleaned path is `..` or starts with `..` and a
    /// separator.
    #[must_use]
    pub fn is_parent_ref(&self, cleaned: &str) -> bool {
        cleaned == ".."
            || cleaned
                .strip_prefix("..")
                .is_some_and(|rest| rest.starts_with(|c| self.is_separator(c)))
    }

    fn starts_with_two_separators(&self, path: &str) -> bool {
        let mut chars = path.chars();
        matches!(
            (chars.next(), chars.next()),
            (Some(a), Some(b)) if self.is_separator(a) && self.is_separator(b)
        )
    }
}

impl Default for PathSyntax {
    fn default() -> Self {
        Self::HOST
    }
}

fn is_windows_separator(b: u8) -> bool {
    b == b'\\' || b == b'/'
}

/// Length of a leading Windows volume name.
///
/// Recognizes `C:`, `\\host\share` and `\\.\device` / `\\?\device`. A
/// double separator that is not followed by a complete host and share name
/// is not a volume; such paths are still rejected because they start with a
/// separator.
fn windows_volume_len(path: &str) -> usize {
    let b = path.as_bytes();
    if b.len() >= 2 && b[1] == b':' && b[0].is_ascii_alphabetic() {
        return 2;
    }
    if b.len() < 4 || !is_windows_separator(b[0]) || !is_windows_separator(b[1]) {
        return 0;
    }
    if (b[2] == b'.' || b[2] == b'?') && is_windows_separator(b[3]) {
        return component_end(b, 4);
    }
    if is_windows_separator(b[2]) || b[2] == b'.' {
        return 0;
    }
    let host_end = component_end(b, 2);
    if host_end + 1 >= b.len() || is_windows_separator(b[host_end + 1]) {
        return 0;
    }
    component_end(b, host_end + 1)
}

fn component_end(b: &[u8], start: usize) -> usize {
    b[start..]
        .iter()
        .position(|&c| is_windows_separator(c))
        .map_or(b.len(), |offset| start + offset)
}
