//! Configuration for archive extraction.

use crate::security::PathSyntax;

/// Properties of the host that change how files are written.
///
/// Resolved once, then carried in [`ExtractOptions`] so the extraction loop
/// never inspects the operating system itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCapabilities {
    /// The host caches code-signing state per executable inode, so an
    /// executable must be removed rather than overwritten in place.
    pub caches_executable_identity: bool,
}

impl HostCapabilities {
    /// Returns the capabilities of the platform this crate was compiled for.
    #[must_use]
    pub const fn detect() -> Self {
        Self {
            caches_executable_identity: cfg!(target_os = "macos"),
        }
    }
}

/// Options for a single extraction run.
///
/// # Examples
///
/// ```
/// use untar_core::ExtractOptions;
///
/// // Host defaults, nothing stripped
/// let options = ExtractOptions::default();
///
/// // Strip the synthetic top-level directory of a release tarball
/// let options = ExtractOptions::new().with_archive_root("project-1.2.0/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Prefix removed from the front of every validated entry path.
    ///
    /// An entry whose cleaned path equals the cleaned prefix is skipped
    /// entirely. The prefix is compared textually and is not validated.
    ///
    /// Default: `""` (nothing stripped).
    pub archive_root: String,

    /// Remove an existing file before writing an executable entry over it.
    ///
    /// Default: [`HostCapabilities::caches_executable_identity`] of the
    /// host (`true` on macOS).
    pub replace_executables: bool,

    /// Path syntax entry names are validated against.
    ///
    /// Default: [`PathSyntax::HOST`].
    pub path_syntax: PathSyntax,
}

impl Default for ExtractOptions {
    /// Creates `ExtractOptions` for the current host.
    ///
    /// Default values:
    /// - `archive_root`: `""`
    /// - `replace_executables`: `true` on macOS, `false` elsewhere
    /// - `path_syntax`: `PathSyntax::HOST`
    fn default() -> Self {
        Self::for_host(HostCapabilities::detect())
    }
}

impl ExtractOptions {
    /// Creates new `ExtractOptions` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options matching the given host capabilities.
    #[must_use]
    pub fn for_host(host: HostCapabilities) -> Self {
        Self {
            archive_root: String::new(),
            replace_executables: host.caches_executable_identity,
            path_syntax: PathSyntax::HOST,
        }
    }

    /// Sets the archive root prefix.
    #[must_use]
    pub fn with_archive_root(mut self, root: impl Into<String>) -> Self {
        self.archive_root = root.into();
        self
    }

    /// Sets whether executables are removed before being overwritten.
    #[must_use]
    pub fn with_replace_executables(mut self, replace: bool) -> Self {
        self.replace_executables = replace;
        self
    }

    /// Sets the path syntax used for entry name validation.
    #[must_use]
    pub fn with_path_syntax(mut self, syntax: PathSyntax) -> Self {
        self.path_syntax = syntax;
        self
    }
}
