//! Per-run extraction state.

use std::path::Path;
use std::time::Duration;
use std::time::Instant;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use log::warn;

use crate::copy::CopyBuffer;
use crate::extraction::dirs::DirCache;

/// State private to one extraction run.
///
/// Created when a run starts and dropped when it ends, so nothing leaks
/// between runs, including the once-per-run warning below.
#[derive(Debug)]
pub struct RunContext {
    started_at: SystemTime,
    timer: Instant,
    /// Directories created so far.
    pub dirs: DirCache,
    /// Buffer shared by all payload copies.
    pub buffer: CopyBuffer,
    files_written: usize,
    mtime_error_logged: bool,
}

impl RunContext {
    /// Starts a run, capturing the current time as its clock reference.
    #[must_use]
    pub fn start() -> Self {
        Self::started_at(SystemTime::now())
    }

    /// Starts a run with an explicit clock reference.
    #[must_use]
    pub fn started_at(started_at: SystemTime) -> Self {
        Self {
            started_at,
            timer: Instant::now(),
            dirs: DirCache::new(),
            buffer: CopyBuffer::new(),
            files_written: 0,
            mtime_error_logged: false,
        }
    }

    /// Returns the clock reference of this run.
    #[inline]
    pub fn start_time(&self) -> SystemTime {
        self.started_at
    }

    /// Returns the time elapsed since the run started.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.timer.elapsed()
    }

    /// Converts an entry mtime to the time to apply.
    ///
    /// Timestamps after the start of the run are clamped to it, so clock
    /// skew on the machine that built the archive never yields files from
    /// the future.
    #[must_use]
    pub fn clamp_mtime(&self, secs: u64) -> SystemTime {
        UNIX_EPOCH
            .checked_add(Duration::from_secs(secs))
            .filter(|mtime| *mtime <= self.started_at)
            .unwrap_or(self.started_at)
    }

    /// Records a failure to apply a modification time.
    ///
    /// Only the first failure of a run is logged.
    pub fn mtime_failed(&mut self, path: &Path, err: &std::io::Error) {
        if !self.mtime_error_logged {
            warn!(
                "error changing modtime of {}: {err} (further modtime errors suppressed)",
                path.display()
            );
            self.mtime_error_logged = true;
        }
    }

    /// Returns `true` once an mtime failure has been logged in this run.
    #[inline]
    pub fn mtime_error_logged(&self) -> bool {
        self.mtime_error_logged
    }

    /// Counts a regular file as written.
    #[inline]
    pub fn file_written(&mut self) {
        self.files_written += 1;
    }

    /// Returns the number of regular files written.
    #[inline]
    pub fn files_written(&self) -> usize {
        self.files_written
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn test_clamp_past_mtime_unchanged() {
        let ctx = RunContext::started_at(at(2_000_000));
        assert_eq!(ctx.clamp_mtime(1_000_000), at(1_000_000));
        assert_eq!(ctx.clamp_mtime(2_000_000), at(2_000_000));
    }

    #[test]
    fn test_clamp_future_mtime() {
        let ctx = RunContext::started_at(at(2_000_000));
        assert_eq!(ctx.clamp_mtime(2_000_001), at(2_000_000));
        assert_eq!(ctx.clamp_mtime(u64::MAX), at(2_000_000));
    }

    #[test]
    fn test_mtime_error_logged_once() {
        let mut ctx = RunContext::start();
        assert!(!ctx.mtime_error_logged());

        let err = std::io::Error::other("unsupported");
        ctx.mtime_failed(Path::new("a"), &err);
        assert!(ctx.mtime_error_logged());
        ctx.mtime_failed(Path::new("b"), &err);
        assert!(ctx.mtime_error_logged());
    }

    #[test]
    fn test_fresh_context_per_run() {
        let mut first = RunContext::start();
        first.mtime_failed(Path::new("a"), &std::io::Error::other("x"));
        first.file_written();

        let second = RunContext::start();
        assert!(!second.mtime_error_logged());
        assert_eq!(second.files_written(), 0);
        assert!(second.dirs.is_empty());
        assert_eq!(first.files_written(), 1);
    }
}
