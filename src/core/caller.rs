//! Call-site capture
//!
//! The encoders want the source location of the logging call, not of the
//! logger internals. Every public emit method is `#[track_caller]`, so
//! capturing [`std::panic::Location`] at the top of the call chain resolves
//! to the caller's file and line even when one emit method delegates to
//! another.

use std::fmt;
use std::panic::Location;

/// Source location of a logging call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerSite {
    file: &'static str,
    line: u32,
}

impl CallerSite {
    /// Capture the call site of the function invoking this one. Must be
    /// called from a `#[track_caller]` context to be meaningful.
    #[track_caller]
    #[must_use]
    pub fn here() -> Self {
        let loc = Location::caller();
        Self {
            file: loc.file(),
            line: loc.line(),
        }
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// File path trimmed to its last two segments, as the plain-text
    /// encoder prints it.
    pub fn trimmed_file(&self) -> &'static str {
        trim_caller_path(self.file)
    }
}

impl fmt::Display for CallerSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Return the last two segments of a path.
fn trim_caller_path(path: &'static str) -> &'static str {
    let Some(idx) = path.rfind('/') else {
        return path;
    };
    let Some(idx) = path[..idx].rfind('/') else {
        return path;
    };
    &path[idx + 1..]
}
