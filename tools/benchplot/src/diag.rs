//! Terminal diagnostics for benchplot runs.
//!
//! Warnings go to stderr unconditionally. The fit summary and the written
//! chart path go to stdout unless `-q` is given, and `-v` adds the config
//! source, record counts and per-stage wall time.

use std::sync::OnceLock;
use std::time::{Duration, Instant};

/// How much a run reports on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detail {
    /// Nothing on stdout.
    Silent,
    /// Fit summary and chart path.
    Summary,
    /// Summary plus stage diagnostics.
    Trace,
}

impl Detail {
    /// Level selected by the `-q` and `-v` flags, which clap keeps exclusive.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Silent,
            (false, true) => Self::Trace,
            (false, false) => Self::Summary,
        }
    }
}

static DETAIL: OnceLock<Detail> = OnceLock::new();

/// Fix the reporting level for the rest of the run. Later calls are ignored.
pub fn set(detail: Detail) {
    let _ = DETAIL.set(detail);
}

/// Reporting level, [`Detail::Summary`] until [`set`] is called.
pub fn detail() -> Detail {
    DETAIL.get().copied().unwrap_or(Detail::Summary)
}

/// Stdout line shown only with `-v`.
macro_rules! traceln {
    ($($arg:tt)*) => {
        if $crate::diag::detail() == $crate::diag::Detail::Trace {
            println!($($arg)*);
        }
    };
}

pub(crate) use traceln;

/// Stdout line hidden by `-q`.
macro_rules! infoln {
    ($($arg:tt)*) => {
        if $crate::diag::detail() != $crate::diag::Detail::Silent {
            println!($($arg)*);
        }
    };
}

pub(crate) use infoln;

/// Stderr line with a `warning:` prefix.
macro_rules! warnln {
    ($($arg:tt)*) => {
        eprintln!("warning: {}", format_args!($($arg)*));
    };
}

pub(crate) use warnln;

/// Scope guard reporting a stage's wall time under `-v`.
pub struct StageTimer {
    stage: &'static str,
    started: Instant,
}

impl StageTimer {
    /// Begin timing `stage`.
    pub fn start(stage: &'static str) -> Self {
        Self {
            stage,
            started: Instant::now(),
        }
    }

    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Drop for StageTimer {
    fn drop(&mut self) {
        traceln!("  [{}] {:.1?}", self.stage, self.elapsed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_select_detail() {
        assert_eq!(Detail::from_flags(false, false), Detail::Summary);
        assert_eq!(Detail::from_flags(true, false), Detail::Silent);
        assert_eq!(Detail::from_flags(false, true), Detail::Trace);
    }
}
