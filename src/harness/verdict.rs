//! Runner output classification
//!
//! The external runner reports success by printing a fixed marker. This is the
//! single place that rule lives.

use std::fmt;

/// Marker the runner prints on success
pub const PASS_MARKER: &str = "Test passed!";

/// Outcome of classifying runner output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    Failed,
}

impl Verdict {
    pub fn is_passed(self) -> bool {
        self == Verdict::Passed
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Passed => write!(f, "passed"),
            Verdict::Failed => write!(f, "failed"),
        }
    }
}

/// Passed iff the marker occurs anywhere in the text (case-sensitive,
/// unanchored). Exit status plays no part.
pub fn classify(output: &str) -> Verdict {
    log::debug!("Verifying test status...");

    if output.contains(PASS_MARKER) {
        Verdict::Passed
    } else {
        Verdict::Failed
    }
}
