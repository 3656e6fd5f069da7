//! Progress reporting for a generation run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pipeline stage named in a progress update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStep {
    Parse,
    Download,
    Zip,
    Generate,
    Save,
    Complete,
}

impl ProgressStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStep::Parse => "parse",
            ProgressStep::Download => "download",
            ProgressStep::Zip => "zip",
            ProgressStep::Generate => "generate",
            ProgressStep::Save => "save",
            ProgressStep::Complete => "complete",
        }
    }
}

impl fmt::Display for ProgressStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `(step, percent, message)` report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub step: ProgressStep,
    /// Percent complete, 0 to 100
    pub progress: f64,
    pub message: String,
}

impl ProgressUpdate {
    pub fn new(step: ProgressStep, progress: f64, message: impl Into<String>) -> Self {
        Self {
            step,
            progress,
            message: message.into(),
        }
    }
}

impl fmt::Display for ProgressUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:>3.0}%] {}: {}", self.progress, self.step, self.message)
    }
}

/// Receives progress updates. Best effort: a sink cannot slow or stop the run.
pub trait ProgressSink {
    fn report(&mut self, update: &ProgressUpdate);
}

impl<F: FnMut(&ProgressUpdate)> ProgressSink for F {
    fn report(&mut self, update: &ProgressUpdate) {
        self(update)
    }
}

/// Discards every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _update: &ProgressUpdate) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        let mut sink = |update: &ProgressUpdate| seen.push(update.step);
        sink.report(&ProgressUpdate::new(ProgressStep::Zip, 60.0, "Packaging"));
        assert_eq!(seen, [ProgressStep::Zip]);
    }

    #[test]
    fn test_step_names() {
        assert_eq!(ProgressStep::Download.to_string(), "download");
        assert_eq!(ProgressStep::Complete.as_str(), "complete");
    }

    #[test]
    fn test_update_display() {
        let update = ProgressUpdate::new(ProgressStep::Save, 95.0, "Saving...");
        assert_eq!(update.to_string(), "[ 95%] save: Saving...");
    }
}
