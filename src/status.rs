use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Info,
    Error,
}

/// Sink for user-visible status.
///
/// `log` appends a line to the persistent status log, `notify` raises an
/// interruptive notification. Every failure goes through both. The progress
/// hooks default to no-ops.
pub trait StatusReporter {
    fn log(&self, line: &str);
    fn notify(&self, notice: Notice, title: &str, message: &str);

    fn on_launch_start(&self, _total: usize) {}
    fn on_launch_progress(&self, _launched: usize, _total: usize) {}
    fn on_launch_complete(&self) {}

    /// Logs the line and raises an error notification with the same text.
    fn fail(&self, message: &str) {
        self.log(&format!("Error: {}", message));
        self.notify(Notice::Error, "Error", message);
    }
}

/// No-op reporter for silent operation.
pub struct SilentReporter;

impl StatusReporter for SilentReporter {
    fn log(&self, _line: &str) {}
    fn notify(&self, _notice: Notice, _title: &str, _message: &str) {}
}

/// Keeps every line and notification in memory.
#[derive(Default)]
pub struct RecordingReporter {
    lines: Mutex<Vec<String>>,
    notices: Mutex<Vec<(Notice, String)>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn notices(&self) -> Vec<(Notice, String)> {
        self.notices.lock().map(|n| n.clone()).unwrap_or_default()
    }

    pub fn error_count(&self) -> usize {
        self.notices()
            .iter()
            .filter(|(notice, _)| *notice == Notice::Error)
            .count()
    }
}

impl StatusReporter for RecordingReporter {
    fn log(&self, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line.to_string());
        }
    }

    fn notify(&self, notice: Notice, _title: &str, message: &str) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push((notice, message.to_string()));
        }
    }
}
