use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::status::{Notice, StatusReporter};
use glob::Pattern;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

mod terminal;

pub use terminal::TerminalLauncher;

/// A started script. The process is never waited on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchHandle {
    pub script: PathBuf,
    pub pid: Option<u32>,
}

pub trait ProcessLauncher {
    fn launch(&self, script: &Path) -> Result<LaunchHandle>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowHandle {
    pub id: u64,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

pub trait WindowManager {
    fn list_windows(&self, title_pattern: &Pattern) -> Result<Vec<WindowHandle>>;
    fn reposition(&self, window: &WindowHandle, rect: Rect) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub max_windows: usize,
    pub launch_delay: Duration,
    pub settle_delay: Duration,
    pub arrange_delay: Duration,
    pub grid: Grid,
    pub title_pattern: String,
}

impl LaunchOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        LaunchOptions {
            max_windows: config.window_cap(),
            launch_delay: config.launch_delay(),
            settle_delay: config.settle_delay(),
            arrange_delay: config.arrange_delay(),
            grid: Grid {
                columns: config.grid_columns.max(1),
                cell_width: config.window_width,
                cell_height: config.window_height,
            },
            title_pattern: config.window_title_pattern.clone(),
        }
    }

    /// Same options with every pacing delay set to zero.
    pub fn without_delays(mut self) -> Self {
        self.launch_delay = Duration::ZERO;
        self.settle_delay = Duration::ZERO;
        self.arrange_delay = Duration::ZERO;
        self
    }
}

impl Default for LaunchOptions {
    fn default() -> Self {
        LaunchOptions::from_config(&AppConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub columns: usize,
    pub cell_width: i32,
    pub cell_height: i32,
}

impl Grid {
    pub fn cell(&self, index: usize) -> Rect {
        let row = (index / self.columns) as i32;
        let col = (index % self.columns) as i32;
        Rect {
            x: col * self.cell_width,
            y: row * self.cell_height,
            width: self.cell_width,
            height: self.cell_height,
        }
    }
}

#[derive(Debug, Default)]
pub struct LaunchReport {
    pub launched: Vec<LaunchHandle>,
    pub launch_failures: Vec<Error>,
    pub arranged: usize,
    pub arrange_failures: Vec<Error>,
}

impl LaunchReport {
    /// Windows that were expected to be opened and arranged.
    pub fn attempted(&self) -> usize {
        self.launched.len() + self.launch_failures.len()
    }
}

/// Opens up to `max_windows` scripts in new terminals, then tiles the
/// terminal windows into a grid.
pub fn launch_and_arrange(
    scripts: &[PathBuf],
    launcher: &dyn ProcessLauncher,
    windows: &dyn WindowManager,
    options: &LaunchOptions,
    reporter: &dyn StatusReporter,
) -> Result<LaunchReport> {
    if scripts.is_empty() {
        return Err(Error::NoScripts);
    }

    let count = scripts.len().min(options.max_windows);
    if count < scripts.len() {
        warn!(
            "{} scripts found, only the first {} will be opened",
            scripts.len(),
            count
        );
    }

    let mut report = LaunchReport::default();
    open_windows(&scripts[..count], launcher, options, reporter, &mut report);
    arrange_windows(count, windows, options, reporter, &mut report);

    reporter.log(&format!("Opened and arranged {} window(s).", count));
    if !report.launch_failures.is_empty() || !report.arrange_failures.is_empty() {
        reporter.notify(
            Notice::Error,
            "Error",
            &format!(
                "{} launch failure(s), {} arrange failure(s). Check the output for details.",
                report.launch_failures.len(),
                report.arrange_failures.len()
            ),
        );
    }

    Ok(report)
}

/// Tiles up to `count` already-open terminal windows without launching
/// anything.
pub fn arrange(
    count: usize,
    windows: &dyn WindowManager,
    options: &LaunchOptions,
    reporter: &dyn StatusReporter,
) -> LaunchReport {
    let mut report = LaunchReport::default();
    arrange_windows(count.min(options.max_windows), windows, options, reporter, &mut report);
    reporter.log(&format!("Arranged {} window(s).", report.arranged));
    report
}

fn open_windows(
    scripts: &[PathBuf],
    launcher: &dyn ProcessLauncher,
    options: &LaunchOptions,
    reporter: &dyn StatusReporter,
    report: &mut LaunchReport,
) {
    reporter.on_launch_start(scripts.len());

    for (i, script) in scripts.iter().enumerate() {
        match launcher.launch(script) {
            Ok(handle) => {
                debug!("Launched {} (pid {:?})", script.display(), handle.pid);
                report.launched.push(handle);
            }
            Err(err) => {
                let err = match err {
                    Error::LaunchFailure { .. } => err,
                    other => Error::LaunchFailure {
                        path: script.clone(),
                        reason: other.to_string(),
                    },
                };
                reporter.log(&err.to_string());
                report.launch_failures.push(err);
            }
        }
        reporter.on_launch_progress(i + 1, scripts.len());
        pause(options.launch_delay);
    }

    // Give the last terminals time to show up before listing windows.
    pause(options.settle_delay);
    reporter.on_launch_complete();
}

fn arrange_windows(
    count: usize,
    windows: &dyn WindowManager,
    options: &LaunchOptions,
    reporter: &dyn StatusReporter,
    report: &mut LaunchReport,
) {
    let pattern = match Pattern::new(&options.title_pattern) {
        Ok(pattern) => pattern,
        Err(err) => {
            let err = Error::WindowList(format!(
                "invalid title pattern '{}': {}",
                options.title_pattern, err
            ));
            reporter.log(&err.to_string());
            report.arrange_failures.push(err);
            return;
        }
    };

    let found = match windows.list_windows(&pattern) {
        Ok(found) => found,
        Err(err) => {
            reporter.log(&err.to_string());
            report.arrange_failures.push(err);
            return;
        }
    };
    debug!("{} windows match '{}'", found.len(), options.title_pattern);

    for (i, window) in found.iter().take(count).enumerate() {
        match windows.reposition(window, options.grid.cell(i)) {
            Ok(()) => report.arranged += 1,
            Err(err) => {
                let err = Error::ArrangeFailure {
                    index: i + 1,
                    reason: err.to_string(),
                };
                reporter.log(&err.to_string());
                report.arrange_failures.push(err);
            }
        }
        pause(options.arrange_delay);
    }
}

fn pause(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}
