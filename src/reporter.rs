use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use loopcast::{Notice, StatusReporter};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{error, info};

/// Status lines go through tracing (stdout and the log file);
/// notifications are printed as a highlighted banner on stderr.
pub struct ConsoleReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn finish_bar(&self) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        }
    }

    fn suspend<F: FnOnce()>(&self, f: F) {
        match self.bar.lock() {
            Ok(guard) => match guard.as_ref() {
                Some(pb) => pb.suspend(f),
                None => f(),
            },
            Err(_) => f(),
        }
    }
}

impl StatusReporter for ConsoleReporter {
    fn log(&self, line: &str) {
        self.suspend(|| {
            if line.starts_with("Error") {
                error!("{}", line);
            } else {
                info!("{}", line);
            }
        });
    }

    fn notify(&self, notice: Notice, title: &str, message: &str) {
        self.suspend(|| {
            let banner = format!(" {} ", title);
            match notice {
                Notice::Info => eprintln!("{} {}", banner.black().on_green().bold(), message.green()),
                Notice::Error => eprintln!("{} {}", banner.white().on_red().bold(), message.red()),
            }
        });
    }

    fn on_launch_start(&self, total: usize) {
        let pb = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::with_template(
            "  {spinner:.cyan} Opening terminals [{bar:30.cyan/dim}] {pos}/{len}",
        ) {
            pb.set_style(
                style
                    .progress_chars("━╸─")
                    .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
            );
        }
        pb.enable_steady_tick(Duration::from_millis(80));
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(old) = guard.replace(pb) {
                old.finish_and_clear();
            }
        }
    }

    fn on_launch_progress(&self, launched: usize, _total: usize) {
        if let Ok(guard) = self.bar.lock() {
            if let Some(pb) = guard.as_ref() {
                pb.set_position(launched as u64);
            }
        }
    }

    fn on_launch_complete(&self) {
        self.finish_bar();
    }
}
