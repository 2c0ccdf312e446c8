use super::title_matches;
use crate::error::{Error, Result};
use crate::launch::{Rect, WindowHandle, WindowManager};
use glob::Pattern;
use std::process::Command;

/// X11 windows through the `wmctrl` tool.
#[derive(Debug, Clone)]
pub struct WmctrlWindowManager {
    program: String,
}

impl Default for WmctrlWindowManager {
    fn default() -> Self {
        WmctrlWindowManager {
            program: "wmctrl".to_string(),
        }
    }
}

impl WmctrlWindowManager {
    fn run(&self, args: &[&str]) -> Result<String> {
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| Error::WindowList(format!("{}: {}", self.program, e)))?;

        if !output.status.success() {
            return Err(Error::WindowList(format!(
                "{} {} exited with {}: {}",
                self.program,
                args.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Parses `wmctrl -l` output: `<id> <desktop> <host> <title...>`.
pub fn parse_window_list(output: &str) -> Vec<WindowHandle> {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let id = fields.next()?;
            let id = u64::from_str_radix(id.trim_start_matches("0x"), 16).ok()?;
            fields.next()?;
            fields.next()?;
            let title = fields.collect::<Vec<_>>().join(" ");
            Some(WindowHandle { id, title })
        })
        .collect()
}

impl WindowManager for WmctrlWindowManager {
    fn list_windows(&self, title_pattern: &Pattern) -> Result<Vec<WindowHandle>> {
        let output = self.run(&["-l"])?;
        Ok(parse_window_list(&output)
            .into_iter()
            .filter(|w| title_matches(title_pattern, &w.title))
            .collect())
    }

    fn reposition(&self, window: &WindowHandle, rect: Rect) -> Result<()> {
        let id = format!("{:#010x}", window.id);
        let geometry = format!("0,{},{},{},{}", rect.x, rect.y, rect.width, rect.height);
        self.run(&["-i", "-r", &id, "-e", &geometry])?;
        Ok(())
    }
}
