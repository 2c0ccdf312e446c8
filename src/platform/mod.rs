#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(not(target_os = "windows"))]
pub mod wmctrl;

use crate::launch::WindowManager;
use glob::{MatchOptions, Pattern};

/// Window titles are matched case-insensitively.
pub fn title_matches(pattern: &Pattern, title: &str) -> bool {
    pattern.matches_with(
        title,
        MatchOptions {
            case_sensitive: false,
            require_literal_separator: false,
            require_literal_leading_dot: false,
        },
    )
}

#[cfg(target_os = "windows")]
pub fn window_manager() -> Box<dyn WindowManager> {
    Box::new(windows::Win32WindowManager)
}

#[cfg(not(target_os = "windows"))]
pub fn window_manager() -> Box<dyn WindowManager> {
    Box::new(wmctrl::WmctrlWindowManager::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_matches_ignores_case() {
        let pattern = Pattern::new("*cmd.exe*").unwrap();
        assert!(title_matches(&pattern, "C:\\Windows\\system32\\CMD.EXE - Streamer 1.bat"));
        assert!(!title_matches(&pattern, "Windows PowerShell"));
    }
}
