use super::title_matches;
use crate::error::{Error, Result};
use crate::launch::{Rect, WindowHandle, WindowManager};
use glob::Pattern;
use winapi::shared::minwindef::{BOOL, LPARAM, TRUE};
use winapi::shared::windef::HWND;
use winapi::um::winuser::{
    EnumWindows, GetWindowTextLengthW, GetWindowTextW, IsWindowVisible, MoveWindow,
};

/// Top-level windows through `EnumWindows`, moved with `MoveWindow`.
pub struct Win32WindowManager;

unsafe extern "system" fn collect_window(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let found = &mut *(lparam as *mut Vec<WindowHandle>);

    if IsWindowVisible(hwnd) == 0 {
        return TRUE;
    }

    let len = GetWindowTextLengthW(hwnd);
    if len <= 0 {
        return TRUE;
    }

    let mut buf: Vec<u16> = vec![0; len as usize + 1];
    let copied = GetWindowTextW(hwnd, buf.as_mut_ptr(), buf.len() as i32);
    if copied > 0 {
        found.push(WindowHandle {
            id: hwnd as usize as u64,
            title: String::from_utf16_lossy(&buf[..copied as usize]),
        });
    }

    TRUE
}

impl WindowManager for Win32WindowManager {
    fn list_windows(&self, title_pattern: &Pattern) -> Result<Vec<WindowHandle>> {
        let mut found: Vec<WindowHandle> = Vec::new();

        let ok = unsafe {
            EnumWindows(
                Some(collect_window),
                &mut found as *mut Vec<WindowHandle> as LPARAM,
            )
        };
        if ok == 0 {
            return Err(Error::WindowList(
                std::io::Error::last_os_error().to_string(),
            ));
        }

        found.retain(|w| title_matches(title_pattern, &w.title));
        Ok(found)
    }

    fn reposition(&self, window: &WindowHandle, rect: Rect) -> Result<()> {
        let hwnd = window.id as usize as HWND;
        let ok = unsafe { MoveWindow(hwnd, rect.x, rect.y, rect.width, rect.height, TRUE) };
        if ok == 0 {
            return Err(Error::Io(std::io::Error::last_os_error()));
        }
        Ok(())
    }
}
