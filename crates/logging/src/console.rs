//! crates/logging/src/console.rs
//! Windows console text attributes for standard error.
//!
//! On other platforms the probe reports no console and attribute changes are
//! ignored, so the ANSI path is always taken.

/// Text attributes of the standard error console captured at detection time.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ConsoleAttributes {
    original: u16,
}

impl ConsoleAttributes {
    /// Wraps the attribute word the console had before any coloring.
    #[must_use]
    pub const fn new(original: u16) -> Self {
        Self { original }
    }

    /// Attribute word restored after each colored write.
    #[must_use]
    pub const fn original(self) -> u16 {
        self.original
    }

    /// Background bits of the original attributes, kept under every color.
    #[must_use]
    pub const fn background(self) -> u16 {
        self.original & 0xF0
    }
}

#[cfg(windows)]
#[allow(unsafe_code)]
mod imp {
    use windows_sys::Win32::Foundation::{HANDLE, INVALID_HANDLE_VALUE};
    use windows_sys::Win32::System::Console::{
        CONSOLE_SCREEN_BUFFER_INFO, GetConsoleMode, GetConsoleScreenBufferInfo, GetStdHandle,
        STD_ERROR_HANDLE, SetConsoleTextAttribute,
    };

    use super::ConsoleAttributes;

    fn stderr_handle() -> Option<HANDLE> {
        // SAFETY: GetStdHandle has no preconditions.
        let handle = unsafe { GetStdHandle(STD_ERROR_HANDLE) };
        (handle != INVALID_HANDLE_VALUE && !handle.is_null()).then_some(handle)
    }

    pub(super) fn probe() -> Option<ConsoleAttributes> {
        let handle = stderr_handle()?;
        let mut mode = 0;
        // SAFETY: `mode` is a valid out pointer for the duration of the call.
        if unsafe { GetConsoleMode(handle, &mut mode) } == 0 {
            return None;
        }
        // SAFETY: the struct is plain data; an all-zero value is valid.
        let mut info: CONSOLE_SCREEN_BUFFER_INFO = unsafe { std::mem::zeroed() };
        // SAFETY: `info` is a valid out pointer for the duration of the call.
        if unsafe { GetConsoleScreenBufferInfo(handle, &mut info) } == 0 {
            return None;
        }
        Some(ConsoleAttributes::new(info.wAttributes))
    }

    pub(super) fn set_attribute(attribute: u16) {
        if let Some(handle) = stderr_handle() {
            // SAFETY: the handle was just obtained from GetStdHandle.
            unsafe {
                SetConsoleTextAttribute(handle, attribute);
            }
        }
    }
}

#[cfg(not(windows))]
mod imp {
    use super::ConsoleAttributes;

    pub(super) const fn probe() -> Option<ConsoleAttributes> {
        None
    }

    pub(super) const fn set_attribute(_attribute: u16) {}
}

/// Returns the attributes of the standard error console, or `None` when
/// standard error is not a console.
pub(crate) fn probe() -> Option<ConsoleAttributes> {
    imp::probe()
}

pub(crate) fn set_attribute(attribute: u16) {
    imp::set_attribute(attribute);
}
