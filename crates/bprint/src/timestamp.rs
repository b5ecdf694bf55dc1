//! crates/bprint/src/timestamp.rs
//! Appending formatted timestamps.
//!
//! The `time` formatter cannot report how many bytes it needs before writing,
//! so the buffer retries with twice the room until the output fits, then falls
//! back to a fixed local buffer, and finally to a visible truncation marker.

use std::io;

use time::OffsetDateTime;
use time::formatting::Formattable;

use crate::buffer::PrintBuffer;

/// Room requested when the buffer has none left before the first attempt.
const INITIAL_ESTIMATE: usize = 64;

/// Size of the stack buffer used once the print buffer cannot grow.
const FALLBACK_CAPACITY: usize = 1024;

/// Written over the free region when the timestamp cannot be stored at all.
pub const TRUNCATION_MARKER: &[u8] = b"[truncated strftime output]";

enum Rendered {
    Fits(usize),
    Overflow,
    Invalid,
}

/// `io::Write` adaptor over a fixed slice. Running out of space surfaces as
/// `ErrorKind::WriteZero` through `write_all`.
struct BoundedWriter<'r> {
    region: &'r mut [u8],
    written: usize,
}

impl io::Write for BoundedWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let free = &mut self.region[self.written..];
        let take = free.len().min(buf.len());
        free[..take].copy_from_slice(&buf[..take]);
        self.written += take;
        Ok(take)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Formats `moment` into `region`, keeping its last byte free for a terminator.
fn render<F>(pattern: &F, moment: &OffsetDateTime, region: &mut [u8]) -> Rendered
where
    F: Formattable + ?Sized,
{
    let limit = region.len().saturating_sub(1);
    let mut writer = BoundedWriter {
        region: &mut region[..limit],
        written: 0,
    };
    match moment.format_into(&mut writer, pattern) {
        Ok(_) => Rendered::Fits(writer.written),
        Err(time::error::Format::StdIo(_)) => Rendered::Overflow,
        Err(_) => Rendered::Invalid,
    }
}

impl<const N: usize> PrintBuffer<'_, N> {
    /// Appends `moment` rendered with `pattern`.
    ///
    /// Components the pattern cannot render for this value (for example an
    /// RFC 3339 offset with seconds) leave the buffer unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use bprint::PrintBuffer;
    /// use time::macros::{datetime, format_description};
    ///
    /// let mut buffer = PrintBuffer::automatic();
    /// buffer.append_time_formatted(
    ///     format_description!("[year]-[month]-[day]"),
    ///     &datetime!(2024-03-05 07:08:09 UTC),
    /// );
    /// assert_eq!(buffer.as_bytes(), b"2024-03-05");
    /// ```
    pub fn append_time_formatted<F>(&mut self, pattern: &F, moment: &OffsetDateTime)
    where
        F: Formattable + ?Sized,
    {
        loop {
            let room = self.room();
            if room > 0 {
                match render(pattern, moment, self.free_region()) {
                    Rendered::Fits(written) => {
                        self.advance(written);
                        return;
                    }
                    Rendered::Invalid => {
                        // Partial output may have overwritten the terminator.
                        self.advance(0);
                        return;
                    }
                    Rendered::Overflow => {}
                }
            }

            let wanted = if room == 0 {
                INITIAL_ESTIMATE
            } else {
                room.saturating_mul(2)
            };
            if self.grow(wanted).is_err() {
                self.append_time_fallback(pattern, moment);
                return;
            }
        }
    }

    fn append_time_fallback<F>(&mut self, pattern: &F, moment: &OffsetDateTime)
    where
        F: Formattable + ?Sized,
    {
        let room = self.room();
        if room < FALLBACK_CAPACITY {
            let mut local = [0u8; FALLBACK_CAPACITY];
            match render(pattern, moment, &mut local) {
                Rendered::Fits(written) => {
                    self.append_raw(&local[..written]);
                    return;
                }
                Rendered::Invalid => return,
                Rendered::Overflow => {}
            }
        }

        if room > 0 {
            let region = self.free_region();
            region.fill(b'!');
            let marker = TRUNCATION_MARKER.len().min(region.len());
            region[..marker].copy_from_slice(&TRUNCATION_MARKER[..marker]);
            self.advance(room);
        }
    }
}
