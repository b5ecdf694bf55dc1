//! crates/bprint/src/append.rs
//! Append operations. None of them fail: content that does not fit is
//! dropped, while the logical length still advances by the full amount.

use std::fmt;

use crate::buffer::PrintBuffer;

/// Formatter sink that writes into a fixed region and counts every byte the
/// formatting produced, including the ones that did not fit.
struct RegionWriter<'r> {
    region: &'r mut [u8],
    written: usize,
    total: usize,
}

impl<'r> RegionWriter<'r> {
    fn new(region: &'r mut [u8]) -> Self {
        Self {
            region,
            written: 0,
            total: 0,
        }
    }
}

impl fmt::Write for RegionWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        // The last byte of the region is reserved for the terminator.
        let usable = self.region.len().saturating_sub(1);
        let take = usable.saturating_sub(self.written).min(bytes.len());
        self.region[self.written..self.written + take].copy_from_slice(&bytes[..take]);
        self.written += take;
        self.total = self.total.saturating_add(bytes.len());
        Ok(())
    }
}

impl<const N: usize> PrintBuffer<'_, N> {
    /// Appends the output of a `format_args!` invocation.
    ///
    /// Formatting is retried after growing whenever the output did not fit,
    /// so the arguments may be rendered more than once.
    pub fn append_formatted(&mut self, args: fmt::Arguments<'_>) {
        let mut extra;
        loop {
            let room = self.room();
            let mut writer = RegionWriter::new(self.free_region());
            // Display impls that fail mid-way still leave a valid prefix.
            let _ = fmt::write(&mut writer, args);
            extra = writer.total;
            if extra < room || extra == 0 {
                break;
            }
            if self.grow(extra).is_err() {
                break;
            }
        }
        self.advance(extra);
    }

    /// Appends raw bytes.
    pub fn append_raw(&mut self, bytes: &[u8]) {
        let size = bytes.len();
        loop {
            let room = self.room();
            if size < room {
                break;
            }
            if self.grow(size).is_err() {
                break;
            }
        }
        let room = self.room();
        if room > 0 {
            let take = size.min(room - 1);
            self.free_region()[..take].copy_from_slice(&bytes[..take]);
        }
        self.advance(size);
    }

    /// Appends `byte` repeated `count` times.
    pub fn append_repeated_char(&mut self, byte: u8, count: usize) {
        loop {
            let room = self.room();
            if count < room {
                break;
            }
            if self.grow(count).is_err() {
                break;
            }
        }
        let room = self.room();
        if room > 0 {
            let take = count.min(room - 1);
            self.free_region()[..take].fill(byte);
        }
        self.advance(count);
    }
}

impl<const N: usize> fmt::Write for PrintBuffer<'_, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append_raw(s.as_bytes());
        Ok(())
    }
}
