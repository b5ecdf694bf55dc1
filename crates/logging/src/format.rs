//! crates/logging/src/format.rs
//! Splitting a log call into its printed segments.

use std::fmt;

use bprint::{PrintBuffer, SIZE_AUTOMATIC};

use crate::flags::LogFlags;
use crate::level::Level;
use crate::source::Source;

/// Ceiling of the message body segment.
pub const BODY_CAPACITY_MAX: usize = 65536;

/// Number of segments in a formatted line.
pub const SEGMENT_COUNT: usize = 4;

/// Index of the segment reserved for future use; always empty.
pub const RESERVED_SEGMENT: usize = 0;
/// Index of the `[name] ` context tag.
pub const CONTEXT_SEGMENT: usize = 1;
/// Index of the `[level] ` tag.
pub const LEVEL_SEGMENT: usize = 2;
/// Index of the message body.
pub const BODY_SEGMENT: usize = 3;

/// The four printed parts of one log call.
pub struct LineSegments {
    parts: [PrintBuffer<'static>; SEGMENT_COUNT],
}

impl LineSegments {
    fn new() -> Self {
        Self {
            parts: [
                PrintBuffer::new(0, SIZE_AUTOMATIC),
                PrintBuffer::new(0, SIZE_AUTOMATIC),
                PrintBuffer::new(0, SIZE_AUTOMATIC),
                PrintBuffer::new(0, BODY_CAPACITY_MAX),
            ],
        }
    }

    /// Stored bytes of segment `index`. Out-of-range indices are empty.
    #[must_use]
    pub fn segment(&self, index: usize) -> &[u8] {
        self.parts.get(index).map_or(&[][..], |part| part.as_bytes())
    }

    /// Returns `true` when every segment is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(|part| part.as_bytes().is_empty())
    }

    /// Appends all segments, in order, to `line`.
    pub fn flatten_into<const N: usize>(&self, line: &mut PrintBuffer<'_, N>) {
        for part in &self.parts {
            line.append_raw(part.as_bytes());
        }
    }

    /// Replaces control bytes in every segment. See [`sanitize`].
    pub fn sanitize(&mut self) {
        for part in &mut self.parts {
            sanitize(part.as_bytes_mut());
        }
    }

    fn body_last_byte(&self) -> Option<u8> {
        self.parts[BODY_SEGMENT].last_byte()
    }
}

impl fmt::Debug for LineSegments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.parts.iter().map(|part| part.to_string_lossy()))
            .finish()
    }
}

/// Replaces bytes below `0x08` and bytes in `0x0E..=0x1F` with `?`.
///
/// Backspace, tab, line feed, vertical tab, form feed, carriage return and
/// everything from `0x20` up pass through unchanged.
///
/// ```
/// let mut text = *b"a\x01b\tc\x1bd\n";
/// logging::sanitize(&mut text);
/// assert_eq!(&text, b"a?b\tc?d\n");
/// ```
pub fn sanitize(bytes: &mut [u8]) {
    for byte in bytes {
        if *byte < 0x08 || (0x0E..0x20).contains(byte) {
            *byte = b'?';
        }
    }
}

/// Builds [`LineSegments`] for a log call.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LineFormatter {
    flags: LogFlags,
}

impl LineFormatter {
    /// Uses `flags` to decide whether the level tag is printed.
    #[must_use]
    pub const fn new(flags: LogFlags) -> Self {
        Self { flags }
    }

    /// Formats the segments of one call.
    ///
    /// `print_prefix` tells whether the previous line ended with a line break;
    /// tags are only printed at the start of a line. It is updated whenever
    /// anything was produced: it becomes `true` iff the body ends with `\n` or
    /// `\r`.
    pub fn format(
        &self,
        source: Option<&Source<'_>>,
        level: Level,
        args: fmt::Arguments<'_>,
        print_prefix: &mut bool,
    ) -> LineSegments {
        let (level, _) = level.split();
        let mut segments = LineSegments::new();

        if *print_prefix {
            if let Some(source) = source {
                segments.parts[CONTEXT_SEGMENT]
                    .append_formatted(format_args!("[{}] ", source.name()));
            }
            if level > Level::QUIET && self.flags.contains(LogFlags::PRINT_LEVEL) {
                segments.parts[LEVEL_SEGMENT]
                    .append_formatted(format_args!("[{}] ", level.as_str()));
            }
        }

        segments.parts[BODY_SEGMENT].append_formatted(args);

        if !segments.is_empty() {
            *print_prefix = matches!(segments.body_last_byte(), Some(b'\n' | b'\r'));
        }
        segments
    }

    /// Formats the whole line into `line` and returns the length it would
    /// have had without truncation.
    ///
    /// `line` receives a zero-terminated prefix of the concatenated segments
    /// whenever it is not empty.
    ///
    /// ```
    /// use logging::{Level, LineFormatter, LogFlags, Source};
    ///
    /// let formatter = LineFormatter::new(LogFlags::PRINT_LEVEL);
    /// let mut line = [0u8; 17];
    /// let mut print_prefix = true;
    /// let needed = formatter.format_line_into(
    ///     Some(&Source::new("net")),
    ///     Level::WARNING,
    ///     format_args!("link down\n"),
    ///     &mut line,
    ///     &mut print_prefix,
    /// );
    /// assert_eq!(needed, "[net] [warning] link down\n".len());
    /// assert_eq!(&line, b"[net] [warning] \0");
    /// ```
    pub fn format_line_into(
        &self,
        source: Option<&Source<'_>>,
        level: Level,
        args: fmt::Arguments<'_>,
        line: &mut [u8],
        print_prefix: &mut bool,
    ) -> usize {
        let segments = self.format(source, level, args, print_prefix);
        let mut flat = PrintBuffer::for_buffer(line);
        segments.flatten_into(&mut flat);
        flat.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(
        formatter: LineFormatter,
        source: Option<&Source<'_>>,
        level: Level,
        args: fmt::Arguments<'_>,
        print_prefix: &mut bool,
    ) -> Vec<Vec<u8>> {
        let segments = formatter.format(source, level, args, print_prefix);
        (0..SEGMENT_COUNT)
            .map(|index| segments.segment(index).to_vec())
            .collect()
    }

    #[test]
    fn prefix_includes_name_and_level() {
        let mut print_prefix = true;
        let parts = render(
            LineFormatter::new(LogFlags::PRINT_LEVEL),
            Some(&Source::new("mux")),
            Level::ERROR,
            format_args!("failed: {}\n", 7),
            &mut print_prefix,
        );
        assert_eq!(parts[RESERVED_SEGMENT], b"");
        assert_eq!(parts[CONTEXT_SEGMENT], b"[mux] ");
        assert_eq!(parts[LEVEL_SEGMENT], b"[error] ");
        assert_eq!(parts[BODY_SEGMENT], b"failed: 7\n");
        assert!(print_prefix);
    }

    #[test]
    fn level_tag_requires_flag() {
        let mut print_prefix = true;
        let parts = render(
            LineFormatter::default(),
            None,
            Level::ERROR,
            format_args!("x\n"),
            &mut print_prefix,
        );
        assert!(parts[CONTEXT_SEGMENT].is_empty());
        assert!(parts[LEVEL_SEGMENT].is_empty());
    }

    #[test]
    fn quiet_level_has_no_level_tag() {
        let mut print_prefix = true;
        let parts = render(
            LineFormatter::new(LogFlags::PRINT_LEVEL),
            None,
            Level::QUIET,
            format_args!("x\n"),
            &mut print_prefix,
        );
        assert!(parts[LEVEL_SEGMENT].is_empty());
    }

    #[test]
    fn unnamed_level_prints_empty_tag() {
        let mut print_prefix = true;
        let parts = render(
            LineFormatter::new(LogFlags::PRINT_LEVEL),
            None,
            Level::from_raw(20),
            format_args!("x\n"),
            &mut print_prefix,
        );
        assert_eq!(parts[LEVEL_SEGMENT], b"[] ");
    }

    #[test]
    fn tinted_level_uses_base_name() {
        let mut print_prefix = true;
        let parts = render(
            LineFormatter::new(LogFlags::PRINT_LEVEL),
            None,
            Level::WARNING.with_tint(33),
            format_args!("x\n"),
            &mut print_prefix,
        );
        assert_eq!(parts[LEVEL_SEGMENT], b"[warning] ");
    }

    #[test]
    fn continuation_lines_skip_prefix() {
        let formatter = LineFormatter::new(LogFlags::PRINT_LEVEL);
        let source = Source::new("demux");
        let mut print_prefix = true;

        let first = render(
            formatter,
            Some(&source),
            Level::INFO,
            format_args!("partial "),
            &mut print_prefix,
        );
        assert_eq!(first[CONTEXT_SEGMENT], b"[demux] ");
        assert!(!print_prefix);

        let second = render(
            formatter,
            Some(&source),
            Level::INFO,
            format_args!("done\r"),
            &mut print_prefix,
        );
        assert!(second[CONTEXT_SEGMENT].is_empty());
        assert!(second[LEVEL_SEGMENT].is_empty());
        assert_eq!(second[BODY_SEGMENT], b"done\r");
        assert!(print_prefix);
    }

    #[test]
    fn empty_call_keeps_print_prefix() {
        let mut print_prefix = false;
        let parts = render(
            LineFormatter::default(),
            None,
            Level::INFO,
            format_args!(""),
            &mut print_prefix,
        );
        assert!(parts.iter().all(Vec::is_empty));
        assert!(!print_prefix);
    }

    #[test]
    fn body_is_capped() {
        let mut print_prefix = true;
        let segments = LineFormatter::default().format(
            None,
            Level::INFO,
            format_args!("{:>width$}\n", "x", width = BODY_CAPACITY_MAX * 2),
            &mut print_prefix,
        );
        assert_eq!(segments.segment(BODY_SEGMENT).len(), BODY_CAPACITY_MAX - 1);
        // The trailing newline was truncated away.
        assert!(!print_prefix);
    }

    #[test]
    fn format_line_into_reports_full_length() {
        let formatter = LineFormatter::default();
        let mut line = [0xffu8; 8];
        let mut print_prefix = true;
        let needed = formatter.format_line_into(
            Some(&Source::new("abc")),
            Level::INFO,
            format_args!("hello\n"),
            &mut line,
            &mut print_prefix,
        );
        assert_eq!(needed, 12);
        assert_eq!(&line, b"[abc] h\0");
    }

    #[test]
    fn sanitize_replaces_control_bytes() {
        let mut bytes: Vec<u8> = (0u8..0x21).collect();
        sanitize(&mut bytes);
        for (value, byte) in bytes.iter().enumerate() {
            let kept = (0x08..=0x0D).contains(&value) || value >= 0x20;
            if kept {
                assert_eq!(usize::from(*byte), value);
            } else {
                assert_eq!(*byte, b'?');
            }
        }
    }
}
