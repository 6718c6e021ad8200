//! Line rendering into a bounded buffer
//!
//! Line layout: `<tag>/<level-char>  [<YYYY-MM-DD HH:MM:SS.usec>]  <message>\n`
//!
//! `usec` is the microsecond count printed without padding, so 42µs past the
//! second renders as `HH:MM:SS.42`.

use chrono::{DateTime, TimeZone};
use std::fmt::{self, Write};

use contracts::level_char;

/// Smallest usable capacity: one content byte plus the newline
pub const MIN_BUFFER_CAPACITY: usize = 2;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Largest microsecond value; a leap second reports more
const MAX_MICROS: u32 = 999_999;

/// Capacity-bounded line buffer
///
/// Content is capped at `capacity - 1` bytes so the terminating newline always
/// fits. Once full, further writes are discarded.
pub(crate) struct LineBuffer {
    buf: Vec<u8>,
    capacity: usize,
    truncated: bool,
}

impl LineBuffer {
    pub(crate) fn new(capacity: usize) -> Self {
        let capacity = capacity.max(MIN_BUFFER_CAPACITY);
        Self {
            buf: Vec::with_capacity(capacity),
            capacity,
            truncated: false,
        }
    }

    fn content_limit(&self) -> usize {
        self.capacity - 1
    }

    pub(crate) fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Terminate with exactly one newline and hand back the bytes
    pub(crate) fn finish(mut self) -> Vec<u8> {
        while self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        }
        self.buf.push(b'\n');
        debug_assert!(self.buf.len() <= self.capacity);
        self.buf
    }
}

impl Write for LineBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = self.content_limit() - self.buf.len();
        if s.len() <= room {
            self.buf.extend_from_slice(s.as_bytes());
            return Ok(());
        }
        self.buf.extend_from_slice(&s.as_bytes()[..room]);
        self.truncated = true;
        // stop the formatter, nothing else fits
        Err(fmt::Error)
    }
}

/// Render one line for a raw level
///
/// Out-of-range levels render as `U`. Output never exceeds `capacity` bytes
/// (clamped to [`MIN_BUFFER_CAPACITY`]) and always ends in a single `\n`.
pub fn render<Tz>(
    capacity: usize,
    level: u8,
    tag: &str,
    timestamp: &DateTime<Tz>,
    args: fmt::Arguments<'_>,
) -> Vec<u8>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut line = LineBuffer::new(capacity);
    // An Err here only means the buffer filled up.
    let _ = write!(
        line,
        "{}/{}  [{}.{}]  ",
        tag,
        level_char(level),
        timestamp.format(TIMESTAMP_FORMAT),
        timestamp.timestamp_subsec_micros().min(MAX_MICROS)
    )
    .and_then(|()| line.write_fmt(args));

    if line.is_truncated() {
        tracing::trace!(tag, capacity, "Rendered line truncated");
    }
    line.finish()
}
