//! Output targets for a [`Logger`](crate::Logger).
//!
//! A line is built in a [`Buffer`] and handed to the sink in one piece, so
//! color escapes, prefix and body reach the terminal in a single write.
//! The logger flushes after every emit; a line ending in `\r` has no newline
//! to trigger a line-buffered stream.

use std::io::{self, Write};

use termcolor::{Buffer, BufferWriter, ColorChoice};

pub trait Sink {

    /// An empty buffer matching the sink's color capabilities.
    fn buffer(&self) -> Buffer;

    fn emit(&mut self, buffer: &Buffer) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;
}

/// Standard output with colors when the terminal supports them.
pub struct Stdout {
    writer: BufferWriter,
    stdout: io::Stdout,
}

impl Stdout {

    #[inline(always)]
    pub fn new(choice: ColorChoice) -> Self {
        Self {
            writer: BufferWriter::stdout(choice),
            stdout: io::stdout(),
        }
    }
}

impl Default for Stdout {

    #[inline(always)]
    fn default() -> Self {
        Self::new(ColorChoice::Auto)
    }
}

impl Sink for Stdout {

    #[inline(always)]
    fn buffer(&self) -> Buffer {
        self.writer.buffer()
    }

    #[inline(always)]
    fn emit(&mut self, buffer: &Buffer) -> io::Result<()> {
        self.writer.print(buffer)
    }

    #[inline(always)]
    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

/// Collects output in memory.
#[derive(Default, Clone, Debug)]
pub struct Capture {
    ansi: bool,
    out: Vec<u8>,
    writes: usize,
    flushes: usize,
    /// Bytes emitted since the last flush.
    pending: usize,
}

impl Capture {

    /// Plain text capture.
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture that keeps ANSI color escapes.
    #[inline(always)]
    pub fn ansi() -> Self {
        Self {
            ansi: true,
            ..Default::default()
        }
    }

    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.out
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.out).into_owned()
    }

    /// Number of [`Sink::emit`] calls so far.
    #[inline(always)]
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Number of [`Sink::flush`] calls so far.
    #[inline(always)]
    pub fn flushes(&self) -> usize {
        self.flushes
    }

    /// Bytes emitted but not yet flushed.
    #[inline(always)]
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn clear(&mut self) {
        *self = Self {
            ansi: self.ansi,
            ..Default::default()
        };
    }
}

impl Sink for Capture {

    fn buffer(&self) -> Buffer {
        if self.ansi {
            Buffer::ansi()
        } else {
            Buffer::no_color()
        }
    }

    fn emit(&mut self, buffer: &Buffer) -> io::Result<()> {
        self.out.extend_from_slice(buffer.as_slice());
        self.writes += 1;
        self.pending += buffer.len();
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        self.pending = 0;
        Ok(())
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {

    #[inline(always)]
    fn buffer(&self) -> Buffer {
        (**self).buffer()
    }

    #[inline(always)]
    fn emit(&mut self, buffer: &Buffer) -> io::Result<()> {
        (**self).emit(buffer)
    }

    #[inline(always)]
    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}
