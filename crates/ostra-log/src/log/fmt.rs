use std::io::{self, Write};

use compact_str::CompactString;

use termcolor::{ColorSpec, WriteColor};

/// How a printed line is terminated.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum LineEnd {
    #[default]
    Newline,
    /// Carriage return without a newline, so the next line overwrites this one.
    Overwrite,
}

impl LineEnd {

    #[inline(always)]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newline => "\n",
            Self::Overwrite => "\r",
        }
    }
}

/// A line of colored text segments.
#[derive(Default, Clone, Debug)]
pub struct LogFmt {
    segments: Vec<SegmentSpec>,
}

impl LogFmt {

    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    fn clear(&mut self) {
        self.segments.clear();
    }

    pub fn write_to<W: WriteColor + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        for segment in self {
            match segment {
                SegmentSpec::Text(text, log_spec) => {
                    if let Some(color_spec) = &log_spec.color_spec {
                        out.set_color(color_spec)?;
                        out.write_all(text.as_bytes())?;
                        out.reset()?;
                    } else {
                        out.write_all(text.as_bytes())?;
                    }
                },
                SegmentSpec::End(end) => {
                    out.write_all(end.as_str().as_bytes())?;
                },
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a LogFmt {

    type Item = &'a SegmentSpec;
    type IntoIter = core::slice::Iter<'a, SegmentSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

#[derive(Default, Clone, Debug)]
pub struct LogSpec {
    pub color_spec: Option<ColorSpec>,
}

impl LogSpec {

    #[inline(always)]
    pub fn with_color_spec(mut self, mut f: impl FnMut(&mut ColorSpec)) -> Self {
        let color_spec = self.color_spec.insert(ColorSpec::new());
        f(color_spec);
        self
    }

    #[inline(always)]
    pub fn with_color(mut self, color_spec: ColorSpec) -> Self {
        self.color_spec = Some(color_spec);
        self
    }
}

#[derive(Clone, Debug)]
pub enum SegmentSpec {
    Text(CompactString, LogSpec),
    End(LineEnd),
}

pub struct LogFmtBuilder<'a> {
    fmt: &'a mut LogFmt,
}

impl<'a> LogFmtBuilder<'a> {

    #[inline(always)]
    pub fn new(fmt: &'a mut LogFmt) -> Self {
        fmt.clear();
        Self {
            fmt,
        }
    }

    #[inline(always)]
    pub fn text(&mut self, text: &str, f: impl FnOnce(LogSpec) -> LogSpec) -> &mut Self {
        self.fmt.segments.push(SegmentSpec::Text(CompactString::new(text), f(Default::default())));
        self
    }

    #[inline(always)]
    pub fn end(&mut self, end: LineEnd) -> &mut Self {
        self.fmt.segments.push(SegmentSpec::End(end));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use termcolor::{Buffer, Color};

    #[test]
    fn no_color_output_is_plain_text() {
        let mut fmt = LogFmt::new();
        LogFmtBuilder::new(&mut fmt)
            .text("[INFO] hi", |spec| spec.with_color_spec(|c| { c.set_fg(Some(Color::Blue)); }))
            .end(LineEnd::Overwrite);
        let mut buf = Buffer::no_color();
        fmt.write_to(&mut buf).unwrap();
        assert_eq!(buf.as_slice(), b"[INFO] hi\r");
    }

    #[test]
    fn ansi_output_wraps_colored_segments() {
        let mut fmt = LogFmt::new();
        LogFmtBuilder::new(&mut fmt)
            .text("x", |spec| spec.with_color_spec(|c| { c.set_fg(Some(Color::Red)); }))
            .end(LineEnd::Newline);
        let mut buf = Buffer::ansi();
        fmt.write_to(&mut buf).unwrap();
        let out = String::from_utf8(buf.into_inner()).unwrap();
        assert!(out.starts_with("\x1b["));
        assert!(out.ends_with("x\x1b[0m\n"));
    }

    #[test]
    fn builder_clears_previous_segments() {
        let mut fmt = LogFmt::new();
        LogFmtBuilder::new(&mut fmt).text("a", |s| s);
        LogFmtBuilder::new(&mut fmt).text("b", |s| s);
        let mut buf = Buffer::no_color();
        fmt.write_to(&mut buf).unwrap();
        assert_eq!(buf.as_slice(), b"b");
    }
}
