use compact_str::{CompactString, format_compact};

use termcolor::ColorSpec;

use crate::{
    caller::{CallSite, CallerNameResolver, ExplicitName},
    category::{Category, CategoryStyle},
    settings::Settings,
    sink::{self, Sink},
    timer::Timer,
    Result,
};

use fmt::{LineEnd, LogFmt, LogFmtBuilder};

pub mod fmt;
pub mod error;

/// Label used for messages the logger produces about its own misuse.
pub const INTERNAL_LABEL: &str = "OSTRA_ERROR";

/// Per-call print options.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub struct PrintOpts {
    /// Bypass the verbose gate. Suppression still applies.
    pub forced: bool,
    /// End the line with `\r` instead of `\n`.
    pub overwrite_line: bool,
    pub caller_name: bool,
    pub source_location: bool,
}

impl PrintOpts {

    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options following the category's defaults.
    #[inline(always)]
    pub fn for_style(style: &CategoryStyle) -> Self {
        Self {
            forced: style.forced,
            caller_name: style.show_caller,
            ..Default::default()
        }
    }

    #[inline(always)]
    pub fn with_forced(mut self, forced: bool) -> Self {
        self.forced = forced;
        self
    }

    #[inline(always)]
    pub fn with_overwrite_line(mut self, overwrite_line: bool) -> Self {
        self.overwrite_line = overwrite_line;
        self
    }

    #[inline(always)]
    pub fn with_caller_name(mut self, caller_name: bool) -> Self {
        self.caller_name = caller_name;
        self
    }

    #[inline(always)]
    pub fn with_source_location(mut self, source_location: bool) -> Self {
        self.source_location = source_location;
        self
    }

    #[inline(always)]
    fn line_end(&self) -> LineEnd {
        if self.overwrite_line {
            LineEnd::Overwrite
        } else {
            LineEnd::Newline
        }
    }
}

pub struct Logger<S: Sink = sink::Stdout> {
    settings: Settings,
    sink: S,
    resolver: Box<dyn CallerNameResolver>,
    banner_shown: bool,
    line: LogFmt,
}

impl Logger {

    /// Logger writing to standard output.
    #[inline(always)]
    pub fn stdout(settings: Settings) -> Self {
        Self::new(settings, sink::Stdout::default())
    }
}

impl<S: Sink> Logger<S> {

    pub fn new(settings: Settings, sink: S) -> Self {
        Self {
            settings,
            sink,
            resolver: Box::new(ExplicitName),
            banner_shown: false,
            line: LogFmt::new(),
        }
    }

    #[inline(always)]
    pub fn with_resolver(mut self, resolver: impl CallerNameResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    #[inline(always)]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[inline(always)]
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    #[inline(always)]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[inline(always)]
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    #[inline(always)]
    pub fn into_sink(self) -> S {
        self.sink
    }

    #[inline(always)]
    pub fn banner_shown(&self) -> bool {
        self.banner_shown
    }

    /// Resolved style of `category`.
    #[inline(always)]
    pub fn style(&self, category: &Category) -> CategoryStyle {
        self.settings.category_style(category)
    }

    /// Color used when printing `category`.
    #[inline(always)]
    pub fn color_spec(&self, category: &Category) -> ColorSpec {
        self.style(category).color_spec()
    }

    /// Whether a message with the given `forced` flag would be printed.
    #[inline(always)]
    pub fn enabled(&self, forced: bool) -> bool {
        !self.settings.suppress_all() && (self.settings.verbose() || forced)
    }

    /// Prints `[category] title: message`.
    ///
    /// Returns `Ok(false)` when the settings suppress the message.
    pub fn print(
        &mut self,
        category: &Category,
        title: &str,
        message: &str,
        opts: PrintOpts,
        site: &CallSite,
    ) -> Result<bool>
    {
        if !self.enabled(opts.forced) {
            return Ok(false)
        }
        let color = self.color_spec(category);
        let mut text = self.prefix(category.label(self.settings.short_labels()), opts, site);
        text.push(' ');
        if !title.is_empty() {
            text.push_str(title);
            text.push_str(": ");
        }
        text.push_str(message);
        self.write_line(&text, color, false, opts.line_end())?;
        Ok(true)
    }

    /// Prints the description registered for `code`.
    ///
    /// An unknown code is reported in the error color instead.
    pub fn print_status(
        &mut self,
        category: &Category,
        code: i64,
        opts: PrintOpts,
        site: &CallSite,
    ) -> Result<bool>
    {
        if !self.enabled(opts.forced) {
            return Ok(false)
        }
        let marker = format_compact!("ST_{}", code);
        let (text, color) = match self.settings.status_code(code) {
            Some(description) => {
                let mut text = self.prefix(&marker, opts, site);
                text.push(' ');
                text.push_str(description);
                (text, self.color_spec(category))
            },
            None => (
                format_compact!(
                    "[{}] Wrong status code, \"{}\" does not exist",
                    INTERNAL_LABEL, marker,
                ),
                self.color_spec(&Category::Error),
            ),
        };
        self.write_line(&text, color, false, opts.line_end())?;
        Ok(true)
    }

    /// Prints a separator line around `title`.
    ///
    /// Only suppression mode silences sections.
    pub fn section(&mut self, title: &str) -> Result<bool> {
        if self.settings.suppress_all() {
            return Ok(false)
        }
        let text = self.settings.banner.render(title);
        let color = self.color_spec(&Category::Info);
        self.write_line(&text, color, true, LineEnd::Newline)?;
        Ok(true)
    }

    /// Formats `timer` and, if `print` is set, prints it as a forced success.
    pub fn extime(&mut self, timer: &Timer, print: bool, site: &CallSite) -> Result<CompactString> {
        let text = timer.format();
        if print {
            self.print(&Category::Success, "", &text, PrintOpts::new().with_forced(true), site)?;
        }
        Ok(text)
    }

    fn prefix(&self, label: &str, opts: PrintOpts, site: &CallSite) -> CompactString {
        let mut prefix = format_compact!("[{}]", label);
        if opts.source_location {
            if site.module.is_empty() {
                prefix.push_str(&format_compact!(" ({})", site.location));
            } else {
                prefix.push_str(&format_compact!(" ({} {})", site.module, site.location));
            }
        }
        if opts.caller_name {
            if let Some(name) = self.resolver.resolve(site) {
                prefix.push(' ');
                prefix.push_str(&name);
                prefix.push_str("():");
            }
        }
        prefix
    }

    /// Writes one line, preceded by the banner if this is the first output,
    /// in a single emit followed by a flush.
    fn write_line(&mut self, text: &str, color: ColorSpec, blank_before: bool, end: LineEnd) -> Result<()> {
        let banner = if self.banner_shown || !self.settings.banner.enabled {
            None
        } else {
            Some((
                self.settings.banner.render(&self.settings.banner.title),
                self.color_spec(&Category::Info),
            ))
        };
        let mut builder = LogFmtBuilder::new(&mut self.line);
        if let Some((banner, banner_color)) = banner {
            builder
                .end(LineEnd::Newline)
                .text(&banner, |spec| spec.with_color(banner_color))
                .end(LineEnd::Newline);
        }
        if blank_before {
            builder.end(LineEnd::Newline);
        }
        builder
            .text(text, |spec| spec.with_color(color))
            .end(end);
        let mut buffer = self.sink.buffer();
        self.line.write_to(&mut buffer)?;
        self.sink.emit(&buffer)?;
        self.sink.flush()?;
        self.banner_shown = true;
        Ok(())
    }
}
