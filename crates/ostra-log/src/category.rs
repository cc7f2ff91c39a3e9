//! Log categories and their display styles.

use compact_str::CompactString;

use termcolor::{Color, ColorSpec};

/// The kind of a log message.
///
/// Parsing from a string never fails: names that aren't exactly one of the
/// built-in names become [`Category::Other`], kept as given. An `Other`
/// resolves to whatever style was registered for it, or to
/// [`CategoryStyle::NEUTRAL`].
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Category {
    Info,
    Data,
    Warning,
    Error,
    Success,
    Other(CompactString),
}

impl Category {

    pub const BUILTIN: [Category; 5] = [
        Self::Info,
        Self::Data,
        Self::Warning,
        Self::Error,
        Self::Success,
    ];

    /// Name used as the lookup key and as the full label.
    pub fn name(&self) -> &str {
        match self {
            Self::Info => "INFO",
            Self::Data => "DATA",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Success => "SUCCESS",
            Self::Other(name) => name,
        }
    }

    /// Label shown between the brackets of the prefix.
    ///
    /// Short labels are the first four characters of the name.
    pub fn label(&self, short: bool) -> &str {
        let name = self.name();
        if !short {
            return name
        }
        match name.char_indices().nth(4) {
            Some((i, _)) => &name[..i],
            None => name,
        }
    }

    #[inline(always)]
    pub fn default_style(&self) -> CategoryStyle {
        match self {
            Self::Info => CategoryStyle::new(Color::Blue).with_intense(true),
            Self::Data => CategoryStyle::new(Color::Cyan),
            Self::Warning => CategoryStyle::new(Color::Yellow)
                .with_forced(true)
                .with_caller(true),
            Self::Error => CategoryStyle::new(Color::Red)
                .with_intense(true)
                .with_forced(true)
                .with_caller(true),
            Self::Success => CategoryStyle::new(Color::Green)
                .with_intense(true)
                .with_forced(true),
            Self::Other(_) => CategoryStyle::NEUTRAL,
        }
    }
}

impl From<&str> for Category {

    fn from(value: &str) -> Self {
        match value {
            "INFO" => Self::Info,
            "DATA" => Self::Data,
            "WARNING" => Self::Warning,
            "ERROR" => Self::Error,
            "SUCCESS" => Self::Success,
            other => Self::Other(CompactString::new(other)),
        }
    }
}

impl From<String> for Category {

    #[inline(always)]
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<CompactString> for Category {

    #[inline(always)]
    fn from(value: CompactString) -> Self {
        Self::from(value.as_str())
    }
}

impl core::fmt::Display for Category {

    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Display color and default behavior of a [`Category`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CategoryStyle {
    pub color: Color,
    pub intense: bool,
    /// Printed even when verbose mode is off.
    pub forced: bool,
    /// Prefix the message with the calling function's name.
    pub show_caller: bool,
}

impl CategoryStyle {

    pub const NEUTRAL: Self = Self::new(Color::White);

    #[inline(always)]
    pub const fn new(color: Color) -> Self {
        Self {
            color,
            intense: false,
            forced: false,
            show_caller: false,
        }
    }

    #[inline(always)]
    pub const fn with_intense(mut self, intense: bool) -> Self {
        self.intense = intense;
        self
    }

    #[inline(always)]
    pub const fn with_forced(mut self, forced: bool) -> Self {
        self.forced = forced;
        self
    }

    #[inline(always)]
    pub const fn with_caller(mut self, show_caller: bool) -> Self {
        self.show_caller = show_caller;
        self
    }

    pub fn color_spec(&self) -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(self.color)).set_intense(self.intense);
        spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exact_builtin_names() {
        assert_eq!(Category::from("INFO"), Category::Info);
        assert_eq!(Category::from("DATA"), Category::Data);
        assert_eq!(Category::from("WARNING"), Category::Warning);
        assert_eq!(Category::from("ERROR"), Category::Error);
        assert_eq!(Category::from("SUCCESS"), Category::Success);
    }

    #[test]
    fn other_names_are_kept_as_given() {
        let category = Category::from("network");
        assert_eq!(category, Category::Other("network".into()));
        assert_eq!(category.label(false), "network");
        assert_eq!(category.default_style(), CategoryStyle::NEUTRAL);
        assert_eq!(Category::from("info"), Category::Other("info".into()));
        assert_eq!(Category::from("WARN"), Category::Other("WARN".into()));
        assert_eq!(Category::from(" ERROR "), Category::Other(" ERROR ".into()));
    }

    #[test]
    fn short_labels_take_four_chars() {
        assert_eq!(Category::Warning.label(true), "WARN");
        assert_eq!(Category::Error.label(true), "ERRO");
        assert_eq!(Category::Success.label(true), "SUCC");
        assert_eq!(Category::Info.label(true), "INFO");
        assert_eq!(Category::from("io").label(true), "io");
        assert_eq!(Category::from("network").label(true), "netw");
        assert_eq!(Category::Warning.label(false), "WARNING");
    }

    #[test]
    fn builtin_styles() {
        let error = Category::Error.default_style();
        assert_eq!(error.color, Color::Red);
        assert!(error.intense && error.forced && error.show_caller);
        let data = Category::Data.default_style();
        assert_eq!(data.color, Color::Cyan);
        assert!(!data.forced && !data.show_caller);
        assert!(Category::Success.default_style().forced);
        assert!(!Category::Info.default_style().forced);
        let spec = Category::Warning.default_style().color_spec();
        assert_eq!(spec.fg(), Some(&Color::Yellow));
        assert!(!spec.intense());
    }
}
