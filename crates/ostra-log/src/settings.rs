//! Process-wide logger configuration.
//!
//! A [`Settings`] value is owned by a [`Logger`](crate::Logger) and read fresh
//! on every print, so toggling a flag takes effect on the next call.

use compact_str::CompactString;

use rustc_hash::FxHashMap;

use crate::category::{Category, CategoryStyle};

/// Name of the environment variable read by [`Settings::from_env`].
pub const ENV_VAR: &str = "OSTRA_LOG";

/// The one-shot separator printed before the first line of a logger.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Banner {
    pub enabled: bool,
    pub title: CompactString,
    pub separator: CompactString,
}

impl Banner {

    /// Renders `separator title separator`.
    pub fn render(&self, title: &str) -> CompactString {
        let mut line = CompactString::with_capacity(
            self.separator.len() * 2 + title.len()
        );
        line.push_str(&self.separator);
        line.push_str(title);
        line.push_str(&self.separator);
        line
    }
}

impl Default for Banner {

    fn default() -> Self {
        Self {
            enabled: true,
            title: CompactString::const_new("OSTRA SECTION"),
            separator: CompactString::from("-".repeat(35)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    verbose: bool,
    suppress_all: bool,
    short_labels: bool,
    pub banner: Banner,
    categories: FxHashMap<CompactString, CategoryStyle>,
    category_order: Vec<CompactString>,
    status_codes: FxHashMap<i64, CompactString>,
}

impl Default for Settings {

    fn default() -> Self {
        let mut settings = Self {
            verbose: true,
            suppress_all: false,
            short_labels: false,
            banner: Banner::default(),
            categories: FxHashMap::default(),
            category_order: Vec::new(),
            status_codes: FxHashMap::default(),
        };
        for category in Category::BUILTIN {
            settings.register_category(category.name(), category.default_style());
        }
        settings
    }
}

impl Settings {

    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default settings adjusted by the `OSTRA_LOG` environment variable.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Ok(env) = std::env::var(ENV_VAR) {
            settings.apply_flags(&env);
        }
        settings
    }

    /// Applies a comma separated flag list such as `"quiet,short"`.
    ///
    /// Recognized flags are `verbose`, `quiet`, `dist`, `short` and
    /// `nobanner`. Anything else is ignored.
    pub fn apply_flags(&mut self, flags: &str) {
        for flag in flags.split(',').map(str::trim) {
            if flag.eq_ignore_ascii_case("verbose") {
                self.verbose = true;
            } else if flag.eq_ignore_ascii_case("quiet") {
                self.verbose = false;
            } else if flag.eq_ignore_ascii_case("dist") {
                self.suppress_all = true;
            } else if flag.eq_ignore_ascii_case("short") {
                self.short_labels = true;
            } else if flag.eq_ignore_ascii_case("nobanner") {
                self.banner.enabled = false;
            }
        }
    }

    #[inline(always)]
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Toggles whether non-forced categories print.
    #[inline(always)]
    pub fn set_verbose(&mut self, enabled: bool) -> &mut Self {
        self.verbose = enabled;
        self
    }

    #[inline(always)]
    pub fn suppress_all(&self) -> bool {
        self.suppress_all
    }

    /// Silences every message, forced ones included.
    #[inline(always)]
    pub fn set_suppress_all(&mut self, enabled: bool) -> &mut Self {
        self.suppress_all = enabled;
        self
    }

    #[inline(always)]
    pub fn short_labels(&self) -> bool {
        self.short_labels
    }

    #[inline(always)]
    pub fn set_short_labels(&mut self, enabled: bool) -> &mut Self {
        self.short_labels = enabled;
        self
    }

    /// Inserts or overwrites the description of `code`.
    pub fn register_status_code(&mut self, code: i64, description: impl AsRef<str>) -> &mut Self {
        self.status_codes.insert(code, CompactString::new(description));
        self
    }

    #[inline(always)]
    pub fn status_code(&self, code: i64) -> Option<&str> {
        self.status_codes
            .get(&code)
            .map(CompactString::as_str)
    }

    /// Inserts or overwrites the style of the category called `name`.
    pub fn register_category(&mut self, name: &str, style: CategoryStyle) -> &mut Self {
        let key = CompactString::new(name);
        if self.categories.insert(key.clone(), style).is_none() {
            self.category_order.push(key);
        }
        self
    }

    /// Style of `category`, or [`CategoryStyle::NEUTRAL`] when it isn't registered.
    pub fn category_style(&self, category: &Category) -> CategoryStyle {
        self.categories
            .get(category.name())
            .copied()
            .unwrap_or(CategoryStyle::NEUTRAL)
    }

    /// Registered categories in registration order.
    pub fn categories(&self) -> impl Iterator<Item = (Category, CategoryStyle)> + '_ {
        self.category_order
            .iter()
            .map(|name| (Category::from(name.as_str()), self.categories[name]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use termcolor::Color;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert!(settings.verbose());
        assert!(!settings.suppress_all());
        assert!(!settings.short_labels());
        assert!(settings.banner.enabled);
        assert_eq!(settings.status_code(42), None);
        let names: Vec<_> = settings.categories()
            .map(|(category, _)| category)
            .collect();
        assert_eq!(names, Category::BUILTIN);
    }

    #[test]
    fn status_code_upsert() {
        let mut settings = Settings::default();
        settings.register_status_code(42, "first");
        assert_eq!(settings.status_code(42), Some("first"));
        settings.register_status_code(42, "second");
        assert_eq!(settings.status_code(42), Some("second"));
        assert_eq!(settings.status_code(43), None);
    }

    #[test]
    fn custom_category() {
        let mut settings = Settings::default();
        let net = Category::from("net");
        assert_eq!(settings.category_style(&net), CategoryStyle::NEUTRAL);
        settings.register_category("net", CategoryStyle::new(Color::Magenta).with_forced(true));
        assert_eq!(settings.category_style(&net).color, Color::Magenta);
        settings.register_category("net", CategoryStyle::new(Color::Cyan));
        assert_eq!(settings.category_style(&net).color, Color::Cyan);
        assert_eq!(settings.categories().count(), 6);
        assert_eq!(settings.category_style(&Category::from("NET")), CategoryStyle::NEUTRAL);
    }

    #[test]
    fn overriding_builtin_style() {
        let mut settings = Settings::default();
        settings.register_category("WARNING", CategoryStyle::new(Color::Magenta));
        assert_eq!(settings.category_style(&Category::Warning).color, Color::Magenta);
        assert_eq!(settings.categories().count(), 5);
    }

    #[test]
    fn flags() {
        let mut settings = Settings::default();
        settings.apply_flags("quiet, SHORT,nobanner,bogus");
        assert!(!settings.verbose());
        assert!(settings.short_labels());
        assert!(!settings.banner.enabled);
        assert!(!settings.suppress_all());
        settings.apply_flags("dist,verbose");
        assert!(settings.suppress_all());
        assert!(settings.verbose());
    }

    #[test]
    fn banner_render() {
        let banner = Banner {
            enabled: true,
            title: "T".into(),
            separator: "--".into(),
        };
        assert_eq!(banner.render(&banner.title), "--T--");
    }
}
