//! The process-wide logger behind the logging macros.
//!
//! It is created on first use from [`Settings::from_env`] unless
//! [`init_with`] installed other settings before that.

use std::sync::OnceLock;

use parking_lot::Mutex;

use compact_str::CompactString;

use crate::{
    caller::CallSite,
    category::Category,
    settings::Settings,
    timer::Timer,
    Logger, PrintOpts, Result,
};

static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

fn logger() -> &'static Mutex<Logger> {
    LOGGER.get_or_init(|| Mutex::new(Logger::stdout(Settings::from_env())))
}

/// Creates the global logger from the environment if it doesn't exist yet.
#[inline(always)]
pub fn init() {
    logger();
}

/// Installs `settings` for the global logger.
///
/// Returns `false` if the logger was already created.
pub fn init_with(settings: Settings) -> bool {
    LOGGER.set(Mutex::new(Logger::stdout(settings))).is_ok()
}

pub fn with_settings<R>(f: impl FnOnce(&mut Settings) -> R) -> R {
    f(logger().lock().settings_mut())
}

pub fn with_logger<R>(f: impl FnOnce(&mut Logger) -> R) -> R {
    f(&mut logger().lock())
}

/// Prints with explicit options.
#[inline(always)]
pub fn print(
    category: &Category,
    title: &str,
    message: &str,
    opts: PrintOpts,
    site: &CallSite,
) -> Result<bool>
{
    logger().lock().print(category, title, message, opts, site)
}

/// Prints with the category's default options.
pub fn log(
    category: &Category,
    title: &str,
    args: core::fmt::Arguments,
    site: &CallSite,
) -> Result<bool>
{
    let mut logger = logger().lock();
    let opts = PrintOpts::for_style(&logger.style(category));
    if !logger.enabled(opts.forced) {
        return Ok(false)
    }
    let message = compact_str::format_compact!("{}", args);
    logger.print(category, title, &message, opts, site)
}

pub fn status(category: &Category, code: i64, site: &CallSite) -> Result<bool> {
    let mut logger = logger().lock();
    let opts = PrintOpts::for_style(&logger.style(category));
    logger.print_status(category, code, opts, site)
}

#[inline(always)]
pub fn section(title: &str) -> Result<bool> {
    logger().lock().section(title)
}

/// Formats `timer` and prints it as a success message.
///
/// The formatted text is returned even if printing fails.
pub fn extime(timer: &Timer, site: &CallSite) -> CompactString {
    let text = timer.format();
    logger()
        .lock()
        .print(&Category::Success, "", &text, PrintOpts::new().with_forced(true), site)
        .ok();
    text
}

/// Logs a formatted message under `category`.
///
/// ```ignore
/// log!(Category::from("net"), "connected to {}", addr);
/// log!(Category::Data, title: "rows", "{}", rows.len());
/// ```
#[macro_export]
macro_rules! log {
    ($category:expr, title: $title:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::global::log(
            &$category,
            $title,
            format_args!($fmt, $($arg),*),
            &$crate::call_site!(),
        ).unwrap_or(false)
    };
    ($category:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::global::log(
            &$category,
            "",
            format_args!($fmt, $($arg),*),
            &$crate::call_site!(),
        ).unwrap_or(false)
    };
}

#[macro_export]
macro_rules! info {
    ($($t:tt)*) => {
        $crate::log!($crate::Category::Info, $($t)*)
    };
}

#[macro_export]
macro_rules! data {
    ($($t:tt)*) => {
        $crate::log!($crate::Category::Data, $($t)*)
    };
}

#[macro_export]
macro_rules! warning {
    ($($t:tt)*) => {
        $crate::log!($crate::Category::Warning, $($t)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($t:tt)*) => {
        $crate::log!($crate::Category::Error, $($t)*)
    };
}

#[macro_export]
macro_rules! success {
    ($($t:tt)*) => {
        $crate::log!($crate::Category::Success, $($t)*)
    };
}

#[macro_export]
macro_rules! status {
    ($category:expr, $code:expr $(,)?) => {
        $crate::global::status(&$category, $code, &$crate::call_site!())
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! section {
    ($title:expr $(,)?) => {
        $crate::global::section($title)
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! extime {
    ($timer:expr $(,)?) => {
        $crate::global::extime(&$timer, &$crate::call_site!())
    };
}

#[cfg(test)]
mod tests {
    use crate::{Category, Timer};

    // The global logger is shared by every test in the binary, so all
    // assertions about it live in this one test.
    #[test]
    fn global_gates() {
        super::init();
        super::with_settings(|s| {
            s.set_suppress_all(true);
        });
        assert!(!crate::info!("suppressed {}", 1));
        assert!(!crate::error!(title: "t", "suppressed"));
        assert!(!crate::status!(Category::Info, 404));
        assert!(!crate::section!("S"));
        let text = crate::extime!(Timer::start("quiet"));
        assert!(text.starts_with("quiet: "));

        super::with_settings(|s| {
            s.set_suppress_all(false).set_verbose(false);
            s.banner.enabled = false;
        });
        assert!(!crate::data!("hidden"));
        assert!(!crate::log!(Category::from("custom"), "hidden"));
        assert!(crate::success!("global logger ok"));
        assert!(super::with_logger(|logger| logger.banner_shown()));
        assert!(!super::init_with(crate::Settings::default()));
    }
}
