//! Colored console logging with category gating, status-code messages and
//! elapsed-time formatting.
//!
//! A [`Logger`] owns its [`Settings`] and writes to a [`Sink`](sink::Sink).
//! The macros ([`info!`], [`error!`], ...) go through a process-wide logger
//! in [`global`].

mod log;
pub mod caller;
pub mod category;
pub mod settings;
pub mod sink;
pub mod timer;
pub mod global;

pub use log::{Logger, PrintOpts, INTERNAL_LABEL};
pub use log::fmt::{self, LineEnd, LogFmt, LogFmtBuilder};
pub use log::error::LogError;

pub use caller::{CallSite, CallerNameResolver, ExplicitName, Location, NoCaller};
pub use category::{Category, CategoryStyle};
pub use settings::{Banner, Settings};
pub use sink::{Capture, Sink, Stdout};
pub use timer::{Timer, format_elapsed, format_elapsed_ns};

pub use termcolor::{Color, ColorSpec};

pub type Result<T> = core::result::Result<T, LogError>;
