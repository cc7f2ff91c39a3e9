//! Call-site capture and caller-name resolution.

use core::fmt::{self, Debug, Display, Formatter};

use compact_str::CompactString;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location(&'static core::panic::Location<'static>);

impl Location {

    #[inline(always)]
    #[track_caller]
    pub fn caller() -> Self {
        Self(core::panic::Location::caller())
    }

    #[inline(always)]
    pub fn file(&self) -> &'static str {
        self.0.file()
    }

    #[inline(always)]
    pub fn line(&self) -> u32 {
        self.0.line()
    }
}

impl Display for Location {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.0.file(), self.0.line())
    }
}

impl Debug for Location {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        <core::panic::Location<'_> as Debug>::fmt(self.0, f)
    }
}

/// Where a print call came from.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CallSite {
    pub location: Location,
    pub module: &'static str,
    pub function: Option<&'static str>,
}

impl CallSite {

    /// Captures the location of the caller; the module and function are unknown.
    #[inline(always)]
    #[track_caller]
    pub fn here() -> Self {
        Self {
            location: Location::caller(),
            module: "",
            function: None,
        }
    }

    #[inline(always)]
    #[track_caller]
    pub fn new(module: &'static str, function: Option<&'static str>) -> Self {
        Self {
            location: Location::caller(),
            module,
            function,
        }
    }
}

/// Supplies the name of the function that invoked a print.
pub trait CallerNameResolver: Send {

    fn resolve(&self, site: &CallSite) -> Option<CompactString>;
}

/// Uses the function name captured at the call site, if any.
#[derive(Default, Clone, Copy, Debug)]
pub struct ExplicitName;

impl CallerNameResolver for ExplicitName {

    #[inline(always)]
    fn resolve(&self, site: &CallSite) -> Option<CompactString> {
        site.function.map(CompactString::from)
    }
}

/// Never resolves a name.
#[derive(Default, Clone, Copy, Debug)]
pub struct NoCaller;

impl CallerNameResolver for NoCaller {

    #[inline(always)]
    fn resolve(&self, _site: &CallSite) -> Option<CompactString> {
        None
    }
}

impl<F> CallerNameResolver for F
    where F: Fn(&CallSite) -> Option<CompactString> + Send
{

    #[inline(always)]
    fn resolve(&self, site: &CallSite) -> Option<CompactString> {
        self(site)
    }
}

/// Reduces a type path such as `my_crate::module::run::{{closure}}::f` to `run`.
///
/// `path` is expected to end with the marker item `::f` emitted by
/// [`function_name!`](crate::function_name).
pub fn trim_function_path(path: &'static str) -> &'static str {
    let mut path = path.strip_suffix("::f").unwrap_or(path);
    while let Some(stripped) = path.strip_suffix("::{{closure}}") {
        path = stripped;
    }
    match path.rfind("::") {
        Some(i) => &path[i + 2..],
        None => path,
    }
}

/// Name of the enclosing function.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        $crate::caller::trim_function_path(type_name_of(f))
    }};
}

/// [`CallSite`] of the macro invocation, function name included.
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::caller::CallSite::new(module_path!(), Some($crate::function_name!()))
    };
}
