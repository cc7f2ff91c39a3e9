//! Human readable elapsed time.
//!
//! Durations are measured in nanoseconds against [`Instant`] and scaled to the
//! largest fitting unit: `ns`, `µs`, `ms`, `s`, or minutes past 120 seconds.

use std::time::Instant;

use compact_str::{CompactString, format_compact};

const NS_PER_US: f64 = 1e3;
const NS_PER_MS: f64 = 1e6;
const NS_PER_S: f64 = 1e9;
const MINUTES_AFTER_S: f64 = 120.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Unit {
    Nanos,
    Micros,
    Millis,
    Secs,
    Mins,
}

impl Unit {

    #[inline(always)]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Nanos => "ns",
            Self::Micros => "µs",
            Self::Millis => "ms",
            Self::Secs => "s",
            Self::Mins => " mins",
        }
    }
}

/// Picks the unit for `nanos` and converts the value to it.
///
/// Values below one microsecond, negative ones included, stay in
/// nanoseconds unchanged.
pub fn scale(nanos: f64) -> (f64, Unit) {
    if nanos < NS_PER_US {
        (nanos, Unit::Nanos)
    } else if nanos < NS_PER_MS {
        ((nanos / NS_PER_US).round_ties_even(), Unit::Micros)
    } else if nanos < NS_PER_S {
        ((nanos / NS_PER_MS).round_ties_even(), Unit::Millis)
    } else {
        let secs = nanos / NS_PER_S;
        if secs > MINUTES_AFTER_S {
            ((secs / 60.0).round_ties_even(), Unit::Mins)
        } else {
            (secs, Unit::Secs)
        }
    }
}

fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round_ties_even() / 100.0;
    // avoid printing "-0"
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Renders `label: value unit`, prefixing the value with `~` when `approximate`.
pub fn format_elapsed_ns(label: &str, nanos: f64, approximate: bool) -> CompactString {
    let (value, unit) = scale(nanos);
    let tilde = if approximate { "~" } else { "" };
    format_compact!("{}: {}{}{}", label, tilde, round2(value), unit.suffix())
}

/// Formats the time elapsed since `start`, multiplied by `scale_factor`.
pub fn format_elapsed(
    label: &str,
    start: Instant,
    scale_factor: f64,
    approximate: bool,
) -> CompactString {
    Timer::new(label, start)
        .scaled(scale_factor)
        .approximate(approximate)
        .format()
}

/// A running measurement.
#[derive(Clone, Debug)]
pub struct Timer {
    label: CompactString,
    start: Instant,
    scale: f64,
    approximate: bool,
}

impl Timer {

    #[inline(always)]
    pub fn start(label: impl AsRef<str>) -> Self {
        Self::new(label, Instant::now())
    }

    #[inline(always)]
    pub fn new(label: impl AsRef<str>, start: Instant) -> Self {
        Self {
            label: CompactString::new(label),
            start,
            scale: 1.0,
            approximate: false,
        }
    }

    /// Multiplies the measured time, e.g. to extrapolate from a sample.
    #[inline(always)]
    pub fn scaled(mut self, factor: f64) -> Self {
        self.scale = factor;
        self
    }

    #[inline(always)]
    pub fn approximate(mut self, approximate: bool) -> Self {
        self.approximate = approximate;
        self
    }

    #[inline(always)]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Scaled nanoseconds between the start and `now`.
    ///
    /// A `now` earlier than the start counts as zero.
    pub fn elapsed_ns_at(&self, now: Instant) -> f64 {
        now.saturating_duration_since(self.start).as_nanos() as f64 * self.scale
    }

    #[inline(always)]
    pub fn format_at(&self, now: Instant) -> CompactString {
        format_elapsed_ns(&self.label, self.elapsed_ns_at(now), self.approximate)
    }

    #[inline(always)]
    pub fn format(&self) -> CompactString {
        self.format_at(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    fn fmt(nanos: u64) -> CompactString {
        let start = Instant::now();
        Timer::new("label", start).format_at(start + Duration::from_nanos(nanos))
    }

    #[test]
    fn unit_boundaries() {
        assert_eq!(fmt(0), "label: 0ns");
        assert_eq!(fmt(999), "label: 999ns");
        assert_eq!(fmt(1_000), "label: 1µs");
        assert_eq!(fmt(999_999), "label: 1000µs");
        assert_eq!(fmt(1_000_000), "label: 1ms");
        assert_eq!(fmt(999_999_999), "label: 1000ms");
        assert_eq!(fmt(1_000_000_000), "label: 1s");
        assert_eq!(fmt(130_000_000_000), "label: 2 mins");
    }

    #[test]
    fn seconds_keep_two_decimals() {
        assert_eq!(fmt(1_500_000_000), "label: 1.5s");
        assert_eq!(fmt(12_345_678_901), "label: 12.35s");
        assert_eq!(fmt(120_000_000_000), "label: 120s");
        assert_eq!(fmt(150_000_000_000), "label: 2 mins");
        assert_eq!(fmt(600_000_000_000), "label: 10 mins");
    }

    #[test]
    fn approximate_marks_only_the_value() {
        let start = Instant::now();
        let timer = Timer::new("load", start).approximate(true);
        assert_eq!(timer.format_at(start + Duration::from_millis(5)), "load: ~5ms");
    }

    #[test]
    fn scale_factor_extrapolates() {
        let start = Instant::now();
        let timer = Timer::new("total", start).scaled(1000.0);
        assert_eq!(timer.format_at(start + Duration::from_micros(2)), "total: 2ms");
        let timer = Timer::new("half", start).scaled(0.5);
        assert_eq!(timer.format_at(start + Duration::from_nanos(3)), "half: 1.5ns");
    }

    #[test]
    fn now_before_start_is_zero() {
        let now = Instant::now();
        let timer = Timer::new("late", now + Duration::from_secs(1));
        assert_eq!(timer.format_at(now), "late: 0ns");
    }

    #[test]
    fn negative_raw_values_stay_in_nanos() {
        assert_eq!(format_elapsed_ns("neg", -5000.0, false), "neg: -5000ns");
        assert_eq!(scale(-1.0).1, Unit::Nanos);
    }

    #[test]
    fn format_elapsed_measures_from_start() {
        let out = format_elapsed("run", Instant::now(), 1.0, false);
        assert!(out.starts_with("run: "));
    }
}
