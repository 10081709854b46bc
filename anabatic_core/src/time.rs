// Copyright 2026 the Anabatic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotonic host time in microsecond ticks.
//!
//! [`HostTime`] represents a point on the host's monotonic clock. Backends
//! produce it from their native time source (`performance.now()` on the web,
//! `std::time::Instant` on the thread-timer backend) already converted to
//! microseconds, so no timebase conversion is carried through the core.
//!
//! [`Duration`] represents a span in the same microsecond units. The frame
//! loop only ever retains the previous tick's [`HostTime`] to compute elapsed
//! time; everything else (slide deadlines, debounce windows) is a
//! [`HostTime`] derived by adding a [`Duration`].

use core::fmt;
use core::ops::{Add, Sub};

/// Microseconds per millisecond, for converting host callback timestamps.
const MICROS_PER_MILLI: f64 = 1_000.0;

/// A point in time expressed as microseconds on the host's monotonic clock.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HostTime(pub u64);

impl HostTime {
    /// Returns the raw microsecond value.
    #[inline]
    #[must_use]
    pub const fn micros(self) -> u64 {
        self.0
    }

    /// Creates a `HostTime` from a floating-point millisecond timestamp, as
    /// delivered by host frame callbacks (`DOMHighResTimeStamp`).
    ///
    /// Negative inputs clamp to zero.
    #[inline]
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "host timestamps are small positive f64; µs fits in u64"
    )]
    pub fn from_millis_f64(millis: f64) -> Self {
        Self((millis.max(0.0) * MICROS_PER_MILLI) as u64)
    }

    /// Returns the duration between `self` and an earlier time, or zero if
    /// `earlier` is after `self`.
    #[inline]
    #[must_use]
    pub const fn saturating_duration_since(self, earlier: Self) -> Duration {
        Duration(self.0.saturating_sub(earlier.0))
    }

    /// Checked addition of a duration.
    #[inline]
    #[must_use]
    pub const fn checked_add(self, duration: Duration) -> Option<Self> {
        match self.0.checked_add(duration.0) {
            Some(t) => Some(Self(t)),
            None => None,
        }
    }

    /// Checked subtraction of a duration.
    #[inline]
    #[must_use]
    pub const fn checked_sub(self, duration: Duration) -> Option<Self> {
        match self.0.checked_sub(duration.0) {
            Some(t) => Some(Self(t)),
            None => None,
        }
    }
}

impl Add<Duration> for HostTime {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Duration) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub<Duration> for HostTime {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Duration) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Sub for HostTime {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: Self) -> Duration {
        Duration(self.0 - rhs.0)
    }
}

impl fmt::Debug for HostTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostTime({})", self.0)
    }
}

/// A span of time in microseconds.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration(pub u64);

impl Duration {
    /// A zero-length duration.
    pub const ZERO: Self = Self(0);

    /// Creates a duration from whole microseconds.
    #[inline]
    #[must_use]
    pub const fn from_micros(micros: u64) -> Self {
        Self(micros)
    }

    /// Creates a duration from whole milliseconds.
    #[inline]
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis * 1_000)
    }

    /// Returns the raw microsecond value.
    #[inline]
    #[must_use]
    pub const fn micros(self) -> u64 {
        self.0
    }

    /// Returns this duration in (fractional) milliseconds.
    #[inline]
    #[must_use]
    pub fn as_millis_f64(self) -> f64 {
        self.0 as f64 / MICROS_PER_MILLI
    }

    /// Returns this duration in (fractional) seconds.
    ///
    /// This is the value the animators multiply rates by, matching the host
    /// callback convention of `(current - previous) / 1000` milliseconds.
    #[inline]
    #[must_use]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    /// Saturating addition.
    #[inline]
    #[must_use]
    pub const fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// Saturating subtraction.
    #[inline]
    #[must_use]
    pub const fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Add for Duration {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Duration {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Debug for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Duration({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_timestamp_conversion() {
        let t = HostTime::from_millis_f64(16.5);
        assert_eq!(t.micros(), 16_500);
        assert_eq!(HostTime::from_millis_f64(-3.0), HostTime(0), "clamped");
    }

    #[test]
    fn duration_constructors_agree() {
        assert_eq!(Duration::from_millis(6_000), Duration::from_micros(6_000_000));
        assert_eq!(Duration::from_millis(200).as_millis_f64(), 200.0);
    }

    #[test]
    fn seconds_conversion_matches_host_convention() {
        // A 16.667ms frame delta divides down to seconds the way the host
        // loop's `(current - previous) / 1000` does.
        let dt = HostTime(1_016_667).saturating_duration_since(HostTime(1_000_000));
        assert!((dt.as_secs_f64() - 0.016_667).abs() < 1e-9);
    }

    #[test]
    fn duration_arithmetic() {
        let a = Duration(100);
        let b = Duration(30);
        assert_eq!((a + b).micros(), 130);
        assert_eq!((a - b).micros(), 70);
        assert_eq!(a.saturating_sub(Duration(200)), Duration::ZERO);
        assert_eq!(a.saturating_add(Duration(u64::MAX)), Duration(u64::MAX));
    }

    #[test]
    fn host_time_duration_ops() {
        let t = HostTime(1000);
        let d = Duration(200);
        assert_eq!((t + d).micros(), 1200);
        assert_eq!((t - d).micros(), 800);
        assert_eq!(t.saturating_duration_since(HostTime(1500)), Duration::ZERO);
        assert_eq!(t.saturating_duration_since(HostTime(400)), Duration(600));
        assert_eq!(t.checked_add(Duration(u64::MAX)), None);
        assert_eq!(t.checked_sub(Duration(2000)), None);
    }
}
