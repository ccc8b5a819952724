//! Effective bounds for attribute synthesis.
//!
//! Declared `min`/`max` values win over defaults. A range whose minimum is
//! not below its maximum is degenerate: sampling yields the minimum.

use chrono::{Months, NaiveDate, TimeDelta};

use datasynth_core::{Constraints, MAX_TEXT_LENGTH};

pub const DEFAULT_INT_MIN: i64 = 0;
pub const DEFAULT_INT_MAX: i64 = 1000;
pub const DEFAULT_FLOAT_MIN: f64 = 0.0;
pub const DEFAULT_FLOAT_MAX: f64 = 1000.0;
pub const DEFAULT_TEXT_MIN_LEN: i64 = 1;
pub const DEFAULT_TEXT_MAX_LEN: i64 = 10;

/// Resolved `[lo, hi]` pair. Whether `hi` is inclusive depends on the kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    pub lo: T,
    pub hi: T,
}

impl<T: PartialOrd> Bounds<T> {
    pub fn new(lo: T, hi: T) -> Self {
        Self { lo, hi }
    }

    /// True when sampling must return `lo` unchanged.
    pub fn is_degenerate(&self) -> bool {
        !(self.lo < self.hi)
    }
}

/// Integer range, inclusive on both ends. Defaults to `[0, 1000]`.
pub fn int_range(constraints: Option<&Constraints>) -> Bounds<i64> {
    let (min, max) = declared(constraints);
    Bounds::new(
        min.map(truncate).unwrap_or(DEFAULT_INT_MIN),
        max.map(truncate).unwrap_or(DEFAULT_INT_MAX),
    )
}

/// Float range, upper bound exclusive. Defaults to `[0.0, 1000.0)`.
pub fn float_range(constraints: Option<&Constraints>) -> Bounds<f64> {
    let (min, max) = declared(constraints);
    Bounds::new(
        min.unwrap_or(DEFAULT_FLOAT_MIN),
        max.unwrap_or(DEFAULT_FLOAT_MAX),
    )
}

/// Text length range, inclusive. Defaults to `[1, 10]`; declared bounds are
/// capped at [`MAX_TEXT_LENGTH`].
pub fn length_range(constraints: Option<&Constraints>) -> Bounds<i64> {
    let (min, max) = declared(constraints);
    Bounds::new(
        min.map(truncate)
            .unwrap_or(DEFAULT_TEXT_MIN_LEN)
            .min(MAX_TEXT_LENGTH),
        max.map(truncate)
            .unwrap_or(DEFAULT_TEXT_MAX_LEN)
            .min(MAX_TEXT_LENGTH),
    )
}

/// Epoch-day range, inclusive. Defaults to 1970-01-01 through one year after
/// `today`. Declared days are clamped to what a calendar date can represent.
pub fn date_range(constraints: Option<&Constraints>, today: NaiveDate) -> Bounds<i64> {
    let (min, max) = declared(constraints);
    let default_max = today
        .checked_add_months(Months::new(12))
        .unwrap_or(NaiveDate::MAX);
    Bounds::new(
        min.map(truncate).map(clamp_day).unwrap_or(0),
        max.map(truncate)
            .map(clamp_day)
            .unwrap_or_else(|| epoch_day(default_max)),
    )
}

pub fn unix_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default()
}

/// Days elapsed since 1970-01-01 (negative before it).
pub fn epoch_day(date: NaiveDate) -> i64 {
    date.signed_duration_since(unix_epoch()).num_days()
}

/// Calendar date for an epoch day, if representable.
pub fn from_epoch_day(day: i64) -> Option<NaiveDate> {
    unix_epoch().checked_add_signed(TimeDelta::try_days(day)?)
}

fn declared(constraints: Option<&Constraints>) -> (Option<f64>, Option<f64>) {
    constraints.map_or((None, None), |c| (c.min, c.max))
}

// `as` truncates toward zero and saturates, which is the intended cast.
fn truncate(value: f64) -> i64 {
    value as i64
}

fn clamp_day(day: i64) -> i64 {
    // One day of margin keeps local-midnight conversion representable.
    let min = epoch_day(NaiveDate::MIN) + 1;
    let max = epoch_day(NaiveDate::MAX) - 1;
    day.clamp(min, max)
}
