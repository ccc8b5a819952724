use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone};
use rand::Rng;

use datasynth_core::{Attribute, Constraints, DataType, Value};

use crate::resolve::{self, Bounds};

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
pub const ENUM_PLACEHOLDER_PREFIX: &str = "ENUM_VALUE_";

/// Synthesize one attribute value.
///
/// A non-empty candidate list wins over the declared type. Kinds without a
/// dedicated path, and attributes without a type, fall back to text with the
/// default length bounds.
pub fn synthesize_value<R: Rng + ?Sized>(
    attribute: &Attribute,
    today: NaiveDate,
    rng: &mut R,
) -> Value {
    let constraints = attribute.constraints.as_ref();

    if let Some(candidates) = constraints.and_then(Constraints::candidates) {
        let index = rng.random_range(0..candidates.len());
        return Value::Text(candidates[index].clone());
    }

    match attribute.data_type {
        Some(DataType::String) => Value::Text(random_text(constraints, rng)),
        Some(DataType::Integer) => Value::Integer(random_int(constraints, rng)),
        Some(DataType::Float | DataType::Double) => Value::Float(random_float(constraints, rng)),
        Some(DataType::Boolean) => Value::Boolean(rng.random_bool(0.5)),
        Some(DataType::Date) => Value::Date(random_date(constraints, today, rng)),
        Some(DataType::Enum) => Value::Text(enum_placeholder(rng)),
        _ => Value::Text(random_text(None, rng)),
    }
}

pub fn random_text<R: Rng + ?Sized>(constraints: Option<&Constraints>, rng: &mut R) -> String {
    let bounds = resolve::length_range(constraints);
    let len = sample_inclusive(bounds, rng).max(0) as usize;
    let mut value = String::with_capacity(len);
    for _ in 0..len {
        let idx = rng.random_range(0..ALPHABET.len());
        value.push(char::from(ALPHABET[idx]));
    }
    value
}

pub fn random_int<R: Rng + ?Sized>(constraints: Option<&Constraints>, rng: &mut R) -> i64 {
    sample_inclusive(resolve::int_range(constraints), rng)
}

pub fn random_float<R: Rng + ?Sized>(constraints: Option<&Constraints>, rng: &mut R) -> f64 {
    let bounds = resolve::float_range(constraints);
    if bounds.is_degenerate() {
        return bounds.lo;
    }
    let Bounds { lo, hi } = bounds;
    let value = lo + (hi - lo) * rng.random::<f64>();
    // Rounding can land exactly on `hi`, or the span can overflow to infinity.
    if value < hi && value.is_finite() {
        value
    } else {
        lo
    }
}

/// Uniform day in the resolved epoch-day range, at local midnight. An
/// inverted or empty range yields its first day.
pub fn random_date<R: Rng + ?Sized>(
    constraints: Option<&Constraints>,
    today: NaiveDate,
    rng: &mut R,
) -> DateTime<Local> {
    let day = sample_inclusive(resolve::date_range(constraints, today), rng);
    let date = resolve::from_epoch_day(day).unwrap_or_else(resolve::unix_epoch);
    local_midnight(date)
}

pub fn enum_placeholder<R: Rng + ?Sized>(rng: &mut R) -> String {
    let letter = char::from(b'A' + rng.random_range(0..26u8));
    format!("{ENUM_PLACEHOLDER_PREFIX}{letter}")
}

pub fn local_midnight(date: NaiveDate) -> DateTime<Local> {
    let naive = date.and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| Local.from_utc_datetime(&naive))
}

fn sample_inclusive<R: Rng + ?Sized>(bounds: Bounds<i64>, rng: &mut R) -> i64 {
    if bounds.is_degenerate() {
        bounds.lo
    } else {
        rng.random_range(bounds.lo..=bounds.hi)
    }
}
