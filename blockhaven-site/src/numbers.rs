//! Numeric conversion helpers centralizing lossy casts.

use num_traits::cast::cast;

/// Convert a position or count to f64, saturating at `f64::MAX`.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(f64::MAX)
}

/// Convert a player-count delta back into the `u32` range, clamped.
#[must_use]
pub fn clamp_i64_to_u32(value: i64) -> u32 {
    cast::<i64, u32>(value.clamp(0, i64::from(u32::MAX))).unwrap_or(0)
}

/// Virtual-clock milliseconds as an event timestamp.
#[must_use]
pub fn ms_to_f64(value: u64) -> f64 {
    cast::<u64, f64>(value).unwrap_or(f64::MAX)
}

/// A JavaScript number as a whole price; fractions truncate and non-finite
/// values are rejected.
#[must_use]
pub fn price_from_f64(value: f64) -> Option<i64> {
    cast::<f64, i64>(value.trunc())
}

/// Largest integer a JavaScript number holds exactly (`Number.MAX_SAFE_INTEGER`).
pub const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

/// An amount as a JavaScript number, when it survives the trip exactly.
#[must_use]
pub fn to_js_number(value: i64) -> Option<f64> {
    if value.unsigned_abs() > MAX_SAFE_INTEGER.unsigned_abs() {
        return None;
    }
    cast::<i64, f64>(value)
}
