//! # Unit Types
//!
//! The two numeric conventions the framing engine relies on:
//!
//! - Positions are compared after rounding to hundredths of an inch, so
//!   accumulated float error never creates or drops a member.
//! - Lengths shown to people (member names, precut labels) are rounded to
//!   the nearest 1/16" and written as a carpenter's fraction.
//!
//! ## Example
//!
//! ```rust
//! use frame_core::units::{format_fraction, position_key};
//!
//! assert_eq!(position_key(0.1 + 0.2), position_key(0.3));
//! assert_eq!(format_fraction(92.625), "92-5/8");
//! ```

/// Tolerance used for every position comparison in the engine.
pub const POSITION_EPSILON: f64 = 0.01;

/// Round to the nearest hundredth of an inch.
pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Integer key for a position rounded to hundredths (hashable, orderable).
pub fn position_key(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

/// Format a length as whole inches plus a reduced sixteenths fraction.
///
/// `92.625` becomes `"92-5/8"`, `96.0` becomes `"96"`, `0.4375` becomes `"7/16"`.
pub fn format_fraction(value: f64) -> String {
    let sixteenths = (value.abs() * 16.0).round() as i64;
    let sign = if value < 0.0 && sixteenths != 0 { "-" } else { "" };
    let whole = sixteenths / 16;
    let mut num = sixteenths % 16;
    let mut den = 16;
    while num != 0 && num % 2 == 0 {
        num /= 2;
        den /= 2;
    }
    match (whole, num) {
        (w, 0) => format!("{}{}", sign, w),
        (0, n) => format!("{}{}/{}", sign, n, den),
        (w, n) => format!("{}{}-{}/{}", sign, w, n, den),
    }
}

/// Format a length with a trailing inch mark, e.g. `92-5/8"`.
pub fn format_inches(value: f64) -> String {
    format!("{}\"", format_fraction(value))
}
