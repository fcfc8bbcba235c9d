use std::num::NonZeroUsize;

use model::{parse_number, DEFAULT_SPEED_MAX, DEFAULT_SPEED_MIN};

/// Used when the sampling rate box holds something unusable
pub const FALLBACK_SAMPLING_RATE: NonZeroUsize = match NonZeroUsize::new(3600) {
    Some(rate) => rate,
    None => unreachable!(),
};

/// Unparseable or zero bounds fall back to the defaults, like clearing the box would.
pub fn speed_min(raw: &str) -> f64 {
    nonzero_or(raw, DEFAULT_SPEED_MIN)
}

pub fn speed_max(raw: &str) -> f64 {
    nonzero_or(raw, DEFAULT_SPEED_MAX)
}

fn nonzero_or(raw: &str, fallback: f64) -> f64 {
    match parse_number(raw) {
        Some(x) if x != 0.0 => x,
        _ => fallback,
    }
}

/// Fractional rates are truncated. Anything below 1 falls back.
pub fn sampling_rate(raw: &str) -> NonZeroUsize {
    let parsed = parse_number(raw)
        .filter(|x| *x >= 1.0)
        .map(|x| x.trunc() as usize)
        .and_then(NonZeroUsize::new);
    parsed.unwrap_or(FALLBACK_SAMPLING_RATE)
}
