//! Exponential backoff.

use std::time::Duration;

/// Grow `current` by `multiplier`, capped at `max`.
///
/// A multiplier below 1 shrinks the delay; non-finite results saturate to `max`.
pub fn next_delay(current: Duration, multiplier: f64, max: Duration) -> Duration {
    let scaled = current.as_secs_f64() * multiplier;
    match Duration::try_from_secs_f64(scaled) {
        Ok(delay) => delay.min(max),
        Err(_) if scaled.is_sign_negative() => Duration::ZERO,
        Err(_) => max,
    }
}
