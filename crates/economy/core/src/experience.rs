//! Experience level curve.
//!
//! Level `n ≥ 1` requires `10 · 1.2^(n-1)` experience; anything below the first
//! threshold is level zero.

use crate::config::EconomyConfig;
use crate::number::ExtendedNumber;

/// Level reached with `experience` points.
pub fn level_from_experience(experience: ExtendedNumber) -> u64 {
    if experience < ExtendedNumber::from(EconomyConfig::BASE_LEVEL_EXPERIENCE) {
        return 0;
    }

    let steps = (experience.log10() - EconomyConfig::BASE_LEVEL_EXPERIENCE.log10())
        / EconomyConfig::LEVEL_EXPERIENCE_GROWTH.log10();
    // Nudge exact thresholds that land a hair below an integer.
    (steps + 1e-9).floor() as u64 + 1
}

/// Experience needed to reach `level`.
pub fn experience_for_level(level: u64) -> ExtendedNumber {
    if level == 0 {
        return ExtendedNumber::ZERO;
    }
    ExtendedNumber::from(EconomyConfig::BASE_LEVEL_EXPERIENCE)
        * ExtendedNumber::from(EconomyConfig::LEVEL_EXPERIENCE_GROWTH).pow((level - 1) as f64)
}
