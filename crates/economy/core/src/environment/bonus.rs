use crate::config::EconomyConfig;
use crate::number::ExtendedNumber;
use crate::rng::PcgRng;
use crate::stats::{StatKind, StatSet};

/// Short-lived pickup that grants extra progress when claimed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BonusOrb {
    pub reward: ExtendedNumber,
    pub remaining: f64,
}

impl BonusOrb {
    /// Rolls a new orb from the current stats.
    ///
    /// The reward is `ClickPower · r` with `r` drawn from
    /// `[MinRewardMultiplier, MaxRewardMultiplier)`. Bigger rolls live shorter:
    /// the lifetime is interpolated from the configured maximum down to the
    /// configured minimum as `r` moves across the range.
    pub fn roll(stats: &StatSet, config: &EconomyConfig, rng: &mut PcgRng) -> Self {
        let min = multiplier_bound(stats.get(StatKind::MinRewardMultiplier));
        let max = multiplier_bound(stats.get(StatKind::MaxRewardMultiplier)).max(min);
        let roll = rng.range(min, max);

        let ratio = if max > min {
            f64::from(roll - min) / f64::from(max - min)
        } else {
            0.0
        };
        let lifetime = config.bonus_max_lifetime
            + (config.bonus_min_lifetime - config.bonus_max_lifetime) * ratio;

        Self {
            reward: stats.get(StatKind::ClickPower) * ExtendedNumber::from(roll),
            remaining: lifetime.max(0.0),
        }
    }

    /// Ages the orb; returns false once it has expired.
    pub fn age(&mut self, dt: f64) -> bool {
        self.remaining -= dt;
        self.remaining > 0.0
    }
}

fn multiplier_bound(value: ExtendedNumber) -> u32 {
    value.to_f64().clamp(0.0, f64::from(u32::MAX)) as u32
}
