//! Derived stats and their aggregation from owned upgrades.
//!
//! Stats are never mutated incrementally: every owned-level change rebuilds the
//! whole [`StatSet`] through [`recalculate`], so the set always equals the pure
//! function of the owned map and the catalog.
mod owned;

use core::ops::{Index, IndexMut};

pub use owned::OwnedUpgrades;

use crate::catalog::Catalog;
use crate::config::EconomyConfig;
use crate::number::ExtendedNumber;

/// Gameplay stats derived from owned upgrades.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatKind {
    /// Progress per click.
    ClickPower,
    /// Progress per second.
    PassivePower,
    /// Seconds between bonus spawns; upgrades lower it.
    SpawnRate,
    MinRewardMultiplier,
    MaxRewardMultiplier,
    /// Percentage bonus applied to click and passive progress.
    DamageMultiplier,
}

impl StatKind {
    const fn slot(self) -> usize {
        self as usize
    }

    /// Value of the stat before any upgrade is owned.
    pub fn baseline(self) -> ExtendedNumber {
        let value = match self {
            Self::ClickPower => EconomyConfig::BASE_CLICK_POWER,
            Self::PassivePower => EconomyConfig::BASE_PASSIVE_POWER,
            Self::SpawnRate => EconomyConfig::BASE_SPAWN_RATE,
            Self::MinRewardMultiplier => EconomyConfig::BASE_MIN_REWARD_MULTIPLIER,
            Self::MaxRewardMultiplier => EconomyConfig::BASE_MAX_REWARD_MULTIPLIER,
            Self::DamageMultiplier => EconomyConfig::BASE_DAMAGE_MULTIPLIER,
        };
        ExtendedNumber::from(value)
    }
}

/// Complete set of derived stats, one value per [`StatKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatSet {
    values: [ExtendedNumber; <StatKind as strum::EnumCount>::COUNT],
}

impl StatSet {
    pub fn baseline() -> Self {
        let mut values = [ExtendedNumber::ZERO; <StatKind as strum::EnumCount>::COUNT];
        for kind in <StatKind as strum::IntoEnumIterator>::iter() {
            values[kind.slot()] = kind.baseline();
        }
        Self { values }
    }

    pub fn get(&self, kind: StatKind) -> ExtendedNumber {
        self.values[kind.slot()]
    }

    /// Multiplier applied to raw progress: `1 + DamageMultiplier / 100`.
    pub fn damage_factor(&self) -> ExtendedNumber {
        ExtendedNumber::ONE + self.get(StatKind::DamageMultiplier) / ExtendedNumber::from(100.0)
    }

    /// Progress granted by one click.
    pub fn click_progress(&self) -> ExtendedNumber {
        self.get(StatKind::ClickPower) * self.damage_factor()
    }

    /// Progress granted per second of idle time.
    pub fn passive_progress(&self) -> ExtendedNumber {
        self.get(StatKind::PassivePower) * self.damage_factor()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatKind, ExtendedNumber)> + '_ {
        <StatKind as strum::IntoEnumIterator>::iter().map(|kind| (kind, self.get(kind)))
    }
}

impl Default for StatSet {
    fn default() -> Self {
        Self::baseline()
    }
}

impl Index<StatKind> for StatSet {
    type Output = ExtendedNumber;

    fn index(&self, kind: StatKind) -> &ExtendedNumber {
        &self.values[kind.slot()]
    }
}

impl IndexMut<StatKind> for StatSet {
    fn index_mut(&mut self, kind: StatKind) -> &mut ExtendedNumber {
        &mut self.values[kind.slot()]
    }
}

/// Rebuilds every stat from the baseline and the owned levels.
///
/// Only stat-bearing categories contribute. Contributions to SpawnRate are
/// subtracted (they shorten the interval) and the result is floored at
/// [`EconomyConfig::MIN_SPAWN_RATE`]; every other stat is floored at zero.
pub fn recalculate(owned: &OwnedUpgrades, catalog: &Catalog) -> StatSet {
    let mut stats = StatSet::baseline();

    for (id, level) in owned.iter() {
        let Some(upgrade) = catalog.upgrade(id.as_str()) else {
            continue;
        };
        let Some(stat) = upgrade.effective_stat() else {
            continue;
        };

        let gain = upgrade.gain_at(level);
        match stat {
            StatKind::SpawnRate => stats[stat] -= gain,
            _ => stats[stat] += gain,
        }
    }

    for kind in <StatKind as strum::IntoEnumIterator>::iter() {
        stats[kind] = match kind {
            StatKind::SpawnRate => stats[kind].max(ExtendedNumber::from(EconomyConfig::MIN_SPAWN_RATE)),
            _ => stats[kind].non_negative(),
        };
    }

    stats
}
