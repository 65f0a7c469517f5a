//! Upgrade definitions and their cost/gain curves.

use core::borrow::Borrow;
use core::fmt;

use crate::catalog::TargetId;
use crate::number::ExtendedNumber;
use crate::stats::StatKind;

/// Globally unique upgrade identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct UpgradeId(pub String);

impl UpgradeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UpgradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UpgradeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Borrow<str> for UpgradeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// What purchasing an upgrade does.
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
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UpgradeCategory {
    /// Adds to a derived stat.
    Stat,
    /// Unlocks a target in the chain once bought.
    TargetUnlock,
    /// Scales one target's distance and reward.
    Mastery,
    /// Shortens the bonus spawn interval.
    SpawnRate,
}

impl UpgradeCategory {
    /// Whether levels of this category feed the stat aggregation.
    pub const fn affects_stats(&self) -> bool {
        matches!(self, Self::Stat | Self::SpawnRate)
    }
}

/// Ledger an upgrade is paid from.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CostCurrency {
    #[default]
    Currency,
    Experience,
}

/// Tier bonus applied once an upgrade reaches `level_threshold`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Milestone {
    pub level_threshold: u32,
    #[cfg_attr(feature = "serde", serde(default = "unit_multiplier"))]
    pub cost_multiplier: f64,
    #[cfg_attr(feature = "serde", serde(default = "unit_multiplier"))]
    pub gain_multiplier: f64,
}

/// Requires another upgrade to reach a minimum level before purchase.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnlockCondition {
    pub upgrade: UpgradeId,
    #[cfg_attr(feature = "serde", serde(default = "first_level"))]
    pub min_level: u32,
}

/// Binds a Mastery upgrade to the target whose values it scales.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MasteryEffect {
    pub target: TargetId,
    #[cfg_attr(feature = "serde", serde(default = "default_mastery_multiplier"))]
    pub distance_multiplier: f64,
    #[cfg_attr(feature = "serde", serde(default = "default_mastery_multiplier"))]
    pub reward_multiplier: f64,
}

impl MasteryEffect {
    pub const DEFAULT_MULTIPLIER: f64 = 1.1;

    pub fn new(target: TargetId) -> Self {
        Self {
            target,
            distance_multiplier: Self::DEFAULT_MULTIPLIER,
            reward_multiplier: Self::DEFAULT_MULTIPLIER,
        }
    }

    /// Factor applied to the target's base distance at `level`.
    pub fn distance_factor(&self, level: u32) -> ExtendedNumber {
        ExtendedNumber::from(self.distance_multiplier).powi(i64::from(level))
    }

    /// Factor applied to the target's base reward at `level`.
    pub fn reward_factor(&self, level: u32) -> ExtendedNumber {
        ExtendedNumber::from(self.reward_multiplier).powi(i64::from(level))
    }
}

#[cfg(feature = "serde")]
fn unit_multiplier() -> f64 {
    1.0
}

#[cfg(feature = "serde")]
fn first_level() -> u32 {
    1
}

#[cfg(feature = "serde")]
fn default_mastery_multiplier() -> f64 {
    MasteryEffect::DEFAULT_MULTIPLIER
}

/// Immutable definition of a purchasable upgrade.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpgradeDefinition {
    pub id: UpgradeId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub category: UpgradeCategory,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost_currency: CostCurrency,
    pub base_cost: ExtendedNumber,
    pub cost_growth: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub affected_stat: Option<StatKind>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_gain: ExtendedNumber,
    /// Highest purchasable level; zero means unbounded.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_level: u32,
    /// Sorted by threshold once the definition enters a [`crate::Catalog`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub milestones: Vec<Milestone>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub unlock: Option<UnlockCondition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mastery: Option<MasteryEffect>,
}

impl UpgradeDefinition {
    /// Minimal definition with no curve modifiers; mainly for tests and tooling.
    pub fn new(
        id: impl Into<String>,
        category: UpgradeCategory,
        base_cost: impl Into<ExtendedNumber>,
        cost_growth: f64,
    ) -> Self {
        Self {
            id: UpgradeId::new(id),
            name: String::new(),
            description: String::new(),
            category,
            cost_currency: CostCurrency::Currency,
            base_cost: base_cost.into(),
            cost_growth,
            affected_stat: None,
            base_gain: ExtendedNumber::ZERO,
            max_level: 0,
            milestones: Vec::new(),
            unlock: None,
            mastery: None,
        }
    }

    pub fn with_stat(mut self, stat: StatKind, base_gain: impl Into<ExtendedNumber>) -> Self {
        self.affected_stat = Some(stat);
        self.base_gain = base_gain.into();
        self
    }

    pub fn with_max_level(mut self, max_level: u32) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn with_milestone(mut self, milestone: Milestone) -> Self {
        self.milestones.push(milestone);
        self
    }

    pub fn with_unlock(mut self, upgrade: impl Into<String>, min_level: u32) -> Self {
        self.unlock = Some(UnlockCondition {
            upgrade: UpgradeId::new(upgrade),
            min_level,
        });
        self
    }

    pub fn with_mastery(mut self, target: impl Into<String>) -> Self {
        self.mastery = Some(MasteryEffect::new(TargetId::new(target)));
        self
    }

    pub fn with_cost_currency(mut self, currency: CostCurrency) -> Self {
        self.cost_currency = currency;
        self
    }

    /// The stat this upgrade feeds, if any.
    ///
    /// SpawnRate upgrades always feed the SpawnRate stat, even when content
    /// leaves `affected_stat` empty.
    pub fn effective_stat(&self) -> Option<StatKind> {
        match self.category {
            UpgradeCategory::SpawnRate => Some(self.affected_stat.unwrap_or(StatKind::SpawnRate)),
            UpgradeCategory::Stat => self.affected_stat,
            UpgradeCategory::TargetUnlock | UpgradeCategory::Mastery => None,
        }
    }

    /// Whether `level` is already the highest purchasable level.
    pub fn is_capped(&self, level: u32) -> bool {
        self.max_level != 0 && level >= self.max_level
    }

    /// Price of buying the level after `level`.
    ///
    /// `base_cost · growth^level · Π cost_multiplier` over milestones already reached.
    pub fn cost_at(&self, level: u32) -> ExtendedNumber {
        let tier = self
            .milestones
            .iter()
            .filter(|milestone| milestone.level_threshold <= level)
            .fold(ExtendedNumber::ONE, |acc, milestone| {
                acc * ExtendedNumber::from(milestone.cost_multiplier)
            });

        self.base_cost * ExtendedNumber::from(self.cost_growth).powi(i64::from(level)) * tier
    }

    /// Value of the level bought while the upgrade sits at `level`.
    pub fn gain_per_level_at(&self, level: u32) -> ExtendedNumber {
        self.milestones
            .iter()
            .filter(|milestone| milestone.level_threshold <= level)
            .fold(self.base_gain, |acc, milestone| {
                acc * ExtendedNumber::from(milestone.gain_multiplier)
            })
    }

    /// Total contribution of `level` owned levels.
    ///
    /// Each level `k` in `0..level` is worth [`Self::gain_per_level_at`]`(k)`, so
    /// levels bought after a milestone are worth the boosted amount while
    /// earlier levels keep their original value. Milestones must be sorted.
    pub fn gain_at(&self, level: u32) -> ExtendedNumber {
        let mut total = ExtendedNumber::ZERO;
        let mut per_level = self.base_gain;
        let mut segment_start = 0;

        for milestone in &self.milestones {
            if milestone.level_threshold >= level {
                break;
            }
            let count = milestone.level_threshold.saturating_sub(segment_start);
            total += per_level * ExtendedNumber::from(count);
            per_level *= ExtendedNumber::from(milestone.gain_multiplier);
            segment_start = segment_start.max(milestone.level_threshold);
        }

        total + per_level * ExtendedNumber::from(level - segment_start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click_upgrade() -> UpgradeDefinition {
        UpgradeDefinition::new("click", UpgradeCategory::Stat, 10.0, 1.5)
            .with_stat(StatKind::ClickPower, 1.0)
    }

    #[test]
    fn cost_follows_geometric_growth() {
        let upgrade = click_upgrade();
        assert_eq!(upgrade.cost_at(0), ExtendedNumber::from(10.0));
        assert_eq!(upgrade.cost_at(1), ExtendedNumber::from(15.0));
        assert_eq!(upgrade.cost_at(2), ExtendedNumber::from(22.5));
    }

    #[test]
    fn milestones_multiply_cost_from_their_threshold() {
        let upgrade = UpgradeDefinition::new("tiered", UpgradeCategory::Stat, 10.0, 1.0)
            .with_stat(StatKind::ClickPower, 1.0)
            .with_milestone(Milestone {
                level_threshold: 2,
                cost_multiplier: 3.0,
                gain_multiplier: 2.0,
            });

        assert_eq!(upgrade.cost_at(1), ExtendedNumber::from(10.0));
        assert_eq!(upgrade.cost_at(2), ExtendedNumber::from(30.0));
    }

    #[test]
    fn gain_accumulates_per_level_across_milestones() {
        let upgrade = UpgradeDefinition::new("tiered", UpgradeCategory::Stat, 10.0, 1.0)
            .with_stat(StatKind::ClickPower, 1.0)
            .with_milestone(Milestone {
                level_threshold: 2,
                cost_multiplier: 1.0,
                gain_multiplier: 2.0,
            })
            .with_milestone(Milestone {
                level_threshold: 4,
                cost_multiplier: 1.0,
                gain_multiplier: 5.0,
            });

        assert_eq!(upgrade.gain_at(0), ExtendedNumber::ZERO);
        assert_eq!(upgrade.gain_at(1), ExtendedNumber::from(1.0));
        assert_eq!(upgrade.gain_at(2), ExtendedNumber::from(2.0));
        // levels 0,1 at x1, levels 2,3 at x2, level 4 at x10
        assert_eq!(upgrade.gain_at(5), ExtendedNumber::from(16.0));
        assert_eq!(upgrade.gain_per_level_at(4), ExtendedNumber::from(10.0));
    }

    #[test]
    fn spawn_rate_upgrades_default_to_the_spawn_rate_stat() {
        let mut upgrade = UpgradeDefinition::new("spawn", UpgradeCategory::SpawnRate, 5.0, 2.0);
        upgrade.base_gain = ExtendedNumber::from(0.1);
        assert_eq!(upgrade.effective_stat(), Some(StatKind::SpawnRate));

        let unlock = UpgradeDefinition::new("unlock", UpgradeCategory::TargetUnlock, 5.0, 1.0);
        assert_eq!(unlock.effective_stat(), None);
    }

    #[test]
    fn zero_max_level_is_unbounded() {
        let upgrade = click_upgrade();
        assert!(!upgrade.is_capped(u32::MAX));
        assert!(upgrade.clone().with_max_level(3).is_capped(3));
        assert!(!upgrade.with_max_level(3).is_capped(2));
    }

    #[test]
    fn category_names_parse_from_snake_case() {
        assert_eq!(
            "target_unlock".parse::<UpgradeCategory>().unwrap(),
            UpgradeCategory::TargetUnlock
        );
        assert_eq!(UpgradeCategory::SpawnRate.to_string(), "spawn_rate");
    }
}
