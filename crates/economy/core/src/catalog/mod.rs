//! Shared, read-only content: upgrade definitions and the target chain.
//!
//! A [`Catalog`] is validated once at construction and then shared by every
//! environment (typically behind an `Arc`). Construction fails fast on any
//! inconsistency so that gameplay code can assume every reference resolves.
mod target;
mod upgrade;

use std::collections::{HashMap, HashSet};

pub use target::{TargetChain, TargetDefinition, TargetId};
pub use upgrade::{
    CostCurrency, MasteryEffect, Milestone, UnlockCondition, UpgradeCategory, UpgradeDefinition,
    UpgradeId,
};

use crate::error::{EconomyError, ErrorSeverity};
use crate::number::ExtendedNumber;
use crate::stats::OwnedUpgrades;

/// Content inconsistencies detected while building a [`Catalog`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate upgrade id `{0}`")]
    DuplicateUpgrade(UpgradeId),

    #[error("duplicate target id `{0}`")]
    DuplicateTarget(TargetId),

    #[error("catalog has no targets")]
    EmptyTargetChain,

    #[error("upgrade `{upgrade}` requires unknown upgrade `{requires}`")]
    UnknownUnlockUpgrade {
        upgrade: UpgradeId,
        requires: UpgradeId,
    },

    #[error("upgrade `{0}` must have a positive, finite cost growth")]
    InvalidGrowth(UpgradeId),

    #[error("stat upgrade `{0}` does not name an affected stat")]
    MissingAffectedStat(UpgradeId),

    #[error("mastery upgrade `{0}` is not bound to a target")]
    MissingMasteryTarget(UpgradeId),

    #[error("mastery upgrade `{upgrade}` references unknown target `{target}`")]
    UnknownMasteryTarget { upgrade: UpgradeId, target: TargetId },

    #[error("target `{target}` has more than one mastery upgrade")]
    DuplicateMastery { target: TargetId },

    #[error("target `{target}` links to unknown target `{link}`")]
    UnknownTargetLink { target: TargetId, link: TargetId },

    #[error("target `{target}` is unlocked by unknown upgrade `{upgrade}`")]
    UnknownTargetUnlock { target: TargetId, upgrade: UpgradeId },

    #[error("target `{target}` has inconsistent previous link")]
    InconsistentChain { target: TargetId },

    #[error("target chain loops back to `{0}`")]
    ChainCycle(TargetId),
}

impl EconomyError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateUpgrade(_) => "CATALOG_DUPLICATE_UPGRADE",
            Self::DuplicateTarget(_) => "CATALOG_DUPLICATE_TARGET",
            Self::EmptyTargetChain => "CATALOG_EMPTY_TARGET_CHAIN",
            Self::UnknownUnlockUpgrade { .. } => "CATALOG_UNKNOWN_UNLOCK_UPGRADE",
            Self::InvalidGrowth(_) => "CATALOG_INVALID_GROWTH",
            Self::MissingAffectedStat(_) => "CATALOG_MISSING_AFFECTED_STAT",
            Self::MissingMasteryTarget(_) => "CATALOG_MISSING_MASTERY_TARGET",
            Self::UnknownMasteryTarget { .. } => "CATALOG_UNKNOWN_MASTERY_TARGET",
            Self::DuplicateMastery { .. } => "CATALOG_DUPLICATE_MASTERY",
            Self::UnknownTargetLink { .. } => "CATALOG_UNKNOWN_TARGET_LINK",
            Self::UnknownTargetUnlock { .. } => "CATALOG_UNKNOWN_TARGET_UNLOCK",
            Self::InconsistentChain { .. } => "CATALOG_INCONSISTENT_CHAIN",
            Self::ChainCycle(_) => "CATALOG_CHAIN_CYCLE",
        }
    }
}

/// Immutable upgrade table plus target chain.
#[derive(Clone, Debug)]
pub struct Catalog {
    upgrades: Vec<UpgradeDefinition>,
    index: HashMap<UpgradeId, usize>,
    targets: TargetChain,
    mastery_by_target: HashMap<TargetId, usize>,
}

impl Catalog {
    /// Validates and indexes content. Upgrades keep their listed order.
    pub fn new(
        upgrades: Vec<UpgradeDefinition>,
        targets: Vec<TargetDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut upgrades = upgrades;
        let mut index = HashMap::with_capacity(upgrades.len());
        for (position, upgrade) in upgrades.iter_mut().enumerate() {
            if index.insert(upgrade.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateUpgrade(upgrade.id.clone()));
            }
            upgrade
                .milestones
                .sort_by_key(|milestone| milestone.level_threshold);
        }

        let targets = Self::link_targets(targets, &index)?;

        let mut mastery_by_target = HashMap::new();
        for (position, upgrade) in upgrades.iter().enumerate() {
            if !(upgrade.cost_growth.is_finite() && upgrade.cost_growth > 0.0) {
                return Err(CatalogError::InvalidGrowth(upgrade.id.clone()));
            }

            if let Some(unlock) = &upgrade.unlock
                && !index.contains_key(&unlock.upgrade)
            {
                return Err(CatalogError::UnknownUnlockUpgrade {
                    upgrade: upgrade.id.clone(),
                    requires: unlock.upgrade.clone(),
                });
            }

            match upgrade.category {
                UpgradeCategory::Stat if upgrade.affected_stat.is_none() => {
                    return Err(CatalogError::MissingAffectedStat(upgrade.id.clone()));
                }
                UpgradeCategory::Mastery => {
                    let Some(mastery) = &upgrade.mastery else {
                        return Err(CatalogError::MissingMasteryTarget(upgrade.id.clone()));
                    };
                    if targets.get(mastery.target.as_str()).is_none() {
                        return Err(CatalogError::UnknownMasteryTarget {
                            upgrade: upgrade.id.clone(),
                            target: mastery.target.clone(),
                        });
                    }
                    if mastery_by_target
                        .insert(mastery.target.clone(), position)
                        .is_some()
                    {
                        return Err(CatalogError::DuplicateMastery {
                            target: mastery.target.clone(),
                        });
                    }
                }
                _ => {}
            }
        }

        Ok(Self {
            upgrades,
            index,
            targets,
            mastery_by_target,
        })
    }

    fn link_targets(
        mut targets: Vec<TargetDefinition>,
        upgrades: &HashMap<UpgradeId, usize>,
    ) -> Result<TargetChain, CatalogError> {
        if targets.is_empty() {
            return Err(CatalogError::EmptyTargetChain);
        }

        let mut index = HashMap::with_capacity(targets.len());
        for (position, target) in targets.iter().enumerate() {
            if index.insert(target.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateTarget(target.id.clone()));
            }
        }

        for position in 0..targets.len() {
            let target = &targets[position];
            if let Some(upgrade) = &target.unlock_upgrade
                && !upgrades.contains_key(upgrade)
            {
                return Err(CatalogError::UnknownTargetUnlock {
                    target: target.id.clone(),
                    upgrade: upgrade.clone(),
                });
            }
            if let Some(previous) = &target.previous
                && !index.contains_key(previous)
            {
                return Err(CatalogError::UnknownTargetLink {
                    target: target.id.clone(),
                    link: previous.clone(),
                });
            }

            let Some(next) = target.next.clone() else {
                continue;
            };
            let Some(&next_position) = index.get(&next) else {
                return Err(CatalogError::UnknownTargetLink {
                    target: target.id.clone(),
                    link: next,
                });
            };

            let id = target.id.clone();
            let successor = &mut targets[next_position];
            match &successor.previous {
                None => successor.previous = Some(id),
                Some(previous) if *previous == id => {}
                Some(_) => return Err(CatalogError::InconsistentChain { target: next }),
            }
        }

        // Walk from every target so loops detached from the head are caught too.
        let mut settled: HashSet<TargetId> = HashSet::new();
        for start in &targets {
            let mut path = HashSet::new();
            let mut cursor = Some(start.id.clone());
            while let Some(id) = cursor {
                if settled.contains(&id) {
                    break;
                }
                if !path.insert(id.clone()) {
                    return Err(CatalogError::ChainCycle(id));
                }
                cursor = targets[index[&id]].next.clone();
            }
            settled.extend(path);
        }

        Ok(TargetChain::new(targets, index))
    }

    pub fn upgrade(&self, id: &str) -> Option<&UpgradeDefinition> {
        self.index.get(id).map(|&position| &self.upgrades[position])
    }

    /// Upgrades in content order.
    pub fn upgrades(&self) -> impl Iterator<Item = &UpgradeDefinition> {
        self.upgrades.iter()
    }

    pub fn targets(&self) -> &TargetChain {
        &self.targets
    }

    pub fn target(&self, id: &str) -> Option<&TargetDefinition> {
        self.targets.get(id)
    }

    pub fn cost_at(&self, id: &str, level: u32) -> Option<ExtendedNumber> {
        self.upgrade(id).map(|upgrade| upgrade.cost_at(level))
    }

    pub fn gain_at(&self, id: &str, level: u32) -> Option<ExtendedNumber> {
        self.upgrade(id).map(|upgrade| upgrade.gain_at(level))
    }

    /// Evaluates an upgrade's unlock condition. Unknown ids are never unlocked.
    pub fn is_unlocked(&self, id: &str, owned: &OwnedUpgrades) -> bool {
        match self.upgrade(id) {
            Some(upgrade) => upgrade
                .unlock
                .as_ref()
                .is_none_or(|unlock| owned.level(unlock.upgrade.as_str()) >= unlock.min_level),
            None => false,
        }
    }

    /// Whether a target's unlock upgrade (if any) has been bought.
    pub fn is_target_reachable(&self, id: &str, owned: &OwnedUpgrades) -> bool {
        match self.target(id) {
            Some(target) => target
                .unlock_upgrade
                .as_ref()
                .is_none_or(|upgrade| owned.level(upgrade.as_str()) >= 1),
            None => false,
        }
    }

    /// The Mastery upgrade bound to `target`, if any.
    pub fn mastery_for(&self, target: &str) -> Option<&UpgradeDefinition> {
        self.mastery_by_target
            .get(target)
            .map(|&position| &self.upgrades[position])
    }

    /// Distance and reward of `target` after its mastery level is applied.
    pub fn resolve_target(
        &self,
        target: &str,
        owned: &OwnedUpgrades,
    ) -> Option<(ExtendedNumber, ExtendedNumber)> {
        let definition = self.target(target)?;
        let resolved = match self.mastery_for(target) {
            Some(upgrade) => {
                let level = owned.level(upgrade.id.as_str());
                // Bound at construction: every Mastery upgrade carries its effect.
                let effect = upgrade.mastery.as_ref()?;
                (
                    definition.base_distance * effect.distance_factor(level),
                    definition.base_reward * effect.reward_factor(level),
                )
            }
            None => (definition.base_distance, definition.base_reward),
        };
        Some(resolved)
    }

    /// Last target reachable by walking forward from the head.
    pub fn furthest_reachable(&self, owned: &OwnedUpgrades) -> Option<&TargetDefinition> {
        let mut current = self.targets.head()?;
        while let Some(next) = self.targets.next_of(current.id.as_str()) {
            if !self.is_target_reachable(next.id.as_str(), owned) {
                break;
            }
            current = next;
        }
        Some(current)
    }
}
