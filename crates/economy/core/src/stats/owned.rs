use std::collections::BTreeMap;

use crate::catalog::UpgradeId;

/// Owned upgrade levels of one environment.
///
/// Missing entries read as level zero. Iteration is ordered by id so that
/// aggregation over the map is reproducible bit for bit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OwnedUpgrades {
    levels: BTreeMap<UpgradeId, u32>,
}

impl OwnedUpgrades {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self, id: &str) -> u32 {
        self.levels.get(id).copied().unwrap_or(0)
    }

    /// Raises an upgrade by one level and returns the new level.
    pub fn increment(&mut self, id: &str) -> u32 {
        let level = self.levels.entry(UpgradeId::new(id)).or_insert(0);
        *level = level.saturating_add(1);
        *level
    }

    /// Overwrites a level, used when restoring persisted state.
    pub fn set(&mut self, id: UpgradeId, level: u32) {
        if level == 0 {
            self.levels.remove(&id);
        } else {
            self.levels.insert(id, level);
        }
    }

    /// Drops every owned level.
    pub fn zero_all(&mut self) {
        self.levels.clear();
    }

    /// Owned upgrades with a non-zero level, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = (&UpgradeId, u32)> {
        self.levels.iter().map(|(id, &level)| (id, level))
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl FromIterator<(UpgradeId, u32)> for OwnedUpgrades {
    fn from_iter<I: IntoIterator<Item = (UpgradeId, u32)>>(iter: I) -> Self {
        let mut owned = Self::new();
        for (id, level) in iter {
            owned.set(id, level);
        }
        owned
    }
}
