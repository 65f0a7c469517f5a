//! The target chain: ordered destinations that pay out on completion.

use core::borrow::Borrow;
use core::fmt;
use std::collections::HashMap;

use crate::catalog::UpgradeId;
use crate::number::ExtendedNumber;

/// Target identifier, unique within a chain.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TargetId(pub String);

impl TargetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Borrow<str> for TargetId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Immutable definition of one target.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetDefinition {
    pub id: TargetId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub base_distance: ExtendedNumber,
    pub base_reward: ExtendedNumber,
    #[cfg_attr(feature = "serde", serde(default))]
    pub next: Option<TargetId>,
    /// Filled from the predecessor's `next` link when omitted.
    #[cfg_attr(feature = "serde", serde(default))]
    pub previous: Option<TargetId>,
    /// Upgrade that must be owned (level ≥ 1) before the target is reachable.
    #[cfg_attr(feature = "serde", serde(default))]
    pub unlock_upgrade: Option<UpgradeId>,
}

impl TargetDefinition {
    pub fn new(
        id: impl Into<String>,
        base_distance: impl Into<ExtendedNumber>,
        base_reward: impl Into<ExtendedNumber>,
    ) -> Self {
        Self {
            id: TargetId::new(id),
            name: String::new(),
            base_distance: base_distance.into(),
            base_reward: base_reward.into(),
            next: None,
            previous: None,
            unlock_upgrade: None,
        }
    }

    pub fn with_next(mut self, next: impl Into<String>) -> Self {
        self.next = Some(TargetId::new(next));
        self
    }

    pub fn with_unlock(mut self, upgrade: impl Into<String>) -> Self {
        self.unlock_upgrade = Some(UpgradeId::new(upgrade));
        self
    }
}

/// Doubly-linked chain of targets; the first listed target is the head.
#[derive(Clone, Debug)]
pub struct TargetChain {
    targets: Vec<TargetDefinition>,
    index: HashMap<TargetId, usize>,
}

impl TargetChain {
    /// Builds the index. Link validation happens in [`crate::Catalog::new`].
    pub(crate) fn new(targets: Vec<TargetDefinition>, index: HashMap<TargetId, usize>) -> Self {
        Self { targets, index }
    }

    pub fn head(&self) -> Option<&TargetDefinition> {
        self.targets.first()
    }

    pub fn get(&self, id: &str) -> Option<&TargetDefinition> {
        self.index.get(id).map(|&position| &self.targets[position])
    }

    pub fn next_of(&self, id: &str) -> Option<&TargetDefinition> {
        self.get(id)?.next.as_ref().and_then(|next| self.get(next.as_str()))
    }

    pub fn previous_of(&self, id: &str) -> Option<&TargetDefinition> {
        self.get(id)?
            .previous
            .as_ref()
            .and_then(|previous| self.get(previous.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetDefinition> {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
