//! Results and failures of environment actions.

use core::fmt;

use crate::catalog::{CostCurrency, TargetId, UpgradeId};
use crate::error::{EconomyError, ErrorSeverity};
use crate::number::ExtendedNumber;
use crate::progress::ProgressError;

/// Condition a purchase is still waiting on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Requirement {
    /// Another upgrade must reach `min_level` first.
    Upgrade { id: UpgradeId, min_level: u32 },
    /// A mastery upgrade can only be bought while its target is current.
    ActiveTarget(TargetId),
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upgrade { id, min_level } => write!(f, "`{}` at level {}", id, min_level),
            Self::ActiveTarget(target) => write!(f, "target `{}` to be active", target),
        }
    }
}

/// Why an environment action was refused. A refused action never mutates state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("unknown upgrade `{0}`")]
    UnknownUpgrade(UpgradeId),

    #[error("`{upgrade}` costs {cost} {currency}, balance is {balance}")]
    InsufficientFunds {
        upgrade: UpgradeId,
        currency: CostCurrency,
        cost: ExtendedNumber,
        balance: ExtendedNumber,
    },

    #[error("`{upgrade}` is already at its maximum level {max_level}")]
    UpgradeCapped { upgrade: UpgradeId, max_level: u32 },

    #[error("`{upgrade}` requires {requirement}")]
    UnmetPrerequisite {
        upgrade: UpgradeId,
        requirement: Requirement,
    },

    #[error("no bonus is active")]
    NoBonusActive,

    #[error(transparent)]
    Progress(#[from] ProgressError),
}

impl EconomyError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientFunds { .. } | Self::UnmetPrerequisite { .. } | Self::NoBonusActive => {
                ErrorSeverity::Recoverable
            }
            Self::UnknownUpgrade(_) | Self::UpgradeCapped { .. } => ErrorSeverity::Validation,
            Self::Progress(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownUpgrade(_) => "ACTION_UNKNOWN_UPGRADE",
            Self::InsufficientFunds { .. } => "ACTION_INSUFFICIENT_FUNDS",
            Self::UpgradeCapped { .. } => "ACTION_UPGRADE_CAPPED",
            Self::UnmetPrerequisite { .. } => "ACTION_UNMET_PREREQUISITE",
            Self::NoBonusActive => "ACTION_NO_BONUS_ACTIVE",
            Self::Progress(error) => error.error_code(),
        }
    }
}

/// Outcome of a successful purchase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub upgrade: UpgradeId,
    pub new_level: u32,
    pub currency: CostCurrency,
    pub cost: ExtendedNumber,
}

/// Running totals of what an environment has done since its last reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivityCounters {
    pub clicks: u64,
    pub purchases: u64,
    pub completions: u64,
    pub bonuses_claimed: u64,
}
