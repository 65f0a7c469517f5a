/// Tunable economy parameters shared by every environment of a registry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EconomyConfig {
    /// Fraction of a completion reward that is also granted as experience.
    pub experience_ratio: f64,

    /// Lifetime in seconds of a bonus orb carrying the largest possible reward.
    pub bonus_min_lifetime: f64,

    /// Lifetime in seconds of a bonus orb carrying the smallest possible reward.
    pub bonus_max_lifetime: f64,

    /// Base seed mixed into every environment's bonus-reward draws.
    pub seed: u64,
}

impl EconomyConfig {
    // ===== stat baselines of a fresh environment =====
    pub const BASE_CLICK_POWER: f64 = 0.1;
    pub const BASE_PASSIVE_POWER: f64 = 0.0;
    pub const BASE_SPAWN_RATE: f64 = 1.0;
    pub const BASE_MIN_REWARD_MULTIPLIER: f64 = 2.0;
    pub const BASE_MAX_REWARD_MULTIPLIER: f64 = 8.0;
    pub const BASE_DAMAGE_MULTIPLIER: f64 = 0.0;

    /// Shortest allowed bonus spawn interval in seconds.
    pub const MIN_SPAWN_RATE: f64 = 0.2;

    // ===== experience level curve =====
    pub const BASE_LEVEL_EXPERIENCE: f64 = 10.0;
    pub const LEVEL_EXPERIENCE_GROWTH: f64 = 1.2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_EXPERIENCE_RATIO: f64 = 0.1;
    pub const DEFAULT_BONUS_MIN_LIFETIME: f64 = 1.0;
    pub const DEFAULT_BONUS_MAX_LIFETIME: f64 = 3.0;
    pub const DEFAULT_SEED: u64 = 0x5EED_C11C;

    pub fn new() -> Self {
        Self {
            experience_ratio: Self::DEFAULT_EXPERIENCE_RATIO,
            bonus_min_lifetime: Self::DEFAULT_BONUS_MIN_LIFETIME,
            bonus_max_lifetime: Self::DEFAULT_BONUS_MAX_LIFETIME,
            seed: Self::DEFAULT_SEED,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::new()
        }
    }
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self::new()
    }
}
