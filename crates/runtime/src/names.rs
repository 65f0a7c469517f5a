//! Display names for bot environments.

use economy_core::PcgRng;

const ADJECTIVES: [&str; 15] = [
    "Cosmic", "Nano", "Giga", "Fast", "Idle", "Quantum", "Hyper", "Solar", "Lunar", "Atomic",
    "Rapid", "Endless", "Sonic", "Mega", "Micro",
];

const NOUNS: [&str; 15] = [
    "Clicker", "Traveler", "Walker", "Runner", "Explorer", "Pilot", "Rover", "Surfer", "Drifter",
    "Pioneer", "Voyager", "Sprinter", "Nomad", "Seeker", "Racer",
];

/// Produces names like `QuantumRover417` from a seeded stream.
#[derive(Clone, Debug)]
pub struct BotNameGenerator {
    rng: PcgRng,
}

impl BotNameGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: PcgRng::new(seed),
        }
    }

    pub fn next_name(&mut self) -> String {
        let adjective = ADJECTIVES[self.rng.range(0, ADJECTIVES.len() as u32) as usize];
        let noun = NOUNS[self.rng.range(0, NOUNS.len() as u32) as usize];
        let number = self.rng.range(10, 1000);
        format!("{adjective}{noun}{number}")
    }
}
