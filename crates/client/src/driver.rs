//! Stand-in policy that keeps headless environments busy.
//!
//! Each turn it clicks, grabs any bonus orb, buys the cheapest affordable
//! upgrade and moves forward when the next target is unlocked.

use economy_core::{CostCurrency, Environment};

pub fn play_turn(environment: &mut Environment) {
    let _ = environment.click();
    let _ = environment.claim_bonus();

    if let Some(id) = cheapest_affordable(environment) {
        match environment.purchase(&id) {
            Ok(receipt) => tracing::trace!(
                "{} bought {} level {}",
                environment.name(),
                receipt.upgrade,
                receipt.new_level
            ),
            Err(e) => tracing::debug!("{} could not buy {}: {}", environment.name(), id, e),
        }
    }

    let _ = environment.advance_next();
}

fn cheapest_affordable(environment: &Environment) -> Option<String> {
    environment
        .catalog()
        .upgrades()
        .filter_map(|upgrade| {
            let (currency, cost) = environment.check_purchase(upgrade.id.as_str()).ok()?;
            (currency == CostCurrency::Currency).then_some((cost, upgrade.id.as_str()))
        })
        .min_by(|a, b| a.0.cmp(&b.0))
        .map(|(_, id)| id.to_string())
}
