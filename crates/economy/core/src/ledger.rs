use crate::catalog::CostCurrency;
use crate::number::ExtendedNumber;

/// Balances of one environment. Neither balance ever goes negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Ledger {
    pub currency: ExtendedNumber,
    pub experience: ExtendedNumber,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self, kind: CostCurrency) -> ExtendedNumber {
        match kind {
            CostCurrency::Currency => self.currency,
            CostCurrency::Experience => self.experience,
        }
    }

    pub fn can_afford(&self, kind: CostCurrency, amount: ExtendedNumber) -> bool {
        self.balance(kind) >= amount
    }

    /// Adds to a balance; negative amounts are ignored.
    pub fn credit(&mut self, kind: CostCurrency, amount: ExtendedNumber) {
        let amount = amount.non_negative();
        match kind {
            CostCurrency::Currency => self.currency += amount,
            CostCurrency::Experience => self.experience += amount,
        }
    }

    /// Subtracts from a balance, clamping at zero.
    pub fn debit(&mut self, kind: CostCurrency, amount: ExtendedNumber) {
        match kind {
            CostCurrency::Currency => self.currency = self.currency.saturating_sub(amount),
            CostCurrency::Experience => self.experience = self.experience.saturating_sub(amount),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debit_clamps_at_zero() {
        let mut ledger = Ledger::new();
        ledger.credit(CostCurrency::Currency, ExtendedNumber::from(5.0));
        ledger.debit(CostCurrency::Currency, ExtendedNumber::from(8.0));
        assert_eq!(ledger.currency, ExtendedNumber::ZERO);
    }

    #[test]
    fn balances_are_independent() {
        let mut ledger = Ledger::new();
        ledger.credit(CostCurrency::Experience, ExtendedNumber::from(3.0));
        assert!(ledger.can_afford(CostCurrency::Experience, ExtendedNumber::from(3.0)));
        assert!(!ledger.can_afford(CostCurrency::Currency, ExtendedNumber::from(3.0)));
    }
}
