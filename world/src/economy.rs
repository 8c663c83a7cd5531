//! Gold, lives, and score bookkeeping for a single match.

/// Treasury and survival counters for the match in progress.
///
/// Every mutation saturates, so gold and score never wrap and lives never go
/// below zero. A spend commits only when the treasury covers it, which keeps
/// rejected purchases free of side effects.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Ledger {
    gold: u32,
    lives: u32,
    score: u64,
}

impl Ledger {
    pub(crate) const fn new(gold: u32, lives: u32) -> Self {
        Self {
            gold,
            lives,
            score: 0,
        }
    }

    pub(crate) const fn gold(&self) -> u32 {
        self.gold
    }

    pub(crate) const fn lives(&self) -> u32 {
        self.lives
    }

    pub(crate) const fn score(&self) -> u64 {
        self.score
    }

    /// Debits `cost` if the treasury covers it, reporting whether it did.
    pub(crate) fn try_spend(&mut self, cost: u32) -> bool {
        match self.gold.checked_sub(cost) {
            Some(remaining) => {
                self.gold = remaining;
                true
            }
            None => false,
        }
    }

    /// Credits gold earned from kills, wave bonuses, and sales.
    pub(crate) fn credit(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Adds points to the running score.
    pub(crate) fn award(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Deducts lives for escaped enemies, reporting whether none remain.
    pub(crate) fn lose_lives(&mut self, count: u32) -> bool {
        self.lives = self.lives.saturating_sub(count);
        self.lives == 0
    }
}

#[cfg(test)]
mod tests {
    use super::Ledger;

    #[test]
    fn spend_commits_only_when_covered() {
        let mut ledger = Ledger::new(100, 20);

        assert!(ledger.try_spend(60));
        assert_eq!(ledger.gold(), 40);

        assert!(!ledger.try_spend(41));
        assert_eq!(ledger.gold(), 40);

        assert!(ledger.try_spend(40));
        assert_eq!(ledger.gold(), 0);
    }

    #[test]
    fn lives_floor_at_zero_and_report_depletion() {
        let mut ledger = Ledger::new(0, 3);

        assert!(!ledger.lose_lives(2));
        assert_eq!(ledger.lives(), 1);

        assert!(ledger.lose_lives(5));
        assert_eq!(ledger.lives(), 0);
    }

    #[test]
    fn credit_and_score_saturate() {
        let mut ledger = Ledger::new(u32::MAX - 1, 1);
        ledger.credit(10);
        assert_eq!(ledger.gold(), u32::MAX);

        ledger.award(u64::MAX);
        ledger.award(100);
        assert_eq!(ledger.score(), u64::MAX);
    }
}
