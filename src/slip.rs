use thiserror::Error;

use crate::amount::Amount;
use crate::validator::Wager;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlipError {
    #[error("insufficient balance: {stake} more on top of {staked} already staked exceeds {balance}")]
    InsufficientFunds {
        stake: Amount,
        staked: Amount,
        balance: Amount,
    },
}

/// Wagers a player has placed for the next spin.
#[derive(Debug, Default, Clone)]
pub struct BetSlip {
    wagers: Vec<Wager>,
}

impl BetSlip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a wager if the balance still covers every stake on the slip.
    ///
    /// Stakes already on the slip count against the balance, not just the
    /// new stake against the full balance. A settled slip therefore never
    /// leaves the balance negative.
    pub fn add(&mut self, wager: Wager, balance: Amount) -> Result<(), SlipError> {
        let staked = self.total_stake();
        if staked + wager.amount() > balance {
            return Err(SlipError::InsufficientFunds {
                stake: wager.amount(),
                staked,
                balance,
            });
        }
        self.wagers.push(wager);
        Ok(())
    }

    pub fn total_stake(&self) -> Amount {
        self.wagers.iter().map(Wager::amount).sum()
    }

    pub fn wagers(&self) -> &[Wager] {
        &self.wagers
    }

    pub fn len(&self) -> usize {
        self.wagers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wagers.is_empty()
    }

    pub fn clear(&mut self) {
        self.wagers.clear();
    }

    pub fn into_wagers(self) -> Vec<Wager> {
        self.wagers
    }
}
