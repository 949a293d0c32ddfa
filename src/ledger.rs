use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;

use crate::amount::Amount;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("no account for '{0}'")]
    UnknownAccount(String),
    #[error("applying {delta} to {balance} would leave a negative balance")]
    NegativeBalance { balance: Amount, delta: Amount },
    #[error("applying {delta} to {balance} overflows the balance")]
    Overflow { balance: Amount, delta: Amount },
    #[error("start balance must be greater than zero, got {0}")]
    InvalidStartBalance(Amount),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub balance: Amount,
}

/// Per-account balances, persisted as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(skip)]
    start_balance: Amount,
    #[serde(default)]
    accounts: HashMap<String, Account>,
}

impl Ledger {
    pub fn new(start_balance: Amount) -> Self {
        Ledger {
            start_balance,
            accounts: HashMap::new(),
        }
    }

    pub async fn load(path: impl AsRef<Path>, start_balance: Amount) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let content = fs::read_to_string(path).await?;
            let mut ledger: Ledger = serde_json::from_str(&content)?;
            ledger.start_balance = start_balance;
            info!("loaded {} account(s) from {}", ledger.accounts.len(), path.display());
            Ok(ledger)
        } else {
            Ok(Ledger::new(start_balance))
        }
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    pub fn start_balance(&self) -> Amount {
        self.start_balance
    }

    /// Only accounts opened afterwards get the new value.
    pub fn set_start_balance(&mut self, amount: Amount) -> Result<(), LedgerError> {
        if amount <= Amount::ZERO {
            return Err(LedgerError::InvalidStartBalance(amount));
        }
        self.start_balance = amount;
        Ok(())
    }

    /// Opens the account with the start balance if it does not exist yet.
    pub fn open(&mut self, account: &str) -> Amount {
        let start = self.start_balance;
        self.accounts
            .entry(account.to_string())
            .or_insert_with(|| {
                info!("opened account {} with {}", account, start);
                Account { balance: start }
            })
            .balance
    }

    pub fn balance(&self, account: &str) -> Result<Amount, LedgerError> {
        self.accounts
            .get(account)
            .map(|a| a.balance)
            .ok_or_else(|| LedgerError::UnknownAccount(account.to_string()))
    }

    pub fn apply_delta(&mut self, account: &str, delta: Amount) -> Result<Amount, LedgerError> {
        let entry = self
            .accounts
            .get_mut(account)
            .ok_or_else(|| LedgerError::UnknownAccount(account.to_string()))?;
        let balance = entry
            .balance
            .checked_add(delta)
            .ok_or(LedgerError::Overflow {
                balance: entry.balance,
                delta,
            })?;
        if balance.is_negative() {
            return Err(LedgerError::NegativeBalance {
                balance: entry.balance,
                delta,
            });
        }
        entry.balance = balance;
        Ok(balance)
    }
}
