use std::collections::BTreeSet;
use std::fmt;

use log::debug;
use thiserror::Error;

use crate::amount::Amount;
use crate::catalog::{BetKind, ALLOWED_STAKES};
use crate::wheel::Pocket;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("stake {amount} is not allowed for {kind} (allowed: 0.50/1/2/5/10/25, minimum {min})")]
    AmountNotAllowed {
        kind: BetKind,
        amount: Amount,
        min: Amount,
    },
    #[error("invalid selection: {0}")]
    InvalidSelection(String),
}

/// Raw player input for the pockets a wager covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Explicit pocket labels, for inside kinds.
    Pockets(Vec<String>),
    /// A named group such as `"red"` or `"13-24"`, for outside kinds.
    Choice(String),
}

impl Selection {
    /// Interprets free text the way the given kind expects it.
    pub fn parse(kind: BetKind, raw: &str) -> Self {
        if kind.is_inside() {
            Selection::Pockets(
                raw.split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(String::from)
                    .collect(),
            )
        } else {
            Selection::Choice(raw.trim().to_string())
        }
    }
}

/// An accepted wager. Only [`validate`] constructs one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wager {
    kind: BetKind,
    amount: Amount,
    covered: BTreeSet<Pocket>,
    choice: Option<String>,
}

impl Wager {
    pub fn kind(&self) -> BetKind {
        self.kind
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn covered_pockets(&self) -> &BTreeSet<Pocket> {
        &self.covered
    }

    pub fn covers(&self, pocket: Pocket) -> bool {
        self.covered.contains(&pocket)
    }

    pub fn payout_ratio(&self) -> u32 {
        self.kind.payout_ratio()
    }

    pub fn is_inside(&self) -> bool {
        self.kind.is_inside()
    }

    /// The named choice for outside wagers.
    pub fn choice(&self) -> Option<&str> {
        self.choice.as_deref()
    }

    /// What the wager is on: the named choice, or the covered pockets.
    pub fn target(&self) -> String {
        match &self.choice {
            Some(choice) => choice.clone(),
            None => self
                .covered
                .iter()
                .map(Pocket::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

impl fmt::Display for Wager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) {}", self.kind, self.target(), self.amount)
    }
}

pub fn validate(kind: BetKind, amount: Amount, selection: &Selection) -> Result<Wager, ValidationError> {
    let result = check(kind, amount, selection);
    if let Err(err) = &result {
        debug!("rejected {} wager of {}: {}", kind, amount, err);
    }
    result
}

fn check(kind: BetKind, amount: Amount, selection: &Selection) -> Result<Wager, ValidationError> {
    let min = kind.min_stake();
    if !ALLOWED_STAKES.contains(&amount) || amount < min {
        return Err(ValidationError::AmountNotAllowed { kind, amount, min });
    }

    match (kind.selection_size(), selection) {
        (Some(size), Selection::Pockets(labels)) => {
            if labels.len() != size {
                return Err(ValidationError::InvalidSelection(format!(
                    "{} needs exactly {} pocket(s), got {}",
                    kind,
                    size,
                    labels.len()
                )));
            }
            let mut covered = BTreeSet::new();
            for label in labels {
                let pocket: Pocket = label
                    .parse()
                    .map_err(|err| ValidationError::InvalidSelection(format!("{}", err)))?;
                if !covered.insert(pocket) {
                    return Err(ValidationError::InvalidSelection(format!(
                        "pocket {} is listed twice",
                        pocket
                    )));
                }
            }
            Ok(Wager {
                kind,
                amount,
                covered,
                choice: None,
            })
        }
        (None, Selection::Choice(choice)) => {
            let covered = kind.covered_pockets(choice)?;
            Ok(Wager {
                kind,
                amount,
                covered,
                choice: Some(choice.trim().to_ascii_lowercase()),
            })
        }
        (Some(_), Selection::Choice(choice)) => Err(ValidationError::InvalidSelection(format!(
            "{} takes pocket numbers, not '{}'",
            kind, choice
        ))),
        (None, Selection::Pockets(_)) => Err(ValidationError::InvalidSelection(format!(
            "{} takes one of: {}",
            kind,
            kind.choices().join(", ")
        ))),
    }
}
