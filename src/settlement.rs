use std::fmt;

use crate::amount::Amount;
use crate::validator::Wager;
use crate::wheel::Pocket;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementOutcome {
    pub wager: Wager,
    pub won: bool,
    /// Net change: `amount * ratio` on a win, `-amount` on a loss.
    pub delta: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub result: Pocket,
    pub total_delta: Amount,
    /// Same order as the wagers passed to [`settle`].
    pub outcomes: Vec<SettlementOutcome>,
}

/// Resolves a batch of wagers against one spin result.
///
/// The stake is not returned on top of the winnings: a winning straight of
/// 1.00 yields a delta of +35.00.
pub fn settle(wagers: Vec<Wager>, result: Pocket) -> Settlement {
    let outcomes: Vec<SettlementOutcome> = wagers
        .into_iter()
        .map(|wager| {
            let won = wager.covers(result);
            let delta = if won {
                wager.amount() * wager.payout_ratio()
            } else {
                -wager.amount()
            };
            SettlementOutcome { wager, won, delta }
        })
        .collect();

    Settlement {
        result,
        total_delta: outcomes.iter().map(|o| o.delta).sum(),
        outcomes,
    }
}

impl Settlement {
    pub fn wins(&self) -> usize {
        self.outcomes.iter().filter(|o| o.won).count()
    }
}

impl fmt::Display for SettlementOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.won { "Win" } else { "Loss" };
        let sign = if self.delta.is_negative() { "" } else { "+" };
        write!(
            f,
            "{}: {} ({}) {}{}",
            label,
            self.wager.kind(),
            self.wager.target(),
            sign,
            self.delta
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BetKind;
    use crate::validator::{validate, Selection};

    fn wager(kind: BetKind, units: i64, raw: &str) -> Wager {
        validate(kind, Amount::from_units(units), &Selection::parse(kind, raw)).unwrap()
    }

    #[test]
    fn straight_hit_pays_35() {
        let settlement = settle(vec![wager(BetKind::Straight, 1, "17")], Pocket::Number(17));
        assert_eq!(settlement.total_delta, Amount::from_units(35));
        assert!(settlement.outcomes[0].won);
        assert_eq!(settlement.outcomes[0].to_string(), "Win: Straight (17) +35.00");
    }

    #[test]
    fn green_loses_every_even_money_bet() {
        for (kind, choice) in [
            (BetKind::RedBlack, "red"),
            (BetKind::RedBlack, "black"),
            (BetKind::EvenOdd, "even"),
            (BetKind::EvenOdd, "odd"),
            (BetKind::Low18High18, "1-18"),
            (BetKind::Low18High18, "19-36"),
        ] {
            for result in [Pocket::Zero, Pocket::DoubleZero] {
                let settlement = settle(vec![wager(kind, 5, choice)], result);
                assert_eq!(settlement.total_delta, Amount::from_units(-5));
                assert!(!settlement.outcomes[0].won);
            }
        }
    }

    #[test]
    fn mixed_batch_keeps_order_and_sums() {
        let wagers = vec![
            wager(BetKind::RedBlack, 5, "red"),
            wager(BetKind::Split, 1, "14,15"),
            wager(BetKind::Dozen, 10, "13-24"),
            wager(BetKind::Column, 5, "1"),
        ];
        let expected_order = wagers.clone();
        // 14 is red, in the second dozen and in column 2
        let settlement = settle(wagers, Pocket::Number(14));

        let deltas: Vec<i64> = settlement.outcomes.iter().map(|o| o.delta.cents()).collect();
        assert_eq!(deltas, vec![500, 1700, 2000, -500]);
        assert_eq!(settlement.total_delta, Amount::from_units(37));
        assert_eq!(settlement.wins(), 3);
        let order: Vec<Wager> = settlement.outcomes.into_iter().map(|o| o.wager).collect();
        assert_eq!(order, expected_order);
    }

    #[test]
    fn half_unit_stakes_stay_exact() {
        let wagers = vec![
            validate(BetKind::Straight, Amount::from_cents(50), &Selection::parse(BetKind::Straight, "00")).unwrap(),
            validate(BetKind::SixLine, Amount::from_cents(50), &Selection::parse(BetKind::SixLine, "1,2,3,4,5,6")).unwrap(),
        ];
        let settlement = settle(wagers, Pocket::DoubleZero);
        assert_eq!(settlement.total_delta, Amount::from_cents(1750 - 50));
    }

    #[test]
    fn empty_batch_settles_to_zero() {
        let settlement = settle(Vec::new(), Pocket::Zero);
        assert_eq!(settlement.total_delta, Amount::ZERO);
        assert!(settlement.outcomes.is_empty());
    }

    #[test]
    fn loss_summary_shows_named_choice() {
        let settlement = settle(vec![wager(BetKind::RedBlack, 5, "red")], Pocket::DoubleZero);
        assert_eq!(settlement.outcomes[0].to_string(), "Loss: Red/Black (red) -5.00");
    }
}
