//! Static definitions of the ten wager kinds.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::amount::Amount;
use crate::validator::ValidationError;
use crate::wheel::{Color, Pocket, WHEEL};

/// Stakes accepted at this table.
pub const ALLOWED_STAKES: [Amount; 6] = [
    Amount::from_cents(50),
    Amount::from_units(1),
    Amount::from_units(2),
    Amount::from_units(5),
    Amount::from_units(10),
    Amount::from_units(25),
];

pub const MIN_INSIDE_STAKE: Amount = Amount::from_cents(50);
pub const MIN_OUTSIDE_STAKE: Amount = Amount::from_units(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BetKind {
    Straight,
    Split,
    Street,
    Corner,
    SixLine,
    RedBlack,
    EvenOdd,
    Low18High18,
    Dozen,
    Column,
}

impl BetKind {
    pub const ALL: [BetKind; 10] = [
        BetKind::Straight,
        BetKind::Split,
        BetKind::Street,
        BetKind::Corner,
        BetKind::SixLine,
        BetKind::RedBlack,
        BetKind::EvenOdd,
        BetKind::Low18High18,
        BetKind::Dozen,
        BetKind::Column,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BetKind::Straight => "Straight",
            BetKind::Split => "Split",
            BetKind::Street => "Street",
            BetKind::Corner => "Corner",
            BetKind::SixLine => "Six Line",
            BetKind::RedBlack => "Red/Black",
            BetKind::EvenOdd => "Even/Odd",
            BetKind::Low18High18 => "1-18/19-36",
            BetKind::Dozen => "Dozen",
            BetKind::Column => "Column",
        }
    }

    /// Winnings per unit staked.
    pub fn payout_ratio(self) -> u32 {
        match self {
            BetKind::Straight => 35,
            BetKind::Split => 17,
            BetKind::Street => 11,
            BetKind::Corner => 8,
            BetKind::SixLine => 5,
            BetKind::Dozen | BetKind::Column => 2,
            BetKind::RedBlack | BetKind::EvenOdd | BetKind::Low18High18 => 1,
        }
    }

    pub fn is_inside(self) -> bool {
        self.selection_size().is_some()
    }

    /// Exact pocket count for inside kinds; `None` for outside kinds.
    pub fn selection_size(self) -> Option<usize> {
        match self {
            BetKind::Straight => Some(1),
            BetKind::Split => Some(2),
            BetKind::Street => Some(3),
            BetKind::Corner => Some(4),
            BetKind::SixLine => Some(6),
            _ => None,
        }
    }

    pub fn min_stake(self) -> Amount {
        if self.is_inside() {
            MIN_INSIDE_STAKE
        } else {
            MIN_OUTSIDE_STAKE
        }
    }

    /// Named choices for outside kinds, empty for inside kinds.
    pub fn choices(self) -> &'static [&'static str] {
        match self {
            BetKind::RedBlack => &["red", "black"],
            BetKind::EvenOdd => &["even", "odd"],
            BetKind::Low18High18 => &["1-18", "19-36"],
            BetKind::Dozen => &["1-12", "13-24", "25-36"],
            BetKind::Column => &["1", "2", "3"],
            _ => &[],
        }
    }

    /// Resolves a named choice into the pocket group it covers.
    pub fn covered_pockets(self, choice: &str) -> Result<BTreeSet<Pocket>, ValidationError> {
        let choice = choice.trim().to_ascii_lowercase();
        let covers: fn(u8) -> bool = match (self, choice.as_str()) {
            (BetKind::RedBlack, "red") => |n| Pocket::Number(n).color() == Color::Red,
            (BetKind::RedBlack, "black") => |n| Pocket::Number(n).color() == Color::Black,
            (BetKind::EvenOdd, "even") => |n| n % 2 == 0,
            (BetKind::EvenOdd, "odd") => |n| n % 2 == 1,
            (BetKind::Low18High18, "1-18") => |n| n <= 18,
            (BetKind::Low18High18, "19-36") => |n| n >= 19,
            (BetKind::Dozen, "1-12") => |n| n <= 12,
            (BetKind::Dozen, "13-24") => |n| (13..=24).contains(&n),
            (BetKind::Dozen, "25-36") => |n| n >= 25,
            (BetKind::Column, "1") => |n| n % 3 == 1,
            (BetKind::Column, "2") => |n| n % 3 == 2,
            (BetKind::Column, "3") => |n| n % 3 == 0,
            _ => {
                return Err(ValidationError::InvalidSelection(format!(
                    "'{}' is not a choice for {}",
                    choice,
                    self.name()
                )))
            }
        };

        Ok(WHEEL
            .iter()
            .copied()
            .filter(|pocket| pocket.number().is_some_and(covers))
            .collect())
    }
}

impl fmt::Display for BetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown bet kind '{0}'")]
pub struct UnknownBetKind(pub String);

impl FromStr for BetKind {
    type Err = UnknownBetKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        let kind = match key.as_str() {
            "straight" => BetKind::Straight,
            "split" => BetKind::Split,
            "street" => BetKind::Street,
            "corner" => BetKind::Corner,
            "sixline" => BetKind::SixLine,
            "redblack" | "color" | "colour" => BetKind::RedBlack,
            "evenodd" | "parity" => BetKind::EvenOdd,
            "lowhigh" | "low18high18" | "1181936" => BetKind::Low18High18,
            "dozen" => BetKind::Dozen,
            "column" => BetKind::Column,
            _ => return Err(UnknownBetKind(s.to_string())),
        };
        Ok(kind)
    }
}

/// Payout overview shown to players.
pub fn payout_table() -> String {
    let mut out = String::new();
    for (heading, inside) in [("Inside bets", true), ("Outside bets", false)] {
        let min = if inside { MIN_INSIDE_STAKE } else { MIN_OUTSIDE_STAKE };
        out.push_str(&format!("{} (min {}):\n", heading, min));
        for kind in BetKind::ALL.iter().filter(|k| k.is_inside() == inside) {
            let detail = match kind.selection_size() {
                Some(1) => "one pocket, 0 and 00 included".to_string(),
                Some(n) => format!("{} pockets", n),
                None => kind.choices().join(" / "),
            };
            out.push_str(&format!(
                "- {} ({}): pays {}:1\n",
                kind.name(),
                detail,
                kind.payout_ratio()
            ));
        }
        out.push('\n');
    }
    let stakes: Vec<String> = ALLOWED_STAKES.iter().map(|s| s.to_string()).collect();
    out.push_str(&format!("Allowed stakes: {}\n", stakes.join(", ")));
    out.push_str("American roulette: the wheel has both 0 and 00.");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(set: &BTreeSet<Pocket>) -> Vec<u8> {
        set.iter().filter_map(|p| p.number()).collect()
    }

    #[test]
    fn inside_and_outside_classification() {
        let inside: Vec<_> = BetKind::ALL.iter().filter(|k| k.is_inside()).collect();
        assert_eq!(inside.len(), 5);
        assert_eq!(BetKind::SixLine.selection_size(), Some(6));
        assert_eq!(BetKind::Dozen.selection_size(), None);
        assert_eq!(BetKind::Straight.min_stake(), Amount::from_cents(50));
        assert_eq!(BetKind::Column.min_stake(), Amount::from_units(5));
        for kind in BetKind::ALL {
            assert_eq!(kind.is_inside(), kind.choices().is_empty());
        }
    }

    #[test]
    fn named_groups_have_expected_members() {
        let red = BetKind::RedBlack.covered_pockets("red").unwrap();
        let black = BetKind::RedBlack.covered_pockets("Black").unwrap();
        assert_eq!(red.len(), 18);
        assert_eq!(black.len(), 18);
        assert!(red.is_disjoint(&black));

        let even = BetKind::EvenOdd.covered_pockets("even").unwrap();
        assert_eq!(numbers(&even), (2..=36).step_by(2).collect::<Vec<_>>());
        let odd = BetKind::EvenOdd.covered_pockets(" odd ").unwrap();
        assert_eq!(numbers(&odd), (1..=35).step_by(2).collect::<Vec<_>>());

        let high = BetKind::Low18High18.covered_pockets("19-36").unwrap();
        assert_eq!(numbers(&high), (19..=36).collect::<Vec<_>>());

        let middle = BetKind::Dozen.covered_pockets("13-24").unwrap();
        assert_eq!(numbers(&middle), (13..=24).collect::<Vec<_>>());

        let second = BetKind::Column.covered_pockets("2").unwrap();
        assert_eq!(numbers(&second), (2..=35).step_by(3).collect::<Vec<_>>());
        let third = BetKind::Column.covered_pockets("3").unwrap();
        assert_eq!(numbers(&third), (3..=36).step_by(3).collect::<Vec<_>>());
    }

    #[test]
    fn every_listed_choice_resolves_and_excludes_green() {
        for kind in BetKind::ALL.iter().filter(|k| !k.is_inside()) {
            for choice in kind.choices() {
                let pockets = kind.covered_pockets(choice).unwrap();
                assert!(!pockets.is_empty());
                assert!(!pockets.contains(&Pocket::Zero));
                assert!(!pockets.contains(&Pocket::DoubleZero));
            }
        }
    }

    #[test]
    fn unknown_choice_is_invalid_selection() {
        for (kind, choice) in [
            (BetKind::RedBlack, "green"),
            (BetKind::Dozen, "1-18"),
            (BetKind::Column, "4"),
            (BetKind::Straight, "red"),
        ] {
            assert!(matches!(
                kind.covered_pockets(choice),
                Err(ValidationError::InvalidSelection(_))
            ));
        }
    }

    #[test]
    fn parses_kind_names() {
        assert_eq!("six-line".parse(), Ok(BetKind::SixLine));
        assert_eq!("Red/Black".parse(), Ok(BetKind::RedBlack));
        assert_eq!("even_odd".parse(), Ok(BetKind::EvenOdd));
        assert_eq!("low-high".parse(), Ok(BetKind::Low18High18));
        for kind in BetKind::ALL {
            assert_eq!(kind.name().parse(), Ok(kind));
        }
        assert!("roulette".parse::<BetKind>().is_err());
    }

    #[test]
    fn payout_table_lists_every_kind() {
        let table = payout_table();
        for kind in BetKind::ALL {
            assert!(table.contains(&format!("{}:1", kind.payout_ratio())));
            assert!(table.contains(kind.name()));
        }
    }
}
