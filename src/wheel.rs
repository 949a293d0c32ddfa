use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// One slot on the American wheel.
///
/// The derived ordering follows wheel position: `0`, `00`, then `1..=36`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pocket {
    Zero,
    DoubleZero,
    Number(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
    Green,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{0}' is not a pocket on the wheel")]
pub struct UnknownPocket(pub String);

pub const POCKET_COUNT: usize = 38;

const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

/// The fixed pocket sequence.
pub const WHEEL: [Pocket; POCKET_COUNT] = build_wheel();

const fn build_wheel() -> [Pocket; POCKET_COUNT] {
    let mut pockets = [Pocket::Zero; POCKET_COUNT];
    pockets[1] = Pocket::DoubleZero;
    let mut n = 1;
    while n <= 36 {
        pockets[n as usize + 1] = Pocket::Number(n);
        n += 1;
    }
    pockets
}

impl Pocket {
    pub fn number(self) -> Option<u8> {
        match self {
            Pocket::Number(n) => Some(n),
            Pocket::Zero | Pocket::DoubleZero => None,
        }
    }

    pub fn wheel_index(self) -> usize {
        match self {
            Pocket::Zero => 0,
            Pocket::DoubleZero => 1,
            Pocket::Number(n) => n as usize + 1,
        }
    }

    pub fn color(self) -> Color {
        match self {
            Pocket::Zero | Pocket::DoubleZero => Color::Green,
            Pocket::Number(n) if RED_NUMBERS.contains(&n) => Color::Red,
            Pocket::Number(_) => Color::Black,
        }
    }

    pub fn is_even(self) -> bool {
        self.number().is_some_and(|n| n % 2 == 0)
    }

    pub fn is_odd(self) -> bool {
        self.number().is_some_and(|n| n % 2 == 1)
    }
}

pub fn color_of(pocket: Pocket) -> Color {
    pocket.color()
}

pub fn is_valid_pocket(label: &str) -> bool {
    label.parse::<Pocket>().is_ok()
}

impl FromStr for Pocket {
    type Err = UnknownPocket;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(Pocket::Zero),
            "00" => Ok(Pocket::DoubleZero),
            // Only canonical labels: "07" or "+7" are not on the wheel
            label if !label.starts_with('0') && label.bytes().all(|b| b.is_ascii_digit()) => {
                match label.parse::<u8>() {
                    Ok(n @ 1..=36) => Ok(Pocket::Number(n)),
                    _ => Err(UnknownPocket(s.to_string())),
                }
            }
            _ => Err(UnknownPocket(s.to_string())),
        }
    }
}

impl fmt::Display for Pocket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pocket::Zero => write!(f, "0"),
            Pocket::DoubleZero => write!(f, "00"),
            Pocket::Number(n) => write!(f, "{}", n),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Black => write!(f, "black"),
            Color::Green => write!(f, "green"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_has_38_distinct_pockets_in_order() {
        assert_eq!(WHEEL[0], Pocket::Zero);
        assert_eq!(WHEEL[1], Pocket::DoubleZero);
        assert_eq!(WHEEL[37], Pocket::Number(36));
        for (i, pocket) in WHEEL.iter().enumerate() {
            assert_eq!(pocket.wheel_index(), i);
        }
        assert!(WHEEL.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn every_pocket_has_exactly_one_color() {
        let green: Vec<_> = WHEEL.iter().filter(|p| p.color() == Color::Green).collect();
        assert_eq!(green, vec![&Pocket::Zero, &Pocket::DoubleZero]);

        let red = WHEEL.iter().filter(|p| color_of(**p) == Color::Red).count();
        let black = WHEEL.iter().filter(|p| color_of(**p) == Color::Black).count();
        assert_eq!(red, 18);
        assert_eq!(black, 18);
        assert_eq!(red + black + green.len(), POCKET_COUNT);
    }

    #[test]
    fn known_colors() {
        assert_eq!(Pocket::Number(1).color(), Color::Red);
        assert_eq!(Pocket::Number(2).color(), Color::Black);
        assert_eq!(Pocket::Number(11).color(), Color::Black);
        assert_eq!(Pocket::Number(12).color(), Color::Red);
        assert_eq!(Pocket::Number(36).color(), Color::Red);
    }

    #[test]
    fn parses_canonical_labels_only() {
        assert_eq!("0".parse(), Ok(Pocket::Zero));
        assert_eq!(" 00 ".parse(), Ok(Pocket::DoubleZero));
        assert_eq!("17".parse(), Ok(Pocket::Number(17)));
        for bad in ["37", "000", "07", "-1", "", "red", "+7", "1.0"] {
            assert!(!is_valid_pocket(bad), "{bad:?} should be rejected");
        }
        for pocket in WHEEL {
            assert_eq!(pocket.to_string().parse(), Ok(pocket));
        }
    }

    #[test]
    fn green_pockets_have_no_parity() {
        assert!(!Pocket::Zero.is_even() && !Pocket::Zero.is_odd());
        assert!(!Pocket::DoubleZero.is_even() && !Pocket::DoubleZero.is_odd());
        assert!(Pocket::Number(2).is_even());
        assert!(Pocket::Number(35).is_odd());
    }
}
