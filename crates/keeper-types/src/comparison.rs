use serde::Serialize;
use strum::{EnumCount, EnumIter, EnumString, FromRepr, IntoStaticStr};

/// Relational operator of an `IF` condition.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    EnumIter,
    EnumCount,
    EnumString,
    FromRepr,
    IntoStaticStr,
)]
#[repr(u8)]
pub enum Comparison {
    #[strum(serialize = "==")]
    Equal = 1,
    #[strum(serialize = "!=")]
    NotEqual = 2,
    #[strum(serialize = "<")]
    Less = 3,
    #[strum(serialize = ">")]
    Greater = 4,
    #[strum(serialize = "<=")]
    LessEqual = 5,
    #[strum(serialize = ">=")]
    GreaterEqual = 6,
}

impl Comparison {
    pub fn apply(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Self::Equal => lhs == rhs,
            Self::NotEqual => lhs != rhs,
            Self::Less => lhs < rhs,
            Self::Greater => lhs > rhs,
            Self::LessEqual => lhs <= rhs,
            Self::GreaterEqual => lhs >= rhs,
        }
    }

    pub fn symbol(self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn parse_symbols() {
        assert_eq!(Comparison::from_str(">="), Ok(Comparison::GreaterEqual));
        assert_eq!(Comparison::from_str("!="), Ok(Comparison::NotEqual));
        assert!(Comparison::from_str("=").is_err());
        assert!(Comparison::from_str("=>").is_err());
    }

    #[test]
    fn apply() {
        assert!(Comparison::Equal.apply(3, 3));
        assert!(!Comparison::NotEqual.apply(3, 3));
        assert!(Comparison::Less.apply(-1, 0));
        assert!(!Comparison::Greater.apply(0, 0));
        assert!(Comparison::LessEqual.apply(0, 0));
        assert!(Comparison::GreaterEqual.apply(1000, 1000));
    }

    #[test]
    fn symbols_round_trip() {
        for cmp in Comparison::iter() {
            assert_eq!(Comparison::from_str(cmp.symbol()), Ok(cmp));
        }
    }
}
