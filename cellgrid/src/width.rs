//! Column width tokens.

use std::fmt;
use std::str::FromStr;

use crate::error::TableError;

/// Column width specification, rendered as a grid sizing token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Width {
    /// Absolute width in pixels.
    Px(u16),
    /// Percentage of the table width.
    Percent(u16),
    /// Width in characters.
    Ch(u16),
    /// Width relative to the root font size.
    Rem(u16),
    /// Flexible width with weight.
    Fr(u16),
}

impl Default for Width {
    fn default() -> Self {
        Width::Fr(1)
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Width::Px(v) => write!(f, "{v}px"),
            Width::Percent(v) => write!(f, "{v}%"),
            Width::Ch(v) => write!(f, "{v}ch"),
            Width::Rem(v) => write!(f, "{v}rem"),
            Width::Fr(v) => write!(f, "{v}fr"),
        }
    }
}

impl FromStr for Width {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let invalid = || TableError::InvalidWidth {
            token: s.to_string(),
        };

        let split = token
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(invalid)?;
        let (digits, unit) = token.split_at(split);
        let value: u16 = digits.parse().map_err(|_| invalid())?;

        match unit {
            "px" => Ok(Width::Px(value)),
            "%" => Ok(Width::Percent(value)),
            "ch" => Ok(Width::Ch(value)),
            "rem" => Ok(Width::Rem(value)),
            "fr" => Ok(Width::Fr(value)),
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_unit() {
        assert_eq!("120px".parse::<Width>(), Ok(Width::Px(120)));
        assert_eq!("25%".parse::<Width>(), Ok(Width::Percent(25)));
        assert_eq!("12ch".parse::<Width>(), Ok(Width::Ch(12)));
        assert_eq!("3rem".parse::<Width>(), Ok(Width::Rem(3)));
        assert_eq!(" 2fr ".parse::<Width>(), Ok(Width::Fr(2)));
    }

    #[test]
    fn rejects_malformed_tokens() {
        for token in ["", "px", "12", "12em", "-3px", "1.5rem"] {
            assert!(
                matches!(token.parse::<Width>(), Err(TableError::InvalidWidth { .. })),
                "{token:?} should not parse"
            );
        }
    }

    #[test]
    fn display_matches_parse() {
        assert_eq!(Width::Percent(50).to_string(), "50%");
        assert_eq!(Width::default().to_string(), "1fr");
    }
}
