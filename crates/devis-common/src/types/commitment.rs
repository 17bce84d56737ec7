//! Commitment duration
//!
//! On the wire a commitment is either the string `"comptant"` or one of the
//! month counts `24`, `36`, `48` (as a number or a numeric string).

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::InputError;

/// Contract duration chosen by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Commitment {
    /// Upfront payment, nothing engaged
    #[default]
    Comptant,
    /// 24-month engagement
    Months24,
    /// 36-month engagement
    Months36,
    /// 48-month engagement
    Months48,
}

impl Commitment {
    /// All commitments, shortest first
    pub const ALL: [Commitment; 4] = [
        Commitment::Comptant,
        Commitment::Months24,
        Commitment::Months36,
        Commitment::Months48,
    ];

    /// Engaged months (0 for comptant)
    pub fn months(self) -> u32 {
        match self {
            Commitment::Comptant => 0,
            Commitment::Months24 => 24,
            Commitment::Months36 => 36,
            Commitment::Months48 => 48,
        }
    }

    /// Whether the client commits to a fixed duration
    pub fn is_engaged(self) -> bool {
        self.months() > 0
    }

    /// Build from a month count; `0` means comptant
    pub fn from_months(months: u64) -> Result<Self, InputError> {
        match months {
            0 => Ok(Commitment::Comptant),
            24 => Ok(Commitment::Months24),
            36 => Ok(Commitment::Months36),
            48 => Ok(Commitment::Months48),
            other => Err(InputError::UnsupportedCommitment(other.to_string())),
        }
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Commitment::Comptant => f.write_str("comptant"),
            other => write!(f, "{}", other.months()),
        }
    }
}

impl FromStr for Commitment {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("comptant") {
            return Ok(Commitment::Comptant);
        }
        trimmed
            .parse::<u64>()
            .map_err(|_| InputError::UnsupportedCommitment(trimmed.to_string()))
            .and_then(Commitment::from_months)
    }
}

impl Serialize for Commitment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Commitment::Comptant => serializer.serialize_str("comptant"),
            other => serializer.serialize_u32(other.months()),
        }
    }
}

impl<'de> Deserialize<'de> for Commitment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CommitmentVisitor;

        impl<'de> Visitor<'de> for CommitmentVisitor {
            type Value = Commitment;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("\"comptant\" or one of 24, 36, 48")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Commitment, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Commitment, E> {
                Commitment::from_months(v).map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Commitment, E> {
                u64::try_from(v)
                    .map_err(|_| E::custom(InputError::UnsupportedCommitment(v.to_string())))
                    .and_then(|m| Commitment::from_months(m).map_err(E::custom))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Commitment, E> {
                if v.fract() == 0.0 && v >= 0.0 {
                    Commitment::from_months(v as u64).map_err(E::custom)
                } else {
                    Err(E::custom(InputError::UnsupportedCommitment(v.to_string())))
                }
            }
        }

        deserializer.deserialize_any(CommitmentVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_months() {
        let months: Vec<u32> = Commitment::ALL.iter().map(|c| c.months()).collect();
        assert_eq!(months, vec![0, 24, 36, 48]);
        assert!(!Commitment::Comptant.is_engaged());
        assert!(Commitment::Months36.is_engaged());
    }

    #[test]
    fn test_parse() {
        assert_eq!("comptant".parse::<Commitment>().unwrap(), Commitment::Comptant);
        assert_eq!(" Comptant ".parse::<Commitment>().unwrap(), Commitment::Comptant);
        assert_eq!("48".parse::<Commitment>().unwrap(), Commitment::Months48);
        assert!("12".parse::<Commitment>().is_err());
        assert!("forever".parse::<Commitment>().is_err());
    }

    #[test]
    fn test_json_shape() {
        assert_eq!(serde_json::to_string(&Commitment::Comptant).unwrap(), "\"comptant\"");
        assert_eq!(serde_json::to_string(&Commitment::Months24).unwrap(), "24");

        let from_number: Commitment = serde_json::from_str("36").unwrap();
        assert_eq!(from_number, Commitment::Months36);
        let from_string: Commitment = serde_json::from_str("\"24\"").unwrap();
        assert_eq!(from_string, Commitment::Months24);
        assert!(serde_json::from_str::<Commitment>("12").is_err());
        assert!(serde_json::from_str::<Commitment>("-24").is_err());
    }
}
