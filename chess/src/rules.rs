//! Rule variations supported by the engine

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Which squares must be safe for the king to castle
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CastlingSafety {
    /// Only the destination of the king is checked, like for any other move
    #[default]
    DestinationOnly,
    /// The king must not be in check, and the square it passes over must not be attacked
    Strict,
}

#[derive(Debug, Clone, Error, Eq, PartialEq)]
#[error("unknown castling safety {0:?}")]
pub struct CastlingSafetyParseError(String);

impl CastlingSafety {
    pub fn as_str(&self) -> &'static str {
        match *self {
            CastlingSafety::DestinationOnly => "destination",
            CastlingSafety::Strict => "strict",
        }
    }
}

impl fmt::Display for CastlingSafety {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CastlingSafety {
    type Err = CastlingSafetyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "destination" => Ok(CastlingSafety::DestinationOnly),
            "strict" => Ok(CastlingSafety::Strict),
            _ => Err(CastlingSafetyParseError(s.to_string())),
        }
    }
}

/// Rule set used to compute legal moves
///
/// The default rules only check the castling king's destination. Use [`Rules::strict()`] to get the
/// castling rules of regular chess.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rules {
    pub castling: CastlingSafety,
}

impl Rules {
    pub const fn strict() -> Rules {
        Rules {
            castling: CastlingSafety::Strict,
        }
    }
}
