//! Airport code types.

use std::fmt;

/// Error returned when parsing an invalid IATA airport code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid airport code: {reason}")]
pub struct InvalidAirport {
    reason: &'static str,
}

/// A valid 3-letter IATA airport code.
///
/// IATA codes are always 3 ASCII letters. Input is case-normalized to
/// uppercase at parse time, so any `Airport` value is canonical by
/// construction.
///
/// # Examples
///
/// ```
/// use flight_planner::domain::Airport;
///
/// let ewr = Airport::parse("EWR").unwrap();
/// assert_eq!(ewr.as_str(), "EWR");
///
/// // Lowercase is folded to uppercase
/// assert_eq!(Airport::parse("ord").unwrap().as_str(), "ORD");
///
/// // Wrong length is rejected
/// assert!(Airport::parse("EW").is_err());
/// assert!(Airport::parse("EWRR").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Airport([u8; 3]);

impl Airport {
    /// Parse an IATA code from a string.
    ///
    /// The input must be exactly 3 ASCII letters; case is normalized
    /// to uppercase.
    pub fn parse(s: &str) -> Result<Self, InvalidAirport> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidAirport {
                reason: "must be exactly 3 characters",
            });
        }

        let mut code = [0u8; 3];
        for (i, &b) in bytes.iter().enumerate() {
            if !b.is_ascii_alphabetic() {
                return Err(InvalidAirport {
                    reason: "must be ASCII letters A-Z",
                });
            }
            code[i] = b.to_ascii_uppercase();
        }

        Ok(Airport(code))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Safe: we only store valid ASCII uppercase letters
        std::str::from_utf8(&self.0).unwrap()
    }
}

impl fmt::Debug for Airport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Airport({})", self.as_str())
    }
}

impl fmt::Display for Airport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
