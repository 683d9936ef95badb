use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of an authenticated account.
///
/// Assigned by storage. Travels as the decimal `sub` claim of a session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(pub i64);

impl AccountId {
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for AccountId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for AccountId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let id: AccountId = "42".parse().unwrap();
        assert_eq!(id, AccountId(42));
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert!("abc".parse::<AccountId>().is_err());
        assert!("".parse::<AccountId>().is_err());
    }
}
