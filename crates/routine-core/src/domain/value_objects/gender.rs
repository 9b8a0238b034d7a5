//! Employee gender value object.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Gender of an employee.
///
/// Stored as its integer discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Gender {
    /// Male.
    Male = 1,
    /// Female.
    Female = 2,
}

impl Gender {
    /// Returns the stored integer code.
    #[must_use]
    pub const fn code(self) -> i64 {
        self as i64
    }

    /// Resolves a stored integer code.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Male),
            2 => Some(Self::Female),
            _ => None,
        }
    }

    /// Returns the display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("male") {
            Ok(Self::Male)
        } else if s.eq_ignore_ascii_case("female") {
            Ok(Self::Female)
        } else {
            Err(format!("Invalid gender: {}", s))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_from_str_is_case_insensitive() {
        assert_eq!("male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!(" FEMALE ".parse::<Gender>().unwrap(), Gender::Female);
        assert!("other".parse::<Gender>().is_err());
    }

    #[test]
    fn test_gender_codes() {
        assert_eq!(Gender::Male.code(), 1);
        assert_eq!(Gender::from_code(2), Some(Gender::Female));
        assert_eq!(Gender::from_code(0), None);
    }

    #[test]
    fn test_gender_display() {
        assert_eq!(Gender::Female.to_string(), "Female");
    }
}
