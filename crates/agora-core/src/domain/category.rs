use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Petition category - fixed enumeration, stored as its SCREAMING_SNAKE_CASE name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Politics,
    Investigation,
    Finance,
    Education,
    Diplomacy,
    Administration,
    Culture,
    Healthcare,
    Welfare,
    HumanRights,
    Others,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Politics,
        Category::Investigation,
        Category::Finance,
        Category::Education,
        Category::Diplomacy,
        Category::Administration,
        Category::Culture,
        Category::Healthcare,
        Category::Welfare,
        Category::HumanRights,
        Category::Others,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Politics => "POLITICS",
            Category::Investigation => "INVESTIGATION",
            Category::Finance => "FINANCE",
            Category::Education => "EDUCATION",
            Category::Diplomacy => "DIPLOMACY",
            Category::Administration => "ADMINISTRATION",
            Category::Culture => "CULTURE",
            Category::Healthcare => "HEALTHCARE",
            Category::Welfare => "WELFARE",
            Category::HumanRights => "HUMAN_RIGHTS",
            Category::Others => "OTHERS",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse failure carries the offending input for the 400 response body.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Unknown category: {0}")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("EDUCATION".parse::<Category>().unwrap(), Category::Education);
        assert_eq!("human_rights".parse::<Category>().unwrap(), Category::HumanRights);
    }

    #[test]
    fn rejects_unknown_value() {
        assert!("SPORTS".parse::<Category>().is_err());
    }

    #[test]
    fn round_trips_through_display() {
        for c in Category::ALL {
            assert_eq!(c.as_str().parse::<Category>().unwrap(), c);
        }
    }
}
