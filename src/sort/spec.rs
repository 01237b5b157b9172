use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => anyhow::bail!("Invalid sort direction: {value}. Use: asc, desc"),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The active ordering of a table: a field key and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }

    pub fn ascending(key: impl Into<String>) -> Self {
        Self::new(key, SortDirection::Asc)
    }

    pub fn descending(key: impl Into<String>) -> Self {
        Self::new(key, SortDirection::Desc)
    }

    /// The ordering after the user asks to sort by `key`: the active key flips
    /// direction, any other key starts ascending.
    pub fn toggle(&self, key: &str) -> Self {
        if normalize_key(&self.key) == normalize_key(key) {
            Self::new(self.key.clone(), self.direction.flipped())
        } else {
            Self::ascending(key)
        }
    }
}

/// Canonical form of a field key: lowercase, without `_` or `-`, so
/// `totalValue`, `total_value` and `total-value` name the same field.
pub fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_active_key_flips_direction() {
        let spec = SortSpec::ascending("totalValue");
        let flipped = spec.toggle("totalValue");
        assert_eq!(flipped.direction, SortDirection::Desc);
        assert_eq!(flipped.toggle("totalValue").direction, SortDirection::Asc);
    }

    #[test]
    fn toggling_new_key_resets_to_ascending() {
        let spec = SortSpec::descending("totalValue");
        let next = spec.toggle("name");
        assert_eq!(next, SortSpec::ascending("name"));
    }

    #[test]
    fn key_spellings_are_equivalent() {
        let spec = SortSpec::ascending("total_value");
        assert_eq!(spec.toggle("totalValue").direction, SortDirection::Desc);
        assert_eq!(normalize_key("Dividend-Yield_Percent"), "dividendyieldpercent");
    }

    #[test]
    fn direction_parses_from_cli_strings() {
        assert_eq!("DESC".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert!("sideways".parse::<SortDirection>().is_err());
    }
}
