//! Named quick views over common graph shapes.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown preset: {0}. Choose: processes, teams, pain-solutions, all")]
pub struct UnknownPreset(pub String);

/// A canned combination of entity and relationship type filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Teams and the processes they perform.
    Processes,
    /// Company and team hierarchy.
    Teams,
    /// Pain points and the opportunities that address them.
    PainSolutions,
    /// No filtering.
    All,
}

impl Preset {
    pub fn entity_types(&self) -> &'static [&'static str] {
        match self {
            Self::Processes => &["Process", "Team"],
            Self::Teams => &["Company", "Team"],
            Self::PainSolutions => &["PainPoint", "Opportunity"],
            Self::All => &[],
        }
    }

    pub fn relationship_types(&self) -> &'static [&'static str] {
        match self {
            Self::Processes => &["PERFORMS_PROCESS"],
            Self::Teams => &["HAS_TEAM"],
            Self::PainSolutions => &["ADDRESSES"],
            Self::All => &[],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processes => "processes",
            Self::Teams => "teams",
            Self::PainSolutions => "pain-solutions",
            Self::All => "all",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "processes" => Ok(Self::Processes),
            "teams" => Ok(Self::Teams),
            "pain-solutions" => Ok(Self::PainSolutions),
            "all" => Ok(Self::All),
            _ => Err(UnknownPreset(s.to_string())),
        }
    }
}
