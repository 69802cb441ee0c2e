use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Team a UTM link was generated for. Sheet rows written by hand may carry
/// other labels; [`Department::from_cell`] keeps those verbatim. Input
/// payloads go through `FromStr` and only accept the four known teams.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Department {
    #[default]
    Marketing,
    Sales,
    Social,
    Affiliates,
    Other(String),
}

impl Department {
    pub fn as_str(&self) -> &str {
        match self {
            Department::Marketing => "marketing",
            Department::Sales => "sales",
            Department::Social => "social",
            Department::Affiliates => "affiliates",
            Department::Other(label) => label,
        }
    }

    /// Blank cells fall back to marketing.
    pub fn from_cell(cell: &str) -> Self {
        match cell.trim() {
            "" => Department::Marketing,
            other => other.parse().unwrap_or_else(|_| Department::Other(other.to_string())),
        }
    }
}

impl FromStr for Department {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "marketing" => Ok(Department::Marketing),
            "sales" => Ok(Department::Sales),
            "social" => Ok(Department::Social),
            "affiliates" | "affiliate" => Ok(Department::Affiliates),
            other => Err(format!("unknown department '{}'", other)),
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Department {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Department {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
