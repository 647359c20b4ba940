use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SpotType {
    Compact,
    Standard,
    Large,
    Handicap,
    #[serde(rename = "EV")]
    Ev,
    Bike,
}

impl SpotType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpotType::Compact => "Compact",
            SpotType::Standard => "Standard",
            SpotType::Large => "Large",
            SpotType::Handicap => "Handicap",
            SpotType::Ev => "EV",
            SpotType::Bike => "Bike",
        }
    }
}

impl TryFrom<&str> for SpotType {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Compact" => Ok(SpotType::Compact),
            "Standard" => Ok(SpotType::Standard),
            "Large" => Ok(SpotType::Large),
            "Handicap" => Ok(SpotType::Handicap),
            "EV" => Ok(SpotType::Ev),
            "Bike" => Ok(SpotType::Bike),
            other => Err(format!("unknown spot type: {other}")),
        }
    }
}

impl Display for SpotType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
