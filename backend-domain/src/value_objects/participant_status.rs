// Participant status value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::InvalidValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantStatus {
    Invited,
    #[default]
    Confirmed,
    Maybe,
    Declined,
}

impl ParticipantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantStatus::Invited => "INVITED",
            ParticipantStatus::Confirmed => "CONFIRMED",
            ParticipantStatus::Maybe => "MAYBE",
            ParticipantStatus::Declined => "DECLINED",
        }
    }
}

impl fmt::Display for ParticipantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParticipantStatus {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "INVITED" => Ok(ParticipantStatus::Invited),
            "CONFIRMED" => Ok(ParticipantStatus::Confirmed),
            "MAYBE" => Ok(ParticipantStatus::Maybe),
            "DECLINED" => Ok(ParticipantStatus::Declined),
            _ => Err(InvalidValue::new("status", s)),
        }
    }
}
