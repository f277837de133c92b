// Event type value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::InvalidValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Party,
    Birthday,
    Diner,
    Snack,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Party => "PARTY",
            EventType::Birthday => "BIRTHDAY",
            EventType::Diner => "DINER",
            EventType::Snack => "SNACK",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PARTY" => Ok(EventType::Party),
            "BIRTHDAY" => Ok(EventType::Birthday),
            "DINER" => Ok(EventType::Diner),
            "SNACK" => Ok(EventType::Snack),
            _ => Err(InvalidValue::new("type", s)),
        }
    }
}
