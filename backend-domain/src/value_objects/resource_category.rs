// Resource category value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::InvalidValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceCategory {
    Food,
    Drink,
    Utensil,
    Decoration,
    Other,
}

impl ResourceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceCategory::Food => "FOOD",
            ResourceCategory::Drink => "DRINK",
            ResourceCategory::Utensil => "UTENSIL",
            ResourceCategory::Decoration => "DECORATION",
            ResourceCategory::Other => "OTHER",
        }
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceCategory {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FOOD" => Ok(ResourceCategory::Food),
            "DRINK" => Ok(ResourceCategory::Drink),
            "UTENSIL" => Ok(ResourceCategory::Utensil),
            "DECORATION" => Ok(ResourceCategory::Decoration),
            "OTHER" => Ok(ResourceCategory::Other),
            _ => Err(InvalidValue::new("category", s)),
        }
    }
}
