use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::location::Coordinate;

pub type PointId = u64;

/// Kind of venue a Wi-Fi point is installed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum Category {
    Health,
    Education,
    Retail,
    Recreation,
    Transport,
    GovernmentServices,
    Fuel,
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Health,
        Category::Education,
        Category::Retail,
        Category::Recreation,
        Category::Transport,
        Category::GovernmentServices,
        Category::Fuel,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Health => "health",
            Category::Education => "education",
            Category::Retail => "retail",
            Category::Recreation => "recreation",
            Category::Transport => "transport",
            Category::GovernmentServices => "government-services",
            Category::Fuel => "fuel",
            Category::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Health => "Health",
            Category::Education => "Education",
            Category::Retail => "Retail",
            Category::Recreation => "Recreation",
            Category::Transport => "Transport",
            Category::GovernmentServices => "Public services",
            Category::Fuel => "Fuel",
            Category::Other => "Other",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Category::Health => "🏥",
            Category::Education => "🎓",
            Category::Retail => "🛍️",
            Category::Recreation => "🌳",
            Category::Transport => "🚌",
            Category::GovernmentServices => "🏢",
            Category::Fuel => "⛽",
            Category::Other => "📍",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category: {0:?}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == tag)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

// Catalog files may carry tags this build does not know; those land in `Other`
impl From<String> for Category {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(Category::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A public Wi-Fi point from the static catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: PointId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub coordinates: Coordinate,
    pub category: Category,
    #[serde(default)]
    pub description: String,
}

impl Point {
    pub fn new(id: PointId, name: impl Into<String>, coordinates: Coordinate, category: Category) -> Self {
        Self {
            id,
            name: name.into(),
            address: None,
            coordinates,
            category,
            description: String::new(),
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
