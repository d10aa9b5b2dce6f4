//! Product records and the fixed category set.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Room category a product is merchandised under.
///
/// Parsing is case-insensitive and also accepts the kebab form used on the
/// command line (`living-room`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Category {
    #[serde(rename = "Living Room")]
    #[strum(to_string = "Living Room", serialize = "living-room")]
    LivingRoom,
    Bedroom,
    Dining,
    Office,
    Lighting,
}

/// An immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Unit price. Never negative.
    pub price: f64,
    pub category: Category,
    pub description: String,
    /// Image URI.
    pub image: String,
    /// Informational star rating.
    pub rating: f32,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        category: Category,
        description: impl Into<String>,
        image: impl Into<String>,
        rating: f32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            category,
            description: description.into(),
            image: image.into(),
            rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_category_labels() {
        assert_eq!(Category::LivingRoom.to_string(), "Living Room");
        assert_eq!(Category::Office.to_string(), "Office");
        assert_eq!(Category::iter().count(), 5);
    }

    #[test]
    fn test_category_parse_accepts_label_and_kebab() {
        assert_eq!(Category::from_str("Living Room").unwrap(), Category::LivingRoom);
        assert_eq!(Category::from_str("living-room").unwrap(), Category::LivingRoom);
        assert_eq!(Category::from_str("bedroom").unwrap(), Category::Bedroom);
        assert!(Category::from_str("Garage").is_err());
    }

    #[test]
    fn test_category_serde_uses_label() {
        let json = serde_json::to_string(&Category::LivingRoom).unwrap();
        assert_eq!(json, "\"Living Room\"");
        let parsed: Category = serde_json::from_str("\"Lighting\"").unwrap();
        assert_eq!(parsed, Category::Lighting);
    }
}
