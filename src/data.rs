use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Category name that lists every item, sub-grouped by each item's own category.
pub const ALL_CATEGORY: &str = "All";

/// Suffix appended to every rendered price.
pub const CURRENCY_SUFFIX: &str = "ج";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuData {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub items: HashMap<String, Vec<MenuItem>>,
}

impl MenuData {
    pub fn items_of(&self, category: &str) -> Option<&[MenuItem]> {
        self.items.get(category).map(Vec::as_slice)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MenuItemRecord", into = "MenuItemRecord")]
pub struct MenuItem {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub price: Price,
}

impl MenuItem {
    pub fn new(name: impl Into<String>, category: impl Into<String>, price: Price) -> Self {
        Self {
            name: name.into(),
            description: None,
            category: category.into(),
            price,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// How an item is priced. A special price always wins over the tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Price {
    Special(String),
    Tiered {
        small: Option<String>,
        medium: Option<String>,
        large: Option<String>,
    },
}

impl Price {
    pub fn none() -> Self {
        Self::Tiered {
            small: None,
            medium: None,
            large: None,
        }
    }

    /// Build the price from the four optional wire fields.
    pub fn from_fields(
        special: Option<String>,
        small: Option<String>,
        medium: Option<String>,
        large: Option<String>,
    ) -> Self {
        match special {
            Some(special) => Self::Special(special),
            None => Self::Tiered {
                small,
                medium,
                large,
            },
        }
    }

    /// Lines of the price block, in display order.
    pub fn lines(&self) -> Vec<PriceLine<'_>> {
        match self {
            Self::Special(amount) => vec![PriceLine { tier: None, amount }],
            Self::Tiered {
                small,
                medium,
                large,
            } => [
                (Tier::Small, small),
                (Tier::Medium, medium),
                (Tier::Large, large),
            ]
            .into_iter()
            .filter_map(|(tier, amount)| {
                amount.as_deref().map(|amount| PriceLine {
                    tier: Some(tier),
                    amount,
                })
            })
            .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceLine<'a> {
    pub tier: Option<Tier>,
    pub amount: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Small,
    Medium,
    Large,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Small, Tier::Medium, Tier::Large];

    /// Label printed next to the price.
    pub fn label(self) -> &'static str {
        match self {
            Tier::Small => "سورى",
            Tier::Medium => "لبنانى",
            Tier::Large => "فينو",
        }
    }

    pub fn english_name(self) -> &'static str {
        match self {
            Tier::Small => "Syrian",
            Tier::Medium => "Lebanese",
            Tier::Large => "Feno",
        }
    }
}

/// A price field as it appears on the wire: either text or a bare number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum PriceValue {
    Text(String),
    Number(serde_json::Number),
}

impl PriceValue {
    // empty text and zero are treated as "no price"
    fn into_label(self) -> Option<String> {
        match self {
            Self::Text(text) if text.is_empty() => None,
            Self::Text(text) => Some(text),
            Self::Number(n) if n.as_f64() == Some(0.0) => None,
            Self::Number(n) => Some(n.to_string()),
        }
    }
}

fn price_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<PriceValue>::deserialize(deserializer)?;
    Ok(value.and_then(PriceValue::into_label))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MenuItemRecord {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default)]
    category: String,
    #[serde(
        default,
        deserialize_with = "price_field",
        skip_serializing_if = "Option::is_none"
    )]
    special: Option<String>,
    #[serde(
        default,
        deserialize_with = "price_field",
        skip_serializing_if = "Option::is_none"
    )]
    small_price: Option<String>,
    #[serde(
        default,
        deserialize_with = "price_field",
        skip_serializing_if = "Option::is_none"
    )]
    medium_price: Option<String>,
    #[serde(
        default,
        deserialize_with = "price_field",
        skip_serializing_if = "Option::is_none"
    )]
    large_price: Option<String>,
}

impl From<MenuItemRecord> for MenuItem {
    fn from(record: MenuItemRecord) -> Self {
        Self {
            name: record.name,
            description: record.description,
            category: record.category,
            price: Price::from_fields(
                record.special,
                record.small_price,
                record.medium_price,
                record.large_price,
            ),
        }
    }
}

impl From<MenuItem> for MenuItemRecord {
    fn from(item: MenuItem) -> Self {
        let (special, small_price, medium_price, large_price) = match item.price {
            Price::Special(special) => (Some(special), None, None, None),
            Price::Tiered {
                small,
                medium,
                large,
            } => (None, small, medium, large),
        };
        Self {
            name: item.name,
            description: item.description,
            category: item.category,
            special,
            small_price,
            medium_price,
            large_price,
        }
    }
}
