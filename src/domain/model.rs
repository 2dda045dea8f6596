use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Marketplace channel. Parsing is exact and case-sensitive; anything that is
/// not one of the known literals is kept verbatim as `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Platform {
    Zillow,
    Facebook,
    Ebay,
    Craigslist,
    OfferUp,
    Custom(String),
}

impl Platform {
    pub fn as_str(&self) -> &str {
        match self {
            Platform::Zillow => "Zillow",
            Platform::Facebook => "Facebook",
            Platform::Ebay => "eBay",
            Platform::Craigslist => "Craigslist",
            Platform::OfferUp => "OfferUp",
            Platform::Custom(name) => name,
        }
    }

    pub fn other() -> Self {
        Platform::Custom("Other".to_string())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "Zillow" => Platform::Zillow,
            "Facebook" => Platform::Facebook,
            "eBay" => Platform::Ebay,
            "Craigslist" => Platform::Craigslist,
            "OfferUp" => Platform::OfferUp,
            other => Platform::Custom(other.to_string()),
        })
    }
}

impl From<&str> for Platform {
    fn from(value: &str) -> Self {
        match value.parse() {
            Ok(platform) => platform,
            Err(never) => match never {},
        }
    }
}

impl From<String> for Platform {
    fn from(value: String) -> Self {
        Platform::from(value.as_str())
    }
}

impl From<Platform> for String {
    fn from(value: Platform) -> Self {
        value.as_str().to_string()
    }
}

/// Item-type tag. Only selects message pools, never pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    RealEstate,
    Cars,
    Electronics,
    Furniture,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::RealEstate,
        Category::Cars,
        Category::Electronics,
        Category::Furniture,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::RealEstate => "real-estate",
            Category::Cars => "cars",
            Category::Electronics => "electronics",
            Category::Furniture => "furniture",
        }
    }

    /// Unknown tags return `None`, which callers treat as the default pool.
    pub fn parse(tag: &str) -> Option<Self> {
        Category::ALL.into_iter().find(|c| c.as_str() == tag)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discount aggressiveness chosen from platform and price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountTier {
    HighValueCautious,
    LowValueAggressive,
    Standard,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferRequest {
    pub price: f64,
    pub platform: Platform,
    /// 與訊息請求對稱而保留；定價時不讀取
    pub category: Option<String>,
}

/// Intermediate values of a single counter-offer calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OfferBreakdown {
    pub tier: DiscountTier,
    pub discount: f64,
    pub reduced: f64,
    pub offer: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRequest {
    pub item_title: String,
    pub original_price: f64,
    pub offer_price: f64,
    pub platform: Platform,
    pub notes: Option<String>,
    pub category: Option<String>,
}

/// Listing details as collected by a form or the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingInput {
    pub title: String,
    pub price: f64,
    pub platform: Platform,
    pub category: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NegotiationDraft {
    pub title: String,
    pub original_price: f64,
    pub offer: f64,
    pub savings: f64,
    pub discount_percent: f64,
    pub tier: DiscountTier,
    pub platform: Platform,
    pub category: Option<String>,
    pub message: String,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_parsing_is_case_sensitive() {
        assert_eq!(Platform::from("eBay"), Platform::Ebay);
        assert_eq!(Platform::from("ebay"), Platform::Custom("ebay".to_string()));
        assert_eq!(
            Platform::from("Facebook Marketplace"),
            Platform::Custom("Facebook Marketplace".to_string())
        );
        assert_eq!(Platform::from("Other").as_str(), "Other");
    }

    #[test]
    fn test_platform_serializes_as_literal() {
        let json = serde_json::to_string(&Platform::Ebay).unwrap();
        assert_eq!(json, "\"eBay\"");
        let back: Platform = serde_json::from_str("\"Zillow\"").unwrap();
        assert_eq!(back, Platform::Zillow);
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(Category::parse("real-estate"), Some(Category::RealEstate));
        assert_eq!(Category::parse("cars"), Some(Category::Cars));
        assert_eq!(Category::parse("Cars"), None);
        assert_eq!(Category::parse("boats"), None);
    }
}
