use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Fresh fruits, vegetables and herbs
    Produce,
    /// Milk, cheese, yogurt, butter, eggs
    Dairy,
    Meat,
    Seafood,
    Bakery,
    /// Dry goods: pasta, rice, flour, canned food
    Pantry,
    Frozen,
    Beverages,
    Condiments,
    Spices,
    #[default]
    Other,
    /// Anything upstream sent that we do not recognise
    #[serde(other)]
    Unknown,
}

impl Category {
    /// Category equality used by ingredient matching.
    ///
    /// `Unknown` never matches anything, itself included.
    pub fn matches(&self, other: &Category) -> bool {
        self == other && *self != Category::Unknown
    }
}

/// A snapshot of one item on the household shelf.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub name: String,
    #[serde(default)]
    pub category: Category,
    pub quantity: f64,
    pub unit: String,
    #[serde(default)]
    pub is_expired: bool,
    /// `None` for non-perishables
    #[serde(default)]
    pub days_until_expiry: Option<i64>,
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
}

impl InventoryItem {
    pub fn new(
        name: impl Into<String>,
        category: Category,
        quantity: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            quantity,
            unit: unit.into(),
            is_expired: false,
            days_until_expiry: None,
            expiration_date: None,
        }
    }

    /// Set the expiry counters from a calendar date, relative to `today`.
    pub fn with_expiration_date(mut self, date: NaiveDate, today: NaiveDate) -> Self {
        let days = (date - today).num_days();

        self.expiration_date = Some(date);
        self.days_until_expiry = Some(days);
        self.is_expired = days < 0;
        self
    }

    pub fn with_days_until_expiry(mut self, days: i64) -> Self {
        self.days_until_expiry = Some(days);
        self.is_expired = days < 0;
        self
    }

    pub fn expired(mut self) -> Self {
        self.is_expired = true;
        self
    }

    /// Expired either explicitly or because the counter already went negative.
    pub fn is_spoiled(&self) -> bool {
        self.is_expired || self.days_until_expiry.is_some_and(|days| days < 0)
    }
}
