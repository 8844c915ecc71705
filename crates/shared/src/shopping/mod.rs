use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use uuid::Uuid;

use crate::clamp_unit;
use crate::inventory::Category;

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PurchaseSource {
    Scanned,
    Manual,
    GroceryList,
}

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
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PurchaseStatus {
    #[default]
    Pending,
    Confirmed,
    Modified,
    NotPurchased,
}

impl PurchaseStatus {
    /// Confirmed as bought, with or without changes.
    pub fn is_purchased(&self) -> bool {
        matches!(self, PurchaseStatus::Confirmed | PurchaseStatus::Modified)
    }
}

/// Entry of the household grocery list, owned by the grocery-list collaborator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryItem {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseItem {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    #[serde(default)]
    pub category: Category,
    pub confidence: f64,
    pub source: PurchaseSource,
    #[serde(default)]
    pub status: PurchaseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grocery_list_item_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

impl PurchaseItem {
    /// Seed an expected purchase from a grocery-list entry.
    pub fn from_grocery_item(item: &GroceryItem) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: item.name.clone(),
            quantity: item.quantity,
            unit: item.unit.clone(),
            category: item.category,
            confidence: 1.0,
            source: PurchaseSource::GroceryList,
            status: PurchaseStatus::Pending,
            grocery_list_item_id: Some(item.id.clone()),
            expiration_date: None,
            image_ref: None,
        }
    }

    /// Item typed in by the user.
    pub fn manual(
        name: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            quantity,
            unit: unit.into(),
            category,
            confidence: 1.0,
            source: PurchaseSource::Manual,
            status: PurchaseStatus::Confirmed,
            grocery_list_item_id: None,
            expiration_date: None,
            image_ref: None,
        }
    }

    /// Item produced by product recognition on a receipt or shelf photo.
    pub fn scanned(
        name: impl Into<String>,
        category: Category,
        unit: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            quantity: 1.0,
            unit: unit.into(),
            category,
            confidence: clamp_unit(confidence),
            source: PurchaseSource::Scanned,
            status: PurchaseStatus::Confirmed,
            grocery_list_item_id: None,
            expiration_date: None,
            image_ref: None,
        }
    }

    /// Confidence is kept within `[0, 1]`.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = clamp_unit(confidence);
        self
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_expiration_date(mut self, date: NaiveDate) -> Self {
        self.expiration_date = Some(date);
        self
    }

    pub fn with_image_ref(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    /// Case-insensitive name and exact category equality.
    pub fn same_product(&self, other: &PurchaseItem) -> bool {
        self.category == other.category && self.name.to_lowercase() == other.name.to_lowercase()
    }
}

/// Quantity or unit disagreement between what was planned and what was bought.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub item_name: String,
    pub expected_quantity: f64,
    pub actual_quantity: f64,
    pub expected_unit: String,
    pub actual_unit: String,
}
