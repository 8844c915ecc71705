use chrono::NaiveDate;
use larder_shared::{
    Conflict, GroceryItem, InventoryItem, PurchaseItem, PurchaseSource, PurchaseStatus, clamp_unit,
};
use serde::{Deserialize, Serialize};

use crate::error::PurchaseError;
use crate::reconcile::{ReconciliationResult, reconcile};

/// Weight of not-purchased items against the efficiency score
const NOT_PURCHASED_PENALTY: f64 = 0.5;

/// Reconciliation state of one shopping trip.
///
/// Counters and `efficiency` are recomputed after every change. Once `completed`,
/// every mutation fails with [`PurchaseError::SummaryCompleted`]. Callers must
/// serialize writes to a given summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseSummary {
    pub items: Vec<PurchaseItem>,
    pub conflicts: Vec<Conflict>,
    pub total_items: usize,
    pub confirmed_items: usize,
    pub not_purchased_items: usize,
    pub additional_items: usize,
    pub efficiency: f64,
    pub completed: bool,
}

impl Default for PurchaseSummary {
    fn default() -> Self {
        Self::from_items(Vec::new())
    }
}

impl PurchaseSummary {
    /// Start a trip with every grocery-list entry pending.
    pub fn from_grocery_list(groceries: &[GroceryItem]) -> Self {
        Self::from_items(
            groceries
                .iter()
                .map(PurchaseItem::from_grocery_item)
                .collect(),
        )
    }

    pub fn from_items(items: Vec<PurchaseItem>) -> Self {
        let mut summary = Self {
            items,
            conflicts: Vec::new(),
            total_items: 0,
            confirmed_items: 0,
            not_purchased_items: 0,
            additional_items: 0,
            efficiency: 1.0,
            completed: false,
        };
        summary.recalculate();
        summary
    }

    pub fn item(&self, id: &str) -> Option<&PurchaseItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Record a scanned or manual purchase without reconciling it yet.
    pub fn add_observed(&mut self, item: PurchaseItem) -> Result<(), PurchaseError> {
        self.ensure_open()?;
        let confidence = item.confidence;
        self.items.push(item.with_confidence(confidence));
        self.recalculate();
        Ok(())
    }

    /// Reconcile still-open grocery items against `observed` plus any extras
    /// already recorded on this trip.
    ///
    /// Grocery items already confirmed or modified are left untouched.
    pub fn reconcile_with(
        &mut self,
        observed: &[PurchaseItem],
    ) -> Result<ReconciliationResult, PurchaseError> {
        self.ensure_open()?;

        let (grocery, extras): (Vec<PurchaseItem>, Vec<PurchaseItem>) = self
            .items
            .drain(..)
            .partition(|item| item.source == PurchaseSource::GroceryList);

        let open: Vec<PurchaseItem> = grocery
            .iter()
            .filter(|item| !item.status.is_purchased())
            .cloned()
            .collect();

        let mut pool = extras;
        pool.extend_from_slice(observed);

        let result = reconcile(&open, &pool);

        let mut reconciled = result.reconciled_items.iter();
        for item in grocery {
            if item.status.is_purchased() {
                self.items.push(item);
            } else if let Some(merged) = reconciled.next() {
                self.items.push(merged.clone());
            }
        }
        self.items.extend(reconciled.cloned());

        self.conflicts.extend(result.conflicts.iter().cloned());
        self.recalculate();

        tracing::info!(
            confirmed = self.confirmed_items,
            not_purchased = self.not_purchased_items,
            additional = self.additional_items,
            efficiency = self.efficiency,
            "purchase summary reconciled"
        );

        Ok(result)
    }

    pub fn confirm_item(&mut self, id: &str) -> Result<(), PurchaseError> {
        self.transition(id, |item| item.status = PurchaseStatus::Confirmed)
    }

    pub fn mark_not_purchased(&mut self, id: &str) -> Result<(), PurchaseError> {
        self.transition(id, |item| item.status = PurchaseStatus::NotPurchased)
    }

    /// Bought, but not as planned.
    pub fn modify_item(
        &mut self,
        id: &str,
        quantity: f64,
        unit: impl Into<String>,
    ) -> Result<(), PurchaseError> {
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(PurchaseError::InvalidQuantity(quantity));
        }

        let unit = unit.into();
        self.transition(id, |item| {
            item.quantity = quantity;
            item.unit = unit;
            item.status = PurchaseStatus::Modified;
        })
    }

    /// Mark shopping as done. Terminal.
    pub fn complete(&mut self) -> Result<(), PurchaseError> {
        self.ensure_open()?;
        self.completed = true;

        tracing::info!(
            total = self.total_items,
            efficiency = self.efficiency,
            "shopping trip completed"
        );

        Ok(())
    }

    /// Items actually bought, as inventory entries with expiry derived against `today`.
    pub fn purchased_inventory(&self, today: NaiveDate) -> Vec<InventoryItem> {
        self.items
            .iter()
            .filter(|item| item.status.is_purchased())
            .map(|item| {
                let stock =
                    InventoryItem::new(item.name.clone(), item.category, item.quantity, &item.unit);
                match item.expiration_date {
                    Some(date) => stock.with_expiration_date(date, today),
                    None => stock,
                }
            })
            .collect()
    }

    fn transition(
        &mut self,
        id: &str,
        apply: impl FnOnce(&mut PurchaseItem),
    ) -> Result<(), PurchaseError> {
        self.ensure_open()?;

        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| PurchaseError::ItemNotFound(id.to_string()))?;

        apply(item);
        self.recalculate();
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), PurchaseError> {
        if self.completed {
            return Err(PurchaseError::SummaryCompleted);
        }

        Ok(())
    }

    fn recalculate(&mut self) {
        self.total_items = self.items.len();
        self.confirmed_items = self
            .items
            .iter()
            .filter(|item| item.status.is_purchased())
            .count();
        self.not_purchased_items = self
            .items
            .iter()
            .filter(|item| item.status == PurchaseStatus::NotPurchased)
            .count();
        self.additional_items = self
            .items
            .iter()
            .filter(|item| item.source != PurchaseSource::GroceryList)
            .count();

        self.efficiency = if self.total_items == 0 {
            1.0
        } else {
            let total = self.total_items as f64;
            let confirmed_ratio = self.confirmed_items as f64 / total;
            let not_purchased_ratio = self.not_purchased_items as f64 / total;
            clamp_unit(confirmed_ratio - not_purchased_ratio * NOT_PURCHASED_PENALTY)
        };
    }
}
