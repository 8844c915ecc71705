use larder_shared::{Conflict, PurchaseItem, PurchaseStatus, clamp_unit};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationResult {
    /// Expected items in their original order, then unmatched observed items
    pub reconciled_items: Vec<PurchaseItem>,
    pub missing_items: Vec<String>,
    pub additional_items: Vec<String>,
    pub conflicts: Vec<Conflict>,
}

/// Align what was planned with what was actually bought.
///
/// Each expected item takes the first observed item with the same name
/// (case-insensitive) and category. A matched observed item leaves the pool, so it
/// can satisfy only one expected item. Unmatched expected items become
/// `not_purchased`; leftover observed items are appended as additional purchases.
/// Confidence is clamped to `[0, 1]` on everything that comes out.
#[tracing::instrument(skip_all, fields(expected = expected.len(), observed = observed.len()))]
pub fn reconcile(expected: &[PurchaseItem], observed: &[PurchaseItem]) -> ReconciliationResult {
    let mut pool: Vec<Option<&PurchaseItem>> = observed.iter().map(Some).collect();
    let mut result = ReconciliationResult::default();

    for item in expected {
        let position = pool
            .iter()
            .position(|slot| matches!(slot, Some(candidate) if candidate.same_product(item)));

        match position.and_then(|index| pool[index].take()) {
            Some(actual) => {
                if let Some(conflict) = detect_conflict(item, actual) {
                    result.conflicts.push(conflict);
                }

                result.reconciled_items.push(PurchaseItem {
                    status: actual.status,
                    confidence: clamp_unit(actual.confidence),
                    expiration_date: actual.expiration_date,
                    image_ref: actual.image_ref.clone(),
                    ..item.clone()
                });
            }
            None => {
                result.missing_items.push(item.name.clone());
                result.reconciled_items.push(PurchaseItem {
                    status: PurchaseStatus::NotPurchased,
                    ..item.clone()
                });
            }
        }
    }

    for extra in pool.into_iter().flatten() {
        result.additional_items.push(extra.name.clone());
        result
            .reconciled_items
            .push(extra.clone().with_confidence(extra.confidence));
    }

    tracing::debug!(
        missing = result.missing_items.len(),
        additional = result.additional_items.len(),
        conflicts = result.conflicts.len(),
        "reconciled purchases"
    );

    result
}

fn detect_conflict(expected: &PurchaseItem, actual: &PurchaseItem) -> Option<Conflict> {
    let quantity_differs = (expected.quantity - actual.quantity).abs() > f64::EPSILON;
    let unit_differs = expected.unit != actual.unit;

    if !quantity_differs && !unit_differs {
        return None;
    }

    Some(Conflict {
        item_name: expected.name.clone(),
        expected_quantity: expected.quantity,
        actual_quantity: actual.quantity,
        expected_unit: expected.unit.clone(),
        actual_unit: actual.unit.clone(),
    })
}
