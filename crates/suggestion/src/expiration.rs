use larder_shared::InventoryItem;

/// Weight of an item that expires today or tomorrow
pub const CRITICAL_WEIGHT: f64 = 2.0;
pub const HIGH_WEIGHT: f64 = 1.5;
pub const MEDIUM_WEIGHT: f64 = 1.2;
pub const NORMAL_WEIGHT: f64 = 1.0;
pub const EXPIRED_WEIGHT: f64 = 0.0;

/// ExpirationWeightCalculator turns days-until-expiry into an urgency weight.
///
/// Rules, first match wins:
/// - expired => 0.0
/// - days > threshold => 1.0
/// - days <= 1 => 2.0
/// - days <= 3 => 1.5
/// - days <= 7 => 1.2
/// - otherwise => 1.0
///
/// Items without an expiry are treated as non-perishable (1.0). A negative counter
/// counts as expired even when `is_expired` was not set.
pub struct ExpirationWeightCalculator;

impl ExpirationWeightCalculator {
    pub fn weight(item: &InventoryItem, threshold_days: i64) -> f64 {
        if item.is_spoiled() {
            return EXPIRED_WEIGHT;
        }

        let Some(days) = item.days_until_expiry else {
            return NORMAL_WEIGHT;
        };

        match days {
            d if d > threshold_days => NORMAL_WEIGHT,
            d if d <= 1 => CRITICAL_WEIGHT,
            d if d <= 3 => HIGH_WEIGHT,
            d if d <= 7 => MEDIUM_WEIGHT,
            _ => NORMAL_WEIGHT,
        }
    }

    /// Whether a weight falls inside an "expiring soon" band
    pub fn is_urgent(weight: f64) -> bool {
        weight > NORMAL_WEIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use larder_shared::Category;

    fn expiring_in(days: i64) -> InventoryItem {
        InventoryItem::new("Spinach", Category::Produce, 1.0, "bag").with_days_until_expiry(days)
    }

    #[test]
    fn test_weight_bands_with_default_threshold() {
        let cases = vec![
            (0, 2.0),
            (1, 2.0),
            (2, 1.5),
            (3, 1.5),
            (4, 1.2),
            (7, 1.2),
            (8, 1.0),
            (365, 1.0),
        ];

        for (days, expected) in cases {
            assert_eq!(
                ExpirationWeightCalculator::weight(&expiring_in(days), 7),
                expected,
                "days = {}",
                days
            );
        }
    }

    #[test]
    fn test_threshold_short_circuits_bands() {
        assert_eq!(ExpirationWeightCalculator::weight(&expiring_in(3), 2), 1.0);
        assert_eq!(ExpirationWeightCalculator::weight(&expiring_in(2), 2), 1.5);
        assert_eq!(ExpirationWeightCalculator::weight(&expiring_in(1), 0), 1.0);
    }

    #[test]
    fn test_threshold_above_seven_keeps_normal_weight() {
        assert_eq!(ExpirationWeightCalculator::weight(&expiring_in(10), 14), 1.0);
    }

    #[test]
    fn test_expired_items_weigh_nothing() {
        let flagged = expiring_in(1).expired();
        assert_eq!(ExpirationWeightCalculator::weight(&flagged, 7), 0.0);

        let negative = expiring_in(-3);
        assert_eq!(ExpirationWeightCalculator::weight(&negative, 7), 0.0);
    }

    #[test]
    fn test_non_perishable_is_not_urgent() {
        let rice = InventoryItem::new("Rice", Category::Pantry, 1.0, "kg");
        let weight = ExpirationWeightCalculator::weight(&rice, 7);

        assert_eq!(weight, 1.0);
        assert!(!ExpirationWeightCalculator::is_urgent(weight));
    }
}
