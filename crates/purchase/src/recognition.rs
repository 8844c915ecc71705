use chrono::NaiveDate;
use larder_shared::{Category, PurchaseItem};
use serde::{Deserialize, Serialize};

use crate::error::RecognitionError;

/// Unit given to recognised products that did not report one
pub const DEFAULT_SCANNED_UNIT: &str = "pcs";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognizedProduct {
    pub name: String,
    #[serde(default)]
    pub category: Category,
    pub confidence: f64,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedDate {
    pub date: NaiveDate,
    pub confidence: f64,
}

/// Names the products visible on a photo.
pub trait ProductRecognizer {
    fn recognize(&self, image: &[u8]) -> Result<Vec<RecognizedProduct>, RecognitionError>;
}

/// Reads printed best-before dates off a photo.
pub trait DateExtractor {
    fn extract_dates(&self, image: &[u8]) -> Result<Vec<ExtractedDate>, RecognitionError>;
}

/// Build scanned purchase items from one photo's recognition output.
///
/// Products under `min_confidence` are dropped. The most confident date at or above
/// the floor (earliest on ties) becomes every item's expiration date.
pub fn items_from_scan(
    products: &[RecognizedProduct],
    dates: &[ExtractedDate],
    min_confidence: f64,
) -> Vec<PurchaseItem> {
    let best_date = dates
        .iter()
        .filter(|d| d.confidence >= min_confidence)
        .max_by(|a, b| {
            a.confidence
                .total_cmp(&b.confidence)
                .then_with(|| b.date.cmp(&a.date))
        })
        .map(|d| d.date);

    products
        .iter()
        .filter(|p| p.confidence >= min_confidence)
        .map(|p| {
            let item = PurchaseItem::scanned(
                p.name.clone(),
                p.category,
                p.unit.as_deref().unwrap_or(DEFAULT_SCANNED_UNIT),
                p.confidence,
            );
            match best_date {
                Some(date) => item.with_expiration_date(date),
                None => item,
            }
        })
        .collect()
}

/// Runs a recognizer and a date extractor over photos.
pub struct ScanSession<R, D> {
    recognizer: R,
    extractor: D,
    min_confidence: f64,
}

impl<R: ProductRecognizer, D: DateExtractor> ScanSession<R, D> {
    pub fn new(recognizer: R, extractor: D, min_confidence: f64) -> Self {
        Self {
            recognizer,
            extractor,
            min_confidence,
        }
    }

    /// Scan one photo. A failing date extractor only costs the expiration dates.
    pub fn scan(
        &self,
        image: &[u8],
        image_ref: Option<&str>,
    ) -> Result<Vec<PurchaseItem>, RecognitionError> {
        let products = self.recognizer.recognize(image)?;

        let dates = self.extractor.extract_dates(image).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "date extraction failed, continuing without dates");
            Vec::new()
        });

        let items: Vec<PurchaseItem> = items_from_scan(&products, &dates, self.min_confidence)
            .into_iter()
            .map(|item| match image_ref {
                Some(image_ref) => item.with_image_ref(image_ref),
                None => item,
            })
            .collect();

        if items.is_empty() {
            tracing::warn!(
                recognized = products.len(),
                min_confidence = self.min_confidence,
                "scan produced no products above the confidence floor"
            );
        }

        Ok(items)
    }
}

/// Recognizer returning a fixed product list, for tests and demos.
#[derive(Debug, Clone, Default)]
pub struct StaticRecognizer {
    products: Vec<RecognizedProduct>,
}

impl StaticRecognizer {
    pub fn new(products: Vec<RecognizedProduct>) -> Self {
        Self { products }
    }
}

impl ProductRecognizer for StaticRecognizer {
    fn recognize(&self, image: &[u8]) -> Result<Vec<RecognizedProduct>, RecognitionError> {
        if image.is_empty() {
            return Err(RecognitionError::Unreadable("empty image".to_string()));
        }

        Ok(self.products.clone())
    }
}

/// Date extractor returning a fixed date list, for tests and demos.
#[derive(Debug, Clone, Default)]
pub struct StaticDateExtractor {
    dates: Vec<ExtractedDate>,
}

impl StaticDateExtractor {
    pub fn new(dates: Vec<ExtractedDate>) -> Self {
        Self { dates }
    }
}

impl DateExtractor for StaticDateExtractor {
    fn extract_dates(&self, image: &[u8]) -> Result<Vec<ExtractedDate>, RecognitionError> {
        if image.is_empty() {
            return Err(RecognitionError::Unreadable("empty image".to_string()));
        }

        Ok(self.dates.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use larder_shared::{PurchaseSource, PurchaseStatus};

    fn product(name: &str, confidence: f64) -> RecognizedProduct {
        RecognizedProduct {
            name: name.to_string(),
            category: Category::Produce,
            confidence,
            unit: None,
        }
    }

    fn date(day: u32, confidence: f64) -> ExtractedDate {
        ExtractedDate {
            date: NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
            confidence,
        }
    }

    #[test]
    fn test_low_confidence_products_are_dropped() {
        let items = items_from_scan(&[product("Apple", 0.9), product("Pear", 0.3)], &[], 0.5);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Apple");
        assert_eq!(items[0].unit, DEFAULT_SCANNED_UNIT);
        assert_eq!(items[0].source, PurchaseSource::Scanned);
        assert_eq!(items[0].status, PurchaseStatus::Confirmed);
        assert!(items[0].expiration_date.is_none());
    }

    #[test]
    fn test_most_confident_date_wins() {
        let items = items_from_scan(
            &[product("Apple", 0.9)],
            &[date(10, 0.6), date(12, 0.95), date(3, 0.2)],
            0.5,
        );

        assert_eq!(items[0].expiration_date, Some(date(12, 0.0).date));
    }

    #[test]
    fn test_date_ties_prefer_earliest() {
        let items = items_from_scan(&[product("Apple", 0.9)], &[date(20, 0.8), date(15, 0.8)], 0.5);

        assert_eq!(items[0].expiration_date, Some(date(15, 0.0).date));
    }

    #[test]
    fn test_scan_session_tags_image_and_survives_date_failure() {
        struct BrokenExtractor;

        impl DateExtractor for BrokenExtractor {
            fn extract_dates(&self, _image: &[u8]) -> Result<Vec<ExtractedDate>, RecognitionError> {
                Err(RecognitionError::Collaborator("ocr offline".to_string()))
            }
        }

        let session = ScanSession::new(
            StaticRecognizer::new(vec![product("Lettuce", 0.8)]),
            BrokenExtractor,
            0.5,
        );

        let items = session.scan(b"jpeg", Some("shelf-1.jpg")).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].image_ref.as_deref(), Some("shelf-1.jpg"));
        assert!(items[0].expiration_date.is_none());
    }

    #[test]
    fn test_unreadable_image_fails_scan() {
        let session = ScanSession::new(
            StaticRecognizer::new(vec![product("Lettuce", 0.8)]),
            StaticDateExtractor::default(),
            0.5,
        );

        assert_eq!(
            session.scan(b"", None),
            Err(RecognitionError::Unreadable("empty image".to_string()))
        );
    }
}
