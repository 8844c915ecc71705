pub mod error;
pub mod recognition;
pub mod reconcile;
pub mod summary;

pub use error::{PurchaseError, RecognitionError};
pub use recognition::{
    DateExtractor, ExtractedDate, ProductRecognizer, RecognizedProduct, ScanSession,
    StaticDateExtractor, StaticRecognizer, items_from_scan,
};
pub use reconcile::{ReconciliationResult, reconcile};
pub use summary::PurchaseSummary;
