use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum PurchaseError {
    #[error("Purchase item not found: {0}")]
    ItemNotFound(String),

    #[error("Shopping trip already completed")]
    SummaryCompleted,

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(f64),
}

#[derive(Error, Debug, PartialEq)]
pub enum RecognitionError {
    #[error("Image could not be read: {0}")]
    Unreadable(String),

    #[error("Recognition collaborator failed: {0}")]
    Collaborator(String),
}
