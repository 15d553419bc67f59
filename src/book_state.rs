use serde::{Deserialize, Serialize};

/// Where an ISBN currently sits in the lending cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum BookStatus {
    /// Not known to the library, or removed
    #[default]
    Absent,
    /// In the inventory and available to borrow
    OnShelf,
    /// Lent out to the named user
    OnLoan(String),
}

impl BookStatus {
    /// Get a human-readable description of the status
    #[must_use]
    pub fn get_description(&self) -> String {
        match self {
            Self::Absent => "Book is not held by the library".to_string(),
            Self::OnShelf => "Book is on the shelf".to_string(),
            Self::OnLoan(borrower) => format!("Book is on loan to {borrower}"),
        }
    }
}
