use serde::{Deserialize, Serialize};

/// Operations that move an ISBN between statuses
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum LibraryEvent {
    /// A librarian put the book on the shelf
    Add(String),
    /// The named user borrowed the book
    Borrow(String),
    /// The named user returned the book
    Return(String),
    /// The book was taken out of the inventory
    Remove,
}
