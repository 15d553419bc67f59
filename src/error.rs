//! Error types for library operations

use thiserror::Error;

/// Malformed constructor input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required string field was empty or only whitespace
    #[error("{field} should not be null or empty")]
    EmptyField {
        /// Name of the offending field
        field: &'static str,
    },

    /// A book was constructed without a publication date
    #[error("publication date should not be null")]
    MissingPublicationDate,

    /// The library name is shorter than the configured minimum
    #[error("library name should have at least {min} characters, got {actual}")]
    LibraryNameTooShort {
        /// Minimum accepted length in characters
        min: usize,
        /// Length of the rejected name in characters
        actual: usize,
    },
}

/// Error type for library operations
///
/// Every variant is a business-rule rejection the caller can recover from by
/// correcting the request. Match on the variant, not on the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    /// Constructor input failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A required user could not be resolved
    #[error("user should not be null")]
    MissingUser,

    /// The ISBN is not on the shelf (never added, removed, or on loan)
    #[error("book {0} not found")]
    BookNotFound(String),

    /// A user with this name is already in the catalog
    #[error("user {0} already exists in catalog")]
    UserExists(String),

    /// The acting user may not add books
    #[error("user {0} is not permitted to add books")]
    PermissionDenied(String),

    /// The ISBN is already on loan
    #[error("book {0} is already borrowed")]
    AlreadyBorrowed(String),

    /// A return targeted an ISBN with no active loan
    #[error("book {0} is not borrowed by any user")]
    NotBorrowed(String),

    /// A return was attempted by someone other than the recorded borrower
    #[error("book {isbn} is not borrowed by {user}")]
    WrongBorrower {
        /// ISBN of the loaned book
        isbn: String,
        /// User who attempted the return
        user: String,
    },

    /// A read-only snapshot was asked to change
    #[error("unsupported operation: {0} on a read-only snapshot")]
    UnsupportedMutation(&'static str),

    /// The shared library lock was poisoned by a panicking holder
    #[error("library lock poisoned")]
    LockPoisoned,

    /// Configuration could not be loaded
    #[error("config error: {0}")]
    Config(String),

    /// A scenario script could not be read or parsed
    #[error("script error: {0}")]
    Script(String),
}

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, LibraryError>;
