//! Shared precondition checks used by the value objects and the library

use crate::{
    book::Book,
    error::{LibraryError, Result, ValidationError},
    user::User,
};

/// Reject empty or whitespace-only strings, naming the field
///
/// # Errors
///
/// Returns `ValidationError::EmptyField` if `value` has no non-whitespace
/// characters.
pub fn validate_string(value: &str, field: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { field }.into());
    }
    Ok(())
}

/// Check a library name is present and at least `min_length` characters long
///
/// # Errors
///
/// Returns `ValidationError::EmptyField` for a blank name and
/// `ValidationError::LibraryNameTooShort` for a name under `min_length`.
pub fn validate_library_name(name: &str, min_length: usize) -> Result<()> {
    validate_string(name, "library name")?;
    let actual = name.chars().count();
    if actual < min_length {
        return Err(ValidationError::LibraryNameTooShort { min: min_length, actual }.into());
    }
    Ok(())
}

/// Unwrap a resolved user reference
///
/// # Errors
///
/// Returns `LibraryError::MissingUser` if the lookup produced nothing.
pub fn require_user(user: Option<&User>) -> Result<&User> {
    user.ok_or(LibraryError::MissingUser)
}

/// Unwrap a resolved book, reporting `isbn` when it is absent
///
/// # Errors
///
/// Returns `LibraryError::BookNotFound` if the lookup produced nothing.
pub fn require_book(book: Option<Book>, isbn: &str) -> Result<Book> {
    book.ok_or_else(|| LibraryError::BookNotFound(isbn.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_string_is_rejected() {
        let err = validate_string("   ", "title");
        assert_eq!(err, Err(LibraryError::Validation(ValidationError::EmptyField { field: "title" })));
        assert!(validate_string("Clean Code", "title").is_ok());
    }

    #[test]
    fn test_library_name_length_boundary() {
        assert_eq!(
            validate_library_name("Dhru", 5),
            Err(LibraryError::Validation(ValidationError::LibraryNameTooShort { min: 5, actual: 4 }))
        );
        assert!(validate_library_name("Dhruv", 5).is_ok());
        assert_eq!(
            validate_library_name("", 5),
            Err(LibraryError::Validation(ValidationError::EmptyField { field: "library name" }))
        );
    }

    #[test]
    fn test_require_user_and_book() {
        assert_eq!(require_user(None).err(), Some(LibraryError::MissingUser));
        assert_eq!(
            require_book(None, "9780132350884").err(),
            Some(LibraryError::BookNotFound("9780132350884".to_string()))
        );
    }
}
