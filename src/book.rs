use std::hash::{Hash, Hasher};

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    error::{Result, ValidationError},
    validators::validate_string,
};

/// A book record, identified by its ISBN
///
/// Two books are equal when their ISBNs match, whatever their other fields.
#[derive(Debug, Clone, Serialize)]
pub struct Book {
    /// International Standard Book Number, the identity key
    isbn: String,
    /// Book title
    title: String,
    /// Book author
    author: String,
    /// Publication date
    publication_date: NaiveDate,
}

impl Book {
    /// Create a validated book
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyField` naming the first blank field among
    /// ISBN, title and author, or `ValidationError::MissingPublicationDate` if
    /// no date was supplied.
    pub fn new(
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        publication_date: Option<NaiveDate>,
    ) -> Result<Self> {
        let isbn = isbn.into();
        let title = title.into();
        let author = author.into();

        validate_string(&isbn, "ISBN")?;
        validate_string(&title, "title")?;
        validate_string(&author, "author")?;
        let publication_date = publication_date.ok_or(ValidationError::MissingPublicationDate)?;

        Ok(Self { isbn, title, author, publication_date })
    }

    /// ISBN, the identity key
    #[must_use]
    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    /// Book title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Book author
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Publication date
    #[must_use]
    pub fn publication_date(&self) -> NaiveDate {
        self.publication_date
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.isbn == other.isbn
    }
}

impl Eq for Book {}

impl Hash for Book {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.isbn.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::error::LibraryError;

    /// Publication date of the fixture book
    fn published() -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2008, 8, 1)
    }

    #[test]
    fn test_empty_isbn_is_rejected() {
        let result = Book::new("", "Clean Code", "Robert Cecil Martin", published());
        assert_eq!(
            result.err(),
            Some(LibraryError::Validation(ValidationError::EmptyField { field: "ISBN" }))
        );
    }

    #[test]
    fn test_empty_title_is_rejected() {
        let result = Book::new("9780132350884", " ", "Robert Cecil Martin", published());
        assert_eq!(
            result.err(),
            Some(LibraryError::Validation(ValidationError::EmptyField { field: "title" }))
        );
    }

    #[test]
    fn test_empty_author_is_rejected() {
        let result = Book::new("9780132350884", "Clean Code", "", published());
        assert_eq!(
            result.err(),
            Some(LibraryError::Validation(ValidationError::EmptyField { field: "author" }))
        );
    }

    #[test]
    fn test_missing_publication_date_is_rejected() {
        let result = Book::new("9780132350884", "Clean Code", "Robert Cecil Martin", None);
        assert_eq!(
            result.err(),
            Some(LibraryError::Validation(ValidationError::MissingPublicationDate))
        );
    }

    #[test]
    fn test_equality_and_hash_follow_isbn() -> Result<()> {
        let first = Book::new("9780132350884", "Clean Code", "Robert Cecil Martin", published())?;
        let reprint = Book::new(
            "9780132350884",
            "Clean Code (2nd printing)",
            "R. C. Martin",
            NaiveDate::from_ymd_opt(2009, 1, 1),
        )?;
        let other = Book::new("9780201633610", "Design Patterns", "Erich Gamma", published())?;

        assert_eq!(first, reprint);
        assert_ne!(first, other);

        let set: HashSet<Book> = [first, reprint, other].into_iter().collect();
        assert_eq!(set.len(), 2);
        Ok(())
    }
}
