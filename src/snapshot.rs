//! Read-only copy of the inventory handed out to callers

use std::collections::{BTreeMap, btree_map};

use serde::Serialize;

use crate::{
    book::Book,
    error::{LibraryError, Result},
};

/// Independent, read-only copy of the books on the shelf, ordered by ISBN
///
/// The snapshot never aliases library state. Its mutators exist so callers
/// get a loud `UnsupportedMutation` instead of a silent no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InventorySnapshot {
    /// Copied inventory
    books: BTreeMap<String, Book>,
}

impl InventorySnapshot {
    /// Copy the given inventory entries
    pub(crate) fn capture<'a>(entries: impl Iterator<Item = (&'a String, &'a Book)>) -> Self {
        Self { books: entries.map(|(isbn, book)| (isbn.clone(), book.clone())).collect() }
    }

    /// Look up a book by ISBN
    #[must_use]
    pub fn get(&self, isbn: &str) -> Option<&Book> {
        self.books.get(isbn)
    }

    /// Whether the ISBN was on the shelf
    #[must_use]
    pub fn contains_key(&self, isbn: &str) -> bool {
        self.books.contains_key(isbn)
    }

    /// Number of books in the snapshot
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the shelf was empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Iterate over `(isbn, book)` pairs in ISBN order
    pub fn iter(&self) -> btree_map::Iter<'_, String, Book> {
        self.books.iter()
    }

    /// ISBNs in the snapshot, in order
    pub fn isbns(&self) -> impl Iterator<Item = &str> {
        self.books.keys().map(String::as_str)
    }

    /// Always fails: snapshots are read-only
    ///
    /// # Errors
    ///
    /// Always returns `LibraryError::UnsupportedMutation`.
    pub fn insert(&mut self, _isbn: String, _book: Book) -> Result<Option<Book>> {
        Err(LibraryError::UnsupportedMutation("insert"))
    }

    /// Always fails: snapshots are read-only
    ///
    /// # Errors
    ///
    /// Always returns `LibraryError::UnsupportedMutation`.
    pub fn remove(&mut self, _isbn: &str) -> Result<Option<Book>> {
        Err(LibraryError::UnsupportedMutation("remove"))
    }

    /// Always fails: snapshots are read-only
    ///
    /// # Errors
    ///
    /// Always returns `LibraryError::UnsupportedMutation`.
    pub fn clear(&mut self) -> Result<()> {
        Err(LibraryError::UnsupportedMutation("clear"))
    }
}

impl<'a> IntoIterator for &'a InventorySnapshot {
    type Item = (&'a String, &'a Book);
    type IntoIter = btree_map::Iter<'a, String, Book>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
