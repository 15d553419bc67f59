//! Thread-safe handle over a [`Library`]
//!
//! Each call takes the lock once, so the four stores change as one unit and
//! concurrent borrows of the same ISBN leave exactly one winner.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    book::Book,
    book_state::BookStatus,
    error::{LibraryError, Result},
    library::Library,
    snapshot::InventorySnapshot,
    user::User,
};

/// Cloneable, mutex-guarded library handle
#[derive(Debug, Clone)]
pub struct SharedLibrary {
    /// The guarded library
    inner: Arc<Mutex<Library>>,
}

impl SharedLibrary {
    /// Wrap a library for shared use
    #[must_use]
    pub fn new(library: Library) -> Self {
        Self { inner: Arc::new(Mutex::new(library)) }
    }

    /// Acquire the lock, mapping poisoning to an error
    fn lock(&self) -> Result<MutexGuard<'_, Library>> {
        self.inner.lock().map_err(|_| LibraryError::LockPoisoned)
    }

    /// Run `f` with exclusive access to the library
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::LockPoisoned` if a previous holder panicked, or
    /// whatever `f` returns.
    pub fn with<T>(&self, f: impl FnOnce(&mut Library) -> Result<T>) -> Result<T> {
        let mut library = self.lock()?;
        f(&mut library)
    }

    /// See [`Library::add_user`]
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::LockPoisoned` or the error from the library.
    pub fn add_user(&self, user: User) -> Result<()> {
        self.lock()?.add_user(user)
    }

    /// See [`Library::add_book`]
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::LockPoisoned` or the error from the library.
    pub fn add_book(&self, acting_user: &User, book: Book) -> Result<()> {
        self.lock()?.add_book(acting_user, book)
    }

    /// See [`Library::borrow_book`]
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::LockPoisoned` or the error from the library.
    pub fn borrow_book(&self, user: &User, isbn: &str) -> Result<()> {
        self.lock()?.borrow_book(user, isbn)
    }

    /// See [`Library::return_book`]
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::LockPoisoned` or the error from the library.
    pub fn return_book(&self, user: &User, isbn: &str) -> Result<()> {
        self.lock()?.return_book(user, isbn)
    }

    /// See [`Library::remove_book`]
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::LockPoisoned` or the error from the library.
    pub fn remove_book(&self, isbn: &str) -> Result<Book> {
        self.lock()?.remove_book(isbn)
    }

    /// See [`Library::view_available_books`]
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::LockPoisoned` if a previous holder panicked.
    pub fn view_available_books(&self) -> Result<InventorySnapshot> {
        Ok(self.lock()?.view_available_books())
    }

    /// Borrower of `isbn`, copied out of the lock
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::LockPoisoned` if a previous holder panicked.
    pub fn get_borrower_name_by_isbn(&self, isbn: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get_borrower_name_by_isbn(isbn).map(str::to_string))
    }

    /// See [`Library::status_of`]
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::LockPoisoned` if a previous holder panicked.
    pub fn status_of(&self, isbn: &str) -> Result<BookStatus> {
        Ok(self.lock()?.status_of(isbn))
    }
}
