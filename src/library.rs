use std::{
    collections::{BTreeSet, HashMap, VecDeque},
    fmt,
};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::{
    book::Book,
    book_state::BookStatus,
    config::LibraryConfig,
    error::{LibraryError, Result},
    events::LibraryEvent,
    observers::LibraryObserver,
    snapshot::InventorySnapshot,
    user::User,
    validators::validate_library_name,
};

/// An accepted change of status for one ISBN
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateTransition {
    /// ISBN that changed
    pub isbn: String,
    /// Status before the operation
    pub from: BookStatus,
    /// Status after the operation
    pub to: BookStatus,
    /// The operation that caused the change
    pub event: LibraryEvent,
    /// When the change was applied
    pub timestamp: DateTime<Utc>,
}

/// A single-branch library: user catalog, shelf inventory and active loans
///
/// For any ISBN, the inventory entry and the loan pair (`borrower_of` +
/// `loaned_book`) are mutually exclusive, except when a librarian re-adds an
/// ISBN that is on loan: the new shelf entry is kept next to the untouched
/// loan. Every operation validates before it mutates.
pub struct Library {
    /// Library name, validated at construction
    name: String,
    /// Tunables
    config: LibraryConfig,
    /// ISBN to book, for copies on the shelf
    inventory: HashMap<String, Book>,
    /// User name to user, for every registered user
    user_catalog: HashMap<String, User>,
    /// ISBN to borrower name, for copies on loan
    borrower_of: HashMap<String, String>,
    /// ISBN to the book record held while on loan
    loaned_book: HashMap<String, Book>,
    /// Recent transitions, oldest first
    history: VecDeque<StateTransition>,
    /// Registered transition observers
    observers: Vec<Box<dyn LibraryObserver>>,
}

impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("name", &self.name)
            .field("config", &self.config)
            .field("inventory", &self.inventory)
            .field("user_catalog", &self.user_catalog)
            .field("borrower_of", &self.borrower_of)
            .field("loaned_book", &self.loaned_book)
            .field("history", &self.history)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl Library {
    /// Create an empty library with the default config
    ///
    /// # Errors
    ///
    /// Returns a `LibraryError::Validation` if the name is blank or shorter
    /// than five characters.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::with_config(name, LibraryConfig::default())
    }

    /// Create an empty library with the given config
    ///
    /// # Errors
    ///
    /// Returns a `LibraryError::Validation` if the name is blank or shorter
    /// than `config.min_name_length` characters.
    pub fn with_config(name: impl Into<String>, config: LibraryConfig) -> Result<Self> {
        let name = name.into();
        validate_library_name(&name, config.min_name_length)?;

        Ok(Self {
            name,
            config,
            inventory: HashMap::new(),
            user_catalog: HashMap::new(),
            borrower_of: HashMap::new(),
            loaned_book: HashMap::new(),
            history: VecDeque::new(),
            observers: Vec::new(),
        })
    }

    /// Library name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Config the library was created with
    #[must_use]
    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    /// Register an observer to be notified of transitions
    pub fn register_observer(&mut self, observer: Box<dyn LibraryObserver>) {
        self.observers.push(observer);
    }

    /// Register a user under their name
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::UserExists` if the name is already taken; the
    /// existing entry is kept.
    pub fn add_user(&mut self, user: User) -> Result<()> {
        if self.user_catalog.contains_key(user.name()) {
            return Err(LibraryError::UserExists(user.name().to_string()));
        }
        debug!(library = %self.name, user = %user.name(), role = %user.role(), "user added");
        self.user_catalog.insert(user.name().to_string(), user);
        Ok(())
    }

    /// Look up a registered user by name
    #[must_use]
    pub fn get_user_by_name(&self, name: &str) -> Option<&User> {
        self.user_catalog.get(name)
    }

    /// Number of registered users
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.user_catalog.len()
    }

    /// Put a book on the shelf, replacing any shelf entry with the same ISBN
    ///
    /// An active loan for the same ISBN is left as it is.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::PermissionDenied` if `acting_user` is not a
    /// librarian.
    pub fn add_book(&mut self, acting_user: &User, book: Book) -> Result<()> {
        if !acting_user.is_permitted_to_add_book() {
            return Err(LibraryError::PermissionDenied(acting_user.name().to_string()));
        }

        let isbn = book.isbn().to_string();
        let from = self.status_of(&isbn);
        self.inventory.insert(isbn.clone(), book);
        self.record(isbn, from, LibraryEvent::Add(acting_user.name().to_string()));
        Ok(())
    }

    /// Look up a book on the shelf; books on loan are not visible here
    #[must_use]
    pub fn get_book_by_isbn(&self, isbn: &str) -> Option<&Book> {
        self.inventory.get(isbn)
    }

    /// Copy of the books currently on the shelf
    #[must_use]
    pub fn view_available_books(&self) -> InventorySnapshot {
        InventorySnapshot::capture(self.inventory.iter())
    }

    /// Lend a book on the shelf to `user`
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::AlreadyBorrowed` if the ISBN is on loan, checked
    /// first, then `LibraryError::BookNotFound` if it is not on the shelf.
    pub fn borrow_book(&mut self, user: &User, isbn: &str) -> Result<()> {
        if self.borrower_of.contains_key(isbn) {
            return Err(LibraryError::AlreadyBorrowed(isbn.to_string()));
        }
        let from = self.status_of(isbn);
        let Some(book) = self.inventory.remove(isbn) else {
            return Err(LibraryError::BookNotFound(isbn.to_string()));
        };

        self.borrower_of.insert(isbn.to_string(), user.name().to_string());
        self.loaned_book.insert(isbn.to_string(), book);
        self.record(isbn.to_string(), from, LibraryEvent::Borrow(user.name().to_string()));
        Ok(())
    }

    /// Name of the user a book is on loan to
    #[must_use]
    pub fn get_borrower_name_by_isbn(&self, isbn: &str) -> Option<&str> {
        self.borrower_of.get(isbn).map(String::as_str)
    }

    /// Look up the record of a book that is on loan
    #[must_use]
    pub fn get_borrowed_book_by_isbn(&self, isbn: &str) -> Option<&Book> {
        self.loaned_book.get(isbn)
    }

    /// Number of active loans
    #[must_use]
    pub fn loan_count(&self) -> usize {
        self.borrower_of.len()
    }

    /// Take back a loaned book and put it on the shelf again
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::NotBorrowed` if the ISBN has no active loan and
    /// `LibraryError::WrongBorrower` if `user` is not the recorded borrower;
    /// in both cases the loan is left untouched.
    pub fn return_book(&mut self, user: &User, isbn: &str) -> Result<()> {
        match self.borrower_of.get(isbn) {
            None => return Err(LibraryError::NotBorrowed(isbn.to_string())),
            Some(borrower) if borrower != user.name() => {
                return Err(LibraryError::WrongBorrower {
                    isbn: isbn.to_string(),
                    user: user.name().to_string(),
                });
            }
            Some(_) => {}
        }
        let from = self.status_of(isbn);
        let Some(book) = self.loaned_book.remove(isbn) else {
            return Err(LibraryError::NotBorrowed(isbn.to_string()));
        };

        self.borrower_of.remove(isbn);
        self.inventory.insert(isbn.to_string(), book);
        self.record(isbn.to_string(), from, LibraryEvent::Return(user.name().to_string()));
        Ok(())
    }

    /// Permanently take a book off the shelf
    ///
    /// Any user may remove a book; books on loan cannot be removed.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::BookNotFound` if the ISBN is not on the shelf.
    pub fn remove_book(&mut self, isbn: &str) -> Result<Book> {
        let from = self.status_of(isbn);
        let book = self
            .inventory
            .remove(isbn)
            .ok_or_else(|| LibraryError::BookNotFound(isbn.to_string()))?;
        self.record(isbn.to_string(), from, LibraryEvent::Remove);
        Ok(book)
    }

    /// Classify an ISBN; an active loan takes precedence over a shelf entry
    #[must_use]
    pub fn status_of(&self, isbn: &str) -> BookStatus {
        if let Some(borrower) = self.borrower_of.get(isbn) {
            BookStatus::OnLoan(borrower.clone())
        } else if self.inventory.contains_key(isbn) {
            BookStatus::OnShelf
        } else {
            BookStatus::Absent
        }
    }

    /// Every ISBN on the shelf or on loan, in order
    #[must_use]
    pub fn known_isbns(&self) -> BTreeSet<&str> {
        self.inventory.keys().chain(self.borrower_of.keys()).map(String::as_str).collect()
    }

    /// Recent transitions, oldest first
    #[must_use]
    pub fn history(&self) -> impl Iterator<Item = &StateTransition> {
        self.history.iter()
    }

    /// Append a transition to the bounded history and notify observers
    fn record(&mut self, isbn: String, from: BookStatus, event: LibraryEvent) {
        let to = self.status_of(&isbn);
        debug!(library = %self.name, %isbn, ?from, ?to, ?event, "transition applied");

        for observer in &self.observers {
            observer.on_transition(&isbn, &from, &to, &event);
        }

        self.history.push_back(StateTransition { isbn, from, to, event, timestamp: Utc::now() });
        while self.history.len() > self.config.max_history_size {
            self.history.pop_front();
        }
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} on shelf, {} on loan, {} users",
            self.name,
            self.inventory.len(),
            self.borrower_of.len(),
            self.user_catalog.len()
        )
    }
}
