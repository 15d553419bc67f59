//! JSON scenario scripts driving a [`Library`] step by step
//!
//! Steps name users and books by key; the runner resolves them through the
//! catalog and the script's book table, so unknown names surface as
//! `MissingUser` and `BookNotFound` rejections.

use std::{fs, path::Path};

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use crate::{
    book::Book,
    config::LibraryConfig,
    error::{LibraryError, Result},
    library::Library,
    user::{Role, User},
    validators::{require_book, require_user},
};

/// Book definition referenced by `add_book` steps
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookSpec {
    /// ISBN key
    pub isbn: String,
    /// Book title
    pub title: String,
    /// Book author
    pub author: String,
    /// Publication date, `YYYY-MM-DD`
    #[serde(default)]
    pub published: Option<NaiveDate>,
}

impl BookSpec {
    /// Validate into a [`Book`]
    ///
    /// # Errors
    ///
    /// Returns the validation error from [`Book::new`].
    pub fn build(&self) -> Result<Book> {
        Book::new(self.isbn.clone(), self.title.clone(), self.author.clone(), self.published)
    }
}

/// One library operation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Register a user
    AddUser {
        /// User name
        name: String,
        /// User role
        role: Role,
    },
    /// Shelve a book from the script's book table
    AddBook {
        /// Acting user
        user: String,
        /// Book to add
        isbn: String,
    },
    /// Lend a book
    Borrow {
        /// Borrowing user
        user: String,
        /// Book to borrow
        isbn: String,
    },
    /// Take a book back
    Return {
        /// Returning user
        user: String,
        /// Book to return
        isbn: String,
    },
    /// Remove a book from the shelf
    Remove {
        /// Book to remove
        isbn: String,
    },
}

/// The result of applying one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// One-based position in the script
    pub index: usize,
    /// The step that was applied
    pub step: Step,
    /// Whether the library accepted it
    pub result: Result<()>,
}

/// A scenario: library name, book table and steps
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Script {
    /// Name of the library to create
    pub library: String,
    /// Books that `add_book` steps may refer to
    #[serde(default)]
    pub books: Vec<BookSpec>,
    /// Operations, applied in order
    pub steps: Vec<Step>,
}

impl Script {
    /// Parse a script from JSON
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Script` if the JSON does not describe a script.
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| LibraryError::Script(format!("Failed to parse JSON: {e}")))
    }

    /// Read and parse a script file
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Script` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            LibraryError::Script(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::parse(&contents)
    }

    /// The built-in walkthrough used when no script is given
    #[must_use]
    pub fn demo() -> Self {
        let clean_code = || "9780132350884".to_string();
        let user = |name: &str| name.to_string();

        Self {
            library: "Test Library".to_string(),
            books: vec![
                BookSpec {
                    isbn: "9780132350884".to_string(),
                    title: "Clean Code".to_string(),
                    author: "Robert Cecil Martin".to_string(),
                    published: NaiveDate::from_ymd_opt(2008, 8, 1),
                },
                BookSpec {
                    isbn: "9780201633610".to_string(),
                    title: "Design Patterns".to_string(),
                    author: "Erich Gamma".to_string(),
                    published: NaiveDate::from_ymd_opt(1994, 10, 31),
                },
            ],
            steps: vec![
                Step::AddUser { name: "Dhruv".to_string(), role: Role::Librarian },
                Step::AddUser { name: "Priya".to_string(), role: Role::User },
                Step::AddUser { name: "Arjun".to_string(), role: Role::User },
                Step::AddUser { name: "Priya".to_string(), role: Role::User },
                Step::AddBook { user: user("Dhruv"), isbn: clean_code() },
                Step::AddBook { user: user("Priya"), isbn: clean_code() },
                Step::AddBook { user: user("Dhruv"), isbn: "9780201633610".to_string() },
                Step::AddBook { user: user("Dhruv"), isbn: "9780596007126".to_string() },
                Step::Borrow { user: user("Priya"), isbn: clean_code() },
                Step::Borrow { user: user("Arjun"), isbn: clean_code() },
                Step::Borrow { user: user("Ghost"), isbn: clean_code() },
                Step::Return { user: user("Arjun"), isbn: clean_code() },
                Step::Return { user: user("Priya"), isbn: clean_code() },
                Step::Remove { isbn: "9780201633610".to_string() },
                Step::Remove { isbn: "9780201633610".to_string() },
            ],
        }
    }

    /// Create the library the script names
    ///
    /// # Errors
    ///
    /// Returns a `LibraryError::Validation` if the name is rejected.
    pub fn open_library(&self, config: LibraryConfig) -> Result<Library> {
        Library::with_config(self.library.clone(), config)
    }

    /// Apply every step; rejected steps are reported and the run continues
    pub fn run(&self, library: &mut Library) -> Vec<StepOutcome> {
        self.steps
            .iter()
            .zip(1_usize..)
            .map(|(step, index)| {
                let result = self.apply(library, step);
                match &result {
                    Ok(()) => info!(index, ?step, "step accepted"),
                    Err(error) => info!(index, ?step, %error, "step rejected"),
                }
                StepOutcome { index, step: step.clone(), result }
            })
            .collect()
    }

    /// Resolve the step's references and apply it
    fn apply(&self, library: &mut Library, step: &Step) -> Result<()> {
        match step {
            Step::AddUser { name, role } => library.add_user(User::new(name.clone(), *role)),
            Step::AddBook { user, isbn } => {
                let user = require_user(library.get_user_by_name(user))?.clone();
                let book = self.books.iter().find(|spec| &spec.isbn == isbn).map(BookSpec::build);
                let book = require_book(book.transpose()?, isbn)?;
                library.add_book(&user, book)
            }
            Step::Borrow { user, isbn } => {
                let user = require_user(library.get_user_by_name(user))?.clone();
                library.borrow_book(&user, isbn)
            }
            Step::Return { user, isbn } => {
                let user = require_user(library.get_user_by_name(user))?.clone();
                library.return_book(&user, isbn)
            }
            Step::Remove { isbn } => library.remove_book(isbn).map(|_| ()),
        }
    }
}
