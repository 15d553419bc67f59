//! Single-branch lending library.
//!
//! This crate keeps a catalog of registered users, an inventory of books on
//! the shelf and the loans between them, enforcing who may add books and
//! who may borrow and return which copy.

pub mod book;
pub mod book_state;
pub mod config;
pub mod error;
pub mod events;
pub mod library;
pub mod observers;
pub mod script;
pub mod shared;
pub mod snapshot;
pub mod user;
pub mod validators;
pub mod visualization;

pub use book::Book;
pub use book_state::BookStatus;
pub use config::LibraryConfig;
pub use error::{LibraryError, Result, ValidationError};
pub use events::LibraryEvent;
pub use library::{Library, StateTransition};
pub use shared::SharedLibrary;
pub use snapshot::InventorySnapshot;
pub use user::{Role, User};
pub use visualization::LibraryVisualization;
