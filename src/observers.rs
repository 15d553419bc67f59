use tracing::info;

use crate::{book_state::BookStatus, events::LibraryEvent};

/// Trait for transition observation
pub trait LibraryObserver: Send {
    /// Called after a transition has been applied
    fn on_transition(&self, isbn: &str, from: &BookStatus, to: &BookStatus, event: &LibraryEvent);
}

/// Logs every transition that occurs in the library
#[derive(Debug)]
pub struct TransitionLogger;

impl LibraryObserver for TransitionLogger {
    fn on_transition(&self, isbn: &str, from: &BookStatus, to: &BookStatus, event: &LibraryEvent) {
        info!(target: "library::transition", %isbn, ?from, ?to, ?event, "transition occurred");
    }
}

/// Sends notifications for loan transitions
#[derive(Debug)]
pub struct NotificationService;

impl LibraryObserver for NotificationService {
    fn on_transition(&self, isbn: &str, from: &BookStatus, to: &BookStatus, event: &LibraryEvent) {
        match (from, to, event) {
            (BookStatus::OnShelf, BookStatus::OnLoan(borrower), LibraryEvent::Borrow(_)) => {
                info!(target: "library::notification", %isbn, %borrower, "book has been borrowed");
            }
            (BookStatus::OnLoan(_), BookStatus::OnShelf, LibraryEvent::Return(user)) => {
                info!(target: "library::notification", %isbn, %user, "book has been returned");
            }
            _ => {}
        }
    }
}
