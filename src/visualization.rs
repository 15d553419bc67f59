use crate::{book_state::BookStatus, library::Library};

/// Text and Graphviz renderings of a library's current state
#[derive(Debug)]
pub struct LibraryVisualization;

impl LibraryVisualization {
    /// One line per known ISBN with its status, in ISBN order
    #[must_use]
    pub fn render_text(library: &Library) -> String {
        let mut text = format!("=== {} ===\n", library.name());
        let isbns = library.known_isbns();
        if isbns.is_empty() {
            text.push_str("No books held.\n");
            return text;
        }

        for isbn in isbns {
            let status = library.status_of(isbn);
            let title = library
                .get_book_by_isbn(isbn)
                .or_else(|| library.get_borrowed_book_by_isbn(isbn))
                .map_or("?", |book| book.title());
            text.push_str(&format!("{isbn}  {title:<30}  {}\n", status.get_description()));
        }
        text
    }

    /// DOT graph with the library as a hub, books as nodes, borrowers on loan edges
    ///
    /// Node ids are quoted strings prefixed `b:` for books and `u:` for
    /// borrowers, so distinct keys always map to distinct nodes.
    #[must_use]
    pub fn generate_dot(library: &Library) -> String {
        let mut dot = String::from("digraph library {\n");
        dot.push_str("  rankdir=LR;\n");
        dot.push_str("  node [shape=box, style=filled, fillcolor=lightblue];\n");
        dot.push_str(&format!("  library [label={}, shape=house];\n", quote(library.name())));

        for isbn in library.known_isbns() {
            let book_node = quote(&format!("b:{isbn}"));
            match library.status_of(isbn) {
                BookStatus::OnLoan(borrower) => {
                    let user_node = quote(&format!("u:{borrower}"));
                    dot.push_str(&format!(
                        "  {book_node} [label={}, fillcolor=lightsalmon];\n",
                        quote(isbn)
                    ));
                    dot.push_str(&format!(
                        "  {user_node} [label={}, shape=ellipse, fillcolor=palegreen];\n",
                        quote(&borrower)
                    ));
                    dot.push_str(&format!(
                        "  {book_node} -> {user_node} [label=\"on loan\", color=red];\n"
                    ));
                }
                BookStatus::OnShelf => {
                    dot.push_str(&format!("  {book_node} [label={}];\n", quote(isbn)));
                    dot.push_str(&format!("  library -> {book_node} [label=\"on shelf\"];\n"));
                }
                BookStatus::Absent => {}
            }
        }

        dot.push_str("}\n");
        dot
    }

    /// Markdown table of the recorded transitions
    #[must_use]
    pub fn history_table(library: &Library) -> String {
        if library.history().next().is_none() {
            return "No transitions recorded yet.".to_string();
        }

        let mut table = String::from("| # | ISBN | From | Event | To |\n");
        table.push_str("|---|------|------|-------|----|\n");

        for (i, transition) in library.history().enumerate() {
            table.push_str(&format!(
                "| {} | {} | {} | {:?} | {} |\n",
                i.saturating_add(1),
                transition.isbn,
                Self::format_status(&transition.from),
                transition.event,
                Self::format_status(&transition.to)
            ));
        }
        table
    }

    /// Format a status for a table cell
    fn format_status(status: &BookStatus) -> String {
        match status {
            BookStatus::Absent => "Absent".to_string(),
            BookStatus::OnShelf => "OnShelf".to_string(),
            BookStatus::OnLoan(borrower) => format!("OnLoan({borrower})"),
        }
    }
}

/// Render `text` as a DOT quoted string, escaping backslashes before quotes
fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{
        book::Book,
        error::Result,
        user::{Role, User},
    };

    /// Library with one book on loan and one on the shelf
    fn library_with_loan() -> Result<Library> {
        let mut library = Library::new("Test Library")?;
        let librarian = User::new("Dhruv", Role::Librarian);
        let patron = User::new("Priya", Role::User);
        let date = NaiveDate::from_ymd_opt(2008, 8, 1);
        library.add_book(&librarian, Book::new("9780132350884", "Clean Code", "R. Martin", date)?)?;
        library.add_book(&librarian, Book::new("9780201633610", "Design Patterns", "E. Gamma", date)?)?;
        library.borrow_book(&patron, "9780132350884")?;
        Ok(library)
    }

    #[test]
    fn test_render_text_lists_every_isbn() -> Result<()> {
        let text = LibraryVisualization::render_text(&library_with_loan()?);
        assert!(text.contains("9780132350884"));
        assert!(text.contains("Book is on loan to Priya"));
        assert!(text.contains("Design Patterns"));
        assert!(text.contains("Book is on the shelf"));
        Ok(())
    }

    #[test]
    fn test_generate_dot() -> Result<()> {
        let dot = LibraryVisualization::generate_dot(&library_with_loan()?);
        assert!(dot.starts_with("digraph library {"));
        assert!(dot.contains("  library [label=\"Test Library\", shape=house];\n"));
        assert!(dot.contains("\"b:9780132350884\" -> \"u:Priya\""));
        assert!(dot.contains("library -> \"b:9780201633610\""));
        assert!(dot.ends_with("}\n"));
        Ok(())
    }

    #[test]
    fn test_dot_label_ending_in_backslash_stays_terminated() -> Result<()> {
        let dot = LibraryVisualization::generate_dot(&Library::new("Branch\\")?);
        assert!(dot.contains("  library [label=\"Branch\\\\\", shape=house];\n"));

        let dot = LibraryVisualization::generate_dot(&Library::new("The \"Quoted\" Branch")?);
        assert!(dot.contains("[label=\"The \\\"Quoted\\\" Branch\", shape=house]"));
        Ok(())
    }

    #[test]
    fn test_dot_keeps_punctuation_distinct_borrowers_apart() -> Result<()> {
        let mut library = Library::new("Test Library")?;
        let librarian = User::new("Dhruv", Role::Librarian);
        let date = NaiveDate::from_ymd_opt(2008, 8, 1);
        library.add_book(&librarian, Book::new("111", "First", "A. Author", date)?)?;
        library.add_book(&librarian, Book::new("222", "Second", "B. Author", date)?)?;
        library.borrow_book(&User::new("Ann Lee", Role::User), "111")?;
        library.borrow_book(&User::new("Ann_Lee", Role::User), "222")?;

        let dot = LibraryVisualization::generate_dot(&library);
        assert!(dot.contains("\"b:111\" -> \"u:Ann Lee\""));
        assert!(dot.contains("\"b:222\" -> \"u:Ann_Lee\""));
        Ok(())
    }

    #[test]
    fn test_history_table() -> Result<()> {
        let table = LibraryVisualization::history_table(&library_with_loan()?);
        assert_eq!(table.lines().count(), 5);
        assert!(table.contains("| 3 | 9780132350884 | OnShelf |"));

        let empty = Library::new("Empty Branch")?;
        assert_eq!(LibraryVisualization::history_table(&empty), "No transitions recorded yet.");
        Ok(())
    }
}
