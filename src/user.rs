use std::fmt;

use serde::{Deserialize, Serialize};

/// Role of a registered user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Staff member who may add books to the inventory
    Librarian,
    /// Regular patron
    #[default]
    User,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Librarian => write!(f, "LIBRARIAN"),
            Self::User => write!(f, "USER"),
        }
    }
}

/// A registered library user, keyed by name in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct User {
    /// Catalog key
    name: String,
    /// Permission role
    role: Role,
}

impl User {
    /// Create a user with the given name and role
    #[must_use]
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self { name: name.into(), role }
    }

    /// Catalog key
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Permission role
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Whether this user may add books to the inventory
    #[must_use]
    pub fn is_permitted_to_add_book(&self) -> bool {
        self.role == Role::Librarian
    }
}
