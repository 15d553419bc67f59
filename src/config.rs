use std::{fs, path::Path};

use serde::Deserialize;

use crate::error::{LibraryError, Result};

/// Tunables for a [`Library`](crate::Library)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Minimum number of characters in a library name
    pub min_name_length: usize,
    /// Maximum number of transitions kept in the history
    pub max_history_size: usize,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self { min_name_length: 5, max_history_size: 100 }
    }
}

impl LibraryConfig {
    /// Load a config from a JSON file; missing fields take their defaults
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Config` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            LibraryError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        serde_json::from_str(&contents)
            .map_err(|e| LibraryError::Config(format!("Failed to parse JSON: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(br#"{ "max_history_size": 3 }"#)?;

        let config = LibraryConfig::from_file(file.path())?;
        assert_eq!(config.min_name_length, 5);
        assert_eq!(config.max_history_size, 3);
        Ok(())
    }

    #[test]
    fn test_unreadable_file_is_a_config_error() {
        let result = LibraryConfig::from_file(Path::new("/nonexistent/library.json"));
        assert!(matches!(result, Err(LibraryError::Config(_))));
    }
}
