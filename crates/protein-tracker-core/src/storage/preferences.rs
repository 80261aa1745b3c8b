//! UI preferences stored beside the tracker record.
//!
//! The theme is its own kv entry so that changing it never rewrites the
//! tracker record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Database;
use crate::error::{CoreError, StorageError};

/// Key of the theme scalar in the kv table.
pub const THEME_KEY: &str = "proteinTrackerTheme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(CoreError::Custom(format!(
                "unknown theme '{other}' (expected light or dark)"
            ))),
        }
    }
}

impl Database {
    /// Stored theme, or the default when missing or unrecognized.
    pub fn theme(&self) -> Theme {
        match self.kv_get(THEME_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "ignoring unrecognized stored theme");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read theme");
                Theme::default()
            }
        }
    }

    pub fn set_theme(&self, theme: Theme) -> Result<(), StorageError> {
        self.kv_set(THEME_KEY, theme.as_str())
    }

    /// Flip between light and dark, returning the new theme.
    pub fn toggle_theme(&self) -> Result<Theme, StorageError> {
        let next = self.theme().toggled();
        self.set_theme(next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::RecordStore;

    #[test]
    fn defaults_to_dark() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.theme(), Theme::Dark);
    }

    #[test]
    fn toggle_persists() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.toggle_theme().unwrap(), Theme::Light);
        assert_eq!(db.theme(), Theme::Light);
        assert_eq!(db.toggle_theme().unwrap(), Theme::Dark);
    }

    #[test]
    fn garbage_value_falls_back() {
        let db = Database::open_memory().unwrap();
        db.kv_set(THEME_KEY, "neon").unwrap();
        assert_eq!(db.theme(), Theme::Dark);
    }

    #[test]
    fn theme_is_independent_of_record() {
        let db = Database::open_memory().unwrap();
        db.set_theme(Theme::Light).unwrap();
        assert!(db.read_slot().unwrap().is_none());
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("LIGHT".parse::<Theme>().unwrap(), Theme::Light);
        assert!("blue".parse::<Theme>().is_err());
    }
}
