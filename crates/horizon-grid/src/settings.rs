//! Editor settings.
//!
//! Every editor receives an `Arc<EditorSettings>` through its
//! [`EditorArgs`](crate::editor::EditorArgs). Settings are plain data with a
//! default for every field, so a TOML file only needs to mention what it
//! changes.
//!
//! # Example
//!
//! ```
//! use horizon_grid::settings::{DateFormat, EditorSettings};
//!
//! let settings = EditorSettings::from_toml_str(r#"
//! [messages]
//! invalid_integer = "Whole numbers only"
//!
//! [date]
//! format = "iso"
//! "#).unwrap();
//!
//! assert_eq!(settings.messages.invalid_integer, "Whole numbers only");
//! assert_eq!(settings.date.format, DateFormat::Iso);
//! assert_eq!(settings.float.decimal_places, None);
//! ```

use std::path::Path;

use horizon_grid_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Top-level editor configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Validation messages.
    pub messages: ValidationMessages,
    /// Date editor settings.
    pub date: DateSettings,
    /// Float editor settings.
    pub float: FloatSettings,
    /// Long-text editor settings.
    pub long_text: LongTextSettings,
    /// Checkbox editor settings.
    pub checkbox: CheckboxSettings,
}

impl EditorSettings {
    /// Parses settings from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let settings = toml::from_str(s)?;
        tracing::debug!(target: targets::SETTINGS, "editor settings parsed");
        Ok(settings)
    }

    /// Reads settings from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| GridError::io(path, e))?;
        tracing::debug!(target: targets::SETTINGS, path = %path.display(), "loading editor settings");
        Self::from_toml_str(&content)
    }

    /// Serializes settings to a TOML string.
    pub fn to_toml_string(&self) -> String {
        // Settings contain only strings, numbers, enums and optional numbers,
        // all of which TOML can represent.
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

/// Messages used by built-in validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationMessages {
    /// Integer editor: text is not an integer.
    pub invalid_integer: String,
    /// Float editor: text is not a number.
    pub invalid_number: String,
    /// Percent editor: text does not start with a number.
    pub invalid_percent: String,
    /// Percent editor: number outside 0..=100.
    pub percent_out_of_range: String,
    /// Composite editor: aggregate failure message.
    pub validation_failed: String,
}

impl Default for ValidationMessages {
    fn default() -> Self {
        Self {
            invalid_integer: "Please enter a valid integer".to_string(),
            invalid_number: "Please enter a valid number".to_string(),
            invalid_percent: "Please enter a valid positive number".to_string(),
            percent_out_of_range: "Please enter a percentage between 0 and 100".to_string(),
            validation_failed: "Some of the fields have failed validation".to_string(),
        }
    }
}

/// Display format for dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    /// Short format: MM/DD/YYYY
    #[default]
    Short,
    /// Long format: Month DD, YYYY
    Long,
    /// ISO format: YYYY-MM-DD
    Iso,
}

impl DateFormat {
    /// The `chrono` format string for this format.
    pub fn pattern(&self) -> &'static str {
        match self {
            DateFormat::Short => "%m/%d/%Y",
            DateFormat::Long => "%B %d, %Y",
            DateFormat::Iso => "%Y-%m-%d",
        }
    }
}

/// Date editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateSettings {
    /// Format used to render and parse dates.
    pub format: DateFormat,
    /// Vertical distance between the cell's top edge and the calendar popup.
    pub popup_offset: f32,
}

impl Default for DateSettings {
    fn default() -> Self {
        Self {
            format: DateFormat::Short,
            popup_offset: 30.0,
        }
    }
}

/// Float editor settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatSettings {
    /// Fixed number of decimal places, or `None` to keep the input precision.
    pub decimal_places: Option<u32>,
}

/// Long-text editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LongTextSettings {
    /// Popup width.
    pub width: f32,
    /// Popup height.
    pub height: f32,
}

impl Default for LongTextSettings {
    fn default() -> Self {
        Self {
            width: 250.0,
            height: 80.0,
        }
    }
}

/// How the checkbox editor decides whether its value changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckboxDirtyCheck {
    /// Compare the checked state with the checked state at load time.
    #[default]
    CheckedState,
    /// Compare the serialized string (`"true"`/`"false"`) with the raw
    /// boolean snapshot. The two never compare equal, so the editor always
    /// reports a change.
    SerializedAgainstSnapshot,
}

/// Checkbox editor settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckboxSettings {
    /// Dirty-check strategy.
    pub dirty_check: CheckboxDirtyCheck,
}
