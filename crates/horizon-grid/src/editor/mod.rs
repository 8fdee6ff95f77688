//! In-place cell editors.
//!
//! An editor is a small interactive control the host grid opens over a
//! cell. It loads the cell's value from the row [`Item`], tracks whether the
//! user changed it, validates it, and writes the result back when the host
//! commits.
//!
//! # Lifecycle
//!
//! The host drives every editor through the same sequence:
//!
//! 1. [`EditorFactory::new_instance`] builds a focused editor bound to one
//!    [`EditorArgs`]
//! 2. [`Editor::load_value`] reads the bound field and snapshots it
//! 3. the user interacts with the editor's controls
//! 4. [`Editor::is_value_changed`] and [`Editor::validate`] decide whether
//!    a commit is needed and allowed
//! 5. [`Editor::serialize_value`] and [`Editor::apply_value`] write the
//!    result onto the item
//! 6. [`Editor::destroy`] unmounts the controls, exactly once
//!
//! The ordering is a precondition on the host and is not checked here.
//! [`EditSession`](crate::session::EditSession) wraps the sequence for
//! hosts that want it done for them.
//!
//! # Built-in Editors
//!
//! - [`TextEditor`]: free text
//! - [`IntegerEditor`]: whole numbers
//! - [`FloatEditor`]: decimal numbers
//! - [`DateEditor`]: text plus a calendar popup
//! - [`YesNoEditor`]: yes/no drop-down
//! - [`CheckboxEditor`]: checkbox
//! - [`PercentCompleteEditor`]: 0 to 100 with presets
//! - [`LongTextEditor`]: multi-line popup
//! - [`CompositeEditor`]: several column editors behind one editor

mod args;
mod checkbox;
mod composite;
mod date;
mod float;
mod input;
mod integer;
mod long_text;
mod numeric;
mod percent;
mod text;
mod validation;
mod yes_no;

use std::any::Any;
use std::fmt;

use horizon_grid_core::CellBox;
use serde::{Deserialize, Serialize};

use crate::model::{CellValue, Item};

pub use args::{EditCallback, EditorArgs, GridNavigation, noop_callback};
pub use checkbox::CheckboxEditor;
pub use composite::{CompositeEditor, CompositeOptions, PreparedComposite};
pub use date::DateEditor;
pub use float::FloatEditor;
pub use input::{
    CheckInput, Key, KeyboardModifiers, Popup, SelectInput, SelectOption, TextInput,
};
pub use integer::IntegerEditor;
pub use long_text::LongTextEditor;
pub use percent::{PercentCompleteEditor, PercentPreset};
pub use text::TextEditor;
pub use validation::{
    FnValidator, IntRangeValidator, RegexValidator, RequiredValidator, ValidationErrorSource,
    ValidationResult, Validator,
};
pub use yes_no::YesNoEditor;

/// The contract every cell editor implements.
///
/// `serialize_value` and `is_value_changed` take `&self` and have no side
/// effects; calling them repeatedly without user input returns the same
/// answer.
pub trait Editor: Any + Send {
    /// Unmount the editor's controls. Called exactly once per instance.
    fn destroy(&mut self);

    /// Read the bound field from `item`, show it, and snapshot it as the
    /// default value for dirty tracking.
    fn load_value(&mut self, item: &Item);

    /// Convert the live control state into the column's value type.
    fn serialize_value(&self) -> CellValue;

    /// Write `value` into the bound field of `item`, coercing as needed.
    fn apply_value(&self, item: &mut Item, value: CellValue);

    /// Whether the live value differs from the snapshot taken at load time.
    fn is_value_changed(&self) -> bool;

    /// Check the live value.
    fn validate(&mut self) -> ValidationResult;

    /// Move keyboard focus to the primary control.
    fn focus(&mut self);

    /// Show a detached editor.
    fn show(&mut self) {}

    /// Hide a detached editor.
    fn hide(&mut self) {}

    /// Reposition a detached editor after the cell moved.
    fn position(&mut self, _cell: CellBox) {}

    /// Whether the editor renders outside the cell's normal flow.
    fn is_detached(&self) -> bool {
        false
    }
}

impl dyn Editor {
    /// Returns a reference to the concrete editor if it is of type `T`.
    pub fn downcast_ref<T: Editor>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    /// Returns a mutable reference to the concrete editor if it is of type `T`.
    pub fn downcast_mut<T: Editor>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut::<T>()
    }
}

impl fmt::Debug for dyn Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("changed", &self.is_value_changed())
            .field("detached", &self.is_detached())
            .finish_non_exhaustive()
    }
}

/// Builds editor instances for a column.
pub trait EditorFactory: Send + Sync {
    /// Build a new editor bound to `args`, focused and ready for
    /// `load_value`. Must not touch the item.
    fn new_instance(&self, args: EditorArgs) -> Box<dyn Editor>;

    /// Short name for diagnostics.
    fn name(&self) -> &str;
}

/// The built-in editors.
///
/// Usable directly as a column's [`EditorFactory`], and deserializable
/// from configuration by its snake_case name.
///
/// # Example
///
/// ```
/// use horizon_grid::editor::{EditorFactory, EditorKind};
///
/// let kind: EditorKind = serde_json::from_str("\"percent_complete\"").unwrap();
/// assert_eq!(kind, EditorKind::PercentComplete);
/// assert_eq!(kind.name(), "percent_complete");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorKind {
    Text,
    Integer,
    Float,
    Date,
    YesNo,
    Checkbox,
    PercentComplete,
    LongText,
}

impl EditorKind {
    /// All built-in kinds.
    pub const ALL: [EditorKind; 8] = [
        EditorKind::Text,
        EditorKind::Integer,
        EditorKind::Float,
        EditorKind::Date,
        EditorKind::YesNo,
        EditorKind::Checkbox,
        EditorKind::PercentComplete,
        EditorKind::LongText,
    ];

    /// The snake_case name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EditorKind::Text => "text",
            EditorKind::Integer => "integer",
            EditorKind::Float => "float",
            EditorKind::Date => "date",
            EditorKind::YesNo => "yes_no",
            EditorKind::Checkbox => "checkbox",
            EditorKind::PercentComplete => "percent_complete",
            EditorKind::LongText => "long_text",
        }
    }
}

impl fmt::Display for EditorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl EditorFactory for EditorKind {
    fn new_instance(&self, args: EditorArgs) -> Box<dyn Editor> {
        match self {
            EditorKind::Text => Box::new(TextEditor::new(args)),
            EditorKind::Integer => Box::new(IntegerEditor::new(args)),
            EditorKind::Float => Box::new(FloatEditor::new(args)),
            EditorKind::Date => Box::new(DateEditor::new(args)),
            EditorKind::YesNo => Box::new(YesNoEditor::new(args)),
            EditorKind::Checkbox => Box::new(CheckboxEditor::new(args)),
            EditorKind::PercentComplete => Box::new(PercentCompleteEditor::new(args)),
            EditorKind::LongText => Box::new(LongTextEditor::new(args)),
        }
    }

    fn name(&self) -> &str {
        self.as_str()
    }
}
