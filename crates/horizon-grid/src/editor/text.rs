//! Free-text editor.

use horizon_grid_core::ControlKind;
use horizon_grid_core::logging::targets;

use super::input::TextInput;
use super::validation::run_column_validator;
use super::{Editor, EditorArgs, ValidationResult};
use crate::model::{CellValue, Item};

/// Dirty rule shared by every text-backed editor.
///
/// An empty input over a null snapshot is not a change; otherwise the text
/// is compared with the snapshot's display string.
pub(crate) fn is_text_changed(text: &str, default_value: &CellValue) -> bool {
    if is_blank_over_null(text, default_value) {
        return false;
    }
    text != default_value.to_display_string()
}

/// An empty input over a null snapshot: the cell was blank and still is.
///
/// Text-backed editors serialize this state as `Null`.
pub(crate) fn is_blank_over_null(text: &str, default_value: &CellValue) -> bool {
    text.is_empty() && default_value.is_null()
}

/// Edits a cell as free text.
///
/// Serializes to a string and applies the string unchanged.
#[derive(Debug)]
pub struct TextEditor {
    args: EditorArgs,
    input: TextInput,
    default_value: CellValue,
}

impl TextEditor {
    /// Mount a text input into `args.container` and focus it.
    pub fn new(args: EditorArgs) -> Self {
        let input = TextInput::mount(&args.container, ControlKind::TextInput);
        input.focus();
        tracing::debug!(target: targets::EDITOR, column = args.column.id(), "text editor created");
        Self {
            args,
            input,
            default_value: CellValue::Null,
        }
    }

    /// The input control.
    pub fn input(&self) -> &TextInput {
        &self.input
    }

    /// The input control, for simulating user input.
    pub fn input_mut(&mut self) -> &mut TextInput {
        &mut self.input
    }

    /// The value snapshotted by the last `load_value`.
    pub fn default_value(&self) -> &CellValue {
        &self.default_value
    }
}

impl Editor for TextEditor {
    fn destroy(&mut self) {
        self.input.unmount();
        tracing::debug!(target: targets::EDITOR, column = self.args.column.id(), "text editor destroyed");
    }

    fn load_value(&mut self, item: &Item) {
        self.default_value = item.get(self.args.column.field()).clone();
        self.input.load_text(self.default_value.to_display_string());
    }

    fn serialize_value(&self) -> CellValue {
        if is_blank_over_null(self.input.text(), &self.default_value) {
            return CellValue::Null;
        }
        CellValue::String(self.input.text().to_string())
    }

    fn apply_value(&self, item: &mut Item, value: CellValue) {
        item.assign(self.args.column.field(), value);
    }

    fn is_value_changed(&self) -> bool {
        is_text_changed(self.input.text(), &self.default_value)
    }

    fn validate(&mut self) -> ValidationResult {
        run_column_validator(
            self.args.column.validator(),
            self.args.column.id(),
            &CellValue::from(self.input.text()),
        )
    }

    fn focus(&mut self) {
        self.input.focus();
    }
}
