//! Whole-number editor.

use horizon_grid_core::ControlKind;
use horizon_grid_core::logging::targets;

use super::input::TextInput;
use super::numeric::{is_integer_text, parse_int_prefix};
use super::text::{is_blank_over_null, is_text_changed};
use super::validation::run_column_validator;
use super::{Editor, EditorArgs, ValidationResult};
use crate::model::{CellValue, Item};

/// Edits a cell as an integer.
///
/// The text must be blank or a whole number to validate; the column
/// validator, if any, runs afterwards on the raw text. Serialization is
/// lenient: the leading integer of the text, or 0 when there is none.
#[derive(Debug)]
pub struct IntegerEditor {
    args: EditorArgs,
    input: TextInput,
    default_value: CellValue,
}

impl IntegerEditor {
    /// Mount a text input into `args.container` and focus it.
    pub fn new(args: EditorArgs) -> Self {
        let input = TextInput::mount(&args.container, ControlKind::TextInput);
        input.focus();
        tracing::debug!(target: targets::EDITOR, column = args.column.id(), "integer editor created");
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
}

impl Editor for IntegerEditor {
    fn destroy(&mut self) {
        self.input.unmount();
        tracing::debug!(target: targets::EDITOR, column = self.args.column.id(), "integer editor destroyed");
    }

    fn load_value(&mut self, item: &Item) {
        self.default_value = item.get(self.args.column.field()).clone();
        self.input.load_text(self.default_value.to_display_string());
    }

    fn serialize_value(&self) -> CellValue {
        if is_blank_over_null(self.input.text(), &self.default_value) {
            return CellValue::Null;
        }
        CellValue::Int(parse_int_prefix(self.input.text()).unwrap_or(0))
    }

    fn apply_value(&self, item: &mut Item, value: CellValue) {
        let coerced = match value {
            CellValue::Null => {
                item.assign(self.args.column.field(), CellValue::Null);
                return;
            }
            CellValue::Int(n) => n,
            CellValue::Float(f) => f.trunc() as i64,
            other => parse_int_prefix(&other.to_display_string()).unwrap_or(0),
        };
        item.set(self.args.column.field(), coerced);
    }

    fn is_value_changed(&self) -> bool {
        is_text_changed(self.input.text(), &self.default_value)
    }

    fn validate(&mut self) -> ValidationResult {
        let text = self.input.text();
        if !text.trim().is_empty() && !is_integer_text(text) {
            tracing::debug!(target: targets::VALIDATION, column = self.args.column.id(), text, "not an integer");
            return ValidationResult::invalid(self.args.settings.messages.invalid_integer.clone());
        }
        run_column_validator(
            self.args.column.validator(),
            self.args.column.id(),
            &CellValue::from(text),
        )
    }

    fn focus(&mut self) {
        self.input.focus();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::IntRangeValidator;
    use crate::editor::test_support::{args_for, item_with};
    use crate::model::Column;

    fn editor() -> IntegerEditor {
        IntegerEditor::new(args_for(Column::new("qty", "qty")))
    }

    #[test]
    fn test_load_serialize_round_trip() {
        let mut editor = editor();
        editor.load_value(&item_with("qty", "5"));
        assert!(!editor.is_value_changed());
        assert_eq!(editor.serialize_value(), CellValue::Int(5));

        editor.load_value(&item_with("qty", 5));
        assert_eq!(editor.input().text(), "5");
        assert!(!editor.is_value_changed());
    }

    #[test]
    fn test_validate_integer_text() {
        let mut editor = editor();
        editor.load_value(&Item::new());

        editor.input_mut().set_text("12a");
        let result = editor.validate();
        assert!(!result.is_valid());
        assert_eq!(result.message(), Some("Please enter a valid integer"));

        editor.input_mut().set_text("42");
        assert!(editor.validate().is_valid());

        editor.input_mut().set_text("");
        assert!(editor.validate().is_valid());
    }

    #[test]
    fn test_serialize_is_lenient() {
        let mut editor = editor();
        editor.input_mut().set_text("12a");
        assert_eq!(editor.serialize_value(), CellValue::Int(12));
        editor.input_mut().set_text("abc");
        assert_eq!(editor.serialize_value(), CellValue::Int(0));
        editor.input_mut().set_text("");
        assert_eq!(editor.serialize_value(), CellValue::Null);
    }

    #[test]
    fn test_cleared_value_serializes_as_zero() {
        let mut editor = editor();
        editor.load_value(&item_with("qty", 4));
        editor.input_mut().set_text("");
        assert_eq!(editor.serialize_value(), CellValue::Int(0));
    }

    #[test]
    fn test_blank_cell_round_trip_leaves_item_alone() {
        let mut editor = editor();
        let mut item = Item::new();
        editor.load_value(&item);
        assert!(!editor.is_value_changed());
        assert!(editor.validate().is_valid());
        editor.apply_value(&mut item, editor.serialize_value());
        assert!(!item.contains("qty"));
    }

    #[test]
    fn test_apply_coerces_to_integer() {
        let editor = editor();
        let mut item = Item::new();
        editor.apply_value(&mut item, CellValue::from("17"));
        assert_eq!(item.get("qty"), &CellValue::Int(17));
        editor.apply_value(&mut item, CellValue::Float(3.9));
        assert_eq!(item.get("qty"), &CellValue::Int(3));
    }

    #[test]
    fn test_column_validator_runs_after_self_check() {
        let column = Column::new("qty", "qty").with_validator(IntRangeValidator::new(1, 10));
        let mut editor = IntegerEditor::new(args_for(column));
        editor.load_value(&item_with("qty", 5));
        assert!(editor.validate().is_valid());

        editor.input_mut().set_text("11");
        let result = editor.validate();
        assert_eq!(
            result.message(),
            Some("Please enter a whole number between 1 and 10")
        );

        editor.input_mut().set_text("x");
        assert_eq!(editor.validate().message(), Some("Please enter a valid integer"));
    }
}
