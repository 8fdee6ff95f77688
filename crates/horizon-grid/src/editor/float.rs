//! Decimal-number editor.

use horizon_grid_core::ControlKind;
use horizon_grid_core::logging::targets;

use super::input::TextInput;
use super::numeric::{is_number_text, parse_float_prefix, round_to};
use super::text::{is_blank_over_null, is_text_changed};
use super::validation::run_column_validator;
use super::{Editor, EditorArgs, ValidationResult};
use crate::model::{CellValue, Item};

/// Edits a cell as a decimal number.
///
/// With `[float] decimal_places` set, the loaded value is shown with that
/// many places and serialized values are rounded to it.
#[derive(Debug)]
pub struct FloatEditor {
    args: EditorArgs,
    input: TextInput,
    default_value: CellValue,
}

impl FloatEditor {
    /// Mount a text input into `args.container` and focus it.
    pub fn new(args: EditorArgs) -> Self {
        let input = TextInput::mount(&args.container, ControlKind::TextInput);
        input.focus();
        tracing::debug!(target: targets::EDITOR, column = args.column.id(), "float editor created");
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

    fn decimal_places(&self) -> Option<u32> {
        self.args.settings.float.decimal_places
    }
}

impl Editor for FloatEditor {
    fn destroy(&mut self) {
        self.input.unmount();
        tracing::debug!(target: targets::EDITOR, column = self.args.column.id(), "float editor destroyed");
    }

    fn load_value(&mut self, item: &Item) {
        let value = item.get(self.args.column.field());
        // The snapshot is the text shown, so a fixed-places rendering of an
        // untouched value does not read as a change.
        self.default_value = match (self.decimal_places(), value.as_float()) {
            (Some(places), Some(number)) => {
                CellValue::String(format!("{:.*}", places as usize, number))
            }
            _ => value.clone(),
        };
        self.input.load_text(self.default_value.to_display_string());
    }

    fn serialize_value(&self) -> CellValue {
        if is_blank_over_null(self.input.text(), &self.default_value) {
            return CellValue::Null;
        }
        let number = parse_float_prefix(self.input.text()).unwrap_or(0.0);
        match self.decimal_places() {
            Some(places) => CellValue::Float(round_to(number, places)),
            None => CellValue::Float(number),
        }
    }

    fn apply_value(&self, item: &mut Item, value: CellValue) {
        let number = match &value {
            CellValue::Null => {
                item.assign(self.args.column.field(), CellValue::Null);
                return;
            }
            CellValue::Float(f) => *f,
            CellValue::Int(n) => *n as f64,
            other => parse_float_prefix(&other.to_display_string()).unwrap_or(0.0),
        };
        item.set(self.args.column.field(), number);
    }

    fn is_value_changed(&self) -> bool {
        is_text_changed(self.input.text(), &self.default_value)
    }

    fn validate(&mut self) -> ValidationResult {
        let text = self.input.text();
        if !text.trim().is_empty() && !is_number_text(text) {
            tracing::debug!(target: targets::VALIDATION, column = self.args.column.id(), text, "not a number");
            return ValidationResult::invalid(self.args.settings.messages.invalid_number.clone());
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
    use std::sync::Arc;

    use super::*;
    use crate::editor::test_support::{args_for, item_with};
    use crate::model::Column;
    use crate::settings::EditorSettings;

    fn editor_with_places(places: Option<u32>) -> FloatEditor {
        let mut settings = EditorSettings::default();
        settings.float.decimal_places = places;
        let args = args_for(Column::new("cost", "cost")).with_settings(Arc::new(settings));
        FloatEditor::new(args)
    }

    #[test]
    fn test_load_keeps_precision_by_default() {
        let mut editor = editor_with_places(None);
        editor.load_value(&item_with("cost", 2.75));
        assert_eq!(editor.input().text(), "2.75");
        assert!(!editor.is_value_changed());
        assert_eq!(editor.serialize_value(), CellValue::Float(2.75));
    }

    #[test]
    fn test_fixed_places_format_and_round() {
        let mut editor = editor_with_places(Some(2));
        editor.load_value(&item_with("cost", 3.5));
        assert_eq!(editor.input().text(), "3.50");
        assert!(!editor.is_value_changed());

        editor.input_mut().set_text("1.23456");
        assert_eq!(editor.serialize_value(), CellValue::Float(1.23));
        assert!(editor.is_value_changed());
    }

    #[test]
    fn test_validate_number_text() {
        let mut editor = editor_with_places(None);
        editor.load_value(&Item::new());
        editor.input_mut().set_text("1.5x");
        assert_eq!(editor.validate().message(), Some("Please enter a valid number"));
        editor.input_mut().set_text("-0.25");
        assert!(editor.validate().is_valid());
    }

    #[test]
    fn test_apply_coerces_to_float() {
        let editor = editor_with_places(None);
        let mut item = Item::new();
        editor.apply_value(&mut item, CellValue::Int(4));
        assert_eq!(item.get("cost"), &CellValue::Float(4.0));
        editor.apply_value(&mut item, CellValue::from("2.5"));
        assert_eq!(item.get("cost"), &CellValue::Float(2.5));
    }
}
