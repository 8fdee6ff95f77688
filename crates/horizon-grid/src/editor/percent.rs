//! Percent-complete editor.

use horizon_grid_core::ControlKind;
use horizon_grid_core::logging::targets;

use super::input::TextInput;
use super::numeric::parse_int_prefix;
use super::text::{is_blank_over_null, is_text_changed};
use super::validation::run_column_validator;
use super::{Editor, EditorArgs, ValidationResult};
use crate::model::{CellValue, Item};

/// Quick-pick values offered next to the percent input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PercentPreset {
    NotStarted,
    InProgress,
    Complete,
}

impl PercentPreset {
    /// The percentage this preset stands for.
    pub fn value(&self) -> i64 {
        match self {
            PercentPreset::NotStarted => 0,
            PercentPreset::InProgress => 50,
            PercentPreset::Complete => 100,
        }
    }
}

/// Edits a 0 to 100 percentage.
///
/// Out-of-range or non-numeric text is reported by `validate`; nothing is
/// clamped behind the user's back. The presets and [`step`](Self::step)
/// stay inside the range.
#[derive(Debug)]
pub struct PercentCompleteEditor {
    args: EditorArgs,
    input: TextInput,
    default_value: CellValue,
}

impl PercentCompleteEditor {
    /// Mount a text input into `args.container` and focus it.
    pub fn new(args: EditorArgs) -> Self {
        let input = TextInput::mount(&args.container, ControlKind::TextInput);
        input.focus();
        tracing::debug!(target: targets::EDITOR, column = args.column.id(), "percent editor created");
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

    /// Replace the text with a preset value.
    pub fn apply_preset(&mut self, preset: PercentPreset) {
        self.input.set_text(preset.value().to_string());
    }

    /// Move the value by `delta`, keeping it within 0..=100.
    pub fn step(&mut self, delta: i64) {
        let current = parse_int_prefix(self.input.text()).unwrap_or(0);
        let next = current.saturating_add(delta).clamp(0, 100);
        self.input.set_text(next.to_string());
    }
}

impl Editor for PercentCompleteEditor {
    fn destroy(&mut self) {
        self.input.unmount();
        tracing::debug!(target: targets::EDITOR, column = self.args.column.id(), "percent editor destroyed");
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
        let messages = &self.args.settings.messages;
        let Some(percent) = parse_int_prefix(self.input.text()) else {
            return ValidationResult::invalid(messages.invalid_percent.clone());
        };
        if !(0..=100).contains(&percent) {
            tracing::debug!(target: targets::VALIDATION, column = self.args.column.id(), percent, "percent out of range");
            return ValidationResult::invalid(messages.percent_out_of_range.clone());
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::test_support::{args_for, item_with};
    use crate::model::Column;

    fn editor() -> PercentCompleteEditor {
        PercentCompleteEditor::new(args_for(Column::new("pct", "percentComplete")))
    }

    #[test]
    fn test_round_trip() {
        let mut editor = editor();
        editor.load_value(&item_with("percentComplete", 30));
        assert!(!editor.is_value_changed());
        assert_eq!(editor.serialize_value(), CellValue::Int(30));
        assert!(editor.validate().is_valid());
    }

    #[test]
    fn test_out_of_range_is_reported_not_clamped() {
        let mut editor = editor();
        editor.load_value(&item_with("percentComplete", 30));
        editor.input_mut().set_text("150");
        let result = editor.validate();
        assert_eq!(
            result.message(),
            Some("Please enter a percentage between 0 and 100")
        );
        assert_eq!(editor.serialize_value(), CellValue::Int(150));

        editor.input_mut().set_text("-1");
        assert!(!editor.validate().is_valid());
    }

    #[test]
    fn test_non_numeric_is_invalid() {
        let mut editor = editor();
        editor.load_value(&Item::new());
        editor.input_mut().set_text("lots");
        assert_eq!(
            editor.validate().message(),
            Some("Please enter a valid positive number")
        );
        editor.input_mut().set_text("");
        assert!(!editor.validate().is_valid());
        assert_eq!(editor.serialize_value(), CellValue::Null);
    }

    #[test]
    fn test_presets_and_step() {
        let mut editor = editor();
        editor.load_value(&item_with("percentComplete", 40));

        editor.apply_preset(PercentPreset::Complete);
        assert_eq!(editor.input().text(), "100");
        editor.step(10);
        assert_eq!(editor.input().text(), "100");
        editor.step(-25);
        assert_eq!(editor.input().text(), "75");

        editor.apply_preset(PercentPreset::NotStarted);
        editor.step(-5);
        assert_eq!(editor.input().text(), "0");
        assert!(editor.is_value_changed());
    }

    #[test]
    fn test_apply_coerces_to_integer() {
        let editor = editor();
        let mut item = Item::new();
        editor.apply_value(&mut item, CellValue::from("55"));
        assert_eq!(item.get("percentComplete"), &CellValue::Int(55));
    }
}
