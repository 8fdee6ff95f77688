//! Yes/No drop-down editor.

use horizon_grid_core::logging::targets;

use super::input::{SelectInput, SelectOption};
use super::{Editor, EditorArgs, ValidationResult};
use crate::model::{CellValue, Item};

/// Edits a boolean cell with a Yes/No drop-down.
///
/// Serializes to `"yes"` or `"no"`. Applying stores a boolean: strings
/// are `true` only for `"yes"`/`"true"` in any case. The value is always
/// valid.
#[derive(Debug)]
pub struct YesNoEditor {
    args: EditorArgs,
    select: SelectInput,
    default_value: CellValue,
}

impl YesNoEditor {
    /// Mount the drop-down into `args.container` and focus it.
    pub fn new(args: EditorArgs) -> Self {
        let select = SelectInput::mount(
            &args.container,
            vec![SelectOption::new("yes", "Yes"), SelectOption::new("no", "No")],
        );
        select.focus();
        tracing::debug!(target: targets::EDITOR, column = args.column.id(), "yes/no editor created");
        Self {
            args,
            select,
            default_value: CellValue::Null,
        }
    }

    /// The drop-down control.
    pub fn select(&self) -> &SelectInput {
        &self.select
    }

    /// The drop-down control, for simulating user input.
    pub fn select_mut(&mut self) -> &mut SelectInput {
        &mut self.select
    }

    fn is_yes(&self) -> bool {
        self.select.value() == "yes"
    }
}

impl Editor for YesNoEditor {
    fn destroy(&mut self) {
        self.select.unmount();
        tracing::debug!(target: targets::EDITOR, column = self.args.column.id(), "yes/no editor destroyed");
    }

    fn load_value(&mut self, item: &Item) {
        self.default_value = item.get(self.args.column.field()).clone();
        let value = if self.default_value.is_truthy() { "yes" } else { "no" };
        self.select.load_value(value);
    }

    fn serialize_value(&self) -> CellValue {
        CellValue::from(if self.is_yes() { "yes" } else { "no" })
    }

    fn apply_value(&self, item: &mut Item, value: CellValue) {
        item.set(self.args.column.field(), value.as_flag());
    }

    fn is_value_changed(&self) -> bool {
        self.is_yes() != self.default_value.is_truthy()
    }

    fn validate(&mut self) -> ValidationResult {
        ValidationResult::valid()
    }

    fn focus(&mut self) {
        self.select.focus();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::test_support::{args_for, item_with};
    use crate::model::Column;

    fn editor() -> YesNoEditor {
        YesNoEditor::new(args_for(Column::new("done", "done")))
    }

    #[test]
    fn test_load_reflects_truthiness() {
        let mut editor = editor();
        editor.load_value(&item_with("done", true));
        assert_eq!(editor.select().value(), "yes");
        assert!(!editor.is_value_changed());

        editor.load_value(&item_with("done", false));
        assert_eq!(editor.select().value(), "no");
        assert!(!editor.is_value_changed());

        editor.load_value(&Item::new());
        assert_eq!(editor.serialize_value(), CellValue::from("no"));
        assert!(!editor.is_value_changed());
    }

    #[test]
    fn test_selection_change_is_dirty() {
        let mut editor = editor();
        editor.load_value(&item_with("done", false));
        editor.select_mut().select_value("yes");
        assert!(editor.is_value_changed());
        assert_eq!(editor.serialize_value(), CellValue::from("yes"));
        assert!(editor.validate().is_valid());
    }

    #[test]
    fn test_apply_coerces_flag() {
        let editor = editor();
        let mut item = Item::new();
        editor.apply_value(&mut item, CellValue::from("YES"));
        assert_eq!(item.get("done"), &CellValue::Bool(true));
        editor.apply_value(&mut item, CellValue::from("no"));
        assert_eq!(item.get("done"), &CellValue::Bool(false));
    }
}
