//! Checkbox editor.

use horizon_grid_core::logging::targets;

use super::input::CheckInput;
use super::{Editor, EditorArgs, ValidationResult};
use crate::model::{CellValue, Item};
use crate::settings::CheckboxDirtyCheck;

/// Edits a boolean cell with a checkbox.
///
/// Serializes to `"true"` or `"false"`; applying coerces `"true"`/`"yes"`
/// (any case) to `true` and any other string to `false`. The value is
/// always valid.
///
/// How changes are detected depends on `[checkbox] dirty_check`; see
/// [`CheckboxDirtyCheck`].
#[derive(Debug)]
pub struct CheckboxEditor {
    args: EditorArgs,
    check: CheckInput,
    default_value: CellValue,
}

impl CheckboxEditor {
    /// Mount the checkbox into `args.container` and focus it.
    pub fn new(args: EditorArgs) -> Self {
        let check = CheckInput::mount(&args.container);
        check.focus();
        tracing::debug!(target: targets::EDITOR, column = args.column.id(), "checkbox editor created");
        Self {
            args,
            check,
            default_value: CellValue::Null,
        }
    }

    /// The checkbox control.
    pub fn check(&self) -> &CheckInput {
        &self.check
    }

    /// The checkbox control, for simulating user input.
    pub fn check_mut(&mut self) -> &mut CheckInput {
        &mut self.check
    }

    /// The boolean snapshotted by the last `load_value`.
    pub fn default_value(&self) -> &CellValue {
        &self.default_value
    }
}

impl Editor for CheckboxEditor {
    fn destroy(&mut self) {
        self.check.unmount();
        tracing::debug!(target: targets::EDITOR, column = self.args.column.id(), "checkbox editor destroyed");
    }

    fn load_value(&mut self, item: &Item) {
        let checked = item.get(self.args.column.field()).is_truthy();
        self.default_value = CellValue::Bool(checked);
        self.check.load_checked(checked);
    }

    fn serialize_value(&self) -> CellValue {
        CellValue::String(self.check.is_checked().to_string())
    }

    fn apply_value(&self, item: &mut Item, value: CellValue) {
        item.set(self.args.column.field(), value.as_flag());
    }

    fn is_value_changed(&self) -> bool {
        match self.args.settings.checkbox.dirty_check {
            CheckboxDirtyCheck::CheckedState => {
                CellValue::Bool(self.check.is_checked()) != self.default_value
            }
            CheckboxDirtyCheck::SerializedAgainstSnapshot => {
                self.serialize_value() != self.default_value
            }
        }
    }

    fn validate(&mut self) -> ValidationResult {
        ValidationResult::valid()
    }

    fn focus(&mut self) {
        self.check.focus();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::editor::test_support::{args_for, item_with};
    use crate::model::Column;
    use crate::settings::EditorSettings;

    fn editor_with(dirty_check: CheckboxDirtyCheck) -> CheckboxEditor {
        let mut settings = EditorSettings::default();
        settings.checkbox.dirty_check = dirty_check;
        let args = args_for(Column::new("done", "done")).with_settings(Arc::new(settings));
        CheckboxEditor::new(args)
    }

    #[test]
    fn test_load_serialize_apply() {
        let mut editor = editor_with(CheckboxDirtyCheck::CheckedState);
        editor.load_value(&item_with("done", true));
        assert!(editor.check().is_checked());
        assert_eq!(editor.serialize_value(), CellValue::from("true"));

        let mut item = item_with("done", true);
        editor.apply_value(&mut item, CellValue::from("false"));
        assert_eq!(item.get("done"), &CellValue::Bool(false));
        editor.apply_value(&mut item, CellValue::from("Yes"));
        assert_eq!(item.get("done"), &CellValue::Bool(true));
    }

    #[test]
    fn test_snapshot_is_boolean() {
        let mut editor = editor_with(CheckboxDirtyCheck::CheckedState);
        editor.load_value(&item_with("done", "x"));
        assert_eq!(editor.default_value(), &CellValue::Bool(true));
        editor.load_value(&Item::new());
        assert_eq!(editor.default_value(), &CellValue::Bool(false));
        assert!(!editor.check().is_checked());
    }

    #[test]
    fn test_checked_state_dirty_check_tracks_toggles() {
        let mut editor = editor_with(CheckboxDirtyCheck::CheckedState);
        editor.load_value(&item_with("done", true));
        assert!(!editor.is_value_changed());

        editor.check_mut().toggle();
        assert!(editor.is_value_changed());
        editor.check_mut().toggle();
        assert!(!editor.is_value_changed());
    }

    #[test]
    fn test_serialized_against_snapshot_always_reports_change() {
        // The serialized string never equals the boolean snapshot.
        let mut editor = editor_with(CheckboxDirtyCheck::SerializedAgainstSnapshot);
        editor.load_value(&item_with("done", true));
        assert!(editor.is_value_changed());

        editor.load_value(&item_with("done", false));
        assert!(editor.is_value_changed());
        editor.check_mut().toggle();
        assert!(editor.is_value_changed());
    }

    #[test]
    fn test_always_valid() {
        let mut editor = editor_with(CheckboxDirtyCheck::CheckedState);
        editor.load_value(&item_with("done", false));
        editor.check_mut().toggle();
        assert!(editor.validate().is_valid());
    }
}
