//! Multi-line text editor rendered in a popup.

use horizon_grid_core::logging::targets;
use horizon_grid_core::{CellBox, ControlId, ControlKind};

use super::input::{Key, KeyboardModifiers, Popup, TextInput};
use super::text::{is_blank_over_null, is_text_changed};
use super::validation::run_column_validator;
use super::{Editor, EditorArgs, ValidationResult};
use crate::model::{CellValue, Item};

/// How far the popup overlaps the cell's top-left corner.
const POPUP_INSET: f32 = 5.0;

/// Edits long text in a detached popup holding a text area and Save/Cancel
/// buttons.
///
/// Keyboard handling:
/// - Ctrl+Enter: save (asks the host to commit)
/// - Escape: restore the loaded text and ask the host to cancel
/// - Tab / Shift+Tab: move to the next/previous cell through the grid
#[derive(Debug)]
pub struct LongTextEditor {
    args: EditorArgs,
    wrapper: Popup,
    text_area: TextInput,
    save_button: ControlId,
    cancel_button: ControlId,
    default_value: CellValue,
}

impl LongTextEditor {
    /// Mount the popup into `args.container`, place it over the cell and
    /// focus the text area.
    pub fn new(args: EditorArgs) -> Self {
        let wrapper = Popup::mount(&args.container);
        let text_area = TextInput::mount(&args.container, ControlKind::TextArea);
        let save_button = args.container.mount(ControlKind::Button);
        let cancel_button = args.container.mount(ControlKind::Button);
        let position = args.position;

        let mut editor = Self {
            args,
            wrapper,
            text_area,
            save_button,
            cancel_button,
            default_value: CellValue::Null,
        };
        editor.position(position);
        editor.text_area.focus();
        tracing::debug!(target: targets::EDITOR, column = editor.args.column.id(), "long text editor created");
        editor
    }

    /// The text area.
    pub fn text_area(&self) -> &TextInput {
        &self.text_area
    }

    /// The text area, for simulating user input.
    pub fn text_area_mut(&mut self) -> &mut TextInput {
        &mut self.text_area
    }

    /// The popup wrapper.
    pub fn wrapper(&self) -> &Popup {
        &self.wrapper
    }

    /// The Save button control.
    pub fn save_button(&self) -> ControlId {
        self.save_button
    }

    /// The Cancel button control.
    pub fn cancel_button(&self) -> ControlId {
        self.cancel_button
    }

    /// Ask the host to commit (the Save button).
    pub fn save(&self) {
        tracing::debug!(target: targets::EDITOR, column = self.args.column.id(), "long text save requested");
        self.args.commit_changes();
    }

    /// Restore the loaded text and ask the host to cancel (the Cancel button).
    pub fn cancel(&mut self) {
        self.text_area.set_text(self.default_value.to_display_string());
        tracing::debug!(target: targets::EDITOR, column = self.args.column.id(), "long text cancel requested");
        self.args.cancel_changes();
    }

    /// Handle a key press in the text area.
    ///
    /// Returns `true` if the key was consumed.
    pub fn handle_key(&mut self, key: Key, modifiers: KeyboardModifiers) -> bool {
        match key {
            Key::Enter if modifiers.control => {
                self.save();
                true
            }
            Key::Enter => {
                self.text_area.insert("\n");
                true
            }
            Key::Escape => {
                self.cancel();
                true
            }
            Key::Tab => {
                if let Some(grid) = &self.args.grid {
                    if modifiers.shift {
                        grid.navigate_prev();
                    } else {
                        grid.navigate_next();
                    }
                }
                true
            }
            Key::Backspace => {
                self.text_area.backspace();
                true
            }
            Key::Char(c) => {
                let mut buf = [0u8; 4];
                self.text_area.insert(c.encode_utf8(&mut buf));
                true
            }
        }
    }
}

impl Editor for LongTextEditor {
    fn destroy(&mut self) {
        self.args.container.unmount(self.cancel_button);
        self.args.container.unmount(self.save_button);
        self.text_area.unmount();
        self.wrapper.unmount();
        tracing::debug!(target: targets::EDITOR, column = self.args.column.id(), "long text editor destroyed");
    }

    fn load_value(&mut self, item: &Item) {
        self.default_value = item.get(self.args.column.field()).clone();
        self.text_area.load_text(self.default_value.to_display_string());
    }

    fn serialize_value(&self) -> CellValue {
        if is_blank_over_null(self.text_area.text(), &self.default_value) {
            return CellValue::Null;
        }
        CellValue::String(self.text_area.text().to_string())
    }

    fn apply_value(&self, item: &mut Item, value: CellValue) {
        item.assign(self.args.column.field(), value);
    }

    fn is_value_changed(&self) -> bool {
        is_text_changed(self.text_area.text(), &self.default_value)
    }

    fn validate(&mut self) -> ValidationResult {
        run_column_validator(
            self.args.column.validator(),
            self.args.column.id(),
            &CellValue::from(self.text_area.text()),
        )
    }

    fn focus(&mut self) {
        self.text_area.focus();
    }

    fn show(&mut self) {
        self.wrapper.show();
    }

    fn hide(&mut self) {
        self.wrapper.hide();
    }

    fn position(&mut self, cell: CellBox) {
        let size = &self.args.settings.long_text;
        self.wrapper.place(CellBox::new(
            cell.left - POPUP_INSET,
            cell.top - POPUP_INSET,
            size.width,
            size.height,
        ));
    }

    fn is_detached(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::editor::GridNavigation;
    use crate::editor::test_support::{args_for, item_with};
    use crate::model::Column;

    #[derive(Default)]
    struct CountingGrid {
        next: AtomicUsize,
        prev: AtomicUsize,
    }

    impl GridNavigation for CountingGrid {
        fn navigate_next(&self) -> bool {
            self.next.fetch_add(1, Ordering::SeqCst);
            true
        }

        fn navigate_prev(&self) -> bool {
            self.prev.fetch_add(1, Ordering::SeqCst);
            true
        }
    }

    fn column() -> Column {
        Column::new("desc", "description")
    }

    #[test]
    fn test_popup_placed_over_cell() {
        let editor = LongTextEditor::new(args_for(column()));
        // args_for places the cell at (10, 20).
        assert_eq!(
            editor.wrapper().placement(),
            Some(CellBox::new(5.0, 15.0, 250.0, 80.0))
        );
        assert!(editor.is_detached());
        assert!(editor.text_area().has_focus());
        assert_eq!(editor.text_area().container().mounted_count(), 4);
    }

    #[test]
    fn test_show_hide_position() {
        let mut editor = LongTextEditor::new(args_for(column()));
        editor.hide();
        assert!(!editor.wrapper().is_visible());
        editor.show();
        assert!(editor.wrapper().is_visible());
        editor.position(CellBox::new(100.0, 200.0, 50.0, 20.0));
        assert_eq!(
            editor.wrapper().placement(),
            Some(CellBox::new(95.0, 195.0, 250.0, 80.0))
        );
    }

    #[test]
    fn test_ctrl_enter_commits() {
        let commits = Arc::new(AtomicUsize::new(0));
        let counter = commits.clone();
        let args = args_for(column()).on_commit(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let mut editor = LongTextEditor::new(args);
        editor.load_value(&item_with("description", "line one"));

        assert!(editor.handle_key(Key::Enter, KeyboardModifiers::NONE));
        assert_eq!(commits.load(Ordering::SeqCst), 0);
        assert!(editor.handle_key(Key::Enter, KeyboardModifiers::CTRL));
        assert_eq!(commits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_escape_restores_and_cancels() {
        let cancels = Arc::new(AtomicUsize::new(0));
        let counter = cancels.clone();
        let args = args_for(column()).on_cancel(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let mut editor = LongTextEditor::new(args);
        editor.load_value(&item_with("description", "keep me"));

        editor.handle_key(Key::Char('x'), KeyboardModifiers::NONE);
        assert_eq!(editor.text_area().text(), "x");
        assert!(editor.is_value_changed());

        editor.handle_key(Key::Escape, KeyboardModifiers::NONE);
        assert_eq!(editor.text_area().text(), "keep me");
        assert!(!editor.is_value_changed());
        assert_eq!(cancels.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_tab_navigates_grid() {
        let grid = Arc::new(CountingGrid::default());
        let args = args_for(column()).with_grid(grid.clone());
        let mut editor = LongTextEditor::new(args);

        editor.handle_key(Key::Tab, KeyboardModifiers::NONE);
        editor.handle_key(Key::Tab, KeyboardModifiers::SHIFT);
        editor.handle_key(Key::Tab, KeyboardModifiers::NONE);
        assert_eq!(grid.next.load(Ordering::SeqCst), 2);
        assert_eq!(grid.prev.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_multiline_round_trip() {
        let mut editor = LongTextEditor::new(args_for(column()));
        let mut item = item_with("description", "a\nb");
        editor.load_value(&item);
        assert!(!editor.is_value_changed());
        editor.apply_value(&mut item, editor.serialize_value());
        assert_eq!(item.get("description"), &CellValue::from("a\nb"));
    }

    #[test]
    fn test_destroy_unmounts_everything() {
        let mut editor = LongTextEditor::new(args_for(column()));
        let container = editor.text_area().container().clone();
        editor.destroy();
        assert_eq!(container.mounted_count(), 0);
    }
}
