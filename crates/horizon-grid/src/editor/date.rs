//! Date editor with a calendar popup.

use chrono::NaiveDate;
use horizon_grid_core::logging::targets;
use horizon_grid_core::{CellBox, ControlKind};

use super::input::{Popup, TextInput};
use super::text::{is_blank_over_null, is_text_changed};
use super::validation::run_column_validator;
use super::{Editor, EditorArgs, ValidationResult};
use crate::model::{CellValue, Item};

/// Edits a cell as a date string.
///
/// The date is typed into a text input or picked from a calendar popup.
/// The popup floats below the cell; while it is open, the host's
/// `show`/`hide`/`position` calls keep it in step with scrolling. The
/// stored value is the text in the configured [`DateFormat`].
///
/// [`DateFormat`]: crate::settings::DateFormat
#[derive(Debug)]
pub struct DateEditor {
    args: EditorArgs,
    input: TextInput,
    calendar: Popup,
    calendar_open: bool,
    default_value: CellValue,
}

impl DateEditor {
    /// Mount the input and a hidden calendar into `args.container` and
    /// focus the input.
    pub fn new(args: EditorArgs) -> Self {
        let input = TextInput::mount(&args.container, ControlKind::TextInput);
        let calendar = Popup::mount(&args.container);
        calendar.hide();
        input.focus();
        tracing::debug!(target: targets::EDITOR, column = args.column.id(), "date editor created");
        Self {
            args,
            input,
            calendar,
            calendar_open: false,
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

    /// The calendar popup.
    pub fn calendar(&self) -> &Popup {
        &self.calendar
    }

    /// Whether the user opened the calendar.
    pub fn is_calendar_open(&self) -> bool {
        self.calendar_open
    }

    /// Open the calendar below the cell.
    pub fn open_calendar(&mut self) {
        self.calendar_open = true;
        self.calendar.show();
        self.position(self.args.position);
    }

    /// Close the calendar.
    pub fn close_calendar(&mut self) {
        self.calendar_open = false;
        self.calendar.hide();
    }

    /// Pick `date` from the calendar: writes it into the input in the
    /// configured format and closes the calendar.
    pub fn pick_date(&mut self, date: NaiveDate) {
        let pattern = self.args.settings.date.format.pattern();
        self.input.set_text(date.format(pattern).to_string());
        self.close_calendar();
    }

    /// Parse the input text with the configured format.
    pub fn date(&self) -> Option<NaiveDate> {
        let pattern = self.args.settings.date.format.pattern();
        NaiveDate::parse_from_str(self.input.text().trim(), pattern).ok()
    }
}

impl Editor for DateEditor {
    fn destroy(&mut self) {
        self.calendar_open = false;
        self.calendar.unmount();
        self.input.unmount();
        tracing::debug!(target: targets::EDITOR, column = self.args.column.id(), "date editor destroyed");
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

    fn show(&mut self) {
        if self.calendar_open {
            self.calendar.show();
        }
    }

    fn hide(&mut self) {
        if self.calendar_open {
            self.calendar.hide();
        }
    }

    fn position(&mut self, cell: CellBox) {
        if !self.calendar_open {
            return;
        }
        let offset = self.args.settings.date.popup_offset;
        self.calendar.place(cell.translated(0.0, offset));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::editor::RegexValidator;
    use crate::editor::test_support::{args_for, item_with};
    use crate::model::Column;
    use crate::settings::{DateFormat, EditorSettings};

    fn editor() -> DateEditor {
        DateEditor::new(args_for(Column::new("start", "start")))
    }

    #[test]
    fn test_round_trip_text() {
        let mut editor = editor();
        editor.load_value(&item_with("start", "01/05/2009"));
        assert!(!editor.is_value_changed());
        assert_eq!(editor.serialize_value(), CellValue::from("01/05/2009"));
        assert_eq!(editor.date(), NaiveDate::from_ymd_opt(2009, 1, 5));
        assert!(editor.validate().is_valid());
    }

    #[test]
    fn test_pick_date_formats_and_closes() {
        let mut editor = editor();
        editor.load_value(&item_with("start", "01/05/2009"));
        editor.open_calendar();
        assert!(editor.calendar().is_visible());

        editor.pick_date(NaiveDate::from_ymd_opt(2010, 12, 31).unwrap());
        assert_eq!(editor.input().text(), "12/31/2010");
        assert!(!editor.is_calendar_open());
        assert!(!editor.calendar().is_visible());
        assert!(editor.is_value_changed());
    }

    #[test]
    fn test_iso_format() {
        let mut settings = EditorSettings::default();
        settings.date.format = DateFormat::Iso;
        let args = args_for(Column::new("start", "start")).with_settings(Arc::new(settings));
        let mut editor = DateEditor::new(args);
        editor.pick_date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(editor.input().text(), "2024-02-29");
        assert_eq!(editor.date(), NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn test_hooks_only_act_while_open() {
        let mut editor = editor();
        editor.show();
        assert!(!editor.calendar().is_visible());
        editor.position(CellBox::new(10.0, 10.0, 80.0, 20.0));
        assert_eq!(editor.calendar().placement(), None);

        editor.open_calendar();
        editor.hide();
        assert!(!editor.calendar().is_visible());
        editor.show();
        assert!(editor.calendar().is_visible());

        editor.position(CellBox::new(10.0, 10.0, 80.0, 20.0));
        assert_eq!(
            editor.calendar().placement(),
            Some(CellBox::new(10.0, 40.0, 80.0, 20.0))
        );
    }

    #[test]
    fn test_column_validator() {
        let column = Column::new("start", "start").with_validator(
            RegexValidator::new(r"^\d{2}/\d{2}/\d{4}$", "Use MM/DD/YYYY").unwrap(),
        );
        let mut editor = DateEditor::new(args_for(column));
        editor.load_value(&Item::new());
        editor.input_mut().set_text("tomorrow");
        assert_eq!(editor.validate().message(), Some("Use MM/DD/YYYY"));
    }

    #[test]
    fn test_destroy_unmounts_calendar() {
        let mut editor = editor();
        let container = editor.input().container().clone();
        assert_eq!(container.mounted_count(), 2);
        editor.destroy();
        assert_eq!(container.mounted_count(), 0);
    }
}
