//! Headless input controls used by the editors.
//!
//! Each control is mounted into a host [`Container`] and tracks its own
//! state (text, checked state, selected option). Rendering belongs to the
//! host; the controls only record what a renderer would need and announce
//! changes through [`Signal`]s.

use horizon_grid_core::{CellBox, Container, ControlId, ControlKind, Signal};

/// Keyboard modifiers held during a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// Shift.
    pub shift: bool,
    /// Control (Command on macOS).
    pub control: bool,
    /// Alt/Option.
    pub alt: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
    };

    /// Just Control.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
    };
}

/// Keys the editors react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Escape,
    Tab,
    Backspace,
    /// A printable character.
    Char(char),
}

// =========================================================================
// TextInput
// =========================================================================

/// A single-line text input or multi-line text area.
pub struct TextInput {
    container: Container,
    control: ControlId,

    /// Current contents.
    text: String,

    /// Cursor byte offset.
    cursor_pos: usize,

    /// Other end of the selection; the cursor is the moving end.
    selection_anchor: Option<usize>,

    /// Fires with the new text after every edit.
    text_changed: Signal<String>,
}

impl TextInput {
    /// Mount a new, empty text control into `container`.
    ///
    /// `kind` is normally [`ControlKind::TextInput`] or
    /// [`ControlKind::TextArea`].
    pub fn mount(container: &Container, kind: ControlKind) -> Self {
        let control = container.mount(kind);
        Self {
            container: container.clone(),
            control,
            text: String::new(),
            cursor_pos: 0,
            selection_anchor: None,
            text_changed: Signal::new(),
        }
    }

    /// Get the current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Set the text content.
    ///
    /// Drops the selection and parks the cursor at the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let new_text = text.into();
        if self.text != new_text {
            self.text = new_text.clone();
            self.cursor_pos = self.text.len();
            self.selection_anchor = None;
            self.text_changed.emit(new_text);
        }
    }

    /// Replace the text without emitting `text_changed`, then select all of
    /// it so the next keystroke overwrites the loaded value.
    pub fn load_text(&mut self, text: impl Into<String>) {
        self.text_changed.set_blocked(true);
        self.set_text(text);
        self.text_changed.set_blocked(false);
        self.select_all();
    }

    /// Clear all text.
    pub fn clear(&mut self) {
        self.set_text("");
    }

    /// Type `text` at the cursor, replacing the selection if there is one.
    pub fn insert(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some((start, end)) = self.selection_range() {
            self.text.replace_range(start..end, "");
            self.cursor_pos = start;
            self.selection_anchor = None;
        }
        self.text.insert_str(self.cursor_pos, text);
        self.cursor_pos += text.len();
        self.text_changed.emit(self.text.clone());
    }

    /// Delete the selection, or the character before the cursor.
    pub fn backspace(&mut self) {
        if let Some((start, end)) = self.selection_range() {
            if start != end {
                self.text.replace_range(start..end, "");
                self.cursor_pos = start;
                self.selection_anchor = None;
                self.text_changed.emit(self.text.clone());
                return;
            }
        }
        let Some(prev) = self.text[..self.cursor_pos].chars().next_back() else {
            return;
        };
        let prev_pos = self.cursor_pos - prev.len_utf8();
        self.text.replace_range(prev_pos..self.cursor_pos, "");
        self.cursor_pos = prev_pos;
        self.selection_anchor = None;
        self.text_changed.emit(self.text.clone());
    }

    /// Cursor byte offset.
    pub fn cursor_position(&self) -> usize {
        self.cursor_pos
    }

    /// Whether some text is selected.
    pub fn has_selection(&self) -> bool {
        self.selection_anchor.is_some() && self.selection_anchor != Some(self.cursor_pos)
    }

    /// The selected slice, or `""`.
    pub fn selected_text(&self) -> &str {
        match self.selection_range() {
            Some((start, end)) => &self.text[start..end],
            None => "",
        }
    }

    /// Selected byte range, ordered.
    pub fn selection_range(&self) -> Option<(usize, usize)> {
        self.selection_anchor.map(|anchor| {
            let start = anchor.min(self.cursor_pos);
            let end = anchor.max(self.cursor_pos);
            (start, end)
        })
    }

    /// Select all text.
    pub fn select_all(&mut self) {
        if !self.text.is_empty() {
            self.selection_anchor = Some(0);
            self.cursor_pos = self.text.len();
        }
    }

    /// Fires with the new text after every edit.
    pub fn text_changed(&self) -> &Signal<String> {
        &self.text_changed
    }

    /// The mounted control id.
    pub fn control(&self) -> ControlId {
        self.control
    }

    /// The container the control is mounted in.
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Give the control keyboard focus.
    pub fn focus(&self) -> bool {
        self.container.focus_control(self.control)
    }

    /// Returns `true` if the control has keyboard focus.
    pub fn has_focus(&self) -> bool {
        self.container.control_has_focus(self.control)
    }

    /// Remove the control from its container.
    pub fn unmount(&self) -> bool {
        self.container.unmount(self.control)
    }
}

impl std::fmt::Debug for TextInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextInput")
            .field("container", &self.container.id())
            .field("text", &self.text)
            .field("cursor_pos", &self.cursor_pos)
            .finish()
    }
}

// =========================================================================
// CheckInput
// =========================================================================

/// A checkbox control.
pub struct CheckInput {
    container: Container,
    control: ControlId,
    checked: bool,
    toggled: Signal<bool>,
}

impl CheckInput {
    /// Mount a new, unchecked checkbox into `container`.
    pub fn mount(container: &Container) -> Self {
        Self {
            control: container.mount(ControlKind::Checkbox),
            container: container.clone(),
            checked: false,
            toggled: Signal::new(),
        }
    }

    /// Whether the box is checked.
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Set the checked state, emitting `toggled` if it changed.
    pub fn set_checked(&mut self, checked: bool) {
        if self.checked != checked {
            self.checked = checked;
            self.toggled.emit(checked);
        }
    }

    /// Set the checked state without emitting `toggled`.
    pub fn load_checked(&mut self, checked: bool) {
        self.toggled.set_blocked(true);
        self.set_checked(checked);
        self.toggled.set_blocked(false);
    }

    /// Flip the checked state (a click).
    pub fn toggle(&mut self) {
        self.set_checked(!self.checked);
    }

    /// Signal emitted when the checked state changes.
    pub fn toggled(&self) -> &Signal<bool> {
        &self.toggled
    }

    /// The mounted control id.
    pub fn control(&self) -> ControlId {
        self.control
    }

    /// Give the control keyboard focus.
    pub fn focus(&self) -> bool {
        self.container.focus_control(self.control)
    }

    /// Returns `true` if the control has keyboard focus.
    pub fn has_focus(&self) -> bool {
        self.container.control_has_focus(self.control)
    }

    /// Remove the control from its container.
    pub fn unmount(&self) -> bool {
        self.container.unmount(self.control)
    }
}

impl std::fmt::Debug for CheckInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckInput")
            .field("container", &self.container.id())
            .field("checked", &self.checked)
            .finish()
    }
}

// =========================================================================
// SelectInput
// =========================================================================

/// One entry of a [`SelectInput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Submitted value.
    pub value: String,
    /// Displayed label.
    pub label: String,
}

impl SelectOption {
    /// Create an option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A drop-down selection control. The first option is selected initially.
pub struct SelectInput {
    container: Container,
    control: ControlId,
    options: Vec<SelectOption>,
    current: usize,
    current_changed: Signal<String>,
}

impl SelectInput {
    /// Mount a select control offering `options` into `container`.
    pub fn mount(container: &Container, options: Vec<SelectOption>) -> Self {
        Self {
            control: container.mount(ControlKind::Select),
            container: container.clone(),
            options,
            current: 0,
            current_changed: Signal::new(),
        }
    }

    /// The available options.
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// The selected option's value, or `""` when there are no options.
    pub fn value(&self) -> &str {
        self.options
            .get(self.current)
            .map(|o| o.value.as_str())
            .unwrap_or_default()
    }

    /// Index of the selected option.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Select the option with the given value.
    ///
    /// Returns `false` if no option has that value.
    pub fn select_value(&mut self, value: &str) -> bool {
        match self.options.iter().position(|o| o.value == value) {
            Some(index) => {
                if index != self.current {
                    self.current = index;
                    self.current_changed.emit(value.to_string());
                }
                true
            }
            None => false,
        }
    }

    /// Select by value without emitting `current_changed`.
    pub fn load_value(&mut self, value: &str) -> bool {
        self.current_changed.set_blocked(true);
        let found = self.select_value(value);
        self.current_changed.set_blocked(false);
        found
    }

    /// Signal emitted with the new value when the selection changes.
    pub fn current_changed(&self) -> &Signal<String> {
        &self.current_changed
    }

    /// The mounted control id.
    pub fn control(&self) -> ControlId {
        self.control
    }

    /// Give the control keyboard focus.
    pub fn focus(&self) -> bool {
        self.container.focus_control(self.control)
    }

    /// Returns `true` if the control has keyboard focus.
    pub fn has_focus(&self) -> bool {
        self.container.control_has_focus(self.control)
    }

    /// Remove the control from its container.
    pub fn unmount(&self) -> bool {
        self.container.unmount(self.control)
    }
}

impl std::fmt::Debug for SelectInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectInput")
            .field("container", &self.container.id())
            .field("value", &self.value())
            .finish()
    }
}

// =========================================================================
// Popup
// =========================================================================

/// A detached popup surface, positioned absolutely by its owner.
#[derive(Debug)]
pub struct Popup {
    container: Container,
    control: ControlId,
}

impl Popup {
    /// Mount a popup into `container`; it starts visible.
    pub fn mount(container: &Container) -> Self {
        Self {
            control: container.mount(ControlKind::Popup),
            container: container.clone(),
        }
    }

    /// Show the popup.
    pub fn show(&self) {
        self.container.set_control_visible(self.control, true);
    }

    /// Hide the popup.
    pub fn hide(&self) {
        self.container.set_control_visible(self.control, false);
    }

    /// `true` while shown.
    pub fn is_visible(&self) -> bool {
        self.container
            .is_control_visible(self.control)
            .unwrap_or(false)
    }

    /// Move the popup to an absolute box.
    pub fn place(&self, placement: CellBox) {
        self.container.place_control(self.control, placement);
    }

    /// The popup's current placement.
    pub fn placement(&self) -> Option<CellBox> {
        self.container.control_placement(self.control)
    }

    /// The mounted control id.
    pub fn control(&self) -> ControlId {
        self.control
    }

    /// Remove the popup from its container.
    pub fn unmount(&self) -> bool {
        self.container.unmount(self.control)
    }
}
