//! Per-session editor configuration.

use std::fmt;
use std::sync::Arc;

use horizon_grid_core::{CellBox, Container};

use crate::model::{Column, Item};
use crate::settings::EditorSettings;

/// Callback invoked by an editor to ask the host to commit or cancel.
pub type EditCallback = Arc<dyn Fn() + Send + Sync>;

/// Returns a callback that does nothing.
pub fn noop_callback() -> EditCallback {
    Arc::new(|| {})
}

/// Cell navigation offered by the host grid.
///
/// Editors that capture Tab (the long-text popup) forward it here.
pub trait GridNavigation: Send + Sync {
    /// Move the active cell to the next editable cell.
    fn navigate_next(&self) -> bool;

    /// Move the active cell to the previous editable cell.
    fn navigate_prev(&self) -> bool;
}

/// Everything an editor instance is bound to for one edit session.
///
/// Built fresh by the host for each session and owned by the editor it
/// configures.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use horizon_grid::editor::EditorArgs;
/// use horizon_grid::model::Column;
/// use horizon_grid_core::{CellBox, FocusScope};
///
/// let scope = FocusScope::new();
/// let cell = scope.container(CellBox::new(100.0, 40.0, 120.0, 24.0));
/// let args = EditorArgs::new(cell, Arc::new(Column::new("title", "title")))
///     .on_commit(|| println!("commit requested"));
///
/// assert_eq!(args.position, CellBox::new(100.0, 40.0, 120.0, 24.0));
/// ```
#[derive(Clone)]
pub struct EditorArgs {
    /// Container the editor mounts its controls into.
    pub container: Container,
    /// Column the editor is bound to.
    pub column: Arc<Column>,
    /// Box of the cell being edited.
    pub position: CellBox,
    /// Box of the whole grid.
    pub grid_position: CellBox,
    /// Snapshot of the row being edited.
    pub item: Item,
    /// Ask the host to commit the current edit.
    pub commit_changes: EditCallback,
    /// Ask the host to cancel the current edit.
    pub cancel_changes: EditCallback,
    /// Host grid navigation, if available.
    pub grid: Option<Arc<dyn GridNavigation>>,
    /// Editor settings.
    pub settings: Arc<EditorSettings>,
}

impl EditorArgs {
    /// Create arguments for `column` mounted in `container`.
    ///
    /// Both positions default to the container's layout box, the callbacks
    /// do nothing and settings are the defaults.
    pub fn new(container: Container, column: Arc<Column>) -> Self {
        let position = container.layout_box();
        Self {
            container,
            column,
            position,
            grid_position: position,
            item: Item::new(),
            commit_changes: noop_callback(),
            cancel_changes: noop_callback(),
            grid: None,
            settings: Arc::new(EditorSettings::default()),
        }
    }

    /// Set the cell position using builder pattern.
    pub fn with_position(mut self, position: CellBox) -> Self {
        self.position = position;
        self
    }

    /// Set the grid position using builder pattern.
    pub fn with_grid_position(mut self, grid_position: CellBox) -> Self {
        self.grid_position = grid_position;
        self
    }

    /// Set the item snapshot using builder pattern.
    pub fn with_item(mut self, item: Item) -> Self {
        self.item = item;
        self
    }

    /// Set the commit callback using builder pattern.
    pub fn on_commit<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.commit_changes = Arc::new(f);
        self
    }

    /// Set the cancel callback using builder pattern.
    pub fn on_cancel<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.cancel_changes = Arc::new(f);
        self
    }

    /// Set the grid navigation handle using builder pattern.
    pub fn with_grid(mut self, grid: Arc<dyn GridNavigation>) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Set the editor settings using builder pattern.
    pub fn with_settings(mut self, settings: Arc<EditorSettings>) -> Self {
        self.settings = settings;
        self
    }

    /// Invoke the commit callback.
    pub fn commit_changes(&self) {
        (self.commit_changes)();
    }

    /// Invoke the cancel callback.
    pub fn cancel_changes(&self) {
        (self.cancel_changes)();
    }
}

impl fmt::Debug for EditorArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorArgs")
            .field("container", &self.container.id())
            .field("column", &self.column.id())
            .field("position", &self.position)
            .field("grid_position", &self.grid_position)
            .field("has_grid", &self.grid.is_some())
            .finish_non_exhaustive()
    }
}
