//! Composite editor: several column editors behind one [`Editor`].
//!
//! A composite editor is how a host builds a form-style editor for a whole
//! row. Each column that declares an editor gets its own sub-editor,
//! mounted in a container the host supplies for that column; the composite
//! fans every contract call out to the sub-editors and folds the results
//! back in.
//!
//! # Preparation
//!
//! [`CompositeEditor::prepare`] checks the column/container wiring once and
//! returns a [`PreparedComposite`]. The prepared value is an
//! [`EditorFactory`], so it can be attached to a column or handed straight
//! to an [`EditSession`](crate::session::EditSession). Its `new_instance`
//! ignores the column and container in the arguments it receives and
//! builds the aggregate from the prepared wiring instead.
//!
//! Every instance mounts into the same containers, so only one should be
//! live at a time; a second live instance is reported with a warning.
//!
//! # State
//!
//! The state is a [`CellValue::List`] aligned by index with the columns.
//! Columns without an editor are holes that hold `Null`. Trailing holes
//! are left off, so a composite with no editable column serializes to an
//! empty list.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! use horizon_grid::editor::{CompositeEditor, CompositeOptions, EditorArgs, EditorFactory, EditorKind};
//! use horizon_grid::model::{CellValue, Column, Item};
//! use horizon_grid_core::{CellBox, FocusScope};
//!
//! let scope = FocusScope::new();
//! let columns = vec![
//!     Arc::new(Column::new("title", "title").with_editor(EditorKind::Text)),
//!     Arc::new(Column::new("qty", "qty").with_editor(EditorKind::Integer)),
//! ];
//! let containers = HashMap::from([
//!     ("title".to_string(), scope.container(CellBox::new(0.0, 0.0, 200.0, 24.0))),
//!     ("qty".to_string(), scope.container(CellBox::new(0.0, 30.0, 200.0, 24.0))),
//! ]);
//!
//! let prepared = CompositeEditor::prepare(columns.clone(), containers, CompositeOptions::new()).unwrap();
//! let form = scope.container(CellBox::default());
//! let mut editor = prepared.new_instance(EditorArgs::new(form, columns[0].clone()));
//!
//! let item = Item::new().with("title", "Task").with("qty", 3);
//! editor.load_value(&item);
//! assert!(!editor.is_value_changed());
//! assert_eq!(
//!     editor.serialize_value(),
//!     CellValue::List(vec![CellValue::from("Task"), CellValue::Int(3)])
//! );
//! editor.destroy();
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use horizon_grid_core::logging::targets;
use horizon_grid_core::{CellBox, Container};

use super::{Editor, EditorArgs, EditorFactory, ValidationErrorSource, ValidationResult};
use crate::error::{GridError, Result};
use crate::model::{CellValue, Column, Item};

type HookFn = Arc<dyn Fn() + Send + Sync>;
type PositionHookFn = Arc<dyn Fn(CellBox) + Send + Sync>;

/// Options for a composite editor.
///
/// The hooks run after the matching call has been delegated to every
/// sub-editor.
#[derive(Clone, Default)]
pub struct CompositeOptions {
    validation_failed_msg: Option<String>,
    show: Option<HookFn>,
    hide: Option<HookFn>,
    position: Option<PositionHookFn>,
    destroy: Option<HookFn>,
}

impl CompositeOptions {
    /// Options with no hooks and the configured aggregate message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the aggregate failure message using builder pattern.
    pub fn with_validation_failed_msg(mut self, message: impl Into<String>) -> Self {
        self.validation_failed_msg = Some(message.into());
        self
    }

    /// Run `f` after every `show`.
    pub fn on_show<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.show = Some(Arc::new(f));
        self
    }

    /// Run `f` after every `hide`.
    pub fn on_hide<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.hide = Some(Arc::new(f));
        self
    }

    /// Run `f` with the outer box after every `position`.
    pub fn on_position<F>(mut self, f: F) -> Self
    where
        F: Fn(CellBox) + Send + Sync + 'static,
    {
        self.position = Some(Arc::new(f));
        self
    }

    /// Run `f` once, after the sub-editors are destroyed.
    pub fn on_destroy<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.destroy = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for CompositeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeOptions")
            .field("validation_failed_msg", &self.validation_failed_msg)
            .field("show", &self.show.is_some())
            .field("hide", &self.hide.is_some())
            .field("position", &self.position.is_some())
            .field("destroy", &self.destroy.is_some())
            .finish()
    }
}

struct CompositeConfig {
    columns: Vec<Arc<Column>>,
    containers: HashMap<String, Container>,
    options: CompositeOptions,
    live: AtomicUsize,
}

/// Column/container wiring checked by [`CompositeEditor::prepare`].
///
/// Cloning is cheap; every clone builds editors over the same wiring.
#[derive(Clone)]
pub struct PreparedComposite {
    config: Arc<CompositeConfig>,
}

impl PreparedComposite {
    /// Build the aggregate editor.
    ///
    /// `args` supplies the item snapshot, grid position, grid handle,
    /// commit/cancel callbacks and settings shared with every sub-editor.
    /// Its column and container are not used.
    pub fn instantiate(&self, args: EditorArgs) -> CompositeEditor {
        CompositeEditor::init(self.config.clone(), args)
    }

    /// The columns, in index order.
    pub fn columns(&self) -> &[Arc<Column>] {
        &self.config.columns
    }

    /// Number of instances built from this wiring and not yet destroyed.
    pub fn live_instances(&self) -> usize {
        self.config.live.load(Ordering::SeqCst)
    }
}

impl EditorFactory for PreparedComposite {
    fn new_instance(&self, args: EditorArgs) -> Box<dyn Editor> {
        Box::new(self.instantiate(args))
    }

    fn name(&self) -> &str {
        "composite"
    }
}

impl fmt::Debug for PreparedComposite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreparedComposite")
            .field(
                "columns",
                &self.config.columns.iter().map(|c| c.id()).collect::<Vec<_>>(),
            )
            .field("options", &self.config.options)
            .finish()
    }
}

/// Presents one sub-editor per editable column as a single editor.
///
/// Values are exchanged as [`CellValue::List`]s aligned by index with the
/// column list; columns without an editor are holes that serialize as
/// `Null` and ignore whatever is applied to them. Trailing holes are not
/// serialized.
pub struct CompositeEditor {
    config: Arc<CompositeConfig>,
    editors: Vec<Option<Box<dyn Editor>>>,
    state_len: usize,
    first_invalid: Option<usize>,
    destroyed: bool,
    args: EditorArgs,
}

impl CompositeEditor {
    /// Check the wiring of `columns` to `containers` (keyed by column id).
    ///
    /// Every column that declares an editor needs a container; columns
    /// without an editor do not.
    pub fn prepare(
        columns: Vec<Arc<Column>>,
        containers: HashMap<String, Container>,
        options: CompositeOptions,
    ) -> Result<PreparedComposite> {
        if let Some(column) = columns
            .iter()
            .find(|c| c.is_editable() && !containers.contains_key(c.id()))
        {
            return Err(GridError::MissingContainer {
                column: column.id().to_string(),
            });
        }
        tracing::debug!(
            target: targets::COMPOSITE,
            columns = columns.len(),
            editable = columns.iter().filter(|c| c.is_editable()).count(),
            "composite editor prepared"
        );
        Ok(PreparedComposite {
            config: Arc::new(CompositeConfig {
                columns,
                containers,
                options,
                live: AtomicUsize::new(0),
            }),
        })
    }

    fn init(config: Arc<CompositeConfig>, args: EditorArgs) -> Self {
        let already_live = config.live.fetch_add(1, Ordering::SeqCst);
        if already_live > 0 {
            tracing::warn!(
                target: targets::COMPOSITE,
                already_live,
                "composite editor instantiated while another instance shares its containers"
            );
        }

        let mut editors: Vec<Option<Box<dyn Editor>>> =
            std::iter::repeat_with(|| None).take(config.columns.len()).collect();

        // Last column first: every sub-editor focuses itself on creation,
        // so the first column ends up focused.
        for (index, column) in config.columns.iter().enumerate().rev() {
            let Some(factory) = column.editor() else {
                continue;
            };
            let Some(container) = config.containers.get(column.id()) else {
                continue;
            };
            let sub_args = EditorArgs {
                container: container.clone(),
                column: column.clone(),
                position: container.layout_box(),
                grid_position: args.grid_position,
                item: args.item.clone(),
                commit_changes: args.commit_changes.clone(),
                cancel_changes: args.cancel_changes.clone(),
                grid: args.grid.clone(),
                settings: args.settings.clone(),
            };
            editors[index] = Some(factory.new_instance(sub_args));
        }

        let state_len = editors.iter().rposition(Option::is_some).map_or(0, |i| i + 1);
        tracing::debug!(
            target: targets::COMPOSITE,
            sub_editors = editors.iter().flatten().count(),
            state_len,
            "composite editor created"
        );
        Self {
            config,
            editors,
            state_len,
            first_invalid: None,
            destroyed: false,
            args,
        }
    }

    /// Number of column slots (including holes).
    pub fn len(&self) -> usize {
        self.editors.len()
    }

    /// Returns `true` if there are no column slots.
    pub fn is_empty(&self) -> bool {
        self.editors.is_empty()
    }

    /// The sub-editor for column `index`, if that column is editable.
    pub fn sub_editor(&self, index: usize) -> Option<&(dyn Editor + 'static)> {
        self.editors.get(index)?.as_deref()
    }

    /// The sub-editor for column `index`, mutably.
    pub fn sub_editor_mut(&mut self, index: usize) -> Option<&mut (dyn Editor + 'static)> {
        self.editors.get_mut(index)?.as_deref_mut()
    }

    /// Index of the first sub-editor that failed the last `validate`.
    pub fn first_invalid(&self) -> Option<usize> {
        self.first_invalid
    }

    /// The arguments this editor was instantiated with.
    pub fn args(&self) -> &EditorArgs {
        &self.args
    }

    fn present_mut(&mut self) -> impl Iterator<Item = (usize, &mut Box<dyn Editor>)> {
        self.editors
            .iter_mut()
            .enumerate()
            .filter_map(|(index, editor)| editor.as_mut().map(|e| (index, e)))
    }
}

impl Editor for CompositeEditor {
    fn destroy(&mut self) {
        if self.destroyed {
            tracing::warn!(target: targets::COMPOSITE, "composite editor destroyed twice");
            return;
        }
        self.destroyed = true;
        for (_, editor) in self.present_mut() {
            editor.destroy();
        }
        self.config.live.fetch_sub(1, Ordering::SeqCst);
        if let Some(hook) = &self.config.options.destroy {
            hook();
        }
        tracing::debug!(target: targets::COMPOSITE, "composite editor destroyed");
    }

    fn load_value(&mut self, item: &Item) {
        for (_, editor) in self.present_mut() {
            editor.load_value(item);
        }
    }

    fn serialize_value(&self) -> CellValue {
        CellValue::List(
            self.editors[..self.state_len]
                .iter()
                .map(|editor| match editor {
                    Some(editor) => editor.serialize_value(),
                    None => CellValue::Null,
                })
                .collect(),
        )
    }

    /// # Panics
    ///
    /// Panics if `value` is not a list, or if its length is not between the
    /// serialized length and the column count.
    fn apply_value(&self, item: &mut Item, value: CellValue) {
        let values = match value {
            CellValue::List(values) => values,
            other => panic!("composite editor state must be a list, got {other:?}"),
        };
        assert!(
            (self.state_len..=self.editors.len()).contains(&values.len()),
            "composite editor state has {} entries for {} columns, expected at least {}",
            values.len(),
            self.editors.len(),
            self.state_len
        );
        for (editor, value) in self.editors.iter().zip(values) {
            if let Some(editor) = editor {
                editor.apply_value(item, value);
            }
        }
    }

    fn is_value_changed(&self) -> bool {
        self.editors
            .iter()
            .flatten()
            .any(|editor| editor.is_value_changed())
    }

    #[tracing::instrument(
        skip_all,
        name = "horizon_grid::composite::validate",
        target = "horizon_grid::composite",
        level = "debug"
    )]
    fn validate(&mut self) -> ValidationResult {
        self.first_invalid = None;
        let mut errors = Vec::new();

        for (index, editor) in self.editors.iter_mut().enumerate() {
            let Some(editor) = editor else {
                continue;
            };
            let result = editor.validate();
            if result.is_valid() {
                continue;
            }
            let column = &self.config.columns[index];
            // Containers were checked for every editable column in `prepare`.
            let Some(container) = self.config.containers.get(column.id()) else {
                continue;
            };
            if self.first_invalid.is_none() {
                self.first_invalid = Some(index);
            }
            errors.push(ValidationErrorSource {
                index,
                column_id: column.id().to_string(),
                container: container.clone(),
                message: result.message().map(str::to_string),
            });
        }

        if errors.is_empty() {
            return ValidationResult::valid();
        }

        tracing::debug!(
            target: targets::COMPOSITE,
            failed = errors.len(),
            first_invalid = ?self.first_invalid,
            "composite validation failed"
        );
        let message = self
            .config
            .options
            .validation_failed_msg
            .clone()
            .unwrap_or_else(|| self.args.settings.messages.validation_failed.clone());
        ValidationResult::invalid(message).with_errors(errors)
    }

    fn focus(&mut self) {
        let target = self
            .first_invalid
            .or_else(|| self.editors.iter().position(Option::is_some));
        if let Some(editor) = target.and_then(|index| self.editors[index].as_mut()) {
            editor.focus();
        }
    }

    fn show(&mut self) {
        for (_, editor) in self.present_mut() {
            editor.show();
        }
        tracing::trace!(target: targets::COMPOSITE, "show delegated");
        if let Some(hook) = &self.config.options.show {
            hook();
        }
    }

    fn hide(&mut self) {
        for (_, editor) in self.present_mut() {
            editor.hide();
        }
        tracing::trace!(target: targets::COMPOSITE, "hide delegated");
        if let Some(hook) = &self.config.options.hide {
            hook();
        }
    }

    fn position(&mut self, cell: CellBox) {
        let config = self.config.clone();
        for (index, editor) in self.present_mut() {
            if let Some(container) = config.containers.get(config.columns[index].id()) {
                editor.position(container.layout_box());
            }
        }
        tracing::trace!(target: targets::COMPOSITE, ?cell, "position delegated");
        if let Some(hook) = &config.options.position {
            hook(cell);
        }
    }
}

impl fmt::Debug for CompositeEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeEditor")
            .field("columns", &self.editors.len())
            .field("sub_editors", &self.editors.iter().flatten().count())
            .field("first_invalid", &self.first_invalid)
            .field("destroyed", &self.destroyed)
            .finish()
    }
}
