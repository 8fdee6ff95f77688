//! Edit session driver.
//!
//! An [`EditSession`] runs one editor through its lifecycle on behalf of a
//! host grid: it holds the [`EditLock`] for the session's whole lifetime,
//! loads the row into the editor, and on commit validates and applies the
//! result to its own copy of the row.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use horizon_grid::editor::{EditorArgs, EditorKind, IntegerEditor};
//! use horizon_grid::model::{CellValue, Column, Item};
//! use horizon_grid::session::{CommitOutcome, EditSession};
//! use horizon_grid_core::{CellBox, EditLock, FocusScope};
//!
//! let lock = EditLock::new();
//! let scope = FocusScope::new();
//! let column = Arc::new(Column::new("qty", "qty").with_editor(EditorKind::Integer));
//! let args = EditorArgs::new(scope.container(CellBox::new(0.0, 0.0, 80.0, 24.0)), column);
//!
//! let mut session = EditSession::begin(&lock, args, Item::new().with("qty", 1)).unwrap();
//! assert!(lock.is_active());
//!
//! session
//!     .editor_mut()
//!     .downcast_mut::<IntegerEditor>()
//!     .unwrap()
//!     .input_mut()
//!     .set_text("7");
//! assert_eq!(session.commit(), CommitOutcome::Committed);
//!
//! let item = session.finish();
//! assert_eq!(item.get("qty"), &CellValue::Int(7));
//! assert!(!lock.is_active());
//! ```

use std::fmt;

use horizon_grid_core::logging::targets;
use horizon_grid_core::{EditLock, EditLockGuard, SessionId};

use crate::editor::{Editor, EditorArgs, ValidationResult};
use crate::error::{GridError, Result};
use crate::model::Item;

/// Result of [`EditSession::commit`].
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// Nothing changed since the row was loaded; the row was not touched.
    Unchanged,
    /// The value was valid and has been applied to the session's row.
    Committed,
    /// Validation failed; the editor has been refocused and the row was
    /// not touched.
    Invalid(ValidationResult),
}

/// One active cell edit.
///
/// Dropping a session that was neither finished nor cancelled destroys its
/// editor and releases the lock, discarding any changes.
pub struct EditSession {
    guard: Option<EditLockGuard>,
    session: SessionId,
    editor: Box<dyn Editor>,
    item: Item,
    column_id: String,
    closed: bool,
}

impl EditSession {
    /// Start editing `item` with the editor of `args.column`.
    ///
    /// Fails with [`GridError::NotEditable`] if the column has no editor
    /// and with [`GridError::EditLock`] if another session is active.
    pub fn begin(lock: &EditLock, args: EditorArgs, item: Item) -> Result<Self> {
        let Some(factory) = args.column.editor().cloned() else {
            return Err(GridError::NotEditable {
                column: args.column.id().to_string(),
            });
        };
        let guard = lock.acquire()?;
        let session = guard.session();
        let column_id = args.column.id().to_string();

        let mut editor = factory.new_instance(args.with_item(item.clone()));
        editor.load_value(&item);
        tracing::debug!(target: targets::SESSION, %session, column = %column_id, editor = factory.name(), "edit session started");

        Ok(Self {
            guard: Some(guard),
            session,
            editor,
            item,
            column_id,
            closed: false,
        })
    }

    /// The session id assigned by the lock.
    pub fn id(&self) -> SessionId {
        self.session
    }

    /// The active editor.
    pub fn editor(&self) -> &(dyn Editor + 'static) {
        self.editor.as_ref()
    }

    /// The active editor, mutably.
    pub fn editor_mut(&mut self) -> &mut (dyn Editor + 'static) {
        self.editor.as_mut()
    }

    /// The session's copy of the row, including committed values.
    pub fn item(&self) -> &Item {
        &self.item
    }

    /// Validate and apply the editor's value if it changed.
    ///
    /// The session stays open after a commit; call [`finish`](Self::finish)
    /// to close it and take the row.
    #[tracing::instrument(
        skip_all,
        name = "horizon_grid::session::commit",
        target = "horizon_grid::session",
        level = "debug",
        fields(session = %self.session)
    )]
    pub fn commit(&mut self) -> CommitOutcome {
        if !self.editor.is_value_changed() {
            tracing::debug!(target: targets::SESSION, "nothing to commit");
            return CommitOutcome::Unchanged;
        }

        let result = self.editor.validate();
        if !result.is_valid() {
            tracing::debug!(
                target: targets::SESSION,
                message = result.message().unwrap_or_default(),
                errors = result.errors().len(),
                "commit rejected"
            );
            self.editor.focus();
            return CommitOutcome::Invalid(result);
        }

        let value = self.editor.serialize_value();
        self.editor.apply_value(&mut self.item, value);
        tracing::debug!(target: targets::SESSION, column = %self.column_id, "value committed");
        CommitOutcome::Committed
    }

    /// Discard the session without touching the row.
    pub fn cancel(mut self) {
        tracing::debug!(target: targets::SESSION, session = %self.session, "edit session cancelled");
        self.close();
    }

    /// End the session and return the row with every committed value.
    pub fn finish(mut self) -> Item {
        self.close();
        tracing::debug!(target: targets::SESSION, session = %self.session, "edit session finished");
        std::mem::take(&mut self.item)
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.editor.destroy();
        if let Some(guard) = self.guard.take() {
            if let Err(err) = guard.release() {
                tracing::warn!(target: targets::SESSION, %err, "edit lock release failed");
            }
        }
    }
}

impl Drop for EditSession {
    fn drop(&mut self) {
        if !self.closed {
            tracing::debug!(target: targets::SESSION, session = %self.session, "edit session dropped");
            self.close();
        }
    }
}

impl fmt::Debug for EditSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditSession")
            .field("session", &self.session)
            .field("column", &self.column_id)
            .field("closed", &self.closed)
            .finish()
    }
}
