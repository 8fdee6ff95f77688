//! Horizon Grid - pluggable in-place cell editors for tabular grids.
//!
//! This crate provides the editing half of a grid widget: the [`Editor`]
//! contract, the built-in editors, the [`CompositeEditor`] that drives
//! several column editors as one, and an [`EditSession`] driver that ties an
//! editor to the single-session edit lock.
//!
//! Host infrastructure (geometry, mount containers, focus, signals and the
//! edit lock) lives in `horizon-grid-core` and is re-exported as [`host`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use horizon_grid::editor::{EditorArgs, EditorKind, TextEditor};
//! use horizon_grid::model::{CellValue, Column, Item};
//! use horizon_grid::session::{CommitOutcome, EditSession};
//! use horizon_grid::host::{CellBox, EditLock, FocusScope};
//!
//! let lock = EditLock::new();
//! let scope = FocusScope::new();
//! let column = Arc::new(Column::new("title", "title").with_editor(EditorKind::Text));
//! let cell = scope.container(CellBox::new(0.0, 0.0, 160.0, 24.0));
//!
//! let mut session =
//!     EditSession::begin(&lock, EditorArgs::new(cell, column), Item::new().with("title", "Draft")).unwrap();
//! session
//!     .editor_mut()
//!     .downcast_mut::<TextEditor>()
//!     .unwrap()
//!     .input_mut()
//!     .set_text("Final");
//!
//! assert_eq!(session.commit(), CommitOutcome::Committed);
//! assert_eq!(session.finish().get("title"), &CellValue::from("Final"));
//! ```
//!
//! [`Editor`]: editor::Editor
//! [`CompositeEditor`]: editor::CompositeEditor
//! [`EditSession`]: session::EditSession

pub mod editor;
mod error;
pub mod model;
pub mod session;
pub mod settings;

pub use error::{GridError, Result};

/// Host infrastructure from `horizon-grid-core`.
pub mod host {
    pub use horizon_grid_core::*;
}
