//! Core systems for Horizon Grid.
//!
//! This crate provides the host-facing infrastructure the grid editors are
//! built on:
//!
//! - **Geometry**: [`CellBox`], the position descriptor handed to editors
//! - **Containers**: host-supplied mount points with tracked controls
//! - **Focus**: a [`FocusScope`] shared by all containers of one grid
//! - **Signal/Slot System**: synchronous change notification
//! - **Edit Lock**: the single-active-session capability
//! - **Logging**: `tracing` targets for every subsystem
//!
//! # Example
//!
//! ```
//! use horizon_grid_core::{CellBox, ControlKind, EditLock, FocusScope};
//!
//! let lock = EditLock::new();
//! let scope = FocusScope::new();
//!
//! let guard = lock.acquire().unwrap();
//! let cell = scope.container(CellBox::new(0.0, 0.0, 100.0, 24.0));
//! let input = cell.mount(ControlKind::TextInput);
//! cell.focus_control(input);
//!
//! cell.unmount(input);
//! guard.release().unwrap();
//! ```

pub mod container;
pub mod edit_lock;
mod error;
pub mod geometry;
pub mod logging;
pub mod signal;

pub use container::{Container, ContainerId, ControlId, ControlKind, FocusScope, FocusTarget};
pub use edit_lock::{EditLock, EditLockGuard, SessionId};
pub use error::{EditLockError, Result};
pub use geometry::CellBox;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
