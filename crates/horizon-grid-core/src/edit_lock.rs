//! The edit lock: at most one active edit session per grid.
//!
//! A grid hands one [`EditLock`] to everything that can start an edit.
//! Starting a session acquires the lock and yields an [`EditLockGuard`];
//! the lock stays held until the guard is released or dropped. A second
//! acquisition while a guard is alive fails with
//! [`EditLockError::AlreadyActive`], which is how contention is detected.
//!
//! The lock is an explicit capability rather than ambient global state, so
//! independent grids (and tests) each own their own lock.
//!
//! # Example
//!
//! ```
//! use horizon_grid_core::EditLock;
//!
//! let lock = EditLock::new();
//! let guard = lock.acquire().unwrap();
//! assert!(lock.is_active());
//! assert!(lock.acquire().is_err());
//!
//! drop(guard);
//! assert!(!lock.is_active());
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::error::{EditLockError, Result};
use crate::logging::targets;
use crate::signal::Signal;

/// Identifies one acquisition of an [`EditLock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    /// Creates a session ID from its raw value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value of this ID.
    pub const fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct EditLockInner {
    active: Mutex<Option<SessionId>>,
    next_id: AtomicU64,
    /// Emitted with the new holder whenever the lock is acquired or released.
    state_changed: Signal<Option<SessionId>>,
}

/// Shared handle to a grid's edit lock.
///
/// Cloning the handle shares the same underlying lock.
#[derive(Clone)]
pub struct EditLock {
    inner: Arc<EditLockInner>,
}

impl Default for EditLock {
    fn default() -> Self {
        Self::new()
    }
}

impl EditLock {
    /// Creates a new, inactive lock.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(EditLockInner {
                active: Mutex::new(None),
                next_id: AtomicU64::new(1),
                state_changed: Signal::new(),
            }),
        }
    }

    /// Acquires the lock for a new edit session.
    ///
    /// Fails with [`EditLockError::AlreadyActive`] if another session holds it.
    pub fn acquire(&self) -> Result<EditLockGuard> {
        let session = {
            let mut active = self.inner.active.lock();
            if let Some(current) = *active {
                tracing::debug!(target: targets::EDIT_LOCK, %current, "edit lock contention");
                return Err(EditLockError::AlreadyActive { session: current });
            }
            let session = SessionId(self.inner.next_id.fetch_add(1, Ordering::SeqCst));
            *active = Some(session);
            session
        };

        tracing::debug!(target: targets::EDIT_LOCK, %session, "edit lock acquired");
        self.inner.state_changed.emit(Some(session));

        Ok(EditLockGuard {
            lock: self.clone(),
            session,
            released: false,
        })
    }

    /// Returns `true` if any session currently holds the lock.
    pub fn is_active(&self) -> bool {
        self.inner.active.lock().is_some()
    }

    /// Returns the session currently holding the lock, if any.
    pub fn active_session(&self) -> Option<SessionId> {
        *self.inner.active.lock()
    }

    /// Returns `true` if `session` is the current holder.
    pub fn is_held_by(&self, session: SessionId) -> bool {
        self.active_session() == Some(session)
    }

    /// Signal emitted with the new holder (`None` on release) on every change.
    pub fn state_changed(&self) -> &Signal<Option<SessionId>> {
        &self.inner.state_changed
    }

    fn deactivate(&self, session: SessionId) -> Result<()> {
        {
            let mut active = self.inner.active.lock();
            if *active != Some(session) {
                return Err(EditLockError::NotActive { session });
            }
            *active = None;
        }

        tracing::debug!(target: targets::EDIT_LOCK, %session, "edit lock released");
        self.inner.state_changed.emit(None);
        Ok(())
    }
}

impl fmt::Debug for EditLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditLock")
            .field("active", &self.active_session())
            .finish()
    }
}

/// Proof that the holder owns the edit lock.
///
/// The lock is released when the guard is dropped.
#[derive(Debug)]
pub struct EditLockGuard {
    lock: EditLock,
    session: SessionId,
    released: bool,
}

impl EditLockGuard {
    /// The session this guard represents.
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// The lock this guard holds.
    pub fn lock(&self) -> &EditLock {
        &self.lock
    }

    /// Releases the lock explicitly.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        self.lock.deactivate(self.session)
    }
}

impl Drop for EditLockGuard {
    fn drop(&mut self) {
        if !self.released {
            self.released = true;
            if let Err(err) = self.lock.deactivate(self.session) {
                tracing::warn!(target: targets::EDIT_LOCK, %err, "edit lock release on drop failed");
            }
        }
    }
}

static_assertions::assert_impl_all!(EditLock: Send, Sync);
static_assertions::assert_impl_all!(EditLockGuard: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_and_release() {
        let lock = EditLock::new();
        assert!(!lock.is_active());

        let guard = lock.acquire().unwrap();
        assert!(lock.is_active());
        assert!(lock.is_held_by(guard.session()));

        guard.release().unwrap();
        assert!(!lock.is_active());
        assert_eq!(lock.active_session(), None);
    }

    #[test]
    fn test_contention_reports_holder() {
        let lock = EditLock::new();
        let guard = lock.acquire().unwrap();

        let err = lock.clone().acquire().unwrap_err();
        assert_eq!(
            err,
            EditLockError::AlreadyActive {
                session: guard.session()
            }
        );
    }

    #[test]
    fn test_drop_releases() {
        let lock = EditLock::new();
        {
            let _guard = lock.acquire().unwrap();
            assert!(lock.is_active());
        }
        assert!(!lock.is_active());
        assert!(lock.acquire().is_ok());
    }

    #[test]
    fn test_sessions_get_distinct_ids() {
        let lock = EditLock::new();
        let first = lock.acquire().unwrap().session();
        let second = lock.acquire().unwrap().session();
        assert_ne!(first, second);
    }

    #[test]
    fn test_state_changed_signal() {
        let lock = EditLock::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        lock.state_changed()
            .connect(move |state| seen_clone.lock().push(*state));

        let guard = lock.acquire().unwrap();
        let session = guard.session();
        drop(guard);

        assert_eq!(*seen.lock(), vec![Some(session), None]);
    }

    #[test]
    fn test_independent_locks() {
        let a = EditLock::new();
        let b = EditLock::new();
        let _guard = a.acquire().unwrap();
        assert!(b.acquire().is_ok());
    }
}
