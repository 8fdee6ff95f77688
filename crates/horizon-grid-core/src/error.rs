//! Error types for Horizon Grid core.

use crate::edit_lock::SessionId;

/// Errors raised by the [`EditLock`](crate::EditLock).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditLockError {
    /// Another edit session already holds the lock.
    #[error("an edit session ({session}) is still active, cannot activate another")]
    AlreadyActive {
        /// The session currently holding the lock.
        session: SessionId,
    },
    /// The lock is not held by the session that tried to release it.
    #[error("edit session {session} does not hold the edit lock")]
    NotActive {
        /// The session that attempted the release.
        session: SessionId,
    },
}

/// A specialized Result type for Horizon Grid core operations.
pub type Result<T> = std::result::Result<T, EditLockError>;
