//! Mount containers and keyboard focus.
//!
//! Editors never own the surface they render into. The host supplies a
//! [`Container`] (the active cell, or an external form field for composite
//! editing) and the editor mounts its controls into it. Mounted controls are
//! tracked so the host can verify that `destroy()` released everything, and
//! so that focus can be routed to a specific control.
//!
//! All containers created from one [`FocusScope`] share a single focus slot:
//! focusing a control in one container takes focus away from every other
//! control in the scope, the way keyboard focus behaves in a document.
//!
//! # Example
//!
//! ```
//! use horizon_grid_core::{CellBox, ControlKind, FocusScope};
//!
//! let scope = FocusScope::new();
//! let cell = scope.container(CellBox::new(0.0, 0.0, 80.0, 20.0));
//!
//! let input = cell.mount(ControlKind::TextInput);
//! cell.focus_control(input);
//! assert_eq!(scope.focused_container(), Some(cell.id()));
//!
//! cell.unmount(input);
//! assert_eq!(cell.mounted_count(), 0);
//! assert_eq!(scope.focused_container(), None);
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::geometry::CellBox;
use crate::logging::targets;
use crate::signal::Signal;

new_key_type! {
    /// Identifies a control mounted into a [`Container`].
    pub struct ControlId;
}

/// Identifies a [`Container`] within its [`FocusScope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(u64);

impl ContainerId {
    /// Returns the raw value of this ID.
    pub const fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "container#{}", self.0)
    }
}

/// The kind of control an editor mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// Single-line text input.
    TextInput,
    /// Multi-line text area.
    TextArea,
    /// Checkbox.
    Checkbox,
    /// Drop-down select.
    Select,
    /// Push button.
    Button,
    /// Floating wrapper rendered outside the normal cell flow.
    Popup,
}

/// The control that currently owns keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FocusTarget {
    /// Container holding the control.
    pub container: ContainerId,
    /// The focused control.
    pub control: ControlId,
}

struct FocusScopeInner {
    focused: Mutex<Option<FocusTarget>>,
    next_container: AtomicU64,
    focus_changed: Signal<Option<ContainerId>>,
}

/// Shared focus state for a set of containers.
#[derive(Clone)]
pub struct FocusScope {
    inner: Arc<FocusScopeInner>,
}

impl Default for FocusScope {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusScope {
    /// Create an empty scope with nothing focused.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(FocusScopeInner {
                focused: Mutex::new(None),
                next_container: AtomicU64::new(1),
                focus_changed: Signal::new(),
            }),
        }
    }

    /// Create a new container in this scope with the given layout box.
    pub fn container(&self, bounds: CellBox) -> Container {
        let id = ContainerId(self.inner.next_container.fetch_add(1, Ordering::SeqCst));
        Container {
            inner: Arc::new(ContainerInner {
                id,
                scope: self.clone(),
                bounds: Mutex::new(bounds),
                controls: Mutex::new(SlotMap::with_key()),
            }),
        }
    }

    /// The control that currently has focus, if any.
    pub fn focused(&self) -> Option<FocusTarget> {
        *self.inner.focused.lock()
    }

    /// The container holding the focused control, if any.
    pub fn focused_container(&self) -> Option<ContainerId> {
        self.focused().map(|target| target.container)
    }

    /// Remove focus from every control in the scope.
    pub fn clear_focus(&self) {
        self.set_focus(None);
    }

    /// Signal emitted with the newly focused container on every focus change.
    pub fn focus_changed(&self) -> &Signal<Option<ContainerId>> {
        &self.inner.focus_changed
    }

    fn set_focus(&self, target: Option<FocusTarget>) {
        let changed = {
            let mut focused = self.inner.focused.lock();
            let changed = *focused != target;
            *focused = target;
            changed
        };
        if changed {
            tracing::trace!(
                target: targets::FOCUS,
                container = ?target.map(|t| t.container),
                "focus changed"
            );
            self.inner.focus_changed.emit(target.map(|t| t.container));
        }
    }
}

impl fmt::Debug for FocusScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusScope")
            .field("focused", &self.focused())
            .finish()
    }
}

#[derive(Debug, Clone, Copy)]
struct MountedControl {
    kind: ControlKind,
    visible: bool,
    placement: Option<CellBox>,
}

struct ContainerInner {
    id: ContainerId,
    scope: FocusScope,
    bounds: Mutex<CellBox>,
    controls: Mutex<SlotMap<ControlId, MountedControl>>,
}

/// Shared handle to a host-supplied mount point.
///
/// Cloning the handle refers to the same container. Two handles compare
/// equal when they refer to the same container.
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

impl Container {
    /// The container's identifier.
    pub fn id(&self) -> ContainerId {
        self.inner.id
    }

    /// The focus scope the container belongs to.
    pub fn scope(&self) -> &FocusScope {
        &self.inner.scope
    }

    /// The container's current bounds as last reported by the host.
    pub fn bounds(&self) -> CellBox {
        *self.inner.bounds.lock()
    }

    /// Update the container's bounds (after a host scroll or resize).
    pub fn set_bounds(&self, bounds: CellBox) {
        *self.inner.bounds.lock() = bounds;
    }

    /// The container's current layout box.
    ///
    /// The box is derived from the container's offset and size and is
    /// always reported as visible; it is what a composite editor hands to
    /// each sub-editor as its position.
    pub fn layout_box(&self) -> CellBox {
        let bounds = self.bounds();
        CellBox::new(bounds.left, bounds.top, bounds.width, bounds.height)
    }

    // =========================================================================
    // Mounted controls
    // =========================================================================

    /// Mount a new control into the container.
    pub fn mount(&self, kind: ControlKind) -> ControlId {
        let id = self.inner.controls.lock().insert(MountedControl {
            kind,
            visible: true,
            placement: None,
        });
        tracing::trace!(target: targets::FOCUS, container = %self.id(), ?kind, "control mounted");
        id
    }

    /// Remove a control from the container.
    ///
    /// If the control held focus, focus is cleared. Returns `false` if the
    /// control was not mounted here.
    pub fn unmount(&self, control: ControlId) -> bool {
        let removed = self.inner.controls.lock().remove(control).is_some();
        if removed {
            let target = FocusTarget {
                container: self.id(),
                control,
            };
            if self.inner.scope.focused() == Some(target) {
                self.inner.scope.clear_focus();
            }
        }
        removed
    }

    /// Number of controls currently mounted.
    pub fn mounted_count(&self) -> usize {
        self.inner.controls.lock().len()
    }

    /// Returns `true` if `control` is mounted in this container.
    pub fn is_mounted(&self, control: ControlId) -> bool {
        self.inner.controls.lock().contains_key(control)
    }

    /// The kind of a mounted control.
    pub fn control_kind(&self, control: ControlId) -> Option<ControlKind> {
        self.inner.controls.lock().get(control).map(|c| c.kind)
    }

    /// Show or hide a mounted control. Returns `false` if not mounted.
    pub fn set_control_visible(&self, control: ControlId, visible: bool) -> bool {
        match self.inner.controls.lock().get_mut(control) {
            Some(c) => {
                c.visible = visible;
                true
            }
            None => false,
        }
    }

    /// Whether a mounted control is visible.
    pub fn is_control_visible(&self, control: ControlId) -> Option<bool> {
        self.inner.controls.lock().get(control).map(|c| c.visible)
    }

    /// Place a mounted control at an absolute box (for detached popups).
    pub fn place_control(&self, control: ControlId, placement: CellBox) -> bool {
        match self.inner.controls.lock().get_mut(control) {
            Some(c) => {
                c.placement = Some(placement);
                true
            }
            None => false,
        }
    }

    /// The absolute placement of a control, if it was explicitly placed.
    pub fn control_placement(&self, control: ControlId) -> Option<CellBox> {
        self.inner.controls.lock().get(control).and_then(|c| c.placement)
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Give keyboard focus to a mounted control.
    ///
    /// Returns `false` (and leaves focus untouched) if the control is not
    /// mounted in this container.
    pub fn focus_control(&self, control: ControlId) -> bool {
        if !self.is_mounted(control) {
            tracing::warn!(target: targets::FOCUS, container = %self.id(), "focus requested for unmounted control");
            return false;
        }
        self.inner.scope.set_focus(Some(FocusTarget {
            container: self.id(),
            control,
        }));
        true
    }

    /// Returns `true` if any control in this container has focus.
    pub fn has_focus(&self) -> bool {
        self.inner.scope.focused_container() == Some(self.id())
    }

    /// Returns `true` if `control` has focus.
    pub fn control_has_focus(&self, control: ControlId) -> bool {
        self.inner.scope.focused()
            == Some(FocusTarget {
                container: self.id(),
                control,
            })
    }
}

impl PartialEq for Container {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Container {}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("id", &self.id())
            .field("bounds", &self.bounds())
            .field("mounted", &self.mounted_count())
            .finish()
    }
}

static_assertions::assert_impl_all!(Container: Send, Sync);
static_assertions::assert_impl_all!(FocusScope: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    fn cell() -> CellBox {
        CellBox::new(10.0, 40.0, 120.0, 24.0)
    }

    #[test]
    fn test_mount_and_unmount() {
        let scope = FocusScope::new();
        let container = scope.container(cell());

        let a = container.mount(ControlKind::TextInput);
        let b = container.mount(ControlKind::Button);
        assert_eq!(container.mounted_count(), 2);
        assert_eq!(container.control_kind(a), Some(ControlKind::TextInput));

        assert!(container.unmount(a));
        assert!(!container.unmount(a));
        assert!(container.is_mounted(b));
        assert_eq!(container.mounted_count(), 1);
    }

    #[test]
    fn test_focus_is_exclusive_within_scope() {
        let scope = FocusScope::new();
        let first = scope.container(cell());
        let second = scope.container(cell());

        let a = first.mount(ControlKind::TextInput);
        let b = second.mount(ControlKind::Checkbox);

        assert!(first.focus_control(a));
        assert!(first.has_focus());
        assert!(!second.has_focus());

        assert!(second.focus_control(b));
        assert!(!first.has_focus());
        assert!(second.control_has_focus(b));
    }

    #[test]
    fn test_unmount_clears_focus() {
        let scope = FocusScope::new();
        let container = scope.container(cell());
        let a = container.mount(ControlKind::TextInput);
        container.focus_control(a);

        container.unmount(a);
        assert_eq!(scope.focused(), None);
    }

    #[test]
    fn test_focus_unmounted_control_is_ignored() {
        let scope = FocusScope::new();
        let container = scope.container(cell());
        let a = container.mount(ControlKind::TextInput);
        container.unmount(a);

        assert!(!container.focus_control(a));
        assert_eq!(scope.focused(), None);
    }

    #[test]
    fn test_focus_changed_signal() {
        let scope = FocusScope::new();
        let container = scope.container(cell());
        let control = container.mount(ControlKind::TextInput);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        scope
            .focus_changed()
            .connect(move |c| seen_clone.lock().push(*c));

        container.focus_control(control);
        // Refocusing the same control is not a change.
        container.focus_control(control);
        scope.clear_focus();

        assert_eq!(*seen.lock(), vec![Some(container.id()), None]);
    }

    #[test]
    fn test_layout_box_is_visible() {
        let scope = FocusScope::new();
        let container = scope.container(cell().with_visible(false));
        let layout = container.layout_box();
        assert!(layout.visible);
        assert_eq!(layout.top, 40.0);
        assert_eq!(layout.right, 130.0);
    }

    #[test]
    fn test_placement_and_visibility() {
        let scope = FocusScope::new();
        let container = scope.container(cell());
        let popup = container.mount(ControlKind::Popup);

        assert_eq!(container.control_placement(popup), None);
        container.place_control(popup, CellBox::new(5.0, 5.0, 250.0, 80.0));
        assert_eq!(container.control_placement(popup).map(|b| b.width), Some(250.0));

        container.set_control_visible(popup, false);
        assert_eq!(container.is_control_visible(popup), Some(false));
    }

    #[test]
    fn test_container_equality_is_identity() {
        let scope = FocusScope::new();
        let a = scope.container(cell());
        let b = scope.container(cell());
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }
}
