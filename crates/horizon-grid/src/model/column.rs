//! Column descriptors.

use std::fmt;
use std::sync::Arc;

use crate::editor::{EditorFactory, Validator};

/// Describes one grid column as far as editing is concerned.
///
/// Columns are immutable for the duration of an edit session and are
/// shared (`Arc<Column>`) between the host grid and the editors bound to
/// them.
///
/// # Example
///
/// ```
/// use horizon_grid::editor::{EditorKind, RequiredValidator};
/// use horizon_grid::model::Column;
///
/// let column = Column::new("title", "title")
///     .with_name("Title")
///     .with_editor(EditorKind::Text)
///     .with_validator(RequiredValidator::new());
///
/// assert!(column.is_editable());
/// assert_eq!(column.name(), "Title");
/// ```
#[derive(Clone)]
pub struct Column {
    id: String,
    field: String,
    name: String,
    validator: Option<Arc<dyn Validator>>,
    editor: Option<Arc<dyn EditorFactory>>,
}

impl Column {
    /// Create a column with the given id and field; the name defaults to the id.
    pub fn new(id: impl Into<String>, field: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            field: field.into(),
            validator: None,
            editor: None,
        }
    }

    /// Set the display name using builder pattern.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Attach a validator using builder pattern.
    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Attach an editor factory using builder pattern.
    pub fn with_editor(mut self, editor: impl EditorFactory + 'static) -> Self {
        self.editor = Some(Arc::new(editor));
        self
    }

    /// Attach a shared editor factory using builder pattern.
    pub fn with_shared_editor(mut self, editor: Arc<dyn EditorFactory>) -> Self {
        self.editor = Some(editor);
        self
    }

    /// The column id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The item field this column reads and writes.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The column validator, if any.
    pub fn validator(&self) -> Option<&Arc<dyn Validator>> {
        self.validator.as_ref()
    }

    /// The editor factory, if the column is editable.
    pub fn editor(&self) -> Option<&Arc<dyn EditorFactory>> {
        self.editor.as_ref()
    }

    /// Returns `true` if the column declares an editor.
    pub fn is_editable(&self) -> bool {
        self.editor.is_some()
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("field", &self.field)
            .field("name", &self.name)
            .field("validator", &self.validator.is_some())
            .field("editor", &self.editor.as_ref().map(|e| e.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{EditorKind, RequiredValidator};

    #[test]
    fn test_defaults() {
        let column = Column::new("c1", "duration");
        assert_eq!(column.id(), "c1");
        assert_eq!(column.field(), "duration");
        assert_eq!(column.name(), "c1");
        assert!(!column.is_editable());
        assert!(column.validator().is_none());
    }

    #[test]
    fn test_debug_names_editor() {
        let column = Column::new("c1", "f")
            .with_editor(EditorKind::Integer)
            .with_validator(RequiredValidator::new());
        let debug = format!("{column:?}");
        assert!(debug.contains("Some(\"integer\")"));
        assert!(debug.contains("validator: true"));
    }
}
