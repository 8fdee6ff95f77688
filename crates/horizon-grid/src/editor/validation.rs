//! Validation results and column validators.
//!
//! Validation failures are ordinary data: an editor's `validate()` returns a
//! [`ValidationResult`], never an error. A column may carry a pluggable
//! [`Validator`] that editors run against their raw live value (the text in
//! the control, before serialization).
//!
//! # Built-in Validators
//!
//! - [`RequiredValidator`]: rejects blank input
//! - [`IntRangeValidator`]: accepts integers within an inclusive range
//! - [`RegexValidator`]: accepts input matching a regular expression
//! - [`FnValidator`]: wraps a closure
//!
//! # Example
//!
//! ```
//! use horizon_grid::editor::{FnValidator, ValidationResult, Validator};
//! use horizon_grid::model::CellValue;
//!
//! let validator = FnValidator::new(|value: &CellValue| {
//!     if value.to_display_string().len() <= 10 {
//!         ValidationResult::valid()
//!     } else {
//!         ValidationResult::invalid("At most 10 characters")
//!     }
//! });
//!
//! assert!(validator.validate(&CellValue::from("short")).is_valid());
//! assert!(!validator.validate(&CellValue::from("far too long")).is_valid());
//! ```

use std::fmt;
use std::sync::Arc;

use horizon_grid_core::Container;

use crate::model::CellValue;

/// Identifies which sub-editor of a composite editor failed validation.
///
/// The failing editor itself is not stored here, since the composite owns
/// it. Reach it through the composite with `index`:
///
/// ```
/// use std::collections::HashMap;
/// use std::sync::Arc;
///
/// use horizon_grid::editor::{
///     CompositeEditor, CompositeOptions, Editor, EditorArgs, EditorKind, RequiredValidator,
///     TextEditor,
/// };
/// use horizon_grid::model::{Column, Item};
/// use horizon_grid_core::{CellBox, FocusScope};
///
/// let scope = FocusScope::new();
/// let column = Arc::new(
///     Column::new("owner", "owner")
///         .with_editor(EditorKind::Text)
///         .with_validator(RequiredValidator::new()),
/// );
/// let containers = HashMap::from([("owner".to_string(), scope.container(CellBox::default()))]);
/// let prepared =
///     CompositeEditor::prepare(vec![column.clone()], containers, CompositeOptions::new()).unwrap();
/// let mut form = prepared.instantiate(EditorArgs::new(scope.container(CellBox::default()), column));
/// form.load_value(&Item::new());
///
/// let result = form.validate();
/// let source = &result.errors()[0];
/// let failing = form.sub_editor(source.index).unwrap();
/// assert!(failing.downcast_ref::<TextEditor>().is_some());
/// form.destroy();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrorSource {
    /// Column index of the failing sub-editor.
    pub index: usize,
    /// Id of the column the failing sub-editor is bound to.
    pub column_id: String,
    /// Container the failing sub-editor is mounted in.
    pub container: Container,
    /// The sub-editor's own failure message.
    pub message: Option<String>,
}

/// Outcome of a validation check.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    valid: bool,
    message: Option<String>,
    errors: Vec<ValidationErrorSource>,
}

impl ValidationResult {
    /// A passing result with no message.
    pub fn valid() -> Self {
        Self {
            valid: true,
            message: None,
            errors: Vec::new(),
        }
    }

    /// A failing result carrying `message`.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
            errors: Vec::new(),
        }
    }

    /// Attaches per-source errors (used by composite aggregation).
    pub fn with_errors(mut self, errors: Vec<ValidationErrorSource>) -> Self {
        self.errors = errors;
        self
    }

    /// Returns `true` if validation passed.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The failure message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Per-source errors; empty unless produced by a composite editor.
    pub fn errors(&self) -> &[ValidationErrorSource] {
        &self.errors
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}

/// Trait for column validators.
///
/// A validator receives the editor's raw live value and decides whether
/// it is acceptable.
pub trait Validator: Send + Sync {
    /// Validate the raw value.
    fn validate(&self, value: &CellValue) -> ValidationResult;
}

// Allow using Arc<dyn Validator> as a Validator
impl<V: Validator + ?Sized> Validator for Arc<V> {
    fn validate(&self, value: &CellValue) -> ValidationResult {
        (**self).validate(value)
    }
}

// Allow using Box<dyn Validator> as a Validator
impl<V: Validator + ?Sized> Validator for Box<V> {
    fn validate(&self, value: &CellValue) -> ValidationResult {
        (**self).validate(value)
    }
}

/// Runs the optional column validator against `value`.
pub(crate) fn run_column_validator(
    validator: Option<&Arc<dyn Validator>>,
    column_id: &str,
    value: &CellValue,
) -> ValidationResult {
    match validator {
        Some(validator) => {
            let result = validator.validate(value);
            if !result.is_valid() {
                tracing::debug!(
                    target: horizon_grid_core::logging::targets::VALIDATION,
                    column = column_id,
                    message = result.message().unwrap_or_default(),
                    "column validator rejected value"
                );
            }
            result
        }
        None => ValidationResult::valid(),
    }
}

/// A validator that uses a closure.
pub struct FnValidator<F>
where
    F: Fn(&CellValue) -> ValidationResult + Send + Sync,
{
    validate_fn: F,
}

impl<F> FnValidator<F>
where
    F: Fn(&CellValue) -> ValidationResult + Send + Sync,
{
    /// Create a validator from a closure.
    pub fn new(validate_fn: F) -> Self {
        Self { validate_fn }
    }
}

impl<F> Validator for FnValidator<F>
where
    F: Fn(&CellValue) -> ValidationResult + Send + Sync,
{
    fn validate(&self, value: &CellValue) -> ValidationResult {
        (self.validate_fn)(value)
    }
}

impl<F> fmt::Debug for FnValidator<F>
where
    F: Fn(&CellValue) -> ValidationResult + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnValidator").finish_non_exhaustive()
    }
}

/// Rejects values that are null or blank after trimming.
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    message: String,
}

impl RequiredValidator {
    /// Create a validator with the default message.
    pub fn new() -> Self {
        Self {
            message: "This field is required".to_string(),
        }
    }

    /// Set the failure message using builder pattern.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Default for RequiredValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for RequiredValidator {
    fn validate(&self, value: &CellValue) -> ValidationResult {
        if value.to_display_string().trim().is_empty() {
            ValidationResult::invalid(self.message.clone())
        } else {
            ValidationResult::valid()
        }
    }
}

/// Accepts integers within the inclusive range `[minimum, maximum]`.
///
/// Integer values are checked directly; strings must parse as an integer
/// after trimming. Anything else fails.
#[derive(Debug, Clone)]
pub struct IntRangeValidator {
    minimum: i64,
    maximum: i64,
    message: Option<String>,
}

impl IntRangeValidator {
    /// Create a validator for the given range.
    pub fn new(minimum: i64, maximum: i64) -> Self {
        Self {
            minimum: minimum.min(maximum),
            maximum: minimum.max(maximum),
            message: None,
        }
    }

    /// Create a validator for non-negative integers.
    pub fn non_negative() -> Self {
        Self::new(0, i64::MAX)
    }

    /// Set the failure message using builder pattern.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Get the minimum value.
    pub fn minimum(&self) -> i64 {
        self.minimum
    }

    /// Get the maximum value.
    pub fn maximum(&self) -> i64 {
        self.maximum
    }

    fn failure(&self) -> ValidationResult {
        ValidationResult::invalid(self.message.clone().unwrap_or_else(|| {
            format!(
                "Please enter a whole number between {} and {}",
                self.minimum, self.maximum
            )
        }))
    }
}

impl Validator for IntRangeValidator {
    fn validate(&self, value: &CellValue) -> ValidationResult {
        let parsed = match value {
            CellValue::Int(n) => Some(*n),
            CellValue::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        match parsed {
            Some(n) if (self.minimum..=self.maximum).contains(&n) => ValidationResult::valid(),
            _ => self.failure(),
        }
    }
}

/// Accepts input matching a regular expression.
///
/// Blank input passes; combine with [`RequiredValidator`] in a
/// [`FnValidator`] when a value is mandatory.
#[derive(Debug, Clone)]
pub struct RegexValidator {
    pattern: regex::Regex,
    message: String,
}

impl RegexValidator {
    /// Create a validator for `pattern`.
    pub fn new(pattern: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: regex::Regex::new(pattern)?,
            message: message.into(),
        })
    }

    /// Get the pattern string.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Validator for RegexValidator {
    fn validate(&self, value: &CellValue) -> ValidationResult {
        let text = value.to_display_string();
        if text.is_empty() || self.pattern.is_match(&text) {
            ValidationResult::valid()
        } else {
            ValidationResult::invalid(self.message.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_constructors() {
        let ok = ValidationResult::valid();
        assert!(ok.is_valid());
        assert_eq!(ok.message(), None);
        assert!(ok.errors().is_empty());

        let bad = ValidationResult::invalid("nope");
        assert!(!bad.is_valid());
        assert_eq!(bad.message(), Some("nope"));
    }

    #[test]
    fn test_required_validator() {
        let v = RequiredValidator::new();
        assert!(!v.validate(&CellValue::Null).is_valid());
        assert!(!v.validate(&CellValue::from("   ")).is_valid());
        assert!(v.validate(&CellValue::from("x")).is_valid());
        assert!(v.validate(&CellValue::from(0)).is_valid());
    }

    #[test]
    fn test_int_range_validator() {
        let v = IntRangeValidator::new(0, 100);
        assert!(v.validate(&CellValue::from("0")).is_valid());
        assert!(v.validate(&CellValue::from(" 100 ")).is_valid());
        assert!(v.validate(&CellValue::from(50)).is_valid());
        assert!(!v.validate(&CellValue::from("101")).is_valid());
        assert!(!v.validate(&CellValue::from("-1")).is_valid());
        assert!(!v.validate(&CellValue::from("abc")).is_valid());
        assert_eq!(
            v.validate(&CellValue::from("abc")).message(),
            Some("Please enter a whole number between 0 and 100")
        );
    }

    #[test]
    fn test_int_range_validator_swaps_bounds() {
        let v = IntRangeValidator::new(10, -10);
        assert_eq!(v.minimum(), -10);
        assert_eq!(v.maximum(), 10);
    }

    #[test]
    fn test_regex_validator() {
        let v = RegexValidator::new(r"^[A-Z]{3}-\d+$", "Use the form ABC-123").unwrap();
        assert!(v.validate(&CellValue::from("ABC-12")).is_valid());
        assert!(v.validate(&CellValue::from("")).is_valid());
        let bad = v.validate(&CellValue::from("abc-12"));
        assert_eq!(bad.message(), Some("Use the form ABC-123"));
    }

    #[test]
    fn test_regex_validator_rejects_bad_pattern() {
        assert!(RegexValidator::new("(", "x").is_err());
    }

    #[test]
    fn test_validator_through_arc() {
        let v: Arc<dyn Validator> = Arc::new(RequiredValidator::new().with_message("needed"));
        assert_eq!(v.validate(&CellValue::Null).message(), Some("needed"));
    }

    #[test]
    fn test_run_column_validator_without_validator() {
        assert!(run_column_validator(None, "c", &CellValue::from("anything")).is_valid());
    }
}
