//! Logging facilities for Horizon Grid.
//!
//! Horizon Grid uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Every event is emitted under one of the [`targets`], so a filter such as
//! `RUST_LOG=horizon_grid::composite=trace` narrows output to a single
//! subsystem.

/// Span names used throughout Horizon Grid for tracing.
///
/// These constants can be used to filter traces for specific subsystems.
pub mod span_names {
    /// Composite editor validation pass.
    pub const COMPOSITE_VALIDATE: &str = "horizon_grid::composite::validate";
    /// Edit session commit.
    pub const SESSION_COMMIT: &str = "horizon_grid::session::commit";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core infrastructure target.
    pub const CORE: &str = "horizon_grid_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_grid_core::signal";
    /// Edit lock target.
    pub const EDIT_LOCK: &str = "horizon_grid_core::edit_lock";
    /// Focus routing and mount containers target.
    pub const FOCUS: &str = "horizon_grid_core::focus";
    /// Concrete editor lifecycle target.
    pub const EDITOR: &str = "horizon_grid::editor";
    /// Composite editor target.
    pub const COMPOSITE: &str = "horizon_grid::composite";
    /// Validation target.
    pub const VALIDATION: &str = "horizon_grid::validation";
    /// Edit session target.
    pub const SESSION: &str = "horizon_grid::session";
    /// Settings loading target.
    pub const SETTINGS: &str = "horizon_grid::settings";
}

/// Returns every known log target, in declaration order.
///
/// Useful for building an `EnvFilter` directive that enables all of
/// Horizon Grid at a given level.
pub fn all_targets() -> &'static [&'static str] {
    &[
        targets::CORE,
        targets::SIGNAL,
        targets::EDIT_LOCK,
        targets::FOCUS,
        targets::EDITOR,
        targets::COMPOSITE,
        targets::VALIDATION,
        targets::SESSION,
        targets::SETTINGS,
    ]
}

/// Builds a comma-separated filter directive enabling every Horizon Grid
/// target at `level` (for example `"debug"`).
pub fn filter_directive(level: &str) -> String {
    all_targets()
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_are_unique() {
        let targets = all_targets();
        for (i, a) in targets.iter().enumerate() {
            for b in &targets[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_filter_directive() {
        let directive = filter_directive("debug");
        assert!(directive.starts_with("horizon_grid_core=debug,"));
        assert!(directive.contains("horizon_grid::composite=debug"));
        assert_eq!(directive.split(',').count(), all_targets().len());
    }

    #[test]
    fn test_filter_directive_parses() {
        let filter = tracing_subscriber::EnvFilter::try_new(filter_directive("trace"));
        assert!(filter.is_ok());
    }
}
