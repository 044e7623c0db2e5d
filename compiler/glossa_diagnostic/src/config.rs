//! Diagnostic configuration.

use crate::ColorMode;

/// Settings applied by a [`DiagnosticStack`](crate::DiagnosticStack).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiagnosticConfig {
    /// Promote every warning to an error before it reaches a context.
    pub warnings_as_errors: bool,
    /// Color mode for the default stderr emitter.
    pub color: ColorMode,
}

impl DiagnosticConfig {
    pub const WARNINGS_AS_ERRORS_VAR: &'static str = "GLOSSA_WARNINGS_AS_ERRORS";
    pub const COLOR_VAR: &'static str = "GLOSSA_COLOR";

    #[must_use]
    pub fn with_warnings_as_errors(mut self, enabled: bool) -> Self {
        self.warnings_as_errors = enabled;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }

    /// Read `GLOSSA_WARNINGS_AS_ERRORS` and `GLOSSA_COLOR` from the process
    /// environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    ///
    /// Unset or unrecognised values leave the default in place.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(value) = lookup(Self::WARNINGS_AS_ERRORS_VAR) {
            match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => config.warnings_as_errors = true,
                "0" | "false" | "no" | "off" | "" => {}
                other => tracing::warn!(
                    var = Self::WARNINGS_AS_ERRORS_VAR,
                    value = other,
                    "ignoring unrecognised value"
                ),
            }
        }

        if let Some(value) = lookup(Self::COLOR_VAR) {
            match ColorMode::parse(&value) {
                Some(color) => config.color = color,
                None => tracing::warn!(
                    var = Self::COLOR_VAR,
                    value = value.as_str(),
                    "ignoring unrecognised value"
                ),
            }
        }

        config
    }
}
