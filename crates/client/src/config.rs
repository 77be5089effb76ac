//! Translator settings.

/// Environment variable toggling per-call stocking unit memoization.
pub const MEMOIZE_STOCKING_UNITS_ENV: &str = "DISPO_MEMOIZE_STOCKING_UNITS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslatorConfig {
    /// Resolve each product's stocking unit once per call instead of once per row.
    pub memoize_stocking_units: bool,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            memoize_stocking_units: true,
        }
    }
}

impl TranslatorConfig {
    /// Read settings from the process environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = lookup(MEMOIZE_STOCKING_UNITS_ENV) {
            match parse_bool(&raw) {
                Some(v) => config.memoize_stocking_units = v,
                None => tracing::warn!(
                    value = %raw,
                    "{MEMOIZE_STOCKING_UNITS_ENV} is not a boolean; using default"
                ),
            }
        }
        config
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}
