//! Domain error model.
//!
//! A single error type carries a failure [`ErrorKind`] plus the context entries
//! attached at each boundary it crossed on the way out.

use core::fmt;

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// What went wrong, independent of where.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A metadata lookup found no matching entity.
    #[error("no {entity} found for id {id}")]
    Lookup { entity: &'static str, id: String },

    /// A storage attributes key contained a token that is not an integer id.
    #[error("invalid storage attributes key {key:?}: token {token:?} is not an integer id")]
    InvalidKeyFormat { token: String, key: String },

    /// A value failed validation (e.g. malformed master data).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Any other collaborator failure, passed through as-is.
    #[error("collaborator failure: {0}")]
    Collaborator(String),
}

/// Domain-level error with accumulated context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainError {
    kind: ErrorKind,
    context: Vec<(&'static str, String)>,
}

impl DomainError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: Vec::new(),
        }
    }

    pub fn lookup(entity: &'static str, id: impl fmt::Display) -> Self {
        Self::new(ErrorKind::Lookup {
            entity,
            id: id.to_string(),
        })
    }

    pub fn invalid_key_format(token: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidKeyFormat {
            token: token.into(),
            key: key.into(),
        })
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation(msg.into()))
    }

    pub fn collaborator(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Collaborator(msg.into()))
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Context entries, innermost first.
    pub fn context(&self) -> &[(&'static str, String)] {
        &self.context
    }

    /// First context value recorded under `key`.
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Attach one more context entry; the kind is left untouched.
    pub fn with_context(mut self, key: &'static str, value: impl fmt::Display) -> Self {
        self.context.push((key, value.to_string()));
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)?;
        if !self.context.is_empty() {
            f.write_str(" [")?;
            for (i, (key, value)) in self.context.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}

impl std::error::Error for DomainError {}

impl From<ErrorKind> for DomainError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Annotate a failing [`DomainResult`] at an abstraction boundary.
pub trait ResultExt<T> {
    fn context(self, key: &'static str, value: impl fmt::Display) -> DomainResult<T>;

    /// Like [`ResultExt::context`], but only builds the value on failure.
    fn with_context<V, F>(self, key: &'static str, f: F) -> DomainResult<T>
    where
        V: fmt::Display,
        F: FnOnce() -> V;
}

impl<T> ResultExt<T> for DomainResult<T> {
    fn context(self, key: &'static str, value: impl fmt::Display) -> DomainResult<T> {
        self.map_err(|e| e.with_context(key, value))
    }

    fn with_context<V, F>(self, key: &'static str, f: F) -> DomainResult<T>
    where
        V: fmt::Display,
        F: FnOnce() -> V,
    {
        self.map_err(|e| e.with_context(key, f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failing_lookup() -> DomainResult<()> {
        Err(DomainError::lookup("attribute value", 7))
    }

    #[test]
    fn display_without_context_is_kind_only() {
        let err = DomainError::lookup("product", 42);
        assert_eq!(err.to_string(), "no product found for id 42");
    }

    #[test]
    fn context_accumulates_innermost_first() {
        let err = failing_lookup()
            .context("attribute_value_id", 7)
            .context("row_index", 3)
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "no attribute value found for id 7 [attribute_value_id=7, row_index=3]"
        );
        assert_eq!(err.context_value("row_index"), Some("3"));
        assert_eq!(err.context().len(), 2);
    }

    #[test]
    fn context_keeps_kind() {
        let err = Err::<(), _>(DomainError::collaborator("connection reset"))
            .with_context("product_id", || 9)
            .unwrap_err();

        assert_eq!(err.kind(), &ErrorKind::Collaborator("connection reset".to_string()));
    }

    #[test]
    fn with_context_is_lazy_on_success() {
        let ok: DomainResult<u8> = Ok(1);
        let value = ok
            .with_context("never", || -> String { panic!("must not be evaluated") })
            .unwrap();
        assert_eq!(value, 1);
    }
}
