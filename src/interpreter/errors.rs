//! Runtime error types
//!
//! All three error kinds are fatal to the running program; there is no
//! recovery once one is raised. Low-level runtime operations raise errors
//! without a location and the evaluator attaches one at the statement or
//! expression that triggered the failure.

use crate::parser::ast::SourceLocation;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Undefined/duplicate name, missing overload, wrong argument count
    Name,
    /// Suffix/value mismatch, failed interface conformance, bad conversion
    Type,
    /// Dereference through Nil while resolving a dotted path
    Fault,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Name => write!(f, "NAME"),
            ErrorKind::Type => write!(f, "TYPE"),
            ErrorKind::Fault => write!(f, "FAULT"),
        }
    }
}

#[derive(Debug)]
pub struct RuntimeError {
    pub kind: ErrorKind,
    pub message: String,
    pub location: Option<SourceLocation>,
}

impl RuntimeError {
    pub fn name(message: impl Into<String>) -> Self {
        RuntimeError {
            kind: ErrorKind::Name,
            message: message.into(),
            location: None,
        }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        RuntimeError {
            kind: ErrorKind::Type,
            message: message.into(),
            location: None,
        }
    }

    pub fn fault(message: impl Into<String>) -> Self {
        RuntimeError {
            kind: ErrorKind::Fault,
            message: message.into(),
            location: None,
        }
    }

    /// Attach a location unless one is already set; the innermost frame that
    /// knows a location wins.
    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location.get_or_insert(location);
        self
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error: {}", self.kind, self.message)?;
        if let Some(location) = &self.location {
            write!(f, " (line {}, column {})", location.line, location.column)?;
        }
        Ok(())
    }
}

impl std::error::Error for RuntimeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_keeps_innermost_location() {
        let err = RuntimeError::name("missing")
            .at(SourceLocation::new(3, 5))
            .at(SourceLocation::new(10, 1));
        assert_eq!(err.location, Some(SourceLocation::new(3, 5)));
    }

    #[test]
    fn test_display_includes_kind_and_location() {
        let err = RuntimeError::fault("dereference through nil").at(SourceLocation::new(2, 7));
        assert_eq!(
            err.to_string(),
            "FAULT error: dereference through nil (line 2, column 7)"
        );
    }
}
