//! User-facing pipeline diagnostics.
//!
//! A [`Diagnostic`] is the classified, displayable description of a failed
//! pipeline run. All three kinds are terminal for the current run only; the
//! next edit always gets a clean attempt, and none of them ever propagate
//! far enough to crash the hosting UI.

/// Classification of a pipeline failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The source failed to lower or parse
    Compile,
    /// Execution (or a later render call) threw
    Runtime,
    /// Execution succeeded but produced neither an export nor log output
    NoOutput,
}

impl DiagnosticKind {
    /// Short label used by the error panels
    pub fn label(&self) -> &'static str {
        match self {
            Self::Compile => "Compilation error",
            Self::Runtime => "Runtime error",
            Self::NoOutput => "No output",
        }
    }
}

/// A classified failure with a human-readable message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    /// A compile-stage diagnostic; the message is the parser/lowering
    /// message verbatim.
    pub fn compile(message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Compile,
            message: message.into(),
        }
    }

    /// A runtime diagnostic from a thrown error during execution or render
    pub fn runtime(message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Runtime,
            message: message.into(),
        }
    }

    /// The diagnostic raised when a run yields neither an export nor logs
    pub fn no_output() -> Self {
        Self {
            kind: DiagnosticKind::NoOutput,
            message: "no default export and no console output produced".to_string(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind.label(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let diag = Diagnostic::compile("unexpected token");
        assert_eq!(diag.to_string(), "Compilation error: unexpected token");
        assert_eq!(diag.kind, DiagnosticKind::Compile);
    }

    #[test]
    fn test_no_output_message() {
        let diag = Diagnostic::no_output();
        assert_eq!(diag.kind, DiagnosticKind::NoOutput);
        assert!(diag.message.contains("no default export"));
    }
}
