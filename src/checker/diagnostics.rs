#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// One reported finding.
///
/// `line` is 1-based and refers to the content as passed into the emitting
/// check, i.e. after upstream rewrites; it is not stable against the original
/// file. A diagnostic without a `suppress_key` cannot be silenced from the
/// document header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub rule: &'static str,
    pub severity: Severity,
    pub message: String,
    pub line: Option<usize>,
    pub suppress_key: Option<String>,
}

impl Diagnostic {
    pub fn warning(
        rule: &'static str,
        suppress_key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule,
            severity: Severity::Warning,
            message: message.into(),
            line: None,
            suppress_key: Some(suppress_key.into()),
        }
    }

    /// An unsuppressable finding; always fails the run.
    pub fn error(rule: &'static str, message: impl Into<String>) -> Self {
        Self {
            rule,
            severity: Severity::Error,
            message: message.into(),
            line: None,
            suppress_key: None,
        }
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

/// Aggregate output of running the full check pipeline over one document.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Final content, possibly rewritten by mutating checks.
    pub content: String,
    /// Findings that survived suppression, in emission order.
    pub diagnostics: Vec<Diagnostic>,
    /// True iff the final content differs from the input, byte for byte.
    pub changed: bool,
    /// 1 iff an error-severity finding survived suppression, else 0.
    /// Warning-only runs are non-fatal at this level; stricter commit
    /// policies live in the CLI layer.
    pub exit_status: i32,
}

impl RunResult {
    pub fn has_errors(&self) -> bool {
        self.exit_status != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders() {
        let diag = Diagnostic::warning("fixme", "skip_fixme", "Found FIXME in text!").with_line(3);
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.suppress_key.as_deref(), Some("skip_fixme"));
        assert_eq!(diag.line, Some(3));

        let diag = Diagnostic::error("lowercase_tags", "Invalid tag: Foo");
        assert_eq!(diag.severity, Severity::Error);
        assert!(diag.suppress_key.is_none());
        assert!(diag.line.is_none());
    }
}
