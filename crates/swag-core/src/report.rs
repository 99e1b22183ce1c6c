use std::fmt;

/// A generated file with path and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output root, `/`-separated.
    pub path: String,
    pub content: String,
}

/// Result of producing one item (a model, an endpoint, a service file).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome<T> {
    Ok(T),
    /// Left out on purpose; reported as a warning.
    Skipped(String),
    /// Could not be produced; reported as an error.
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// A per-item problem that did not stop the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// What the diagnostic is about: a model name, `GET /orders`, a file.
    pub item: String,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(item: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            item: item.into(),
            message: message.into(),
        }
    }

    pub fn error(item: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            item: item.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity.as_str(), self.item, self.message)
    }
}

/// Files produced by a generator plus everything that went wrong on the way.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub files: Vec<GeneratedFile>,
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationReport {
    /// Fold one item's outcome into the report, returning the artifact if any.
    pub fn record<T>(&mut self, item: &str, outcome: ItemOutcome<T>) -> Option<T> {
        match outcome {
            ItemOutcome::Ok(value) => Some(value),
            ItemOutcome::Skipped(reason) => {
                log::warn!("skipped {item}: {reason}");
                self.diagnostics.push(Diagnostic::warning(item, reason));
                None
            }
            ItemOutcome::Failed(message) => {
                log::warn!("failed {item}: {message}");
                self.diagnostics.push(Diagnostic::error(item, message));
                None
            }
        }
    }

    pub fn push_file(&mut self, file: GeneratedFile) {
        log::debug!("emitted {}", file.path);
        self.files.push(file);
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == path)
    }
}
