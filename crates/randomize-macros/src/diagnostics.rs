//! Diagnostics produced while analyzing a declaration.
//!
//! Analysis never fails the build on its own. Every field or variant that is
//! degraded (excluded, unrandomizable, malformed annotation) is reported as a
//! [`Diagnostic`] to a [`DiagnosticSink`]. The derive entry point decides what
//! to do with them: by default they are dropped, under `#[randomize(strict)]`
//! warnings become compile errors.

use parking_lot::Mutex;
use proc_macro2::Span;
use thiserror::Error;

/// Why an item was degraded during analysis.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticKind {
    /// The field carries `#[randomize(skip)]`.
    #[error("field `{field}` is excluded from randomization")]
    Excluded { field: String },

    /// The field type has no meaningful random value.
    #[error("field `{field}` cannot be randomized ({reason}); it is filled with `Default::default()`")]
    Unrandomizable { field: String, reason: String },

    /// A field annotation could not be parsed; the default generator is used.
    #[error("ignoring malformed `randomize` annotation on `{item}`: {message}")]
    MalformedAnnotation { item: String, message: String },

    /// One slot of a `case` override is not a valid expression.
    #[error("override slot {slot} of variant `{variant}` is not an expression: `{text}`")]
    MalformedOverride {
        variant: String,
        slot: usize,
        text: String,
    },

    /// The `case` override lists more slots than the variant has fields.
    #[error("variant `{variant}` has {params} field(s); {discarded} override slot(s) discarded")]
    ExtraOverrides {
        variant: String,
        params: usize,
        discarded: usize,
    },

    /// Both `in` and `strategy` were given; `in` wins.
    #[error("field `{field}` has both `in` and `strategy`; `strategy` is ignored")]
    ConflictingSources { field: String },

    /// The declaration is neither a struct nor an inhabited enum.
    #[error("`{name}` is not a struct or an enum with variants; nothing is generated")]
    UnsupportedKind { name: String },
}

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Deliberate omission requested by the user.
    Note,
    /// Likely mistake masked by the silent-degradation policy.
    Warning,
}

impl DiagnosticKind {
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::Excluded { .. } | DiagnosticKind::ConflictingSources { .. } => {
                Severity::Note
            }
            _ => Severity::Warning,
        }
    }
}

/// A single analysis outcome attached to a source span.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    /// Convert into a `syn::Error` at the diagnostic's span.
    pub fn to_error(&self) -> syn::Error {
        syn::Error::new(self.span, self.kind.to_string())
    }
}

/// Receiver for analysis diagnostics.
pub trait DiagnosticSink {
    /// Called for every degraded item.
    fn report(&self, diagnostic: Diagnostic);
}

/// Sink that accumulates diagnostics for later inspection.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take collected diagnostics, clearing the collector.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.lock())
    }

    /// Kinds of the collected diagnostics, in report order.
    #[cfg(test)]
    pub fn kinds(&self) -> Vec<DiagnosticKind> {
        self.diagnostics
            .lock()
            .iter()
            .map(|d| d.kind.clone())
            .collect()
    }
}

impl DiagnosticSink for DiagnosticCollector {
    fn report(&self, diagnostic: Diagnostic) {
        self.diagnostics.lock().push(diagnostic);
    }
}

/// Combine every warning into one `syn::Error`, if there is any.
pub fn warnings_as_error(diagnostics: &[Diagnostic]) -> Option<syn::Error> {
    diagnostics
        .iter()
        .filter(|d| d.severity() == Severity::Warning)
        .map(Diagnostic::to_error)
        .reduce(|mut acc, err| {
            acc.combine(err);
            acc
        })
}
