//! Gathers diagnostics across statements so one run reports them all.

use crate::error::{Diagnostic, ParseError};

#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// `Ok` only when nothing was emitted.
    pub fn finish(self) -> Result<(), ParseError> {
        if self.diagnostics.is_empty() {
            Ok(())
        } else {
            Err(self.diagnostics.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_emitted() {
        assert!(DiagnosticCollector::new().finish().is_ok());
    }

    #[test]
    fn test_every_emission_is_kept() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::error("first"));
        collector.emit(Diagnostic::error("second"));

        let err = collector.finish().unwrap_err();
        assert_eq!(err.len(), 2);
        assert_eq!(err.diagnostics()[1].message(), "second");
    }
}
