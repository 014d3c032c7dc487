//! Conversion from validation verdicts to LSP diagnostics.

use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, Position, Range};

use crate::validators::ValidationResult;

const SOURCE: &str = "compose";

/// Turns a verdict into the diagnostics to publish: empty when valid, one
/// ERROR otherwise. A known line highlights that whole line; a structural
/// violation with no position anchors at the document start.
pub fn to_diagnostics(result: &ValidationResult, text: &str) -> Vec<Diagnostic> {
    if result.is_valid {
        return Vec::new();
    }

    let message = result
        .error
        .clone()
        .unwrap_or_else(|| "Invalid document".to_string());

    let range = match result.line {
        Some(line) => line_range(line, text),
        None => Range::default(),
    };

    vec![Diagnostic {
        range,
        severity: Some(DiagnosticSeverity::ERROR),
        source: Some(SOURCE.to_string()),
        message,
        ..Default::default()
    }]
}

/// Whole-line range for a 1-based line number, clamped to the document.
fn line_range(line: usize, text: &str) -> Range {
    let lines: Vec<&str> = text.lines().collect();
    let max_line = lines.len().saturating_sub(1);
    let line_idx = line.saturating_sub(1).min(max_line);
    let line_len = lines.get(line_idx).map_or(0, |l| l.chars().count());

    Range {
        start: Position {
            line: line_idx as u32,
            character: 0,
        },
        end: Position {
            line: line_idx as u32,
            character: line_len as u32,
        },
    }
}
